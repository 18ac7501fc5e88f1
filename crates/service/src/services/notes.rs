use models::note::{self, Note, NoteContent, NoteInput};
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::storage::Collection;

const ENTITY: &str = "note";

/// Notes keyed by sanitized title; the collection maps title to content.
pub struct NotesService {
    records: Collection<String>,
}

impl NotesService {
    pub fn new(records: Collection<String>) -> Self {
        Self { records }
    }

    pub async fn create(&self, input: NoteInput) -> Result<Note, ServiceError> {
        let created = input.validate()?;
        self.records
            .update_map(|map| {
                if map.contains_key(&created.title) {
                    warn!(title = %created.title, "note already exists");
                    return Err(ServiceError::conflict(ENTITY, &created.title));
                }
                map.insert(created.title.clone(), created.content.clone());
                Ok(())
            })
            .await?;
        info!(title = %created.title, bytes = created.content.len(), "note created");
        Ok(created)
    }

    /// Titles of every stored note.
    pub async fn list(&self) -> Result<Vec<String>, ServiceError> {
        Ok(self.records.read_all().await?.into_keys().collect())
    }

    pub async fn get(&self, title: &str) -> Result<Note, ServiceError> {
        let title = note::sanitize_title(title)?;
        let content = self
            .records
            .read_all()
            .await?
            .remove(&title)
            .ok_or_else(|| ServiceError::not_found(ENTITY, &title))?;
        Ok(Note { title, content })
    }

    pub async fn update(&self, title: &str, body: NoteContent) -> Result<Note, ServiceError> {
        let title = note::sanitize_title(title)?;
        note::validate_content(&body.content)?;
        self.records
            .update_map(|map| {
                let slot = map.get_mut(&title).ok_or_else(|| ServiceError::not_found(ENTITY, &title))?;
                *slot = body.content.clone();
                Ok(())
            })
            .await?;
        info!(title = %title, "note updated");
        Ok(Note { title, content: body.content })
    }

    pub async fn delete(&self, title: &str) -> Result<Note, ServiceError> {
        let title = note::sanitize_title(title)?;
        let content = self
            .records
            .update_map(|map| map.remove(&title).ok_or_else(|| ServiceError::not_found(ENTITY, &title)))
            .await?;
        info!(title = %title, "note deleted");
        Ok(Note { title, content })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::note_dir_store::NoteDirStore;
    use crate::test_support::{cleanup, temp_dir};

    fn service(dir: &std::path::Path) -> NotesService {
        NotesService::new(Collection::<String>::new(Arc::new(NoteDirStore::new(dir.join("notes")))))
    }

    #[tokio::test]
    async fn create_get_update_delete() -> Result<(), anyhow::Error> {
        let dir = temp_dir("svc_notes");
        let svc = service(&dir);

        let note = svc.create(NoteInput { title: "week: plan?".into(), content: "ship it".into() }).await?;
        assert_eq!(note.title, "week_ plan_");
        assert!(tokio::fs::metadata(dir.join("notes/week_ plan_.txt")).await.is_ok());

        // lookups sanitize the same way
        assert_eq!(svc.get("week: plan?").await?, note);

        let updated = svc.update("week_ plan_", NoteContent { content: "shipped".into() }).await?;
        assert_eq!(svc.get(&updated.title).await?.content, "shipped");
        assert_eq!(svc.list().await?, vec!["week_ plan_".to_string()]);

        svc.delete(&note.title).await?;
        assert!(matches!(svc.get(&note.title).await, Err(ServiceError::NotFound(_))));
        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicate_and_missing_notes() -> Result<(), anyhow::Error> {
        let dir = temp_dir("svc_notes_dup");
        let svc = service(&dir);
        svc.create(NoteInput { title: "a".into(), content: "one".into() }).await?;

        let dup = svc.create(NoteInput { title: "a".into(), content: "two".into() }).await;
        assert!(matches!(dup, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.get("a").await?.content, "one");

        assert!(matches!(svc.delete("ghost").await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            svc.update("a", NoteContent { content: " ".into() }).await,
            Err(ServiceError::Model(_))
        ));
        cleanup(&dir).await;
        Ok(())
    }
}
