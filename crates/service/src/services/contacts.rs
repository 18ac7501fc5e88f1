use models::contact::{self, Contact, ContactInput, ContactPatch};
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::storage::Collection;

const ENTITY: &str = "contact";

/// Contact manager keyed by title-cased name.
///
/// The backing store is either `contacts.json` or an in-memory map chosen at
/// startup; the service does not know which.
pub struct ContactsService {
    records: Collection<Contact>,
}

impl ContactsService {
    pub fn new(records: Collection<Contact>) -> Self {
        Self { records }
    }

    pub async fn create(&self, input: ContactInput) -> Result<Contact, ServiceError> {
        let created = input.validate()?;
        self.records
            .update_map(|map| {
                if map.contains_key(&created.name) {
                    warn!(name = %created.name, "contact already exists");
                    return Err(ServiceError::conflict(ENTITY, &created.name));
                }
                map.insert(created.name.clone(), created.clone());
                Ok(())
            })
            .await?;
        info!(name = %created.name, "contact created");
        Ok(created)
    }

    /// All contacts, or those whose name matches `name` case-insensitively.
    pub async fn list(&self, name: Option<&str>) -> Result<Vec<Contact>, ServiceError> {
        let wanted = name.map(|n| n.trim().to_lowercase()).filter(|n| !n.is_empty());
        let all = self.records.read_all().await?;
        Ok(all
            .into_values()
            .filter(|c| wanted.as_deref().map_or(true, |w| c.name.to_lowercase() == w))
            .collect())
    }

    pub async fn get(&self, name: &str) -> Result<Contact, ServiceError> {
        let key = contact::contact_key(name)?;
        self.records
            .read_all()
            .await?
            .remove(&key)
            .ok_or_else(|| ServiceError::not_found(ENTITY, &key))
    }

    /// Full replacement. The body must name the same contact as the path.
    pub async fn replace(&self, name: &str, input: ContactInput) -> Result<Contact, ServiceError> {
        let key = contact::contact_key(name)?;
        let replacement = input.validate()?;
        if replacement.name != key {
            return Err(ServiceError::Validation(format!(
                "name in path '{key}' must match contact name '{}'",
                replacement.name
            )));
        }
        self.records
            .update_map(|map| {
                let slot = map.get_mut(&key).ok_or_else(|| ServiceError::not_found(ENTITY, &key))?;
                *slot = replacement.clone();
                Ok(())
            })
            .await?;
        info!(name = %key, "contact replaced");
        Ok(replacement)
    }

    pub async fn patch(&self, name: &str, patch: ContactPatch) -> Result<Contact, ServiceError> {
        let key = contact::contact_key(name)?;
        let patch = patch.validate()?;
        if patch.is_empty() {
            return Err(ServiceError::Validation("at least one of phone or email is required".into()));
        }
        let updated = self
            .records
            .update_map(|map| {
                let current = map.get_mut(&key).ok_or_else(|| ServiceError::not_found(ENTITY, &key))?;
                patch.apply(current);
                Ok(current.clone())
            })
            .await?;
        info!(name = %key, "contact patched");
        Ok(updated)
    }

    pub async fn delete(&self, name: &str) -> Result<Contact, ServiceError> {
        let key = contact::contact_key(name)?;
        let removed = self
            .records
            .update_map(|map| map.remove(&key).ok_or_else(|| ServiceError::not_found(ENTITY, &key)))
            .await?;
        info!(name = %key, "contact deleted");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::storage::json_map_store::JsonMapStore;
    use crate::storage::memory_store::MemoryStore;
    use crate::test_support::{cleanup, temp_dir};

    fn memory_service() -> ContactsService {
        ContactsService::new(Collection::<Contact>::new(Arc::new(MemoryStore::<Contact>::new("contacts"))))
    }

    fn input(name: &str) -> ContactInput {
        ContactInput { name: name.into(), phone: "555 010 0199".into(), email: "Someone@Example.org".into() }
    }

    #[tokio::test]
    async fn create_normalizes_and_conflicts() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        let c = svc.create(input("linus torvalds")).await?;
        assert_eq!(c.name, "Linus Torvalds");
        assert_eq!(c.email, "someone@example.org");
        assert!(matches!(svc.create(input("LINUS TORVALDS")).await, Err(ServiceError::Conflict(_))));
        assert_eq!(svc.get("linus torvalds").await?, c);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_name() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        svc.create(input("Ada")).await?;
        svc.create(input("Grace")).await?;
        assert_eq!(svc.list(None).await?.len(), 2);
        assert_eq!(svc.list(Some("ADA")).await?.len(), 1);
        assert_eq!(svc.list(Some("nobody")).await?.len(), 0);
        assert_eq!(svc.list(Some("  ")).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn patch_and_replace() -> Result<(), anyhow::Error> {
        let svc = memory_service();
        svc.create(input("Ada")).await?;

        let patched = svc.patch("ada", ContactPatch { phone: Some("+44 20 7946 0958".into()), email: None }).await?;
        assert_eq!(patched.phone, "+44 20 7946 0958");
        assert_eq!(patched.email, "someone@example.org");

        assert!(matches!(svc.patch("ada", ContactPatch::default()).await, Err(ServiceError::Validation(_))));
        assert!(matches!(
            svc.patch("ada", ContactPatch { phone: None, email: Some("bad".into()) }).await,
            Err(ServiceError::Model(_))
        ));
        assert!(matches!(
            svc.patch("Bob", ContactPatch { phone: Some("5550100".into()), email: None }).await,
            Err(ServiceError::NotFound(_))
        ));

        let mismatch = svc.replace("Ada", input("Grace")).await;
        assert!(matches!(mismatch, Err(ServiceError::Validation(_))));
        let replaced = svc
            .replace("ADA", ContactInput { name: "ada".into(), phone: "1234567".into(), email: "a@b.io".into() })
            .await?;
        assert_eq!(replaced.phone, "1234567");
        Ok(())
    }

    #[tokio::test]
    async fn delete_missing_leaves_document_untouched() -> Result<(), anyhow::Error> {
        let dir = temp_dir("svc_contacts_file");
        let path = dir.join("contacts.json");
        let svc = ContactsService::new(Collection::<Contact>::new(Arc::new(JsonMapStore::<Contact>::new(&path))));
        svc.create(input("Ada")).await?;
        let before = tokio::fs::read(&path).await?;

        assert!(matches!(svc.delete("Nobody").await, Err(ServiceError::NotFound(_))));
        assert_eq!(tokio::fs::read(&path).await?, before);

        svc.delete("ada").await?;
        assert!(svc.list(None).await?.is_empty());
        cleanup(&dir).await;
        Ok(())
    }
}
