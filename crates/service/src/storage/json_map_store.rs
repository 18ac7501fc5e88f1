use std::{io::ErrorKind, marker::PhantomData, path::PathBuf};

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;
use tracing::debug;

use crate::errors::ServiceError;
use crate::storage::{RecordStore, Records};

/// JSON file-backed key-value map store.
///
/// The whole collection is one pretty-printed JSON object mapping string keys
/// to records. Nothing is cached: every `load` reads the file again.
pub struct JsonMapStore<V> {
    file_path: PathBuf,
    resource: String,
    _records: PhantomData<fn() -> V>,
}

impl<V> JsonMapStore<V> {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let file_path = path.into();
        let resource = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());
        Self { file_path, resource, _records: PhantomData }
    }

    pub fn file_path(&self) -> &PathBuf {
        &self.file_path
    }

    /// Sibling `<file>.bak` written by [`RecordStore::backup`].
    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.file_path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

#[async_trait]
impl<V> RecordStore<V> for JsonMapStore<V>
where
    V: Serialize + DeserializeOwned + Send + Sync,
{
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn load(&self) -> Result<Records<V>, ServiceError> {
        let bytes = match fs::read(&self.file_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Records::new()),
            Err(e) => return Err(ServiceError::io(&self.resource, e)),
        };
        let map: Records<V> = serde_json::from_slice(&bytes)
            .map_err(|e| ServiceError::corrupted(&self.resource, e))?;
        debug!(resource = %self.resource, records = map.len(), "loaded collection");
        Ok(map)
    }

    async fn save(&self, records: &Records<V>) -> Result<(), ServiceError> {
        if let Some(parent) = self.file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::io(&self.resource, e))?;
        }
        let data = serde_json::to_vec_pretty(records)
            .map_err(|e| ServiceError::io(&self.resource, e.into()))?;
        fs::write(&self.file_path, data)
            .await
            .map_err(|e| ServiceError::io(&self.resource, e))?;
        debug!(resource = %self.resource, records = records.len(), "saved collection");
        Ok(())
    }

    async fn backup(&self) -> Result<(), ServiceError> {
        match fs::copy(&self.file_path, self.backup_path()).await {
            Ok(_) => Ok(()),
            // nothing written yet
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ServiceError::io(format!("{}.bak", self.resource), e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{cleanup, temp_dir};

    #[tokio::test]
    async fn json_map_store_crud_persists() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_map_store");
        let store = JsonMapStore::<String>::new(dir.join("nested/map.json"));

        // absent document is an empty collection
        assert_eq!(store.load().await?.len(), 0);

        let mut map = Records::new();
        map.insert("a".to_string(), "1".to_string());
        map.insert("b".to_string(), "2".to_string());
        store.save(&map).await?;

        // reload through a second handle
        let reloaded = JsonMapStore::<String>::new(dir.join("nested/map.json"));
        let entries = reloaded.load().await?;
        assert_eq!(entries, map);

        // pretty-printed object
        let text = tokio::fs::read_to_string(store.file_path()).await?;
        assert!(text.contains("\n  \"a\": \"1\""));

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn invalid_json_is_corrupted_store() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_map_store_corrupt");
        tokio::fs::create_dir_all(&dir).await?;
        let path = dir.join("broken.json");
        tokio::fs::write(&path, b"{ not json").await?;

        let store = JsonMapStore::<String>::new(&path);
        let err = store.load().await.unwrap_err();
        assert!(matches!(err, ServiceError::CorruptedStore { ref resource, .. } if resource == "broken.json"));

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn backup_copies_current_document() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_map_store_backup");
        let store = JsonMapStore::<u32>::new(dir.join("scores.json"));

        // no document yet: backup is a no-op
        store.backup().await?;
        assert!(tokio::fs::metadata(store.backup_path()).await.is_err());

        let mut map = Records::new();
        map.insert("x".to_string(), 1);
        store.save(&map).await?;
        store.backup().await?;
        let copy = tokio::fs::read(store.backup_path()).await?;
        assert_eq!(copy, tokio::fs::read(store.file_path()).await?);
        assert!(store.backup_path().ends_with("scores.json.bak"));

        cleanup(&dir).await;
        Ok(())
    }

    #[tokio::test]
    async fn unreadable_path_is_io_failure() -> Result<(), anyhow::Error> {
        let dir = temp_dir("json_map_store_io");
        // a directory where the document should be
        let path = dir.join("is_a_dir.json");
        tokio::fs::create_dir_all(&path).await?;

        let store = JsonMapStore::<String>::new(&path);
        assert!(matches!(store.load().await, Err(ServiceError::Io { .. })));
        assert!(matches!(store.save(&Records::new()).await, Err(ServiceError::Io { .. })));

        cleanup(&dir).await;
        Ok(())
    }
}
