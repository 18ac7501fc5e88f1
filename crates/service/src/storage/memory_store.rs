use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::errors::ServiceError;
use crate::storage::{RecordStore, Records};

/// Process-local record store. Lives as long as the composition root that
/// built it; nothing survives a restart.
pub struct MemoryStore<V> {
    inner: RwLock<Records<V>>,
    resource: String,
}

impl<V> MemoryStore<V> {
    pub fn new(resource: impl Into<String>) -> Self {
        Self { inner: RwLock::new(Records::new()), resource: resource.into() }
    }
}

#[async_trait]
impl<V> RecordStore<V> for MemoryStore<V>
where
    V: Clone + Send + Sync,
{
    fn resource(&self) -> &str {
        &self.resource
    }

    async fn load(&self) -> Result<Records<V>, ServiceError> {
        Ok(self.inner.read().await.clone())
    }

    async fn save(&self, records: &Records<V>) -> Result<(), ServiceError> {
        let mut map = self.inner.write().await;
        *map = records.clone();
        Ok(())
    }
}
