use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::error;

use crate::errors::ServiceError;
use crate::storage::{RecordStore, Records};

/// One collection: a record store plus the lock that serializes every
/// load-mutate-save sequence against it.
pub struct Collection<V> {
    store: Arc<dyn RecordStore<V>>,
    lock: Mutex<()>,
    backup_before_write: bool,
}

impl<V> Collection<V>
where
    V: Send + Sync + 'static,
{
    pub fn new(store: Arc<dyn RecordStore<V>>) -> Self {
        Self { store, lock: Mutex::new(()), backup_before_write: false }
    }

    /// Copy the document aside before each save; a failed copy aborts the save.
    pub fn with_backup(mut self, enabled: bool) -> Self {
        self.backup_before_write = enabled;
        self
    }

    pub fn resource(&self) -> &str {
        self.store.resource()
    }

    /// Load the whole collection. Never writes.
    pub async fn read_all(&self) -> Result<Records<V>, ServiceError> {
        let _guard = self.lock.lock().await;
        self.store.load().await.inspect_err(|e| self.log_failure("load", e))
    }

    /// Apply a mutation to the loaded map and persist it.
    ///
    /// When `f` fails nothing is written.
    pub async fn update_map<F, T>(&self, f: F) -> Result<T, ServiceError>
    where
        F: FnOnce(&mut Records<V>) -> Result<T, ServiceError>,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.store.load().await.inspect_err(|e| self.log_failure("load", e))?;
        let out = f(&mut records)?;
        if self.backup_before_write {
            self.store.backup().await.inspect_err(|e| self.log_failure("backup", e))?;
        }
        self.store.save(&records).await.inspect_err(|e| self.log_failure("save", e))?;
        Ok(out)
    }

    fn log_failure(&self, op: &str, err: &ServiceError) {
        error!(resource = %self.resource(), op, error = %err, "record store failure");
    }
}
