//! Storage abstractions for service layer
//!
//! A record store persists one whole collection at a time. Backends:
//! - [`json_map_store::JsonMapStore`]: one pretty-printed JSON document
//! - [`memory_store::MemoryStore`]: process-local map
//! - [`note_dir_store::NoteDirStore`]: a directory of `<title>.txt` files
//!
//! [`collection::Collection`] wraps a store with the per-collection lock.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::errors::ServiceError;

pub mod collection;
pub mod json_map_store;
pub mod memory_store;
pub mod note_dir_store;

pub use collection::Collection;

/// Full keyed mapping of one collection.
pub type Records<V> = BTreeMap<String, V>;

#[async_trait]
pub trait RecordStore<V: Send + Sync>: Send + Sync {
    /// Human-readable name used in logs and error messages.
    fn resource(&self) -> &str;

    /// Whole collection; an absent document is an empty collection.
    async fn load(&self) -> Result<Records<V>, ServiceError>;

    /// Overwrite the whole document.
    async fn save(&self, records: &Records<V>) -> Result<(), ServiceError>;

    /// Copy the current document aside before a mutation.
    async fn backup(&self) -> Result<(), ServiceError> {
        Ok(())
    }
}
