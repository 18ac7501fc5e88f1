use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error(transparent)]
    Model(#[from] models::errors::ModelError),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("corrupted store {resource}: {reason}")]
    CorruptedStore { resource: String, reason: String },
    #[error("i/o failure on {resource}: {source}")]
    Io {
        resource: String,
        #[source]
        source: io::Error,
    },
}

impl ServiceError {
    pub fn not_found(entity: &str, key: &str) -> Self {
        Self::NotFound(format!("{entity} '{key}' not found"))
    }

    pub fn conflict(entity: &str, key: &str) -> Self {
        Self::Conflict(format!("{entity} '{key}' already exists"))
    }

    pub fn io(resource: impl Into<String>, source: io::Error) -> Self {
        Self::Io { resource: resource.into(), source }
    }

    pub fn corrupted(resource: impl Into<String>, reason: impl ToString) -> Self {
        Self::CorruptedStore { resource: resource.into(), reason: reason.to_string() }
    }

    pub fn is_permission_denied(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == io::ErrorKind::PermissionDenied)
    }
}
