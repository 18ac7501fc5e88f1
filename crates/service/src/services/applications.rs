use std::collections::BTreeMap;

use models::application::{Application, ApplicationInput, Status};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::storage::Collection;

const ENTITY: &str = "application";

/// Per-status counts over the whole collection.
#[derive(Clone, Debug, Serialize, PartialEq, Eq)]
pub struct ApplicationStats {
    pub total: usize,
    pub by_status: BTreeMap<Status, usize>,
}

/// Job application tracker backed by `applications.json`.
pub struct ApplicationService {
    records: Collection<Application>,
}

impl ApplicationService {
    pub fn new(records: Collection<Application>) -> Self {
        Self { records }
    }

    pub async fn create(&self, input: ApplicationInput) -> Result<Application, ServiceError> {
        let app = input.validate()?;
        self.records
            .update_map(|map| {
                if map.contains_key(&app.id) {
                    warn!(id = %app.id, "application already exists");
                    return Err(ServiceError::conflict(ENTITY, &app.id));
                }
                map.insert(app.id.clone(), app.clone());
                Ok(())
            })
            .await?;
        info!(id = %app.id, status = %app.status, "application created");
        Ok(app)
    }

    pub async fn list(&self) -> Result<Vec<Application>, ServiceError> {
        Ok(self.records.read_all().await?.into_values().collect())
    }

    /// Filter by status; `None` returns everything.
    pub async fn search(&self, status: Option<Status>) -> Result<Vec<Application>, ServiceError> {
        let all = self.records.read_all().await?;
        Ok(all
            .into_values()
            .filter(|app| status.map_or(true, |s| app.status == s))
            .collect())
    }

    pub async fn get(&self, id: &str) -> Result<Application, ServiceError> {
        self.records
            .read_all()
            .await?
            .remove(id)
            .ok_or_else(|| ServiceError::not_found(ENTITY, id))
    }

    pub async fn update_status(&self, id: &str, status: Status) -> Result<Application, ServiceError> {
        let updated = self
            .records
            .update_map(|map| {
                let app = map.get_mut(id).ok_or_else(|| ServiceError::not_found(ENTITY, id))?;
                app.status = status;
                Ok(app.clone())
            })
            .await?;
        info!(id, status = %status, "application status updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: &str) -> Result<Application, ServiceError> {
        let removed = self
            .records
            .update_map(|map| map.remove(id).ok_or_else(|| ServiceError::not_found(ENTITY, id)))
            .await?;
        info!(id, "application deleted");
        Ok(removed)
    }

    pub async fn stats(&self) -> Result<ApplicationStats, ServiceError> {
        let all = self.records.read_all().await?;
        let mut by_status: BTreeMap<Status, usize> = Status::ALL.into_iter().map(|s| (s, 0)).collect();
        for app in all.values() {
            *by_status.entry(app.status).or_insert(0) += 1;
        }
        Ok(ApplicationStats { total: all.len(), by_status })
    }
}
