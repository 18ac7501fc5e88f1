use std::collections::BTreeMap;

use models::normalize::person_name;
use models::student::{Grade, ScoresPatch, Student, StudentInput, StudentView};
use serde::Serialize;
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::storage::Collection;

const ENTITY: &str = "student";

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StudentStats {
    pub count: usize,
    /// Mean of the per-student averages, rounded to two decimals.
    pub class_average: Option<f64>,
    pub grade_distribution: BTreeMap<Grade, usize>,
}

/// Student results backed by `students.json`. Average and grade are derived
/// on every read.
pub struct StudentsService {
    records: Collection<Student>,
}

impl StudentsService {
    pub fn new(records: Collection<Student>) -> Self {
        Self { records }
    }

    pub async fn create(&self, input: StudentInput) -> Result<StudentView, ServiceError> {
        let student = input.validate()?;
        self.records
            .update_map(|map| {
                if map.contains_key(&student.name) {
                    warn!(name = %student.name, "student already exists");
                    return Err(ServiceError::conflict(ENTITY, &student.name));
                }
                map.insert(student.name.clone(), student.clone());
                Ok(())
            })
            .await?;
        info!(name = %student.name, subjects = student.subject_scores.len(), "student created");
        Ok(student.into())
    }

    pub async fn list(&self) -> Result<Vec<StudentView>, ServiceError> {
        Ok(self.records.read_all().await?.into_values().map(StudentView::from).collect())
    }

    pub async fn get(&self, name: &str) -> Result<StudentView, ServiceError> {
        let key = person_name("name", name)?;
        self.records
            .read_all()
            .await?
            .remove(&key)
            .map(StudentView::from)
            .ok_or_else(|| ServiceError::not_found(ENTITY, &key))
    }

    /// Merge scores into an existing student.
    pub async fn update_scores(&self, name: &str, patch: ScoresPatch) -> Result<StudentView, ServiceError> {
        let key = person_name("name", name)?;
        let updated = self
            .records
            .update_map(|map| {
                let current = map.get_mut(&key).ok_or_else(|| ServiceError::not_found(ENTITY, &key))?;
                let merged = current.merge_scores(patch)?;
                *current = merged.clone();
                Ok(merged)
            })
            .await?;
        info!(name = %key, subjects = updated.subject_scores.len(), "student scores updated");
        Ok(updated.into())
    }

    pub async fn delete(&self, name: &str) -> Result<StudentView, ServiceError> {
        let key = person_name("name", name)?;
        let removed = self
            .records
            .update_map(|map| map.remove(&key).ok_or_else(|| ServiceError::not_found(ENTITY, &key)))
            .await?;
        info!(name = %key, "student deleted");
        Ok(removed.into())
    }

    pub async fn stats(&self) -> Result<StudentStats, ServiceError> {
        let all = self.records.read_all().await?;
        let mut grade_distribution: BTreeMap<Grade, usize> = BTreeMap::new();
        let mut sum = 0.0;
        for student in all.values() {
            let avg = student.average();
            sum += avg;
            *grade_distribution.entry(Grade::from_average(avg)).or_insert(0) += 1;
        }
        let class_average = if all.is_empty() {
            None
        } else {
            Some((sum / all.len() as f64 * 100.0).round() / 100.0)
        };
        Ok(StudentStats { count: all.len(), class_average, grade_distribution })
    }
}
