use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::normalize::{person_name, required};

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Grade {
    A,
    B,
    C,
    D,
    F,
}

impl Grade {
    pub fn from_average(avg: f64) -> Self {
        if avg >= 90.0 {
            Grade::A
        } else if avg >= 80.0 {
            Grade::B
        } else if avg >= 70.0 {
            Grade::C
        } else if avg >= 60.0 {
            Grade::D
        } else {
            Grade::F
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StudentInput {
    pub name: String,
    #[serde(alias = "subject_score")]
    pub subject_scores: BTreeMap<String, f64>,
}

/// Stored student. Average and grade are never persisted.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Student {
    pub name: String,
    pub subject_scores: BTreeMap<String, f64>,
}

fn validate_scores(scores: BTreeMap<String, f64>) -> Result<BTreeMap<String, f64>, ModelError> {
    if scores.is_empty() {
        return Err(ModelError::invalid("subject_scores", "at least one subject score is required"));
    }
    let mut out = BTreeMap::new();
    for (subject, score) in scores {
        let subject = required("subject_scores", &subject)?;
        if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
            return Err(ModelError::invalid(
                format!("subject_scores.{subject}"),
                "score must be between 0 and 100",
            ));
        }
        out.insert(subject, score);
    }
    Ok(out)
}

impl StudentInput {
    pub fn validate(self) -> Result<Student, ModelError> {
        Ok(Student {
            name: person_name("name", &self.name)?,
            subject_scores: validate_scores(self.subject_scores)?,
        })
    }
}

impl Student {
    /// Mean score rounded to two decimals.
    pub fn average(&self) -> f64 {
        if self.subject_scores.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.subject_scores.values().sum();
        let mean = sum / self.subject_scores.len() as f64;
        (mean * 100.0).round() / 100.0
    }

    pub fn grade(&self) -> Grade {
        Grade::from_average(self.average())
    }

    /// Merge new scores over the existing ones, re-running validation on the result.
    pub fn merge_scores(&self, patch: ScoresPatch) -> Result<Student, ModelError> {
        if patch.subject_scores.is_empty() {
            return Err(ModelError::invalid("subject_scores", "at least one subject score is required"));
        }
        let mut scores = self.subject_scores.clone();
        scores.extend(validate_scores(patch.subject_scores)?);
        StudentInput { name: self.name.clone(), subject_scores: scores }.validate()
    }
}

/// Body of `PATCH /students/{name}`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ScoresPatch {
    #[serde(alias = "subject_score")]
    pub subject_scores: BTreeMap<String, f64>,
}

/// Student as returned to clients, with derived fields filled in.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct StudentView {
    pub name: String,
    pub subject_scores: BTreeMap<String, f64>,
    pub average: f64,
    pub grade: Grade,
}

impl From<Student> for StudentView {
    fn from(student: Student) -> Self {
        let average = student.average();
        Self {
            grade: Grade::from_average(average),
            average,
            name: student.name,
            subject_scores: student.subject_scores,
        }
    }
}
