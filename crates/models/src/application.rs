use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::normalize::{person_name, required};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Pending,
    Accepted,
    Rejected,
    Interview,
    Withdrawn,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Pending,
        Status::Accepted,
        Status::Rejected,
        Status::Interview,
        Status::Withdrawn,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::Accepted => "accepted",
            Status::Rejected => "rejected",
            Status::Interview => "interview",
            Status::Withdrawn => "withdrawn",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, used for the `status` query parameter.
impl FromStr for Status {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Status::ALL
            .into_iter()
            .find(|st| st.as_str() == wanted)
            .ok_or_else(|| ModelError::invalid("status", format!("unknown status '{}'", s.trim())))
    }
}

/// Request body for a new job application.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ApplicationInput {
    pub name: String,
    pub company: String,
    pub position: String,
    pub status: Status,
}

/// Stored job application. `id` is derived from the normalized fields.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Application {
    pub id: String,
    pub name: String,
    pub company: String,
    pub position: String,
    pub status: Status,
}

/// `name_company_position`, spaces turned into underscores, lower-cased.
pub fn derive_id(name: &str, company: &str, position: &str) -> String {
    format!("{name}_{company}_{position}").replace(' ', "_").to_lowercase()
}

impl ApplicationInput {
    pub fn validate(self) -> Result<Application, ModelError> {
        let name = person_name("name", &self.name)?;
        let company = required("company", &self.company)?;
        let position = required("position", &self.position)?;
        let id = derive_id(&name, &company, &position);
        Ok(Application { id, name, company, position, status: self.status })
    }
}

impl From<Application> for ApplicationInput {
    fn from(app: Application) -> Self {
        Self { name: app.name, company: app.company, position: app.position, status: app.status }
    }
}

/// Body of `PATCH /applications/{id}`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    pub status: Status,
}
