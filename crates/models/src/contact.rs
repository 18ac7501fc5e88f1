use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::normalize::{person_name, required};

pub const MIN_PHONE_DIGITS: usize = 7;
pub const MAX_PHONE_DIGITS: usize = 15;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("email pattern compiles")
});

/// Phone numbers keep the caller's formatting; only the digit count is checked.
pub fn validate_phone(raw: &str) -> Result<String, ModelError> {
    let phone = required("phone", raw)?;
    let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits) {
        return Err(ModelError::invalid(
            "phone",
            format!("must contain {MIN_PHONE_DIGITS}-{MAX_PHONE_DIGITS} digits"),
        ));
    }
    Ok(phone)
}

pub fn validate_email(raw: &str) -> Result<String, ModelError> {
    let email = required("email", raw)?;
    if !EMAIL_RE.is_match(&email) {
        return Err(ModelError::invalid("email", "invalid email format"));
    }
    Ok(email.to_lowercase())
}

/// Collection key for a contact name: trimmed and title-cased.
pub fn contact_key(name: &str) -> Result<String, ModelError> {
    person_name("name", name)
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactInput {
    pub name: String,
    pub phone: String,
    pub email: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Contact {
    pub name: String,
    pub phone: String,
    pub email: String,
}

impl ContactInput {
    pub fn validate(self) -> Result<Contact, ModelError> {
        Ok(Contact {
            name: contact_key(&self.name)?,
            phone: validate_phone(&self.phone)?,
            email: validate_email(&self.email)?,
        })
    }
}

/// Partial update; absent fields are left untouched.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactPatch {
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

impl ContactPatch {
    pub fn validate(self) -> Result<ContactPatch, ModelError> {
        Ok(ContactPatch {
            phone: self.phone.as_deref().map(validate_phone).transpose()?,
            email: self.email.as_deref().map(validate_email).transpose()?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.phone.is_none() && self.email.is_none()
    }

    /// Apply an already validated patch.
    pub fn apply(self, contact: &mut Contact) {
        if let Some(phone) = self.phone {
            contact.phone = phone;
        }
        if let Some(email) = self.email {
            contact.email = email;
        }
    }
}
