//! New-user registration model.
//!
//! Registrations are append-only and carry no key; identical submissions are
//! stored as separate rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fixed column order of the registration table.
pub const REGISTRATION_COLUMNS: &[&str] = &[
    "FullName",
    "Class",
    "DateOfBirth",
    "Address",
    "PhoneNumber",
    "Email",
];

/// One row of the registration table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RegistrationRecord {
    pub full_name: String,
    pub class: String,
    #[serde(with = "crate::model::date_format")]
    pub date_of_birth: NaiveDate,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
}

impl RegistrationRecord {
    /// Creates a registration with only the required fields set.
    pub fn new(
        full_name: impl Into<String>,
        class: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            class: class.into(),
            date_of_birth,
            address: None,
            phone_number: None,
            email: None,
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = non_empty(address.into());
        self
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = non_empty(phone_number.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = non_empty(email.into());
        self
    }
}

// Empty optional text is stored as an empty field and reads back as `None`.
fn non_empty(value: String) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}
