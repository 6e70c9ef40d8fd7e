use crate::error::ValidationError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A stored contact message, one row of the `contact` table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, FromRow)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub mobile: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// Validated input for creating a contact message.
///
/// The constructor is the only way to build one, so holding a value is proof
/// the required-field checks passed: `name`, `email`, and `mobile` present
/// and non-blank, `message` present (an empty message is accepted). Values
/// are stored untrimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContactMessage {
    name: String,
    email: String,
    mobile: String,
    message: String,
}

impl NewContactMessage {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        mobile: Option<String>,
        message: Option<String>,
    ) -> Result<Self, ValidationError> {
        let name = required_non_blank("name", name)?;
        let email = required_non_blank("email", email)?;
        let mobile = required_non_blank("mobile", mobile)?;
        let message = message.ok_or(ValidationError::MissingField { field: "message" })?;
        Ok(Self {
            name,
            email,
            mobile,
            message,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn mobile(&self) -> &str {
        &self.mobile
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

fn required_non_blank(
    field: &'static str,
    value: Option<String>,
) -> Result<String, ValidationError> {
    let value = value.ok_or(ValidationError::MissingField { field })?;
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { field });
    }
    Ok(value)
}
