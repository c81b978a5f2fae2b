use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::language::Language;

/// Message sent from the site's standalone contact form.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub lang: Option<Language>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactField {
    Name,
    Email,
    Phone,
    Message,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContactFieldError {
    pub field: ContactField,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ContactReceipt {
    pub reference: String,
    pub received_at: DateTime<Utc>,
    pub message: String,
}
