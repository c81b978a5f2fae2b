use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::language::Language;
use crate::models::selection::Selection;

/// The four wizard stages, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WizardStep {
    #[default]
    Destination = 1,
    Stay = 2,
    Contact = 3,
    Summary = 4,
}

impl WizardStep {
    pub fn number(&self) -> u8 {
        *self as u8
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(WizardStep::Destination),
            2 => Some(WizardStep::Stay),
            3 => Some(WizardStep::Contact),
            4 => Some(WizardStep::Summary),
            _ => None,
        }
    }

    /// The following step; `Summary` is the last and maps to itself.
    pub fn next(&self) -> Self {
        Self::from_number(self.number() + 1).unwrap_or(WizardStep::Summary)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number().saturating_sub(1))
    }
}

impl Serialize for WizardStep {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.number())
    }
}

impl<'de> Deserialize<'de> for WizardStep {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let n = u8::deserialize(deserializer)?;
        WizardStep::from_number(n)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid wizard step: {}", n)))
    }
}

/// Input control a validation message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Region,
    Attractions,
    StartDate,
    EndDate,
    PartySize,
    Hotel,
    FullName,
    Email,
    Phone,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FieldError {
    pub field: Field,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceSummary {
    pub attractions_total: u64,
    pub hotel_total: u64,
    pub nights: u32,
    pub grand_total: u64,
    pub currency: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WizardState {
    pub current_step: WizardStep,
    pub language: Language,
    pub selection: Selection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<PriceSummary>,
    pub errors: Vec<FieldError>,
}

impl WizardState {
    pub fn new(language: Language) -> Self {
        Self {
            current_step: WizardStep::Destination,
            language,
            selection: Selection::new(),
            summary: None,
            errors: Vec::new(),
        }
    }
}

/// A completed trip request, handed off once the visitor confirms the summary.
#[derive(Debug, Clone, Serialize)]
pub struct TripSubmission {
    pub reference: String,
    pub submitted_at: DateTime<Utc>,
    pub language: Language,
    pub selection: Selection,
    pub summary: PriceSummary,
}
