// File: ./src/model/internship.rs
use crate::model::catalogue::Entry;
use crate::model::field::{FieldError, format_date, require_text};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(
    Debug,
    Clone,
    Copy,
    Eq,
    PartialEq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum InternshipStatus {
    #[default]
    Interested,
    Applied,
    Interviewing,
    Offered,
    Accepted,
    Rejected,
}

impl InternshipStatus {
    /// Comma separated list of every status name, for error messages.
    pub fn all_names() -> String {
        use strum::IntoEnumIterator;
        Self::iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// An internship application.
///
/// `id` is assigned once at creation and survives edits, so events can keep
/// pointing at the same internship after its fields change. It takes no part in
/// duplicate detection.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Internship {
    #[serde(default = "Uuid::new_v4")]
    id: Uuid,
    company: String,
    role: String,
    status: InternshipStatus,
    applied: NaiveDate,
    #[serde(default)]
    notes: String,
}

impl Internship {
    pub fn new(
        company: &str,
        role: &str,
        status: InternshipStatus,
        applied: NaiveDate,
        notes: &str,
    ) -> Result<Self, FieldError> {
        Ok(Self {
            id: Uuid::new_v4(),
            company: require_text("Company", company)?,
            role: require_text("Role", role)?,
            status,
            applied,
            notes: notes.trim().to_string(),
        })
    }

    /// Re-checks the invariants `new` enforces. Used on deserialized data.
    pub fn validate(&self) -> Result<(), FieldError> {
        require_text("Company", &self.company)?;
        require_text("Role", &self.role)?;
        Ok(())
    }

    /// Returns a copy that carries `id` instead of a freshly generated one.
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = id;
        self
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn role(&self) -> &str {
        &self.role
    }

    pub fn status(&self) -> InternshipStatus {
        self.status
    }

    pub fn applied(&self) -> NaiveDate {
        self.applied
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }
}

impl Entry for Internship {
    const KIND: &'static str = "internship";

    fn is_duplicate(&self, other: &Self) -> bool {
        self.company.to_lowercase() == other.company.to_lowercase()
            && self.role.to_lowercase() == other.role.to_lowercase()
            && self.status == other.status
            && self.applied == other.applied
    }
}

impl fmt::Display for Internship {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}); Status: {}; Applied: {}",
            self.company,
            self.role,
            self.status,
            format_date(self.applied)
        )?;
        if !self.notes.is_empty() {
            write!(f, "; Notes: {}", self.notes)?;
        }
        Ok(())
    }
}
