// File: ./src/model/field.rs
// Validation shared by the entity constructors.
use chrono::{NaiveDate, NaiveDateTime};
use thiserror::Error;

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("{0} must not be blank")]
    Blank(&'static str),
    #[error(
        "Event cannot end ({}) before it starts ({})",
        format_datetime(*.end),
        format_datetime(*.start)
    )]
    EndsBeforeStart {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

/// Trims `value` and rejects it if nothing is left.
pub fn require_text(label: &'static str, value: &str) -> Result<String, FieldError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(FieldError::Blank(label));
    }
    Ok(trimmed.to_string())
}

pub fn require_ordered(start: NaiveDateTime, end: NaiveDateTime) -> Result<(), FieldError> {
    if start > end {
        return Err(FieldError::EndsBeforeStart { start, end });
    }
    Ok(())
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}
