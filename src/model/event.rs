// File: ./src/model/event.rs
use crate::model::catalogue::Entry;
use crate::model::field::{FieldError, format_datetime, require_ordered, require_text};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// An interview, deadline or any other dated item attached to one internship.
///
/// The internship is referenced by id only; the event never owns a copy of it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Event {
    name: String,
    start: NaiveDateTime,
    end: NaiveDateTime,
    internship: Uuid,
}

impl Event {
    pub fn new(
        name: &str,
        start: NaiveDateTime,
        end: NaiveDateTime,
        internship: Uuid,
    ) -> Result<Self, FieldError> {
        require_ordered(start, end)?;
        Ok(Self {
            name: require_text("Event name", name)?,
            start,
            end,
            internship,
        })
    }

    pub fn validate(&self) -> Result<(), FieldError> {
        require_text("Event name", &self.name)?;
        require_ordered(self.start, self.end)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }

    pub fn internship(&self) -> Uuid {
        self.internship
    }

    pub fn belongs_to(&self, internship: Uuid) -> bool {
        self.internship == internship
    }

    /// True when the whole event lies within `[lower, upper]`.
    pub fn is_between(&self, lower: NaiveDateTime, upper: NaiveDateTime) -> bool {
        self.start >= lower && self.end <= upper
    }

    pub fn starts_at_or_after(&self, lower: NaiveDateTime) -> bool {
        self.start >= lower
    }
}

impl Entry for Event {
    const KIND: &'static str = "event";

    fn is_duplicate(&self, other: &Self) -> bool {
        self.internship == other.internship
            && self.start == other.start
            && self.end == other.end
            && self.name.to_lowercase() == other.name.to_lowercase()
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}; From: {}; To: {}",
            self.name,
            format_datetime(self.start),
            format_datetime(self.end)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_end_before_start_rejected() {
        let err = Event::new(
            "Interview",
            at("2024-03-02 10:00"),
            at("2024-03-01 10:00"),
            Uuid::new_v4(),
        )
        .unwrap_err();
        assert!(matches!(err, FieldError::EndsBeforeStart { .. }));
        assert_eq!(
            err.to_string(),
            "Event cannot end (2024-03-01 10:00) before it starts (2024-03-02 10:00)"
        );
    }

    #[test]
    fn test_zero_length_event_allowed() {
        let e = Event::new(
            "Deadline",
            at("2024-03-01 23:59"),
            at("2024-03-01 23:59"),
            Uuid::new_v4(),
        );
        assert!(e.is_ok());
    }

    #[test]
    fn test_duplicate_is_scoped_to_internship() {
        let owner = Uuid::new_v4();
        let a = Event::new("Interview", at("2024-03-01 10:00"), at("2024-03-01 11:00"), owner)
            .unwrap();
        let b = Event::new("INTERVIEW", at("2024-03-01 10:00"), at("2024-03-01 11:00"), owner)
            .unwrap();
        let c = Event::new(
            "Interview",
            at("2024-03-01 10:00"),
            at("2024-03-01 11:00"),
            Uuid::new_v4(),
        )
        .unwrap();
        assert!(a.is_duplicate(&b));
        assert!(!a.is_duplicate(&c));
    }

    #[test]
    fn test_is_between_is_inclusive() {
        let e = Event::new(
            "Interview",
            at("2024-03-01 10:00"),
            at("2024-03-01 11:00"),
            Uuid::new_v4(),
        )
        .unwrap();
        assert!(e.is_between(at("2024-03-01 10:00"), at("2024-03-01 11:00")));
        assert!(!e.is_between(at("2024-03-01 10:30"), at("2024-03-02 00:00")));
        assert!(!e.is_between(at("2024-02-01 00:00"), at("2024-03-01 10:59")));
    }
}
