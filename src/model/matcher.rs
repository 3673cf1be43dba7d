// Filters used by the find commands and the selection-scoped event view.
//
// A filter is a set of optional fields. Each supplied field contributes one
// condition and all conditions must hold (implicit AND). Text fields match by
// case-insensitive substring containment.

use crate::model::event::Event;
use crate::model::filtered::Predicate;
use crate::model::internship::Internship;
use chrono::{Local, NaiveDate, NaiveDateTime};
use uuid::Uuid;

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InternshipFilter {
    pub company: Option<String>,
    pub role: Option<String>,
    pub status: Option<String>,
    pub applied: Option<NaiveDate>,
}

impl InternshipFilter {
    pub fn is_any_field_set(&self) -> bool {
        self.company.is_some()
            || self.role.is_some()
            || self.status.is_some()
            || self.applied.is_some()
    }

    pub fn matches(&self, internship: &Internship) -> bool {
        if let Some(company) = &self.company
            && !contains_ignore_case(internship.company(), company)
        {
            return false;
        }
        if let Some(role) = &self.role
            && !contains_ignore_case(internship.role(), role)
        {
            return false;
        }
        if let Some(status) = &self.status
            && !contains_ignore_case(&internship.status().to_string(), status)
        {
            return false;
        }
        if let Some(applied) = self.applied
            && internship.applied() != applied
        {
            return false;
        }
        true
    }

    pub fn into_predicate(self) -> Predicate<Internship> {
        Box::new(move |i: &Internship| self.matches(i))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    pub name: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl EventFilter {
    pub fn is_any_field_set(&self) -> bool {
        self.name.is_some() || self.start.is_some() || self.end.is_some()
    }

    /// Evaluates the filter with `now` standing in for the current time.
    ///
    /// Timing rules:
    /// - start and end: the event must lie entirely within `[start, end]`
    /// - start only: the event must start at or after `start`
    /// - end only: the event must lie within `[now, end]`. This is deliberately
    ///   not symmetric with the start-only case.
    pub fn matches_at(&self, event: &Event, now: NaiveDateTime) -> bool {
        if let Some(name) = &self.name
            && !contains_ignore_case(event.name(), name)
        {
            return false;
        }
        match (self.start, self.end) {
            (Some(start), Some(end)) => event.is_between(start, end),
            (Some(start), None) => event.starts_at_or_after(start),
            (None, Some(end)) => event.is_between(now, end),
            (None, None) => true,
        }
    }

    /// Freezes `now` into the predicate so the view stays stable between reads.
    pub fn into_predicate_at(self, now: NaiveDateTime) -> Predicate<Event> {
        Box::new(move |e: &Event| self.matches_at(e, now))
    }

    pub fn into_predicate(self) -> Predicate<Event> {
        self.into_predicate_at(Local::now().naive_local())
    }
}

/// Events attached to the given internship.
pub fn events_of(internship: Uuid) -> Predicate<Event> {
    Box::new(move |e: &Event| e.belongs_to(internship))
}
