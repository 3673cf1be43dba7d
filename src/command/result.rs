use crate::model::{Event, Internship};
use crate::store::ModelManager;
use uuid::Uuid;

/// Tells the display which view a result is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum ResultType {
    /// The internship list.
    ShowInternships,
    /// One internship with its events.
    ShowInfo,
    /// Event search results across all internships.
    FindEvents,
    ShowHelp,
    Exit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub kind: ResultType,
    pub selected: Option<Internship>,
    pub internships: Option<Vec<Internship>>,
    pub events: Option<Vec<Event>>,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>, kind: ResultType) -> Self {
        Self {
            feedback: feedback.into(),
            kind,
            selected: None,
            internships: None,
            events: None,
        }
    }

    pub fn with_selected(mut self, internship: Option<Internship>) -> Self {
        self.selected = internship;
        self
    }

    pub fn with_internships(mut self, internships: Vec<Internship>) -> Self {
        self.internships = Some(internships);
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.events = Some(events);
        self
    }

    /// Result showing the current internship view.
    pub(crate) fn internship_list(feedback: impl Into<String>, model: &ModelManager) -> Self {
        Self::new(feedback, ResultType::ShowInternships)
            .with_internships(model.filtered_internship_list())
    }

    /// Scopes the event view to `internship` and returns a result showing that
    /// internship with its events.
    pub(crate) fn internship_info(
        feedback: impl Into<String>,
        model: &mut ModelManager,
        internship: Uuid,
    ) -> Self {
        model.scope_events_to(internship);
        Self::new(feedback, ResultType::ShowInfo)
            .with_selected(model.find_internship(internship).cloned())
            .with_events(model.filtered_event_list())
    }

    pub fn is_exit(&self) -> bool {
        self.kind == ResultType::Exit
    }
}
