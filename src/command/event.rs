// Commands acting on the event catalogue. Adding needs a selected internship;
// the other commands work on the event view as currently displayed.
use crate::command::Index;
use crate::command::internship::{MESSAGE_NOT_FILTERED, invalid_index};
use crate::command::result::{CommandResult, ResultType};
use crate::error::CommandError;
use crate::model::{Event, EventFilter, FieldError, Internship};
use crate::store::ModelManager;
use chrono::{Local, NaiveDateTime};
use uuid::Uuid;

pub const MESSAGE_NO_SELECTION: &str =
    "No internship is selected. Use `select INDEX` to pick one first.";

fn resolve(model: &ModelManager, index: Index) -> Result<Event, CommandError> {
    model
        .filtered_event(index.zero_based())
        .cloned()
        .ok_or_else(|| invalid_index("event", index, model.filtered_events().len()))
}

/// The internship whose events should be shown after touching `event`: the
/// selection while it still exists, otherwise the event's own internship.
fn display_scope(model: &ModelManager, event: &Event) -> Uuid {
    model
        .selected_internship()
        .map(Internship::id)
        .unwrap_or_else(|| event.internship())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventAddCommand {
    pub name: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl EventAddCommand {
    pub const USAGE: &'static str = "event add: Adds an event to the selected internship.\n\
        Parameters: na/NAME st/START en/END (times as YYYY-MM-DD HH:MM)\n\
        Example: event add na/Technical interview st/2024-03-01 10:00 en/2024-03-01 11:00";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        let owner = model
            .selected_internship()
            .map(|i| i.id())
            .ok_or_else(|| CommandError::new(MESSAGE_NO_SELECTION))?;
        let event = Event::new(&self.name, self.start, self.end, owner)?;
        model.add_event(event.clone())?;
        Ok(CommandResult::internship_info(
            format!("New event added: {}", event),
            model,
            owner,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventDeleteCommand {
    pub index: Index,
}

impl EventDeleteCommand {
    pub const USAGE: &'static str = "event delete: Deletes the event at the given index of the displayed event list.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: event delete 1";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        let target = resolve(model, self.index)?;
        model.delete_event(&target)?;
        let scope = display_scope(model, &target);
        Ok(CommandResult::internship_info(
            format!("Deleted event: {}", target),
            model,
            scope,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditEventDescriptor {
    pub name: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl EditEventDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some() || self.start.is_some() || self.end.is_some()
    }

    pub fn apply(&self, original: &Event) -> Result<Event, FieldError> {
        Event::new(
            self.name.as_deref().unwrap_or(original.name()),
            self.start.unwrap_or(original.start()),
            self.end.unwrap_or(original.end()),
            original.internship(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventEditCommand {
    pub index: Index,
    pub descriptor: EditEventDescriptor,
}

impl EventEditCommand {
    pub const USAGE: &'static str = "event edit: Edits the event at the given index of the displayed event list.\n\
        Parameters: INDEX [na/NAME] [st/START] [en/END]\n\
        Example: event edit 1 st/2024-03-01 14:00 en/2024-03-01 15:00";

    pub const MESSAGE_NOT_EDITED: &'static str = "At least one field to edit must be provided.";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::new(Self::MESSAGE_NOT_EDITED));
        }
        let target = resolve(model, self.index)?;
        let edited = self.descriptor.apply(&target)?;
        model.set_event(&target, edited.clone())?;
        let scope = display_scope(model, &edited);
        Ok(CommandResult::internship_info(
            format!("Edited event: {}", edited),
            model,
            scope,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventFindCommand {
    pub filter: EventFilter,
}

impl EventFindCommand {
    pub const USAGE: &'static str = "event find: Finds events across all internships matching every field given.\n\
        With only en/, events between now and END are shown.\n\
        Parameters: [na/NAME] [st/START] [en/END]\n\
        Example: event find na/interview en/2024-06-30 23:59";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        self.execute_at(model, Local::now().naive_local())
    }

    /// Same as `execute` with `now` as the current time.
    pub fn execute_at(
        &self,
        model: &mut ModelManager,
        now: NaiveDateTime,
    ) -> Result<CommandResult, CommandError> {
        if !self.filter.is_any_field_set() {
            return Err(CommandError::new(MESSAGE_NOT_FILTERED));
        }
        model.update_filtered_event_list(self.filter.clone().into_predicate_at(now));
        let shown = model.filtered_event_list();
        Ok(
            CommandResult::new(format!("Found events: {}", shown.len()), ResultType::FindEvents)
                .with_events(shown),
        )
    }
}
