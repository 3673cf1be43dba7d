// Commands acting on the internship catalogue.
use crate::command::Index;
use crate::command::result::{CommandResult, ResultType};
use crate::error::CommandError;
use crate::model::{FieldError, Internship, InternshipFilter, InternshipStatus};
use crate::store::ModelManager;
use chrono::NaiveDate;

pub const MESSAGE_NOT_FILTERED: &str = "At least one field to filter must be provided.";

pub(crate) fn invalid_index(kind: &str, index: Index, shown: usize) -> CommandError {
    CommandError::new(format!(
        "Invalid index: there is no {} at position {} (the displayed list has {})",
        kind, index, shown
    ))
}

fn resolve(model: &ModelManager, index: Index) -> Result<Internship, CommandError> {
    model
        .filtered_internship(index.zero_based())
        .cloned()
        .ok_or_else(|| invalid_index("internship", index, model.filtered_internships().len()))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddCommand {
    pub internship: Internship,
}

impl AddCommand {
    pub const USAGE: &'static str = "add: Adds an internship to the catalogue.\n\
        Parameters: na/COMPANY ro/ROLE st/STATUS da/DATE [no/NOTES]\n\
        Example: add na/Acme ro/Software Engineer st/applied da/2024-01-05 no/Referred by Sam";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        model.add_internship(self.internship.clone())?;
        Ok(CommandResult::internship_list(
            format!("New internship added: {}", self.internship),
            model,
        ))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteCommand {
    pub index: Index,
}

impl DeleteCommand {
    pub const USAGE: &'static str = "delete: Deletes the internship at the given index of the displayed list, with its events.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: delete 1";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        let target = resolve(model, self.index)?;
        model.delete_internship(&target)?;
        Ok(CommandResult::internship_list(
            format!("Deleted internship: {}", target),
            model,
        ))
    }
}

/// Fields to overwrite on an existing internship; unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditInternshipDescriptor {
    pub company: Option<String>,
    pub role: Option<String>,
    pub status: Option<InternshipStatus>,
    pub applied: Option<NaiveDate>,
    pub notes: Option<String>,
}

impl EditInternshipDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.company.is_some()
            || self.role.is_some()
            || self.status.is_some()
            || self.applied.is_some()
            || self.notes.is_some()
    }

    /// Builds the edited internship. The result keeps `original`'s id.
    pub fn apply(&self, original: &Internship) -> Result<Internship, FieldError> {
        let edited = Internship::new(
            self.company.as_deref().unwrap_or(original.company()),
            self.role.as_deref().unwrap_or(original.role()),
            self.status.unwrap_or(original.status()),
            self.applied.unwrap_or(original.applied()),
            self.notes.as_deref().unwrap_or(original.notes()),
        )?;
        Ok(edited.with_id(original.id()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditCommand {
    pub index: Index,
    pub descriptor: EditInternshipDescriptor,
}

impl EditCommand {
    pub const USAGE: &'static str = "edit: Edits the internship at the given index of the displayed list.\n\
        Parameters: INDEX [na/COMPANY] [ro/ROLE] [st/STATUS] [da/DATE] [no/NOTES]\n\
        Example: edit 1 st/interviewing";

    pub const MESSAGE_NOT_EDITED: &'static str = "At least one field to edit must be provided.";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        if !self.descriptor.is_any_field_edited() {
            return Err(CommandError::new(Self::MESSAGE_NOT_EDITED));
        }
        let target = resolve(model, self.index)?;
        let edited = self.descriptor.apply(&target)?;
        model.set_internship(&target, edited.clone())?;
        model.show_all_internships();
        Ok(CommandResult::internship_list(
            format!("Edited internship: {}", edited),
            model,
        ))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FindCommand {
    pub filter: InternshipFilter,
}

impl FindCommand {
    pub const USAGE: &'static str = "find: Finds internships matching every field given.\n\
        Text fields match any part of the value, ignoring case.\n\
        Parameters: [na/COMPANY] [ro/ROLE] [st/STATUS] [da/DATE]\n\
        Example: find na/Acme st/applied";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        if !self.filter.is_any_field_set() {
            return Err(CommandError::new(MESSAGE_NOT_FILTERED));
        }
        model.update_filtered_internship_list(self.filter.clone().into_predicate());
        let shown = model.filtered_internship_list();
        let feedback = format!("Found internships: {}", shown.len());
        Ok(CommandResult::new(feedback, ResultType::ShowInternships).with_internships(shown))
    }
}

pub fn list(model: &mut ModelManager) -> CommandResult {
    model.show_all_internships();
    CommandResult::internship_list("Listed all internships", model)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectCommand {
    pub index: Index,
}

impl SelectCommand {
    pub const USAGE: &'static str = "select: Selects the internship at the given index and shows its events.\n\
        Event commands act on the selected internship.\n\
        Parameters: INDEX (must be a positive integer)\n\
        Example: select 2";

    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        let target = resolve(model, self.index)?;
        model.update_selected_internship(Some(&target));
        Ok(CommandResult::internship_info(
            format!("Selected internship: {}", target),
            model,
            target.id(),
        ))
    }
}

pub fn clear(model: &mut ModelManager) -> CommandResult {
    model.clear();
    CommandResult::internship_list("Internship catalogue has been cleared!", model)
}
