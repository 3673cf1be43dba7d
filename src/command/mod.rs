// File: ./src/command/mod.rs
//! Commands: validated, single-shot operations against the [`ModelManager`].
//!
//! The parser turns command text into a [`Command`]; executing it either
//! returns a [`CommandResult`] or fails with a [`CommandError`] and leaves the
//! model untouched.
pub mod event;
pub mod internship;
pub mod parser;
pub mod result;

pub use event::{
    EditEventDescriptor, EventAddCommand, EventDeleteCommand, EventEditCommand, EventFindCommand,
};
pub use internship::{
    AddCommand, DeleteCommand, EditCommand, EditInternshipDescriptor, FindCommand, SelectCommand,
};
pub use parser::parse_command;
pub use result::{CommandResult, ResultType};

use crate::error::CommandError;
use crate::store::ModelManager;
use std::fmt;

/// A 1-based position in a displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Index(usize);

impl Index {
    pub fn from_one_based(n: usize) -> Option<Self> {
        (n > 0).then_some(Self(n))
    }

    pub fn zero_based(self) -> usize {
        self.0 - 1
    }
}

impl fmt::Display for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Add(AddCommand),
    Delete(DeleteCommand),
    Edit(EditCommand),
    Find(FindCommand),
    List,
    Select(SelectCommand),
    Clear,
    Help,
    Exit,
    EventAdd(EventAddCommand),
    EventDelete(EventDeleteCommand),
    EventEdit(EventEditCommand),
    EventFind(EventFindCommand),
}

impl Command {
    pub fn execute(&self, model: &mut ModelManager) -> Result<CommandResult, CommandError> {
        match self {
            Command::Add(c) => c.execute(model),
            Command::Delete(c) => c.execute(model),
            Command::Edit(c) => c.execute(model),
            Command::Find(c) => c.execute(model),
            Command::List => Ok(internship::list(model)),
            Command::Select(c) => c.execute(model),
            Command::Clear => Ok(internship::clear(model)),
            Command::Help => Ok(CommandResult::new(
                "Showing help.",
                ResultType::ShowHelp,
            )),
            Command::Exit => Ok(CommandResult::new(
                "Exiting as requested ...",
                ResultType::Exit,
            )),
            Command::EventAdd(c) => c.execute(model),
            Command::EventDelete(c) => c.execute(model),
            Command::EventEdit(c) => c.execute(model),
            Command::EventFind(c) => c.execute(model),
        }
    }

    /// Whether a successful run changes catalogue contents and must be saved.
    pub fn is_mutating(&self) -> bool {
        matches!(
            self,
            Command::Add(_)
                | Command::Delete(_)
                | Command::Edit(_)
                | Command::Clear
                | Command::EventAdd(_)
                | Command::EventDelete(_)
                | Command::EventEdit(_)
        )
    }
}

/// One usage block per command, in the order `help` lists them.
pub fn all_usages() -> [&'static str; 13] {
    [
        AddCommand::USAGE,
        DeleteCommand::USAGE,
        EditCommand::USAGE,
        FindCommand::USAGE,
        "list: Shows every internship.",
        SelectCommand::USAGE,
        "clear: Deletes every internship and event.",
        "help: Shows this help.",
        "exit: Saves and quits.",
        EventAddCommand::USAGE,
        EventDeleteCommand::USAGE,
        EventEditCommand::USAGE,
        EventFindCommand::USAGE,
    ]
}
