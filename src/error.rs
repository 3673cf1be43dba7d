// File: ./src/error.rs
//! Error kinds surfaced by the command text interface.
//!
//! `ParseError` covers malformed command text and is raised before any
//! command runs. `CommandError` covers commands that are well formed but cannot
//! be applied to the current model state. Both carry the message shown to the
//! user verbatim.
use crate::model::{CatalogueError, FieldError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
    #[error("Invalid command format!\n{0}")]
    InvalidFormat(&'static str),
    #[error("Multiple values specified for the following single-valued field(s): {0}")]
    DuplicatePrefixes(String),
    #[error("{0}")]
    InvalidValue(String),
}

impl From<FieldError> for ParseError {
    fn from(e: FieldError) -> Self {
        ParseError::InvalidValue(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct CommandError {
    message: String,
}

impl CommandError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<CatalogueError> for CommandError {
    fn from(e: CatalogueError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<FieldError> for CommandError {
    fn from(e: FieldError) -> Self {
        Self::new(e.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LogicError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Command(#[from] CommandError),
}
