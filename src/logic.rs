// File: ./src/logic.rs
//! Entry point for command text: parse, execute, persist.
//!
//! Both catalogues are written back after every command that changes them. A
//! failed save is reported as a command error, but the in-memory change stays.
use crate::command::{CommandResult, parse_command};
use crate::config::UserPrefs;
use crate::context::AppContext;
use crate::error::{CommandError, LogicError};
use crate::model::Catalogue;
use crate::storage::{CatalogueStorage, LocalStorage};
use crate::store::ModelManager;
use anyhow::Result;

pub const MESSAGE_SAVE_FAILED: &str = "Could not save data to file";

pub struct Logic {
    model: ModelManager,
    storage: Box<dyn CatalogueStorage>,
}

impl std::fmt::Debug for Logic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Logic").field("model", &self.model).finish()
    }
}

impl Logic {
    pub fn new(model: ModelManager, storage: Box<dyn CatalogueStorage>) -> Self {
        Self { model, storage }
    }

    /// Startup: reads prefs and both catalogues through `ctx`.
    ///
    /// A missing data file starts that catalogue empty. An unreadable one is
    /// logged and also starts empty, and the storage then refuses to save over
    /// it until the file is fixed or moved away.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let prefs = UserPrefs::load_or_default(ctx);
        let storage = LocalStorage::from_prefs(&prefs, ctx)?;

        let internships = match storage.load_internships() {
            Ok(Some(c)) => c,
            Ok(None) => {
                log::info!(
                    "No internship data at {}, starting empty",
                    storage.internship_path().display()
                );
                Catalogue::new()
            }
            Err(e) => {
                log::warn!("{:#}. Starting with an empty internship catalogue.", e);
                Catalogue::new()
            }
        };
        let events = match storage.load_events() {
            Ok(Some(c)) => c,
            Ok(None) => {
                log::info!(
                    "No event data at {}, starting empty",
                    storage.event_path().display()
                );
                Catalogue::new()
            }
            Err(e) => {
                log::warn!("{:#}. Starting with an empty event catalogue.", e);
                Catalogue::new()
            }
        };

        let model = if storage.can_save_internships() {
            ModelManager::new(internships, events, prefs)
        } else {
            log::warn!(
                "Changes will not be saved until {} can be read",
                storage.internship_path().display()
            );
            ModelManager::restore(internships, events, prefs)
        };
        Ok(Self::new(model, Box::new(storage)))
    }

    pub fn execute(&mut self, command_text: &str) -> Result<CommandResult, LogicError> {
        log::info!("----------------[USER COMMAND][{}]", command_text);
        let command = parse_command(command_text).inspect_err(|e| {
            log::debug!("Parse error: {}", e);
        })?;
        let result = command.execute(&mut self.model)?;

        if command.is_mutating() {
            self.save().map_err(|e| {
                log::error!("{:#}", e);
                CommandError::new(format!("{}: {:#}", MESSAGE_SAVE_FAILED, e))
            })?;
        }
        log::debug!("Result [{}]: {}", result.kind, result.feedback);
        Ok(result)
    }

    fn save(&self) -> Result<()> {
        self.storage
            .save_internships(self.model.internship_catalogue())?;
        self.storage.save_events(self.model.event_catalogue())?;
        Ok(())
    }

    pub fn model(&self) -> &ModelManager {
        &self.model
    }

    pub fn user_prefs(&self) -> &UserPrefs {
        self.model.user_prefs()
    }

    pub fn set_user_prefs(&mut self, prefs: UserPrefs) {
        self.model.set_user_prefs(prefs);
    }

    /// Writes the prefs back to the config file.
    pub fn shutdown(&self, ctx: &dyn AppContext) -> Result<()> {
        self.model.user_prefs().save(ctx)?;
        log::info!("Saved preferences, shutting down");
        Ok(())
    }
}
