// File: ./src/config.rs
// User preferences: data file locations and window geometry.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

fn default_internship_file() -> PathBuf {
    PathBuf::from("internships.json")
}

fn default_event_file() -> PathBuf {
    PathBuf::from("events.json")
}

fn default_width() -> u32 {
    1280
}

fn default_height() -> u32 {
    720
}

/// Last known window geometry. Kept for front ends that draw a window; the
/// terminal front end only carries it through.
#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct WindowSettings {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
    #[serde(default)]
    pub x: Option<i32>,
    #[serde(default)]
    pub y: Option<i32>,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            x: None,
            y: None,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Debug, PartialEq, Eq)]
pub struct UserPrefs {
    #[serde(default = "default_internship_file")]
    pub internship_file: PathBuf,
    #[serde(default = "default_event_file")]
    pub event_file: PathBuf,
    #[serde(default)]
    pub window: WindowSettings,
}

impl Default for UserPrefs {
    fn default() -> Self {
        Self {
            internship_file: default_internship_file(),
            event_file: default_event_file(),
            window: WindowSettings::default(),
        }
    }
}

impl UserPrefs {
    /// Load the preferences from disk using an explicit context.
    /// Returns a contextualized error if reading or parsing fails.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;

        if !path.exists() {
            return Err(anyhow::anyhow!("Config file not found"));
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let prefs: UserPrefs = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(prefs)
    }

    /// Startup variant of [`UserPrefs::load`]: a missing file silently yields
    /// defaults, an unreadable one yields defaults and a warning.
    pub fn load_or_default(ctx: &dyn AppContext) -> Self {
        match Self::load(ctx) {
            Ok(prefs) => prefs,
            Err(e) if Self::is_missing_config_error(&e) => {
                log::info!("No config file yet, using default preferences");
                Self::default()
            }
            Err(e) => {
                log::warn!("{:#}. Using default preferences.", e);
                Self::default()
            }
        }
    }

    pub fn is_missing_config_error(err: &Error) -> bool {
        if err.to_string().contains("Config file not found") {
            return true;
        }
        err.chain().any(|cause| {
            cause
                .downcast_ref::<std::io::Error>()
                .is_some_and(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
        })
    }

    /// Save preferences using an explicit context.
    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }

    pub fn internship_file_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        ctx.resolve_data_file(&self.internship_file)
    }

    pub fn event_file_path(&self, ctx: &dyn AppContext) -> Result<PathBuf> {
        ctx.resolve_data_file(&self.event_file)
    }
}
