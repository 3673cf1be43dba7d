// Manages local file storage for the internship and event catalogues.
//
// Each catalogue lives in its own versioned JSON document. Writes go through an
// exclusive lock file and a tmp-then-rename swap, so a crash mid-write leaves
// the previous document intact.
//
// Changes to the serialized shape of Internship or Event require incrementing
// STORAGE_VERSION below.
//
// A catalogue whose document failed to load is never saved over. Events are
// also held back when the internship document failed, since every event points
// at an internship that may only exist in the unread file.
use crate::config::UserPrefs;
use crate::context::AppContext;
use crate::model::{Catalogue, Entry, Event, FieldError, Internship};
use anyhow::{Context, Result};
use fs2::FileExt;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

// Version history:
// - v1: initial format
pub const STORAGE_VERSION: u32 = 1;

#[derive(Serialize, Deserialize)]
struct InternshipDocument {
    #[serde(default)]
    version: u32,
    internships: Vec<Internship>,
}

#[derive(Serialize, Deserialize)]
struct EventDocument {
    #[serde(default)]
    version: u32,
    events: Vec<Event>,
}

/// Persistence seam used by the logic layer.
///
/// `load_*` returns `Ok(None)` when nothing has been stored yet; an error means
/// the stored document exists but could not be used.
pub trait CatalogueStorage {
    fn load_internships(&self) -> Result<Option<Catalogue<Internship>>>;
    fn load_events(&self) -> Result<Option<Catalogue<Event>>>;
    fn save_internships(&self, internships: &Catalogue<Internship>) -> Result<()>;
    fn save_events(&self, events: &Catalogue<Event>) -> Result<()>;
}

/// Outcome of the last load of one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadState {
    /// Never attempted to load
    Uninitialized,
    /// Last load succeeded, or there was nothing to load
    Success,
    /// Last load failed (unreadable, corrupt, newer format, ...)
    Failed,
}

#[derive(Debug, Clone)]
pub struct LocalStorage {
    internship_path: PathBuf,
    event_path: PathBuf,
    internship_state: Cell<LoadState>,
    event_state: Cell<LoadState>,
}

impl LocalStorage {
    pub fn new(internship_path: PathBuf, event_path: PathBuf) -> Self {
        Self {
            internship_path,
            event_path,
            internship_state: Cell::new(LoadState::Uninitialized),
            event_state: Cell::new(LoadState::Uninitialized),
        }
    }

    /// Storage at the locations named by the user prefs.
    pub fn from_prefs(prefs: &UserPrefs, ctx: &dyn AppContext) -> Result<Self> {
        Ok(Self::new(
            prefs.internship_file_path(ctx)?,
            prefs.event_file_path(ctx)?,
        ))
    }

    pub fn internship_path(&self) -> &Path {
        &self.internship_path
    }

    pub fn event_path(&self) -> &Path {
        &self.event_path
    }

    pub fn internship_load_state(&self) -> LoadState {
        self.internship_state.get()
    }

    pub fn event_load_state(&self) -> LoadState {
        self.event_state.get()
    }

    pub fn can_save_internships(&self) -> bool {
        self.internship_state.get() != LoadState::Failed
    }

    pub fn can_save_events(&self) -> bool {
        self.event_state.get() != LoadState::Failed
            && self.internship_state.get() != LoadState::Failed
    }

    fn refuse_save(path: &Path) -> anyhow::Error {
        anyhow::anyhow!(
            "Cannot save '{}': previous load failed. This prevents overwriting data that couldn't be read.",
            path.display()
        )
    }

    fn record<T>(state: &Cell<LoadState>, result: Result<T>) -> Result<T> {
        state.set(if result.is_ok() {
            LoadState::Success
        } else {
            LoadState::Failed
        });
        result
    }

    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    /// Runs `f` while holding an exclusive lock on `file_path`'s lock file.
    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        if let Some(parent) = file_path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    /// Atomic write: Write to .tmp file then rename
    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }

    fn read_document<D: DeserializeOwned>(path: &Path) -> Result<Option<D>> {
        if !path.exists() {
            return Ok(None);
        }
        Self::with_lock(path, || {
            let json = fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            let doc = serde_json::from_str::<D>(&json)
                .with_context(|| format!("Failed to parse '{}'", path.display()))?;
            Ok(Some(doc))
        })
    }

    fn write_document<D: Serialize>(path: &Path, doc: &D) -> Result<()> {
        Self::with_lock(path, || {
            let json = serde_json::to_string_pretty(doc)?;
            Self::atomic_write(path, json)?;
            Ok(())
        })
    }

    fn check_version(version: u32, path: &Path) -> Result<()> {
        if version > STORAGE_VERSION {
            return Err(anyhow::anyhow!(
                "'{}' was written by a newer version (format v{}, supported v{}). Please upgrade.",
                path.display(),
                version,
                STORAGE_VERSION
            ));
        }
        if version < STORAGE_VERSION {
            log::info!(
                "Upgrading '{}' from format v{} to v{} on next save",
                path.display(),
                version,
                STORAGE_VERSION
            );
        }
        Ok(())
    }

    fn build_catalogue<T, V>(items: Vec<T>, validate: V, path: &Path) -> Result<Catalogue<T>>
    where
        T: Entry,
        V: Fn(&T) -> std::result::Result<(), FieldError>,
    {
        for item in &items {
            validate(item).with_context(|| format!("Invalid entry in '{}'", path.display()))?;
        }
        Catalogue::from_items(items)
            .with_context(|| format!("Corrupt data in '{}'", path.display()))
    }

    /// Events reference internships by id, so two records sharing one would
    /// make deletes cascade into the wrong internship's events.
    fn check_unique_ids(internships: &[Internship], path: &Path) -> Result<()> {
        let mut seen = HashSet::new();
        for internship in internships {
            if !seen.insert(internship.id()) {
                return Err(anyhow::anyhow!(
                    "Corrupt data in '{}': id {} is used by more than one internship",
                    path.display(),
                    internship.id()
                ));
            }
        }
        Ok(())
    }

    fn read_internships(&self) -> Result<Option<Catalogue<Internship>>> {
        let path = &self.internship_path;
        let Some(doc) = Self::read_document::<InternshipDocument>(path)? else {
            return Ok(None);
        };
        Self::check_version(doc.version, path)?;
        Self::check_unique_ids(&doc.internships, path)?;
        let catalogue = Self::build_catalogue(doc.internships, Internship::validate, path)?;
        log::debug!("Loaded {} internships from {}", catalogue.len(), path.display());
        Ok(Some(catalogue))
    }

    fn read_events(&self) -> Result<Option<Catalogue<Event>>> {
        let path = &self.event_path;
        let Some(doc) = Self::read_document::<EventDocument>(path)? else {
            return Ok(None);
        };
        Self::check_version(doc.version, path)?;
        let catalogue = Self::build_catalogue(doc.events, Event::validate, path)?;
        log::debug!("Loaded {} events from {}", catalogue.len(), path.display());
        Ok(Some(catalogue))
    }
}

impl CatalogueStorage for LocalStorage {
    fn load_internships(&self) -> Result<Option<Catalogue<Internship>>> {
        Self::record(&self.internship_state, self.read_internships())
    }

    fn load_events(&self) -> Result<Option<Catalogue<Event>>> {
        Self::record(&self.event_state, self.read_events())
    }

    fn save_internships(&self, internships: &Catalogue<Internship>) -> Result<()> {
        if !self.can_save_internships() {
            return Err(Self::refuse_save(&self.internship_path));
        }
        let doc = InternshipDocument {
            version: STORAGE_VERSION,
            internships: internships.as_slice().to_vec(),
        };
        Self::write_document(&self.internship_path, &doc)
    }

    fn save_events(&self, events: &Catalogue<Event>) -> Result<()> {
        if !self.can_save_events() {
            return Err(Self::refuse_save(&self.event_path));
        }
        let doc = EventDocument {
            version: STORAGE_VERSION,
            events: events.as_slice().to_vec(),
        };
        Self::write_document(&self.event_path, &doc)
    }
}
