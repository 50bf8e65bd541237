//! Document storage and file persistence.
//!
//! Responsibilities:
//! - Hold the in-memory JSON document (`DocumentStore`).
//! - Load the document from the backing file, tolerating missing files.
//! - Persist the whole document on every mutation.
//! - Back up corrupt files before they are replaced.
//!
//! Does NOT handle:
//! - Default materialization or validation (see `provider`).
//! - Locking. The provider owns the store behind its mutex.
//!
//! Invariants:
//! - Once loaded, the in-memory document is the source of truth until it is
//!   marked dirty and reloaded.
//! - A read failure never replaces the current document.
//! - Corrupt config files are backed up before being overwritten.

use std::path::{Path, PathBuf};

use serde_json::Value;

mod document;
mod file;
mod path;

pub use file::ConfigFileError;

pub(crate) use document::{Document, parse_path};
pub(crate) use file::{read_config_file, write_config_file};
pub(crate) use path::default_config_path;

use crate::error::ConfigError;

/// In-memory document plus its optional backing file.
#[derive(Debug)]
pub(crate) struct DocumentStore {
    document: Option<Document>,
    file: Option<PathBuf>,
    dirty: bool,
}

impl DocumentStore {
    pub(crate) fn new(file: Option<PathBuf>) -> Self {
        Self {
            document: None,
            file,
            dirty: false,
        }
    }

    pub(crate) fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// True when nothing has been loaded or written yet.
    pub(crate) fn is_empty(&self) -> bool {
        self.document.is_none()
    }

    pub(crate) fn needs_load(&self) -> bool {
        self.is_empty() || self.dirty
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mark_clean(&mut self) {
        self.dirty = false;
    }

    /// Replace the document with the backing file's contents, if readable.
    ///
    /// Missing, unreadable and corrupt files leave the current document in
    /// place. Corrupt files are renamed aside first.
    pub(crate) fn load_from_file(&mut self) {
        let Some(path) = self.file.as_deref() else {
            return;
        };

        match read_config_file(path) {
            Ok(Some(map)) => {
                tracing::debug!(path = %path.display(), "Loaded config file");
                self.document = Some(Document::from_map(map));
            }
            Ok(None) => {
                tracing::debug!(path = %path.display(), "Config file is empty");
                self.document = None;
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(path = %path.display(), "Config file not found");
            }
            Err(e) if e.is_corrupt() => match create_corrupt_backup(path) {
                Ok(backup_path) => {
                    tracing::warn!(
                        path = %path.display(),
                        backup_path = %backup_path.display(),
                        error = %e,
                        "Config file is corrupt, backed up and ignored"
                    );
                }
                Err(backup_err) => {
                    tracing::error!(
                        path = %path.display(),
                        error = %e,
                        backup_error = %backup_err,
                        "Config file is corrupt and backup failed, ignoring it"
                    );
                }
            },
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "Failed to read config file, keeping current document"
                );
            }
        }
    }

    /// Look up the value at a dotted path.
    ///
    /// A path that cannot address anything (such as an empty key) holds no
    /// value, so it reports `KeyNotFound` like any other missing path.
    pub(crate) fn get(&self, path: &str) -> Result<&Value, ConfigError> {
        let not_found = || ConfigError::KeyNotFound {
            path: path.to_string(),
        };

        let segments = parse_path(path).map_err(|_| not_found())?;
        self.document
            .as_ref()
            .and_then(|doc| doc.get(&segments))
            .ok_or_else(not_found)
    }

    pub(crate) fn top_level_keys(&self) -> Vec<String> {
        self.document
            .as_ref()
            .map(Document::top_level_keys)
            .unwrap_or_default()
    }

    pub(crate) fn to_value(&self) -> Value {
        self.document
            .as_ref()
            .map_or_else(|| Value::Object(Default::default()), Document::to_value)
    }

    /// Apply `update` to the document, mark it dirty and persist it.
    ///
    /// The in-memory document is updated even if persisting fails.
    pub(crate) fn write_with(&mut self, update: impl FnOnce(&mut Document)) -> Result<(), ConfigError> {
        let document = self.document.get_or_insert_with(Document::default);
        update(document);
        self.dirty = true;

        if let Some(path) = self.file.as_deref() {
            write_config_file(path, &document.to_value())?;
        }

        Ok(())
    }
}

/// Creates a backup of a corrupt config file before it is overwritten.
///
/// The backup is created by renaming the original file to a path with a
/// `.corrupt.{timestamp}` extension. This preserves the original file contents
/// for potential recovery while preventing the corrupt file from blocking
/// the store.
pub(crate) fn create_corrupt_backup(path: &Path) -> Result<PathBuf, std::io::Error> {
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let backup_path = path.with_extension(format!("corrupt.{}", timestamp));

    std::fs::rename(path, &backup_path)?;

    Ok(backup_path)
}
