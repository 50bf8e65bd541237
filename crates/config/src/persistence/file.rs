//! Reading and writing the backing JSON file.
//!
//! Responsibilities:
//! - Read and parse the backing file into a JSON object.
//! - Write the full document atomically with owner-only permissions.
//!
//! Does NOT handle:
//! - Deciding when to read or write (see `DocumentStore`).
//! - Corrupt file backups (see `create_corrupt_backup`).
//!
//! Invariants:
//! - Writes are atomic (temp file + rename) and always contain the whole document.
//! - An empty or whitespace-only file parses as "no document".

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};

use crate::constants::TEMP_FILE_EXTENSION;
use crate::error::ConfigError;

/// Errors that can occur when reading the backing file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("Failed to read config file at {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Config file at {path} does not contain a JSON object")]
    NotAnObject { path: PathBuf },
}

impl ConfigFileError {
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            ConfigFileError::Read { source, .. } if source.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// True when the file exists but its contents cannot be used.
    pub fn is_corrupt(&self) -> bool {
        matches!(
            self,
            ConfigFileError::Parse { .. } | ConfigFileError::NotAnObject { .. }
        )
    }
}

/// Reads and parses the backing file.
///
/// Returns `Ok(None)` for a file with no content.
pub(crate) fn read_config_file(path: &Path) -> Result<Option<Map<String, Value>>, ConfigFileError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    if content.trim().is_empty() {
        return Ok(None);
    }

    let value: Value = serde_json::from_str(&content).map_err(|e| ConfigFileError::Parse {
        path: path.to_path_buf(),
        source: e,
    })?;

    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(ConfigFileError::NotAnObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Temporary sibling of `path`: the full file name with `.tmp` appended, so
/// `cfg.json` and `cfg.yaml` in one directory never share a temp file.
pub(crate) fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".");
    name.push(TEMP_FILE_EXTENSION);
    PathBuf::from(name)
}

/// Atomically writes the whole document to `path`.
///
/// Writes to a temporary file first, then renames it to the target path,
/// so the file is never left partially written. The temporary file is
/// removed if any step fails.
pub(crate) fn write_config_file(path: &Path, document: &Value) -> Result<(), ConfigError> {
    let persistence = |source: std::io::Error| ConfigError::Persistence {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(persistence)?;
    }

    let content = serde_json::to_string_pretty(document)?;
    let temp_path = temp_path_for(path);

    if let Err(e) = write_and_rename(&temp_path, path, content.as_bytes()) {
        if let Err(cleanup_err) = std::fs::remove_file(&temp_path)
            && cleanup_err.kind() != std::io::ErrorKind::NotFound
        {
            tracing::warn!(
                temp_path = %temp_path.display(),
                error = %cleanup_err,
                "Failed to remove temporary config file"
            );
        }
        return Err(persistence(e));
    }

    tracing::debug!(path = %path.display(), "Config saved atomically");

    Ok(())
}

fn write_and_rename(temp_path: &Path, path: &Path, content: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(crate::constants::CONFIG_FILE_MODE);
    }

    let mut file = options.open(temp_path)?;
    file.write_all(content)?;
    file.sync_all()?;
    drop(file);

    // The mode passed to open() only applies when the temp file is created.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(
            temp_path,
            std::fs::Permissions::from_mode(crate::constants::CONFIG_FILE_MODE),
        )?;
    }

    std::fs::rename(temp_path, path)
}
