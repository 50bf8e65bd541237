//! Error types for the configuration store.
//!
//! Responsibilities:
//! - Define error variants for registration, resolution, validation and persistence.
//! - Provide conversions from lower-level errors (`std::io`, `serde_json`).
//!
//! Does NOT handle:
//! - Recovering from errors. Every variant is returned to the caller.
//!
//! Invariants:
//! - All error variants include context for debugging (keys, paths, valid keys).
//! - Error messages never include the value of a sensitive field.
//! - Dotenv errors NEVER include raw .env line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::ConfigKey;

/// Errors that can occur while building or using a [`crate::ConfigProvider`].
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A case-insensitive field definition collides with an existing one.
    #[error(
        "unable to add case-insensitive field definition for {key}, another field already defined with matching case-folded key"
    )]
    DuplicateKey { key: ConfigKey },

    #[error("no value found at path {path}")]
    KeyNotFound { path: String },

    #[error("value {found} for key {key} is not {expected}")]
    TypeMismatch {
        key: ConfigKey,
        expected: &'static str,
        found: String,
    },

    /// A field's validator rejected the candidate value.
    #[error("invalid value for {key}: {reason}")]
    Validation { key: ConfigKey, reason: String },

    #[error("key '{key}' is not valid, valid keys are: {}", join_keys(.valid_keys))]
    UnknownKey {
        key: ConfigKey,
        valid_keys: Vec<ConfigKey>,
    },

    #[error("invalid path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("Failed to persist config file at {path}: {source}")]
    Persistence {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize config document: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Writing a registered default failed while initializing the document.
    #[error("could not write default config setting for {key}: {source}")]
    DefaultsMaterialization {
        key: ConfigKey,
        #[source]
        source: Box<ConfigError>,
    },

    #[error("Unable to determine config directory: {0}")]
    ConfigDirUnavailable(String),

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

fn join_keys(keys: &[ConfigKey]) -> String {
    let names: Vec<&str> = keys.iter().map(ConfigKey::as_str).collect();
    format!("[{}]", names.join(" "))
}

impl ConfigError {
    /// Returns true when the error means "nothing stored here", which callers
    /// usually treat as an unset value rather than a failure.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::KeyNotFound { .. })
    }
}
