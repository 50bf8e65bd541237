//! Environment variable handling.
//!
//! Responsibilities:
//! - Resolve per-field environment overrides.
//! - Read ambient settings (`SCOPED_CONFIG_PATH`, `DOTENV_DISABLED`) with
//!   empty/whitespace filtering.
//! - Load `.env` files into the process environment on request.
//!
//! Invariants:
//! - A field override applies whenever its variable is set, even to an empty string.
//! - Ambient settings treat empty or whitespace-only values as unset.
//! - Dotenv errors never include raw .env line contents.

use std::env::VarError;

use crate::constants::DOTENV_DISABLED_ENV_VAR;
use crate::error::ConfigError;
use crate::types::FieldDefinition;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value (leading/trailing whitespace removed) if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// The override value for `field`, if its environment variable is set.
pub(crate) fn env_override(field: &FieldDefinition) -> Option<String> {
    let name = field.env_var_name()?;
    match std::env::var(name) {
        Ok(value) => Some(value),
        Err(VarError::NotPresent) => None,
        Err(VarError::NotUnicode(_)) => {
            tracing::warn!(
                env_var = name,
                key = %field.key(),
                "Ignoring environment override that is not valid unicode"
            );
            None
        }
    }
}

fn dotenv_disabled() -> bool {
    matches!(
        std::env::var(DOTENV_DISABLED_ENV_VAR).ok().as_deref(),
        Some("true") | Some("1")
    )
}

fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}

/// Load a `.env` file from the current directory (or its parents).
///
/// Missing files are ignored. Does nothing when `DOTENV_DISABLED` is `1` or `true`.
pub(crate) fn load_dotenv() -> Result<(), ConfigError> {
    if dotenv_disabled() {
        return Ok(());
    }

    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "Loaded .env file");
            Ok(())
        }
        Err(e) if is_not_found(&e) => Ok(()),
        Err(dotenvy::Error::LineParse(_, idx)) => Err(ConfigError::DotenvParse { error_index: idx }),
        Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
            kind: io_err.kind(),
        }),
        Err(_) => Err(ConfigError::DotenvUnknown),
    }
}
