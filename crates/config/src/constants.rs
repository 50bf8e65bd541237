//! Centralized constants for the scoped configuration store.
//!
//! This module contains names and defaults shared across modules to avoid
//! magic string duplication.

// =============================================================================
// Backing File
// =============================================================================

/// File name used when the store is placed in the platform config directory.
pub const DEFAULT_CONFIG_FILE_NAME: &str = "config.json";

/// Permission bits applied to the backing file on unix (owner read/write).
pub const CONFIG_FILE_MODE: u32 = 0o600;

/// Suffix appended to the file name for the temporary file written before the atomic rename.
pub const TEMP_FILE_EXTENSION: &str = "tmp";

// =============================================================================
// Environment Variables
// =============================================================================

/// Overrides the location chosen by `with_default_file_persistence`.
pub const CONFIG_PATH_ENV_VAR: &str = "SCOPED_CONFIG_PATH";

/// When set to `1` or `true`, `.env` files are never loaded.
pub const DOTENV_DISABLED_ENV_VAR: &str = "DOTENV_DISABLED";

// =============================================================================
// Paths & Display
// =============================================================================

/// Separator between scope and key segments in a document path.
pub const PATH_SEPARATOR: char = '.';

/// Escape character for reserved path characters.
pub const PATH_ESCAPE: char = '\\';

/// Characters the path syntax treats as pattern operators.
pub const PATH_WILDCARDS: [char; 2] = ['*', '?'];

/// Replacement shown instead of a sensitive value.
pub const MASKED_VALUE: &str = "********";
