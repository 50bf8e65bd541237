//! Path helpers for the backing file location.
//!
//! Responsibilities:
//! - Determine the platform-standard configuration file path for an application.
//! - Use `directories` crate for platform-appropriate paths.
//!
//! Does NOT handle:
//! - File I/O operations.
//! - The `SCOPED_CONFIG_PATH` override (applied by the provider builder).

use std::path::PathBuf;

use anyhow::Context;

use crate::constants::DEFAULT_CONFIG_FILE_NAME;

/// Returns the default path to an application's configuration file.
///
/// - Linux: `~/.config/<app>/config.json`
/// - macOS: `~/Library/Application Support/<app>/config.json`
/// - Windows: `%AppData%\<app>\config\config.json`
pub(crate) fn default_config_path(app_name: &str) -> Result<PathBuf, anyhow::Error> {
    let proj_dirs = directories::ProjectDirs::from("", "", app_name)
        .context("Failed to determine project directories")?;

    Ok(proj_dirs.config_dir().join(DEFAULT_CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_path_matches_expected_project_dirs() {
        let Some(dirs) = directories::ProjectDirs::from("", "", "scoped-config-test") else {
            // No home directory in this environment.
            return;
        };
        let expected = dirs.config_dir().join("config.json");

        let actual = default_config_path("scoped-config-test").unwrap();
        assert_eq!(actual, expected);
        assert!(actual.to_string_lossy().contains("scoped-config-test"));
    }
}
