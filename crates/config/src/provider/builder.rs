//! Builder for `ConfigProvider`.
//!
//! Responsibilities:
//! - Collect construction options (explicit values, field definitions,
//!   file persistence, fixed scope).
//! - Optionally load a `.env` file so it feeds environment overrides.
//! - Run the initial load (file, then defaults) before handing out a provider.
//!
//! Does NOT handle:
//! - Reading or writing values after construction (see `provider/mod.rs`).
//!
//! Invariants / Assumptions:
//! - Field definition collisions are reported by the call that adds them.
//! - `build()` never returns a provider whose defaults failed to materialize.
//! - `SCOPED_CONFIG_PATH` only affects `with_default_file_persistence`.

use std::path::PathBuf;
use std::sync::Mutex;

use super::ConfigProvider;
use super::env::{env_var_or_none, load_dotenv};
use crate::constants::CONFIG_PATH_ENV_VAR;
use crate::error::ConfigError;
use crate::persistence::{DocumentStore, default_config_path};
use crate::registry::FieldRegistry;
use crate::types::FieldDefinition;

/// Options-based builder for [`ConfigProvider`].
#[derive(Debug, Default)]
pub struct ConfigProviderBuilder {
    registry: FieldRegistry,
    explicit_values: bool,
    file: Option<PathBuf>,
    scope: Option<String>,
}

impl ConfigProviderBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes to keys without a registered field definition.
    pub fn explicit_values(mut self) -> Self {
        self.explicit_values = true;
        self
    }

    /// Register field definitions, in order.
    ///
    /// # Errors
    /// Returns `ConfigError::DuplicateKey` if a case-insensitive definition
    /// collides with an already registered case-insensitive key.
    pub fn with_field_definitions(
        mut self,
        definitions: impl IntoIterator<Item = FieldDefinition>,
    ) -> Result<Self, ConfigError> {
        self.registry.register(definitions)?;
        Ok(self)
    }

    /// Persist the document to `path`, reading it on first use.
    pub fn with_file_persistence(mut self, path: impl Into<PathBuf>) -> Self {
        self.file = Some(path.into());
        self
    }

    /// Persist the document in the platform config directory for `app_name`.
    ///
    /// If `SCOPED_CONFIG_PATH` is set (and not empty/whitespace), that path
    /// is used instead.
    pub fn with_default_file_persistence(mut self, app_name: &str) -> Result<Self, ConfigError> {
        let path = match env_var_or_none(CONFIG_PATH_ENV_VAR) {
            Some(path) => PathBuf::from(path),
            None => default_config_path(app_name)
                .map_err(|e| ConfigError::ConfigDirUnavailable(format!("{e:#}")))?,
        };
        self.file = Some(path);
        Ok(self)
    }

    /// Nest every key under `scope`.
    ///
    /// The fixed scope replaces any scope passed to the `*_with_scope`
    /// methods; those arguments are ignored on a scoped provider.
    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        let scope = scope.into();
        self.scope = (!scope.is_empty()).then_some(scope);
        self
    }

    /// Load environment variables from a `.env` file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the file is not loaded.
    ///
    /// # Errors
    /// Returns `ConfigError::DotenvParse` or `ConfigError::DotenvIo` if the file
    /// exists but cannot be used. Missing `.env` files are ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        load_dotenv()?;
        Ok(self)
    }

    /// Build the provider and load its document.
    ///
    /// The backing file is read if present; when the document is still empty
    /// every registered default is written, in registration order.
    ///
    /// # Errors
    /// Returns `ConfigError::DefaultsMaterialization` if a default cannot be
    /// written (for example, it fails its own validator or the file is not
    /// writable).
    pub fn build(self) -> Result<ConfigProvider, ConfigError> {
        let provider = ConfigProvider {
            registry: self.registry,
            scope: self.scope,
            explicit_values: self.explicit_values,
            store: Mutex::new(DocumentStore::new(self.file)),
        };

        {
            let mut store = provider.lock();
            provider.load_or_initialize(&mut store)?;
        }

        tracing::debug!(
            fields = provider.registry.len(),
            scope = provider.scope.as_deref().unwrap_or(""),
            explicit_values = provider.explicit_values,
            "Config provider initialized"
        );

        Ok(provider)
    }
}
