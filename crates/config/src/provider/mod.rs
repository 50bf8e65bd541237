//! The configuration provider: resolution, validation, persistence and scoping.
//!
//! Responsibilities:
//! - Resolve values with environment override precedence.
//! - Validate and persist writes, rejecting unknown keys in explicit mode.
//! - Initialize the document from the backing file or registered defaults.
//! - Manage scopes (nested groups of keys) in the document.
//!
//! Does NOT handle:
//! - Path syntax and file I/O (see `persistence`).
//! - Typed conversions (see `accessors.rs`).
//!
//! Invariants / Assumptions:
//! - Environment overrides take precedence over stored and default values.
//! - A provider-level fixed scope takes precedence over call-site scopes.
//! - Every read and write holds the store mutex, including reads that
//!   reload the document, so a half-initialized document is never observed.
//! - Defaults are only written when the document is empty after loading.

use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

mod accessors;
mod builder;
pub(crate) mod env;
mod path;

#[cfg(test)]
mod tests;

pub use builder::ConfigProviderBuilder;

use self::env::env_override;
use self::path::{resolve_key_path, resolve_scope_path};
use crate::error::ConfigError;
use crate::persistence::{DocumentStore, parse_path};
use crate::registry::FieldRegistry;
use crate::types::{ConfigKey, ConfigValue, FieldDefinition};

/// A schema-aware configuration store backed by a single JSON document.
///
/// Construct one with [`ConfigProvider::builder`]. Providers are independent:
/// several may exist in one process, each with its own registry and file.
#[derive(Debug)]
pub struct ConfigProvider {
    registry: FieldRegistry,
    scope: Option<String>,
    explicit_values: bool,
    store: Mutex<DocumentStore>,
}

impl ConfigProvider {
    pub fn builder() -> ConfigProviderBuilder {
        ConfigProviderBuilder::new()
    }

    /// Returns the backing file path, if file persistence is enabled.
    pub fn file_path(&self) -> Option<std::path::PathBuf> {
        self.lock().file().map(Path::to_path_buf)
    }

    /// The fixed scope applied to every path, if configured.
    pub fn scope(&self) -> Option<&str> {
        self.scope.as_deref()
    }

    /// Whether writes to unregistered keys are rejected.
    pub fn is_explicit(&self) -> bool {
        self.explicit_values
    }

    /// Read a value without a call-site scope.
    pub fn get(&self, key: impl AsRef<str>) -> Result<ConfigValue, ConfigError> {
        self.get_with_scope("", key)
    }

    /// Read a value, consulting the environment override first.
    ///
    /// `scope` is ignored when the provider was built with a fixed scope.
    ///
    /// # Errors
    /// Returns `ConfigError::KeyNotFound` if no value exists at the resolved path.
    pub fn get_with_scope(
        &self,
        scope: &str,
        key: impl AsRef<str>,
    ) -> Result<ConfigValue, ConfigError> {
        let key = key.as_ref();
        let definition = self.registry.lookup(key);

        if let Some(value) = definition.and_then(env_override) {
            return Ok(ConfigValue::String(value));
        }

        let path = resolve_key_path(self.scope.as_deref(), scope, key, definition);

        let mut store = self.lock();
        self.load_or_initialize(&mut store)?;
        store.get(&path).map(ConfigValue::from_json)
    }

    pub fn set(&self, key: impl AsRef<str>, value: impl Into<ConfigValue>) -> Result<(), ConfigError> {
        self.set_with_scope("", key, value)
    }

    /// Validate and store a value, then persist the document.
    ///
    /// `scope` is ignored when the provider was built with a fixed scope.
    ///
    /// # Errors
    /// - `ConfigError::Validation` if the field's validator rejects `value`.
    /// - `ConfigError::UnknownKey` if the key is unregistered in explicit mode.
    /// - `ConfigError::Persistence` if the backing file cannot be written.
    pub fn set_with_scope(
        &self,
        scope: &str,
        key: impl AsRef<str>,
        value: impl Into<ConfigValue>,
    ) -> Result<(), ConfigError> {
        let value = value.into();
        let segments = self.prepare_write(scope, key.as_ref(), &value)?;

        let mut store = self.lock();
        self.load_or_initialize(&mut store)?;
        store.write_with(|doc| doc.set(&segments, value.to_json()))
    }

    /// Delete a scope and everything under it, then persist the document.
    ///
    /// Removing a scope that does not exist is not an error.
    pub fn remove_scope(&self, scope: &str) -> Result<(), ConfigError> {
        let path = resolve_scope_path(self.scope.as_deref(), scope)?;
        let segments = parse_path(&path)?;

        let mut store = self.lock();
        self.load_or_initialize(&mut store)?;
        store.write_with(|doc| {
            if !doc.delete(&segments) {
                tracing::debug!(scope = %path, "Scope not present, nothing removed");
            }
        })
    }

    /// Top-level names in the document, in document order.
    pub fn scopes(&self) -> Result<Vec<String>, ConfigError> {
        let mut store = self.lock();
        self.load_or_initialize(&mut store)?;
        Ok(store.top_level_keys())
    }

    /// Apply `visit` to every registered field in registration order.
    pub fn visit_fields(&self, mut visit: impl FnMut(&FieldDefinition)) {
        for field in self.registry.iter() {
            visit(field);
        }
    }

    /// Registered keys in registration order.
    pub fn keys(&self) -> Vec<ConfigKey> {
        self.registry.keys()
    }

    /// Discard the in-memory document and load it again.
    ///
    /// Picks up changes made to the backing file by other processes. Defaults
    /// are written again if the reloaded document is empty.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let mut store = self.lock();
        store.mark_dirty();
        self.load_or_initialize(&mut store)
    }

    /// The whole document as pretty-printed JSON.
    ///
    /// Sensitive values are included verbatim.
    pub fn to_json_pretty(&self) -> Result<String, ConfigError> {
        let mut store = self.lock();
        self.load_or_initialize(&mut store)?;
        Ok(serde_json::to_string_pretty(&store.to_value())?)
    }

    fn lock(&self) -> MutexGuard<'_, DocumentStore> {
        self.store.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate a write and return the document segments it targets.
    fn prepare_write(
        &self,
        scope: &str,
        key: &str,
        value: &ConfigValue,
    ) -> Result<Vec<String>, ConfigError> {
        let definition = self.registry.lookup(key);

        match definition {
            Some(field) => {
                field
                    .validate(field.key(), value)
                    .map_err(|reason| ConfigError::Validation {
                        key: field.key().clone(),
                        reason,
                    })?;
            }
            None if self.explicit_values => {
                return Err(ConfigError::UnknownKey {
                    key: ConfigKey::from(key),
                    valid_keys: self.registry.keys(),
                });
            }
            None => {}
        }

        let path = resolve_key_path(self.scope.as_deref(), scope, key, definition);
        parse_path(&path)
    }

    /// Bring the document up to date: read the backing file when the
    /// document is empty or dirty, then write defaults if it is still empty.
    fn load_or_initialize(&self, store: &mut DocumentStore) -> Result<(), ConfigError> {
        if !store.needs_load() {
            return Ok(());
        }

        store.load_from_file();

        if store.is_empty() {
            self.materialize_defaults(store)?;
        }

        store.mark_clean();
        Ok(())
    }

    /// Write every registered default, in registration order.
    fn materialize_defaults(&self, store: &mut DocumentStore) -> Result<(), ConfigError> {
        for field in self.registry.iter() {
            let Some(default) = field.default().filter(|value| !value.is_null()) else {
                continue;
            };

            let materialize_error = |source: ConfigError| ConfigError::DefaultsMaterialization {
                key: field.key().clone(),
                source: Box::new(source),
            };

            let segments = self
                .prepare_write("", field.key().as_str(), default)
                .map_err(materialize_error)?;
            store
                .write_with(|doc| doc.set(&segments, default.to_json()))
                .map_err(materialize_error)?;
        }

        if !store.is_empty() {
            tracing::debug!(fields = self.registry.len(), "Wrote default configuration");
        }
        Ok(())
    }
}
