//! Typed accessors layered over `ConfigProvider::get_with_scope`.

use secrecy::SecretString;

use super::ConfigProvider;
use crate::constants::MASKED_VALUE;
use crate::error::ConfigError;
use crate::types::{ConfigKey, ConfigValue};

impl ConfigProvider {
    fn is_sensitive(&self, key: &str) -> bool {
        self.registry
            .lookup(key)
            .is_some_and(|field| field.is_sensitive())
    }

    /// Type mismatch error that never echoes a sensitive value.
    fn mismatch(&self, key: &str, expected: &'static str, value: &ConfigValue) -> ConfigError {
        let found = if self.is_sensitive(key) {
            value.type_name().to_string()
        } else {
            value.to_string()
        };
        ConfigError::TypeMismatch {
            key: ConfigKey::from(key),
            expected,
            found,
        }
    }

    pub fn get_int(&self, key: impl AsRef<str>) -> Result<i64, ConfigError> {
        self.get_int_with_scope("", key)
    }

    /// Read an integer. Numeric strings (such as environment overrides) are
    /// parsed and floats are truncated toward zero.
    pub fn get_int_with_scope(&self, scope: &str, key: impl AsRef<str>) -> Result<i64, ConfigError> {
        let key = key.as_ref();
        let value = self.get_with_scope(scope, key)?;
        value
            .as_int()
            .ok_or_else(|| self.mismatch(key, "an int", &value))
    }

    pub fn get_string(&self, key: impl AsRef<str>) -> Result<String, ConfigError> {
        self.get_string_with_scope("", key)
    }

    pub fn get_string_with_scope(
        &self,
        scope: &str,
        key: impl AsRef<str>,
    ) -> Result<String, ConfigError> {
        let key = key.as_ref();
        match self.get_with_scope(scope, key)? {
            ConfigValue::String(s) => Ok(s),
            other => Err(self.mismatch(key, "a string", &other)),
        }
    }

    pub fn get_bool(&self, key: impl AsRef<str>) -> Result<bool, ConfigError> {
        self.get_bool_with_scope("", key)
    }

    /// Read a boolean; the strings `"true"` and `"false"` are accepted.
    pub fn get_bool_with_scope(
        &self,
        scope: &str,
        key: impl AsRef<str>,
    ) -> Result<bool, ConfigError> {
        let key = key.as_ref();
        let value = self.get_with_scope(scope, key)?;
        value
            .as_bool()
            .ok_or_else(|| self.mismatch(key, "a bool", &value))
    }

    pub fn get_secret(&self, key: impl AsRef<str>) -> Result<SecretString, ConfigError> {
        self.get_secret_with_scope("", key)
    }

    /// Read a string value wrapped so it cannot be logged by accident.
    pub fn get_secret_with_scope(
        &self,
        scope: &str,
        key: impl AsRef<str>,
    ) -> Result<SecretString, ConfigError> {
        let key = key.as_ref();
        match self.get_with_scope(scope, key)? {
            ConfigValue::String(s) => Ok(SecretString::new(s.into())),
            other => Err(ConfigError::TypeMismatch {
                key: ConfigKey::from(key),
                expected: "a string",
                found: other.type_name().to_string(),
            }),
        }
    }

    pub fn display_value(&self, key: impl AsRef<str>) -> Result<String, ConfigError> {
        self.display_value_with_scope("", key)
    }

    /// Render a value for display, masking fields marked sensitive.
    pub fn display_value_with_scope(
        &self,
        scope: &str,
        key: impl AsRef<str>,
    ) -> Result<String, ConfigError> {
        let key = key.as_ref();
        let value = self.get_with_scope(scope, key)?;

        if self.is_sensitive(key) {
            Ok(MASKED_VALUE.to_string())
        } else {
            Ok(value.to_string())
        }
    }
}
