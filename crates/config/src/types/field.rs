//! Field definitions: the schema entry for one configuration key.
//!
//! Responsibilities:
//! - Describe a key's environment override, default, case sensitivity,
//!   sensitivity and validator.
//! - Decide whether a requested key addresses this field.
//!
//! Does NOT handle:
//! - Collision detection between definitions (see `registry.rs`).
//! - Reading or writing values (see `provider`).
//!
//! Invariants:
//! - Definitions are immutable once registered.
//! - Fields are case-insensitive unless `case_sensitive(true)` is set.

use std::fmt;

use super::{ConfigKey, ConfigValue};
use crate::validators::Validator;

/// Schema entry for a single configuration key.
#[derive(Clone)]
pub struct FieldDefinition {
    key: ConfigKey,
    env_var: Option<String>,
    default: Option<ConfigValue>,
    case_sensitive: bool,
    sensitive: bool,
    validator: Option<Validator>,
}

impl FieldDefinition {
    /// Create a case-insensitive, non-sensitive field with no default.
    pub fn new(key: impl Into<ConfigKey>) -> Self {
        Self {
            key: key.into(),
            env_var: None,
            default: None,
            case_sensitive: false,
            sensitive: false,
            validator: None,
        }
    }

    /// Name of the environment variable that overrides stored values.
    pub fn env_var(mut self, name: impl Into<String>) -> Self {
        self.env_var = Some(name.into());
        self
    }

    /// Value written to the document when it is first initialized.
    pub fn default_value(mut self, value: impl Into<ConfigValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn case_sensitive(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    /// Mark the value as unsafe to display verbatim.
    pub fn sensitive(mut self, sensitive: bool) -> Self {
        self.sensitive = sensitive;
        self
    }

    pub fn validator(mut self, validator: Validator) -> Self {
        self.validator = Some(validator);
        self
    }

    pub fn key(&self) -> &ConfigKey {
        &self.key
    }

    pub fn env_var_name(&self) -> Option<&str> {
        self.env_var.as_deref()
    }

    pub fn default(&self) -> Option<&ConfigValue> {
        self.default.as_ref()
    }

    pub fn is_case_sensitive(&self) -> bool {
        self.case_sensitive
    }

    pub fn is_sensitive(&self) -> bool {
        self.sensitive
    }

    /// Returns true if `key` addresses this field.
    pub fn matches(&self, key: &str) -> bool {
        if self.case_sensitive {
            self.key.as_str() == key
        } else {
            self.key.eq_fold(key)
        }
    }

    /// Runs the validator, if any, against a candidate value.
    pub fn validate(&self, key: &ConfigKey, value: &ConfigValue) -> Result<(), String> {
        match &self.validator {
            Some(validator) => validator(key, value),
            None => Ok(()),
        }
    }
}

impl fmt::Debug for FieldDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let default: &dyn fmt::Debug = if self.sensitive {
            &"[REDACTED]"
        } else {
            &self.default
        };
        f.debug_struct("FieldDefinition")
            .field("key", &self.key)
            .field("env_var", &self.env_var)
            .field("default", default)
            .field("case_sensitive", &self.case_sensitive)
            .field("sensitive", &self.sensitive)
            .field("validator", &self.validator.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
