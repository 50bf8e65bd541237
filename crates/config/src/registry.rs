//! Ordered registry of field definitions.
//!
//! Responsibilities:
//! - Hold field definitions in registration order.
//! - Reject case-insensitive definitions whose folded key is already taken.
//! - Find the definition that governs a requested key.
//!
//! Invariants:
//! - No two case-insensitive definitions share a case-folded key.
//! - Case-sensitive definitions are never rejected; lookup returns the first
//!   match in registration order.

use crate::error::ConfigError;
use crate::types::{ConfigKey, FieldDefinition};

/// Registration-ordered collection of [`FieldDefinition`]s.
#[derive(Debug, Clone, Default)]
pub struct FieldRegistry {
    fields: Vec<FieldDefinition>,
}

impl FieldRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append definitions in order.
    ///
    /// Registration order matters when a case-sensitive and a case-insensitive
    /// definition share a case-folded key. Lookup returns the first match, so
    /// a case-insensitive `region` registered before a case-sensitive `Region`
    /// shadows it completely: reads, writes and default materialization for
    /// `Region` all resolve to `region`. Register the case-sensitive
    /// definition first to keep its exact spelling reachable.
    ///
    /// # Errors
    /// Returns `ConfigError::DuplicateKey` for the first case-insensitive
    /// definition whose key case-folds to an already registered
    /// case-insensitive key. Definitions before it remain registered.
    pub fn register(
        &mut self,
        definitions: impl IntoIterator<Item = FieldDefinition>,
    ) -> Result<(), ConfigError> {
        for definition in definitions {
            if !definition.is_case_sensitive() {
                let collides = self.fields.iter().any(|existing| {
                    !existing.is_case_sensitive() && existing.key().eq_fold(definition.key().as_str())
                });
                if collides {
                    return Err(ConfigError::DuplicateKey {
                        key: definition.key().clone(),
                    });
                }
            }
            self.fields.push(definition);
        }
        Ok(())
    }

    /// First definition governing `key`, if any, in registration order.
    ///
    /// See [`FieldRegistry::register`] for how this shadows later definitions.
    pub fn lookup(&self, key: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.matches(key))
    }

    pub fn keys(&self) -> Vec<ConfigKey> {
        self.fields.iter().map(|field| field.key().clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldDefinition> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
