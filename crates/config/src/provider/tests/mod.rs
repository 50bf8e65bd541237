//! Tests for the configuration provider.
//!
//! Responsibilities:
//! - Test default materialization, round trips and typed accessors.
//! - Test environment override precedence.
//! - Test scopes, scope precedence and key casing.
//! - Test validation, explicit-values mode and registration collisions.
//! - Test file persistence, reloads and corrupt files.
//!
//! Invariants:
//! - Tests that touch the process environment use `serial_test` and
//!   `env_lock()` to prevent environment variable pollution.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

use crate::types::FieldDefinition;
use crate::validators::string_in_strings;

pub mod scope_tests;
pub mod validation_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// The `region`/`apiKey` pair used throughout the provider tests.
pub fn region_and_api_key() -> Vec<FieldDefinition> {
    vec![
        FieldDefinition::new("region")
            .default_value("us")
            .validator(string_in_strings(false, ["us", "eu"])),
        FieldDefinition::new("apiKey").sensitive(true),
    ]
}
