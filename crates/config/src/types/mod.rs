//! Core type definitions for the configuration store.
//!
//! Responsibilities:
//! - Define logical keys (`ConfigKey`) and the closed value type (`ConfigValue`).
//! - Define the per-key schema entry (`FieldDefinition`).
//!
//! Does NOT handle:
//! - Storage or path resolution (see `persistence` and `provider`).
//! - Validator construction (see `validators`).
//!
//! Invariants:
//! - `ConfigValue` is the only representation values take outside the JSON document.
//! - `FieldDefinition` values are immutable after registration.

mod field;
pub(crate) mod key;
mod value;

pub use field::FieldDefinition;
pub use key::ConfigKey;
pub use value::ConfigValue;
