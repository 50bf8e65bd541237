//! Schema-aware configuration store.
//!
//! This crate manages named, typed configuration values backed by a single
//! JSON document, with environment variable overrides, per-key validation,
//! hierarchical scopes and default values.
//!
//! ```rust,no_run
//! use scoped_config::{ConfigProvider, FieldDefinition, validators};
//!
//! # fn main() -> Result<(), scoped_config::ConfigError> {
//! let provider = ConfigProvider::builder()
//!     .with_field_definitions([
//!         FieldDefinition::new("region")
//!             .env_var("APP_REGION")
//!             .default_value("us")
//!             .validator(validators::string_in_strings(false, ["us", "eu"])),
//!         FieldDefinition::new("apiKey").sensitive(true),
//!     ])?
//!     .with_file_persistence("/tmp/app-config.json")
//!     .build()?;
//!
//! provider.set_with_scope("prod", "apiKey", "abc123")?;
//! let region = provider.get_string("region")?;
//! # let _ = region;
//! # Ok(())
//! # }
//! ```

pub mod constants;
mod error;
mod persistence;
mod provider;
mod registry;
pub mod types;
pub mod validators;

pub use error::ConfigError;
pub use persistence::ConfigFileError;
pub use provider::env::env_var_or_none;
pub use provider::{ConfigProvider, ConfigProviderBuilder};
pub use registry::FieldRegistry;
pub use types::{ConfigKey, ConfigValue, FieldDefinition};
pub use validators::Validator;
