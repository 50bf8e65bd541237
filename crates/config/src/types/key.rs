//! Logical configuration keys.
//!
//! Invariants:
//! - A key is compared case-sensitively by `Eq`; `eq_fold` provides the
//!   case-folded comparison used for case-insensitive field definitions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The logical name of a configuration value, e.g. `region` or `apiKey`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConfigKey(String);

impl ConfigKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Compares two keys ignoring letter case.
    pub fn eq_fold(&self, other: &str) -> bool {
        fold_eq(&self.0, other)
    }
}

/// Unicode-aware case-insensitive equality.
pub(crate) fn fold_eq(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return a.eq_ignore_ascii_case(b);
    }
    a.chars()
        .flat_map(char::to_lowercase)
        .eq(b.chars().flat_map(char::to_lowercase))
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ConfigKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ConfigKey {
    fn from(key: &str) -> Self {
        Self(key.to_string())
    }
}

impl From<String> for ConfigKey {
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl From<&ConfigKey> for ConfigKey {
    fn from(key: &ConfigKey) -> Self {
        key.clone()
    }
}
