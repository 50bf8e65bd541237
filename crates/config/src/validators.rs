//! Value validators attached to field definitions.
//!
//! A validator receives the key being written and the candidate value and
//! returns the reason for rejection. The provider wraps that reason in
//! `ConfigError::Validation`.

use std::sync::Arc;

use crate::types::{ConfigKey, ConfigValue, key::fold_eq};

/// A predicate run against every value written to a field.
pub type Validator = Arc<dyn Fn(&ConfigKey, &ConfigValue) -> Result<(), String> + Send + Sync>;

/// Accepts only integers strictly greater than `greater_than`.
pub fn int_greater_than(greater_than: i64) -> Validator {
    Arc::new(move |_key: &ConfigKey, value: &ConfigValue| {
        let ConfigValue::Int(i) = value else {
            return Err(format!("{value} is not an int"));
        };

        if *i > greater_than {
            Ok(())
        } else {
            Err(format!("value {i} is not greater than {greater_than}"))
        }
    })
}

/// Accepts only strings contained in `allowed`, compared exactly or case-folded.
pub fn string_in_strings<I, S>(case_sensitive: bool, allowed: I) -> Validator
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();

    Arc::new(move |_key: &ConfigKey, value: &ConfigValue| {
        let ConfigValue::String(s) = value else {
            return Err(format!("{value} is not a string"));
        };

        let found = allowed.iter().any(|candidate| {
            if case_sensitive {
                candidate == s
            } else {
                fold_eq(candidate, s)
            }
        });

        if found {
            Ok(())
        } else {
            Err(format!(
                "value {s} not in allowed values: [{}]",
                allowed.join(" ")
            ))
        }
    })
}

/// Runs every validator in order; the first rejection wins.
pub fn all_of(validators: impl IntoIterator<Item = Validator>) -> Validator {
    let validators: Vec<Validator> = validators.into_iter().collect();
    Arc::new(move |key: &ConfigKey, value: &ConfigValue| {
        validators.iter().try_for_each(|v| v(key, value))
    })
}
