//! Path resolution from keys and scopes.
//!
//! Responsibilities:
//! - Build the dotted document path for a key and its scope.
//! - Normalize case-insensitive keys to the definition's canonical casing.
//! - Escape wildcard characters before the path reaches the document.
//!
//! Invariants:
//! - A provider-level fixed scope always wins over a call-site scope.
//! - An empty scope string means "no scope".
//! - Every returned path has `*` and `?` escaped.

use crate::constants::{PATH_ESCAPE, PATH_SEPARATOR, PATH_WILDCARDS};
use crate::error::ConfigError;
use crate::types::FieldDefinition;

/// Escape the characters the path syntax treats as pattern operators.
pub(crate) fn escape_wildcards(path: &str) -> String {
    let mut escaped = String::with_capacity(path.len());
    for c in path.chars() {
        if PATH_WILDCARDS.contains(&c) {
            escaped.push(PATH_ESCAPE);
        }
        escaped.push(c);
    }
    escaped
}

fn non_empty(scope: Option<&str>) -> Option<&str> {
    scope.filter(|s| !s.is_empty())
}

/// Document path for `key`, honoring scope precedence and canonical casing.
///
/// Note that a configured `fixed_scope` silently replaces `call_scope`.
pub(crate) fn resolve_key_path(
    fixed_scope: Option<&str>,
    call_scope: &str,
    key: &str,
    definition: Option<&FieldDefinition>,
) -> String {
    let key = match definition {
        Some(field) if !field.is_case_sensitive() => field.key().as_str(),
        _ => key,
    };

    let path = match non_empty(fixed_scope).or(non_empty(Some(call_scope))) {
        Some(scope) => format!("{scope}{PATH_SEPARATOR}{key}"),
        None => key.to_string(),
    };

    escape_wildcards(&path)
}

/// Document path of a whole scope, prefixed by the fixed scope if any.
pub(crate) fn resolve_scope_path(
    fixed_scope: Option<&str>,
    scope: &str,
) -> Result<String, ConfigError> {
    let path = match (non_empty(fixed_scope), non_empty(Some(scope))) {
        (Some(fixed), Some(scope)) => format!("{fixed}{PATH_SEPARATOR}{scope}"),
        (Some(fixed), None) => fixed.to_string(),
        (None, Some(scope)) => scope.to_string(),
        (None, None) => {
            return Err(ConfigError::InvalidPath {
                path: String::new(),
                reason: "a scope name is required".to_string(),
            });
        }
    };

    Ok(escape_wildcards(&path))
}
