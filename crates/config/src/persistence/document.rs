//! The in-memory JSON document and its dotted-path syntax.
//!
//! Responsibilities:
//! - Parse dotted paths (`scope.key`) with `\` escapes.
//! - Read, write and delete values at a path inside a JSON object tree.
//!
//! Does NOT handle:
//! - File I/O or dirty tracking (see `persistence/mod.rs`).
//! - Building paths from keys and scopes (see `provider/path.rs`).
//!
//! Invariants:
//! - The root is always a JSON object; top-level keys keep insertion order.
//! - An unescaped `*` or `?` is a pattern operator and is rejected: the
//!   document only addresses literal paths.
//! - Writing through a non-object intermediate replaces it with an object.

use serde_json::{Map, Value};

use crate::constants::{PATH_ESCAPE, PATH_SEPARATOR, PATH_WILDCARDS};
use crate::error::ConfigError;

/// Split a dotted path into literal segments.
pub(crate) fn parse_path(path: &str) -> Result<Vec<String>, ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidPath {
        path: path.to_string(),
        reason: reason.to_string(),
    };

    let mut segments = Vec::new();
    let mut current = String::new();
    let mut chars = path.chars();

    while let Some(c) = chars.next() {
        match c {
            PATH_ESCAPE => match chars.next() {
                Some(escaped) => current.push(escaped),
                None => return Err(invalid("dangling escape character")),
            },
            PATH_SEPARATOR => {
                if current.is_empty() {
                    return Err(invalid("empty path segment"));
                }
                segments.push(std::mem::take(&mut current));
            }
            c if PATH_WILDCARDS.contains(&c) => {
                return Err(invalid("wildcards are not supported, escape them with '\\'"));
            }
            c => current.push(c),
        }
    }

    if current.is_empty() {
        return Err(invalid("empty path segment"));
    }
    segments.push(current);

    Ok(segments)
}

/// A JSON object tree of scopes terminating in leaf values.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct Document {
    root: Map<String, Value>,
}

impl Document {
    pub(crate) fn from_map(root: Map<String, Value>) -> Self {
        Self { root }
    }

    pub(crate) fn get(&self, segments: &[String]) -> Option<&Value> {
        let (first, rest) = segments.split_first()?;
        rest.iter()
            .try_fold(self.root.get(first)?, |node, segment| node.get(segment))
    }

    pub(crate) fn set(&mut self, segments: &[String], value: Value) {
        let Some((last, parents)) = segments.split_last() else {
            return;
        };

        let mut node = &mut self.root;
        for segment in parents {
            let child = node
                .entry(segment.clone())
                .or_insert_with(|| Value::Object(Map::new()));
            if !child.is_object() {
                *child = Value::Object(Map::new());
            }
            let Value::Object(map) = child else {
                return;
            };
            node = map;
        }
        node.insert(last.clone(), value);
    }

    /// Remove the value at `segments`. Returns false if nothing was there.
    pub(crate) fn delete(&mut self, segments: &[String]) -> bool {
        let Some((last, parents)) = segments.split_last() else {
            return false;
        };

        let mut node = &mut self.root;
        for segment in parents {
            match node.get_mut(segment) {
                Some(Value::Object(map)) => node = map,
                _ => return false,
            }
        }
        node.shift_remove(last).is_some()
    }

    pub(crate) fn top_level_keys(&self) -> Vec<String> {
        self.root.keys().cloned().collect()
    }

    pub(crate) fn to_value(&self) -> Value {
        Value::Object(self.root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn segs(path: &str) -> Vec<String> {
        parse_path(path).unwrap()
    }

    #[test]
    fn test_parse_simple_and_nested_paths() {
        assert_eq!(segs("region"), ["region"]);
        assert_eq!(segs("profile.region"), ["profile", "region"]);
        assert_eq!(segs("a.b.c"), ["a", "b", "c"]);
    }

    #[test]
    fn test_parse_escapes() {
        assert_eq!(segs(r"weird\*key"), ["weird*key"]);
        assert_eq!(segs(r"what\?"), ["what?"]);
        assert_eq!(segs(r"dotted\.key.inner"), ["dotted.key", "inner"]);
        assert_eq!(segs(r"back\\slash"), [r"back\slash"]);
    }

    #[test]
    fn test_parse_rejects_invalid_paths() {
        for path in ["", ".a", "a.", "a..b", "a*", "a?b", "trailing\\"] {
            assert!(
                matches!(parse_path(path), Err(ConfigError::InvalidPath { .. })),
                "expected InvalidPath for {path:?}"
            );
        }
    }

    #[test]
    fn test_set_creates_intermediate_scopes() {
        let mut doc = Document::default();
        doc.set(&segs("default.region"), json!("us"));
        doc.set(&segs("default.apiKey"), json!("abc"));

        assert_eq!(
            doc.to_value(),
            json!({"default": {"region": "us", "apiKey": "abc"}})
        );
        assert_eq!(doc.get(&segs("default.region")), Some(&json!("us")));
    }

    #[test]
    fn test_set_replaces_scalar_intermediate() {
        let mut doc = Document::default();
        doc.set(&segs("profile"), json!("scalar"));
        doc.set(&segs("profile.region"), json!("eu"));

        assert_eq!(doc.to_value(), json!({"profile": {"region": "eu"}}));
    }

    #[test]
    fn test_get_missing_paths() {
        let mut doc = Document::default();
        doc.set(&segs("a.b"), json!(1));

        assert!(doc.get(&segs("a.c")).is_none());
        assert!(doc.get(&segs("a.b.c")).is_none());
        assert!(doc.get(&segs("x")).is_none());
        assert!(doc.get(&[]).is_none());
    }

    #[test]
    fn test_delete_subtree_is_idempotent() {
        let mut doc = Document::default();
        doc.set(&segs("dev.region"), json!("us"));
        doc.set(&segs("prod.region"), json!("eu"));

        assert!(doc.delete(&segs("dev")));
        assert!(!doc.delete(&segs("dev")));
        assert!(!doc.delete(&segs("dev.region")));
        assert_eq!(doc.top_level_keys(), ["prod"]);
    }

    #[test]
    fn test_top_level_keys_keep_insertion_order() {
        let mut doc = Document::default();
        for scope in ["zeta", "alpha", "mid"] {
            doc.set(&segs(&format!("{scope}.k")), json!(true));
        }
        assert_eq!(doc.top_level_keys(), ["zeta", "alpha", "mid"]);
    }
}
