//! Scope handling tests: scoped reads/writes, fixed scopes, removal and casing.

use crate::error::ConfigError;
use crate::provider::ConfigProvider;
use crate::types::{ConfigValue, FieldDefinition};

#[test]
fn test_scoped_values_are_independent() {
    let provider = ConfigProvider::builder().build().unwrap();

    provider.set_with_scope("dev", "region", "us").unwrap();
    provider.set_with_scope("prod", "region", "eu").unwrap();

    assert_eq!(provider.get_string_with_scope("dev", "region").unwrap(), "us");
    assert_eq!(provider.get_string_with_scope("prod", "region").unwrap(), "eu");
    assert!(provider.get("region").unwrap_err().is_not_found());
}

#[test]
fn test_scopes_lists_top_level_names_in_order() {
    let provider = ConfigProvider::builder().build().unwrap();

    provider.set_with_scope("zeta", "k", 1).unwrap();
    provider.set_with_scope("alpha", "k", 1).unwrap();
    provider.set_with_scope("zeta", "j", 2).unwrap();

    assert_eq!(provider.scopes().unwrap(), ["zeta", "alpha"]);
}

#[test]
fn test_remove_scope_is_idempotent() {
    let provider = ConfigProvider::builder().build().unwrap();
    provider.set_with_scope("dev", "region", "us").unwrap();
    provider.set_with_scope("prod", "region", "eu").unwrap();

    provider.remove_scope("dev").unwrap();
    assert_eq!(provider.scopes().unwrap(), ["prod"]);

    provider.remove_scope("dev").unwrap();
    provider.remove_scope("never-existed").unwrap();
    assert_eq!(provider.scopes().unwrap(), ["prod"]);
}

#[test]
fn test_remove_scope_requires_a_name() {
    let provider = ConfigProvider::builder().build().unwrap();
    assert!(matches!(
        provider.remove_scope(""),
        Err(ConfigError::InvalidPath { .. })
    ));
}

#[test]
fn test_nested_scopes() {
    let provider = ConfigProvider::builder().build().unwrap();

    provider.set_with_scope("org.team", "region", "eu").unwrap();
    assert_eq!(
        provider.get_string_with_scope("org.team", "region").unwrap(),
        "eu"
    );

    match provider.get("org").unwrap() {
        ConfigValue::Map(map) => assert!(map.contains_key("team")),
        other => panic!("Expected nested map, got {:?}", other),
    }

    provider.remove_scope("org.team").unwrap();
    assert!(provider
        .get_with_scope("org.team", "region")
        .unwrap_err()
        .is_not_found());
    assert_eq!(provider.scopes().unwrap(), ["org"]);
}

#[test]
fn test_fixed_scope_wins_over_call_scope() {
    let provider = ConfigProvider::builder().with_scope("fixed").build().unwrap();

    provider.set_with_scope("ignored", "region", "eu").unwrap();

    assert_eq!(provider.scope(), Some("fixed"));
    assert_eq!(provider.get_string("region").unwrap(), "eu");
    assert_eq!(provider.get_string_with_scope("other", "region").unwrap(), "eu");
    assert_eq!(provider.scopes().unwrap(), ["fixed"]);
}

#[test]
fn test_fixed_scope_applies_to_defaults() {
    let provider = ConfigProvider::builder()
        .with_field_definitions([FieldDefinition::new("region").default_value("us")])
        .unwrap()
        .with_scope("profile1")
        .build()
        .unwrap();

    assert_eq!(provider.scopes().unwrap(), ["profile1"]);
    assert_eq!(provider.get_string("region").unwrap(), "us");
}

#[test]
fn test_fixed_scope_prefixes_removed_scope() {
    let provider = ConfigProvider::builder().with_scope("app").build().unwrap();
    provider.set("region", "eu").unwrap();

    provider.remove_scope("region").unwrap();
    assert!(provider.get("region").unwrap_err().is_not_found());
    assert_eq!(provider.scopes().unwrap(), ["app"]);

    provider.remove_scope("").unwrap();
    assert!(provider.scopes().unwrap().is_empty());
}

#[test]
fn test_empty_fixed_scope_means_unscoped() {
    let provider = ConfigProvider::builder().with_scope("").build().unwrap();
    assert_eq!(provider.scope(), None);

    provider.set_with_scope("dev", "region", "us").unwrap();
    assert_eq!(provider.scopes().unwrap(), ["dev"]);
}

#[test]
fn test_case_insensitive_key_uses_canonical_casing() {
    let provider = ConfigProvider::builder()
        .with_field_definitions([FieldDefinition::new("apiKey")])
        .unwrap()
        .build()
        .unwrap();

    provider.set_with_scope("dev", "APIKEY", "abc").unwrap();

    assert_eq!(provider.get_string_with_scope("dev", "apikey").unwrap(), "abc");
    match provider.get("dev").unwrap() {
        ConfigValue::Map(map) => {
            assert!(map.contains_key("apiKey"));
            assert!(!map.contains_key("APIKEY"));
        }
        other => panic!("Expected map, got {:?}", other),
    }
}

#[test]
fn test_case_sensitive_keys_are_distinct() {
    let provider = ConfigProvider::builder()
        .with_field_definitions([FieldDefinition::new("Token").case_sensitive(true)])
        .unwrap()
        .build()
        .unwrap();

    provider.set("Token", "upper").unwrap();
    provider.set("token", "lower").unwrap();

    assert_eq!(provider.get_string("Token").unwrap(), "upper");
    assert_eq!(provider.get_string("token").unwrap(), "lower");
}

#[test]
fn test_wildcard_characters_are_stored_literally() {
    let provider = ConfigProvider::builder().build().unwrap();

    provider.set_with_scope("team*", "what?", "literal").unwrap();

    assert_eq!(
        provider.get_string_with_scope("team*", "what?").unwrap(),
        "literal"
    );
    assert_eq!(provider.scopes().unwrap(), ["team*"]);
    assert!(provider
        .get_with_scope("teamA", "what?")
        .unwrap_err()
        .is_not_found());

    provider.remove_scope("team*").unwrap();
    assert!(provider.scopes().unwrap().is_empty());
}
