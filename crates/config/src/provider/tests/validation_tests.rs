//! Validation tests: validators, explicit-values mode and registration collisions.

use crate::error::ConfigError;
use crate::provider::ConfigProvider;
use crate::types::{ConfigValue, FieldDefinition};
use crate::validators::{all_of, int_greater_than, string_in_strings};

use super::region_and_api_key;

// ============================================================================
// Registration
// ============================================================================

#[test]
fn test_case_insensitive_collision_fails_registration() {
    let result = ConfigProvider::builder()
        .with_field_definitions([FieldDefinition::new("region")])
        .unwrap()
        .with_field_definitions([FieldDefinition::new("REGION")]);

    match result {
        Err(ConfigError::DuplicateKey { key }) => assert_eq!(key.as_str(), "REGION"),
        Ok(_) => panic!("Expected DuplicateKey error, got Ok"),
        Err(ref e) => panic!("Expected DuplicateKey error, got {:?}", e),
    }
}

#[test]
fn test_case_sensitive_and_insensitive_with_same_folded_key() {
    let provider = ConfigProvider::builder()
        .with_field_definitions([
            FieldDefinition::new("region"),
            FieldDefinition::new("REGION").case_sensitive(true),
        ])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(provider.keys().len(), 2);
}

#[test]
fn test_shadowed_case_sensitive_default_lands_on_earlier_key() {
    let provider = ConfigProvider::builder()
        .with_field_definitions([
            FieldDefinition::new("region").default_value("us"),
            FieldDefinition::new("Region").case_sensitive(true).default_value("eu"),
        ])
        .unwrap()
        .build()
        .unwrap();

    assert_eq!(provider.scopes().unwrap(), ["region"]);
    assert_eq!(provider.get_string("region").unwrap(), "eu");
}

// ============================================================================
// Explicit Values Mode
// ============================================================================

#[test]
fn test_explicit_mode_rejects_unregistered_keys() {
    let provider = ConfigProvider::builder()
        .explicit_values()
        .with_field_definitions(region_and_api_key())
        .unwrap()
        .build()
        .unwrap();

    assert!(provider.is_explicit());
    match provider.set("unregistered_key", "v") {
        Err(ConfigError::UnknownKey { key, valid_keys }) => {
            assert_eq!(key.as_str(), "unregistered_key");
            let names: Vec<&str> = valid_keys.iter().map(|k| k.as_str()).collect();
            assert_eq!(names, ["region", "apiKey"]);
        }
        other => panic!("Expected UnknownKey, got {:?}", other),
    }
    assert!(provider.get("unregistered_key").unwrap_err().is_not_found());
}

#[test]
fn test_explicit_mode_error_message_lists_keys() {
    let provider = ConfigProvider::builder()
        .explicit_values()
        .with_field_definitions(region_and_api_key())
        .unwrap()
        .build()
        .unwrap();

    let message = provider.set("nope", 1).unwrap_err().to_string();
    assert!(message.contains("region"), "message: {message}");
    assert!(message.contains("apiKey"), "message: {message}");
}

#[test]
fn test_explicit_mode_accepts_registered_keys_in_any_case() {
    let provider = ConfigProvider::builder()
        .explicit_values()
        .with_field_definitions(region_and_api_key())
        .unwrap()
        .build()
        .unwrap();

    provider.set("APIKEY", "abc").unwrap();
    assert_eq!(provider.get_string("apiKey").unwrap(), "abc");
}

#[test]
fn test_non_explicit_mode_accepts_unregistered_keys() {
    let provider = ConfigProvider::builder()
        .with_field_definitions(region_and_api_key())
        .unwrap()
        .build()
        .unwrap();

    provider.set("unregistered_key", "v").unwrap();
    assert_eq!(provider.get_string("unregistered_key").unwrap(), "v");
}

// ============================================================================
// Validators
// ============================================================================

#[test]
fn test_int_validator_rejects_and_keeps_previous_value() {
    let provider = ConfigProvider::builder()
        .with_field_definitions([FieldDefinition::new("retries")
            .default_value(3)
            .validator(int_greater_than(0))])
        .unwrap()
        .build()
        .unwrap();

    match provider.set("retries", 0) {
        Err(ConfigError::Validation { reason, .. }) => {
            assert_eq!(reason, "value 0 is not greater than 0");
        }
        other => panic!("Expected Validation error, got {:?}", other),
    }
    assert!(matches!(
        provider.set("retries", "5"),
        Err(ConfigError::Validation { .. })
    ));

    assert_eq!(provider.get_int("retries").unwrap(), 3);

    provider.set("retries", 5).unwrap();
    assert_eq!(provider.get_int("retries").unwrap(), 5);
}

#[test]
fn test_validator_applies_to_scoped_writes() {
    let provider = ConfigProvider::builder()
        .with_field_definitions(region_and_api_key())
        .unwrap()
        .build()
        .unwrap();

    assert!(provider.set_with_scope("prod", "region", "mars").is_err());
    provider.set_with_scope("prod", "region", "EU").unwrap();
    assert_eq!(provider.get_string_with_scope("prod", "region").unwrap(), "EU");
}

#[test]
fn test_composed_validators() {
    let provider = ConfigProvider::builder()
        .with_field_definitions([FieldDefinition::new("mode").validator(all_of([
            string_in_strings(true, ["fast", "safe", "slow"]),
            string_in_strings(true, ["fast", "safe"]),
        ]))])
        .unwrap()
        .build()
        .unwrap();

    provider.set("mode", "safe").unwrap();
    let err = provider.set("mode", "slow").unwrap_err();
    assert!(err.to_string().contains("[fast safe]"), "error: {err}");
    assert_eq!(provider.get("mode").unwrap(), ConfigValue::from("safe"));
}
