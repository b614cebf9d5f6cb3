//! Property-based tests for validation rules and schemas

use crate::validation::{
    FieldError, IntegerSchema, Schema, StringSchema, ValidationResult, ValidationRules,
    validate_path_length,
};
use crate::{RouteErrorCode, RouterConfig};
use proptest::prelude::*;
use serde_json::json;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Integers inside the range pass and normalize to JSON numbers.
    #[test]
    fn prop_integer_schema_in_range(n in -1000i64..1000) {
        let output = IntegerSchema::new().min(-1000).max(999).validate(json!(n.to_string()));
        prop_assert!(output.is_valid());
        prop_assert_eq!(output.value, json!(n));
    }

    /// Integers outside the range fail with a range error.
    #[test]
    fn prop_integer_schema_out_of_range(n in 1000i64..100_000) {
        let output = IntegerSchema::new().max(999).validate(json!(n.to_string()));
        let error = output.error.unwrap();
        prop_assert_eq!(&error.errors[0].code, "range");
    }

    /// Length bounds are inclusive.
    #[test]
    fn prop_string_schema_length(s in "[a-z]{0,20}") {
        let output = StringSchema::new().min_length(5).max_length(10).validate(json!(s));
        let expected = (5..=10).contains(&s.len());
        prop_assert_eq!(output.is_valid(), expected);
    }

    /// Paths are accepted exactly up to the configured length.
    #[test]
    fn prop_path_length_limit(len in 1usize..200, limit in 1usize..200) {
        let path = "a".repeat(len);
        let config = RouterConfig::new().with_max_path_length(limit);
        let result = validate_path_length(&path, &config);
        prop_assert_eq!(result.is_ok(), len <= limit);
        if let Err(e) = result {
            prop_assert_eq!(e.code, RouteErrorCode::BadRequest);
        }
    }
}

#[test]
fn test_rules_collect_all_errors() {
    let result = ValidationRules::new()
        .required("name", "  ")
        .min_length("name", "  ", 3)
        .range("age", 200, 0, 150)
        .build();
    assert!(!result.is_valid());
    assert_eq!(result.errors().len(), 3);
    assert_eq!(result.errors_by_field()["name"].len(), 2);
}

#[test]
fn test_rules_pattern() {
    assert!(ValidationRules::new().pattern("slug", "a-b", r"^[a-z-]+$").build().is_valid());
    let result = ValidationRules::new().pattern("slug", "A B", r"^[a-z-]+$").build();
    assert_eq!(result.errors[0].code, "pattern");
    let result = ValidationRules::new().pattern("slug", "x", "(").build();
    assert_eq!(result.errors[0].code, "invalid_pattern");
}

#[test]
fn test_rules_custom() {
    let result = ValidationRules::new()
        .custom("id", || false, "must be known")
        .build();
    assert_eq!(result.errors, vec![FieldError::custom("id", "must be known")]);
}

#[test]
fn test_merge() {
    let a = ValidationResult::ok();
    let b = ValidationResult::from_errors(vec![FieldError::required("x")]);
    let merged = a.merge(b);
    assert!(!merged.is_valid());
    assert_eq!(merged.errors().len(), 1);
}

#[test]
fn test_schemas_reject_wrong_types() {
    assert!(!StringSchema::new().validate(json!(5)).is_valid());
    assert!(!IntegerSchema::new().validate(json!(true)).is_valid());
    assert!(IntegerSchema::new().validate(json!(5)).is_valid());
}
