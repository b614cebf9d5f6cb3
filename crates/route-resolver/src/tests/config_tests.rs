//! Configuration tests - Property-based tests for RouterConfig
//!
//! Tests that configuration defaults are sensible and validation works correctly.

use proptest::prelude::*;

use crate::config::{ConfigValidationError, DEFAULT_MAX_PATH_LENGTH, RouterConfig};
use crate::logging::DEFAULT_SLOW_THRESHOLD_MS;
use crate::{RouteErrorCode, Router};

// =============================================================================
// Property-Based Tests
// =============================================================================

proptest! {
    /// Any non-zero path limit is a valid configuration.
    #[test]
    fn prop_nonzero_path_limit_is_valid(
        max_path_length in 1usize..1_000_000,
        case_insensitive in any::<bool>(),
        threshold in any::<u64>(),
    ) {
        let config = RouterConfig::new()
            .with_max_path_length(max_path_length)
            .with_case_insensitive(case_insensitive)
            .with_slow_resolve_threshold(threshold);

        prop_assert!(config.validate().is_ok());
        let router = Router::with_config(config.clone());
        prop_assert!(router.is_ok());
        let router = router.unwrap();
        prop_assert_eq!(router.config(), &config);
    }

    /// Configuration survives a JSON round trip.
    #[test]
    fn prop_config_serde_round_trip(
        max_path_length in 1usize..100_000,
        log_candidates in any::<bool>(),
    ) {
        let config = RouterConfig::new()
            .with_max_path_length(max_path_length)
            .with_candidate_logging(log_candidates);

        let json = serde_json::to_string(&config).unwrap();
        let back: RouterConfig = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, config);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[test]
fn test_defaults() {
    let config = RouterConfig::default();
    assert!(!config.case_insensitive);
    assert_eq!(config.max_path_length, DEFAULT_MAX_PATH_LENGTH);
    assert_eq!(config.slow_resolve_threshold_ms, DEFAULT_SLOW_THRESHOLD_MS);
    assert!(!config.log_candidates);
    assert!(config.validate().is_ok());
}

#[test]
fn test_zero_path_limit_rejected() {
    let config = RouterConfig::new().with_max_path_length(0);
    assert_eq!(
        config.validate(),
        Err(ConfigValidationError::InvalidMaxPathLength)
    );

    let err = Router::with_config(config).unwrap_err();
    assert_eq!(err.code, RouteErrorCode::BadRequest);
    assert!(err.message.contains("max_path_length"));
}

#[test]
fn test_missing_fields_use_defaults() {
    let config: RouterConfig = serde_json::from_str(r#"{"case_insensitive": true}"#).unwrap();
    assert!(config.case_insensitive);
    assert_eq!(config.max_path_length, DEFAULT_MAX_PATH_LENGTH);
}

#[test]
fn test_constructors_set_case_sensitivity() {
    assert!(!Router::new().config().case_insensitive);
    assert!(Router::case_insensitive().config().case_insensitive);
}
