//! Config Tests
//!
//! Environment loading of `ServiceConfig` and `EngineConfig`.

use crate::config::{EngineConfig, LogFormat, ServiceConfig};
use crate::error::AppError;

const ALL_VARS: [&str; 8] = [
    "MAILTRIAGE_CLASSIFY_TIMEOUT_MS",
    "MAILTRIAGE_MAX_OPTIONS",
    "MAILTRIAGE_LOG_FORMAT",
    "MAILTRIAGE_FALLBACK_CONFIDENCE_CEILING",
    "MAILTRIAGE_FALLBACK_MIN_SIMILARITY",
    "MAILTRIAGE_FRUSTRATION_THRESHOLD",
    "MAILTRIAGE_IMPERATIVE_THRESHOLD",
    "MAILTRIAGE_TEMPORAL_SLA_THRESHOLD",
];

#[test]
fn test_defaults_when_unset() {
    temp_env::with_vars_unset(ALL_VARS, || {
        let config = ServiceConfig::from_env().unwrap();
        assert_eq!(config, ServiceConfig::default());
    });
}

#[test]
fn test_overrides_from_env() {
    temp_env::with_vars(
        [
            ("MAILTRIAGE_CLASSIFY_TIMEOUT_MS", Some("1500")),
            ("MAILTRIAGE_MAX_OPTIONS", Some("5")),
            ("MAILTRIAGE_LOG_FORMAT", Some("json")),
            ("MAILTRIAGE_FRUSTRATION_THRESHOLD", Some("4")),
            ("MAILTRIAGE_TEMPORAL_SLA_THRESHOLD", Some("0.9")),
        ],
        || {
            let config = ServiceConfig::from_env().unwrap();
            assert_eq!(config.classify_timeout_ms, 1500);
            assert_eq!(config.max_options, 5);
            assert_eq!(config.log_format, LogFormat::Json);
            assert_eq!(config.engine.frustration_contact_threshold, 4);
            assert_eq!(config.engine.temporal_sla_threshold, 0.9);
            assert_eq!(
                config.engine.imperative_priority_threshold,
                EngineConfig::default().imperative_priority_threshold
            );
        },
    );
}

#[test]
fn test_unparsable_value_is_config_error() {
    temp_env::with_var("MAILTRIAGE_MAX_OPTIONS", Some("three"), || {
        let result = ServiceConfig::from_env();
        assert!(matches!(result, Err(AppError::Config(_))));
    });

    temp_env::with_var("MAILTRIAGE_LOG_FORMAT", Some("xml"), || {
        let result = ServiceConfig::from_env();
        assert!(matches!(result, Err(AppError::Config(_))));
    });
}

#[test]
fn test_out_of_range_value_is_validation_error() {
    temp_env::with_var("MAILTRIAGE_CLASSIFY_TIMEOUT_MS", Some("0"), || {
        let result = ServiceConfig::from_env();
        assert!(matches!(result, Err(AppError::Validation(_))));
    });

    temp_env::with_var("MAILTRIAGE_FALLBACK_MIN_SIMILARITY", Some("1.5"), || {
        let result = EngineConfig::from_env();
        assert!(matches!(result, Err(AppError::Validation(_))));
    });
}
