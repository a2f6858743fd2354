//! Runtime configuration.
//!
//! Tunable thresholds of the response engine and the settings of the
//! triage service, loaded from `MAILTRIAGE_*` environment variables.

use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;
use validator::Validate;

use crate::error::AppError;

/// Output format of the log subscriber
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "pretty" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}'", other)),
        }
    }
}

/// Thresholds used by the response composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct EngineConfig {
    /// Problem confidence below which the similarity fallback may be used.
    #[validate(range(min = 0.0, max = 1.0))]
    pub fallback_confidence_ceiling: f32,
    /// Minimum similarity for the fallback category to be trusted.
    #[validate(range(min = 0.0, max = 1.0))]
    pub fallback_min_similarity: f32,
    /// Frustrated-tone count above which phone contact is suggested.
    #[validate(range(max = 100))]
    pub frustration_contact_threshold: usize,
    /// Imperative-tone count above which prioritization is suggested.
    #[validate(range(max = 100))]
    pub imperative_priority_threshold: usize,
    /// Temporal urgency above which a reduced SLA is suggested.
    #[validate(range(min = 0.0, max = 2.0))]
    pub temporal_sla_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fallback_confidence_ceiling: 0.3,
            fallback_min_similarity: 0.2,
            frustration_contact_threshold: 2,
            imperative_priority_threshold: 1,
            temporal_sla_threshold: 0.6,
        }
    }
}

impl EngineConfig {
    /// Load from the environment, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            fallback_confidence_ceiling: env_or(
                "MAILTRIAGE_FALLBACK_CONFIDENCE_CEILING",
                defaults.fallback_confidence_ceiling,
            )?,
            fallback_min_similarity: env_or(
                "MAILTRIAGE_FALLBACK_MIN_SIMILARITY",
                defaults.fallback_min_similarity,
            )?,
            frustration_contact_threshold: env_or(
                "MAILTRIAGE_FRUSTRATION_THRESHOLD",
                defaults.frustration_contact_threshold,
            )?,
            imperative_priority_threshold: env_or(
                "MAILTRIAGE_IMPERATIVE_THRESHOLD",
                defaults.imperative_priority_threshold,
            )?,
            temporal_sla_threshold: env_or(
                "MAILTRIAGE_TEMPORAL_SLA_THRESHOLD",
                defaults.temporal_sla_threshold,
            )?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Settings of the triage service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct ServiceConfig {
    /// Upper bound on one classifier call, in milliseconds.
    #[validate(range(min = 1, max = 60000))]
    pub classify_timeout_ms: u64,
    /// Number of reply candidates requested from the engine.
    #[validate(range(min = 1, max = 10))]
    pub max_options: usize,
    pub log_format: LogFormat,
    #[validate(nested)]
    pub engine: EngineConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            classify_timeout_ms: 5000,
            max_options: 3,
            log_format: LogFormat::Text,
            engine: EngineConfig::default(),
        }
    }
}

impl ServiceConfig {
    /// Load from the environment, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            classify_timeout_ms: env_or(
                "MAILTRIAGE_CLASSIFY_TIMEOUT_MS",
                defaults.classify_timeout_ms,
            )?,
            max_options: env_or("MAILTRIAGE_MAX_OPTIONS", defaults.max_options)?,
            log_format: env_or("MAILTRIAGE_LOG_FORMAT", defaults.log_format)?,
            engine: EngineConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }
}

/// Parse an environment variable, or return `default` when it is unset
fn env_or<T>(key: &str, default: T) -> Result<T, AppError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        Err(env::VarError::NotPresent) => Ok(default),
        Err(e) => Err(AppError::Config(format!("{}: {}", key, e))),
    }
}
