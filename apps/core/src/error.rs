use thiserror::Error;

/// Crate-wide error type for the triage service and its configuration.
///
/// The response engine itself never fails; these variants cover the layers
/// around it (input validation, configuration, the upstream classifier).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AppError {
    /// Represents data validation errors (e.g., empty email text, out-of-range settings).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Represents configuration-related errors (e.g., an unparsable environment variable).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Represents failures reported by the upstream email classifier.
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(format!("Operation timed out: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Validation(format!("JSON error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(format!("Validation errors: {}", err))
    }
}
