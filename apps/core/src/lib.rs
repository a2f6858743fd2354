//! MailTriage core library.
//!
//! Analyzes support emails once an upstream classifier has labeled them
//! "Produtivo" or "Improdutivo", scores their severity and writes a
//! contextual reply in Portuguese.

pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod logging;
pub mod service;

#[cfg(test)]
mod tests;

pub use classifier::{Classification, EmailClassifier, StaticClassifier};
pub use config::{EngineConfig, LogFormat, ServiceConfig};
pub use engine::{ResponseEngine, ResponseResult};
pub use error::AppError;
pub use service::{ServiceStatus, SuggestedResponse, TriageReport, TriageService};
