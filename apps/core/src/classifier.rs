use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::AppError;

/// Output of the upstream email classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Predicted label ("Produtivo" or "Improdutivo").
    pub label: String,
    /// Probability per class, empty when the model does not expose them.
    pub confidence: BTreeMap<String, f32>,
}

/// Defines the public interface for the email classifier.
///
/// This trait abstracts the classification model (e.g., a TF-IDF + logistic
/// regression pipeline served elsewhere), so the triage service can be driven
/// by any backend, or by a fixed label in tests and on the command line.
#[async_trait]
pub trait EmailClassifier: Send + Sync + 'static {
    /// Classifies an email text.
    async fn classify(&self, text: String) -> Result<Classification, AppError>;

    /// Whether the underlying model is loaded and usable.
    fn is_ready(&self) -> bool {
        true
    }
}

/// Classifier that always answers with the same label.
#[derive(Debug, Clone)]
pub struct StaticClassifier {
    label: String,
}

impl StaticClassifier {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

#[async_trait]
impl EmailClassifier for StaticClassifier {
    async fn classify(&self, _text: String) -> Result<Classification, AppError> {
        let mut confidence = BTreeMap::new();
        confidence.insert(self.label.clone(), 1.0);
        Ok(Classification {
            label: self.label.clone(),
            confidence,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_static_classifier() {
        let classifier = StaticClassifier::new("Produtivo");

        let classification = classifier.classify("qualquer texto".to_string()).await.unwrap();
        assert_eq!(classification.label, "Produtivo");
        assert_eq!(classification.confidence.get("Produtivo"), Some(&1.0));
        assert!(classifier.is_ready());
    }
}
