//! Temporal urgency scoring.
//!
//! Two independent signals: time-pressure phrases ("hoje", "agora", "há 3
//! dias") and overdue indicators ("vencido", "atrasado"). The summed score is
//! left unclamped; the severity formula bounds its contribution.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static URGENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(hoje|agora|imediatamente|urgente|pressa|breve|ontem|há \d+ dias?)\b")
        .expect("Invalid regex: temporal urgency phrases")
});

const OVERDUE_INDICATORS: &[&str] = &["atrasado", "vencido", "expirou", "passou"];

/// Weight of each time-pressure phrase
const PHRASE_WEIGHT: f32 = 0.3;
/// Cap on the phrase signal
const PHRASE_CAP: f32 = 1.0;
/// Flat bonus when something is overdue
const OVERDUE_BONUS: f32 = 0.3;

/// Time-related urgency of an email
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TemporalUrgency {
    /// Raw score, may exceed 1.0 when phrases and overdue indicators combine
    pub score: f32,
    /// Time-pressure phrases found, in order
    pub references: Vec<String>,
    /// Whether an overdue indicator was present
    pub overdue: bool,
}

/// Keyword-based temporal urgency scorer
#[derive(Debug, Clone, Default)]
pub struct TemporalUrgencyScorer;

impl TemporalUrgencyScorer {
    pub fn new() -> Self {
        Self
    }

    pub fn score(&self, text: &str) -> TemporalUrgency {
        let text_lower = text.to_lowercase();

        let references: Vec<String> = URGENCY_PATTERN
            .find_iter(&text_lower)
            .map(|m| m.as_str().to_string())
            .collect();

        let mut score = (references.len() as f32 * PHRASE_WEIGHT).min(PHRASE_CAP);

        let overdue = OVERDUE_INDICATORS
            .iter()
            .any(|indicator| text_lower.contains(indicator));
        if overdue {
            score += OVERDUE_BONUS;
        }

        TemporalUrgency {
            score,
            references,
            overdue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_phrase() {
        let scorer = TemporalUrgencyScorer::new();

        let urgency = scorer.score("Preciso disso hoje");
        assert_eq!(urgency.references, vec!["hoje"]);
        assert!((urgency.score - 0.3).abs() < 1e-6);
        assert!(!urgency.overdue);
    }

    #[test]
    fn test_relative_day_reference() {
        let scorer = TemporalUrgencyScorer::new();

        let urgency = scorer.score("Estou esperando há 3 dias");
        assert_eq!(urgency.references, vec!["há 3 dias"]);
    }

    #[test]
    fn test_phrase_signal_is_capped() {
        let scorer = TemporalUrgencyScorer::new();

        let urgency = scorer.score("hoje, agora, imediatamente, urgente, com pressa");
        assert_eq!(urgency.references.len(), 5);
        assert_eq!(urgency.score, 1.0);
    }

    #[test]
    fn test_overdue_is_not_clamped() {
        let scorer = TemporalUrgencyScorer::new();

        let urgency =
            scorer.score("hoje, agora, imediatamente, urgente: o prazo venceu e está atrasado");
        assert!(urgency.overdue);
        assert!((urgency.score - 1.3).abs() < 1e-6);
    }

    #[test]
    fn test_no_urgency() {
        let scorer = TemporalUrgencyScorer::new();

        let urgency = scorer.score("Segue o relatório mensal");
        assert_eq!(urgency.score, 0.0);
        assert!(urgency.references.is_empty());
    }
}
