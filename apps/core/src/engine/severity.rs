//! Severity evaluation.
//!
//! Blends the classification label, a basic keyword urgency, problem-type
//! confidence and temporal urgency into one score in [0, 1].

use serde::{Deserialize, Serialize};
use std::fmt;

use super::problem_type::{ProblemAnalysis, ProblemTypeDetector};
use super::temporal::{TemporalUrgency, TemporalUrgencyScorer};

const URGENT_KEYWORDS: &[&str] = &["urgente", "crítico", "emergência", "prioridade", "rápido"];
const IMPORTANT_KEYWORDS: &[&str] = &["necessário", "importante", "precisamos"];

/// Classification label produced by the upstream classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EmailLabel {
    #[serde(rename = "Produtivo")]
    Productive,
    #[serde(rename = "Improdutivo")]
    Unproductive,
}

impl EmailLabel {
    /// Interpret a classifier label; anything other than productive is unproductive
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "produtivo" | "productive" => EmailLabel::Productive,
            _ => EmailLabel::Unproductive,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            EmailLabel::Productive => "Produtivo",
            EmailLabel::Unproductive => "Improdutivo",
        }
    }

    pub fn is_productive(&self) -> bool {
        matches!(self, EmailLabel::Productive)
    }
}

/// Three-bucket keyword urgency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BasicUrgency {
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "média")]
    Medium,
    #[serde(rename = "baixa")]
    Low,
}

impl BasicUrgency {
    /// Any urgent keyword wins, then any important keyword
    pub fn detect(text: &str) -> Self {
        let text_lower = text.to_lowercase();

        if URGENT_KEYWORDS.iter().any(|k| text_lower.contains(k)) {
            BasicUrgency::High
        } else if IMPORTANT_KEYWORDS.iter().any(|k| text_lower.contains(k)) {
            BasicUrgency::Medium
        } else {
            BasicUrgency::Low
        }
    }

    fn weight(&self) -> f32 {
        match self {
            BasicUrgency::High => 0.4,
            BasicUrgency::Medium => 0.2,
            BasicUrgency::Low => 0.0,
        }
    }
}

/// Severity tier derived from the score
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SeverityTier {
    #[serde(rename = "baixa")]
    Low,
    #[serde(rename = "média")]
    Medium,
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "crítica")]
    Critical,
}

impl SeverityTier {
    pub fn from_score(score: f32) -> Self {
        if score >= 0.7 {
            SeverityTier::Critical
        } else if score >= 0.5 {
            SeverityTier::High
        } else if score >= 0.3 {
            SeverityTier::Medium
        } else {
            SeverityTier::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SeverityTier::Critical => "crítica",
            SeverityTier::High => "alta",
            SeverityTier::Medium => "média",
            SeverityTier::Low => "baixa",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Blended severity
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeverityScore {
    /// Score in [0, 1]
    pub score: f32,
    pub tier: SeverityTier,
}

/// Combines label, urgency and problem signals into a severity
#[derive(Debug, Clone, Default)]
pub struct SeverityEvaluator {
    problem_detector: ProblemTypeDetector,
    temporal_scorer: TemporalUrgencyScorer,
}

impl SeverityEvaluator {
    pub fn new() -> Self {
        Self {
            problem_detector: ProblemTypeDetector::new(),
            temporal_scorer: TemporalUrgencyScorer::new(),
        }
    }

    /// Evaluate severity straight from the email text
    pub fn evaluate(&self, text: &str, label: &str, urgency: BasicUrgency) -> SeverityScore {
        let analysis = self.problem_detector.analyze(text);
        let temporal = self.temporal_scorer.score(text);
        self.score(EmailLabel::from_label(label), urgency, &analysis, &temporal)
    }

    /// Evaluate severity from analyses already computed
    pub fn score(
        &self,
        label: EmailLabel,
        urgency: BasicUrgency,
        analysis: &ProblemAnalysis,
        temporal: &TemporalUrgency,
    ) -> SeverityScore {
        let mut score = 0.0;

        if label.is_productive() {
            score += 0.4;
        }

        score += urgency.weight();

        if analysis.primary.is_some() {
            score += analysis.confidence * 0.3;
        }

        // raw temporal urgency can exceed 1.0, its contribution cannot exceed 0.3
        score += (temporal.score * 0.3).min(0.3);

        let score = score.clamp(0.0, 1.0);

        SeverityScore {
            score,
            tier: SeverityTier::from_score(score),
        }
    }
}
