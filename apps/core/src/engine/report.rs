//! Response Result - Output structure of the response engine.
//!
//! Carries the reply candidates together with every intermediate analysis,
//! so a caller can explain why a reply was chosen.

use serde::{Deserialize, Serialize};

use super::composer::ResponseCandidate;
use super::problem_type::ProblemAnalysis;
use super::severity::{BasicUrgency, SeverityScore, SeverityTier};
use super::similarity::SimilarityMatch;
use super::taxonomy::ProblemCategory;
use super::technical::TechnicalFields;
use super::templates::ResponseTier;
use super::temporal::TemporalUrgency;
use super::tone::ToneProfile;

/// Complete result of one `generate` call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseResult {
    /// Reply candidates, best first
    pub candidates: Vec<ResponseCandidate>,

    /// Keyword-based problem detection
    pub problem_analysis: ProblemAnalysis,

    /// Extracted technical references
    pub technical_fields: TechnicalFields,

    /// Tone distribution
    pub tone_profile: ToneProfile,

    /// Time-pressure signals
    pub temporal_urgency: TemporalUrgency,

    /// Nearest-neighbour category guess
    pub similarity: SimilarityMatch,

    /// Keyword urgency bucket
    pub basic_urgency: BasicUrgency,

    /// Blended severity score and tier
    pub severity: SeverityScore,

    /// Category the reply was written for
    pub category: ProblemCategory,

    /// Template tier used
    pub response_tier: ResponseTier,
}

impl ResponseResult {
    /// Severity tier of the email
    pub fn severity_tier(&self) -> SeverityTier {
        self.severity.tier
    }

    /// The best candidate, if any was requested
    pub fn primary_candidate(&self) -> Option<&ResponseCandidate> {
        self.candidates.first()
    }

    /// Get a summary for logging
    pub fn summary(&self) -> String {
        format!(
            "Category: {} (detected: {}, {:.0}%), Severity: {} ({:.2}), Tone: {}, Tickets: {}, Candidates: {}",
            self.category,
            self.problem_analysis
                .primary
                .map(|c| c.id())
                .unwrap_or("none"),
            self.problem_analysis.confidence * 100.0,
            self.severity.tier,
            self.severity.score,
            self.tone_profile
                .dominant
                .map(|t| t.label())
                .unwrap_or("none"),
            self.technical_fields.ticket_numbers.len(),
            self.candidates.len()
        )
    }
}
