//! # Engine Module
//!
//! Fast, deterministic analysis of support emails and contextual reply
//! generation. Runs after the upstream classifier has labeled the email.
//!
//! ## Components
//! - `taxonomy`: Problem categories, keywords and base urgencies (data)
//! - `problem_type`: Keyword-based problem type detection
//! - `technical`: Ticket / error code / version / environment extraction
//! - `tone`: Tone distribution
//! - `temporal`: Temporal urgency scoring
//! - `similarity`: TF-IDF nearest-neighbour fallback
//! - `severity`: Severity score and tier
//! - `templates`: Reply templates per category and tier
//! - `composer`: Template rendering, recommendations, follow-up
//! - `report`: Output data structure
//! - `generator`: Main orchestrator

pub mod composer;
pub mod generator;
pub mod problem_type;
pub mod report;
pub mod severity;
pub mod similarity;
pub mod taxonomy;
pub mod technical;
pub mod templates;
pub mod temporal;
pub mod tone;

// Re-export main types for convenience
pub use composer::{FollowUp, ResponseCandidate, ResponseComposer};
pub use generator::ResponseEngine;
pub use problem_type::{CategoryMatch, ProblemAnalysis, ProblemTypeDetector};
pub use report::ResponseResult;
pub use severity::{BasicUrgency, EmailLabel, SeverityEvaluator, SeverityScore, SeverityTier};
pub use similarity::{SimilarityError, SimilarityFallbackClassifier, SimilarityMatch};
pub use taxonomy::ProblemCategory;
pub use technical::{TechnicalFieldExtractor, TechnicalFields};
pub use templates::{ResponseTier, TemplateCatalog};
pub use temporal::{TemporalUrgency, TemporalUrgencyScorer};
pub use tone::{Tone, ToneDetector, ToneProfile};
