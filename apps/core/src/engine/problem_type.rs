//! Problem type detection.
//!
//! Matches the email against the keyword sets of the problem taxonomy.
//! Matching is a lowercase substring test with no word boundaries, so
//! inflections ("travado", "travadona") still count.

use serde::{Deserialize, Serialize};

use super::taxonomy::{ProblemCategory, TAXONOMY};

/// Keyword matches for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryMatch {
    pub category: ProblemCategory,
    /// Number of distinct keywords found
    pub score: usize,
    /// Keywords found, in table order
    pub keywords: Vec<String>,
    /// Base urgency of the category
    pub base_urgency: f32,
}

/// Result of problem type detection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProblemAnalysis {
    /// Matched categories, in enumeration order
    pub matches: Vec<CategoryMatch>,
    /// Category with the highest score (first wins on ties)
    pub primary: Option<ProblemCategory>,
    /// min(1, best_score / 3), 0 without matches
    pub confidence: f32,
}

impl ProblemAnalysis {
    /// Match entry for a category, if it matched
    pub fn get(&self, category: ProblemCategory) -> Option<&CategoryMatch> {
        self.matches.iter().find(|m| m.category == category)
    }
}

/// Keyword-based problem type detector
#[derive(Debug, Clone, Default)]
pub struct ProblemTypeDetector;

impl ProblemTypeDetector {
    pub fn new() -> Self {
        Self
    }

    /// Detect problem categories in a text
    pub fn analyze(&self, text: &str) -> ProblemAnalysis {
        let text_lower = text.to_lowercase();

        let mut matches = Vec::new();
        let mut best_score = 0;
        let mut primary = None;

        for spec in TAXONOMY.iter() {
            let keywords: Vec<String> = spec
                .keywords
                .iter()
                .filter(|keyword| text_lower.contains(*keyword))
                .map(|keyword| keyword.to_string())
                .collect();

            if keywords.is_empty() {
                continue;
            }

            let score = keywords.len();
            if score > best_score {
                best_score = score;
                primary = Some(spec.category);
            }

            matches.push(CategoryMatch {
                category: spec.category,
                score,
                keywords,
                base_urgency: spec.base_urgency,
            });
        }

        let confidence = if best_score > 0 {
            (best_score as f32 / 3.0).min(1.0)
        } else {
            0.0
        };

        ProblemAnalysis {
            matches,
            primary,
            confidence,
        }
    }
}
