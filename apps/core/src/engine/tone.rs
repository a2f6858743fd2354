//! Tone detection.
//!
//! Whole-word keyword counts for five rhetorical tones.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

/// Rhetorical tone of an email
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Tone {
    #[serde(rename = "formal")]
    Formal,
    #[serde(rename = "informal")]
    Informal,
    #[serde(rename = "frustrado")]
    Frustrated,
    #[serde(rename = "cortês")]
    Courteous,
    #[serde(rename = "imperativo")]
    Imperative,
}

impl Tone {
    /// All tones in enumeration order
    pub const ALL: [Tone; 5] = [
        Tone::Formal,
        Tone::Informal,
        Tone::Frustrated,
        Tone::Courteous,
        Tone::Imperative,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tone::Formal => "formal",
            Tone::Informal => "informal",
            Tone::Frustrated => "frustrado",
            Tone::Courteous => "cortês",
            Tone::Imperative => "imperativo",
        }
    }

    fn pattern(&self) -> &'static Regex {
        match self {
            Tone::Formal => &FORMAL_PATTERN,
            Tone::Informal => &INFORMAL_PATTERN,
            Tone::Frustrated => &FRUSTRATED_PATTERN,
            Tone::Courteous => &COURTEOUS_PATTERN,
            Tone::Imperative => &IMPERATIVE_PATTERN,
        }
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

static FORMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(prezado|estimado|prezadíssim|cumprimento)\b")
        .expect("Invalid regex: formal tone")
});

static INFORMAL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(oi|olá|galera|pessoal|fala)\b").expect("Invalid regex: informal tone")
});

static FRUSTRATED_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(frustrado|insatisfeito|desapontado|decepcionado)\b")
        .expect("Invalid regex: frustrated tone")
});

static COURTEOUS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(por favor|obrigado|agradeço|poderia|teria|gostaria)\b")
        .expect("Invalid regex: courteous tone")
});

static IMPERATIVE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(você deve|precisa|necessário|é preciso|exijo|quero)\b")
        .expect("Invalid regex: imperative tone")
});

/// Tone distribution of an email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneProfile {
    /// Match count per tone
    pub counts: BTreeMap<Tone, usize>,
    /// Tone with the highest count, None when nothing matched
    pub dominant: Option<Tone>,
    /// dominant count / max(total, 1)
    pub confidence: f32,
}

impl ToneProfile {
    pub fn count(&self, tone: Tone) -> usize {
        self.counts.get(&tone).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

/// Keyword-frequency tone detector
#[derive(Debug, Clone, Default)]
pub struct ToneDetector;

impl ToneDetector {
    pub fn new() -> Self {
        Self
    }

    pub fn detect(&self, text: &str) -> ToneProfile {
        let text_lower = text.to_lowercase();

        let counts: BTreeMap<Tone, usize> = Tone::ALL
            .iter()
            .map(|tone| (*tone, tone.pattern().find_iter(&text_lower).count()))
            .collect();

        let mut dominant = None;
        let mut best_count = 0;
        for tone in Tone::ALL {
            let count = counts.get(&tone).copied().unwrap_or(0);
            if count > best_count {
                best_count = count;
                dominant = Some(tone);
            }
        }

        let total: usize = counts.values().sum();
        let confidence = best_count as f32 / total.max(1) as f32;

        ToneProfile {
            counts,
            dominant,
            confidence,
        }
    }
}
