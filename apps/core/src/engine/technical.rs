//! Technical field extraction.
//!
//! Pulls structured references (tickets, error codes, versions, environment,
//! browser, OS) out of free text with one regex per field.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// Compile patterns once at startup
static TICKET_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:ticket|chamado|caso|protocolo)\s*#?(\d+)")
        .expect("Invalid regex: ticket pattern")
});

static ERROR_CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:erro|erro code)\s*:?\s*(\d+|[A-Z0-9]+)")
        .expect("Invalid regex: error code pattern")
});

static VERSION_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:versão|v\.?)\s*([\d\.]+)").expect("Invalid regex: version pattern")
});

static ENVIRONMENT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:ambiente|env)\s*:?\s*(\w+)").expect("Invalid regex: environment pattern")
});

static BROWSER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:navegador|browser)\s*:?\s*(\w+)").expect("Invalid regex: browser pattern")
});

static OS_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:sistem operacional|so|windows|linux|mac)\s*:?\s*(\w+)")
        .expect("Invalid regex: OS pattern")
});

/// Technical references found in an email
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TechnicalFields {
    pub ticket_numbers: Vec<String>,
    pub error_codes: Vec<String>,
    pub versions: Vec<String>,
    pub environments: Vec<String>,
    pub browsers: Vec<String>,
    pub operating_systems: Vec<String>,
}

impl TechnicalFields {
    /// First ticket number, used for template substitution
    pub fn primary_ticket(&self) -> Option<&str> {
        self.ticket_numbers.first().map(String::as_str)
    }

    /// First error code
    pub fn primary_error_code(&self) -> Option<&str> {
        self.error_codes.first().map(String::as_str)
    }

    /// First environment name
    pub fn primary_environment(&self) -> Option<&str> {
        self.environments.first().map(String::as_str)
    }

    /// True when no field matched
    pub fn is_empty(&self) -> bool {
        self.ticket_numbers.is_empty()
            && self.error_codes.is_empty()
            && self.versions.is_empty()
            && self.environments.is_empty()
            && self.browsers.is_empty()
            && self.operating_systems.is_empty()
    }
}

/// Regex-based technical field extractor
#[derive(Debug, Clone, Default)]
pub struct TechnicalFieldExtractor;

impl TechnicalFieldExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Collect every capture of a single-group pattern
    fn capture_all(pattern: &Regex, text: &str) -> Vec<String> {
        pattern
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Extract all technical fields from a text
    pub fn extract(&self, text: &str) -> TechnicalFields {
        TechnicalFields {
            ticket_numbers: Self::capture_all(&TICKET_PATTERN, text),
            error_codes: Self::capture_all(&ERROR_CODE_PATTERN, text),
            versions: Self::capture_all(&VERSION_PATTERN, text),
            environments: Self::capture_all(&ENVIRONMENT_PATTERN, text),
            browsers: Self::capture_all(&BROWSER_PATTERN, text),
            operating_systems: Self::capture_all(&OS_PATTERN, text),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_and_error_code() {
        let extractor = TechnicalFieldExtractor::new();

        let fields = extractor.extract("ticket #1234, erro: ABC123");
        assert_eq!(fields.ticket_numbers, vec!["1234"]);
        assert_eq!(fields.error_codes, vec!["ABC123"]);
        assert_eq!(fields.primary_ticket(), Some("1234"));
    }

    #[test]
    fn test_all_matches_are_collected() {
        let extractor = TechnicalFieldExtractor::new();

        let fields = extractor.extract("Chamado 42 duplicado do protocolo #77");
        assert_eq!(fields.ticket_numbers, vec!["42", "77"]);
    }

    #[test]
    fn test_environment_browser_version() {
        let extractor = TechnicalFieldExtractor::new();

        let fields = extractor.extract("Ambiente: producao, navegador Chrome, versão 2.4.1");
        assert_eq!(fields.environments, vec!["producao"]);
        assert_eq!(fields.browsers, vec!["Chrome"]);
        assert_eq!(fields.versions, vec!["2.4.1"]);
    }

    #[test]
    fn test_case_insensitive() {
        let extractor = TechnicalFieldExtractor::new();

        let fields = extractor.extract("TICKET #9 no ENV: homolog");
        assert_eq!(fields.ticket_numbers, vec!["9"]);
        assert_eq!(fields.environments, vec!["homolog"]);
    }

    #[test]
    fn test_no_matches() {
        let extractor = TechnicalFieldExtractor::new();

        let fields = extractor.extract("Parabéns pelo ótimo trabalho!");
        assert!(fields.is_empty());
        assert_eq!(fields.primary_ticket(), None);
    }
}
