//! Response Engine - Main orchestrator of the engine module.
//!
//! Runs the independent analyses, scores severity, and hands everything to
//! the composer:
//! 1. Problem type, technical fields, tone, temporal urgency, similarity
//! 2. Basic urgency + severity
//! 3. Template selection and rendering
//!
//! The engine holds no per-request state. Build it once and share it.

use tracing::debug;

use super::composer::{CompositionInput, ResponseComposer};
use super::problem_type::ProblemTypeDetector;
use super::report::ResponseResult;
use super::severity::{BasicUrgency, EmailLabel, SeverityEvaluator};
use super::similarity::SimilarityFallbackClassifier;
use super::technical::TechnicalFieldExtractor;
use super::templates::TemplateCatalog;
use super::temporal::TemporalUrgencyScorer;
use super::tone::ToneDetector;
use crate::config::EngineConfig;
use crate::error::AppError;
use validator::Validate;

/// Response generation engine
#[derive(Debug, Clone)]
pub struct ResponseEngine {
    problem_detector: ProblemTypeDetector,
    technical_extractor: TechnicalFieldExtractor,
    tone_detector: ToneDetector,
    temporal_scorer: TemporalUrgencyScorer,
    similarity: SimilarityFallbackClassifier,
    severity_evaluator: SeverityEvaluator,
    composer: ResponseComposer,
}

impl Default for ResponseEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseEngine {
    /// Create an engine with the built-in taxonomy, templates and thresholds
    pub fn new() -> Self {
        Self::from_parts(
            EngineConfig::default(),
            TemplateCatalog::builtin(),
            SimilarityFallbackClassifier::new(),
        )
    }

    /// Create an engine with custom thresholds
    pub fn with_config(config: EngineConfig) -> Result<Self, AppError> {
        config.validate()?;
        Ok(Self::from_parts(
            config,
            TemplateCatalog::builtin(),
            SimilarityFallbackClassifier::new(),
        ))
    }

    /// Assemble an engine from explicit components
    pub fn from_parts(
        config: EngineConfig,
        catalog: TemplateCatalog,
        similarity: SimilarityFallbackClassifier,
    ) -> Self {
        Self {
            problem_detector: ProblemTypeDetector::new(),
            technical_extractor: TechnicalFieldExtractor::new(),
            tone_detector: ToneDetector::new(),
            temporal_scorer: TemporalUrgencyScorer::new(),
            similarity,
            severity_evaluator: SeverityEvaluator::new(),
            composer: ResponseComposer::new(catalog, config),
        }
    }

    /// Analyze an email and produce up to `max_options` reply candidates
    pub fn generate(&self, text: &str, label: &str, max_options: usize) -> ResponseResult {
        let email_label = EmailLabel::from_label(label);

        let problem_analysis = self.problem_detector.analyze(text);
        let technical_fields = self.technical_extractor.extract(text);
        let tone_profile = self.tone_detector.detect(text);
        let temporal_urgency = self.temporal_scorer.score(text);
        let similarity = self.similarity.nearest(text);

        let basic_urgency = BasicUrgency::detect(text);
        let severity = self.severity_evaluator.score(
            email_label,
            basic_urgency,
            &problem_analysis,
            &temporal_urgency,
        );

        let input = CompositionInput {
            analysis: &problem_analysis,
            fields: &technical_fields,
            tone: &tone_profile,
            temporal: &temporal_urgency,
            similarity: &similarity,
            severity: &severity,
            label: email_label,
        };
        let composition = self.composer.compose(&input, max_options);

        let result = ResponseResult {
            candidates: composition.candidates,
            problem_analysis,
            technical_fields,
            tone_profile,
            temporal_urgency,
            similarity,
            basic_urgency,
            severity,
            category: composition.category,
            response_tier: composition.response_tier,
        };

        debug!("Generated response: {}", result.summary());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::severity::SeverityTier;
    use crate::engine::taxonomy::ProblemCategory;

    #[test]
    fn test_basic_generation() {
        let engine = ResponseEngine::new();

        let result = engine.generate("Preciso de acesso ao Jira, por favor", "Produtivo", 3);

        assert_eq!(result.problem_analysis.primary, Some(ProblemCategory::Access));
        assert_eq!(result.category, ProblemCategory::Access);
        assert_eq!(result.candidates.len(), 1);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = EngineConfig {
            fallback_min_similarity: 2.0,
            ..Default::default()
        };
        assert!(matches!(
            ResponseEngine::with_config(config),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn test_custom_thresholds_change_recommendations() {
        let config = EngineConfig {
            temporal_sla_threshold: 0.2,
            ..Default::default()
        };
        let engine = ResponseEngine::with_config(config).unwrap();

        let result = engine.generate("Preciso disso hoje", "Improdutivo", 1);
        let recommendations = &result.candidates[0].recommendations;
        assert_eq!(recommendations, &vec!["✓ Solicitar aprovação de SLA reduzido".to_string()]);
    }

    #[test]
    fn test_unproductive_greeting_is_low() {
        let engine = ResponseEngine::new();

        let result = engine.generate("Feliz natal a todos!", "Improdutivo", 3);
        assert_eq!(result.severity_tier(), SeverityTier::Low);
        assert!(result.primary_candidate().is_some());
    }
}
