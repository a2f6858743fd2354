//! Response composition.
//!
//! Picks the category and template, resolves placeholders, and attaches
//! recommendations and a follow-up schedule to the reply candidate.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::problem_type::ProblemAnalysis;
use super::severity::{EmailLabel, SeverityScore, SeverityTier};
use super::similarity::SimilarityMatch;
use super::taxonomy::ProblemCategory;
use super::technical::TechnicalFields;
use super::temporal::TemporalUrgency;
use super::templates::{ResponseTier, TemplateCatalog, PLACEHOLDERS};
use super::tone::{Tone, ToneProfile};
use crate::config::EngineConfig;

/// Category used when nothing better is known
pub const DEFAULT_CATEGORY: ProblemCategory = ProblemCategory::Access;

const ERROR_CODE_FALLBACK: &str = "identificado";
const STATUS_TEXT: &str = "indisponível";

const REC_SECURITY_ESCALATION: &str =
    "✓ Escalar para equipe de segurança da informação IMEDIATAMENTE";
const REC_CHECK_SYSTEMS: &str = "✓ Verificar status dos sistemas críticos";
const REC_NOTIFY_AREAS: &str = "✓ Notificar todas as áreas afetadas";
const REC_PHONE_CONTACT: &str = "✓ Considerar contato telefônico para melhor relacionamento";
const REC_PRIORITIZE: &str = "✓ Priorizar este atendimento";
const REC_REDUCED_SLA: &str = "✓ Solicitar aprovação de SLA reduzido";
const REC_CLOSE_FOLLOW_UP: &str = "✓ Manter acompanhamento próximo durante resolução";

/// When and about what to send the next update
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUp {
    /// Human-readable interval ("30 minutos", "2 horas", "24 horas")
    pub interval: String,
    /// Update subject
    pub subject: String,
    /// First ticket number or "N/A"
    pub ticket: String,
    /// Interval in minutes
    pub interval_minutes: i64,
}

impl FollowUp {
    pub fn for_severity(
        category: ProblemCategory,
        tier: SeverityTier,
        fields: &TechnicalFields,
    ) -> Self {
        let (interval, interval_minutes) = match tier {
            SeverityTier::Critical => ("30 minutos", 30),
            SeverityTier::High => ("2 horas", 120),
            _ => ("24 horas", 24 * 60),
        };

        Self {
            interval: interval.to_string(),
            subject: format!("Atualização sobre {}", category.id()),
            ticket: fields.primary_ticket().unwrap_or("N/A").to_string(),
            interval_minutes,
        }
    }

    pub fn interval_duration(&self) -> Duration {
        Duration::minutes(self.interval_minutes)
    }

    /// Instant of the next update, counted from `from`
    pub fn next_update_after(&self, from: DateTime<Utc>) -> DateTime<Utc> {
        from + self.interval_duration()
    }
}

/// One suggested reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseCandidate {
    pub title: String,
    /// Reply body, every placeholder resolved
    pub text: String,
    /// Equals the severity score
    pub confidence: f32,
    pub recommendations: Vec<String>,
    pub follow_up: FollowUp,
    pub severity: SeverityTier,
}

/// Everything the composer needs from the analysis stage
#[derive(Debug, Clone, Copy)]
pub struct CompositionInput<'a> {
    pub analysis: &'a ProblemAnalysis,
    pub fields: &'a TechnicalFields,
    pub tone: &'a ToneProfile,
    pub temporal: &'a TemporalUrgency,
    pub similarity: &'a SimilarityMatch,
    pub severity: &'a SeverityScore,
    pub label: EmailLabel,
}

/// Output of the composer
#[derive(Debug, Clone, PartialEq)]
pub struct Composition {
    pub category: ProblemCategory,
    pub response_tier: ResponseTier,
    pub candidates: Vec<ResponseCandidate>,
}

/// Template-driven reply composer
#[derive(Debug, Clone)]
pub struct ResponseComposer {
    catalog: TemplateCatalog,
    config: EngineConfig,
}

impl Default for ResponseComposer {
    fn default() -> Self {
        Self::new(TemplateCatalog::builtin(), EngineConfig::default())
    }
}

impl ResponseComposer {
    pub fn new(catalog: TemplateCatalog, config: EngineConfig) -> Self {
        Self { catalog, config }
    }

    /// Detected primary category, else a confident fallback guess, else the default
    pub fn resolve_category(
        &self,
        analysis: &ProblemAnalysis,
        similarity: &SimilarityMatch,
    ) -> ProblemCategory {
        if let Some(primary) = analysis.primary {
            return primary;
        }

        if analysis.confidence < self.config.fallback_confidence_ceiling
            && similarity.similarity >= self.config.fallback_min_similarity
        {
            if let Some(category) = similarity.category {
                debug!(
                    "Using similarity fallback category {} ({:.2})",
                    category, similarity.similarity
                );
                return category;
            }
        }

        DEFAULT_CATEGORY
    }

    /// Resolve every placeholder of a template
    pub fn render(
        &self,
        template: &str,
        fields: &TechnicalFields,
        category: ProblemCategory,
        severity: SeverityTier,
    ) -> String {
        let mut text = match fields.primary_ticket() {
            Some(ticket) => template.replace("{ticket}", &format!("Ticket #{}", ticket)),
            None => drop_lines_containing(template, "{ticket}"),
        };

        text = text.replace("{sistema}", &category.display_name());
        text = text.replace(
            "{codigo_erro}",
            fields.primary_error_code().unwrap_or(ERROR_CODE_FALLBACK),
        );

        text = match fields.primary_environment() {
            Some(environment) => text.replace("{ambiente}", environment),
            None => drop_lines_containing(&text, "{ambiente}"),
        };

        text = text.replace("{prazo}", deadline(severity));
        text = text.replace("{status}", STATUS_TEXT);

        if let Some(leftover) = PLACEHOLDERS.iter().find(|p| text.contains(*p)) {
            // only reachable if an extracted value itself contains a placeholder
            warn!("Placeholder {} survived rendering, removing it", leftover);
            for placeholder in PLACEHOLDERS {
                text = text.replace(placeholder, "");
            }
        }

        text
    }

    /// Recommendations, in fixed priority order
    pub fn recommendations(&self, input: &CompositionInput<'_>) -> Vec<String> {
        let mut recommendations = Vec::new();

        if input.analysis.primary == Some(ProblemCategory::Security) {
            recommendations.push(REC_SECURITY_ESCALATION.to_string());
        }

        if input.analysis.primary == Some(ProblemCategory::Unavailability) {
            recommendations.push(REC_CHECK_SYSTEMS.to_string());
            recommendations.push(REC_NOTIFY_AREAS.to_string());
        }

        if input.tone.count(Tone::Frustrated) > self.config.frustration_contact_threshold {
            recommendations.push(REC_PHONE_CONTACT.to_string());
        }

        if input.tone.count(Tone::Imperative) > self.config.imperative_priority_threshold {
            recommendations.push(REC_PRIORITIZE.to_string());
        }

        if input.temporal.score > self.config.temporal_sla_threshold {
            recommendations.push(REC_REDUCED_SLA.to_string());
        }

        if input.label.is_productive() {
            recommendations.push(REC_CLOSE_FOLLOW_UP.to_string());
        }

        recommendations
    }

    /// Build the reply candidates, at most `max_options`
    pub fn compose(&self, input: &CompositionInput<'_>, max_options: usize) -> Composition {
        let category = self.resolve_category(input.analysis, input.similarity);
        let response_tier = ResponseTier::for_severity(input.severity.tier);

        let template = self.catalog.lookup(category, response_tier);
        let text = self.render(template, input.fields, category, input.severity.tier);

        let primary = ResponseCandidate {
            title: format!(
                "Resposta Contextualizada - {}",
                input.severity.tier.label().to_uppercase()
            ),
            text,
            confidence: input.severity.score,
            recommendations: self.recommendations(input),
            follow_up: FollowUp::for_severity(category, input.severity.tier, input.fields),
            severity: input.severity.tier,
        };

        let mut candidates = vec![primary];
        candidates.truncate(max_options);

        Composition {
            category,
            response_tier,
            candidates,
        }
    }
}

/// Resolution deadline promised for a severity
fn deadline(severity: SeverityTier) -> &'static str {
    match severity {
        SeverityTier::Critical => "1-2 horas",
        SeverityTier::High => "4-8 horas",
        _ => "1-2 dias úteis",
    }
}

/// Remove every line that mentions `placeholder`
fn drop_lines_containing(text: &str, placeholder: &str) -> String {
    text.split('\n')
        .filter(|line| !line.contains(placeholder))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::temporal::TemporalUrgencyScorer;
    use crate::engine::tone::ToneDetector;
    use chrono::TimeZone;

    fn fields_with_ticket(ticket: &str) -> TechnicalFields {
        TechnicalFields {
            ticket_numbers: vec![ticket.to_string()],
            ..Default::default()
        }
    }

    #[test]
    fn test_render_with_all_fields() {
        let composer = ResponseComposer::default();
        let fields = TechnicalFields {
            ticket_numbers: vec!["88".to_string()],
            error_codes: vec!["E42".to_string()],
            environments: vec!["producao".to_string()],
            ..Default::default()
        };
        let template =
            TemplateCatalog::builtin().lookup(ProblemCategory::SystemError, ResponseTier::High);

        let text = composer.render(
            template,
            &fields,
            ProblemCategory::SystemError,
            SeverityTier::Critical,
        );
        assert!(text.contains("Identificamos o erro E42 em erro sistema."));
        assert!(text.contains("Esperamos resolver em 1-2 horas."));
        assert!(text.contains("Referência: Ticket #88"));
        assert!(text.contains("Ambiente: producao"));
    }

    #[test]
    fn test_render_drops_lines_without_values() {
        let composer = ResponseComposer::default();
        let template =
            TemplateCatalog::builtin().lookup(ProblemCategory::SystemError, ResponseTier::High);

        let text = composer.render(
            template,
            &TechnicalFields::default(),
            ProblemCategory::SystemError,
            SeverityTier::High,
        );
        assert!(!text.contains("Referência"));
        assert!(!text.contains("Ambiente"));
        assert!(text.contains("o erro identificado em"));
        assert!(text.contains("4-8 horas"));
        assert!(text.ends_with("\n\nAtenciosamente,"));
    }

    #[test]
    fn test_render_status_and_deadline_defaults() {
        let composer = ResponseComposer::default();

        let text = composer.render(
            "{sistema} está {status}, prazo {prazo}",
            &TechnicalFields::default(),
            ProblemCategory::Unavailability,
            SeverityTier::Medium,
        );
        assert_eq!(text, "indisponibilidade está indisponível, prazo 1-2 dias úteis");
    }

    #[test]
    fn test_resolve_category_prefers_detection() {
        let composer = ResponseComposer::default();
        let analysis = ProblemAnalysis {
            matches: vec![],
            primary: Some(ProblemCategory::Data),
            confidence: 1.0 / 3.0,
        };
        let similarity = SimilarityMatch {
            category: Some(ProblemCategory::Security),
            similarity: 0.9,
        };

        assert_eq!(composer.resolve_category(&analysis, &similarity), ProblemCategory::Data);
    }

    #[test]
    fn test_resolve_category_uses_confident_fallback() {
        let composer = ResponseComposer::default();
        let similarity = SimilarityMatch {
            category: Some(ProblemCategory::Performance),
            similarity: 0.35,
        };

        assert_eq!(
            composer.resolve_category(&ProblemAnalysis::default(), &similarity),
            ProblemCategory::Performance
        );
    }

    #[test]
    fn test_resolve_category_defaults_to_access() {
        let composer = ResponseComposer::default();
        let weak = SimilarityMatch {
            category: Some(ProblemCategory::Performance),
            similarity: 0.1,
        };

        assert_eq!(
            composer.resolve_category(&ProblemAnalysis::default(), &weak),
            ProblemCategory::Access
        );
        assert_eq!(
            composer.resolve_category(&ProblemAnalysis::default(), &SimilarityMatch::none()),
            ProblemCategory::Access
        );
    }

    #[test]
    fn test_follow_up_schedule() {
        let follow_up = FollowUp::for_severity(
            ProblemCategory::Unavailability,
            SeverityTier::Critical,
            &fields_with_ticket("555"),
        );
        assert_eq!(follow_up.interval, "30 minutos");
        assert_eq!(follow_up.subject, "Atualização sobre indisponibilidade");
        assert_eq!(follow_up.ticket, "555");

        let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
        let next = follow_up.next_update_after(start);
        assert_eq!(next, Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap());

        let low = FollowUp::for_severity(
            ProblemCategory::Data,
            SeverityTier::Low,
            &TechnicalFields::default(),
        );
        assert_eq!(low.interval, "24 horas");
        assert_eq!(low.ticket, "N/A");
        assert_eq!(low.interval_duration(), Duration::hours(24));
    }

    #[test]
    fn test_candidates_are_truncated() {
        let composer = ResponseComposer::default();
        let analysis = ProblemAnalysis::default();
        let fields = TechnicalFields::default();
        let tone = ToneDetector::new().detect("");
        let temporal = TemporalUrgency::default();
        let similarity = SimilarityMatch::none();
        let severity = SeverityScore {
            score: 0.0,
            tier: SeverityTier::Low,
        };
        let input = CompositionInput {
            analysis: &analysis,
            fields: &fields,
            tone: &tone,
            temporal: &temporal,
            similarity: &similarity,
            severity: &severity,
            label: EmailLabel::Unproductive,
        };

        assert_eq!(composer.compose(&input, 3).candidates.len(), 1);
        assert!(composer.compose(&input, 0).candidates.is_empty());

        let composition = composer.compose(&input, 1);
        assert_eq!(composition.category, ProblemCategory::Access);
        assert_eq!(composition.response_tier, ResponseTier::Low);
        assert_eq!(composition.candidates[0].title, "Resposta Contextualizada - BAIXA");
        assert!(composition.candidates[0].recommendations.is_empty());
    }

    fn recommendations_for(text: &str) -> Vec<String> {
        let composer = ResponseComposer::default();
        let analysis = ProblemAnalysis::default();
        let fields = TechnicalFields::default();
        let tone = ToneDetector::new().detect(text);
        let temporal = TemporalUrgencyScorer::new().score(text);
        let similarity = SimilarityMatch::none();
        let severity = SeverityScore {
            score: 0.0,
            tier: SeverityTier::Low,
        };
        let input = CompositionInput {
            analysis: &analysis,
            fields: &fields,
            tone: &tone,
            temporal: &temporal,
            similarity: &similarity,
            severity: &severity,
            label: EmailLabel::Unproductive,
        };
        composer.recommendations(&input)
    }

    #[test]
    fn test_phone_contact_needs_more_than_two_frustrated_words() {
        assert!(recommendations_for("Estou frustrado e insatisfeito").is_empty());

        assert_eq!(
            recommendations_for("Estou frustrado, insatisfeito e decepcionado"),
            vec![REC_PHONE_CONTACT.to_string()]
        );
    }

    #[test]
    fn test_prioritize_needs_more_than_one_imperative() {
        assert!(recommendations_for("Exijo uma resposta").is_empty());

        assert_eq!(
            recommendations_for("Exijo uma resposta, quero isso resolvido"),
            vec![REC_PRIORITIZE.to_string()]
        );
    }

    #[test]
    fn test_reduced_sla_needs_urgency_above_threshold() {
        // two phrases: exactly 0.6
        assert!(recommendations_for("Preciso disso hoje, agora").is_empty());
        // one phrase plus overdue: exactly 0.6
        assert!(recommendations_for("O prazo está atrasado, preciso hoje").is_empty());

        assert_eq!(
            recommendations_for("Preciso disso hoje, agora, imediatamente"),
            vec![REC_REDUCED_SLA.to_string()]
        );
    }
}
