//! Triage service.
//!
//! Front door used by a host application (HTTP handler, CLI): validates the
//! email text, asks the upstream classifier for a label, attaches the canned
//! replies for that label and the engine's contextual reply.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use validator::Validate;

use crate::classifier::EmailClassifier;
use crate::config::ServiceConfig;
use crate::engine::{ResponseEngine, ResponseResult};
use crate::error::AppError;

/// A canned reply, independent of the email's content
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestedResponse {
    pub title: String,
    pub text: String,
}

const PRODUCTIVE_SUGGESTIONS: &[(&str, &str)] = &[
    (
        "Resposta Padrão de Priorização",
        "Prezado(a),\n\nRecebemos sua mensagem e já priorizamos seu atendimento. Nossa equipe está analisando a solicitação e retornaremos com uma posição em breve.\n\nEstamos à disposição para quaisquer esclarecimentos adicionais.\n\nAtenciosamente,",
    ),
    (
        "Confirmação de Recebimento com Prazo",
        "Olá,\n\nConfirmamos o recebimento de sua solicitação. Estamos trabalhando para resolver esta questão e você receberá nosso retorno em até 3 dias úteis.\n\nCaso necessite de informações urgentes, não hesite em nos contatar.\n\nCordialmente,",
    ),
    (
        "Encaminhamento para Equipe Responsável",
        "Prezado(a),\n\nSua mensagem foi recebida e encaminhada para a equipe responsável. Eles entrarão em contato em breve para dar continuidade ao seu atendimento.\n\nAgradecemos pela compreensão.\n\nAtenciosamente,",
    ),
];

const UNPRODUCTIVE_SUGGESTIONS: &[(&str, &str)] = &[
    (
        "Resposta Educada de Redirecionamento",
        "Prezado(a),\n\nAgradecemos pelo contato. Para melhor atendê-lo, sugerimos que envie sua solicitação através dos canais apropriados ou com mais detalhes sobre o que precisa.\n\nEstamos à disposição para ajudá-lo.\n\nCordialmente,",
    ),
    (
        "Resposta de Informação Adicional",
        "Olá,\n\nRecebemos sua mensagem. Para que possamos auxiliá-lo da melhor forma, precisaríamos de mais informações sobre sua necessidade específica.\n\nPor favor, nos forneça mais detalhes para que possamos direcionar adequadamente seu atendimento.\n\nAtenciosamente,",
    ),
    (
        "Resposta de Baixa Prioridade",
        "Prezado(a),\n\nSua mensagem foi registrada em nosso sistema. Responderemos assim que possível, de acordo com nossa ordem de prioridades.\n\nAgradecemos pela compreensão.\n\nCordialmente,",
    ),
];

/// Canned replies for a classifier label; empty for unknown labels
pub fn suggested_responses(label: &str) -> Vec<SuggestedResponse> {
    let table = match label {
        "Produtivo" => PRODUCTIVE_SUGGESTIONS,
        "Improdutivo" => UNPRODUCTIVE_SUGGESTIONS,
        _ => &[],
    };

    table
        .iter()
        .map(|(title, text)| SuggestedResponse {
            title: title.to_string(),
            text: text.to_string(),
        })
        .collect()
}

/// Full triage of one email
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TriageReport {
    /// Trimmed email text
    pub text: String,
    /// Label assigned by the classifier
    pub classification: String,
    /// Per-class probabilities reported by the classifier
    pub confidence: BTreeMap<String, f32>,
    /// Canned replies for the label
    pub suggested_responses: Vec<SuggestedResponse>,
    /// Contextual reply and the analyses behind it
    pub contextual: ResponseResult,
}

/// Readiness of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    pub active: bool,
    pub classifier_ready: bool,
}

/// Classifier + engine, shared across requests
#[derive(Clone)]
pub struct TriageService {
    classifier: Arc<dyn EmailClassifier>,
    engine: Arc<ResponseEngine>,
    config: ServiceConfig,
}

impl TriageService {
    /// Create a service; validates the configuration and builds the engine once
    pub fn new(
        classifier: Arc<dyn EmailClassifier>,
        config: ServiceConfig,
    ) -> Result<Self, AppError> {
        config.validate()?;
        let engine = Arc::new(ResponseEngine::with_config(config.engine.clone())?);
        Ok(Self {
            classifier,
            engine,
            config,
        })
    }

    /// Create a service around an existing engine
    pub fn with_engine(
        classifier: Arc<dyn EmailClassifier>,
        engine: Arc<ResponseEngine>,
        config: ServiceConfig,
    ) -> Self {
        Self {
            classifier,
            engine,
            config,
        }
    }

    pub fn status(&self) -> ServiceStatus {
        ServiceStatus {
            active: true,
            classifier_ready: self.classifier.is_ready(),
        }
    }

    /// Classify an email and build its triage report
    pub async fn triage(&self, text: &str) -> Result<TriageReport, AppError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AppError::Validation("Email text must not be empty".to_string()));
        }

        if !self.classifier.is_ready() {
            return Err(AppError::Classifier("Classifier model is not loaded".to_string()));
        }

        let timeout = Duration::from_millis(self.config.classify_timeout_ms);
        let classification =
            tokio::time::timeout(timeout, self.classifier.classify(text.to_string()))
                .await
                .inspect_err(|_| warn!("Classifier did not answer within {:?}", timeout))??;

        info!(
            "Email classified as '{}' ({} chars)",
            classification.label,
            text.chars().count()
        );

        let contextual = self
            .engine
            .generate(text, &classification.label, self.config.max_options);

        Ok(TriageReport {
            text: text.to_string(),
            suggested_responses: suggested_responses(&classification.label),
            classification: classification.label,
            confidence: classification.confidence,
            contextual,
        })
    }
}
