//! Response templates.
//!
//! One template per (category, response tier). Placeholders:
//! `{ticket}`, `{sistema}`, `{codigo_erro}`, `{ambiente}`, `{prazo}`, `{status}`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::severity::SeverityTier;
use super::taxonomy::ProblemCategory;

/// Every placeholder a template may contain
pub const PLACEHOLDERS: [&str; 6] = [
    "{ticket}",
    "{sistema}",
    "{codigo_erro}",
    "{ambiente}",
    "{prazo}",
    "{status}",
];

/// Used when the catalog has no entry for a category
pub const GENERIC_TEMPLATE: &str =
    "Prezado(a),\n\nRecebemos sua mensagem e estamos processando sua solicitação.\n\nAtenciosamente,";

/// Priority tier of the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResponseTier {
    #[serde(rename = "alta")]
    High,
    #[serde(rename = "média")]
    Medium,
    #[serde(rename = "baixa")]
    Low,
}

impl ResponseTier {
    /// crítica and alta severities get the high tier
    pub fn for_severity(tier: SeverityTier) -> Self {
        match tier {
            SeverityTier::Critical | SeverityTier::High => ResponseTier::High,
            SeverityTier::Medium => ResponseTier::Medium,
            SeverityTier::Low => ResponseTier::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ResponseTier::High => "alta",
            ResponseTier::Medium => "média",
            ResponseTier::Low => "baixa",
        }
    }
}

impl fmt::Display for ResponseTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Templates of one category; `low` is mandatory and backs missing tiers
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryTemplates {
    pub category: ProblemCategory,
    pub high: Option<&'static str>,
    pub medium: Option<&'static str>,
    pub low: &'static str,
}

impl CategoryTemplates {
    pub fn get(&self, tier: ResponseTier) -> &'static str {
        let requested = match tier {
            ResponseTier::High => self.high,
            ResponseTier::Medium => self.medium,
            ResponseTier::Low => Some(self.low),
        };
        requested.unwrap_or(self.low)
    }
}

/// Lookup table of response templates
#[derive(Debug, Clone, PartialEq)]
pub struct TemplateCatalog {
    entries: Vec<CategoryTemplates>,
}

impl Default for TemplateCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateCatalog {
    /// Catalog from explicit entries
    pub fn new(entries: Vec<CategoryTemplates>) -> Self {
        Self { entries }
    }

    /// Template for (category, tier): missing tier -> category's low tier,
    /// missing category -> generic acknowledgment
    pub fn lookup(&self, category: ProblemCategory, tier: ResponseTier) -> &'static str {
        self.entries
            .iter()
            .find(|entry| entry.category == category)
            .map(|entry| entry.get(tier))
            .unwrap_or(GENERIC_TEMPLATE)
    }

    /// The built-in Portuguese templates
    pub fn builtin() -> Self {
        Self::new(vec![
            CategoryTemplates {
                category: ProblemCategory::Access,
                high: Some("Prezado(a),\n\nSua solicitação de {sistema} foi recebida e está sendo processada com MÁXIMA PRIORIDADE.\nNossa equipe de segurança e TI foi acionada para validar os requisitos necessários.\nVocê receberá a confirmação de acesso em até 1-2 dias úteis.\n\nReferência: {ticket}\n\nAtenciosamente,"),
                medium: Some("Olá,\n\nRecebemos sua requisição de {sistema}. Estamos validando as permissões necessárias com a equipe responsável.\nVocê receberá nosso retorno em até 2-3 dias úteis.\n\nReferência: {ticket}\n\nCordialmente,"),
                low: "Prezado(a),\n\nSua solicitação foi recebida e registrada em nosso sistema.\nProcessaremos conforme a ordem de prioridades e você será contatado em breve.\n\nReferência: {ticket}\n\nAtenciosamente,",
            },
            CategoryTemplates {
                category: ProblemCategory::Unavailability,
                high: Some("Prezadíssimo(a), CRÍTICO: Identificamos que {sistema} está {status}.\n\nNossa equipe técnica ACABA DE SER ACIONADA para investigação imediata.\nEste é um incidente crítico e estamos trabalhando para restauração urgente.\n\nAtualizaremos você a cada 30 minutos.\n\nReferência: {ticket}\n\nMelhores cumprimentos,"),
                medium: Some("Prezado(a),\n\nIdentificamos que {sistema} não está respondendo adequadamente.\nNossa equipe técnica está investigando o problema e trabalhando na restauração.\n\nEstaremos em contato em breve com atualizações.\n\nReferência: {ticket}\n\nAtenciosamente,"),
                low: "Olá,\n\nRecebemos o relato de indisponibilidade em {sistema}.\nEstamos investigando e retornaremos com informações em breve.\n\nReferência: {ticket}\n\nCordialmente,",
            },
            CategoryTemplates {
                category: ProblemCategory::SystemError,
                high: Some("Prezado(a),\n\nIdentificamos o erro {codigo_erro} em {sistema}.\n\nNossa equipe de desenvolvimento foi acionada. Este é um problema crítico e estamos trabalhando na solução urgente.\nEsperamos resolver em {prazo}.\n\nReferência: {ticket}\nAmbiente: {ambiente}\n\nAtenciosamente,"),
                medium: Some("Olá,\n\nRecebemos o relato do erro em {sistema}. Nossa equipe técnica está analisando a causa raiz.\nTrabalhamos para resolver o mais breve possível.\n\nReferência: {ticket}\n\nCordialmente,"),
                low: "Prezado(a),\n\nObrigado por reportar o erro. Estamos investigando e retornaremos com um diagnóstico em breve.\n\nReferência: {ticket}\n\nAtenciosamente,",
            },
            CategoryTemplates {
                category: ProblemCategory::Performance,
                high: Some("Prezado(a),\n\nIdentificamos problemas de performance em {sistema}.\nNossa equipe de infraestrutura está investigando possíveis gargalos.\nPriorizaremos a solução e retornaremos em breve.\n\nReferência: {ticket}\n\nAtenciosamente,"),
                medium: Some("Olá,\n\nRecebemos seu relato sobre a lentidão em {sistema}.\nEstamos analisando a performance e possíveis causas.\n\nReferência: {ticket}\n\nCordialmente,"),
                low: "Prezado(a),\n\nObrigado pelo feedback sobre performance.\nIremos investigar e otimizar quando possível.\n\nReferência: {ticket}\n\nAtenciosamente,",
            },
            CategoryTemplates {
                category: ProblemCategory::Data,
                high: Some("Prezado(a),\n\nRecebemos sua solicitação de dados com urgência.\nNossa equipe de analytics está preparando o relatório/export solicitado.\nEntrega prevista: {prazo}.\n\nReferência: {ticket}\n\nAtenciosamente,"),
                medium: Some("Olá,\n\nSua solicitação de dados foi recebida.\nEstamos compilando as informações necessárias e enviaremos em breve.\n\nReferência: {ticket}\n\nCordialmente,"),
                low: "Prezado(a),\n\nRecebemos sua solicitação de dados.\nEntraremos em contato com as informações solicitadas.\n\nReferência: {ticket}\n\nAtenciosamente,",
            },
            CategoryTemplates {
                category: ProblemCategory::Security,
                high: Some("CRÍTICO - SEGURANÇA DA INFORMAÇÃO\n\nPrezadíssimo(a),\n\nIdentificamos uma possível ameaça à segurança conforme relatado.\nNossa equipe de segurança foi IMEDIATAMENTE ACIONADA para investigação e contenção.\n\nTrabalhamos com máxima urgência para remediar qualquer vulnerabilidade.\nEntre em contato conosco por telefone para detalhes sensíveis.\n\nReferência: {ticket}\n\nMelhores cumprimentos,"),
                medium: Some("Prezado(a),\n\nObrigado por relatar a questão de segurança.\nNossa equipe de segurança está investigando com prioridade.\n\nReferência: {ticket}\n\nAtenciosamente,"),
                low: "Prezado(a),\n\nRecebemos sua comunicação sobre segurança.\nInvestigaremos conforme o protocolo de segurança da informação.\n\nReferência: {ticket}\n\nCordialmente,",
            },
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_covers_every_category_and_tier() {
        let catalog = TemplateCatalog::builtin();

        for category in ProblemCategory::ALL {
            for tier in [ResponseTier::High, ResponseTier::Medium, ResponseTier::Low] {
                assert_ne!(catalog.lookup(category, tier), GENERIC_TEMPLATE);
            }
        }
    }

    #[test]
    fn test_missing_tier_falls_back_to_low() {
        let catalog = TemplateCatalog::new(vec![CategoryTemplates {
            category: ProblemCategory::Data,
            high: None,
            medium: None,
            low: "baixa {ticket}",
        }]);

        assert_eq!(catalog.lookup(ProblemCategory::Data, ResponseTier::High), "baixa {ticket}");
    }

    #[test]
    fn test_missing_category_uses_generic() {
        let catalog = TemplateCatalog::new(vec![]);

        assert_eq!(
            catalog.lookup(ProblemCategory::Security, ResponseTier::High),
            GENERIC_TEMPLATE
        );
    }

    #[test]
    fn test_response_tier_for_severity() {
        assert_eq!(ResponseTier::for_severity(SeverityTier::Critical), ResponseTier::High);
        assert_eq!(ResponseTier::for_severity(SeverityTier::High), ResponseTier::High);
        assert_eq!(ResponseTier::for_severity(SeverityTier::Medium), ResponseTier::Medium);
        assert_eq!(ResponseTier::for_severity(SeverityTier::Low), ResponseTier::Low);
    }
}
