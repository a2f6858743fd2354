//! Problem taxonomy.
//!
//! The fixed set of support-issue categories, declared once as data.
//! Declaration order is the enumeration order used for every tie-break.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Support-issue category used to pick a response template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ProblemCategory {
    /// Access / permission requests
    #[serde(rename = "acesso")]
    Access,
    /// System or service is down
    #[serde(rename = "indisponibilidade")]
    Unavailability,
    /// Errors, bugs, exceptions
    #[serde(rename = "erro_sistema")]
    SystemError,
    /// Slowness and timeouts
    #[serde(rename = "performance")]
    Performance,
    /// Reports, exports, backups
    #[serde(rename = "dados")]
    Data,
    /// Leaks, intrusions, suspicious activity
    #[serde(rename = "segurança")]
    Security,
}

impl fmt::Display for ProblemCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl ProblemCategory {
    /// All categories in declaration order
    pub const ALL: [ProblemCategory; 6] = [
        ProblemCategory::Access,
        ProblemCategory::Unavailability,
        ProblemCategory::SystemError,
        ProblemCategory::Performance,
        ProblemCategory::Data,
        ProblemCategory::Security,
    ];

    /// Stable identifier, as it appears in templates and reports
    pub fn id(&self) -> &'static str {
        match self {
            ProblemCategory::Access => "acesso",
            ProblemCategory::Unavailability => "indisponibilidade",
            ProblemCategory::SystemError => "erro_sistema",
            ProblemCategory::Performance => "performance",
            ProblemCategory::Data => "dados",
            ProblemCategory::Security => "segurança",
        }
    }

    /// Identifier with separators replaced by spaces (`erro_sistema` -> `erro sistema`)
    pub fn display_name(&self) -> String {
        self.id().replace('_', " ")
    }

    /// Parse a category identifier
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.id() == id)
    }

    /// Static definition of this category
    pub fn spec(&self) -> &'static CategorySpec {
        // TAXONOMY is declared in the same order as ALL
        &TAXONOMY[*self as usize]
    }
}

/// Keyword definition of one category
#[derive(Debug)]
pub struct CategorySpec {
    pub category: ProblemCategory,
    /// Problem keywords, matched as lowercase substrings
    pub keywords: &'static [&'static str],
    /// System names associated with the category
    pub systems: &'static [&'static str],
    /// Base urgency weight (0.0 - 1.0)
    pub base_urgency: f32,
}

impl CategorySpec {
    /// Synthetic document describing the category: keywords then systems
    pub fn document(&self) -> String {
        self.keywords
            .iter()
            .chain(self.systems.iter())
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// The problem taxonomy, in enumeration order
pub static TAXONOMY: [CategorySpec; 6] = [
    CategorySpec {
        category: ProblemCategory::Access,
        keywords: &["acesso", "permissão", "liberação", "autorização", "credenciais"],
        systems: &["confluence", "gitlab", "jira", "sharepoint", "erp", "sap"],
        base_urgency: 0.6,
    },
    CategorySpec {
        category: ProblemCategory::Unavailability,
        keywords: &["fora do ar", "indisp", "parado", "travado", "congelado", "sem responder"],
        systems: &["api", "servidor", "banco dados", "sistema", "aplicação"],
        base_urgency: 0.9,
    },
    CategorySpec {
        category: ProblemCategory::SystemError,
        keywords: &["erro", "bug", "falha", "exceção", "erro:", "code:", "stacktrace"],
        systems: &["sistema", "aplicação", "módulo", "integração"],
        base_urgency: 0.7,
    },
    CategorySpec {
        category: ProblemCategory::Performance,
        keywords: &["lento", "demora", "performance", "lag", "timeout", "travando"],
        systems: &["banco", "servidor", "rede", "api"],
        base_urgency: 0.6,
    },
    CategorySpec {
        category: ProblemCategory::Data,
        keywords: &["relatório", "dados", "informação", "export", "backup", "restore"],
        systems: &["banco", "data warehouse", "bi"],
        base_urgency: 0.5,
    },
    CategorySpec {
        category: ProblemCategory::Security,
        keywords: &["segurança", "hack", "vazamento", "acesso indevido", "suspeito"],
        systems: &["sistema", "aplicação", "rede"],
        base_urgency: 0.95,
    },
];
