//! Projeto → Subprojeto → Tarefa records as the forms submit them
//!
//! Every field is optional text: the forms can send anything, and it is the
//! validators' job to report what is missing or malformed. Fields the engine
//! does not know about are kept in `extras` and carried through sanitization.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Projeto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descricao: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliente_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_fim_prevista: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subprojetos: Option<Vec<Subprojeto>>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subprojeto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subprojeto_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarefas: Option<Vec<Tarefa>>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tarefa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tarefa_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_inicio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_fim_prevista: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_fim_real: Option<String>,
    /// Raw status code; see [`StatusTarefa`]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observacoes: Option<String>,
    #[serde(flatten)]
    pub extras: Map<String, Value>,
}

impl Projeto {
    pub fn subprojetos(&self) -> &[Subprojeto] {
        self.subprojetos.as_deref().unwrap_or_default()
    }
}

impl Subprojeto {
    pub fn new(subprojeto_id: impl Into<String>) -> Self {
        Self {
            subprojeto_id: Some(subprojeto_id.into()),
            ..Default::default()
        }
    }

    pub fn with_tarefa(mut self, tarefa: Tarefa) -> Self {
        self.tarefas.get_or_insert_with(Vec::new).push(tarefa);
        self
    }

    pub fn tarefas(&self) -> &[Tarefa] {
        self.tarefas.as_deref().unwrap_or_default()
    }
}

impl Tarefa {
    pub fn new(tarefa_id: impl Into<String>) -> Self {
        Self {
            tarefa_id: Some(tarefa_id.into()),
            ..Default::default()
        }
    }

    /// The status code, with the empty string treated as unset
    pub fn status_code(&self) -> Option<&str> {
        self.status.as_deref().filter(|s| !s.is_empty())
    }

    /// Parsed status, if set and known
    pub fn status_tarefa(&self) -> Option<StatusTarefa> {
        self.status_code().and_then(|s| s.parse().ok())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown task status '{0}'")]
pub struct UnknownStatus(pub String);

/// Lifecycle status of a tarefa
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTarefa {
    #[default]
    NaoIniciada,
    EmAndamento,
    Concluida,
    Atrasada,
    Cancelada,
}

impl StatusTarefa {
    pub const ALL: [StatusTarefa; 5] = [
        StatusTarefa::NaoIniciada,
        StatusTarefa::EmAndamento,
        StatusTarefa::Concluida,
        StatusTarefa::Atrasada,
        StatusTarefa::Cancelada,
    ];

    /// Wire code, e.g. `EM_ANDAMENTO`
    pub fn as_str(&self) -> &'static str {
        match self {
            StatusTarefa::NaoIniciada => "NAO_INICIADA",
            StatusTarefa::EmAndamento => "EM_ANDAMENTO",
            StatusTarefa::Concluida => "CONCLUIDA",
            StatusTarefa::Atrasada => "ATRASADA",
            StatusTarefa::Cancelada => "CANCELADA",
        }
    }

    /// Label shown in the forms
    pub fn rotulo(&self) -> &'static str {
        match self {
            StatusTarefa::NaoIniciada => "Não iniciada",
            StatusTarefa::EmAndamento => "Em andamento",
            StatusTarefa::Concluida => "Concluída",
            StatusTarefa::Atrasada => "Atrasada",
            StatusTarefa::Cancelada => "Cancelada",
        }
    }

    /// Statuses a task with an actual end date may have
    pub fn is_terminal(&self) -> bool {
        matches!(self, StatusTarefa::Concluida | StatusTarefa::Cancelada)
    }

    pub fn codes() -> Vec<String> {
        Self::ALL.iter().map(|s| s.as_str().to_string()).collect()
    }
}

impl FromStr for StatusTarefa {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

impl fmt::Display for StatusTarefa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
