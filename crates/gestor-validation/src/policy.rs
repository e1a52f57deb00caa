//! Validation policy values (date tolerances and length limits)

use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for field '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },

    #[error("Configuration validation failed: {message}")]
    ValidationFailed { message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Tunable limits used by the project and task validators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// How many whole days in the past a project may start
    pub past_grace_days: i64,
    /// Longest allowed distance between start and expected end, in days
    pub max_span_days: i64,
    pub nome_min: usize,
    pub nome_max: usize,
    pub descricao_min: usize,
    pub descricao_max: usize,
    pub observacoes_max: usize,
}

impl Default for ValidationPolicy {
    fn default() -> Self {
        Self {
            past_grace_days: 1,
            max_span_days: 1825,
            nome_min: 3,
            nome_max: 100,
            descricao_min: 10,
            descricao_max: 1000,
            observacoes_max: 500,
        }
    }
}

impl ValidationPolicy {
    /// Defaults overridden by `GESTOR_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut policy = Self::default();

        override_from_env(&mut policy.past_grace_days, "GESTOR_PAST_GRACE_DAYS", "past_grace_days")?;
        override_from_env(&mut policy.max_span_days, "GESTOR_MAX_SPAN_DAYS", "max_span_days")?;
        override_from_env(&mut policy.nome_min, "GESTOR_NOME_MIN", "nome_min")?;
        override_from_env(&mut policy.nome_max, "GESTOR_NOME_MAX", "nome_max")?;
        override_from_env(&mut policy.descricao_min, "GESTOR_DESCRICAO_MIN", "descricao_min")?;
        override_from_env(&mut policy.descricao_max, "GESTOR_DESCRICAO_MAX", "descricao_max")?;
        override_from_env(&mut policy.observacoes_max, "GESTOR_OBSERVACOES_MAX", "observacoes_max")?;

        policy.validate()?;
        tracing::debug!(?policy, "validation policy loaded from environment");
        Ok(policy)
    }

    /// Load from a YAML file; missing keys keep their defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let policy: Self = serde_yaml::from_str(&content)?;
        policy.validate()?;
        tracing::debug!(path = %path.as_ref().display(), "validation policy loaded from file");
        Ok(policy)
    }

    /// Reject inconsistent limits
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.past_grace_days < 0 {
            return Err(ConfigError::ValidationFailed {
                message: "past_grace_days cannot be negative".to_string(),
            });
        }
        if self.max_span_days <= 0 {
            return Err(ConfigError::ValidationFailed {
                message: "max_span_days must be positive".to_string(),
            });
        }
        if self.nome_min > self.nome_max {
            return Err(ConfigError::ValidationFailed {
                message: format!("nome_min ({}) exceeds nome_max ({})", self.nome_min, self.nome_max),
            });
        }
        if self.descricao_min > self.descricao_max {
            return Err(ConfigError::ValidationFailed {
                message: format!(
                    "descricao_min ({}) exceeds descricao_max ({})",
                    self.descricao_min, self.descricao_max
                ),
            });
        }
        Ok(())
    }
}

fn override_from_env<T: FromStr>(slot: &mut T, var: &str, field: &str) -> Result<(), ConfigError> {
    if let Ok(raw) = env::var(var) {
        *slot = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            field: field.to_string(),
            value: raw.clone(),
            expected: "a whole number".to_string(),
        })?;
    }
    Ok(())
}
