//! Allowed-values rule

use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::model::StatusTarefa;
use crate::traits::ValidationRule;
use serde_json::Value;

/// Text must equal one of the allowed values exactly
#[derive(Debug, Clone)]
pub struct OneOfRule {
    pub allowed: Vec<String>,
    pub message: Option<String>,
}

impl OneOfRule {
    pub fn new<I, S>(allowed: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
            message: None,
        }
    }

    /// Task status codes
    pub fn status_tarefa() -> Self {
        Self::new(StatusTarefa::codes())
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for OneOfRule {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let Some(text) = value.as_str() else {
            return Err(ValidationError::form(field, ErrorKind::InvalidType).into());
        };

        if self.allowed.iter().any(|a| a == text) {
            return Ok(());
        }

        let mut error = ValidationError::form(
            field,
            ErrorKind::NotInList {
                allowed: self.allowed.clone(),
            },
        );
        if let Some(ref message) = self.message {
            error = error.with_message(message.clone());
        }
        Err(error.into())
    }

    fn rule_name(&self) -> &'static str {
        "one_of"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "allowed": self.allowed }))
    }
}
