//! Required field rule

use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Rule that ensures a field is present and not blank
#[derive(Debug, Clone, Default)]
pub struct RequiredRule {
    pub message: Option<String>,
}

impl RequiredRule {
    pub fn new() -> Self {
        Self { message: None }
    }

    pub fn with_message(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    /// Null, blank text, and empty arrays/objects count as empty
    fn is_empty(value: &Value) -> bool {
        match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            Value::Array(arr) => arr.is_empty(),
            Value::Object(obj) => obj.is_empty(),
            _ => false,
        }
    }
}

impl ValidationRule for RequiredRule {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if !Self::is_empty(value) {
            return Ok(());
        }

        let mut error = ValidationError::form(field, ErrorKind::Required);
        if let Some(ref message) = self.message {
            error = error.with_message(message.clone());
        }
        Err(error.into())
    }

    fn rule_name(&self) -> &'static str {
        "required"
    }

    fn parameters(&self) -> Option<Value> {
        self.message
            .as_ref()
            .map(|msg| serde_json::json!({ "message": msg }))
    }
}
