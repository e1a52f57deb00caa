//! Length bounds for text and arrays

use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

/// Text is measured in chars after trimming; arrays by item count
#[derive(Debug, Clone, Default)]
pub struct LengthRule {
    /// Minimum length (inclusive)
    pub min: Option<usize>,
    /// Maximum length (inclusive)
    pub max: Option<usize>,
    pub message: Option<String>,
}

impl LengthRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn min(mut self, min: usize) -> Self {
        self.min = Some(min);
        self
    }

    pub fn max(mut self, max: usize) -> Self {
        self.max = Some(max);
        self
    }

    pub fn range(self, min: usize, max: usize) -> Self {
        self.min(min).max(max)
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn length(value: &Value) -> Option<usize> {
        match value {
            Value::String(s) => Some(s.trim().chars().count()),
            Value::Array(arr) => Some(arr.len()),
            _ => None,
        }
    }

    fn fail(&self, field: &str, kind: ErrorKind) -> ValidationResult<()> {
        let mut error = ValidationError::form(field, kind);
        if let Some(ref message) = self.message {
            error = error.with_message(message.clone());
        }
        Err(error.into())
    }
}

impl ValidationRule for LengthRule {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        // Null is RequiredRule's concern
        if value.is_null() {
            return Ok(());
        }

        let Some(length) = Self::length(value) else {
            return Err(ValidationError::form(field, ErrorKind::InvalidType).into());
        };

        if let Some(min) = self.min {
            if length < min {
                return self.fail(field, ErrorKind::TooShort { min });
            }
        }
        if let Some(max) = self.max {
            if length > max {
                return self.fail(field, ErrorKind::TooLong { max });
            }
        }

        Ok(())
    }

    fn rule_name(&self) -> &'static str {
        "length"
    }

    fn parameters(&self) -> Option<Value> {
        let mut params = serde_json::Map::new();
        if let Some(min) = self.min {
            params.insert("min".to_string(), Value::from(min));
        }
        if let Some(max) = self.max {
            params.insert("max".to_string(), Value::from(max));
        }
        if let Some(ref message) = self.message {
            params.insert("message".to_string(), Value::String(message.clone()));
        }

        if params.is_empty() {
            None
        } else {
            Some(Value::Object(params))
        }
    }
}
