//! E-mail format rule

use crate::documents::validar_email;
use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

#[derive(Debug, Clone, Default)]
pub struct EmailRule {
    pub message: Option<String>,
}

impl EmailRule {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for EmailRule {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let Some(email) = value.as_str() else {
            return Err(ValidationError::form(field, ErrorKind::InvalidType).into());
        };

        if validar_email(email) {
            return Ok(());
        }

        let mut error = ValidationError::form(field, ErrorKind::InvalidEmail);
        if let Some(ref message) = self.message {
            error = error.with_message(message.clone());
        }
        Err(error.into())
    }

    fn rule_name(&self) -> &'static str {
        "email"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_email_rule() {
        let rule = EmailRule::new();
        assert!(rule.validate(&json!("contato@empresa.com.br"), "email").is_ok());
        assert!(rule.validate(&Value::Null, "email").is_ok());

        let errors = rule.validate(&json!("contato@empresa"), "email").unwrap_err();
        assert_eq!(errors.errors[0].message(), "E-mail inválido");
    }

    #[test]
    fn test_email_rule_type_and_message() {
        let errors = EmailRule::new().validate(&json!(42), "email").unwrap_err();
        assert_eq!(errors.errors[0].code(), "invalid_type");

        let errors = EmailRule::new()
            .message("Informe um e-mail válido")
            .validate(&json!("x"), "email")
            .unwrap_err();
        assert_eq!(errors.errors[0].message(), "Informe um e-mail válido");
    }
}
