//! Rule collections for form payloads

use crate::error::{ValidationErrors, ValidationResult};
use crate::traits::{Validate, ValidateField, ValidateRequest, ValidationRule};
use crate::validators::*;
use serde_json::{Map, Value};
use std::sync::Arc;

/// A cross-field check over the whole payload
pub type RequestCheck = Arc<dyn Fn(&Map<String, Value>) -> ValidationResult<()> + Send + Sync>;

/// Ordered field rules plus request-level checks
///
/// Fields are validated in the order they were first registered, and each
/// field's rules in the order they were added.
#[derive(Clone, Default)]
pub struct Rules {
    field_rules: Vec<(String, Vec<Arc<dyn ValidationRule>>)>,
    request_checks: Vec<RequestCheck>,
}

impl std::fmt::Debug for Rules {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rules")
            .field("validated_fields", &self.validated_fields())
            .field("request_checks_count", &self.request_checks.len())
            .finish()
    }
}

impl Rules {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a validation rule for a specific field
    pub fn field<R>(mut self, field: impl Into<String>, rule: R) -> Self
    where
        R: ValidationRule + 'static,
    {
        let field = field.into();
        let rule: Arc<dyn ValidationRule> = Arc::new(rule);

        match self.field_rules.iter_mut().find(|(name, _)| *name == field) {
            Some((_, rules)) => rules.push(rule),
            None => self.field_rules.push((field, vec![rule])),
        }
        self
    }

    /// Add a cross-field check
    pub fn request<F>(mut self, check: F) -> Self
    where
        F: Fn(&Map<String, Value>) -> ValidationResult<()> + Send + Sync + 'static,
    {
        self.request_checks.push(Arc::new(check));
        self
    }

    /// Required text with a trimmed length range
    pub fn required_string(self, field: impl Into<String>, min: usize, max: usize) -> Self {
        let field = field.into();
        self.field(field.clone(), RequiredRule::new())
            .field(field, LengthRule::new().range(min, max))
    }

    pub fn required_email(self, field: impl Into<String>) -> Self {
        let field = field.into();
        self.field(field.clone(), RequiredRule::new())
            .field(field, EmailRule::new())
    }

    pub fn get_field_rules(&self, field: &str) -> Option<&[Arc<dyn ValidationRule>]> {
        self.field_rules
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, rules)| rules.as_slice())
    }

    pub fn is_empty(&self) -> bool {
        self.field_rules.is_empty() && self.request_checks.is_empty()
    }

    /// Client registration form: name, e-mail, CPF/CNPJ and optional CEP
    pub fn cliente() -> Self {
        Self::new()
            .required_string("nome", 3, 100)
            .required_email("email")
            .field("documento", RequiredRule::new())
            .field("documento", DocumentRule::cpf_ou_cnpj())
            .field("cep", DocumentRule::cep())
    }

    /// Task status selector
    pub fn tarefa_status() -> Self {
        Self::new().field("status", OneOfRule::status_tarefa())
    }
}

impl ValidateField for Rules {
    /// Runs every rule for the field; a field without rules is valid
    fn validate_field(&self, field: &str, value: &Value) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for rule in self.get_field_rules(field).unwrap_or_default() {
            if let Err(rule_errors) = rule.validate(value, field) {
                errors.merge(rule_errors);
            }
        }

        errors.into_result()
    }
}

impl ValidateRequest for Rules {
    fn validate_request(&self, data: &Map<String, Value>) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for check in &self.request_checks {
            if let Err(check_errors) = check(data) {
                errors.merge(check_errors);
            }
        }

        errors.into_result()
    }
}

impl Validate for Rules {
    fn validated_fields(&self) -> Vec<&str> {
        self.field_rules.iter().map(|(name, _)| name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ValidationError};
    use serde_json::json;

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_rules_field_validation() {
        let rules = Rules::new()
            .field("nome", RequiredRule::new())
            .field("nome", LengthRule::new().min(2).max(50))
            .field("email", EmailRule::new());

        assert!(rules.validate_field("nome", &json!("Ana")).is_ok());
        assert!(rules.validate_field("nome", &json!("A")).is_err());
        assert!(rules.validate_field("email", &json!("ana@exemplo.com")).is_ok());
        assert!(rules.validate_field("email", &json!("ana")).is_err());
        assert!(rules.validate_field("apelido", &json!("")).is_ok());
    }

    #[test]
    fn test_rules_keep_registration_order() {
        let rules = Rules::new()
            .field("b", RequiredRule::new())
            .field("a", RequiredRule::new())
            .field("b", LengthRule::new().min(1));

        assert_eq!(rules.validated_fields(), vec!["b", "a"]);
        assert_eq!(rules.get_field_rules("b").map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_cliente_form_valid() {
        let data = payload(json!({
            "nome": "Maria Souza",
            "email": "maria@exemplo.com.br",
            "documento": "529.982.247-25",
            "cep": "01310-100"
        }));
        assert!(Rules::cliente().validate(&data).is_ok());
    }

    #[test]
    fn test_cliente_form_invalid() {
        let data = payload(json!({
            "nome": "Ma",
            "email": "maria",
            "documento": "11.222.333/0001-80",
            "cep": "0131"
        }));

        let errors = Rules::cliente().validate(&data).unwrap_err();
        let codes: Vec<&str> = errors.iter().map(|e| e.code()).collect();
        assert_eq!(codes, vec!["length_min", "invalid_email", "invalid_document", "invalid_cep"]);
    }

    #[test]
    fn test_cliente_form_missing_fields() {
        let errors = Rules::cliente().validate(&Map::new()).unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        // cep is optional
        assert_eq!(fields, vec!["nome", "email", "documento"]);
    }

    #[test]
    fn test_request_checks() {
        let rules = Rules::new().request(|data| {
            let inicio = data.get("dataInicio").and_then(Value::as_str);
            let fim = data.get("dataFim").and_then(Value::as_str);
            match (inicio, fim) {
                (Some(i), Some(f)) if f <= i => {
                    Err(ValidationError::form("dataFim", ErrorKind::EndNotAfterStart).into())
                }
                _ => Ok(()),
            }
        });

        assert!(rules
            .validate(&payload(json!({ "dataInicio": "2025-01-02", "dataFim": "2025-01-01" })))
            .is_err());
        assert!(rules
            .validate(&payload(json!({ "dataInicio": "2025-01-01", "dataFim": "2025-01-02" })))
            .is_ok());
    }

    #[test]
    fn test_tarefa_status_rules() {
        let rules = Rules::tarefa_status();
        assert!(rules.validate(&payload(json!({ "status": "ATRASADA" }))).is_ok());
        assert!(rules.validate(&payload(json!({ "status": "ARQUIVADA" }))).is_err());
    }
}
