//! Traits for validating loose JSON form payloads

use crate::error::{ValidationErrors, ValidationResult};
use serde_json::{Map, Value};

/// A single check applied to one field value
pub trait ValidationRule: Send + Sync {
    /// Validate a single value
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()>;

    /// Get the validation rule name/type
    fn rule_name(&self) -> &'static str;

    /// Get validation rule parameters/configuration as JSON
    fn parameters(&self) -> Option<Value> {
        None
    }
}

/// Trait for validating individual fields
pub trait ValidateField: Send + Sync {
    fn validate_field(&self, field: &str, value: &Value) -> ValidationResult<()>;
}

/// Trait for cross-field checks over the whole payload
pub trait ValidateRequest: Send + Sync {
    fn validate_request(&self, data: &Map<String, Value>) -> ValidationResult<()>;
}

/// Field checks followed by request checks
pub trait Validate: ValidateField + ValidateRequest {
    /// Fields to check, in order. Fields missing from the payload are
    /// validated as `null`.
    fn validated_fields(&self) -> Vec<&str>;

    fn validate(&self, data: &Map<String, Value>) -> ValidationResult<()> {
        let mut errors = ValidationErrors::new();

        for field in self.validated_fields() {
            let value = data.get(field).unwrap_or(&Value::Null);
            if let Err(field_errors) = self.validate_field(field, value) {
                errors.merge(field_errors);
            }
        }

        if let Err(request_errors) = self.validate_request(data) {
            errors.merge(request_errors);
        }

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ErrorKind, ValidationError};
    use serde_json::json;

    struct ContatoForm;

    impl ValidateField for ContatoForm {
        fn validate_field(&self, field: &str, value: &Value) -> ValidationResult<()> {
            if field == "email" && value.as_str().map(|s| !s.contains('@')).unwrap_or(true) {
                return Err(ValidationError::form(field, ErrorKind::InvalidEmail).into());
            }
            Ok(())
        }
    }

    impl ValidateRequest for ContatoForm {
        fn validate_request(&self, data: &Map<String, Value>) -> ValidationResult<()> {
            if data.contains_key("cpf") && data.contains_key("cnpj") {
                return Err(ValidationError::form("cnpj", ErrorKind::InvalidDocument).into());
            }
            Ok(())
        }
    }

    impl Validate for ContatoForm {
        fn validated_fields(&self) -> Vec<&str> {
            vec!["email"]
        }
    }

    fn payload(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_field_is_validated_as_null() {
        let errors = ContatoForm.validate(&payload(json!({}))).unwrap_err();
        assert!(errors.has_field_errors("email"));
    }

    #[test]
    fn test_field_errors_come_before_request_errors() {
        let errors = ContatoForm
            .validate(&payload(json!({ "email": "x", "cpf": "1", "cnpj": "2" })))
            .unwrap_err();

        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "cnpj"]);
    }

    #[test]
    fn test_valid_payload() {
        assert!(ContatoForm.validate(&payload(json!({ "email": "a@b.com" }))).is_ok());
    }
}
