//! CPF, CNPJ and CEP rules

use crate::documents::{validar_cep, validar_cnpj, validar_cpf, validar_documento};
use crate::error::{ErrorKind, ValidationError, ValidationResult};
use crate::traits::ValidationRule;
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Cpf,
    Cnpj,
    /// CPF or CNPJ, chosen by digit count
    CpfOuCnpj,
    Cep,
}

impl DocumentKind {
    fn check(&self, text: &str) -> bool {
        match self {
            DocumentKind::Cpf => validar_cpf(text),
            DocumentKind::Cnpj => validar_cnpj(text),
            DocumentKind::CpfOuCnpj => validar_documento(text),
            DocumentKind::Cep => validar_cep(text),
        }
    }

    fn error_kind(&self) -> ErrorKind {
        match self {
            DocumentKind::Cpf => ErrorKind::InvalidCpf,
            DocumentKind::Cnpj => ErrorKind::InvalidCnpj,
            DocumentKind::CpfOuCnpj => ErrorKind::InvalidDocument,
            DocumentKind::Cep => ErrorKind::InvalidCep,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            DocumentKind::Cpf => "cpf",
            DocumentKind::Cnpj => "cnpj",
            DocumentKind::CpfOuCnpj => "cpf_cnpj",
            DocumentKind::Cep => "cep",
        }
    }
}

/// Checks a Brazilian document number; punctuation is ignored
#[derive(Debug, Clone)]
pub struct DocumentRule {
    pub kind: DocumentKind,
    pub message: Option<String>,
}

impl DocumentRule {
    pub fn new(kind: DocumentKind) -> Self {
        Self { kind, message: None }
    }

    pub fn cpf() -> Self {
        Self::new(DocumentKind::Cpf)
    }

    pub fn cnpj() -> Self {
        Self::new(DocumentKind::Cnpj)
    }

    pub fn cpf_ou_cnpj() -> Self {
        Self::new(DocumentKind::CpfOuCnpj)
    }

    pub fn cep() -> Self {
        Self::new(DocumentKind::Cep)
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

impl ValidationRule for DocumentRule {
    fn validate(&self, value: &Value, field: &str) -> ValidationResult<()> {
        if value.is_null() {
            return Ok(());
        }

        let Some(text) = value.as_str() else {
            return Err(ValidationError::form(field, ErrorKind::InvalidType).into());
        };

        if self.kind.check(text) {
            return Ok(());
        }

        let mut error = ValidationError::form(field, self.kind.error_kind());
        if let Some(ref message) = self.message {
            error = error.with_message(message.clone());
        }
        Err(error.into())
    }

    fn rule_name(&self) -> &'static str {
        "document"
    }

    fn parameters(&self) -> Option<Value> {
        Some(serde_json::json!({ "kind": self.kind.name() }))
    }
}
