//! Validation error types and handling
//!
//! Errors are structured (`Location` + field + `ErrorKind`); the pt-BR text
//! shown to users is produced by the rendering layer in [`crate::render`].

use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt;
use thiserror::Error;

pub type ValidationResult<T> = Result<T, ValidationErrors>;

/// Where in the entity tree an error was found
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "entity", rename_all = "snake_case")]
pub enum Location {
    /// Top-level project fields
    Projeto,
    /// A subprojeto, with its 1-based position when validated inside a project
    Subprojeto { posicao: Option<usize> },
    /// A tarefa: 1-based position inside its subprojeto, plus the subprojeto
    /// position when validated inside a project tree
    Tarefa {
        subprojeto: Option<usize>,
        posicao: usize,
    },
    /// A loose form payload validated through [`crate::rules::Rules`]
    Formulario,
}

impl Location {
    /// Subprojeto position this location hangs under, if it is part of a project tree
    pub fn subprojeto(&self) -> Option<usize> {
        match self {
            Location::Subprojeto { posicao } => *posicao,
            Location::Tarefa { subprojeto, .. } => *subprojeto,
            _ => None,
        }
    }
}

/// What went wrong, independent of how it is worded
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ErrorKind {
    Required,
    TooShort { min: usize },
    TooLong { max: usize },
    InvalidDate,
    TooFarInPast { grace_days: i64 },
    EndNotAfterStart,
    SpanTooLong { max_days: i64 },
    EndBeforeStart,
    StatusNotTerminal,
    InvalidStatus,
    NoTasks,
    InvalidEmail,
    InvalidCpf,
    InvalidCnpj,
    InvalidDocument,
    InvalidCep,
    InvalidType,
    NotInList { allowed: Vec<String> },
}

impl ErrorKind {
    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::Required => "required",
            ErrorKind::TooShort { .. } => "length_min",
            ErrorKind::TooLong { .. } => "length_max",
            ErrorKind::InvalidDate => "invalid_date",
            ErrorKind::TooFarInPast { .. } => "date_too_far_in_past",
            ErrorKind::EndNotAfterStart => "end_not_after_start",
            ErrorKind::SpanTooLong { .. } => "span_too_long",
            ErrorKind::EndBeforeStart => "end_before_start",
            ErrorKind::StatusNotTerminal => "status_not_terminal",
            ErrorKind::InvalidStatus => "invalid_status",
            ErrorKind::NoTasks => "no_tasks",
            ErrorKind::InvalidEmail => "invalid_email",
            ErrorKind::InvalidCpf => "invalid_cpf",
            ErrorKind::InvalidCnpj => "invalid_cnpj",
            ErrorKind::InvalidDocument => "invalid_document",
            ErrorKind::InvalidCep => "invalid_cep",
            ErrorKind::InvalidType => "invalid_type",
            ErrorKind::NotInList { .. } => "not_in_list",
        }
    }

    /// Parameters carried by the kind, as JSON
    pub fn params(&self) -> Option<serde_json::Value> {
        match self {
            ErrorKind::TooShort { min } => Some(json!({ "min": min })),
            ErrorKind::TooLong { max } => Some(json!({ "max": max })),
            ErrorKind::TooFarInPast { grace_days } => Some(json!({ "grace_days": grace_days })),
            ErrorKind::SpanTooLong { max_days } => Some(json!({ "max_days": max_days })),
            ErrorKind::NotInList { allowed } => Some(json!({ "allowed": allowed })),
            _ => None,
        }
    }
}

/// Individual validation error for a specific field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    pub location: Location,
    /// The field that failed validation, using the form's camelCase name
    pub field: String,
    #[serde(flatten)]
    pub kind: ErrorKind,
    /// Overrides the rendered message when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
}

impl ValidationError {
    pub fn new(location: Location, field: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            location,
            field: field.into(),
            kind,
            custom_message: None,
        }
    }

    /// Error raised by a form rule
    pub fn form(field: impl Into<String>, kind: ErrorKind) -> Self {
        Self::new(Location::Formulario, field, kind)
    }

    /// Replace the rendered message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.custom_message = Some(message.into());
        self
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message())
    }
}

/// Ordered collection of validation errors
///
/// Order is part of the contract: errors appear in the order the checks ran.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Error)]
pub struct ValidationErrors {
    pub errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Shorthand for `add(ValidationError::new(..))`
    pub fn push(&mut self, location: Location, field: impl Into<String>, kind: ErrorKind) {
        self.add(ValidationError::new(location, field, kind));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Total number of errors
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    /// Errors reported against a specific field, in order
    pub fn for_field<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationError> + 'a {
        self.errors.iter().filter(move |e| e.field == field)
    }

    pub fn has_field_errors(&self, field: &str) -> bool {
        self.for_field(field).next().is_some()
    }

    pub fn has_kind(&self, kind: &ErrorKind) -> bool {
        self.errors.iter().any(|e| &e.kind == kind)
    }

    /// Append another collection after this one
    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    pub fn from_error(error: ValidationError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// `Ok(())` when empty, `Err(self)` otherwise
    pub fn into_result(self) -> ValidationResult<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Convert to a JSON-serializable format for API responses
    pub fn to_json(&self) -> serde_json::Value {
        let fields: Vec<serde_json::Value> = self
            .errors
            .iter()
            .map(|e| {
                json!({
                    "field": e.field,
                    "code": e.code(),
                    "message": e.message(),
                    "params": e.kind.params(),
                })
            })
            .collect();

        json!({
            "error": {
                "code": "validation_failed",
                "message": "Validation failed",
                "fields": fields
            }
        })
    }
}

impl Extend<ValidationError> for ValidationErrors {
    fn extend<I: IntoIterator<Item = ValidationError>>(&mut self, iter: I) {
        self.errors.extend(iter);
    }
}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.errors.is_empty() {
            write!(f, "No validation errors")
        } else {
            write!(f, "Validation failed with {} error(s):", self.errors.len())?;
            for error in &self.errors {
                write!(f, "\n  {}", error)?;
            }
            Ok(())
        }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self::from_error(error)
    }
}
