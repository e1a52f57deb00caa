//! # gestor-validation
//!
//! Validation and sanitization engine for the gestor administration forms.
//!
//! - [`project`] checks the Projeto → Subprojeto → Tarefa hierarchy and
//!   returns structured [`ValidationErrors`] or a rendered
//!   [`ResultadoValidacao`] (`{ valido, erros }`).
//! - [`sanitize`] normalises raw form input without mutating it.
//! - [`documents`] holds the e-mail, CPF, CNPJ and CEP predicates used by the
//!   client forms, and [`rules`] wires them into per-field rule sets.
//!
//! Everything is synchronous and side-effect free.

pub mod date;
pub mod documents;
pub mod error;
pub mod model;
pub mod policy;
pub mod project;
pub mod render;
pub mod rules;
pub mod sanitize;
pub mod traits;
pub mod validators;

// Re-exports for easy access
pub use date::{Clock, FixedClock, SystemClock};
pub use documents::{
    formatar_cep, formatar_cnpj, formatar_cpf, normalizar_cep, somente_digitos, validar_cep, validar_cnpj,
    validar_cpf, validar_documento, validar_email, TipoDocumento,
};
pub use error::{ErrorKind, Location, ValidationError, ValidationErrors, ValidationResult};
pub use model::{Projeto, StatusTarefa, Subprojeto, Tarefa};
pub use policy::{ConfigError, ValidationPolicy};
pub use project::{validar_projeto, validar_projeto_completo, validar_subprojeto, validar_tarefa, Validator};
pub use render::ResultadoValidacao;
pub use rules::Rules;
pub use sanitize::sanitizar_projeto;
pub use traits::{Validate, ValidateField, ValidateRequest, ValidationRule};

pub use validators::{DocumentKind, DocumentRule, EmailRule, LengthRule, OneOfRule, RequiredRule};

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn test_public_types_are_thread_safe() {
        assert_send_sync::<Validator>();
        assert_send_sync::<Rules>();
        assert_send_sync::<ValidationErrors>();
        assert_send_sync::<Projeto>();
    }
}
