//! pt-BR rendering of structured validation errors
//!
//! The wording here is what the forms display; callers that need error
//! kinds should use [`ValidationErrors`] directly.

use crate::error::{ErrorKind, Location, ValidationError, ValidationErrors};
use serde::{Deserialize, Serialize};

/// Verdict handed to the form layer: `{ "valido": bool, "erros": [..] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultadoValidacao {
    pub valido: bool,
    pub erros: Vec<String>,
}

impl ResultadoValidacao {
    pub fn valido() -> Self {
        Self {
            valido: true,
            erros: Vec::new(),
        }
    }

    pub fn from_erros(erros: Vec<String>) -> Self {
        Self {
            valido: erros.is_empty(),
            erros,
        }
    }
}

impl From<&ValidationErrors> for ResultadoValidacao {
    /// Renders one message per error, except for errors positioned inside a
    /// project tree: consecutive errors of the same subprojeto or tarefa are
    /// joined with ", " under a `Subprojeto {n}` prefix.
    fn from(errors: &ValidationErrors) -> Self {
        let mut erros = Vec::new();
        let mut iter = errors.iter().peekable();

        while let Some(first) = iter.next() {
            let Some(subprojeto) = first.location.subprojeto() else {
                erros.push(first.message());
                continue;
            };

            let mut group = vec![first.message()];
            while let Some(next) = iter.peek() {
                if next.location != first.location {
                    break;
                }
                group.push(next.message());
                iter.next();
            }

            let separator = match first.location {
                Location::Subprojeto { .. } => ":",
                _ => " -",
            };
            erros.push(format!("Subprojeto {}{} {}", subprojeto, separator, group.join(", ")));
        }

        Self::from_erros(erros)
    }
}

impl From<ValidationErrors> for ResultadoValidacao {
    fn from(errors: ValidationErrors) -> Self {
        Self::from(&errors)
    }
}

impl ValidationError {
    /// Human-readable pt-BR message for this error
    pub fn message(&self) -> String {
        if let Some(ref message) = self.custom_message {
            return message.clone();
        }

        match self.location {
            Location::Projeto => projeto_message(&self.field, &self.kind),
            Location::Subprojeto { .. } => subprojeto_message(&self.field, &self.kind),
            Location::Tarefa { posicao, .. } => {
                format!("Tarefa {}: {}", posicao, tarefa_message(&self.field, &self.kind))
            }
            Location::Formulario => form_message(&self.field, &self.kind),
        }
    }
}

fn projeto_message(field: &str, kind: &ErrorKind) -> String {
    match (field, kind) {
        ("nome", ErrorKind::Required) => "Nome do projeto é obrigatório".to_string(),
        ("nome", ErrorKind::TooShort { min }) => {
            format!("Nome do projeto deve ter pelo menos {} caracteres", min)
        }
        ("nome", ErrorKind::TooLong { max }) => {
            format!("Nome do projeto deve ter no máximo {} caracteres", max)
        }
        ("descricao", ErrorKind::Required) => "Descrição do projeto é obrigatória".to_string(),
        ("descricao", ErrorKind::TooShort { min }) => {
            format!("Descrição deve ter pelo menos {} caracteres", min)
        }
        ("descricao", ErrorKind::TooLong { max }) => {
            format!("Descrição deve ter no máximo {} caracteres", max)
        }
        ("clienteId", ErrorKind::Required) => "Cliente é obrigatório".to_string(),
        (_, ErrorKind::TooFarInPast { .. }) => {
            "Data de início não pode ser muito anterior à data atual".to_string()
        }
        (_, ErrorKind::EndNotAfterStart) => {
            "Data fim prevista deve ser posterior à data de início".to_string()
        }
        (_, ErrorKind::SpanTooLong { max_days }) => {
            format!("Duração do projeto não pode exceder {}", duracao(*max_days))
        }
        (field, ErrorKind::Required) => format!("{} é obrigatória", date_label(field)),
        (field, ErrorKind::InvalidDate) => format!("{} inválida", date_label(field)),
        (field, kind) => form_message(field, kind),
    }
}

fn subprojeto_message(field: &str, kind: &ErrorKind) -> String {
    match (field, kind) {
        ("subprojetoId", ErrorKind::Required) => "Subprojeto deve ser selecionado".to_string(),
        ("tarefas", _) => "Subprojeto deve ter pelo menos uma tarefa".to_string(),
        (field, kind) => form_message(field, kind),
    }
}

fn tarefa_message(field: &str, kind: &ErrorKind) -> String {
    match (field, kind) {
        ("tarefaId", ErrorKind::Required) => "ID da tarefa é obrigatório".to_string(),
        (_, ErrorKind::EndNotAfterStart) => {
            "Data fim prevista deve ser posterior à data de início".to_string()
        }
        (_, ErrorKind::EndBeforeStart) => {
            "Data fim real não pode ser anterior à data de início".to_string()
        }
        (_, ErrorKind::StatusNotTerminal) => {
            "Tarefa com data fim real deve ter status 'Concluída' ou 'Cancelada'".to_string()
        }
        (_, ErrorKind::InvalidStatus) => "Status inválido".to_string(),
        ("observacoes", ErrorKind::TooLong { max }) => {
            format!("Observações devem ter no máximo {} caracteres", max)
        }
        (field, ErrorKind::InvalidDate) => format!("{} inválida", date_label(field)),
        (field, kind) => form_message(field, kind),
    }
}

fn form_message(field: &str, kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::Required => format!("{} é obrigatório", field),
        ErrorKind::TooShort { min } => format!("{} deve ter pelo menos {} caracteres", field, min),
        ErrorKind::TooLong { max } => format!("{} deve ter no máximo {} caracteres", field, max),
        ErrorKind::InvalidDate => format!("{} deve ser uma data válida", field),
        ErrorKind::TooFarInPast { .. } => {
            format!("{} não pode ser muito anterior à data atual", field)
        }
        ErrorKind::EndNotAfterStart => format!("{} deve ser posterior à data de início", field),
        ErrorKind::SpanTooLong { max_days } => {
            format!("{} não pode exceder {}", field, duracao(*max_days))
        }
        ErrorKind::EndBeforeStart => format!("{} não pode ser anterior à data de início", field),
        ErrorKind::StatusNotTerminal => {
            format!("{} deve ser 'Concluída' ou 'Cancelada'", field)
        }
        ErrorKind::InvalidStatus => "Status inválido".to_string(),
        ErrorKind::NoTasks => format!("{} deve ter pelo menos uma tarefa", field),
        ErrorKind::InvalidEmail => "E-mail inválido".to_string(),
        ErrorKind::InvalidCpf => "CPF inválido".to_string(),
        ErrorKind::InvalidCnpj => "CNPJ inválido".to_string(),
        ErrorKind::InvalidDocument => "CPF/CNPJ inválido".to_string(),
        ErrorKind::InvalidCep => "CEP inválido. Deve conter 8 dígitos.".to_string(),
        ErrorKind::InvalidType => format!("{} deve ser um texto", field),
        ErrorKind::NotInList { allowed } => {
            format!("{} deve ser um de: {}", field, allowed.join(", "))
        }
    }
}

fn date_label(field: &str) -> &str {
    match field {
        "dataInicio" => "Data de início",
        "dataFimPrevista" => "Data fim prevista",
        "dataFimReal" => "Data fim real",
        other => other,
    }
}

/// "5 anos" for whole years, "N dias" otherwise
fn duracao(days: i64) -> String {
    match days {
        365 => "1 ano".to_string(),
        d if d > 0 && d % 365 == 0 => format!("{} anos", d / 365),
        1 => "1 dia".to_string(),
        d => format!("{} dias", d),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tarefa(subprojeto: Option<usize>, posicao: usize) -> Location {
        Location::Tarefa { subprojeto, posicao }
    }

    #[test]
    fn test_projeto_messages() {
        let cases = vec![
            ("nome", ErrorKind::Required, "Nome do projeto é obrigatório"),
            ("nome", ErrorKind::TooShort { min: 3 }, "Nome do projeto deve ter pelo menos 3 caracteres"),
            ("descricao", ErrorKind::TooLong { max: 1000 }, "Descrição deve ter no máximo 1000 caracteres"),
            ("clienteId", ErrorKind::Required, "Cliente é obrigatório"),
            ("dataInicio", ErrorKind::Required, "Data de início é obrigatória"),
            ("dataFimPrevista", ErrorKind::Required, "Data fim prevista é obrigatória"),
            ("dataFimPrevista", ErrorKind::InvalidDate, "Data fim prevista inválida"),
            ("dataFimPrevista", ErrorKind::SpanTooLong { max_days: 1825 }, "Duração do projeto não pode exceder 5 anos"),
        ];

        for (field, kind, expected) in cases {
            let error = ValidationError::new(Location::Projeto, field, kind);
            assert_eq!(error.message(), expected);
        }
    }

    #[test]
    fn test_span_not_in_whole_years_renders_days() {
        let error = ValidationError::new(
            Location::Projeto,
            "dataFimPrevista",
            ErrorKind::SpanTooLong { max_days: 400 },
        );
        assert_eq!(error.message(), "Duração do projeto não pode exceder 400 dias");
    }

    #[test]
    fn test_tarefa_messages_carry_position() {
        let error = ValidationError::new(tarefa(None, 3), "status", ErrorKind::InvalidStatus);
        assert_eq!(error.message(), "Tarefa 3: Status inválido");

        let error = ValidationError::new(tarefa(None, 1), "dataFimReal", ErrorKind::InvalidDate);
        assert_eq!(error.message(), "Tarefa 1: Data fim real inválida");
    }

    #[test]
    fn test_standalone_errors_render_one_per_entry() {
        let mut errors = ValidationErrors::new();
        errors.push(Location::Subprojeto { posicao: None }, "subprojetoId", ErrorKind::Required);
        errors.push(Location::Subprojeto { posicao: None }, "tarefas", ErrorKind::NoTasks);

        let resultado = ResultadoValidacao::from(&errors);
        assert!(!resultado.valido);
        assert_eq!(
            resultado.erros,
            vec!["Subprojeto deve ser selecionado", "Subprojeto deve ter pelo menos uma tarefa"]
        );
    }

    #[test]
    fn test_tree_errors_are_grouped_per_entity() {
        let mut errors = ValidationErrors::new();
        errors.push(Location::Subprojeto { posicao: Some(2) }, "subprojetoId", ErrorKind::Required);
        errors.push(Location::Subprojeto { posicao: Some(2) }, "tarefas", ErrorKind::NoTasks);
        errors.push(tarefa(Some(3), 1), "tarefaId", ErrorKind::Required);
        errors.push(tarefa(Some(3), 1), "status", ErrorKind::InvalidStatus);
        errors.push(tarefa(Some(3), 2), "tarefaId", ErrorKind::Required);

        let resultado = ResultadoValidacao::from(errors);
        assert_eq!(
            resultado.erros,
            vec![
                "Subprojeto 2: Subprojeto deve ser selecionado, Subprojeto deve ter pelo menos uma tarefa",
                "Subprojeto 3 - Tarefa 1: ID da tarefa é obrigatório, Tarefa 1: Status inválido",
                "Subprojeto 3 - Tarefa 2: ID da tarefa é obrigatório",
            ]
        );
    }

    #[test]
    fn test_empty_errors_are_valid() {
        let resultado = ResultadoValidacao::from(&ValidationErrors::new());
        assert_eq!(resultado, ResultadoValidacao::valido());
    }

    #[test]
    fn test_form_messages() {
        let error = ValidationError::form(
            "status",
            ErrorKind::NotInList {
                allowed: vec!["A".to_string(), "B".to_string()],
            },
        );
        assert_eq!(error.message(), "status deve ser um de: A, B");
        assert_eq!(
            ValidationError::form("cep", ErrorKind::InvalidCep).message(),
            "CEP inválido. Deve conter 8 dígitos."
        );
    }
}
