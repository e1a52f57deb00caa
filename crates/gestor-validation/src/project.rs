//! Validation of the Projeto → Subprojeto → Tarefa hierarchy
//!
//! Every check for an entity always runs; errors accumulate in a fixed order.
//! The only short-circuit is in [`Validator::check_projeto_completo`], where
//! project-level errors suppress the subprojeto and tarefa checks.

use crate::date::{Clock, FieldDate, SystemClock};
use crate::error::{ErrorKind, Location, ValidationErrors};
use crate::model::{Projeto, StatusTarefa, Subprojeto, Tarefa};
use crate::policy::ValidationPolicy;
use crate::render::ResultadoValidacao;
use std::fmt;
use std::sync::Arc;

/// Stateless validator bound to a policy and a source of "today"
#[derive(Clone)]
pub struct Validator {
    policy: ValidationPolicy,
    clock: Arc<dyn Clock>,
}

impl fmt::Debug for Validator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Validator")
            .field("policy", &self.policy)
            .field("today", &self.clock.today())
            .finish()
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new(ValidationPolicy::default())
    }
}

impl Validator {
    /// Validator using the system clock
    pub fn new(policy: ValidationPolicy) -> Self {
        Self::with_clock(policy, SystemClock)
    }

    /// Validator with an explicit source of "today"
    pub fn with_clock(policy: ValidationPolicy, clock: impl Clock + 'static) -> Self {
        Self {
            policy,
            clock: Arc::new(clock),
        }
    }

    /// Get the active policy
    pub fn policy(&self) -> &ValidationPolicy {
        &self.policy
    }

    /// Project-level fields only
    pub fn check_projeto(&self, projeto: &Projeto) -> ValidationErrors {
        let loc = Location::Projeto;
        let policy = &self.policy;
        let mut errors = ValidationErrors::new();

        check_text(&mut errors, loc, "nome", projeto.nome.as_deref(), policy.nome_min, policy.nome_max);
        check_text(
            &mut errors,
            loc,
            "descricao",
            projeto.descricao.as_deref(),
            policy.descricao_min,
            policy.descricao_max,
        );
        if is_blank(projeto.cliente_id.as_deref()) {
            errors.push(loc, "clienteId", ErrorKind::Required);
        }

        let inicio = required_date(&mut errors, loc, "dataInicio", projeto.data_inicio.as_deref());
        let fim = required_date(&mut errors, loc, "dataFimPrevista", projeto.data_fim_prevista.as_deref());

        if let Some(inicio) = inicio {
            let today = self.clock.today();
            if (today - inicio).num_days() > policy.past_grace_days {
                errors.push(
                    loc,
                    "dataInicio",
                    ErrorKind::TooFarInPast {
                        grace_days: policy.past_grace_days,
                    },
                );
            }
        }

        if let (Some(inicio), Some(fim)) = (inicio, fim) {
            if fim <= inicio {
                errors.push(loc, "dataFimPrevista", ErrorKind::EndNotAfterStart);
            }
            if (fim - inicio).num_days().abs() > policy.max_span_days {
                errors.push(
                    loc,
                    "dataFimPrevista",
                    ErrorKind::SpanTooLong {
                        max_days: policy.max_span_days,
                    },
                );
            }
        }

        tracing::debug!(
            nome = projeto.nome.as_deref().unwrap_or_default(),
            errors = errors.len(),
            "projeto checked"
        );
        errors
    }

    /// `posicao` is the 1-based position inside a project, if any
    pub fn check_subprojeto(&self, subprojeto: &Subprojeto, posicao: Option<usize>) -> ValidationErrors {
        let loc = Location::Subprojeto { posicao };
        let mut errors = ValidationErrors::new();

        if is_blank(subprojeto.subprojeto_id.as_deref()) {
            errors.push(loc, "subprojetoId", ErrorKind::Required);
        }
        if subprojeto.tarefas().is_empty() {
            errors.push(loc, "tarefas", ErrorKind::NoTasks);
        }

        errors
    }

    /// `index` is 0-based; messages show `index + 1`, saturating at `usize::MAX`
    pub fn check_tarefa(&self, tarefa: &Tarefa, index: usize, subprojeto: Option<usize>) -> ValidationErrors {
        let loc = Location::Tarefa {
            subprojeto,
            posicao: index.saturating_add(1),
        };
        let mut errors = ValidationErrors::new();

        if is_blank(tarefa.tarefa_id.as_deref()) {
            errors.push(loc, "tarefaId", ErrorKind::Required);
        }

        let inicio = optional_date(&mut errors, loc, "dataInicio", tarefa.data_inicio.as_deref());
        let prevista = optional_date(&mut errors, loc, "dataFimPrevista", tarefa.data_fim_prevista.as_deref());
        let real = optional_date(&mut errors, loc, "dataFimReal", tarefa.data_fim_real.as_deref());

        if let (Some(inicio), Some(prevista)) = (inicio.date(), prevista.date()) {
            if prevista <= inicio {
                errors.push(loc, "dataFimPrevista", ErrorKind::EndNotAfterStart);
            }
        }

        let status = tarefa.status_code();

        if real.is_present() {
            if let (Some(inicio), Some(real)) = (inicio.date(), real.date()) {
                if real < inicio {
                    errors.push(loc, "dataFimReal", ErrorKind::EndBeforeStart);
                }
            }

            let terminal = status
                .and_then(|s| s.parse::<StatusTarefa>().ok())
                .map(|s| s.is_terminal());
            if status.is_some() && terminal != Some(true) {
                errors.push(loc, "status", ErrorKind::StatusNotTerminal);
            }
        }

        if let Some(code) = status {
            if code.parse::<StatusTarefa>().is_err() {
                errors.push(loc, "status", ErrorKind::InvalidStatus);
            }
        }

        let observacoes = tarefa.observacoes.as_deref().unwrap_or_default();
        if observacoes.chars().count() > self.policy.observacoes_max {
            errors.push(
                loc,
                "observacoes",
                ErrorKind::TooLong {
                    max: self.policy.observacoes_max,
                },
            );
        }

        errors
    }

    /// Project fields first; the tree is only inspected once they pass
    pub fn check_projeto_completo(&self, projeto: &Projeto) -> ValidationErrors {
        let errors = self.check_projeto(projeto);
        if !errors.is_empty() {
            return errors;
        }

        let mut errors = ValidationErrors::new();
        for (i, subprojeto) in projeto.subprojetos().iter().enumerate() {
            let posicao = i + 1;
            errors.merge(self.check_subprojeto(subprojeto, Some(posicao)));

            for (index, tarefa) in subprojeto.tarefas().iter().enumerate() {
                errors.merge(self.check_tarefa(tarefa, index, Some(posicao)));
            }
        }

        tracing::debug!(
            subprojetos = projeto.subprojetos().len(),
            errors = errors.len(),
            "projeto tree checked"
        );
        errors
    }

    /// Rendered form of [`Validator::check_projeto`]
    pub fn validar_projeto(&self, projeto: &Projeto) -> ResultadoValidacao {
        self.check_projeto(projeto).into()
    }

    /// Rendered form of [`Validator::check_subprojeto`] for a standalone subprojeto
    pub fn validar_subprojeto(&self, subprojeto: &Subprojeto) -> ResultadoValidacao {
        self.check_subprojeto(subprojeto, None).into()
    }

    /// Rendered form of [`Validator::check_tarefa`] outside any subprojeto
    pub fn validar_tarefa(&self, tarefa: &Tarefa, index: usize) -> ResultadoValidacao {
        self.check_tarefa(tarefa, index, None).into()
    }

    /// Rendered form of [`Validator::check_projeto_completo`]
    pub fn validar_projeto_completo(&self, projeto: &Projeto) -> ResultadoValidacao {
        self.check_projeto_completo(projeto).into()
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}

/// Required, then min/max on the trimmed char count; stops at the first failure
fn check_text(
    errors: &mut ValidationErrors,
    loc: Location,
    field: &str,
    value: Option<&str>,
    min: usize,
    max: usize,
) {
    let len = value.map_or(0, |v| v.trim().chars().count());
    if len == 0 {
        errors.push(loc, field, ErrorKind::Required);
    } else if len < min {
        errors.push(loc, field, ErrorKind::TooShort { min });
    } else if len > max {
        errors.push(loc, field, ErrorKind::TooLong { max });
    }
}

fn required_date(
    errors: &mut ValidationErrors,
    loc: Location,
    field: &str,
    raw: Option<&str>,
) -> Option<chrono::NaiveDate> {
    match FieldDate::from_field(raw) {
        FieldDate::Absent => {
            errors.push(loc, field, ErrorKind::Required);
            None
        }
        FieldDate::Invalid => {
            errors.push(loc, field, ErrorKind::InvalidDate);
            None
        }
        FieldDate::Valid(date) => Some(date),
    }
}

fn optional_date(errors: &mut ValidationErrors, loc: Location, field: &str, raw: Option<&str>) -> FieldDate {
    let date = FieldDate::from_field(raw);
    if date == FieldDate::Invalid {
        errors.push(loc, field, ErrorKind::InvalidDate);
    }
    date
}

/// [`Validator::validar_projeto`] with the default policy and the system clock
pub fn validar_projeto(projeto: &Projeto) -> ResultadoValidacao {
    Validator::default().validar_projeto(projeto)
}

/// [`Validator::validar_subprojeto`] with the default policy
pub fn validar_subprojeto(subprojeto: &Subprojeto) -> ResultadoValidacao {
    Validator::default().validar_subprojeto(subprojeto)
}

/// [`Validator::validar_tarefa`] with the default policy
pub fn validar_tarefa(tarefa: &Tarefa, index: usize) -> ResultadoValidacao {
    Validator::default().validar_tarefa(tarefa, index)
}

/// [`Validator::validar_projeto_completo`] with the default policy and the system clock
pub fn validar_projeto_completo(projeto: &Projeto) -> ResultadoValidacao {
    Validator::default().validar_projeto_completo(projeto)
}
