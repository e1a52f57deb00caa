//! Normalisation of untrusted form input before validation or submission

use crate::model::{Projeto, StatusTarefa, Subprojeto, Tarefa};

fn trimmed(value: &Option<String>) -> Option<String> {
    Some(value.as_deref().map(str::trim).unwrap_or_default().to_string())
}

fn or_empty(value: &Option<String>) -> Option<String> {
    Some(value.clone().unwrap_or_default())
}

/// Returns a normalised copy; the input is left untouched.
///
/// Text fields are trimmed, absent text and dates become empty strings,
/// absent collections become empty, and a missing status becomes
/// `NAO_INICIADA`. Unknown fields are copied as-is. Idempotent.
pub fn sanitizar_projeto(projeto: &Projeto) -> Projeto {
    let sanitized = Projeto {
        nome: trimmed(&projeto.nome),
        descricao: trimmed(&projeto.descricao),
        cliente_id: trimmed(&projeto.cliente_id),
        data_inicio: or_empty(&projeto.data_inicio),
        data_fim_prevista: or_empty(&projeto.data_fim_prevista),
        subprojetos: Some(projeto.subprojetos().iter().map(sanitizar_subprojeto).collect()),
        extras: projeto.extras.clone(),
    };

    tracing::trace!(
        subprojetos = sanitized.subprojetos().len(),
        "projeto sanitized"
    );
    sanitized
}

pub fn sanitizar_subprojeto(subprojeto: &Subprojeto) -> Subprojeto {
    Subprojeto {
        subprojeto_id: trimmed(&subprojeto.subprojeto_id),
        tarefas: Some(subprojeto.tarefas().iter().map(sanitizar_tarefa).collect()),
        extras: subprojeto.extras.clone(),
    }
}

pub fn sanitizar_tarefa(tarefa: &Tarefa) -> Tarefa {
    let status = tarefa
        .status_code()
        .map(str::to_string)
        .unwrap_or_else(|| StatusTarefa::default().as_str().to_string());

    Tarefa {
        tarefa_id: trimmed(&tarefa.tarefa_id),
        data_inicio: or_empty(&tarefa.data_inicio),
        data_fim_prevista: or_empty(&tarefa.data_fim_prevista),
        data_fim_real: or_empty(&tarefa.data_fim_real),
        status: Some(status),
        observacoes: trimmed(&tarefa.observacoes),
        extras: tarefa.extras.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn messy() -> Projeto {
        serde_json::from_value(json!({
            "nome": "  Portal  ",
            "descricao": "\tReescrita do portal\n",
            "dataInicio": "2025-03-10",
            "origem": "formulario",
            "subprojetos": [
                { "subprojetoId": " s-1 ", "tarefas": [
                    { "tarefaId": " t-1", "observacoes": "  nada  ", "status": "" },
                    { "tarefaId": "t-2", "status": "CONCLUIDA", "dataFimReal": "2025-04-01" }
                ]},
                { "equipe": "backend" }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_sanitize_trims_and_defaults() {
        let p = sanitizar_projeto(&messy());

        assert_eq!(p.nome.as_deref(), Some("Portal"));
        assert_eq!(p.descricao.as_deref(), Some("Reescrita do portal"));
        assert_eq!(p.cliente_id.as_deref(), Some(""));
        assert_eq!(p.data_fim_prevista.as_deref(), Some(""));
        assert_eq!(p.extras.get("origem"), Some(&json!("formulario")));

        let subs = p.subprojetos();
        assert_eq!(subs.len(), 2);
        assert_eq!(subs[0].subprojeto_id.as_deref(), Some("s-1"));

        let t1 = &subs[0].tarefas()[0];
        assert_eq!(t1.tarefa_id.as_deref(), Some("t-1"));
        assert_eq!(t1.observacoes.as_deref(), Some("nada"));
        assert_eq!(t1.status.as_deref(), Some("NAO_INICIADA"));
        assert_eq!(t1.data_fim_real.as_deref(), Some(""));

        let t2 = &subs[0].tarefas()[1];
        assert_eq!(t2.status.as_deref(), Some("CONCLUIDA"));
        assert_eq!(t2.data_fim_real.as_deref(), Some("2025-04-01"));

        assert_eq!(subs[1].subprojeto_id.as_deref(), Some(""));
        assert_eq!(subs[1].tarefas, Some(vec![]));
        assert_eq!(subs[1].extras.get("equipe"), Some(&json!("backend")));
    }

    #[test]
    fn test_sanitize_does_not_mutate_input() {
        let original = messy();
        let before = original.clone();
        let _ = sanitizar_projeto(&original);
        assert_eq!(original, before);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        for p in [messy(), Projeto::default()] {
            let once = sanitizar_projeto(&p);
            assert_eq!(sanitizar_projeto(&once), once);
        }
    }

    #[test]
    fn test_sanitize_empty_projeto() {
        let p = sanitizar_projeto(&Projeto::default());
        assert_eq!(p.nome.as_deref(), Some(""));
        assert_eq!(p.subprojetos, Some(vec![]));
    }
}
