//! Walks a form submission through sanitization and validation

use gestor_validation::{
    sanitizar_projeto, validar_cnpj, validar_cpf, Projeto, Rules, Validate, ValidationPolicy, Validator,
};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("gestor-validation demo");
    println!("======================\n");

    println!("Documentos:");
    for cpf in ["529.982.247-25", "111.111.111-11"] {
        println!("  CPF {} -> {}", cpf, validar_cpf(cpf));
    }
    println!("  CNPJ 11.222.333/0001-81 -> {}", validar_cnpj("11.222.333/0001-81"));

    println!("\nFormulário de cliente:");
    let cliente = json!({ "nome": "Ana", "email": "ana@", "documento": "529.982.247-25" });
    if let Some(data) = cliente.as_object() {
        match Rules::cliente().validate(data) {
            Ok(()) => println!("  cliente válido"),
            Err(errors) => {
                for error in errors.iter() {
                    println!("  [{}] {}", error.code(), error.message());
                }
            }
        }
    }

    println!("\nProjeto:");
    let raw: Projeto = serde_json::from_value(json!({
        "nome": "  Portal  ",
        "descricao": "curta",
        "clienteId": "c-1",
        "dataInicio": "2020-01-01",
        "dataFimPrevista": "2019-12-01",
        "subprojetos": [{ "subprojetoId": "s-1" }]
    }))?;

    let projeto = sanitizar_projeto(&raw);
    let validator = Validator::new(ValidationPolicy::from_env()?);
    let resultado = validator.validar_projeto_completo(&projeto);

    println!("{}", serde_json::to_string_pretty(&resultado)?);
    Ok(())
}
