//! Predicates for the client forms: e-mail, CPF, CNPJ and CEP

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("e-mail pattern is valid")
});

/// `local@domain.tld` shape check, no normalisation
pub fn validar_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}

/// Keep only ASCII digits
pub fn somente_digitos(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

fn digits(text: &str) -> Vec<u32> {
    text.chars().filter_map(|c| c.to_digit(10)).collect()
}

/// Mod-11 check digit: remainder 0 or 1 maps to 0
fn check_digit(sum: u32) -> u32 {
    match sum % 11 {
        r if r < 2 => 0,
        r => 11 - r,
    }
}

/// CPF check digit over `prefix`, weights counting down to 2
fn cpf_digit(prefix: &[u32]) -> u32 {
    let first_weight = prefix.len() as u32 + 1;
    let sum = prefix
        .iter()
        .enumerate()
        .map(|(i, d)| d * (first_weight - i as u32))
        .sum();
    check_digit(sum)
}

/// CNPJ check digit over `prefix`, weights cycling 9..=2 and starting at `len - 7`
fn cnpj_digit(prefix: &[u32]) -> u32 {
    let mut weight = prefix.len() as u32 - 7;
    let mut sum = 0;
    for d in prefix {
        sum += d * weight;
        weight -= 1;
        if weight < 2 {
            weight = 9;
        }
    }
    check_digit(sum)
}

/// Brazilian individual taxpayer id; punctuation is ignored
pub fn validar_cpf(cpf: &str) -> bool {
    let d = digits(cpf);

    if d.len() != 11 {
        tracing::trace!(len = d.len(), "cpf rejected: wrong digit count");
        return false;
    }
    if d.iter().all(|x| *x == d[0]) {
        tracing::trace!("cpf rejected: repeated digits");
        return false;
    }

    let valid = cpf_digit(&d[..9]) == d[9] && cpf_digit(&d[..10]) == d[10];
    if !valid {
        tracing::trace!("cpf rejected: check digits mismatch");
    }
    valid
}

/// Brazilian company taxpayer id; punctuation is ignored
pub fn validar_cnpj(cnpj: &str) -> bool {
    let d = digits(cnpj);

    if d.len() != 14 {
        tracing::trace!(len = d.len(), "cnpj rejected: wrong digit count");
        return false;
    }

    let valid = cnpj_digit(&d[..12]) == d[12] && cnpj_digit(&d[..13]) == d[13];
    if !valid {
        tracing::trace!("cnpj rejected: check digits mismatch");
    }
    valid
}

/// Which taxpayer id a digit string looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoDocumento {
    Cpf,
    Cnpj,
}

impl TipoDocumento {
    /// Guess from the digit count (11 → CPF, 14 → CNPJ)
    pub fn detectar(text: &str) -> Option<Self> {
        match somente_digitos(text).len() {
            11 => Some(TipoDocumento::Cpf),
            14 => Some(TipoDocumento::Cnpj),
            _ => None,
        }
    }
}

/// CPF or CNPJ, chosen by digit count
pub fn validar_documento(documento: &str) -> bool {
    match TipoDocumento::detectar(documento) {
        Some(TipoDocumento::Cpf) => validar_cpf(documento),
        Some(TipoDocumento::Cnpj) => validar_cnpj(documento),
        None => false,
    }
}

/// CEP reduced to its 8 digits, or `None` if it does not have exactly 8
pub fn normalizar_cep(cep: &str) -> Option<String> {
    let digits = somente_digitos(cep);
    if digits.len() == 8 {
        Some(digits)
    } else {
        tracing::trace!(len = digits.len(), "cep rejected: wrong digit count");
        None
    }
}

pub fn validar_cep(cep: &str) -> bool {
    normalizar_cep(cep).is_some()
}

/// `000.000.000-00`
pub fn formatar_cpf(cpf: &str) -> Option<String> {
    let d = somente_digitos(cpf);
    (d.len() == 11).then(|| format!("{}.{}.{}-{}", &d[..3], &d[3..6], &d[6..9], &d[9..]))
}

/// `00.000.000/0000-00`
pub fn formatar_cnpj(cnpj: &str) -> Option<String> {
    let d = somente_digitos(cnpj);
    (d.len() == 14).then(|| {
        format!("{}.{}.{}/{}-{}", &d[..2], &d[2..5], &d[5..8], &d[8..12], &d[12..])
    })
}

/// `00000-000`
pub fn formatar_cep(cep: &str) -> Option<String> {
    normalizar_cep(cep).map(|d| format!("{}-{}", &d[..5], &d[5..]))
}
