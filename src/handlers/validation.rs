//! Field Validator
//!
//! Runs before enrichment and persistence on both create and update.

use crate::domain::{is_valid_cpf, FieldError, MIN_AGE};

/// Check the fields that are present; absent fields are not validated.
/// Returns every violation found, age first.
pub fn validate_fields(cpf: Option<&str>, idade: Option<i32>) -> Vec<FieldError> {
    tracing::info!("Validating input fields");

    let mut errors = Vec::new();

    if let Some(idade) = idade {
        if idade < MIN_AGE {
            tracing::warn!(idade, "Rejected: age below minimum");
            errors.push(FieldError::wrong_age());
        }
    }

    if let Some(cpf) = cpf {
        if !is_valid_cpf(cpf) {
            tracing::warn!(cpf = %cpf, "Rejected: invalid CPF");
            errors.push(FieldError::wrong_cpf());
        }
    }

    errors
}
