//! Field validation errors
//!
//! Pure domain errors that don't depend on infrastructure.

use serde::Serialize;

use crate::i18n::MessageKey;

/// A rejected input field and the message key explaining why
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    #[serde(serialize_with = "serialize_key")]
    pub key: MessageKey,
}

impl FieldError {
    pub fn new(field: &'static str, key: MessageKey) -> Self {
        Self { field, key }
    }

    pub fn wrong_age() -> Self {
        Self::new("idade", MessageKey::WrongAge)
    }

    pub fn wrong_cpf() -> Self {
        Self::new("cpf", MessageKey::WrongCpf)
    }
}

fn serialize_key<S: serde::Serializer>(key: &MessageKey, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(key.code())
}
