//! Localization
//!
//! Typed message keys and the per-locale message tables.
//! Every client-facing text goes through [`message_for`].

use std::fmt;

/// Keys of every client-facing message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageKey {
    WrongAge,
    WrongCpf,
    ApiCepError,
    CpfNotFound,
    HasAddress,
    SuccessDelete,
    DeleteFailed,
    EntityAlreadyExists,
    InvalidRequest,
    InternalError,
}

impl MessageKey {
    /// Stable machine-readable code, also used as `error_code` in responses
    pub fn code(&self) -> &'static str {
        match self {
            MessageKey::WrongAge => "wrong_age",
            MessageKey::WrongCpf => "wrong_cpf",
            MessageKey::ApiCepError => "api_cep_error",
            MessageKey::CpfNotFound => "cpf_not_found",
            MessageKey::HasAddress => "has_address",
            MessageKey::SuccessDelete => "success_delete",
            MessageKey::DeleteFailed => "delete_failed",
            MessageKey::EntityAlreadyExists => "entity_already_exists",
            MessageKey::InvalidRequest => "invalid_request",
            MessageKey::InternalError => "internal_error",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Supported locales
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    En,
    PtBr,
}

impl Locale {
    /// Resolve a language tag (`pt-BR`, `pt`, `en-US`, ...) by its primary subtag.
    /// Unknown languages yield `None` so the caller can apply its own default.
    pub fn from_tag(tag: &str) -> Option<Self> {
        let primary = tag
            .trim()
            .split(|c: char| c == '-' || c == '_')
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();

        match primary.as_str() {
            "pt" => Some(Locale::PtBr),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    /// Pick the first supported language of an `Accept-Language` header value.
    /// Quality weights are ignored; order of appearance wins.
    pub fn from_accept_language(header: &str) -> Option<Self> {
        header
            .split(',')
            .filter_map(|part| part.split(';').next())
            .find_map(Self::from_tag)
    }

    pub fn as_tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::PtBr => "pt-BR",
        }
    }
}

/// Look up the text of `key` in `locale`
pub fn message_for(key: MessageKey, locale: Locale) -> &'static str {
    match locale {
        Locale::En => match key {
            MessageKey::WrongAge => "Age must be at least 16 years",
            MessageKey::WrongCpf => "Invalid CPF",
            MessageKey::ApiCepError => "Error looking up the postal code (CEP)",
            MessageKey::CpfNotFound => "CPF not found",
            MessageKey::HasAddress => "Person has a registered address and cannot be deleted",
            MessageKey::SuccessDelete => "Record deleted successfully",
            MessageKey::DeleteFailed => "Failed to delete record",
            MessageKey::EntityAlreadyExists => "A person with this CPF already exists",
            MessageKey::InvalidRequest => "Invalid request",
            MessageKey::InternalError => "Internal server error",
        },
        Locale::PtBr => match key {
            MessageKey::WrongAge => "A idade deve ser de pelo menos 16 anos",
            MessageKey::WrongCpf => "CPF inválido",
            MessageKey::ApiCepError => "Erro ao consultar o CEP",
            MessageKey::CpfNotFound => "CPF não encontrado",
            MessageKey::HasAddress => "A pessoa possui endereço cadastrado e não pode ser excluída",
            MessageKey::SuccessDelete => "Cadastro excluído com sucesso",
            MessageKey::DeleteFailed => "Falha ao excluir o cadastro",
            MessageKey::EntityAlreadyExists => "Já existe uma pessoa cadastrada com este CPF",
            MessageKey::InvalidRequest => "Requisição inválida",
            MessageKey::InternalError => "Erro interno do servidor",
        },
    }
}
