//! Error handling module
//!
//! Centralized error types and HTTP response conversion. Client-facing
//! text is resolved from [`MessageKey`]s in the caller's locale when the
//! response is built.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::cep::CepError;
use crate::domain::FieldError;
use crate::i18n::{message_for, Locale, MessageKey};
use crate::store::StoreError;

/// Application-wide Result type
pub type AppResult<T> = Result<T, AppError>;

/// Application error types
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Client errors (4xx)
    #[error("Validation failed: {0:?}")]
    Validation(Vec<FieldError>),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("CPF not found: {0}")]
    CpfNotFound(String),

    #[error("Person has an address: {0}")]
    HasAddress(String),

    #[error("Entity already exists: {0}")]
    AlreadyExists(String),

    // Upstream errors
    #[error(transparent)]
    Upstream(#[from] CepError),

    // Server errors (5xx)
    #[error("Delete failed: {}", .0.as_deref().unwrap_or("unknown error"))]
    DeleteFailed(Option<String>),

    #[error("Storage error: {0}")]
    Store(StoreError),
}

impl From<StoreError> for AppError {
    fn from(error: StoreError) -> Self {
        match error {
            StoreError::Duplicate(cpf) => AppError::AlreadyExists(cpf),
            other => AppError::Store(other),
        }
    }
}

/// Malformed or incomplete JSON body
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

/// Missing or unparsable query string
impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl AppError {
    /// Message key used for the response text
    pub fn message_key(&self) -> MessageKey {
        match self {
            AppError::Validation(errors) => errors
                .first()
                .map(|e| e.key)
                .unwrap_or(MessageKey::InvalidRequest),
            AppError::InvalidRequest(_) => MessageKey::InvalidRequest,
            AppError::CpfNotFound(_) => MessageKey::CpfNotFound,
            AppError::HasAddress(_) => MessageKey::HasAddress,
            AppError::AlreadyExists(_) => MessageKey::EntityAlreadyExists,
            AppError::Upstream(_) => MessageKey::ApiCepError,
            AppError::DeleteFailed(_) => MessageKey::DeleteFailed,
            AppError::Store(_) => MessageKey::InternalError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            AppError::CpfNotFound(_) => StatusCode::NOT_FOUND,
            AppError::HasAddress(_) | AppError::AlreadyExists(_) => StatusCode::CONFLICT,
            AppError::Upstream(e) => e
                .status
                .and_then(|s| StatusCode::from_u16(s).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            AppError::DeleteFailed(_) | AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// An [`AppError`] bound to the locale of the request that produced it
#[derive(Debug)]
pub struct ApiError {
    pub error: AppError,
    pub locale: Locale,
}

impl ApiError {
    pub fn new(error: AppError, locale: Locale) -> Self {
        Self { error, locale }
    }
}

impl From<AppError> for ApiError {
    fn from(error: AppError) -> Self {
        Self::new(error, Locale::default())
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldMessage>>,
}

/// Per-field validation message
#[derive(Debug, Serialize)]
pub struct FieldMessage {
    pub field: &'static str,
    pub message: &'static str,
}

impl ErrorResponse {
    pub fn build(error: &AppError, locale: Locale) -> Self {
        let key = error.message_key();
        let localized = message_for(key, locale).to_string();

        let (message, details) = match error {
            AppError::Validation(errors) => {
                let details = errors
                    .iter()
                    .map(|e| FieldMessage {
                        field: e.field,
                        message: message_for(e.key, locale),
                    })
                    .collect();
                (localized, Some(details))
            }
            // Upstream text is passed through when the service provides one
            AppError::Upstream(e) => (e.message.clone().unwrap_or(localized), None),
            AppError::DeleteFailed(reason) => (reason.clone().unwrap_or(localized), None),
            _ => (localized, None),
        };

        Self {
            error: message,
            error_code: key.code().to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();

        match &self.error {
            AppError::Store(e) => tracing::error!("Storage error: {:?}", e),
            other => tracing::debug!(status = %status, "Request rejected: {}", other),
        }

        let body = ErrorResponse::build(&self.error, self.locale);
        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        ApiError::from(self).into_response()
    }
}
