//! Operation Context
//!
//! Contains metadata about the current request for localization and tracing.

use uuid::Uuid;

use crate::error::{ApiError, AppError};
use crate::i18n::Locale;

/// Context for an operation, built by the request middleware.
#[derive(Debug, Clone, Default)]
pub struct OperationContext {
    /// Correlation ID for request tracing
    pub correlation_id: Option<Uuid>,

    /// Locale used for every message returned to the caller
    pub locale: Locale,
}

impl OperationContext {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create context with correlation ID
    pub fn with_correlation_id(mut self, correlation_id: Uuid) -> Self {
        self.correlation_id = Some(correlation_id);
        self
    }

    /// Create context with locale
    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Bind an error to this request's locale for the HTTP response
    pub fn localize(&self, error: AppError) -> ApiError {
        ApiError::new(error, self.locale)
    }
}
