//! Delete Person Handler
//!
//! Guarded delete: a person with a stored address is never deleted.
//! After a confirmed delete the post-success hook writes the audit entry.
//!
//! RECEIVED -> has address? -> REJECTED
//!                          -> ALLOWED -> storage delete -> SUCCEEDED -> hook

use std::sync::Arc;

use crate::audit::DeletionHook;
use crate::error::AppError;
use crate::state::AppState;
use crate::store::PessoaStore;

use super::PessoaQueries;

/// Why a guarded delete did not happen
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeleteError {
    #[error("Person {0} has an address")]
    HasAddress(String),

    #[error("Person {0} not found")]
    NotFound(String),

    #[error("Delete failed: {}", .0.as_deref().unwrap_or("unknown error"))]
    Failed(Option<String>),
}

impl From<DeleteError> for AppError {
    fn from(error: DeleteError) -> Self {
        match error {
            DeleteError::HasAddress(cpf) => AppError::HasAddress(cpf),
            DeleteError::NotFound(cpf) => AppError::CpfNotFound(cpf),
            DeleteError::Failed(reason) => AppError::DeleteFailed(reason),
        }
    }
}

/// Handler for guarded deletion
pub struct DeletePessoaHandler {
    store: Arc<dyn PessoaStore>,
    queries: PessoaQueries,
    on_deleted: Arc<dyn DeletionHook>,
}

impl DeletePessoaHandler {
    pub fn new(state: &AppState) -> Self {
        Self::with_hook(state.store.clone(), Arc::new(state.audit()))
    }

    pub fn with_hook(store: Arc<dyn PessoaStore>, on_deleted: Arc<dyn DeletionHook>) -> Self {
        Self {
            queries: PessoaQueries::from_store(store.clone()),
            store,
            on_deleted,
        }
    }

    /// Delete `cpf` unless it has an address
    pub async fn execute(&self, cpf: &str) -> Result<(), DeleteError> {
        if self.queries.has_address(cpf).await {
            tracing::warn!(cpf = %cpf, "Delete rejected: person has an address");
            return Err(DeleteError::HasAddress(cpf.to_string()));
        }

        match self.store.delete(cpf).await {
            Ok(true) => {}
            Ok(false) => return Err(DeleteError::NotFound(cpf.to_string())),
            Err(e) => {
                tracing::error!(cpf = %cpf, error = %e, "Delete failed");
                let reason = e.to_string();
                return Err(DeleteError::Failed((!reason.is_empty()).then_some(reason)));
            }
        }

        tracing::info!(cpf = %cpf, "Person deleted");
        self.on_deleted.on_deleted(cpf).await;

        Ok(())
    }
}
