//! Bulk Delete Handler
//!
//! Each CPF is an independent unit: one outcome per input, in input order,
//! and no failure stops the batch.

use crate::i18n::{message_for, Locale, MessageKey};
use crate::state::AppState;

use super::{BulkDeleteCommand, BulkDeleteOutcome, DeleteError, DeletePessoaHandler, PessoaQueries};

pub struct BulkDeleteHandler {
    queries: PessoaQueries,
    delete: DeletePessoaHandler,
}

impl BulkDeleteHandler {
    pub fn new(state: &AppState) -> Self {
        Self::from_parts(PessoaQueries::new(state), DeletePessoaHandler::new(state))
    }

    pub fn from_parts(queries: PessoaQueries, delete: DeletePessoaHandler) -> Self {
        Self { queries, delete }
    }

    pub async fn execute(&self, command: BulkDeleteCommand, locale: Locale) -> Vec<BulkDeleteOutcome> {
        let mut outcomes = Vec::with_capacity(command.cpfs.len());

        for cpf in command.cpfs {
            tracing::info!(cpf = %cpf, "Starting bulk delete item");
            let message = self.delete_one(&cpf, locale).await;
            outcomes.push(BulkDeleteOutcome { cpf, message });
        }

        outcomes
    }

    async fn delete_one(&self, cpf: &str, locale: Locale) -> String {
        if !self.queries.exists(cpf).await {
            tracing::error!(cpf = %cpf, "CPF not found");
            return message_for(MessageKey::CpfNotFound, locale).to_string();
        }

        // the guard re-checks the address before touching storage
        match self.delete.execute(cpf).await {
            Ok(()) => {
                tracing::info!(cpf = %cpf, "CPF deleted");
                message_for(MessageKey::SuccessDelete, locale).to_string()
            }
            Err(DeleteError::HasAddress(_)) => {
                tracing::error!(cpf = %cpf, "CPF has a registered address");
                message_for(MessageKey::HasAddress, locale).to_string()
            }
            Err(DeleteError::NotFound(_)) => {
                tracing::error!(cpf = %cpf, "CPF disappeared before delete");
                message_for(MessageKey::CpfNotFound, locale).to_string()
            }
            Err(DeleteError::Failed(reason)) => {
                tracing::error!(cpf = %cpf, reason = ?reason, "Error deleting CPF");
                reason.unwrap_or_else(|| message_for(MessageKey::DeleteFailed, locale).to_string())
            }
        }
    }
}
