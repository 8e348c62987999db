//! Person Creation Handler
//!
//! Validates, enriches addresses from their CEP, then persists.

use std::sync::Arc;

use crate::cep::{enrich_addresses, CepLookup};
use crate::domain::Pessoa;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::PessoaStore;

use super::validation::validate_fields;
use super::CreatePessoaCommand;

/// Handler for person creation
pub struct CreatePessoaHandler {
    store: Arc<dyn PessoaStore>,
    cep_lookup: Arc<dyn CepLookup>,
}

impl CreatePessoaHandler {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            cep_lookup: state.cep_lookup.clone(),
        }
    }

    /// Execute the create command
    pub async fn execute(&self, mut command: CreatePessoaCommand) -> AppResult<Pessoa> {
        let errors = validate_fields(Some(&command.cpf), command.idade);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        enrich_addresses(command.enderecos.as_deref_mut(), self.cep_lookup.as_ref()).await?;

        let pessoa = command.into_pessoa();
        self.store.insert(&pessoa).await?;

        tracing::info!(cpf = %pessoa.cpf, enderecos = pessoa.enderecos.len(), "Person created");
        Ok(pessoa)
    }
}
