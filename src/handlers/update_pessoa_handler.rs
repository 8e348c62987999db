//! Update Person Handler
//!
//! Same pipeline as creation: validate, enrich, then write.

use std::sync::Arc;

use crate::cep::{enrich_addresses, CepLookup};
use crate::domain::Pessoa;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::{PessoaChanges, PessoaStore};

use super::validation::validate_fields;
use super::UpdatePessoaCommand;

/// Handler for person updates
pub struct UpdatePessoaHandler {
    store: Arc<dyn PessoaStore>,
    cep_lookup: Arc<dyn CepLookup>,
}

impl UpdatePessoaHandler {
    pub fn new(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
            cep_lookup: state.cep_lookup.clone(),
        }
    }

    /// Execute the update command
    pub async fn execute(&self, mut command: UpdatePessoaCommand) -> AppResult<Pessoa> {
        let errors = validate_fields(Some(&command.cpf), command.idade);
        if !errors.is_empty() {
            return Err(AppError::Validation(errors));
        }

        enrich_addresses(command.enderecos.as_deref_mut(), self.cep_lookup.as_ref()).await?;

        let changes = PessoaChanges {
            idade: command.idade,
            enderecos: command.enderecos,
        };

        let pessoa = self
            .store
            .update(&command.cpf, &changes)
            .await?
            .ok_or_else(|| AppError::CpfNotFound(command.cpf.clone()))?;

        tracing::info!(cpf = %pessoa.cpf, "Person updated");
        Ok(pessoa)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cep::tests::StubLookup;
    use crate::domain::Endereco;
    use crate::store::InMemoryPessoaStore;

    async fn seeded() -> Arc<InMemoryPessoaStore> {
        Arc::new(
            InMemoryPessoaStore::new()
                .with_pessoas([Pessoa::new("11144477735").with_idade(30)])
                .await,
        )
    }

    #[tokio::test]
    async fn test_update_enriches_new_addresses() {
        let store = seeded().await;
        let lookup = StubLookup::default().with("20040002", "RJ", "Rio de Janeiro", "Rua da Assembleia");
        let handler = UpdatePessoaHandler::new(&AppState::in_memory(store.clone(), Arc::new(lookup)));

        let command = UpdatePessoaCommand::new("11144477735".to_string())
            .with_enderecos(vec![Endereco::new("20040002")]);
        let pessoa = handler.execute(command).await.unwrap();

        assert_eq!(pessoa.idade, Some(30));
        assert_eq!(pessoa.enderecos[0].cidade.as_deref(), Some("Rio de Janeiro"));
    }

    #[tokio::test]
    async fn test_update_rejects_low_age() {
        let store = seeded().await;
        let handler = UpdatePessoaHandler::new(&AppState::in_memory(
            store.clone(),
            Arc::new(StubLookup::default()),
        ));

        let err = handler
            .execute(UpdatePessoaCommand::new("11144477735".to_string()).with_idade(15))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(store.find("11144477735").await.unwrap().unwrap().idade, Some(30));
    }

    #[tokio::test]
    async fn test_update_unknown_cpf() {
        let store = seeded().await;
        let handler = UpdatePessoaHandler::new(&AppState::in_memory(
            store,
            Arc::new(StubLookup::default()),
        ));

        let err = handler
            .execute(UpdatePessoaCommand::new("52998224725".to_string()).with_idade(40))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::CpfNotFound(cpf) if cpf == "52998224725"));
    }
}
