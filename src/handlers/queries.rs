//! Read-side operations
//!
//! The consistency checks (`has_address`, `exists`) fail open: a storage
//! error is logged and reported as "no address" / "not found" instead of
//! being raised to the caller.

use std::sync::Arc;

use crate::domain::Pessoa;
use crate::error::{AppError, AppResult};
use crate::state::AppState;
use crate::store::PessoaStore;

#[derive(Clone)]
pub struct PessoaQueries {
    store: Arc<dyn PessoaStore>,
}

impl PessoaQueries {
    pub fn new(state: &AppState) -> Self {
        Self::from_store(state.store.clone())
    }

    pub fn from_store(store: Arc<dyn PessoaStore>) -> Self {
        Self { store }
    }

    /// True iff the person is stored with at least one address whose
    /// postal code is non-empty.
    pub async fn has_address(&self, cpf: &str) -> bool {
        match self.store.address_ceps(cpf).await {
            Ok(ceps) => ceps.iter().any(|cep| !cep.is_empty()),
            Err(e) => {
                tracing::error!(cpf = %cpf, error = %e, "Address lookup failed, assuming no address");
                false
            }
        }
    }

    pub async fn exists(&self, cpf: &str) -> bool {
        match self.store.exists(cpf).await {
            Ok(exists) => exists,
            Err(e) => {
                tracing::error!(cpf = %cpf, error = %e, "CPF lookup failed, assuming not found");
                false
            }
        }
    }

    /// People aged `min_age` or more, youngest first
    pub async fn at_or_above_age(&self, min_age: i32) -> AppResult<Vec<Pessoa>> {
        tracing::info!(min_age, "Listing people by minimum age");
        Ok(self.store.find_by_min_age(min_age).await?)
    }

    pub async fn get(&self, cpf: &str) -> AppResult<Pessoa> {
        self.store
            .find(cpf)
            .await?
            .ok_or_else(|| AppError::CpfNotFound(cpf.to_string()))
    }

    pub async fn list(&self) -> AppResult<Vec<Pessoa>> {
        Ok(self.store.list().await?)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::Endereco;
    use crate::store::{InMemoryPessoaStore, PessoaChanges, StoreError};
    use async_trait::async_trait;

    /// Store whose every call fails
    pub(crate) struct DownStore;

    #[async_trait]
    impl PessoaStore for DownStore {
        async fn insert(&self, _: &Pessoa) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn update(&self, _: &str, _: &PessoaChanges) -> Result<Option<Pessoa>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn find(&self, _: &str) -> Result<Option<Pessoa>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn list(&self) -> Result<Vec<Pessoa>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn exists(&self, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn address_ceps(&self, _: &str) -> Result<Vec<String>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn delete(&self, _: &str) -> Result<bool, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
        async fn find_by_min_age(&self, _: i32) -> Result<Vec<Pessoa>, StoreError> {
            Err(StoreError::Unavailable("down".into()))
        }
    }

    async fn queries() -> PessoaQueries {
        let store = InMemoryPessoaStore::new()
            .with_pessoas([
                Pessoa::new("11144477735")
                    .with_idade(10)
                    .with_endereco(Endereco::new("01001000")),
                Pessoa::new("52998224725")
                    .with_idade(16)
                    .with_endereco(Endereco::new("")),
                Pessoa::new("12345678909").with_idade(40),
                Pessoa::new("98765432100").with_idade(16),
                Pessoa::new("00000000191").with_endereco(Endereco::new(" ")),
            ])
            .await;
        PessoaQueries::from_store(Arc::new(store))
    }

    #[tokio::test]
    async fn test_has_address() {
        let queries = queries().await;
        assert!(queries.has_address("11144477735").await);
        assert!(!queries.has_address("52998224725").await);
        assert!(!queries.has_address("12345678909").await);
        assert!(!queries.has_address("39053344705").await);
    }

    #[tokio::test]
    async fn test_whitespace_cep_is_an_address() {
        let queries = queries().await;
        assert!(queries.has_address("00000000191").await);
    }

    #[tokio::test]
    async fn test_checks_fail_open_on_storage_error() {
        let queries = PessoaQueries::from_store(Arc::new(DownStore));
        assert!(!queries.has_address("11144477735").await);
        assert!(!queries.exists("11144477735").await);
    }

    #[tokio::test]
    async fn test_at_or_above_age() {
        let queries = queries().await;
        let first = queries.at_or_above_age(16).await.unwrap();
        let ages: Vec<_> = first.iter().map(|p| p.idade.unwrap()).collect();
        assert_eq!(ages, vec![16, 16, 40]);

        // pure read: same input, same output
        assert_eq!(queries.at_or_above_age(16).await.unwrap(), first);
    }

    #[tokio::test]
    async fn test_get_missing_cpf() {
        let queries = queries().await;
        assert!(matches!(
            queries.get("39053344705").await,
            Err(AppError::CpfNotFound(_))
        ));
    }
}
