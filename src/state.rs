//! Shared application state
//!
//! Every collaborator a handler needs is carried here explicitly.

use std::sync::Arc;

use sqlx::PgPool;

use crate::audit::DeletionAuditService;
use crate::cep::CepLookup;
use crate::i18n::Locale;
use crate::store::{DeletionLogStore, InMemoryPessoaStore, PessoaStore, PgPessoaStore};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PessoaStore>,
    pub deletion_log: Arc<dyn DeletionLogStore>,
    pub cep_lookup: Arc<dyn CepLookup>,
    pub default_locale: Locale,
}

impl AppState {
    pub fn new(
        store: Arc<dyn PessoaStore>,
        deletion_log: Arc<dyn DeletionLogStore>,
        cep_lookup: Arc<dyn CepLookup>,
    ) -> Self {
        Self {
            store,
            deletion_log,
            cep_lookup,
            default_locale: Locale::default(),
        }
    }

    /// State backed by PostgreSQL
    pub fn postgres(pool: PgPool, cep_lookup: Arc<dyn CepLookup>) -> Self {
        let store = Arc::new(PgPessoaStore::new(pool));
        Self::new(store.clone(), store, cep_lookup)
    }

    /// State backed by an in-process store
    pub fn in_memory(store: Arc<InMemoryPessoaStore>, cep_lookup: Arc<dyn CepLookup>) -> Self {
        Self::new(store.clone(), store, cep_lookup)
    }

    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    pub fn audit(&self) -> DeletionAuditService {
        DeletionAuditService::new(self.deletion_log.clone())
    }
}
