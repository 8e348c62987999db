//! Persistence
//!
//! Storage contracts used by the handlers. `PgPessoaStore` is the PostgreSQL
//! implementation; `InMemoryPessoaStore` keeps everything in process.

mod memory;
mod postgres;

use async_trait::async_trait;

use crate::domain::{DeletionLogEntry, Endereco, Pessoa};

pub use memory::InMemoryPessoaStore;
pub use postgres::PgPessoaStore;

/// Changes applied by an update. `None` leaves the stored value untouched;
/// `Some(enderecos)` replaces the whole address list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PessoaChanges {
    pub idade: Option<i32>,
    pub enderecos: Option<Vec<Endereco>>,
}

/// Storage of people and their addresses
#[async_trait]
pub trait PessoaStore: Send + Sync {
    /// Insert a new person with its addresses.
    /// Fails with [`StoreError::Duplicate`] when the CPF is taken.
    async fn insert(&self, pessoa: &Pessoa) -> Result<(), StoreError>;

    /// Apply `changes` to an existing person; `Ok(None)` when absent
    async fn update(&self, cpf: &str, changes: &PessoaChanges) -> Result<Option<Pessoa>, StoreError>;

    async fn find(&self, cpf: &str) -> Result<Option<Pessoa>, StoreError>;

    async fn list(&self) -> Result<Vec<Pessoa>, StoreError>;

    async fn exists(&self, cpf: &str) -> Result<bool, StoreError>;

    /// Postal codes of the person's stored addresses, in address order.
    /// Empty when the person is absent or has no address.
    async fn address_ceps(&self, cpf: &str) -> Result<Vec<String>, StoreError>;

    /// Delete the person and its addresses; `Ok(false)` when absent
    async fn delete(&self, cpf: &str) -> Result<bool, StoreError>;

    /// People with `idade >= min_age`, ascending by `idade`
    async fn find_by_min_age(&self, min_age: i32) -> Result<Vec<Pessoa>, StoreError>;
}

/// Append-only storage of the deletion audit trail
#[async_trait]
pub trait DeletionLogStore: Send + Sync {
    /// Record one deletion in its own unit of work
    async fn append(&self, cpf: &str) -> Result<DeletionLogEntry, StoreError>;

    /// Most recent entries first
    async fn recent(&self, limit: i64) -> Result<Vec<DeletionLogEntry>, StoreError>;
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Entity already exists: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Map a sqlx error, turning unique violations on `cpf` into `Duplicate`
    pub(crate) fn from_insert(error: sqlx::Error, cpf: &str) -> Self {
        let unique_violation = error
            .as_database_error()
            .and_then(|db| db.code())
            .as_deref()
            == Some("23505");

        if unique_violation {
            StoreError::Duplicate(cpf.to_string())
        } else {
            StoreError::Database(error)
        }
    }
}
