//! cadastroPessoas Library
//!
//! Re-exports modules for integration testing and external use.

pub mod api;
pub mod audit;
pub mod cep;
pub mod domain;
pub mod handlers;
pub mod i18n;
pub mod state;
pub mod store;

pub mod config;
pub mod db;
pub mod error;

pub use config::Config;
pub use domain::{DeletionLogEntry, Endereco, OperationContext, Pessoa};
pub use error::{ApiError, AppError, AppResult};
pub use state::AppState;
