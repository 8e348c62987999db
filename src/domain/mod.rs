//! Domain module
//!
//! Core domain types and business rules.

pub mod context;
pub mod cpf;
pub mod error;
pub mod pessoa;

pub use context::OperationContext;
pub use cpf::is_valid_cpf;
pub use error::FieldError;
pub use pessoa::{DeletionLogEntry, Endereco, Pessoa, MIN_AGE};
