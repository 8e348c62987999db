//! Command Handlers module
//!
//! Handlers that orchestrate the registry's business operations.
//! Each handler receives its collaborators from the `AppState`.

mod bulk_delete_handler;
mod commands;
mod create_pessoa_handler;
mod delete_pessoa_handler;
mod queries;
mod update_pessoa_handler;
pub mod validation;

pub use bulk_delete_handler::BulkDeleteHandler;
pub use commands::*;
pub use create_pessoa_handler::CreatePessoaHandler;
pub use delete_pessoa_handler::{DeleteError, DeletePessoaHandler};
pub use queries::PessoaQueries;
pub use update_pessoa_handler::UpdatePessoaHandler;
pub use validation::validate_fields;
