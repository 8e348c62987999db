//! Command definitions
//!
//! Commands represent intentions to change the registry.

use serde::{Deserialize, Serialize};

use crate::domain::{Endereco, Pessoa};

// =========================================================================
// CreatePessoaCommand
// =========================================================================

/// Command to register a new person
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePessoaCommand {
    pub cpf: String,
    pub idade: Option<i32>,
    /// `None` when the request carried no address list at all
    pub enderecos: Option<Vec<Endereco>>,
}

impl CreatePessoaCommand {
    pub fn new(cpf: String) -> Self {
        Self {
            cpf,
            idade: None,
            enderecos: None,
        }
    }

    pub fn with_idade(mut self, idade: i32) -> Self {
        self.idade = Some(idade);
        self
    }

    pub fn with_enderecos(mut self, enderecos: Vec<Endereco>) -> Self {
        self.enderecos = Some(enderecos);
        self
    }

    pub fn into_pessoa(self) -> Pessoa {
        Pessoa {
            cpf: self.cpf,
            idade: self.idade,
            enderecos: self.enderecos.unwrap_or_default(),
        }
    }
}

// =========================================================================
// UpdatePessoaCommand
// =========================================================================

/// Command to update an existing person. The CPF is the key and never changes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdatePessoaCommand {
    pub cpf: String,
    pub idade: Option<i32>,
    /// Replaces the whole address list when present
    pub enderecos: Option<Vec<Endereco>>,
}

impl UpdatePessoaCommand {
    pub fn new(cpf: String) -> Self {
        Self {
            cpf,
            idade: None,
            enderecos: None,
        }
    }

    pub fn with_idade(mut self, idade: i32) -> Self {
        self.idade = Some(idade);
        self
    }

    pub fn with_enderecos(mut self, enderecos: Vec<Endereco>) -> Self {
        self.enderecos = Some(enderecos);
        self
    }
}

// =========================================================================
// BulkDeleteCommand
// =========================================================================

/// Command to delete several people in one call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkDeleteCommand {
    pub cpfs: Vec<String>,
}

impl BulkDeleteCommand {
    pub fn new(cpfs: Vec<String>) -> Self {
        Self { cpfs }
    }
}

/// Outcome of one CPF within a bulk delete
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkDeleteOutcome {
    pub cpf: String,
    pub message: String,
}
