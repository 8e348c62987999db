//! People registry model
//!
//! `Pessoa` owns its ordered list of `Endereco`s. The derived address fields
//! (`uf`, `cidade`, `rua`) stay empty until CEP enrichment fills them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Minimum accepted age
pub const MIN_AGE: i32 = 16;

/// A registered person, keyed by CPF
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pessoa {
    pub cpf: String,
    #[serde(default)]
    pub idade: Option<i32>,
    #[serde(default)]
    pub enderecos: Vec<Endereco>,
}

impl Pessoa {
    pub fn new(cpf: impl Into<String>) -> Self {
        Self {
            cpf: cpf.into(),
            idade: None,
            enderecos: Vec::new(),
        }
    }

    pub fn with_idade(mut self, idade: i32) -> Self {
        self.idade = Some(idade);
        self
    }

    pub fn with_endereco(mut self, endereco: Endereco) -> Self {
        self.enderecos.push(endereco);
        self
    }

    /// True if any address carries a non-empty postal code
    pub fn has_address(&self) -> bool {
        self.enderecos.iter().any(Endereco::has_cep)
    }
}

/// An address of a person. `CEP` is input, the rest is derived from it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endereco {
    #[serde(rename = "CEP", default)]
    pub cep: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uf: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cidade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rua: Option<String>,
}

impl Endereco {
    pub fn new(cep: impl Into<String>) -> Self {
        Self {
            cep: cep.into(),
            ..Default::default()
        }
    }

    pub fn has_cep(&self) -> bool {
        !self.cep.is_empty()
    }
}

/// One audit record per successfully deleted person. Append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionLogEntry {
    pub id: Uuid,
    pub cpf: String,
    pub deleted_at: DateTime<Utc>,
}

impl DeletionLogEntry {
    pub fn new(cpf: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            cpf: cpf.into(),
            deleted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endereco_json_uses_cep_uppercase() {
        let endereco: Endereco = serde_json::from_str(r#"{"CEP": "01001000"}"#).unwrap();
        assert_eq!(endereco.cep, "01001000");
        assert!(endereco.uf.is_none());

        let json = serde_json::to_value(&endereco).unwrap();
        assert_eq!(json, serde_json::json!({"CEP": "01001000"}));
    }

    #[test]
    fn test_has_address_requires_non_empty_cep() {
        let without = Pessoa::new("11144477735").with_endereco(Endereco::new(""));
        assert!(!without.has_address());

        let with = without.clone().with_endereco(Endereco::new("01001000"));
        assert!(with.has_address());

        assert!(!Pessoa::new("11144477735").has_address());
    }

    #[test]
    fn test_whitespace_cep_counts_as_address() {
        let pessoa = Pessoa::new("11144477735").with_endereco(Endereco::new(" "));
        assert!(pessoa.has_address());
    }

    #[test]
    fn test_pessoa_deserialize_defaults() {
        let pessoa: Pessoa = serde_json::from_str(r#"{"cpf": "11144477735"}"#).unwrap();
        assert!(pessoa.idade.is_none());
        assert!(pessoa.enderecos.is_empty());
    }
}
