//! In-process store
//!
//! Keeps people and the deletion log behind tokio locks. Used by the test
//! suite and for running the API without a database.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::{DeletionLogEntry, Pessoa};

use super::{DeletionLogStore, PessoaChanges, PessoaStore, StoreError};

#[derive(Debug, Default)]
pub struct InMemoryPessoaStore {
    pessoas: RwLock<BTreeMap<String, Pessoa>>,
    deletion_log: RwLock<Vec<DeletionLogEntry>>,
}

impl InMemoryPessoaStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed people without going through validation or enrichment
    pub async fn with_pessoas(self, pessoas: impl IntoIterator<Item = Pessoa>) -> Self {
        {
            let mut map = self.pessoas.write().await;
            for pessoa in pessoas {
                map.insert(pessoa.cpf.clone(), pessoa);
            }
        }
        self
    }

    /// Snapshot of the deletion log, oldest first
    pub async fn deletion_log(&self) -> Vec<DeletionLogEntry> {
        self.deletion_log.read().await.clone()
    }
}

#[async_trait]
impl PessoaStore for InMemoryPessoaStore {
    async fn insert(&self, pessoa: &Pessoa) -> Result<(), StoreError> {
        let mut map = self.pessoas.write().await;
        if map.contains_key(&pessoa.cpf) {
            return Err(StoreError::Duplicate(pessoa.cpf.clone()));
        }
        map.insert(pessoa.cpf.clone(), pessoa.clone());
        Ok(())
    }

    async fn update(&self, cpf: &str, changes: &PessoaChanges) -> Result<Option<Pessoa>, StoreError> {
        let mut map = self.pessoas.write().await;
        let Some(pessoa) = map.get_mut(cpf) else {
            return Ok(None);
        };

        if let Some(idade) = changes.idade {
            pessoa.idade = Some(idade);
        }
        if let Some(ref enderecos) = changes.enderecos {
            pessoa.enderecos = enderecos.clone();
        }

        Ok(Some(pessoa.clone()))
    }

    async fn find(&self, cpf: &str) -> Result<Option<Pessoa>, StoreError> {
        Ok(self.pessoas.read().await.get(cpf).cloned())
    }

    async fn list(&self) -> Result<Vec<Pessoa>, StoreError> {
        Ok(self.pessoas.read().await.values().cloned().collect())
    }

    async fn exists(&self, cpf: &str) -> Result<bool, StoreError> {
        Ok(self.pessoas.read().await.contains_key(cpf))
    }

    async fn address_ceps(&self, cpf: &str) -> Result<Vec<String>, StoreError> {
        Ok(self
            .pessoas
            .read()
            .await
            .get(cpf)
            .map(|p| p.enderecos.iter().map(|e| e.cep.clone()).collect())
            .unwrap_or_default())
    }

    async fn delete(&self, cpf: &str) -> Result<bool, StoreError> {
        Ok(self.pessoas.write().await.remove(cpf).is_some())
    }

    async fn find_by_min_age(&self, min_age: i32) -> Result<Vec<Pessoa>, StoreError> {
        let mut found: Vec<Pessoa> = self
            .pessoas
            .read()
            .await
            .values()
            .filter(|p| p.idade.is_some_and(|idade| idade >= min_age))
            .cloned()
            .collect();

        // stable: ties keep CPF order from the map
        found.sort_by_key(|p| p.idade);
        Ok(found)
    }
}

#[async_trait]
impl DeletionLogStore for InMemoryPessoaStore {
    async fn append(&self, cpf: &str) -> Result<DeletionLogEntry, StoreError> {
        let entry = DeletionLogEntry::new(cpf);
        self.deletion_log.write().await.push(entry.clone());
        Ok(entry)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<DeletionLogEntry>, StoreError> {
        let limit = usize::try_from(limit).unwrap_or(0);
        Ok(self
            .deletion_log
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Endereco;

    #[tokio::test]
    async fn test_insert_rejects_duplicate_cpf() {
        let store = InMemoryPessoaStore::new();
        let pessoa = Pessoa::new("11144477735").with_idade(30);

        store.insert(&pessoa).await.unwrap();
        let err = store.insert(&pessoa).await.unwrap_err();
        assert!(matches!(err, StoreError::Duplicate(cpf) if cpf == "11144477735"));
    }

    #[tokio::test]
    async fn test_update_replaces_enderecos_and_keeps_idade() {
        let store = InMemoryPessoaStore::new()
            .with_pessoas([Pessoa::new("11144477735")
                .with_idade(30)
                .with_endereco(Endereco::new("01001000"))])
            .await;

        let changes = PessoaChanges {
            idade: None,
            enderecos: Some(vec![]),
        };
        let updated = store.update("11144477735", &changes).await.unwrap().unwrap();

        assert_eq!(updated.idade, Some(30));
        assert!(updated.enderecos.is_empty());
        assert!(store.update("52998224725", &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_min_age_sorted_ascending() {
        let store = InMemoryPessoaStore::new()
            .with_pessoas([
                Pessoa::new("11144477735").with_idade(40),
                Pessoa::new("52998224725").with_idade(10),
                Pessoa::new("12345678909").with_idade(16),
                Pessoa::new("98765432100").with_idade(16),
                Pessoa::new("00000000191"),
            ])
            .await;

        let ages: Vec<_> = store
            .find_by_min_age(16)
            .await
            .unwrap()
            .iter()
            .map(|p| p.idade)
            .collect();
        assert_eq!(ages, vec![Some(16), Some(16), Some(40)]);
    }

    #[tokio::test]
    async fn test_deletion_log_recent_newest_first() {
        let store = InMemoryPessoaStore::new();
        store.append("11144477735").await.unwrap();
        store.append("52998224725").await.unwrap();

        let recent = store.recent(1).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].cpf, "52998224725");
        assert_eq!(store.deletion_log().await.len(), 2);
    }
}
