//! PostgreSQL store tests. Need a migrated database in `DATABASE_URL`.

use cadastro_pessoas::domain::{Endereco, Pessoa};
use cadastro_pessoas::store::{DeletionLogStore, PessoaChanges, PessoaStore, PgPessoaStore, StoreError};

mod common;

use common::{CPF_A, CPF_B, CPF_C};

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_store_roundtrip() {
    let pool = common::setup_test_db().await;
    let store = PgPessoaStore::new(pool);

    let pessoa = Pessoa::new(CPF_A)
        .with_idade(30)
        .with_endereco(Endereco::new("01001000"))
        .with_endereco(Endereco::new("20040020"));
    store.insert(&pessoa).await.unwrap();

    let found = store.find(CPF_A).await.unwrap().unwrap();
    assert_eq!(found, pessoa);
    assert_eq!(store.address_ceps(CPF_A).await.unwrap(), vec!["01001000", "20040020"]);

    // Duplicate key maps to a typed error
    assert!(matches!(store.insert(&pessoa).await, Err(StoreError::Duplicate(_))));

    let changes = PessoaChanges {
        idade: Some(31),
        enderecos: Some(vec![]),
    };
    let updated = store.update(CPF_A, &changes).await.unwrap().unwrap();
    assert_eq!(updated.idade, Some(31));
    assert!(updated.enderecos.is_empty());

    assert!(store.delete(CPF_A).await.unwrap());
    assert!(!store.delete(CPF_A).await.unwrap());
}

#[tokio::test]
#[ignore = "requires DATABASE_URL"]
async fn test_pg_min_age_and_deletion_log() {
    let pool = common::setup_test_db().await;
    let store = PgPessoaStore::new(pool);

    for (cpf, idade) in [(CPF_A, 40), (CPF_B, 16), (CPF_C, 15)] {
        store.insert(&Pessoa::new(cpf).with_idade(idade)).await.unwrap();
    }

    let ages: Vec<Option<i32>> = store
        .find_by_min_age(16)
        .await
        .unwrap()
        .into_iter()
        .map(|p| p.idade)
        .collect();
    assert_eq!(ages, vec![Some(16), Some(40)]);

    let entry = store.append(CPF_C).await.unwrap();
    let recent = store.recent(10).await.unwrap();
    assert_eq!(recent[0].id, entry.id);
}
