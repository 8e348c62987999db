//! PostgreSQL store
//!
//! Tables: `pessoas`, `enderecos` (cascades on person delete) and
//! `log_delecoes`. See `migrations/0001_init.sql`.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::domain::{DeletionLogEntry, Endereco, Pessoa};

use super::{DeletionLogStore, PessoaChanges, PessoaStore, StoreError};

#[derive(Debug, Clone)]
pub struct PgPessoaStore {
    pool: PgPool,
}

/// Internal row type for address queries.
#[derive(Debug, sqlx::FromRow)]
struct EnderecoRow {
    pessoa_cpf: String,
    cep: String,
    uf: Option<String>,
    cidade: Option<String>,
    rua: Option<String>,
}

impl From<EnderecoRow> for Endereco {
    fn from(row: EnderecoRow) -> Self {
        Endereco {
            cep: row.cep,
            uf: row.uf,
            cidade: row.cidade,
            rua: row.rua,
        }
    }
}

impl PgPessoaStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Attach stored addresses to `(cpf, idade)` rows, preserving row order
    async fn with_enderecos(&self, rows: Vec<(String, Option<i32>)>) -> Result<Vec<Pessoa>, StoreError> {
        let cpfs: Vec<String> = rows.iter().map(|(cpf, _)| cpf.clone()).collect();

        let enderecos: Vec<EnderecoRow> = sqlx::query_as(
            r#"
            SELECT pessoa_cpf, cep, uf, cidade, rua
            FROM enderecos
            WHERE pessoa_cpf = ANY($1)
            ORDER BY pessoa_cpf, posicao
            "#,
        )
        .bind(&cpfs)
        .fetch_all(&self.pool)
        .await?;

        let mut by_cpf: HashMap<String, Vec<Endereco>> = HashMap::new();
        for row in enderecos {
            by_cpf.entry(row.pessoa_cpf.clone()).or_default().push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|(cpf, idade)| Pessoa {
                enderecos: by_cpf.remove(&cpf).unwrap_or_default(),
                cpf,
                idade,
            })
            .collect())
    }

    async fn insert_enderecos(
        tx: &mut Transaction<'_, Postgres>,
        cpf: &str,
        enderecos: &[Endereco],
    ) -> Result<(), sqlx::Error> {
        for (posicao, endereco) in enderecos.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO enderecos (pessoa_cpf, posicao, cep, uf, cidade, rua)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(cpf)
            .bind(posicao as i32)
            .bind(&endereco.cep)
            .bind(&endereco.uf)
            .bind(&endereco.cidade)
            .bind(&endereco.rua)
            .execute(&mut **tx)
            .await?;
        }
        Ok(())
    }
}

#[async_trait]
impl PessoaStore for PgPessoaStore {
    async fn insert(&self, pessoa: &Pessoa) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("INSERT INTO pessoas (cpf, idade) VALUES ($1, $2)")
            .bind(&pessoa.cpf)
            .bind(pessoa.idade)
            .execute(&mut *tx)
            .await
            .map_err(|e| StoreError::from_insert(e, &pessoa.cpf))?;

        Self::insert_enderecos(&mut tx, &pessoa.cpf, &pessoa.enderecos).await?;

        tx.commit().await?;
        Ok(())
    }

    async fn update(&self, cpf: &str, changes: &PessoaChanges) -> Result<Option<Pessoa>, StoreError> {
        let mut tx = self.pool.begin().await?;

        let rows_affected = sqlx::query("UPDATE pessoas SET idade = COALESCE($2, idade) WHERE cpf = $1")
            .bind(cpf)
            .bind(changes.idade)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Ok(None);
        }

        if let Some(ref enderecos) = changes.enderecos {
            sqlx::query("DELETE FROM enderecos WHERE pessoa_cpf = $1")
                .bind(cpf)
                .execute(&mut *tx)
                .await?;
            Self::insert_enderecos(&mut tx, cpf, enderecos).await?;
        }

        tx.commit().await?;
        self.find(cpf).await
    }

    async fn find(&self, cpf: &str) -> Result<Option<Pessoa>, StoreError> {
        let row: Option<(String, Option<i32>)> =
            sqlx::query_as("SELECT cpf, idade FROM pessoas WHERE cpf = $1")
                .bind(cpf)
                .fetch_optional(&self.pool)
                .await?;

        match row {
            Some(row) => Ok(self.with_enderecos(vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    async fn list(&self) -> Result<Vec<Pessoa>, StoreError> {
        let rows: Vec<(String, Option<i32>)> =
            sqlx::query_as("SELECT cpf, idade FROM pessoas ORDER BY cpf")
                .fetch_all(&self.pool)
                .await?;

        self.with_enderecos(rows).await
    }

    async fn exists(&self, cpf: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM pessoas WHERE cpf = $1)")
            .bind(cpf)
            .fetch_one(&self.pool)
            .await?;

        Ok(exists)
    }

    async fn address_ceps(&self, cpf: &str) -> Result<Vec<String>, StoreError> {
        let ceps: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT e.cep
            FROM pessoas p
            JOIN enderecos e ON e.pessoa_cpf = p.cpf
            WHERE p.cpf = $1
            ORDER BY e.posicao
            "#,
        )
        .bind(cpf)
        .fetch_all(&self.pool)
        .await?;

        Ok(ceps)
    }

    async fn delete(&self, cpf: &str) -> Result<bool, StoreError> {
        let rows_affected = sqlx::query("DELETE FROM pessoas WHERE cpf = $1")
            .bind(cpf)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows_affected > 0)
    }

    async fn find_by_min_age(&self, min_age: i32) -> Result<Vec<Pessoa>, StoreError> {
        let rows: Vec<(String, Option<i32>)> = sqlx::query_as(
            "SELECT cpf, idade FROM pessoas WHERE idade >= $1 ORDER BY idade, cpf",
        )
        .bind(min_age)
        .fetch_all(&self.pool)
        .await?;

        self.with_enderecos(rows).await
    }
}

#[async_trait]
impl DeletionLogStore for PgPessoaStore {
    async fn append(&self, cpf: &str) -> Result<DeletionLogEntry, StoreError> {
        let entry = DeletionLogEntry::new(cpf);

        let mut tx = self.pool.begin().await?;
        sqlx::query("INSERT INTO log_delecoes (id, cpf, deleted_at) VALUES ($1, $2, $3)")
            .bind(entry.id)
            .bind(&entry.cpf)
            .bind(entry.deleted_at)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(entry)
    }

    async fn recent(&self, limit: i64) -> Result<Vec<DeletionLogEntry>, StoreError> {
        let rows: Vec<(Uuid, String, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, cpf, deleted_at
            FROM log_delecoes
            ORDER BY deleted_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(id, cpf, deleted_at)| DeletionLogEntry { id, cpf, deleted_at })
            .collect())
    }
}
