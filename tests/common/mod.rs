//! Common test utilities
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

use cadastro_pessoas::api;
use cadastro_pessoas::cep::{CepError, CepInfo, CepLookup};
use cadastro_pessoas::store::InMemoryPessoaStore;
use cadastro_pessoas::AppState;

pub const CPF_A: &str = "11144477735";
pub const CPF_B: &str = "52998224725";
pub const CPF_C: &str = "12345678909";
pub const INVALID_CPF: &str = "12345678900";

/// CEP lookup answering from a fixed table; unknown CEPs get a 404 with a message
#[derive(Default)]
pub struct FakeCepLookup {
    known: HashMap<String, CepInfo>,
}

impl FakeCepLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, cep: &str, state: &str, city: &str, street: &str) -> Self {
        self.known.insert(
            cep.to_string(),
            CepInfo {
                state: Some(state.to_string()),
                city: Some(city.to_string()),
                street: Some(street.to_string()),
            },
        );
        self
    }
}

#[async_trait]
impl CepLookup for FakeCepLookup {
    async fn lookup(&self, cep: &str) -> Result<CepInfo, CepError> {
        self.known.get(cep).cloned().ok_or_else(|| {
            CepError::new(
                Some(404),
                Some("Todos os serviços de CEP retornaram erro.".to_string()),
            )
        })
    }
}

/// App over a fresh in-memory store and the default CEP table
pub fn setup_test_app() -> (Router, Arc<InMemoryPessoaStore>) {
    let store = Arc::new(InMemoryPessoaStore::new());
    (app_with_store(store.clone()), store)
}

/// App over the given store
pub fn app_with_store(store: Arc<InMemoryPessoaStore>) -> Router {
    let cep_lookup = FakeCepLookup::new()
        .with("01001000", "SP", "São Paulo", "Praça da Sé")
        .with("20040020", "RJ", "Rio de Janeiro", "Rua da Assembleia");
    api::build_app(AppState::in_memory(store, Arc::new(cep_lookup)))
}

/// JSON request builder
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Bodyless request builder
pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Read a response body as JSON
pub async fn body_json(response: Response<Body>) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Setup test database - truncate tables for a fresh state
pub async fn setup_test_db() -> PgPool {
    dotenvy::dotenv().ok();
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    sqlx::query("TRUNCATE TABLE log_delecoes, enderecos, pessoas CASCADE")
        .execute(&pool)
        .await
        .expect("Failed to clean up DB");

    pool
}
