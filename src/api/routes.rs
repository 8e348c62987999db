//! API Routes
//!
//! HTTP endpoint definitions.

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Extension, Path, Query, State,
    },
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::audit::DEFAULT_RECENT_LIMIT;
use crate::domain::{DeletionLogEntry, Endereco, OperationContext, Pessoa};
use crate::error::{ApiError, AppError};
use crate::handlers::{
    BulkDeleteCommand, BulkDeleteHandler, BulkDeleteOutcome, CreatePessoaCommand,
    CreatePessoaHandler, DeletePessoaHandler, PessoaQueries, UpdatePessoaCommand,
    UpdatePessoaHandler,
};
use crate::state::AppState;

// =========================================================================
// Request/Response types
// =========================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePessoaRequest {
    pub cpf: String,
    #[serde(default)]
    pub idade: Option<i32>,
    #[serde(default)]
    pub enderecos: Option<Vec<Endereco>>,
}

/// Body of an update. The CPF comes from the path; a `cpf` in the body is ignored.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct UpdatePessoaRequest {
    #[serde(default)]
    pub idade: Option<i32>,
    #[serde(default)]
    pub enderecos: Option<Vec<Endereco>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BulkDeleteRequest {
    pub cpfs: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct AgeQuery {
    pub idade: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HasAddressResponse {
    pub value: bool,
}

#[derive(Debug, Deserialize)]
pub struct DeletionLogQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_RECENT_LIMIT
}

// =========================================================================
// API Router
// =========================================================================

/// Create the API router
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/pessoas", post(create_pessoa).get(list_pessoas))
        .route(
            "/pessoas/:cpf",
            get(get_pessoa).patch(update_pessoa).delete(delete_pessoa),
        )
        .route("/pessoas/:cpf/has-address", get(has_address))
        .route("/bulk-delete-clients", post(bulk_delete_clients))
        .route("/clients-by-age", get(clients_by_age))
        .route("/deletion-logs", get(deletion_logs))
}

// =========================================================================
// POST /pessoas
// =========================================================================

/// Register a new person
async fn create_pessoa(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    payload: Result<Json<CreatePessoaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Pessoa>), ApiError> {
    let Json(request) = payload.map_err(|e| context.localize(e.into()))?;
    let handler = CreatePessoaHandler::new(&state);

    let command = CreatePessoaCommand {
        cpf: request.cpf,
        idade: request.idade,
        enderecos: request.enderecos,
    };

    let pessoa = handler
        .execute(command)
        .await
        .map_err(|e| context.localize(e))?;

    Ok((StatusCode::CREATED, Json(pessoa)))
}

// =========================================================================
// GET /pessoas, GET /pessoas/:cpf
// =========================================================================

async fn list_pessoas(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
) -> Result<Json<Vec<Pessoa>>, ApiError> {
    let pessoas = PessoaQueries::new(&state)
        .list()
        .await
        .map_err(|e| context.localize(e))?;

    Ok(Json(pessoas))
}

async fn get_pessoa(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path(cpf): Path<String>,
) -> Result<Json<Pessoa>, ApiError> {
    let pessoa = PessoaQueries::new(&state)
        .get(&cpf)
        .await
        .map_err(|e| context.localize(e))?;

    Ok(Json(pessoa))
}

// =========================================================================
// PATCH /pessoas/:cpf
// =========================================================================

async fn update_pessoa(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path(cpf): Path<String>,
    payload: Result<Json<UpdatePessoaRequest>, JsonRejection>,
) -> Result<Json<Pessoa>, ApiError> {
    let Json(request) = payload.map_err(|e| context.localize(e.into()))?;
    let handler = UpdatePessoaHandler::new(&state);

    let command = UpdatePessoaCommand {
        cpf,
        idade: request.idade,
        enderecos: request.enderecos,
    };

    let pessoa = handler
        .execute(command)
        .await
        .map_err(|e| context.localize(e))?;

    Ok(Json(pessoa))
}

// =========================================================================
// DELETE /pessoas/:cpf
// =========================================================================

/// Guarded delete; the audit entry is written by the handler's hook
async fn delete_pessoa(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    Path(cpf): Path<String>,
) -> Result<StatusCode, ApiError> {
    DeletePessoaHandler::new(&state)
        .execute(&cpf)
        .await
        .map_err(|e| context.localize(AppError::from(e)))?;

    Ok(StatusCode::NO_CONTENT)
}

// =========================================================================
// Actions
// =========================================================================

/// hasAddress(cpf) -> bool
async fn has_address(
    State(state): State<AppState>,
    Path(cpf): Path<String>,
) -> Json<HasAddressResponse> {
    let value = PessoaQueries::new(&state).has_address(&cpf).await;
    Json(HasAddressResponse { value })
}

/// bulkDelete(cpfs) -> [{cpf, message}]
async fn bulk_delete_clients(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    payload: Result<Json<BulkDeleteRequest>, JsonRejection>,
) -> Result<Json<Vec<BulkDeleteOutcome>>, ApiError> {
    let Json(request) = payload.map_err(|e| context.localize(e.into()))?;
    let outcomes = BulkDeleteHandler::new(&state)
        .execute(BulkDeleteCommand::new(request.cpfs), context.locale)
        .await;

    Ok(Json(outcomes))
}

/// getClientsByAge(idade) -> [Pessoa]
async fn clients_by_age(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    query: Result<Query<AgeQuery>, QueryRejection>,
) -> Result<Json<Vec<Pessoa>>, ApiError> {
    let Query(query) = query.map_err(|e| context.localize(e.into()))?;
    let pessoas = PessoaQueries::new(&state)
        .at_or_above_age(query.idade)
        .await
        .map_err(|e| context.localize(e))?;

    Ok(Json(pessoas))
}

/// Deletion audit trail, newest first
async fn deletion_logs(
    State(state): State<AppState>,
    Extension(context): Extension<OperationContext>,
    query: Result<Query<DeletionLogQuery>, QueryRejection>,
) -> Result<Json<Vec<DeletionLogEntry>>, ApiError> {
    let Query(query) = query.map_err(|e| context.localize(e.into()))?;
    let entries = state
        .audit()
        .get_recent(query.limit)
        .await
        .map_err(|e| context.localize(e.into()))?;

    Ok(Json(entries))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_deserialize() {
        let json = r#"{
            "cpf": "11144477735",
            "idade": 30,
            "enderecos": [{"CEP": "01001000"}]
        }"#;

        let request: CreatePessoaRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.idade, Some(30));
        assert_eq!(request.enderecos.unwrap()[0].cep, "01001000");
    }

    #[test]
    fn test_create_request_without_addresses() {
        let request: CreatePessoaRequest = serde_json::from_str(r#"{"cpf": "11144477735"}"#).unwrap();
        assert!(request.enderecos.is_none());
        assert!(request.idade.is_none());
    }

    #[test]
    fn test_update_request_ignores_body_cpf() {
        let request: UpdatePessoaRequest =
            serde_json::from_str(r#"{"cpf": "52998224725", "idade": 40}"#).unwrap();
        assert_eq!(request.idade, Some(40));
    }

    #[test]
    fn test_deletion_log_query_defaults() {
        let query: DeletionLogQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, DEFAULT_RECENT_LIMIT);
    }
}
