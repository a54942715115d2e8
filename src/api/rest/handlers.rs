//! # REST Handlers
//!
//! Handler functions and response types for the store endpoints.

use crate::application::error::ResolutionError;
use crate::application::services::fulfillment_resolver::FulfillmentResolver;
use crate::application::services::quote_aggregation::FulfillmentResult;
use crate::domain::entities::store::StoreRecord;
use crate::domain::value_objects::{RegionCode, StoreId};
use crate::infrastructure::persistence::{RepositoryError, StoreRepository};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::sync::Arc;
use tracing::error;

/// Shared state handed to every handler.
#[derive(Debug)]
pub struct AppState {
    /// Store catalog.
    pub repository: Arc<dyn StoreRepository>,
    /// Resolution pipeline.
    pub resolver: Arc<FulfillmentResolver>,
}

/// Error body returned by every failing endpoint.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Short error category.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

/// Health check body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Always `"ok"` while the process serves traffic.
    pub status: &'static str,
}

/// API-level error with its HTTP status mapping.
#[derive(Debug)]
pub enum ApiError {
    /// 400: the request itself is malformed.
    BadRequest(String),
    /// 404: nothing matches the request.
    NotFound(String),
    /// 500: an upstream collaborator failed.
    Internal(String),
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, "bad_request", message),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
            Self::Internal(message) => {
                error!(%message, "request failed on an upstream collaborator");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "unexpected upstream failure".to_string(),
                )
            }
        };

        (
            status,
            Json(ErrorResponse {
                error: error.to_string(),
                message,
            }),
        )
            .into_response()
    }
}

impl From<ResolutionError> for ApiError {
    fn from(error: ResolutionError) -> Self {
        match error {
            ResolutionError::InvalidPostalCode { .. } => Self::BadRequest(error.to_string()),
            ResolutionError::AddressNotFound { .. } => Self::NotFound(error.to_string()),
            ResolutionError::Upstream { .. } => Self::Internal(error.to_string()),
        }
    }
}

impl From<RepositoryError> for ApiError {
    fn from(error: RepositoryError) -> Self {
        Self::Internal(error.to_string())
    }
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// `GET /store`: every record in the catalog.
pub async fn list_stores(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<StoreRecord>>, ApiError> {
    let records = state.repository.list_all().await?;
    Ok(Json(records))
}

/// `GET /store/{id}`: one record by key.
pub async fn store_by_id(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<StoreRecord>, ApiError> {
    let id = StoreId::parse(&id).map_err(|e| ApiError::bad_request(e.to_string()))?;

    match state.repository.find_by_id(&id).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::not_found(format!("no store with id {id}"))),
    }
}

/// `GET /store/state/{code}`: records in one federative unit.
pub async fn stores_by_state(
    State(state): State<Arc<AppState>>,
    Path(code): Path<String>,
) -> Result<Json<Vec<StoreRecord>>, ApiError> {
    let code = RegionCode::parse(&code).map_err(|e| ApiError::bad_request(e.to_string()))?;

    let records = state.repository.find_by_state(&code).await?;
    if records.is_empty() {
        return Err(ApiError::not_found(format!("no stores in state {code}")));
    }
    Ok(Json(records))
}

/// `GET /store/cep/{postal_code}`: ranked fulfillment options.
pub async fn resolve_by_cep(
    State(state): State<Arc<AppState>>,
    Path(postal_code): Path<String>,
) -> Result<Json<Vec<FulfillmentResult>>, ApiError> {
    let results = state.resolver.resolve(&postal_code).await?;
    Ok(Json(results))
}
