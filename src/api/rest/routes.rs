//! # Router
//!
//! Route table for the REST surface.

use crate::api::rest::handlers::{
    AppState, health, list_stores, resolve_by_cep, store_by_id, stores_by_state,
};
use axum::Router;
use axum::routing::get;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the application router.
///
/// Static segments win over captures, so `/store/cep/{postal_code}` and
/// `/store/state/{code}` match before `/store/{id}`.
#[must_use]
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/store", get(list_stores))
        .route("/store/cep/{postal_code}", get(resolve_by_cep))
        .route("/store/state/{code}", get(stores_by_state))
        .route("/store/{id}", get(store_by_id))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
