//! # REST API
//!
//! REST endpoints using axum.
//!
//! # Endpoints
//!
//! - `GET /store` - every catalog record
//! - `GET /store/{id}` - one record by key (400 malformed key, 404 absent)
//! - `GET /store/state/{code}` - records in a federative unit
//!   (400 unless exactly two letters, 404 on zero matches)
//! - `GET /store/cep/{postal_code}` - ranked fulfillment options
//!   (400 malformed CEP, 404 geocoder miss, 500 upstream failure)
//! - `GET /health` - liveness
//!
//! # Usage
//!
//! ```ignore
//! use store_fulfillment::api::rest::{AppState, create_router};
//! use std::sync::Arc;
//!
//! let state = Arc::new(AppState {
//!     repository: /* ... */,
//!     resolver: /* ... */,
//! });
//!
//! let router = create_router(state);
//!
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, router).await?;
//! ```

pub mod handlers;
pub mod routes;

pub use handlers::{ApiError, AppState, ErrorResponse, HealthResponse};
pub use routes::create_router;
