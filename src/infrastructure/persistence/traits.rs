//! # Repository Traits
//!
//! Port definitions for store catalog reads.
//!
//! The resolver only reads the catalog; writes happen in an external
//! management process. Implementations can back the port with different
//! stores; the crate ships an in-memory one.
//!
//! # Examples
//!
//! ```ignore
//! use store_fulfillment::infrastructure::persistence::traits::StoreRepository;
//!
//! async fn count_points(repo: &impl StoreRepository) {
//!     let points = repo.list_by_kind(StoreKind::Pdv).await.unwrap();
//!     println!("{} distribution points", points.len());
//! }
//! ```

use crate::domain::entities::store::{StoreKind, StoreRecord};
use crate::domain::value_objects::{RegionCode, StoreId};
use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

/// Error type for repository operations.
#[derive(Debug, Clone, Error)]
pub enum RepositoryError {
    /// Connection error.
    #[error("repository connection error: {0}")]
    Connection(String),

    /// Query error.
    #[error("repository query error: {0}")]
    Query(String),

    /// Serialization error.
    #[error("repository serialization error: {0}")]
    Serialization(String),

    /// Internal error.
    #[error("repository internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Creates a connection error.
    #[must_use]
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Creates a query error.
    #[must_use]
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query(msg.into())
    }

    /// Creates a serialization error.
    #[must_use]
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Read-only port over the store catalog.
///
/// Implementations must keep a stable iteration order across calls with
/// unchanged data: the resolver relies on it to break distance ties
/// deterministically.
#[async_trait]
pub trait StoreRepository: Send + Sync + fmt::Debug {
    /// Returns every record in the catalog.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the backing store cannot be read.
    async fn list_all(&self) -> RepositoryResult<Vec<StoreRecord>>;

    /// Finds one record by key.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the backing store cannot be read.
    async fn find_by_id(&self, id: &StoreId) -> RepositoryResult<Option<StoreRecord>>;

    /// Returns the records located in a federative unit.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the backing store cannot be read.
    async fn find_by_state(&self, state: &RegionCode) -> RepositoryResult<Vec<StoreRecord>>;

    /// Returns the records of one kind, in catalog order.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the backing store cannot be read.
    async fn list_by_kind(&self, kind: StoreKind) -> RepositoryResult<Vec<StoreRecord>>;

    /// Finds the retail store whose weak reference names the given
    /// distribution point.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the backing store cannot be read.
    async fn find_store_for_point(
        &self,
        point_id: &StoreId,
    ) -> RepositoryResult<Option<StoreRecord>>;

    /// Resolves the distribution point a retail store references, if the
    /// reference is set and the point exists.
    ///
    /// # Errors
    ///
    /// Returns a `RepositoryError` if the backing store cannot be read.
    async fn find_associated_point(
        &self,
        store: &StoreRecord,
    ) -> RepositoryResult<Option<StoreRecord>>;
}
