//! # In-Memory Store Repository
//!
//! In-memory implementation of [`StoreRepository`].
//!
//! Records live in a `Vec` behind a `tokio::sync::RwLock`, which keeps
//! insertion order, the catalog order the resolver uses for distance
//! tie-breaking. Suitable for tests and for serving a small seeded
//! catalog.

use crate::domain::entities::store::{StoreKind, StoreRecord};
use crate::domain::value_objects::{RegionCode, StoreId};
use crate::infrastructure::persistence::traits::{RepositoryResult, StoreRepository};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory implementation of [`StoreRepository`].
#[derive(Debug, Clone, Default)]
pub struct InMemoryStoreRepository {
    records: Arc<RwLock<Vec<StoreRecord>>>,
}

impl InMemoryStoreRepository {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with `records`, preserving their order.
    #[must_use]
    pub fn with_records(records: Vec<StoreRecord>) -> Self {
        Self {
            records: Arc::new(RwLock::new(records)),
        }
    }

    /// Inserts a record, replacing any existing record with the same key.
    ///
    /// A replacement keeps the original catalog position.
    pub async fn save(&self, record: StoreRecord) {
        let mut records = self.records.write().await;
        if let Some(existing) = records.iter_mut().find(|r| r.id() == record.id()) {
            *existing = record;
        } else {
            records.push(record);
        }
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records
            .try_read()
            .map(|guard| guard.len())
            .unwrap_or(0)
    }

    /// Returns true if the repository is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes every record.
    pub async fn clear(&self) {
        let mut records = self.records.write().await;
        records.clear();
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn list_all(&self) -> RepositoryResult<Vec<StoreRecord>> {
        let records = self.records.read().await;
        Ok(records.clone())
    }

    async fn find_by_id(&self, id: &StoreId) -> RepositoryResult<Option<StoreRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| r.id() == id).cloned())
    }

    async fn find_by_state(&self, state: &RegionCode) -> RepositoryResult<Vec<StoreRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.state() == state)
            .cloned()
            .collect())
    }

    async fn list_by_kind(&self, kind: StoreKind) -> RepositoryResult<Vec<StoreRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| r.kind() == kind)
            .cloned()
            .collect())
    }

    async fn find_store_for_point(
        &self,
        point_id: &StoreId,
    ) -> RepositoryResult<Option<StoreRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.is_retail_store() && r.associated_pdv() == Some(point_id))
            .cloned())
    }

    async fn find_associated_point(
        &self,
        store: &StoreRecord,
    ) -> RepositoryResult<Option<StoreRecord>> {
        let Some(point_id) = store.associated_pdv() else {
            return Ok(None);
        };
        let records = self.records.read().await;
        Ok(records
            .iter()
            .find(|r| r.is_distribution_point() && r.id() == point_id)
            .cloned())
    }
}
