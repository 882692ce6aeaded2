//! In-memory document store for development and testing

use std::cmp::Reverse;

use anyhow::Result;
use async_trait::async_trait;
use bloodbank_domain::Record;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use uuid::Uuid;

use super::store_trait::DocumentStore;

/// In-memory document store. Records are kept in insertion order so ties
/// on the ordering timestamp list the later insert first.
pub struct InMemoryDocumentStore<R> {
    records: RwLock<Vec<R>>,
}

impl<R: Record> InMemoryDocumentStore<R> {
    /// Create an empty store
    pub fn new() -> Self {
        Self { records: RwLock::new(Vec::new()) }
    }

    /// Number of stored records
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store holds no records
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl<R: Record> Default for InMemoryDocumentStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: Record> DocumentStore<R> for InMemoryDocumentStore<R> {
    async fn find_all(&self) -> Result<Vec<R>> {
        let records = self.records.read().await;
        let mut listed: Vec<R> = records.iter().rev().cloned().collect();
        listed.sort_by_key(|record| Reverse(record.ordered_at()));

        debug!("Listed {} records from '{}'", listed.len(), R::COLLECTION);
        Ok(listed)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<R>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|record| record.document_id() == Some(id)).cloned())
    }

    async fn insert(&self, record: R) -> Result<R> {
        let record = record.with_id(Uuid::new_v4().to_string());

        let mut records = self.records.write().await;
        records.push(record.clone());

        debug!(id = record.document_id(), "Inserted record into '{}'", R::COLLECTION);
        Ok(record)
    }

    async fn replace(&self, id: &str, record: R) -> Result<Option<R>> {
        let mut records = self.records.write().await;
        let Some(slot) = records.iter_mut().find(|stored| stored.document_id() == Some(id)) else {
            warn!(id, "Record not found in '{}' for replacement", R::COLLECTION);
            return Ok(None);
        };

        *slot = record.with_id(id.to_string());
        debug!(id, "Replaced record in '{}'", R::COLLECTION);
        Ok(Some(slot.clone()))
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut records = self.records.write().await;
        let before = records.len();
        records.retain(|record| record.document_id() != Some(id));

        let removed = records.len() < before;
        if removed {
            debug!(id, "Deleted record from '{}'", R::COLLECTION);
        } else {
            warn!(id, "Record not found in '{}' for deletion", R::COLLECTION);
        }
        Ok(removed)
    }
}
