//! Document store abstraction

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use bloodbank_domain::Record;

/// Trait for document store implementations. One instance serves one
/// collection of records.
#[async_trait]
pub trait DocumentStore<R: Record>: Send + Sync {
    /// All records, newest first by [`Record::ORDER_FIELD`]
    async fn find_all(&self) -> Result<Vec<R>>;

    /// Look up a record by identifier
    async fn find_by_id(&self, id: &str) -> Result<Option<R>>;

    /// Persist a new record, returning it with its assigned identifier
    async fn insert(&self, record: R) -> Result<R>;

    /// Replace the record stored under `id`. Returns the stored record, or
    /// `None` when no record has that identifier.
    async fn replace(&self, id: &str, record: R) -> Result<Option<R>>;

    /// Delete a record by identifier. Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

/// Store handle shared between services
pub type SharedStore<R> = Arc<dyn DocumentStore<R>>;
