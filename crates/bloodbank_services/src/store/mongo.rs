//! MongoDB document store

use anyhow::Result;
use async_trait::async_trait;
use bloodbank_domain::Record;
use futures::TryStreamExt;
use mongodb::bson::oid::ObjectId;
use mongodb::bson::{Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use tracing::debug;

use super::store_trait::DocumentStore;

/// Collection-backed store. Identifiers are ObjectId hex strings kept in
/// `_id`; timestamps are fixed-width strings, so a descending sort on the
/// ordering field lists newest first.
pub struct MongoDocumentStore<R: Record> {
    collection: Collection<R>,
}

impl<R: Record> MongoDocumentStore<R> {
    /// Bind to the record's collection in `database`
    pub fn new(database: &Database) -> Self {
        Self { collection: database.collection::<R>(R::COLLECTION) }
    }
}

#[async_trait]
impl<R: Record> DocumentStore<R> for MongoDocumentStore<R> {
    async fn find_all(&self) -> Result<Vec<R>> {
        let mut sort = Document::new();
        sort.insert(R::ORDER_FIELD, -1);

        let cursor = self.collection.find(doc! {}).sort(sort).await?;
        let records: Vec<R> = cursor.try_collect().await?;

        debug!("Listed {} records from '{}'", records.len(), R::COLLECTION);
        Ok(records)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<R>> {
        Ok(self.collection.find_one(doc! { "_id": id }).await?)
    }

    async fn insert(&self, record: R) -> Result<R> {
        let record = record.with_id(ObjectId::new().to_hex());
        self.collection.insert_one(&record).await?;

        debug!(id = record.document_id(), "Inserted record into '{}'", R::COLLECTION);
        Ok(record)
    }

    async fn replace(&self, id: &str, record: R) -> Result<Option<R>> {
        let record = record.with_id(id.to_string());
        let replaced = self
            .collection
            .find_one_and_replace(doc! { "_id": id }, &record)
            .return_document(ReturnDocument::After)
            .await?;
        Ok(replaced)
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;
        Ok(result.deleted_count > 0)
    }
}
