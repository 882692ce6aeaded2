//! Document store implementations and the factory that connects them

mod in_memory;
mod mongo;
mod store_trait;

use std::sync::Arc;

use anyhow::{Context, Result};
use bloodbank_domain::{BloodRequest, Donor, InventoryUnit, StoreConfig, StoreType};
pub use in_memory::InMemoryDocumentStore;
use mongodb::Client;
use mongodb::bson::doc;
pub use mongo::MongoDocumentStore;
pub use store_trait::{DocumentStore, SharedStore};
use tracing::info;

/// One handle per collection, all sharing a single connection
#[derive(Clone)]
pub struct Stores {
    pub donors: SharedStore<Donor>,
    pub inventory: SharedStore<InventoryUnit>,
    pub requests: SharedStore<BloodRequest>,
}

impl Stores {
    /// Fresh in-memory collections
    pub fn in_memory() -> Self {
        Self {
            donors: Arc::new(InMemoryDocumentStore::<Donor>::new()),
            inventory: Arc::new(InMemoryDocumentStore::<InventoryUnit>::new()),
            requests: Arc::new(InMemoryDocumentStore::<BloodRequest>::new()),
        }
    }
}

/// Factory for creating store instances
pub struct StoreFactory;

impl StoreFactory {
    /// Connect the configured backend. For MongoDB the server is pinged once
    /// so a bad URI fails at startup rather than on the first request.
    pub async fn connect(config: &StoreConfig) -> Result<Stores> {
        match &config.store_type {
            StoreType::InMemory => {
                info!("Using in-memory document store");
                Ok(Stores::in_memory())
            }
            StoreType::MongoDb { uri, database } => {
                info!(database = %database, "Connecting to MongoDB");
                let client = Client::with_uri_str(uri)
                    .await
                    .context("Failed to parse MongoDB connection string")?;
                let database = client.database(database);
                database
                    .run_command(doc! { "ping": 1 })
                    .await
                    .context("MongoDB did not answer ping")?;
                info!("Connected to MongoDB");

                Ok(Stores {
                    donors: Arc::new(MongoDocumentStore::<Donor>::new(&database)),
                    inventory: Arc::new(MongoDocumentStore::<InventoryUnit>::new(&database)),
                    requests: Arc::new(MongoDocumentStore::<BloodRequest>::new(&database)),
                })
            }
        }
    }
}
