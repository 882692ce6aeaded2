//! Document store configuration

use serde::{Deserialize, Serialize};

/// Configuration for the document store backing every collection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct StoreConfig {
    /// Store backend type
    pub store_type: StoreType,
}

/// Available document store backends
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub enum StoreType {
    /// Process-local storage (for development/testing)
    #[default]
    InMemory,
    /// MongoDB server
    MongoDb {
        /// Connection string
        uri: String,
        /// Database holding the collections
        database: String,
    },
}
