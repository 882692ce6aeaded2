use std::sync::Arc;

use bloodbank_services::{DonorService, InventoryService, RequestService, Stores};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub donors: Arc<DonorService>,
    pub inventory: Arc<InventoryService>,
    pub requests: Arc<RequestService>,
}

impl AppState {
    /// Wire the services onto one set of store handles
    pub fn new(stores: Stores) -> Self {
        Self {
            donors: Arc::new(DonorService::new(stores.donors.clone())),
            inventory: Arc::new(InventoryService::new(stores.inventory, stores.donors)),
            requests: Arc::new(RequestService::new(stores.requests)),
        }
    }
}
