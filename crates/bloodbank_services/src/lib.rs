//! Persistence and resource services for the blood bank

mod donor_service;
mod inventory_service;
mod request_service;
pub mod store;

pub use donor_service::DonorService;
pub use inventory_service::{DonationSync, InventoryService};
pub use request_service::RequestService;
pub use store::{DocumentStore, SharedStore, StoreFactory, Stores};
