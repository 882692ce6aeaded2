//! Records, validation and errors for the blood bank service

pub mod dates;
mod donor;
mod error;
mod inventory;
mod record;
mod request;
mod store_config;

pub use donor::{Donor, NewDonor};
pub use error::{BloodBankError, Result};
pub use inventory::{InventoryUnit, NewInventoryUnit, UnitStatus};
pub use record::Record;
pub use request::{BloodRequest, NewBloodRequest, Priority, RequestPatch, RequestStatus};
pub use store_config::{StoreConfig, StoreType};
