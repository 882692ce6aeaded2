//! Donor registration and lookup

use bloodbank_domain::{BloodBankError, Donor, NewDonor, Record, Result, dates};
use tracing::{info, warn};

use crate::store::SharedStore;

/// Service managing donor records
pub struct DonorService {
    store: SharedStore<Donor>,
}

impl DonorService {
    /// Create a new donor service
    pub fn new(store: SharedStore<Donor>) -> Self {
        Self { store }
    }

    /// All donors, most recently registered first
    pub async fn list(&self) -> Result<Vec<Donor>> {
        self.store
            .find_all()
            .await
            .map_err(|e| BloodBankError::store_error_with_source("list donors", e))
    }

    /// Validate and persist a new donor
    pub async fn create(&self, payload: NewDonor) -> Result<Donor> {
        let donor = payload.into_donor(dates::now())?;
        let donor = self
            .store
            .insert(donor)
            .await
            .map_err(|e| BloodBankError::store_error_with_source("insert donor", e))?;

        info!(donor_id = donor.document_id(), blood_type = %donor.blood_type, "Donor registered");
        Ok(donor)
    }

    /// Remove a donor. Inventory units referencing it are left untouched.
    pub async fn delete(&self, id: &str) -> Result<()> {
        let removed = self
            .store
            .delete(id)
            .await
            .map_err(|e| BloodBankError::store_error_with_source("delete donor", e))?;

        if !removed {
            warn!(donor_id = id, "Donor not found for deletion");
            return Err(BloodBankError::not_found_error(Donor::NAME, id));
        }

        info!(donor_id = id, "Donor deleted");
        Ok(())
    }
}
