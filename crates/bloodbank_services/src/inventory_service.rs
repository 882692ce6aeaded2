//! Blood unit inventory and the donor last-donation follow-up

use bloodbank_domain::{
    BloodBankError, Donor, InventoryUnit, NewInventoryUnit, Record, Result, dates,
};
use tracing::{error, info, warn};

use crate::store::SharedStore;

/// Result of copying a unit's collection date onto its donor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationSync {
    /// Donor found and `lastDonation` saved
    Updated,
    /// No donor has the unit's `donorId`
    DonorNotFound,
    /// Lookup or save failed; the error was logged
    Failed,
}

/// Service managing blood units
pub struct InventoryService {
    units: SharedStore<InventoryUnit>,
    donors: SharedStore<Donor>,
}

impl InventoryService {
    /// Create a new inventory service. `donors` is only written to by the
    /// last-donation follow-up.
    pub fn new(units: SharedStore<InventoryUnit>, donors: SharedStore<Donor>) -> Self {
        Self { units, donors }
    }

    /// All units, most recently recorded first
    pub async fn list(&self) -> Result<Vec<InventoryUnit>> {
        self.units
            .find_all()
            .await
            .map_err(|e| BloodBankError::store_error_with_source("list inventory", e))
    }

    /// Record a new unit.
    ///
    /// The outcome is decided by the insert alone. Once it succeeds the
    /// donor's `lastDonation` is updated as a separate step whose failures
    /// are logged and never reach the caller.
    pub async fn create(&self, payload: NewInventoryUnit) -> Result<InventoryUnit> {
        let unit = payload.into_unit(dates::now())?;
        let unit = self
            .units
            .insert(unit)
            .await
            .map_err(|e| BloodBankError::store_error_with_source("insert blood unit", e))?;

        info!(
            unit_id = unit.document_id(),
            donor_id = %unit.donor_id,
            blood_type = %unit.blood_type,
            expiry_date = %unit.expiry_date,
            "Blood unit recorded"
        );

        self.sync_last_donation(&unit).await;
        Ok(unit)
    }

    /// Copy the unit's collection date onto its donor, if the donor exists.
    /// Never fails; concurrent calls for one donor are last-write-wins.
    pub async fn sync_last_donation(&self, unit: &InventoryUnit) -> DonationSync {
        let donor = match self.donors.find_by_id(&unit.donor_id).await {
            Ok(Some(donor)) => donor,
            Ok(None) => {
                warn!(donor_id = %unit.donor_id, "Donor not found, last donation not updated");
                return DonationSync::DonorNotFound;
            }
            Err(e) => {
                error!(donor_id = %unit.donor_id, error = %e, "Donor lookup failed");
                return DonationSync::Failed;
            }
        };

        let donor = Donor { last_donation: Some(unit.collection_date), ..donor };
        match self.donors.replace(&unit.donor_id, donor).await {
            Ok(Some(_)) => {
                info!(
                    donor_id = %unit.donor_id,
                    last_donation = %unit.collection_date,
                    "Donor last donation updated"
                );
                DonationSync::Updated
            }
            Ok(None) => {
                warn!(donor_id = %unit.donor_id, "Donor removed before last donation was saved");
                DonationSync::DonorNotFound
            }
            Err(e) => {
                error!(donor_id = %unit.donor_id, error = %e, "Failed to save donor last donation");
                DonationSync::Failed
            }
        }
    }

    /// Remove a unit by identifier
    pub async fn delete(&self, id: &str) -> Result<()> {
        let removed = self
            .units
            .delete(id)
            .await
            .map_err(|e| BloodBankError::store_error_with_source("delete blood unit", e))?;

        if !removed {
            warn!(unit_id = id, "Blood unit not found for deletion");
            return Err(BloodBankError::not_found_error(InventoryUnit::NAME, id));
        }

        info!(unit_id = id, "Blood unit deleted");
        Ok(())
    }
}
