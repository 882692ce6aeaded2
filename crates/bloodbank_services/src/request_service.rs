//! Transfusion request tracking

use bloodbank_domain::{
    BloodBankError, BloodRequest, NewBloodRequest, Record, RequestPatch, Result, dates,
};
use tracing::{info, warn};

use crate::store::SharedStore;

/// Service managing transfusion requests
pub struct RequestService {
    store: SharedStore<BloodRequest>,
}

impl RequestService {
    /// Create a new request service
    pub fn new(store: SharedStore<BloodRequest>) -> Self {
        Self { store }
    }

    /// All requests, most recent request date first
    pub async fn list(&self) -> Result<Vec<BloodRequest>> {
        self.store
            .find_all()
            .await
            .map_err(|e| BloodBankError::store_error_with_source("list requests", e))
    }

    /// Validate and persist a new request
    pub async fn create(&self, payload: NewBloodRequest) -> Result<BloodRequest> {
        let request = payload.into_request(dates::now())?;
        let request = self
            .store
            .insert(request)
            .await
            .map_err(|e| BloodBankError::store_error_with_source("insert request", e))?;

        info!(
            request_id = request.document_id(),
            priority = %request.priority,
            units_needed = request.units_needed,
            "Request created"
        );
        Ok(request)
    }

    /// Apply a partial update. The merged record is validated before it is
    /// stored; status changes are not restricted.
    pub async fn update(&self, id: &str, patch: RequestPatch) -> Result<BloodRequest> {
        let current = self
            .store
            .find_by_id(id)
            .await
            .map_err(|e| BloodBankError::store_error_with_source("find request", e))?
            .ok_or_else(|| {
                warn!(request_id = id, "Request not found for update");
                BloodBankError::not_found_error(BloodRequest::NAME, id)
            })?;

        let merged = patch.apply(current)?;
        let updated = self
            .store
            .replace(id, merged)
            .await
            .map_err(|e| BloodBankError::store_error_with_source("update request", e))?
            .ok_or_else(|| BloodBankError::not_found_error(BloodRequest::NAME, id))?;

        info!(request_id = id, status = %updated.status, "Request updated");
        Ok(updated)
    }

    /// Remove a request by identifier
    pub async fn delete(&self, id: &str) -> Result<()> {
        let removed = self
            .store
            .delete(id)
            .await
            .map_err(|e| BloodBankError::store_error_with_source("delete request", e))?;

        if !removed {
            warn!(request_id = id, "Request not found for deletion");
            return Err(BloodBankError::not_found_error(BloodRequest::NAME, id));
        }

        info!(request_id = id, "Request deleted");
        Ok(())
    }
}
