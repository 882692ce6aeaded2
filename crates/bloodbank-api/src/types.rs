use bloodbank_domain::{BloodBankError, BloodRequest, Donor, InventoryUnit};
use serde::Serialize;

/// Response for a created donor
#[derive(Debug, Serialize)]
pub struct DonorResponse {
    pub success: bool,
    pub donor: Donor,
}

/// Response for a created blood unit
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BloodUnitResponse {
    pub success: bool,
    pub blood_unit: InventoryUnit,
}

/// Response for a created or updated request
#[derive(Debug, Serialize)]
pub struct RequestResponse {
    pub success: bool,
    pub request: BloodRequest,
}

/// Acknowledgement of a deletion
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    pub code: String,
}

impl From<&BloodBankError> for ErrorResponse {
    fn from(error: &BloodBankError) -> Self {
        Self { success: false, message: error.message(), code: error.error_code().to_string() }
    }
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
