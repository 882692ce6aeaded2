//! HTTP handlers, one module per resource

mod donors;
mod health;
mod inventory;
mod requests;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::{StatusCode, Uri};
use bloodbank_domain::BloodBankError;
pub use donors::{create_donor, delete_donor, list_donors};
pub use health::health_handler;
pub use inventory::{create_inventory_unit, delete_inventory_unit, list_inventory};
pub use requests::{create_request, delete_request, list_requests, update_request};
use tracing::{error, warn};

use crate::types::ErrorResponse;

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Convert a domain error into the JSON error envelope
pub(crate) fn error_response(error: BloodBankError) -> ApiError {
    let status = StatusCode::from_u16(error.http_status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %error.message(), code = error.error_code(), "Request failed");
    }
    (status, Json(ErrorResponse::from(&error)))
}

/// Unwrap a JSON body, reporting malformed input as a validation error
pub(crate) fn parse_body<T>(
    payload: Result<Json<T>, JsonRejection>,
    record: &str,
) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        warn!(record, rejection = %rejection.body_text(), "Rejected request body");
        error_response(BloodBankError::validation_error(record, rejection.body_text()))
    })
}

/// Unknown path under `/api`
pub async fn api_not_found(uri: Uri) -> ApiError {
    error_response(BloodBankError::not_found_error(
        format!("Route {}", uri.path()),
        uri.path(),
    ))
}
