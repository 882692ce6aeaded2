use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use bloodbank_domain::{Donor, NewDonor, Record};

use super::{ApiError, error_response, parse_body};
use crate::state::AppState;
use crate::types::{DonorResponse, MessageResponse};

/// `GET /api/donors`
pub async fn list_donors(State(state): State<AppState>) -> Result<Json<Vec<Donor>>, ApiError> {
    state.donors.list().await.map(Json).map_err(error_response)
}

/// `POST /api/donors`
pub async fn create_donor(
    State(state): State<AppState>,
    payload: Result<Json<NewDonor>, JsonRejection>,
) -> Result<(StatusCode, Json<DonorResponse>), ApiError> {
    let payload = parse_body(payload, Donor::NAME)?;
    let donor = state.donors.create(payload).await.map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(DonorResponse { success: true, donor })))
}

/// `DELETE /api/donors/:id`
pub async fn delete_donor(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.donors.delete(&id).await.map_err(error_response)?;

    Ok(Json(MessageResponse { success: true, message: "Donor deleted successfully".to_string() }))
}
