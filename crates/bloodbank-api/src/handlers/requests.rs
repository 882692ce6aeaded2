use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use bloodbank_domain::{BloodRequest, NewBloodRequest, Record, RequestPatch};

use super::{ApiError, error_response, parse_body};
use crate::state::AppState;
use crate::types::{MessageResponse, RequestResponse};

/// `GET /api/requests`
pub async fn list_requests(
    State(state): State<AppState>,
) -> Result<Json<Vec<BloodRequest>>, ApiError> {
    state.requests.list().await.map(Json).map_err(error_response)
}

/// `POST /api/requests`
pub async fn create_request(
    State(state): State<AppState>,
    payload: Result<Json<NewBloodRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RequestResponse>), ApiError> {
    let payload = parse_body(payload, BloodRequest::NAME)?;
    let request = state.requests.create(payload).await.map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(RequestResponse { success: true, request })))
}

/// `PUT /api/requests/:id`. Validation failures on the merged record are
/// reported as 400, the same as on creation.
pub async fn update_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<RequestPatch>, JsonRejection>,
) -> Result<Json<RequestResponse>, ApiError> {
    let patch = parse_body(payload, BloodRequest::NAME)?;
    let request = state.requests.update(&id, patch).await.map_err(error_response)?;

    Ok(Json(RequestResponse { success: true, request }))
}

/// `DELETE /api/requests/:id`
pub async fn delete_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.requests.delete(&id).await.map_err(error_response)?;

    Ok(Json(MessageResponse { success: true, message: "Request deleted successfully".to_string() }))
}
