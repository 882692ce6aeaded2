use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use bloodbank_domain::{InventoryUnit, NewInventoryUnit, Record};

use super::{ApiError, error_response, parse_body};
use crate::state::AppState;
use crate::types::{BloodUnitResponse, MessageResponse};

/// `GET /api/inventory`
pub async fn list_inventory(
    State(state): State<AppState>,
) -> Result<Json<Vec<InventoryUnit>>, ApiError> {
    state.inventory.list().await.map(Json).map_err(error_response)
}

/// `POST /api/inventory`. Responds once the unit is stored; the donor's
/// last donation date is updated on a best-effort basis.
pub async fn create_inventory_unit(
    State(state): State<AppState>,
    payload: Result<Json<NewInventoryUnit>, JsonRejection>,
) -> Result<(StatusCode, Json<BloodUnitResponse>), ApiError> {
    let payload = parse_body(payload, InventoryUnit::NAME)?;
    let blood_unit = state.inventory.create(payload).await.map_err(error_response)?;

    Ok((StatusCode::CREATED, Json(BloodUnitResponse { success: true, blood_unit })))
}

/// `DELETE /api/inventory/:id`
pub async fn delete_inventory_unit(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiError> {
    state.inventory.delete(&id).await.map_err(error_response)?;

    Ok(Json(MessageResponse {
        success: true,
        message: "Blood unit deleted successfully".to_string(),
    }))
}
