//! Current party status handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use core_kernel::PartyId;
use domain_party::entities::PartyStatusDto;

use crate::error::ApiError;
use crate::extract::ValidatedJson;
use crate::AppState;

/// Returns the most recent status of a party
pub async fn get_current_status(
    State(state): State<AppState>,
    Path(party_id): Path<Uuid>,
) -> Result<Json<PartyStatusDto>, ApiError> {
    let status = state
        .services
        .party_statuses
        .get_by_party(PartyId::from_uuid(party_id))
        .await?;
    Ok(Json(status))
}

/// Applies a change to the most recent status of a party
pub async fn update_current_status(
    State(state): State<AppState>,
    Path(party_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<PartyStatusDto>,
) -> Result<Json<PartyStatusDto>, ApiError> {
    let status = state
        .services
        .party_statuses
        .update_by_party(PartyId::from_uuid(party_id), dto)
        .await?;
    Ok(Json(status))
}
