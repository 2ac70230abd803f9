//! Generic resource handlers
//!
//! Every entity is served by the same handlers, instantiated per type. Nested
//! resources live under `/parties/:party_id/...` and pass the path party to
//! the service; top-level resources pass none.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use core_kernel::{FilterRequest, PaginationResponse, PartyId};
use domain_party::Mapper;

use crate::error::ApiError;
use crate::extract::{json_rejection, ValidatedJson};
use crate::{AppState, Resource};

type ApiResult<T> = Result<T, ApiError>;

fn entity_id<E: Mapper>(id: Uuid) -> E::Id {
    E::Id::from(id)
}

// ============================================================================
// Nested under a party
// ============================================================================

pub async fn create_nested<E: Resource>(
    State(state): State<AppState>,
    Path(party_id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<E::Dto>,
) -> ApiResult<impl IntoResponse> {
    let created = E::service(&state.services)
        .create(Some(PartyId::from_uuid(party_id)), dto)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get_nested<E: Resource>(
    State(state): State<AppState>,
    Path((party_id, id)): Path<(Uuid, Uuid)>,
) -> ApiResult<Json<E::Dto>> {
    let dto = E::service(&state.services)
        .get(Some(PartyId::from_uuid(party_id)), entity_id::<E>(id))
        .await?;
    Ok(Json(dto))
}

pub async fn update_nested<E: Resource>(
    State(state): State<AppState>,
    Path((party_id, id)): Path<(Uuid, Uuid)>,
    ValidatedJson(dto): ValidatedJson<E::Dto>,
) -> ApiResult<Json<E::Dto>> {
    let updated = E::service(&state.services)
        .update(Some(PartyId::from_uuid(party_id)), entity_id::<E>(id), dto)
        .await?;
    Ok(Json(updated))
}

pub async fn delete_nested<E: Resource>(
    State(state): State<AppState>,
    Path((party_id, id)): Path<(Uuid, Uuid)>,
) -> ApiResult<StatusCode> {
    E::service(&state.services)
        .delete(Some(PartyId::from_uuid(party_id)), entity_id::<E>(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_by_party<E: Resource>(
    State(state): State<AppState>,
    Path(party_id): Path<Uuid>,
) -> ApiResult<Json<Vec<E::Dto>>> {
    let rows = E::service(&state.services)
        .list_by_party(PartyId::from_uuid(party_id))
        .await?;
    Ok(Json(rows))
}

/// Searches every row of the entity; the path party does not narrow the result
pub async fn filter_nested<E: Resource>(
    State(state): State<AppState>,
    Path(party_id): Path<Uuid>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<Json<PaginationResponse<E::Dto>>> {
    let Json(request) = payload.map_err(json_rejection)?;
    let page = E::service(&state.services)
        .filter(Some(PartyId::from_uuid(party_id)), &request)
        .await?;
    Ok(Json(page))
}

// ============================================================================
// Top level
// ============================================================================

pub async fn create<E: Resource>(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<E::Dto>,
) -> ApiResult<impl IntoResponse> {
    let created = E::service(&state.services).create(None, dto).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn get<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<E::Dto>> {
    let dto = E::service(&state.services).get(None, entity_id::<E>(id)).await?;
    Ok(Json(dto))
}

pub async fn update<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<E::Dto>,
) -> ApiResult<Json<E::Dto>> {
    let updated = E::service(&state.services)
        .update(None, entity_id::<E>(id), dto)
        .await?;
    Ok(Json(updated))
}

pub async fn delete<E: Resource>(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    E::service(&state.services).delete(None, entity_id::<E>(id)).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn filter<E: Resource>(
    State(state): State<AppState>,
    payload: Result<Json<FilterRequest>, JsonRejection>,
) -> ApiResult<Json<PaginationResponse<E::Dto>>> {
    let Json(request) = payload.map_err(json_rejection)?;
    let page = E::service(&state.services).filter(None, &request).await?;
    Ok(Json(page))
}
