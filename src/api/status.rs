//! Status ledger endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::auth::{policy, AuthUser};
use crate::errors::AppError;
use crate::models::{StatusHistoryEntry, StatusUpdate, UpdateStatusRequest};
use crate::AppState;

/// POST /api/status-update - Record a status update for a zone.
///
/// A zone-scoped user may only report on their own zone; admins on any.
/// The write lands in the live table and the history table atomically.
pub async fn update_status(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(request): Json<UpdateStatusRequest>,
) -> ApiResult<StatusUpdate> {
    let zone = state
        .repo
        .get_zone(request.city_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("City {} not found", request.city_id)))?;

    if !policy::can(
        &actor,
        &policy::Action::UpdateZoneStatus {
            zone_ref: &zone.zone_ref,
        },
    ) {
        return Err(AppError::Forbidden(
            "You can only update your assigned city".to_string(),
        ));
    }

    let update = state
        .repo
        .record_status(zone.id, request.status, &request.comment, actor.user_id)
        .await?;

    Ok(Json(update))
}

/// GET /api/status-history/{cityId} - Status history for a zone, newest first.
pub async fn status_history(
    State(state): State<AppState>,
    _actor: AuthUser,
    Path(city_id): Path<i64>,
) -> ApiResult<Vec<StatusHistoryEntry>> {
    if state.repo.get_zone(city_id).await?.is_none() {
        return Err(AppError::NotFound(format!("City {} not found", city_id)));
    }

    let history = state.repo.get_status_history(city_id).await?;
    Ok(Json(history))
}
