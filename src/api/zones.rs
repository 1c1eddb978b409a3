//! Zone registry endpoints.

use axum::{extract::State, Json};

use super::ApiResult;
use crate::auth::{policy, AuthUser};
use crate::errors::AppError;
use crate::models::{CreateZoneRequest, Zone, ZoneWithStatus};
use crate::AppState;

/// GET /api/cities - All zones with their current status and last updater,
/// ordered by name.
pub async fn list_zones(
    State(state): State<AppState>,
    _actor: AuthUser,
) -> ApiResult<Vec<ZoneWithStatus>> {
    let zones = state.repo.list_zones().await?;
    Ok(Json(zones))
}

/// POST /api/cities - Register a new zone, allocating its reference.
///
/// Zone names are not required to be unique; only the generated reference is.
pub async fn create_zone(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(request): Json<CreateZoneRequest>,
) -> ApiResult<Zone> {
    if !policy::can(&actor, &policy::Action::CreateZone) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    if request.name.trim().is_empty() {
        return Err(AppError::Validation("Zone name is required".to_string()));
    }

    let zone = state.repo.create_zone(request.name.trim()).await?;
    tracing::info!(zone_ref = %zone.zone_ref, name = %zone.name, "zone created");
    Ok(Json(zone))
}
