//! User administration endpoints.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::auth::{password, policy, AuthUser};
use crate::errors::AppError;
use crate::models::{
    CreateUserRequest, Role, UpdateUserRequest, UserInfo, SEED_ADMIN_USERNAME,
};
use crate::AppState;

/// GET /api/users - List all user accounts without credentials.
pub async fn list_users(State(state): State<AppState>, actor: AuthUser) -> ApiResult<Vec<UserInfo>> {
    if !policy::can(&actor, &policy::Action::ListUsers) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    let users = state.repo.list_users().await?;
    Ok(Json(users.into_iter().map(UserInfo::from).collect()))
}

/// POST /api/users - Create a user account.
pub async fn create_user(
    State(state): State<AppState>,
    actor: AuthUser,
    Json(request): Json<CreateUserRequest>,
) -> ApiResult<UserInfo> {
    if !policy::can(&actor, &policy::Action::ManageUsers) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    if request.username.trim().is_empty() {
        return Err(AppError::Validation("Username is required".to_string()));
    }
    if request.password.trim().is_empty() {
        return Err(AppError::Validation("Password is required".to_string()));
    }
    if request.zone_ref.trim().is_empty() {
        return Err(AppError::Validation(
            "Zone reference is required".to_string(),
        ));
    }

    // A zone-scoped account must reference a registered zone.
    if request.role == Role::User && !state.repo.zone_ref_exists(&request.zone_ref).await? {
        return Err(AppError::Validation(format!(
            "Unknown zone reference: {}",
            request.zone_ref
        )));
    }

    if state
        .repo
        .get_user_by_username(&request.username)
        .await?
        .is_some()
    {
        return Err(AppError::Validation(format!(
            "Username {} is already taken",
            request.username
        )));
    }

    let hash = password::hash_password(&request.password)?;
    let user = state.repo.create_user(&request, &hash).await?;
    Ok(Json(UserInfo::from(user)))
}

/// PUT /api/users/{id} - Update a user account.
pub async fn update_user(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> ApiResult<UserInfo> {
    if !policy::can(&actor, &policy::Action::ManageUsers) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    let user = state.repo.update_user(id, &request).await?;
    Ok(Json(UserInfo::from(user)))
}

/// DELETE /api/users/{id} - Delete a user account.
///
/// Self-deletion and deletion of the seeded bootstrap account are rejected.
pub async fn delete_user(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<()> {
    if !policy::can(&actor, &policy::Action::ManageUsers) {
        return Err(AppError::Forbidden("Forbidden".to_string()));
    }

    if id == actor.user_id {
        return Err(AppError::Forbidden(
            "You cannot delete your own account".to_string(),
        ));
    }

    let target = state
        .repo
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    if target.username == SEED_ADMIN_USERNAME {
        return Err(AppError::Forbidden(
            "The bootstrap admin account cannot be deleted".to_string(),
        ));
    }

    state.repo.delete_user(id).await?;
    Ok(Json(()))
}
