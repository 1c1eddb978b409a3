//! Authentication endpoints: login, current user, password changes.

use axum::{
    extract::{Path, State},
    Json,
};

use super::ApiResult;
use crate::auth::{jwt, password, AuthUser};
use crate::errors::AppError;
use crate::models::{ChangePasswordRequest, LoginRequest, LoginResponse, Role, UserInfo};
use crate::AppState;

/// POST /api/auth/login - Verify credentials and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<LoginResponse> {
    let user = state
        .repo
        .get_user_by_username(&request.username)
        .await?
        .ok_or_else(|| AppError::Unauthenticated("Invalid username or password".to_string()))?;

    let valid =
        password::verify_credential(&request.password, &user.password, user.password_is_hashed)?;
    if !valid {
        return Err(AppError::Unauthenticated(
            "Invalid username or password".to_string(),
        ));
    }

    let token = jwt::generate_token(
        user.id,
        &user.username,
        user.role,
        &user.zone_ref,
        &state.config.jwt_secret,
        state.config.token_ttl_hours,
    )?;

    state.repo.touch_last_login(user.id).await?;

    tracing::info!(username = %user.username, role = %user.role.as_str(), "login");

    Ok(Json(LoginResponse {
        token,
        expires_in: state.config.token_ttl_hours * 3600,
    }))
}

/// GET /api/users/me - The authenticated user's own account.
pub async fn current_user(State(state): State<AppState>, actor: AuthUser) -> ApiResult<UserInfo> {
    let user = state
        .repo
        .get_user(actor.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(UserInfo::from(user)))
}

/// PUT /api/users/{id}/change-password - Change a user's password.
///
/// A superadmin may change anyone's password without the current one; a user
/// changing their own must present a matching current password. The result
/// is always stored hashed.
pub async fn change_password(
    State(state): State<AppState>,
    actor: AuthUser,
    Path(id): Path<i64>,
    Json(request): Json<ChangePasswordRequest>,
) -> ApiResult<UserInfo> {
    if request.new_password.trim().is_empty() {
        return Err(AppError::Validation("New password is required".to_string()));
    }

    let target = state
        .repo
        .get_user(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("User {} not found", id)))?;

    if actor.role != Role::Superadmin {
        if actor.user_id != id {
            return Err(AppError::Forbidden(
                "You may only change your own password".to_string(),
            ));
        }

        let current = request.current_password.as_deref().ok_or_else(|| {
            AppError::Validation("Current password is required".to_string())
        })?;

        let valid =
            password::verify_credential(current, &target.password, target.password_is_hashed)?;
        if !valid {
            return Err(AppError::Forbidden(
                "Current password does not match".to_string(),
            ));
        }
    }

    let hash = password::hash_password(&request.new_password)?;
    state.repo.set_password(id, &hash).await?;

    Ok(Json(UserInfo::from(target)))
}
