//! Authentication and authorization module.
//!
//! Session identity travels in a signed Bearer token and is re-derived on
//! every request by the [`AuthUser`] extractor; handlers then consult
//! [`policy::can`] before touching any data.

pub mod jwt;
pub mod password;
pub mod policy;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::errors::AppError;
use crate::models::Role;
use crate::AppState;

/// Authenticated actor extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Use as an extractor parameter in any handler that requires authentication;
/// requests without a valid token are rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user's internal database id (from `claims.sub`).
    pub user_id: i64,
    pub username: String,
    pub role: Role,
    /// Owned zone reference (`"ADMIN"` for admin accounts).
    pub zone_ref: String,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Unauthenticated("Missing Authorization header".to_string())
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Unauthenticated(
                "Invalid Authorization format. Expected: Bearer <token>".to_string(),
            )
        })?;

        let claims = jwt::validate_token(token, &state.config.jwt_secret)
            .map_err(|_| AppError::Unauthenticated("Invalid or expired token".to_string()))?;

        Ok(AuthUser {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role,
            zone_ref: claims.zone_ref,
        })
    }
}
