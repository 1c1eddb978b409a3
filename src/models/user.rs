//! User account model and authentication request bodies.

use serde::{Deserialize, Serialize};

/// Sentinel zone reference carried by admin and superadmin accounts,
/// meaning "all zones". Generated zone references always end in three
/// digits, so this value can never collide with a real one.
pub const ALL_ZONES_REF: &str = "ADMIN";

/// Username of the seeded bootstrap account, which can never be deleted.
pub const SEED_ADMIN_USERNAME: &str = "admin";

/// Account role determining what an actor may do.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Superadmin,
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Superadmin => "superadmin",
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "superadmin" => Some(Role::Superadmin),
            "admin" => Some(Role::Admin),
            "user" => Some(Role::User),
            _ => None,
        }
    }

    /// Whether this role carries admin privileges (admin or superadmin).
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Superadmin | Role::Admin)
    }
}

/// A full user row, including the stored credential.
///
/// Never serialized to the wire; handlers return [`UserInfo`] instead.
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub password_is_hashed: bool,
    pub role: Role,
    pub zone_ref: String,
    pub email: Option<String>,
    pub last_login: Option<String>,
}

/// Wire representation of a user, with the credential stripped.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    pub role: Role,
    pub zone_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_login: Option<String>,
}

impl From<User> for UserInfo {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
            zone_ref: user.zone_ref,
            email: user.email,
            last_login: user.last_login,
        }
    }
}

/// Request body for POST /api/auth/login.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response body for a successful login.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    /// Token lifetime in seconds.
    pub expires_in: i64,
}

/// Request body for creating a new user account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub zone_ref: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for updating an existing user account.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub zone_ref: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Request body for PUT /api/users/{id}/change-password.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    /// Required when a user changes their own password; superadmins may omit it.
    #[serde(default)]
    pub current_password: Option<String>,
    pub new_password: String,
}
