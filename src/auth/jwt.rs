//! Session token generation and validation.
//!
//! Tokens are HS256-signed JWTs carrying the actor's identity, role, and
//! owned-zone reference so every request can re-derive its permissions
//! without a database round-trip.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::Role;

/// Claims embedded in every session token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: i64,
    pub username: String,
    pub role: Role,
    /// The zone reference this account is bound to (`"ADMIN"` for admins).
    #[serde(rename = "zoneRef")]
    pub zone_ref: String,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier for audit.
    pub jti: String,
}

/// Generate a signed session token for the given user, valid for `ttl_hours`.
pub fn generate_token(
    user_id: i64,
    username: &str,
    role: Role,
    zone_ref: &str,
    secret: &str,
    ttl_hours: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        username: username.to_string(),
        role,
        zone_ref: zone_ref.to_string(),
        exp: now + ttl_hours * 3600,
        iat: now,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::default(), // HS256
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Validate and decode a session token, returning the embedded [`Claims`].
///
/// Signature and expiration are checked automatically.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(token_data.claims)
}
