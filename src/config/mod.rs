//! Configuration module for the Zone Checker backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Fallback signing secret for local development only.
const DEV_JWT_SECRET: &str = "zone-checker-dev-secret";

/// Session token lifetime in hours.
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to SQLite database file
    pub db_path: PathBuf,
    /// Address to bind the server to
    pub bind_addr: SocketAddr,
    /// HMAC secret used to sign session tokens
    pub jwt_secret: String,
    /// Session token lifetime in hours
    pub token_ttl_hours: i64,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let db_path = env::var("ZONE_DB_PATH")
            .unwrap_or_else(|_| "./data/app.sqlite".to_string())
            .into();

        let bind_addr = env::var("ZONE_BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string())
            .parse()
            .expect("Invalid ZONE_BIND_ADDR format");

        let jwt_secret =
            env::var("ZONE_JWT_SECRET").unwrap_or_else(|_| DEV_JWT_SECRET.to_string());

        let token_ttl_hours = env::var("ZONE_TOKEN_TTL_HOURS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TOKEN_TTL_HOURS);

        let log_level = env::var("ZONE_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            db_path,
            bind_addr,
            jwt_secret,
            token_ttl_hours,
            log_level,
        }
    }

    /// Whether the signing secret is still the built-in development fallback.
    pub fn using_dev_secret(&self) -> bool {
        self.jwt_secret == DEV_JWT_SECRET
    }
}
