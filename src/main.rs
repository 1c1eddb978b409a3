//! Zone Checker Backend
//!
//! A REST backend with SQLite persistence for tracking zone statuses and
//! task assignments across a three-role user base.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    extract::State,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use errors::AppError;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Zone Checker Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    if config.using_dev_secret() {
        tracing::warn!(
            "No signing secret configured (ZONE_JWT_SECRET). Using the development fallback!"
        );
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Identity is re-derived per request by the AuthUser extractor; only
    // login and the health check are open.
    let api_routes = Router::new()
        // Auth & users
        .route("/auth/login", post(api::login))
        .route("/users/me", get(api::current_user))
        .route("/users", get(api::list_users))
        .route("/users", post(api::create_user))
        .route("/users/{id}", put(api::update_user))
        .route("/users/{id}", delete(api::delete_user))
        .route("/users/{id}/change-password", put(api::change_password))
        // Zone registry
        .route("/cities", get(api::list_zones))
        .route("/cities", post(api::create_zone))
        // Status ledger
        .route("/status-update", post(api::update_status))
        .route("/status-history/{city_id}", get(api::status_history))
        // Tasks
        .route("/tasks", get(api::list_tasks))
        .route("/tasks", post(api::create_task))
        .route("/tasks/{id}/status", put(api::update_task_status))
        .route("/tasks/{id}/comments", post(api::add_task_comment))
        .route("/tasks/{id}", delete(api::delete_task))
        // Reports
        .route("/reports/task-status", get(api::task_status_report))
        .route(
            "/reports/zone-performance",
            get(api::zone_performance_report),
        );

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint verifying a database round-trip.
async fn health_check(State(state): State<AppState>) -> Result<&'static str, AppError> {
    state.repo.ping().await?;
    Ok("OK")
}
