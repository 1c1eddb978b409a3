//! REST API module.
//!
//! Contains all API routes and handlers following the frontend contract.
//! Handlers are thin: authenticate via the [`crate::auth::AuthUser`]
//! extractor, authorize via [`crate::auth::policy::can`], then delegate to
//! the repository.

mod auth;
mod reports;
mod status;
mod tasks;
mod users;
mod zones;

pub use auth::*;
pub use reports::*;
pub use status::*;
pub use tasks::*;
pub use users::*;
pub use zones::*;

use axum::Json;

use crate::errors::AppError;

/// Handler result: a JSON body on success, an `{ "message": ... }` error
/// body with the mapped status code otherwise.
pub type ApiResult<T> = Result<Json<T>, AppError>;
