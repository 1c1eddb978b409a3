//! Data models for the Zone Checker application.
//!
//! These models match the frontend TypeScript interfaces exactly for seamless interoperability.

mod report;
mod status;
mod task;
mod user;
mod zone;

pub use report::*;
pub use status::*;
pub use task::*;
pub use user::*;
pub use zone::*;
