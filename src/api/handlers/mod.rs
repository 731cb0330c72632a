//! HTTP request handlers.

pub mod admin_handler;
pub mod application_handler;
pub mod auth_handler;
pub mod company_handler;
pub mod job_handler;
pub mod profile_handler;

pub use admin_handler::admin_routes;
pub use application_handler::application_routes;
pub use auth_handler::{auth_me_routes, auth_routes};
pub use company_handler::company_routes;
pub use job_handler::job_routes;
pub use profile_handler::profile_routes;

use crate::errors::{AppError, AppResult};

/// Parse a path identifier; malformed ids read as "not found", the same
/// as unknown ones.
pub(crate) fn parse_id(raw: &str) -> AppResult<uuid::Uuid> {
    uuid::Uuid::parse_str(raw).map_err(|_| AppError::NotFound)
}
