pub mod bookmarks;
pub mod folders;
pub mod health;
pub mod helpers;
pub mod routes;
pub mod types;
pub mod validation;

pub use health::{AppStartTime, HealthService};
pub use routes::{api_routes, bookmark_routes, folder_routes, health_routes};
pub use types::{ErrorBody, FieldError, HealthResponse};
