//! Shared state for the readiness endpoint.

use sea_orm::DatabaseConnection;

/// State for `/ready`, cloned per request (cheap Arc clones).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// Present only when the app booted against Postgres
    pub db: Option<DatabaseConnection>,
}
