//! # Axum Helpers
//!
//! Utilities, middleware, and helpers shared by Axum services in this
//! workspace.
//!
//! ## Modules
//!
//! - **[`auth`]**: stateless JWT bearer authentication
//! - **[`server`]**: router assembly, health endpoint, graceful shutdown
//! - **[`errors`]**: structured error responses
//! - **[`extractors`]**: validated JSON extraction

pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

pub use auth::{jwt_auth_middleware, JwtAuth, JwtClaims, JwtConfig, DEFAULT_TOKEN_TTL};

pub use server::{create_app, create_router, health_router, shutdown_signal, HealthResponse};

pub use errors::ErrorResponse;

pub use extractors::ValidatedJson;
