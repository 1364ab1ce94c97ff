use axum::Router;
use axum_helpers::JwtAuth;
use domain_users::{FixedPrincipalStore, UserRepository, UserService};
use std::sync::Arc;

pub mod auth;
pub mod health;
pub mod users;

/// Composes the API routes.
///
/// `/auth` is public; `/users` sits behind the bearer token middleware.
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes<R: UserRepository + 'static>(
    service: Arc<UserService<R>>,
    principals: Arc<FixedPrincipalStore>,
    jwt_auth: JwtAuth,
) -> Router {
    Router::new()
        .nest("/auth", auth::router(principals, jwt_auth.clone()))
        .nest("/users", users::router(service, jwt_auth))
}

/// Creates a router with the /ready endpoint that performs actual health checks.
///
/// This router has state applied and can be merged with the stateless app
/// router from `create_router`. The /ready endpoint pings the database when
/// one is configured.
pub fn ready_router(state: crate::state::AppState) -> Router {
    use axum::routing::get;

    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}
