use axum::{Router, middleware::from_fn_with_state};
use axum_helpers::{JwtAuth, jwt_auth_middleware};
use domain_users::{UserRepository, UserService, handlers};
use std::sync::Arc;

/// Users routes, protected by the bearer token middleware.
pub fn router<R: UserRepository + 'static>(
    service: Arc<UserService<R>>,
    jwt_auth: JwtAuth,
) -> Router {
    handlers::router(service).layer(from_fn_with_state(jwt_auth, jwt_auth_middleware))
}
