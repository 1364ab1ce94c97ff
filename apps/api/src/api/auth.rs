use axum::Router;
use axum_helpers::JwtAuth;
use domain_users::{AuthState, FixedPrincipalStore, auth_router};
use std::sync::Arc;

/// Login routes; no token required.
pub fn router(principals: Arc<FixedPrincipalStore>, jwt_auth: JwtAuth) -> Router {
    auth_router(AuthState {
        principals,
        jwt_auth,
    })
}
