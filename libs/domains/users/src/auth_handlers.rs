use axum::{Json, Router, extract::State, routing::post};
use axum_helpers::{JwtAuth, ValidatedJson};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::principal::{PrincipalStore, verify_password};

/// Application state for auth handlers
#[derive(Clone)]
pub struct AuthState<P: PrincipalStore> {
    pub principals: Arc<P>,
    pub jwt_auth: JwtAuth,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

/// Login with username/password, returning a bearer token
///
/// POST /auth/login
async fn login<P: PrincipalStore>(
    State(state): State<AuthState<P>>,
    ValidatedJson(input): ValidatedJson<LoginRequest>,
) -> UserResult<Json<TokenResponse>> {
    let principal = state
        .principals
        .resolve(&input.username)
        .ok_or(UserError::InvalidCredentials)?;

    if principal.disabled {
        return Err(UserError::Disabled);
    }

    if !verify_password(&input.password, &principal.password_hash)? {
        return Err(UserError::InvalidCredentials);
    }

    let token = state
        .jwt_auth
        .create_token(&principal.username)
        .map_err(|e| {
            tracing::error!("Failed to create token: {:?}", e);
            UserError::Internal("Failed to create token".to_string())
        })?;

    Ok(Json(TokenResponse { token }))
}

/// Create auth router
pub fn auth_router<P>(state: AuthState<P>) -> Router
where
    P: PrincipalStore + Clone + 'static,
{
    Router::new()
        .route("/login", post(login::<P>))
        .with_state(state)
}
