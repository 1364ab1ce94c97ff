use super::jwt::JwtAuth;
use axum::{
    extract::{Request, State},
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Extract a bearer token from the Authorization header
fn extract_token_from_request(headers: &HeaderMap) -> Option<String> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|auth| auth.strip_prefix("Bearer ").map(|s| s.to_string()))
}

/// JWT authentication middleware.
///
/// Validates the bearer token from the Authorization header. Rejects the
/// request with 401 before it reaches any handler when the token is missing,
/// malformed, expired, or signed with the wrong key. Inserts the decoded
/// [`super::JwtClaims`] into request extensions on success.
///
/// # Example
///
/// ```ignore
/// use axum::Router;
/// use axum_helpers::{JwtAuth, JwtConfig, jwt_auth_middleware};
///
/// let auth = JwtAuth::new(&JwtConfig::new("a-secret-that-is-at-least-32-chars!!"));
///
/// let protected_routes = Router::new()
///     .route("/users", get(list_users))
///     .layer(axum::middleware::from_fn_with_state(
///         auth.clone(),
///         jwt_auth_middleware,
///     ));
/// ```
pub async fn jwt_auth_middleware(
    State(auth): State<JwtAuth>,
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, impl IntoResponse> {
    let token = match extract_token_from_request(&headers) {
        Some(t) => t,
        None => {
            tracing::debug!("No bearer token in Authorization header");
            return Err((StatusCode::UNAUTHORIZED, "No token provided"));
        }
    };

    let claims = match auth.verify_token(&token) {
        Ok(c) => c,
        Err(e) => {
            tracing::debug!("JWT verification failed: {}", e);
            return Err((StatusCode::UNAUTHORIZED, "Invalid token"));
        }
    };

    request.extensions_mut().insert(claims);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::JwtConfig;
    use axum::{body::Body, routing::get, Router};
    use tower::ServiceExt;

    fn protected_app(auth: JwtAuth) -> Router {
        Router::new()
            .route("/users", get(|| async { "ok" }))
            .layer(axum::middleware::from_fn_with_state(
                auth,
                jwt_auth_middleware,
            ))
    }

    fn test_auth() -> JwtAuth {
        JwtAuth::new(&JwtConfig::new("middleware-test-secret-long-enough!!!"))
    }

    #[tokio::test]
    async fn test_request_without_token_is_rejected() {
        let app = protected_app(test_auth());

        let request = Request::builder()
            .uri("/users")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_request_with_garbage_token_is_rejected() {
        let app = protected_app(test_auth());

        let request = Request::builder()
            .uri("/users")
            .header("authorization", "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_request_with_valid_token_passes() {
        let auth = test_auth();
        let token = auth.create_token("developer").unwrap();
        let app = protected_app(auth);

        let request = Request::builder()
            .uri("/users")
            .header("authorization", format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
