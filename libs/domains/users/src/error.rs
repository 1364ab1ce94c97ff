use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UserError {
    #[error("User {0} not found")]
    NotFound(i32),

    #[error("User with first and last name already exists")]
    DuplicateName,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("User is disabled")]
    Disabled,

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match &self {
            UserError::NotFound(id) => (
                StatusCode::NOT_FOUND,
                "not_found",
                format!("User {} not found", id),
            ),
            UserError::DuplicateName => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "duplicate",
                "User with first and last name already exists".to_string(),
            ),
            UserError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
            }
            UserError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid_credentials",
                "Invalid username or password".to_string(),
            ),
            UserError::Disabled => (
                StatusCode::UNAUTHORIZED,
                "disabled",
                "User is disabled".to_string(),
            ),
            UserError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (
            status,
            Json(json!({
                "error": {
                    "type": error_type,
                    "message": message
                }
            })),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::NotFound(1), StatusCode::NOT_FOUND),
            (UserError::DuplicateName, StatusCode::UNPROCESSABLE_ENTITY),
            (
                UserError::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (UserError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (UserError::Disabled, StatusCode::UNAUTHORIZED),
            (
                UserError::Internal("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }

    #[test]
    fn test_internal_error_does_not_leak_detail() {
        let response =
            UserError::Internal("duplicate key value violates unique constraint".into())
                .into_response();

        // Body carries only the generic message; detail stays in the log.
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
