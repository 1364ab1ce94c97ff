pub mod handlers;

use serde::Serialize;
use utoipa::ToSchema;

/// Standard error response structure.
///
/// Returned for framework-level failures (validation rejections, unknown
/// routes), providing consistent error information to clients:
/// - `error`: machine-readable error identifier (e.g., "BadRequest")
/// - `message`: human-readable error message
/// - `details`: optional structured details (e.g., per-field validation errors)
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable error identifier for programmatic handling
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Optional structured error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
