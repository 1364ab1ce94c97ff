//! Configuration types for axum-helpers.
//!
//! These implement the `FromEnv` trait from `core_config`, following the same
//! pattern as `ServerConfig` and `PostgresConfig`.

use super::jwt::DEFAULT_TOKEN_TTL;
use core_config::{env_or_default, env_required, ConfigError, FromEnv};

/// JWT authentication configuration.
///
/// Loaded from environment variables:
/// - `JWT_SECRET` (required) - must be at least 32 characters
/// - `TOKEN_TTL_SECONDS` (optional) - bearer token validity window
#[derive(Clone, Debug)]
pub struct JwtConfig {
    /// JWT signing secret (minimum 32 characters)
    pub secret: String,
    /// Token validity window in seconds
    pub ttl_seconds: i64,
}

impl JwtConfig {
    /// Create a new JwtConfig with the given secret and the default TTL.
    ///
    /// # Panics
    /// Panics if the secret is less than 32 characters.
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        assert!(
            secret.len() >= 32,
            "JWT secret must be at least 32 characters"
        );
        Self {
            secret,
            ttl_seconds: DEFAULT_TOKEN_TTL,
        }
    }

    pub fn with_ttl(mut self, ttl_seconds: i64) -> Self {
        self.ttl_seconds = ttl_seconds;
        self
    }
}

impl FromEnv for JwtConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let secret = env_required("JWT_SECRET")?;

        if secret.len() < 32 {
            return Err(ConfigError::ParseError {
                key: "JWT_SECRET".to_string(),
                details: format!(
                    "must be at least 32 characters for security (got {}). Generate one with: openssl rand -base64 32",
                    secret.len()
                ),
            });
        }

        let ttl_seconds = env_or_default("TOKEN_TTL_SECONDS", &DEFAULT_TOKEN_TTL.to_string())
            .parse()
            .map_err(|e| ConfigError::ParseError {
                key: "TOKEN_TTL_SECONDS".to_string(),
                details: format!("{}", e),
            })?;

        Ok(Self {
            secret,
            ttl_seconds,
        })
    }
}
