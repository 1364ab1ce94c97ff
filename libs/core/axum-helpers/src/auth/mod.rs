mod config;
mod jwt;
mod middleware;

pub use config::JwtConfig;
pub use jwt::{JwtAuth, JwtClaims, DEFAULT_TOKEN_TTL};
pub use middleware::jwt_auth_middleware;
