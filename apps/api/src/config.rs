use axum_helpers::JwtConfig;
use core_config::{AppInfo, FromEnv, app_info, env_or_default, server::ServerConfig};
use core_config::postgres::PostgresConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Credentials for the single login principal.
///
/// Defaults match the development account; override both in production.
#[derive(Clone, Debug)]
pub struct LoginConfig {
    pub username: String,
    pub password: String,
}

impl LoginConfig {
    fn from_env() -> Self {
        Self {
            username: env_or_default("LOGIN_USERNAME", "developer"),
            password: env_or_default("LOGIN_PASSWORD", "dev"),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub server: ServerConfig,
    pub jwt: JwtConfig,
    pub login: LoginConfig,
    /// Absent when DATABASE_URL is not set; the app then falls back to the
    /// in-memory store.
    pub database: Option<PostgresConfig>,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let jwt = JwtConfig::from_env()?; // Required - will fail if JWT_SECRET not set
        let login = LoginConfig::from_env();
        let database = if std::env::var("DATABASE_URL").is_ok() {
            Some(PostgresConfig::from_env()?)
        } else {
            None
        };

        Ok(Self {
            app: app_info!(),
            server,
            jwt,
            login,
            database,
            environment,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_config_defaults() {
        temp_env::with_vars_unset(["LOGIN_USERNAME", "LOGIN_PASSWORD"], || {
            let login = LoginConfig::from_env();
            assert_eq!(login.username, "developer");
            assert_eq!(login.password, "dev");
        });
    }

    #[test]
    fn test_login_config_overrides() {
        temp_env::with_vars(
            [
                ("LOGIN_USERNAME", Some("ops")),
                ("LOGIN_PASSWORD", Some("s3cret")),
            ],
            || {
                let login = LoginConfig::from_env();
                assert_eq!(login.username, "ops");
                assert_eq!(login.password, "s3cret");
            },
        );
    }

    #[test]
    fn test_database_config_optional() {
        temp_env::with_vars(
            [
                ("DATABASE_URL", None::<&str>),
                ("JWT_SECRET", Some("a-test-secret-that-is-long-enough!!!")),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert!(config.database.is_none());
            },
        );
    }
}
