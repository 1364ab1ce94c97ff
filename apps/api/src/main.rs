use std::sync::Arc;

use axum_helpers::{JwtAuth, create_app, create_router, health_router};
use core_config::tracing::{init_tracing, install_color_eyre};
use domain_users::{
    FixedPrincipalStore, InMemoryUserRepository, PostgresUserRepository, UserService,
};
use migration::{Migrator, MigratorTrait};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    let jwt_auth = JwtAuth::new(&config.jwt);
    let principals = Arc::new(
        FixedPrincipalStore::new(&config.login.username, &config.login.password)
            .map_err(|e| eyre::eyre!("Failed to initialize login principal: {}", e))?,
    );

    // Pick the store: Postgres when DATABASE_URL is set, in-memory otherwise
    let (api_routes, db) = match config.database.clone() {
        Some(postgres) => {
            info!("Connecting to PostgreSQL");
            let db = sea_orm::Database::connect(postgres.into_connect_options()).await?;

            info!("Running pending migrations");
            Migrator::up(&db, None).await?;

            let repository = Arc::new(PostgresUserRepository::new(db.clone()));
            let service = Arc::new(UserService::new(repository));
            (
                api::routes(service, principals, jwt_auth.clone()),
                Some(db),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory store, data will not persist");
            let repository = Arc::new(InMemoryUserRepository::new());
            let service = Arc::new(UserService::new(repository));
            (api::routes(service, principals, jwt_auth.clone()), None)
        }
    };

    let state = AppState {
        config: config.clone(),
        db,
    };

    // create_router adds docs/middleware to our composed routes
    let router = create_router::<openapi::ApiDoc>(api_routes).await?;

    // Merge health endpoints into the app
    // - /health: liveness check with app name/version
    // - /ready: readiness check that pings the database when configured
    let app = router
        .merge(health_router(config.app))
        .merge(api::ready_router(state.clone()));

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    if let Some(db) = state.db {
        info!("Shutting down: closing database connection");
        if let Err(e) = db.close().await {
            tracing::error!("Error closing PostgreSQL: {}", e);
        }
    }

    info!("User API shutdown complete");
    Ok(())
}
