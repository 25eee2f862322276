//! Products API - REST server for the product catalogue

use axum_helpers::{CleanupCoordinator, close_postgres, create_production_app, health_router};
use core_config::FromEnv;
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_from_config_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);
    observability::init_metrics()?;

    let db = connect_from_config_with_retry(config.postgres.clone(), None).await?;
    info!("Successfully connected to PostgreSQL");

    if config.run_migrations {
        run_migrations::<Migrator>(&db, config.app.name).await?;
    } else {
        info!("RUN_MIGRATIONS is false, skipping migrations");
    }

    let state = AppState { db };

    // Build REST router
    let api_routes = api::routes(&state);
    let router = axum_helpers::create_router::<openapi::ApiDoc>(
        api_routes,
        &config.server.cors_allowed_origins,
    )?;
    let app = router.merge(health_router(config.app));

    info!(
        "Starting {} v{} on port {}",
        config.app.name, config.app.version, config.server.port
    );

    create_production_app(app, &config.server, Duration::from_secs(30), async move {
        let mut cleanup = CleanupCoordinator::new();
        cleanup.add_task("postgres", async move {
            close_postgres(state.db, "main").await;
        });
        cleanup.run().await;
    })
    .await?;

    info!("Products API shutdown complete");
    Ok(())
}
