//! APPEJV Server — Application entry point.

use appejv_db::{DbConfig, DbManager, run_migrations};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("appejv=info".parse().unwrap()),
        )
        .json()
        .init();

    tracing::info!("Starting APPEJV server...");

    let config = DbConfig::from_env();

    let manager = match DbManager::connect(&config).await {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to SurrealDB");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(manager.client()).await {
        tracing::error!(error = %e, "Failed to run migrations");
        std::process::exit(1);
    }

    tracing::info!("Schema is up to date");

    // TODO: Start REST API server

    tracing::info!("APPEJV server stopped.");
}
