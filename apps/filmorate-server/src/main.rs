//! Filmorate Server binary.

use std::net::SocketAddr;

use axum::Router;
use film_store::{MemoryStore, SqliteStore};
use filmorate_server::{
    config::{Config, StorageKind},
    create_app, create_state, init_tracing,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env if present
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_tracing(&config.log_level);

    tracing::info!(storage = %config.storage, "Starting Filmorate Server");

    let app = build_app(config.clone()).await?;

    let addr: SocketAddr = config.server_addr().parse()?;

    tracing::info!(addr = %addr, "Server listening");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Opens the configured store and wires it into the router.
async fn build_app(config: Config) -> anyhow::Result<Router> {
    let app = match config.storage {
        StorageKind::Memory => create_app(create_state(config, MemoryStore::new())),
        StorageKind::Sqlite => {
            tracing::info!(url = %config.database_url, "Opening database");
            let store = SqliteStore::connect(&config.database_url).await?;
            create_app(create_state(config, store))
        }
    };
    Ok(app)
}
