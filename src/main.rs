use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use campus_resources_api::cli::ServerArgs;
use campus_resources_api::database::DatabaseManager;
use campus_resources_api::state::AppState;
use campus_resources_api::{config, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up MONGODB_URI, STORE_BACKEND, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServerArgs::parse();
    let config = config::config();
    tracing::info!(
        "Starting Campus Resources API in {:?} mode ({:?} store)",
        config.environment,
        config.database.backend
    );

    let store = DatabaseManager::connect(&config.database)
        .await
        .context("failed to open document store")?;
    let app = routes::app(AppState::new(store), config);

    let bind_addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
