pub mod api;
pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

pub use logic::{FieldError, FieldService};

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store, StoreError};

use std::sync::Arc;
use tokio::net::TcpListener;

/// Serve the API for `store` on an already bound listener until the server stops
pub async fn serve<S: Store + 'static>(store: Arc<S>, listener: TcpListener) -> anyhow::Result<()> {
    let app = crate::api::routes::create_router().with_state(store);
    axum::serve(listener, app).await?;
    Ok(())
}

// Function for integration testing
pub async fn run_server() -> anyhow::Result<()> {
    use anyhow::Context;

    // Load environment variables from .env file if it exists
    dotenvy::dotenv().ok();

    // Initialize logging with INFO level only (suppress DEBUG logs)
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .filter_module("sqlx", log::LevelFilter::Warn)
        .try_init();

    let config = crate::config::AppConfig::load()?;
    log::info!(
        "Configuration loaded: server={}:{}",
        config.server.host,
        config.server.port
    );

    log::info!("Connecting to PostgreSQL...");
    let store = crate::store::PostgresStore::new(
        &config.database_url(),
        config.database.max_connections,
    )
    .await?;

    if config.database.run_migrations {
        log::info!("Running database migrations...");
        store.migrate().await?;
    }

    if config.seed.load_demo_data {
        log::info!("Loading seed data...");
        crate::seed::load_seed_data(&store).await?;
    }

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;
    log::info!("PAS field API running on http://{}", bind_address);

    serve(Arc::new(store), listener).await
}
