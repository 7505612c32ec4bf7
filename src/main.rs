//! Binary entry point: configuration, database bootstrap, and the HTTP
//! server.

use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use storefront::{
    api::{AppState, routes},
    config::{self, database, seed},
    errors::Result,
    gateway::stripe::StripeClient,
};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

const SEED_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file (as early as possible)
    dotenv().ok(); // Non-fatal, env vars can be set externally
    info!("Attempted to load .env file.");

    // 3. Load the main application configuration
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Failed to load application configuration: {e}"))?;
    info!("Successfully processed application configuration.");

    // 4. Initialize the database
    let db = database::create_connection(&app_config.database_url)
        .await
        .inspect(|_| info!("Database connection established."))
        .inspect_err(|e| error!("Failed to connect to database: {e}"))?;
    database::create_tables(&db).await?;

    // 5. Seed initial subcategories when a config.toml is present
    if std::path::Path::new(SEED_CONFIG_PATH).exists() {
        let seed_config = seed::load_config(SEED_CONFIG_PATH)?;
        let created = seed::seed_subcategories(&db, &seed_config).await?;
        info!(created, "Subcategory seed processed.");
    }

    // 6. Wire up the gateway and serve
    let gateway = Arc::new(StripeClient::new(
        app_config.stripe.secret_key.clone(),
        app_config.stripe.api_base.clone(),
    ));
    let bind_addr = app_config.bind_addr.clone();
    let state = AppState::new(db, gateway, Arc::new(app_config));
    let app = routes::router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {bind_addr}");
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
