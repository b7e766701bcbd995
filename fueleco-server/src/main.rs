//! Server entrypoint: environment configuration, logging, bind and serve.

use std::sync::Arc;

use fueleco_server::{app, AppState};
use fueleco_store::VehicleStore;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Set up logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let db_path = std::env::var("FUELECO_DB").unwrap_or_else(|_| "fuel_economy.db".to_string());
    let addr = std::env::var("FUELECO_ADDR").unwrap_or_else(|_| "0.0.0.0:3001".to_string());

    let state = Arc::new(AppState {
        store: VehicleStore::new(&db_path),
    });

    info!("Starting fueleco server on {} (store: {})", addr, db_path);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
