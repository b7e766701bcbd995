//! Fueleco Server - REST API over the vehicle store
//!
//! Read-only HTTP surface: a filtered vehicle listing and a distinct-values
//! endpoint for filter controls. Each request opens a fresh store
//! connection and drops it when the handler returns; no pooling, no shared
//! mutable state.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;

use fueleco_store::{FilterOptions, StoreError, VehicleFilter, VehicleRecord, VehicleStore};

/// Application state shared across handlers.
pub struct AppState {
    pub store: VehicleStore,
}

/// Build the router. Cross-origin requests are permitted from any origin.
pub fn app(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/vehicles", get(list_vehicles))
        .route("/filter-options", get(filter_options))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}

#[derive(Deserialize)]
struct ListParams {
    year: Option<String>,
    manufacturer: Option<String>,
}

#[derive(Serialize)]
struct VehicleList {
    data: Vec<VehicleRecord>,
}

// GET /vehicles?year=2021,2022&manufacturer=Acme,Globex
async fn list_vehicles(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<VehicleList>, (StatusCode, String)> {
    let filter = VehicleFilter::from_params(params.year.as_deref(), params.manufacturer.as_deref());
    let data = state.store.list(&filter).await.map_err(internal_error)?;
    Ok(Json(VehicleList { data }))
}

// GET /filter-options
async fn filter_options(
    State(state): State<Arc<AppState>>,
) -> Result<Json<FilterOptions>, (StatusCode, String)> {
    let options = state.store.filter_options().await.map_err(internal_error)?;
    Ok(Json(options))
}

/// Store failures surface as a generic 500; details go to the log only.
fn internal_error(err: StoreError) -> (StatusCode, String) {
    warn!("store access failed: {}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal server error".to_string(),
    )
}
