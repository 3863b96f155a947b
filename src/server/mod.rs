//! HTTP surface of the service.
//!
//! One JSON endpoint does the work (`POST /api/mockups`); `/health` and
//! `/metrics` exist for operators. All request handling state is shared
//! through [`AppState`] and immutable for the life of the process.

pub mod handlers;

use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use std::time::Instant;

use crate::config::Config;
use crate::metrics::Metrics;
use crate::mockup::{HttpImageFetcher, MockupGenerator};
use crate::store::{HttpImageStore, ImageStore};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<MockupGenerator>,
    pub store: Arc<dyn ImageStore>,
    pub metrics: Arc<Metrics>,
    pub store_folder: String,
    pub started_at: Instant,
}

/// Build the router with all routes bound to the given state.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/mockups", post(handlers::generate_mockups))
        .route("/health", get(handlers::health))
        .route("/metrics", get(handlers::export_metrics))
        .with_state(state)
}

/// Construct the service from configuration and serve until shutdown.
pub async fn run(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let fetcher = Arc::new(HttpImageFetcher::new(&config.fetch)?);
    let generator = Arc::new(MockupGenerator::new(fetcher, config.placement_table()));
    let store: Arc<dyn ImageStore> = Arc::new(HttpImageStore::new(&config.store)?);

    let state = AppState {
        generator,
        store,
        metrics: Arc::new(Metrics::new()),
        store_folder: config.store.folder.clone(),
        started_at: Instant::now(),
    };

    let app = build_router(state);

    let listen_addr = format!("{}:{}", config.server.address, config.server.port);
    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;

    tracing::info!(
        address = %listen_addr,
        "Starting Proofpress mockup service"
    );

    axum::serve(listener, app).await?;

    Ok(())
}
