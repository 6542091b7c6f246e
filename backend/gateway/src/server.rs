//! Main HTTP Gateway Server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use snapsight_clarifai::AnalysisProvider;

use crate::analyze_api;
use crate::health_api;

/// Largest accepted request body; axum's 2 MiB default is too small for photos.
const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Application state shared across routes.
#[derive(Clone)]
pub struct GatewayState {
    /// The vision inference backend.
    pub provider: Arc<dyn AnalysisProvider>,
    /// Static API token; `None` disables the auth gate.
    pub bearer_token: Option<String>,
}

/// Build the Axum router with all API routes.
pub fn build_router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(health_api::get_health))
        .route("/analyze-image", post(analyze_api::analyze_image))
        .route("/analyze-image-url", post(analyze_api::analyze_image_url))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the Axum HTTP server for the gateway.
pub async fn start_server(addr: SocketAddr, state: GatewayState) -> Result<()> {
    let app = build_router(state);

    info!("Gateway HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
