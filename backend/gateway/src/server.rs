//! Main HTTP gateway server.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use sightgate_core::VisionProvider;
use sightgate_vision::{DEFAULT_IMAGE_MODEL, DEFAULT_VIDEO_MODEL};

use crate::routes;

/// Which remote model each pipeline family asks for.
#[derive(Debug, Clone)]
pub struct ModelConfig {
    /// Single-image endpoints (/detect, /aadhar, /barcode).
    pub image_model: String,
    /// The frame-grid endpoint (/analyze).
    pub video_model: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            image_model: DEFAULT_IMAGE_MODEL.to_string(),
            video_model: DEFAULT_VIDEO_MODEL.to_string(),
        }
    }
}

/// Application state shared across routes.
pub struct AppState {
    pub provider: Arc<dyn VisionProvider>,
    /// Client for fetching remote videos; reused across requests.
    pub http: reqwest::Client,
    pub models: ModelConfig,
}

/// Build the axum router with all API routes. CORS is fully permissive:
/// the endpoints are called from browser frontends on arbitrary origins.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(routes::health))
        .route("/detect", post(routes::detect))
        .route("/analyze", post(routes::analyze))
        .route("/aadhar", post(routes::aadhar))
        .route("/barcode", post(routes::barcode))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Starts the axum HTTP server for the gateway.
pub async fn start_server(addr: SocketAddr, state: Arc<AppState>) -> Result<()> {
    let app = build_router(state);

    info!("SightGate HTTP server listening on {}", addr);
    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
