//! HTTP front end: upload form, result page and a small JSON API.

pub mod render;
pub mod routes;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use log::info;

use crate::config::ServerConfig;
use crate::pipeline::ModelContext;

/// Shared handler state. Cloning only bumps the `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub context: Arc<ModelContext>,
}

pub fn router(context: Arc<ModelContext>, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/", get(routes::index))
        .route("/analyze", post(routes::analyze_page))
        .route("/api/predict", post(routes::api_predict))
        .route("/health", get(routes::health))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .with_state(AppState { context })
}

/// Binds the configured address and serves until the process exits.
pub async fn serve(config: &ServerConfig, context: Arc<ModelContext>) -> std::io::Result<()> {
    let app = router(context, config.max_upload_bytes);
    let listener = tokio::net::TcpListener::bind(config.bind_address()).await?;
    info!("Listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await
}
