use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::modules::podcast_summary::crud::PodcastSummaryStore;
use crate::services::gemini::ScriptGenerator;

pub mod config;
pub mod error;
pub mod modules;
pub mod services;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn PodcastSummaryStore>,
    pub generator: Arc<dyn ScriptGenerator>,
}

impl AppState {
    pub fn new(store: Arc<dyn PodcastSummaryStore>, generator: Arc<dyn ScriptGenerator>) -> Self {
        Self { store, generator }
    }
}

/// Builds the full HTTP application: module routes, health check, and the
/// catch-all layers that guarantee every request gets a JSON answer.
pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(modules::podcast_summary::routes::routes())
        .route("/health", get(health))
        .fallback(not_found)
        .with_state(state)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Route not found" })))
}

fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    tracing::error!(%detail, "Unhandled error while serving request");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "Something went wrong!" })),
    )
        .into_response()
}
