use axum::{
    routing::{delete, get},
    Router,
};

use crate::modules::podcast_summary::controller;
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/podcast-summary",
            get(controller::list_podcast_summaries).post(controller::create_podcast_summary),
        )
        .route("/podcast-summary/{id}", delete(controller::delete_podcast_summary))
}
