use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use crate::error::ApiError;
use crate::modules::podcast_summary::{
    model::NewPodcastSummary,
    schema::{
        CreatePodcastSummaryRequest, CreatePodcastSummaryResponse, DeletePodcastSummaryResponse,
        PodcastSummaryListResponse,
    },
};
use crate::AppState;

pub async fn list_podcast_summaries(
    State(state): State<AppState>,
) -> Result<Json<PodcastSummaryListResponse>, ApiError> {
    let podcast_summaries = state.store.list().await?;

    Ok(Json(PodcastSummaryListResponse { podcast_summaries }))
}

pub async fn create_podcast_summary(
    State(state): State<AppState>,
    payload: Result<Json<CreatePodcastSummaryRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<CreatePodcastSummaryResponse>), ApiError> {
    let Json(payload) = payload.inspect_err(|e| {
        tracing::warn!(error = %e.body_text(), "Rejected podcast summary body");
    })?;

    if let Err(e) = payload.check() {
        tracing::warn!(error = %e, "Podcast summary request failed validation");
        return Err(e);
    }

    tracing::info!(
        title = %payload.title,
        chars = payload.summary.chars().count(),
        "Generating podcast script"
    );
    let script = state.generator.generate_script(&payload.summary).await?;

    let podcast_summary = state
        .store
        .create(NewPodcastSummary::new(payload.title, script.clone()))
        .await?;
    tracing::info!(id = %podcast_summary.id, "Stored podcast summary");

    Ok((
        StatusCode::CREATED,
        Json(CreatePodcastSummaryResponse {
            podcast_summary,
            podcast_script: script,
        }),
    ))
}

pub async fn delete_podcast_summary(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DeletePodcastSummaryResponse>, ApiError> {
    let deleted_podcast = state.store.delete(&id).await?;
    tracing::info!(%id, "Deleted podcast summary");

    Ok(Json(DeletePodcastSummaryResponse {
        message: "Podcast deleted".to_string(),
        deleted_podcast,
    }))
}
