use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::ApiError;
use crate::modules::podcast_summary::model::PodcastSummary;
use crate::services::gemini::MAX_SOURCE_CHARS;

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePodcastSummaryRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[serde(alias = "textContent")]
    #[validate(length(min = 1, message = "Summary cannot be empty"))]
    pub summary: String,
}

impl CreatePodcastSummaryRequest {
    /// Runs before any generation call or store write. Oversized source text
    /// is reported separately from other shape errors.
    pub fn check(&self) -> Result<(), ApiError> {
        self.validate()
            .map_err(|e| ApiError::Validation(e.to_string()))?;

        if self.title.trim().is_empty() {
            return Err(ApiError::Validation("title: Title cannot be blank".to_string()));
        }
        if self.summary.trim().is_empty() {
            return Err(ApiError::Validation("summary: Summary cannot be blank".to_string()));
        }

        let len = self.summary.chars().count();
        if len > MAX_SOURCE_CHARS {
            return Err(ApiError::PayloadTooLarge(format!(
                "Input text too long ({len} characters, limit is {MAX_SOURCE_CHARS})."
            )));
        }

        Ok(())
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastSummaryListResponse {
    pub podcast_summaries: Vec<PodcastSummary>,
}

#[derive(Debug, Serialize)]
pub struct CreatePodcastSummaryResponse {
    #[serde(rename = "podcastSummary")]
    pub podcast_summary: PodcastSummary,
    pub podcast_script: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePodcastSummaryResponse {
    pub message: String,
    pub deleted_podcast: PodcastSummary,
}
