use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::settings::Settings;

pub const MAX_SOURCE_CHARS: usize = 50_000;

/// Finish reasons Gemini reports when a candidate was withheld by policy.
const BLOCKING_FINISH_REASONS: &[&str] = &["SAFETY", "BLOCKLIST", "PROHIBITED_CONTENT", "SPII"];

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Missing API key")]
    MissingApiKey,
    #[error("Source text is empty")]
    EmptyInput,
    #[error("Source text is {0} characters, limit is {MAX_SOURCE_CHARS}")]
    InputTooLong(usize),
    #[error("Content blocked: {0}")]
    ContentBlocked(String),
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("API error: {0}")]
    ApiError(String),
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[async_trait]
pub trait ScriptGenerator: Send + Sync {
    async fn generate_script(&self, source_text: &str) -> Result<String, GenerationError>;
}

pub fn build_prompt(source_text: &str) -> String {
    format!(
        r#"You are a podcast script writer. Your task is to generate an engaging podcast script
(approximately 2-4 minutes speaking time) based on the following text.

The script should include:
- A clear introduction by a host (or hosts).
- The main content derived from the input text, presented in a conversational style.
- Optional: Suggestions for sound effects or music cues (e.g., "[Intro Music Fades In]").
- A concluding remark or sign-off.

Input Text:
---
{source_text}
---

Podcast Script:
"#
    )
}

pub fn check_source_text(source_text: &str) -> Result<(), GenerationError> {
    if source_text.trim().is_empty() {
        return Err(GenerationError::EmptyInput);
    }
    let len = source_text.chars().count();
    if len > MAX_SOURCE_CHARS {
        return Err(GenerationError::InputTooLong(len));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
    block_reason_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    message: String,
}

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GenerationError::MissingApiKey);
        }

        Ok(Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            model: model.into(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, GenerationError> {
        Self::new(
            settings.gemini_api_key.clone(),
            settings.gemini_model.clone(),
            settings.gemini_base_url.clone(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, GenerationError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(format!("{}/models/{}:generateContent", self.base_url, self.model))
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let error_text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&error_text)
                .map(|e| e.error.message)
                .unwrap_or(error_text);
            if message.contains("SAFETY") {
                return Err(GenerationError::ContentBlocked(message));
            }
            return Err(GenerationError::ApiError(message));
        }

        let body: GenerateContentResponse = response.json().await?;
        extract_script(body)
    }
}

#[async_trait]
impl ScriptGenerator for GeminiClient {
    async fn generate_script(&self, source_text: &str) -> Result<String, GenerationError> {
        check_source_text(source_text)?;

        tracing::debug!(
            model = %self.model,
            chars = source_text.chars().count(),
            "Sending request to Gemini"
        );
        let script = self.generate_content(&build_prompt(source_text)).await?;
        tracing::debug!(chars = script.chars().count(), "Received script from Gemini");

        Ok(script)
    }
}

fn extract_script(response: GenerateContentResponse) -> Result<String, GenerationError> {
    if let Some(feedback) = response.prompt_feedback {
        if let Some(reason) = feedback.block_reason {
            let detail = match feedback.block_reason_message {
                Some(msg) => format!("Prompt blocked ({reason}): {msg}"),
                None => format!("Prompt blocked: {reason}"),
            };
            return Err(GenerationError::ContentBlocked(detail));
        }
    }

    let candidate = response
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| GenerationError::InvalidResponse("No candidates in response".to_string()))?;

    if let Some(reason) = candidate.finish_reason.as_deref() {
        if BLOCKING_FINISH_REASONS.contains(&reason) {
            return Err(GenerationError::ContentBlocked(format!(
                "Candidate was blocked due to {reason}"
            )));
        }
    }

    let script: String = candidate
        .content
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();

    if script.trim().is_empty() {
        return Err(GenerationError::InvalidResponse(
            "Empty script in response".to_string(),
        ));
    }

    Ok(script)
}
