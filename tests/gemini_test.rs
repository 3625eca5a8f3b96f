use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use podcast_scribe::services::gemini::{GeminiClient, GenerationError, ScriptGenerator, MAX_SOURCE_CHARS};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

/// What the stub provider should answer with.
#[derive(Clone)]
struct Stub {
    status: StatusCode,
    body: Value,
    seen: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

async fn generate_content(
    State(stub): State<Stub>,
    Path(model_action): Path<String>,
    headers: HeaderMap,
    Json(request): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    stub.seen.lock().unwrap().push((model_action, key, request));
    (stub.status, Json(stub.body.clone()))
}

async fn start_stub(status: StatusCode, body: Value) -> (String, Stub) {
    let stub = Stub {
        status,
        body,
        seen: Arc::new(Mutex::new(Vec::new())),
    };
    let app = Router::new()
        .route("/v1beta/models/{model_action}", post(generate_content))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{}/v1beta", addr), stub)
}

fn client(base_url: &str) -> GeminiClient {
    GeminiClient::new("test-key", "gemini-2.0-flash", base_url).unwrap()
}

#[tokio::test]
async fn test_generates_script_from_candidate_text() {
    let (base_url, stub) = start_stub(
        StatusCode::OK,
        json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Host: Welcome to the show!" }] },
                "finishReason": "STOP"
            }]
        }),
    )
    .await;

    let script = client(&base_url).generate_script("Notes about bees").await.unwrap();
    assert_eq!(script, "Host: Welcome to the show!");

    let seen = stub.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (model_action, key, request) = &seen[0];
    assert_eq!(model_action, "gemini-2.0-flash:generateContent");
    assert_eq!(key.as_deref(), Some("test-key"));
    let prompt = request["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(prompt.contains("You are a podcast script writer."));
    assert!(prompt.contains("Notes about bees"));
}

#[tokio::test]
async fn test_prompt_block_is_content_blocked() {
    let (base_url, _) = start_stub(
        StatusCode::OK,
        json!({ "promptFeedback": { "blockReason": "SAFETY" } }),
    )
    .await;

    let err = client(&base_url).generate_script("unsafe").await.unwrap_err();
    assert!(matches!(err, GenerationError::ContentBlocked(ref m) if m.contains("SAFETY")));
}

#[tokio::test]
async fn test_safety_error_message_is_content_blocked() {
    let (base_url, _) = start_stub(
        StatusCode::BAD_REQUEST,
        json!({ "error": { "code": 400, "message": "Request blocked: SAFETY", "status": "INVALID_ARGUMENT" } }),
    )
    .await;

    let err = client(&base_url).generate_script("unsafe").await.unwrap_err();
    assert!(matches!(err, GenerationError::ContentBlocked(_)));
}

#[tokio::test]
async fn test_provider_error_is_api_error() {
    let (base_url, _) = start_stub(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "error": { "code": 500, "message": "Internal error encountered.", "status": "INTERNAL" } }),
    )
    .await;

    let err = client(&base_url).generate_script("notes").await.unwrap_err();
    assert!(matches!(err, GenerationError::ApiError(ref m) if m == "Internal error encountered."));
}

#[tokio::test]
async fn test_unreachable_provider_is_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{}/v1beta", addr))
        .generate_script("notes")
        .await
        .unwrap_err();
    assert!(matches!(err, GenerationError::RequestError(_)));
}

#[tokio::test]
async fn test_oversized_input_never_reaches_provider() {
    let (base_url, stub) = start_stub(StatusCode::OK, json!({})).await;

    let err = client(&base_url)
        .generate_script(&"a".repeat(MAX_SOURCE_CHARS + 1))
        .await
        .unwrap_err();

    assert!(matches!(err, GenerationError::InputTooLong(_)));
    assert!(stub.seen.lock().unwrap().is_empty());
}
