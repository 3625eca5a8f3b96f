use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use podcast_scribe::modules::podcast_summary::memory::MemoryStore;
use podcast_scribe::services::gemini::{GenerationError, ScriptGenerator};
use podcast_scribe::{app, AppState};

#[derive(Clone, Copy)]
pub enum Outcome {
    Script,
    Blocked,
    ProviderDown,
}

/// Generator double that records how often it was called.
pub struct FakeGenerator {
    outcome: Outcome,
    calls: AtomicUsize,
}

impl FakeGenerator {
    pub fn new(outcome: Outcome) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScriptGenerator for FakeGenerator {
    async fn generate_script(&self, source_text: &str) -> Result<String, GenerationError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.outcome {
            Outcome::Script => Ok(format!("[Intro Music Fades In]\nHost: Today we cover {source_text}.")),
            Outcome::Blocked => Err(GenerationError::ContentBlocked(
                "Candidate was blocked due to SAFETY".to_string(),
            )),
            Outcome::ProviderDown => Err(GenerationError::ApiError(
                "backend 10.1.2.3 unavailable".to_string(),
            )),
        }
    }
}

pub fn setup_test_server(outcome: Outcome) -> (TestServer, Arc<FakeGenerator>) {
    let generator = FakeGenerator::new(outcome);
    let state = AppState::new(Arc::new(MemoryStore::new()), generator.clone());

    (TestServer::new(app(state)).unwrap(), generator)
}
