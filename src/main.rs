use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use podcast_scribe::config::{
    database,
    settings::{Settings, StoreBackend},
};
use podcast_scribe::modules::podcast_summary::{
    crud::{PodcastSummaryCrud, PodcastSummaryStore},
    memory::MemoryStore,
};
use podcast_scribe::services::gemini::GeminiClient;
use podcast_scribe::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "podcast_scribe=debug,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "FATAL: invalid configuration, refusing to start");
            return Err(e.into());
        }
    };

    let generator = GeminiClient::from_settings(&settings).context("building Gemini client")?;
    tracing::info!(model = generator.model(), "Gemini client ready");

    let store: Arc<dyn PodcastSummaryStore> = match &settings.store {
        StoreBackend::Memory => {
            tracing::info!(seeded = settings.seed_examples, "Using in-memory podcast summary store");
            if settings.seed_examples {
                Arc::new(MemoryStore::with_examples())
            } else {
                Arc::new(MemoryStore::new())
            }
        }
        StoreBackend::MongoDb { uri, database: db_name } => {
            let db = database::connect(uri, db_name)
                .await
                .context("connecting to MongoDB")?;
            tracing::info!(database = %db_name, "Connected to MongoDB");
            Arc::new(PodcastSummaryCrud::new(&db))
        }
    };

    let state = AppState::new(store, Arc::new(generator));

    let addr = settings.addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("Starting server on {addr}");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
