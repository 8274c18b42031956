mod analysis;
mod config;
mod errors;
mod evaluation;
mod extraction;
mod llm_client;
mod routes;
mod search;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, ScorerBackend};
use crate::evaluation::keyword::KeywordCvScorer;
use crate::evaluation::scorer::{CvScorer, Evaluator, LlmCvScorer};
use crate::llm_client::{ChatModel, LlmClient};
use crate::routes::build_router;
use crate::search::{JobSearch, SerpApiClient};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruiter API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm: Arc<dyn ChatModel> = Arc::new(
        LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)
            .context("Failed to build LLM client")?,
    );
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize CV scorer (LlmCvScorer by default; swap via SCORER_BACKEND)
    let scorer: Arc<dyn CvScorer> = match config.scorer_backend {
        ScorerBackend::Llm => Arc::new(LlmCvScorer::new(llm.clone())),
        ScorerBackend::Keyword => Arc::new(KeywordCvScorer),
    };
    let evaluator = Evaluator::new(scorer);
    info!("CV scorer initialized (backend: {})", evaluator.backend());

    // Initialize job search, if configured
    let job_search: Option<Arc<dyn JobSearch>> = match &config.serp_api_key {
        Some(key) => {
            let client =
                SerpApiClient::new(key.clone()).context("Failed to build job search client")?;
            info!("Job search client initialized");
            Some(Arc::new(client))
        }
        None => {
            warn!("SERP_API_KEY is not set; job search endpoints are disabled");
            None
        }
    };

    // Build app state
    let state = AppState {
        evaluator,
        llm,
        job_search,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the browser client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
