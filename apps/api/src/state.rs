use std::sync::Arc;

use crate::evaluation::scorer::Evaluator;
use crate::llm_client::ChatModel;
use crate::search::JobSearch;

/// Shared application state injected into all route handlers via Axum extractors.
/// Every handle is built once in `main` and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    /// CV/job evaluation, backed by the scorer selected via SCORER_BACKEND.
    pub evaluator: Evaluator,
    /// Chat model used for summaries and skill extraction.
    pub llm: Arc<dyn ChatModel>,
    /// None when SERP_API_KEY is unset; search routes then answer 503.
    pub job_search: Option<Arc<dyn JobSearch>>,
}
