//! Axum route handlers for the Job Search API.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::search::{JobPosting, JobSearch, JobSearchRequest};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ApplyLinkResponse {
    pub job_id: String,
    pub apply_link: Option<String>,
}

fn job_search(state: &AppState) -> Result<Arc<dyn JobSearch>, AppError> {
    state.job_search.clone().ok_or_else(|| {
        AppError::Unavailable("Job search is not configured (SERP_API_KEY is unset)".to_string())
    })
}

/// POST /search-jobs
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    Json(request): Json<JobSearchRequest>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    request.validate()?;
    let jobs = job_search(&state)?.search_jobs(&request).await?;
    Ok(Json(jobs))
}

/// GET /jobs/:job_id/apply-link
pub async fn handle_apply_link(
    State(state): State<AppState>,
    Path(job_id): Path<String>,
) -> Result<Json<ApplyLinkResponse>, AppError> {
    let apply_link = job_search(&state)?.apply_link(&job_id).await?;
    Ok(Json(ApplyLinkResponse { job_id, apply_link }))
}
