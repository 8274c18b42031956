//! Axum route handlers for summaries and skill extraction.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::{extract_top_skills, summarize_cv, summarize_job, SkillSet};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SummarizeJobRequest {
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Deserialize)]
pub struct CvTextRequest {
    #[serde(default)]
    pub cv: String,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: Value,
}

/// POST /summarize-job
pub async fn handle_summarize_job(
    State(state): State<AppState>,
    Json(request): Json<SummarizeJobRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = summarize_job(state.llm.as_ref(), &request.description).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// POST /summarize-cv
pub async fn handle_summarize_cv(
    State(state): State<AppState>,
    Json(request): Json<CvTextRequest>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = summarize_cv(state.llm.as_ref(), &request.cv).await?;
    Ok(Json(SummaryResponse { summary }))
}

/// POST /extract-skills
pub async fn handle_extract_skills(
    State(state): State<AppState>,
    Json(request): Json<CvTextRequest>,
) -> Result<Json<SkillSet>, AppError> {
    let skills = extract_top_skills(state.llm.as_ref(), &request.cv).await?;
    Ok(Json(skills))
}
