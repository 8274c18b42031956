//! Axum route handler for the Evaluation API.

use axum::{extract::State, Json};
use tracing::info;

use crate::errors::AppError;
use crate::evaluation::contract::{EvaluationRequest, EvaluationResult};
use crate::state::AppState;

/// POST /evaluate-cv
///
/// Scores a CV against a job description. The result is validated against the
/// evaluation contract before it is returned; nothing partial is ever sent back.
pub async fn handle_evaluate_cv(
    State(state): State<AppState>,
    Json(request): Json<EvaluationRequest>,
) -> Result<Json<EvaluationResult>, AppError> {
    let result = state.evaluator.evaluate(&request).await?;

    info!(
        backend = state.evaluator.backend(),
        overall_score = result.overall_score,
        "evaluate-cv completed"
    );

    Ok(Json(result))
}
