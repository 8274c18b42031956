//! Evaluation: pluggable, trait-based scorer behind a strict validation step.
//!
//! Backends: `LlmCvScorer` (default, delegates to the chat model) and
//! `KeywordCvScorer` (pure-Rust, deterministic, no network).
//!
//! `AppState` holds an `Evaluator` wrapping an `Arc<dyn CvScorer>`, chosen at
//! startup via `SCORER_BACKEND`.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::evaluation::contract::{EvaluationError, EvaluationRequest, EvaluationResult};
use crate::evaluation::prompts::{build_evaluation_prompt, evaluation_system};
use crate::llm_client::ChatModel;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The delegated scoring mechanism. Implement this to swap backends without
/// touching the endpoint, handler, or caller code.
///
/// Output is raw JSON and is never trusted: `Evaluator` validates it.
#[async_trait]
pub trait CvScorer: Send + Sync {
    async fn score(&self, request: &EvaluationRequest) -> Result<Value, EvaluationError>;

    /// Short label for logs ("llm" | "keyword").
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// LlmCvScorer
// ────────────────────────────────────────────────────────────────────────────

/// Semantic scorer via the chat model.
pub struct LlmCvScorer {
    model: Arc<dyn ChatModel>,
}

impl LlmCvScorer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }
}

#[async_trait]
impl CvScorer for LlmCvScorer {
    async fn score(&self, request: &EvaluationRequest) -> Result<Value, EvaluationError> {
        let prompt = build_evaluation_prompt(&request.job_description, &request.cv);
        self.model
            .chat_json(&evaluation_system(), &prompt)
            .await
            .map_err(|e| EvaluationError::UpstreamFailure(format!("CV evaluation failed: {e}")))
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Evaluator
// ────────────────────────────────────────────────────────────────────────────

/// Single-shot `EvaluationRequest -> EvaluationResult` transform.
/// Stateless apart from the injected scorer; no retries.
#[derive(Clone)]
pub struct Evaluator {
    scorer: Arc<dyn CvScorer>,
}

impl Evaluator {
    pub fn new(scorer: Arc<dyn CvScorer>) -> Self {
        Self { scorer }
    }

    pub fn backend(&self) -> &'static str {
        self.scorer.backend()
    }

    pub async fn evaluate(
        &self,
        request: &EvaluationRequest,
    ) -> Result<EvaluationResult, EvaluationError> {
        request.validate()?;

        let raw = self.scorer.score(request).await?;
        let result = EvaluationResult::from_untrusted(&raw)?;

        debug!(
            backend = self.scorer.backend(),
            overall_score = result.overall_score,
            missing = result.missing_skills.len(),
            "CV evaluated"
        );

        Ok(result)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm_client::testing::StubModel;
    use serde_json::json;

    fn model_output() -> Value {
        json!({
            "score_skills": 35,
            "score_experience": 25,
            "score_qualifications": 50,
            "score_cultural_fit": 60,
            "overall_score": 38,
            "feedback": "Python basics are there, but Django and AWS are missing.",
            "matching_skills": ["Python"],
            "missing_skills": ["Django", "AWS", "5+ years experience"]
        })
    }

    fn evaluator_with(model: Arc<StubModel>) -> Evaluator {
        Evaluator::new(Arc::new(LlmCvScorer::new(model)))
    }

    #[tokio::test]
    async fn test_valid_model_output_becomes_result() {
        let model = Arc::new(StubModel::replying(model_output()));
        let evaluator = evaluator_with(model.clone());

        let request = EvaluationRequest::new(
            "Senior Python Engineer, 5+ years, Django, AWS",
            "2 years Python, no cloud experience",
        );
        let result = evaluator.evaluate(&request).await.unwrap();

        assert_eq!(result.overall_score, 38.0);
        assert!(result.overall_score < 100.0);
        assert!(!result.missing_skills.is_empty());
        for score in [
            result.score_skills,
            result.score_experience,
            result.score_qualifications,
            result.score_cultural_fit,
            result.overall_score,
        ] {
            assert!((0.0..=100.0).contains(&score));
        }

        let sent = model.last_user_message().unwrap();
        assert!(sent.contains("Senior Python Engineer"));
        assert!(sent.contains("no cloud experience"));
    }

    #[tokio::test]
    async fn test_empty_input_never_reaches_scorer() {
        let model = Arc::new(StubModel::replying(model_output()));
        let evaluator = evaluator_with(model.clone());

        let err = evaluator
            .evaluate(&EvaluationRequest::new("", "some text"))
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidInput(_)));

        let err = evaluator
            .evaluate(&EvaluationRequest::new("Rust engineer", ""))
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::InvalidInput(_)));

        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_model_failure_is_upstream_failure() {
        let model = Arc::new(StubModel::failing("service unavailable"));
        let evaluator = evaluator_with(model.clone());

        let err = evaluator
            .evaluate(&EvaluationRequest::new("Rust engineer", "5 years Rust"))
            .await
            .unwrap_err();
        match err {
            EvaluationError::UpstreamFailure(msg) => assert!(msg.contains("service unavailable")),
            other => panic!("expected UpstreamFailure, got {other:?}"),
        }
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test]
    async fn test_missing_overall_score_is_schema_violation() {
        let mut output = model_output();
        output.as_object_mut().unwrap().remove("overall_score");
        let evaluator = evaluator_with(Arc::new(StubModel::replying(output)));

        let err = evaluator
            .evaluate(&EvaluationRequest::new("Rust engineer", "5 years Rust"))
            .await
            .unwrap_err();
        assert!(matches!(err, EvaluationError::SchemaViolation(ref m) if m.contains("overall_score")));
    }

    #[tokio::test]
    async fn test_out_of_ten_scale_is_accepted_as_is() {
        // The overall score is never rescaled or recomputed from the categories.
        let mut output = model_output();
        output["overall_score"] = json!(7);
        let evaluator = evaluator_with(Arc::new(StubModel::replying(output)));

        let result = evaluator
            .evaluate(&EvaluationRequest::new("Rust engineer", "5 years Rust"))
            .await
            .unwrap();
        assert_eq!(result.overall_score, 7.0);
        assert_eq!(result.score_skills, 35.0);
    }

    #[test]
    fn test_backend_label() {
        let evaluator = evaluator_with(Arc::new(StubModel::replying(json!({}))));
        assert_eq!(evaluator.backend(), "llm");
    }
}
