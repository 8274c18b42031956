pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::evaluation::handlers as evaluation;
use crate::extraction::handlers as extraction;
use crate::search::handlers as search;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Evaluation contract
        .route("/evaluate-cv", post(evaluation::handle_evaluate_cv))
        // Summaries and skills
        .route("/summarize-job", post(analysis::handle_summarize_job))
        .route("/summarize-cv", post(analysis::handle_summarize_cv))
        .route("/extract-skills", post(analysis::handle_extract_skills))
        // Job search passthrough
        .route("/search-jobs", post(search::handle_search_jobs))
        .route("/jobs/:job_id/apply-link", get(search::handle_apply_link))
        // Document uploads
        .route(
            "/extract-text",
            post(extraction::handle_extract_text)
                .layer(DefaultBodyLimit::max(extraction::MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::evaluation::scorer::{Evaluator, LlmCvScorer};
    use crate::llm_client::testing::StubModel;
    use crate::search::{JobPosting, JobSearch, JobSearchRequest, SearchError};

    struct FakeSearch;

    #[async_trait]
    impl JobSearch for FakeSearch {
        async fn search_jobs(
            &self,
            request: &JobSearchRequest,
        ) -> Result<Vec<JobPosting>, SearchError> {
            request.validate()?;
            Ok(vec![JobPosting {
                title: request.query.clone(),
                location: request.location.clone(),
                job_id: "job-1".to_string(),
                ..Default::default()
            }])
        }

        async fn apply_link(&self, job_id: &str) -> Result<Option<String>, SearchError> {
            Ok(Some(format!("https://jobs.test/{job_id}")))
        }
    }

    fn evaluation_output() -> Value {
        json!({
            "score_skills": 35,
            "score_experience": 25,
            "score_qualifications": 50,
            "score_cultural_fit": 60,
            "overall_score": 38,
            "feedback": "Missing Django and AWS.",
            "matching_skills": ["Python"],
            "missing_skills": ["Django", "AWS"]
        })
    }

    fn app_with(model: Arc<StubModel>, job_search: Option<Arc<dyn JobSearch>>) -> Router {
        build_router(AppState {
            evaluator: Evaluator::new(Arc::new(LlmCvScorer::new(model.clone()))),
            llm: model,
            job_search,
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(StubModel::replying(json!({}))), None);
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn test_evaluate_cv_returns_validated_result() {
        let app = app_with(Arc::new(StubModel::replying(evaluation_output())), None);
        let (status, body) = send(
            app,
            post_json(
                "/evaluate-cv",
                json!({
                    "job_description": "Senior Python Engineer, 5+ years, Django, AWS",
                    "cv": "2 years Python, no cloud experience"
                }),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["overall_score"], 38.0);
        assert_eq!(body["missing_skills"], json!(["Django", "AWS"]));
    }

    #[tokio::test]
    async fn test_evaluate_cv_empty_job_description_is_400() {
        let model = Arc::new(StubModel::replying(evaluation_output()));
        let app = app_with(model.clone(), None);
        let (status, body) = send(
            app,
            post_json("/evaluate-cv", json!({"job_description": "", "cv": "some text"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "INVALID_INPUT");
        assert_eq!(model.calls(), 0);
    }

    #[tokio::test]
    async fn test_evaluate_cv_missing_field_in_body_is_400() {
        let app = app_with(Arc::new(StubModel::replying(evaluation_output())), None);
        let (status, body) = send(app, post_json("/evaluate-cv", json!({"cv": "text"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("job_description"));
    }

    #[tokio::test]
    async fn test_evaluate_cv_schema_violation_is_502() {
        let mut output = evaluation_output();
        output.as_object_mut().unwrap().remove("overall_score");
        let app = app_with(Arc::new(StubModel::replying(output)), None);

        let (status, body) = send(
            app,
            post_json("/evaluate-cv", json!({"job_description": "Rust", "cv": "Rust"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "SCHEMA_VIOLATION");
    }

    #[tokio::test]
    async fn test_evaluate_cv_upstream_failure_is_502() {
        let app = app_with(Arc::new(StubModel::failing("connection refused")), None);
        let (status, body) = send(
            app,
            post_json("/evaluate-cv", json!({"job_description": "Rust", "cv": "Rust"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"]["code"], "UPSTREAM_FAILURE");
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("connection refused"));
    }

    #[tokio::test]
    async fn test_extract_skills_route() {
        let app = app_with(
            Arc::new(StubModel::replying(json!({"skills": ["Python", "Flask"]}))),
            None,
        );
        let (status, body) =
            send(app, post_json("/extract-skills", json!({"cv": "Python dev"}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"skills": ["Python", "Flask"]}));
    }

    #[tokio::test]
    async fn test_summarize_job_route_wraps_summary() {
        let app = app_with(
            Arc::new(StubModel::replying(json!({"title": "Data Engineer"}))),
            None,
        );
        let (status, body) = send(
            app,
            post_json("/summarize-job", json!({"description": "Data Engineer, Spark"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["summary"]["title"], "Data Engineer");
    }

    #[tokio::test]
    async fn test_search_without_key_is_503() {
        let app = app_with(Arc::new(StubModel::replying(json!({}))), None);
        let (status, body) = send(
            app,
            post_json("/search-jobs", json!({"query": "Python Developer", "location": "London"})),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "UNAVAILABLE");
    }

    #[tokio::test]
    async fn test_search_jobs_passthrough() {
        let app = app_with(
            Arc::new(StubModel::replying(json!({}))),
            Some(Arc::new(FakeSearch)),
        );
        let (status, body) = send(
            app,
            post_json("/search-jobs", json!({"query": "Python Developer", "location": "London"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["title"], "Python Developer");
        assert_eq!(body[0]["job_id"], "job-1");
        assert_eq!(body[0]["company_name"], "");
    }

    #[tokio::test]
    async fn test_search_jobs_blank_location_is_400() {
        let app = app_with(
            Arc::new(StubModel::replying(json!({}))),
            Some(Arc::new(FakeSearch)),
        );
        let (status, _) = send(
            app,
            post_json("/search-jobs", json!({"query": "Python Developer", "location": " "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_apply_link_route() {
        let app = app_with(
            Arc::new(StubModel::replying(json!({}))),
            Some(Arc::new(FakeSearch)),
        );
        let request = Request::builder()
            .uri("/jobs/job-1/apply-link")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["apply_link"], "https://jobs.test/job-1");
    }

    #[tokio::test]
    async fn test_extract_text_from_plain_text_upload() {
        let app = app_with(Arc::new(StubModel::replying(json!({}))), None);
        let boundary = "recruiter-boundary";
        let body = format!(
            "--{boundary}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"cv.txt\"\r\n\
             Content-Type: text/plain\r\n\r\n\
             5 years of Rust\r\n\
             --{boundary}--\r\n"
        );
        let request = Request::builder()
            .method("POST")
            .uri("/extract-text")
            .header(
                "content-type",
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap();

        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["file_name"], "cv.txt");
        assert_eq!(body["text"], "5 years of Rust");
    }
}
