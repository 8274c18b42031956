//! Job search passthrough.
//!
//! `JobSearch` is the capability handle injected into `AppState`; `SerpApiClient`
//! backs it with the SerpAPI Google Jobs engines. Results are passed through
//! without a validation contract beyond their field shape.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub mod handlers;

const SERPAPI_URL: &str = "https://serpapi.com/search.json";
const REQUEST_TIMEOUT_SECS: u64 = 30;
/// Every search is restricted to postings from the last week.
const BASE_CHIPS: &str = "date_posted:week";

#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub location: String,
    /// Extra Google Jobs chips, e.g. "employment_type:FULLTIME".
    #[serde(default)]
    pub chips_filters: Option<String>,
}

impl JobSearchRequest {
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.query.trim().is_empty() {
            return Err(SearchError::InvalidInput("query cannot be empty".to_string()));
        }
        if self.location.trim().is_empty() {
            return Err(SearchError::InvalidInput(
                "location cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn chips(&self) -> String {
        match self.chips_filters.as_deref().map(str::trim) {
            Some(extra) if !extra.is_empty() => format!("{BASE_CHIPS}, {extra}"),
            _ => BASE_CHIPS.to_string(),
        }
    }
}

/// A single posting as returned by the provider. Missing fields default to empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobPosting {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub job_id: String,
}

#[async_trait]
pub trait JobSearch: Send + Sync {
    async fn search_jobs(
        &self,
        request: &JobSearchRequest,
    ) -> Result<Vec<JobPosting>, SearchError>;

    /// First apply link listed for a posting, if the provider has one.
    async fn apply_link(&self, job_id: &str) -> Result<Option<String>, SearchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    jobs_results: Vec<JobPosting>,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    apply_options: Vec<ApplyOption>,
}

#[derive(Debug, Deserialize)]
struct ApplyOption {
    link: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: String,
}

#[derive(Clone)]
pub struct SerpApiClient {
    client: Client,
    api_key: String,
    endpoint: String,
}

impl SerpApiClient {
    pub fn new(api_key: String) -> Result<Self, SearchError> {
        Self::with_endpoint(api_key, SERPAPI_URL)
    }

    pub fn with_endpoint(api_key: String, endpoint: &str) -> Result<Self, SearchError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
            endpoint: endpoint.to_string(),
        })
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        params: &[(&str, String)],
    ) -> Result<T, SearchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(params)
            .query(&[("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(SearchError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

fn search_params(request: &JobSearchRequest) -> Vec<(&'static str, String)> {
    vec![
        ("engine", "google_jobs".to_string()),
        ("q", request.query.trim().to_string()),
        ("location", request.location.trim().to_string()),
        ("hl", "en".to_string()),
        ("chips", request.chips()),
        ("sort_by", "date".to_string()),
    ]
}

#[async_trait]
impl JobSearch for SerpApiClient {
    async fn search_jobs(
        &self,
        request: &JobSearchRequest,
    ) -> Result<Vec<JobPosting>, SearchError> {
        request.validate()?;

        let response: SearchResponse = self.get(&search_params(request)).await?;
        debug!(
            query = %request.query,
            results = response.jobs_results.len(),
            "job search completed"
        );
        Ok(response.jobs_results)
    }

    async fn apply_link(&self, job_id: &str) -> Result<Option<String>, SearchError> {
        if job_id.trim().is_empty() {
            return Err(SearchError::InvalidInput("job_id cannot be empty".to_string()));
        }

        let params = [
            ("engine", "google_jobs_listing".to_string()),
            ("q", job_id.to_string()),
        ];
        let response: ListingResponse = self.get(&params).await?;

        Ok(response
            .apply_options
            .into_iter()
            .next()
            .and_then(|o| o.link)
            .filter(|l| !l.is_empty()))
    }
}
