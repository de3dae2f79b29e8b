/// HTTP catalog client
///
/// Thin reqwest wrapper over the three service endpoints. Transport failures
/// surface as `ClientError::Transport`; non-2xx responses are decoded into
/// `ClientError::Application` carrying the server's message when present.
use crate::{
    catalog::CatalogClient,
    config::Config,
    error::{ClientError, ClientResult, Operation},
    models::{
        GroupRecommendRequest, GroupRecommendResponse, Movie, RecommendResponse,
        RecommendationResult, RecommendationSource, SearchResponse,
    },
};
use reqwest::Client as HttpClient;
use std::time::Duration;

const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Clone)]
pub struct HttpCatalogClient {
    http_client: HttpClient,
    base_url: String,
}

impl HttpCatalogClient {
    pub fn new(base_url: impl Into<String>) -> ClientResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    pub fn with_timeout(base_url: impl Into<String>, timeout: Duration) -> ClientResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> ClientResult<Self> {
        Self::with_timeout(
            config.api_base_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Convert a non-2xx response into an Application error.
    async fn application_error(response: reqwest::Response, operation: Operation) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = error_message_from_body(&body, operation);

        tracing::warn!(
            status = %status,
            operation = ?operation,
            "catalog request rejected"
        );

        ClientError::Application(message)
    }
}

/// Pull the server's `{error}` message out of a failure body, falling back to
/// the operation's default when the body is absent or malformed.
fn error_message_from_body(body: &str, operation: Operation) -> String {
    serde_json::from_str::<crate::models::ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .unwrap_or_else(|| operation.default_message().to_string())
}

#[async_trait::async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn search_titles(&self, query: &str) -> ClientResult<Vec<Movie>> {
        if query.trim().is_empty() {
            return Err(ClientError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }

        let url = format!("{}/api/movies/search", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("q", query)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::application_error(response, Operation::Search).await);
        }

        let body: SearchResponse = response.json().await?;

        tracing::info!(
            query = %query,
            results = body.results.len(),
            "title search completed"
        );

        Ok(body.results)
    }

    async fn fetch_recommendations(
        &self,
        source_title: &str,
    ) -> ClientResult<RecommendationResult> {
        let url = format!("{}/api/recommend", self.base_url);
        let response = self
            .http_client
            .get(&url)
            .query(&[("title", source_title)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(Self::application_error(response, Operation::Recommend).await);
        }

        let body: RecommendResponse = response.json().await?;

        tracing::info!(
            title = %source_title,
            recommendations = body.recommendations.len(),
            "recommendations fetched"
        );

        Ok(RecommendationResult {
            source: RecommendationSource::Single(body.source_movie),
            recommendations: body.recommendations,
        })
    }

    async fn fetch_group_recommendations(
        &self,
        source_titles: &[String],
    ) -> ClientResult<RecommendationResult> {
        let url = format!("{}/api/group_recommend", self.base_url);
        let request = GroupRecommendRequest {
            titles: source_titles.to_vec(),
        };
        let response = self.http_client.post(&url).json(&request).send().await?;

        if !response.status().is_success() {
            return Err(Self::application_error(response, Operation::GroupRecommend).await);
        }

        let body: GroupRecommendResponse = response.json().await?;

        tracing::info!(
            seeds = source_titles.len(),
            recommendations = body.recommendations.len(),
            "group recommendations fetched"
        );

        Ok(RecommendationResult {
            source: RecommendationSource::Group(body.source_movies),
            recommendations: body.recommendations,
        })
    }
}
