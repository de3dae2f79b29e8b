/// Remote catalog abstraction
///
/// The recommendation service is consumed through a fixed HTTP contract; this
/// trait keeps the session controller testable against a mock while the
/// reqwest implementation lives in [`http`].
use crate::{
    error::ClientResult,
    models::{Movie, RecommendationResult},
};

pub mod http;

pub use http::HttpCatalogClient;

/// Typed operations over the catalog service
///
/// Implementations hold no request state: no caching, no retries, a single
/// attempt per invocation. Whether a failed call is retried is the session
/// controller's call, via the user re-triggering the action.
#[async_trait::async_trait]
pub trait CatalogClient: Send + Sync {
    /// Search the catalog by title. `query` must be non-empty.
    async fn search_titles(&self, query: &str) -> ClientResult<Vec<Movie>>;

    /// Fetch recommendations seeded by a single title.
    async fn fetch_recommendations(&self, source_title: &str)
        -> ClientResult<RecommendationResult>;

    /// Fetch recommendations seeded by every title in the group, sent as one
    /// batched request.
    async fn fetch_group_recommendations(
        &self,
        source_titles: &[String],
    ) -> ClientResult<RecommendationResult>;
}
