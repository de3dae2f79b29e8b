mod movie;

pub use movie::{Genres, Movie};

use serde::{Deserialize, Serialize};

/// Success body of `GET /api/movies/search`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Movie>,
}

/// Success body of `GET /api/recommend`
#[derive(Debug, Deserialize)]
pub struct RecommendResponse {
    pub source_movie: Movie,
    pub recommendations: Vec<Movie>,
}

/// Success body of `POST /api/group_recommend`
#[derive(Debug, Deserialize)]
pub struct GroupRecommendResponse {
    pub source_movies: Vec<Movie>,
    pub recommendations: Vec<Movie>,
}

/// Request body of `POST /api/group_recommend`
#[derive(Debug, Serialize)]
pub struct GroupRecommendRequest {
    pub titles: Vec<String>,
}

/// Error body the server attaches to non-2xx responses
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
}

/// The seed(s) a recommendation list was computed from
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationSource {
    Single(Movie),
    Group(Vec<Movie>),
}

/// One completed recommendation fetch. Replaces any previous result
/// wholesale; results are never merged.
#[derive(Debug, Clone, PartialEq)]
pub struct RecommendationResult {
    pub source: RecommendationSource,
    pub recommendations: Vec<Movie>,
}
