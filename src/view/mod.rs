//! View projection
//!
//! Pure mapping from the composite session state to visible/hidden regions
//! with display-ready content. Nothing here initiates I/O or holds state.

use crate::models::{Movie, RecommendationSource};
use crate::session::{Mode, SelectionSet, SessionState};

/// Overviews longer than this render truncated with an ellipsis marker.
pub const OVERVIEW_LIMIT: usize = 120;

/// The group-mode search dropdown shows at most this many candidates.
pub const GROUP_RESULT_CAP: usize = 5;

/// Card footprint; keys the placeholder poster size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardSize {
    /// Full result card.
    Large,
    /// Side-by-side card for selected/source movies.
    Compact,
    /// Dropdown list row.
    Row,
}

impl CardSize {
    /// Placeholder poster for movies without one.
    pub fn placeholder_url(self) -> &'static str {
        match self {
            CardSize::Large => "https://via.placeholder.com/300x450?text=No+Poster",
            CardSize::Compact => "https://via.placeholder.com/100x150?text=No+Poster",
            CardSize::Row => "https://via.placeholder.com/50x75?text=No+Poster",
        }
    }
}

/// Display-ready movie card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieCard {
    pub id: i64,
    pub title: String,
    pub poster_url: String,
    /// Rating to one decimal place, or "N/A".
    pub rating: String,
    /// 4-digit release year when one can be extracted.
    pub year: Option<String>,
    pub genres: String,
    pub overview: String,
}

impl MovieCard {
    pub fn from_movie(movie: &Movie, size: CardSize) -> Self {
        let poster_url = movie
            .poster_url
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| size.placeholder_url())
            .to_string();

        Self {
            id: movie.id,
            title: movie.title.clone(),
            poster_url,
            rating: format_rating(movie.vote_average),
            year: movie
                .release_date
                .as_deref()
                .and_then(release_year)
                .map(str::to_string),
            genres: movie
                .genres
                .as_ref()
                .map(|g| g.joined())
                .unwrap_or_else(|| "Unknown".to_string()),
            overview: truncate_overview(
                movie.overview.as_deref().unwrap_or("No description available."),
            ),
        }
    }
}

/// A region's projection: hidden, or visible with content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Region<T> {
    Hidden,
    Visible(T),
}

impl<T> Region<T> {
    pub fn is_visible(&self) -> bool {
        matches!(self, Region::Visible(_))
    }

    pub fn content(&self) -> Option<&T> {
        match self {
            Region::Visible(content) => Some(content),
            Region::Hidden => None,
        }
    }
}

/// Everything the page needs to render, derived from state alone.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewModel {
    pub loading: bool,
    pub error: Region<String>,
    pub search_results: Region<Vec<MovieCard>>,
    pub selected_movie: Region<MovieCard>,
    pub selected_group: Region<Vec<MovieCard>>,
    pub source_movies: Region<Vec<MovieCard>>,
    pub recommendations: Region<Vec<MovieCard>>,
    pub empty_state: bool,
    pub group_request_enabled: bool,
}

/// "7.8", or "N/A" when no rating is present.
pub fn format_rating(vote_average: Option<f64>) -> String {
    match vote_average {
        Some(value) => format!("{:.1}", value),
        None => "N/A".to_string(),
    }
}

/// Leading 4-digit year of a release date ("2010-07-16" -> "2010").
pub fn release_year(release_date: &str) -> Option<&str> {
    let leading = release_date.split('-').next().unwrap_or("");
    if leading.len() == 4 && leading.bytes().all(|b| b.is_ascii_digit()) {
        Some(leading)
    } else {
        None
    }
}

/// First 120 characters plus an ellipsis marker for longer overviews.
pub fn truncate_overview(overview: &str) -> String {
    if overview.chars().count() > OVERVIEW_LIMIT {
        let cut: String = overview.chars().take(OVERVIEW_LIMIT).collect();
        format!("{}...", cut)
    } else {
        overview.to_string()
    }
}

/// Project the composite state onto the page's regions.
pub fn project(mode: Mode, state: &SessionState, selection: &SelectionSet) -> ViewModel {
    let search_results = if state.search_visible {
        let cards: Vec<MovieCard> = match mode {
            Mode::Single => state
                .search_results
                .iter()
                .map(|m| MovieCard::from_movie(m, CardSize::Large))
                .collect(),
            Mode::Group => state
                .search_results
                .iter()
                .take(GROUP_RESULT_CAP)
                .map(|m| MovieCard::from_movie(m, CardSize::Row))
                .collect(),
        };
        if cards.is_empty() {
            Region::Hidden
        } else {
            Region::Visible(cards)
        }
    } else {
        Region::Hidden
    };

    let selected_movie = match (mode, &state.selected) {
        (Mode::Single, Some(movie)) => {
            Region::Visible(MovieCard::from_movie(movie, CardSize::Compact))
        }
        _ => Region::Hidden,
    };

    let selected_group = if mode == Mode::Group && !selection.is_empty() {
        Region::Visible(
            selection
                .snapshot()
                .iter()
                .map(|m| MovieCard::from_movie(m, CardSize::Compact))
                .collect(),
        )
    } else {
        Region::Hidden
    };

    let (source_movies, recommendations) = match &state.recommendations {
        Some(result) => {
            let sources = match &result.source {
                RecommendationSource::Single(movie) => {
                    vec![MovieCard::from_movie(movie, CardSize::Compact)]
                }
                RecommendationSource::Group(movies) => movies
                    .iter()
                    .map(|m| MovieCard::from_movie(m, CardSize::Compact))
                    .collect(),
            };
            let cards: Vec<MovieCard> = result
                .recommendations
                .iter()
                .map(|m| MovieCard::from_movie(m, CardSize::Large))
                .collect();
            let recommendations = if cards.is_empty() {
                Region::Hidden
            } else {
                Region::Visible(cards)
            };
            (Region::Visible(sources), recommendations)
        }
        None => (Region::Hidden, Region::Hidden),
    };

    ViewModel {
        loading: state.loading,
        error: match &state.error {
            Some(message) => Region::Visible(message.clone()),
            None => Region::Hidden,
        },
        search_results,
        selected_movie,
        selected_group,
        source_movies,
        recommendations,
        empty_state: state.empty_result,
        group_request_enabled: !selection.is_empty(),
    }
}
