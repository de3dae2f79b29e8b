//! Session orchestration
//!
//! Wires user events to the debouncer, the selection set, and the catalog
//! client, and owns the single source of truth for what the page currently
//! shows. State transitions live here; rendering is projected separately by
//! [`crate::view`], so the state machine is testable without markup.

mod debounce;
mod selection;

pub use debounce::{InputOutcome, QueryDebouncer, SearchTrigger, MIN_QUERY_LEN};
pub use selection::{AddResult, RemoveResult, SelectionSet};

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::{
    catalog::CatalogClient,
    error::{ClientResult, Operation, EMPTY_GROUP_SELECTION, NO_GROUP_MATCHES},
    models::{Movie, RecommendationResult},
    view::{self, ViewModel},
};

/// Which page the session drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// One seed movie, picked from the search results.
    Single,
    /// An accumulated set of seed movies.
    Group,
}

/// Composite display state
///
/// Derived regions are projected from this by the view module; nothing here
/// is authoritative beyond the last completed or failed operation.
#[derive(Debug, Default, Clone)]
pub struct SessionState {
    pub search_results: Vec<Movie>,
    pub search_visible: bool,
    pub selected: Option<Movie>,
    pub recommendations: Option<RecommendationResult>,
    pub loading: bool,
    pub error: Option<String>,
    /// Set when a single-mode fetch succeeded with zero entries.
    pub empty_result: bool,
}

/// Outcome of one search call, paired with the token it was issued under.
/// Opaque outside this module; only [`SessionController::complete_search`]
/// can apply it.
#[derive(Debug)]
pub struct SearchOutcome {
    token: u64,
    query: String,
    result: ClientResult<Vec<Movie>>,
}

/// Top-level orchestrator for one search-and-selection session.
pub struct SessionController<C: CatalogClient> {
    catalog: Arc<C>,
    debouncer: QueryDebouncer,
    selection: SelectionSet,
    mode: Mode,
    state: SessionState,
}

impl<C: CatalogClient + 'static> SessionController<C> {
    pub fn new(catalog: Arc<C>, mode: Mode, quiet_period: Duration) -> Self {
        Self {
            catalog,
            debouncer: QueryDebouncer::new(quiet_period),
            selection: SelectionSet::new(),
            mode,
            state: SessionState::default(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    /// Current composite state projected onto visible regions.
    pub fn view(&self) -> ViewModel {
        view::project(self.mode, &self.state, &self.selection)
    }

    /// One keystroke from the search input. Short queries cancel any pending
    /// timer and hide the results region without touching the network.
    pub fn handle_input(&mut self, raw: &str) {
        match self.debouncer.on_input(raw) {
            InputOutcome::Cleared => {
                self.state.search_visible = false;
                self.state.search_results.clear();
            }
            InputOutcome::Scheduled => {}
        }
    }

    /// Enter key or search button: fires immediately for a non-empty query.
    pub fn submit_search(&mut self, raw: &str) -> bool {
        self.debouncer.submit_now(raw)
    }

    /// Await the next fired search trigger.
    pub async fn next_trigger(&mut self) -> Option<SearchTrigger> {
        self.debouncer.next_trigger().await
    }

    /// Non-blocking variant of [`Self::next_trigger`].
    pub fn try_trigger(&mut self) -> Option<SearchTrigger> {
        self.debouncer.try_trigger()
    }

    /// Issue the search for a fired trigger. The returned future borrows
    /// nothing from `self`, so a newer search may be issued while an older
    /// one is still in flight; [`Self::complete_search`] sorts out which one
    /// gets displayed.
    pub fn begin_search(
        &self,
        trigger: SearchTrigger,
    ) -> impl Future<Output = SearchOutcome> + 'static {
        let catalog = Arc::clone(&self.catalog);
        async move {
            let result = catalog.search_titles(&trigger.query).await;
            SearchOutcome {
                token: trigger.token,
                query: trigger.query,
                result,
            }
        }
    }

    /// Apply a completed search. Outcomes from superseded searches are
    /// dropped without touching the display; a stale response is not an
    /// error.
    pub fn complete_search(&mut self, outcome: SearchOutcome) {
        if !self.debouncer.is_current(outcome.token) {
            tracing::debug!(
                token = outcome.token,
                current = self.debouncer.current_token(),
                query = %outcome.query,
                "discarding stale search response"
            );
            return;
        }

        match outcome.result {
            Ok(movies) => {
                let movies = match self.mode {
                    Mode::Single => movies,
                    Mode::Group => self.selection.filter_candidates(&movies),
                };
                self.state.search_visible = !movies.is_empty();
                self.state.search_results = movies;
            }
            Err(err) => {
                self.state.search_visible = false;
                self.state.search_results.clear();
                match self.mode {
                    Mode::Single => {
                        self.state.error = Some(err.user_message(Operation::Search));
                    }
                    // The add-movie dropdown swallows search failures; only
                    // the main flows raise the error region.
                    Mode::Group => {
                        tracing::warn!(query = %outcome.query, error = %err, "group search failed");
                    }
                }
            }
        }
    }

    /// Convenience: run one fired trigger start to finish.
    pub async fn run_search(&mut self, trigger: SearchTrigger) {
        let outcome = self.begin_search(trigger).await;
        self.complete_search(outcome);
    }

    /// User picked one search result (single mode). Terminal for the search:
    /// the results region hides and nothing fires until the user explicitly
    /// requests recommendations.
    pub fn select_movie(&mut self, movie: Movie) {
        self.debouncer.cancel_pending();
        self.state.search_visible = false;
        self.state.search_results.clear();
        self.state.selected = Some(movie);
    }

    /// URL of the recommendations page for the selected movie. Navigation
    /// itself belongs to the hosting page, not this controller.
    pub fn recommendations_page_url(&self) -> Option<String> {
        self.state.selected.as_ref().map(|movie| {
            let encoded: String =
                url::form_urlencoded::byte_serialize(movie.title.as_bytes()).collect();
            format!("/recommendations?title={}", encoded)
        })
    }

    /// Fetch recommendations for the currently selected movie.
    pub async fn request_recommendations(&mut self) {
        let Some(title) = self.state.selected.as_ref().map(|m| m.title.clone()) else {
            self.state.error = Some("Please select a movie first.".to_string());
            return;
        };
        self.load_recommendations(&title).await;
    }

    /// Fetch recommendations for an explicit seed title (the entry path of
    /// the recommendations page, where the title arrives via the URL).
    pub async fn load_recommendations(&mut self, source_title: &str) {
        self.state.error = None;
        self.state.loading = true;
        let result = self.catalog.fetch_recommendations(source_title).await;
        self.state.loading = false;

        self.apply_recommendations(result, Operation::Recommend);
    }

    /// Add a movie to the group selection. Also resets the add-movie search
    /// box: pending timer cancelled, dropdown hidden.
    pub fn add_to_group(&mut self, movie: Movie) -> AddResult {
        let result = self.selection.add(movie);
        self.debouncer.cancel_pending();
        self.state.search_visible = false;
        self.state.search_results.clear();
        result
    }

    pub fn remove_from_group(&mut self, movie_id: i64) -> RemoveResult {
        self.selection.remove(movie_id)
    }

    /// The group "get recommendations" action is enabled only for a
    /// non-empty selection.
    pub fn group_request_enabled(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Fetch recommendations seeded by the whole selection. An empty
    /// selection short-circuits with a validation message and never reaches
    /// the network.
    pub async fn request_group_recommendations(&mut self) {
        if self.selection.is_empty() {
            self.state.error = Some(EMPTY_GROUP_SELECTION.to_string());
            return;
        }

        let titles = self.selection.titles();
        self.state.error = None;
        self.state.loading = true;
        let result = self.catalog.fetch_group_recommendations(&titles).await;
        self.state.loading = false;

        self.apply_recommendations(result, Operation::GroupRecommend);
    }

    fn apply_recommendations(
        &mut self,
        result: ClientResult<RecommendationResult>,
        operation: Operation,
    ) {
        match result {
            Ok(outcome) => {
                let empty = outcome.recommendations.is_empty();
                self.state.recommendations = Some(outcome);
                match operation {
                    Operation::GroupRecommend if empty => {
                        self.state.error = Some(NO_GROUP_MATCHES.to_string());
                    }
                    _ => self.state.empty_result = empty,
                }
            }
            Err(err) => {
                self.state.error = Some(err.user_message(operation));
            }
        }
    }
}
