use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;

use cinematch_client::catalog::CatalogClient;
use cinematch_client::error::{ClientError, ClientResult};
use cinematch_client::models::{Movie, RecommendationResult, RecommendationSource};
use cinematch_client::session::{AddResult, Mode, SessionController};
use cinematch_client::view::Region;

mock! {
    Catalog {}

    #[async_trait]
    impl CatalogClient for Catalog {
        async fn search_titles(&self, query: &str) -> ClientResult<Vec<Movie>>;
        async fn fetch_recommendations(&self, source_title: &str)
            -> ClientResult<RecommendationResult>;
        async fn fetch_group_recommendations(&self, source_titles: &[String])
            -> ClientResult<RecommendationResult>;
    }
}

const DEBOUNCE: Duration = Duration::from_millis(300);

fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id,
        title: title.to_string(),
        poster_url: None,
        release_date: None,
        overview: None,
        vote_average: None,
        genres: None,
    }
}

fn controller(mock: MockCatalog, mode: Mode) -> SessionController<MockCatalog> {
    SessionController::new(Arc::new(mock), mode, DEBOUNCE)
}

fn single_result(source: Movie, recommendations: Vec<Movie>) -> RecommendationResult {
    RecommendationResult {
        source: RecommendationSource::Single(source),
        recommendations,
    }
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_renders_results() {
    let mut mock = MockCatalog::new();
    mock.expect_search_titles()
        .times(1)
        .returning(|_| Ok(vec![movie(1, "Inception"), movie(2, "Interstellar")]));

    let mut session = controller(mock, Mode::Single);
    session.handle_input("Inception");

    let trigger = session.next_trigger().await.unwrap();
    assert_eq!(trigger.query, "Inception");
    session.run_search(trigger).await;

    let view = session.view();
    let cards = view.search_results.content().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].title, "Inception");
}

#[tokio::test(start_paused = true)]
async fn test_short_input_issues_no_call_and_hides_results() {
    // No expectations: any search call would panic.
    let mock = MockCatalog::new();

    let mut session = controller(mock, Mode::Single);
    session.handle_input("a");

    tokio::time::advance(Duration::from_secs(2)).await;
    tokio::task::yield_now().await;

    assert_eq!(session.try_trigger(), None);
    assert!(!session.view().search_results.is_visible());
}

#[tokio::test(start_paused = true)]
async fn test_rapid_keystrokes_issue_single_call_for_last_query() {
    let mut mock = MockCatalog::new();
    mock.expect_search_titles()
        .times(1)
        .withf(|query| query == "Inception")
        .returning(|_| Ok(vec![movie(1, "Inception")]));

    let mut session = controller(mock, Mode::Single);
    session.handle_input("Inc");
    tokio::time::advance(Duration::from_millis(100)).await;
    session.handle_input("Incep");
    tokio::time::advance(Duration::from_millis(100)).await;
    session.handle_input("Inception");

    let trigger = session.next_trigger().await.unwrap();
    session.run_search(trigger).await;

    tokio::task::yield_now().await;
    assert_eq!(session.try_trigger(), None);
    assert!(session.view().search_results.is_visible());
}

#[tokio::test]
async fn test_stale_response_never_overwrites_newer_results() {
    let mut mock = MockCatalog::new();
    mock.expect_search_titles()
        .times(2)
        .returning(|query| Ok(vec![movie(query.len() as i64, query)]));

    let mut session = controller(mock, Mode::Single);

    assert!(session.submit_search("Slow Movie"));
    let early = session.try_trigger().unwrap();
    let early_search = session.begin_search(early);

    assert!(session.submit_search("Fast"));
    let late = session.try_trigger().unwrap();
    let late_search = session.begin_search(late);

    // The later query's response arrives first and gets displayed.
    let late_outcome = late_search.await;
    session.complete_search(late_outcome);
    assert_eq!(
        session.view().search_results.content().unwrap()[0].title,
        "Fast"
    );

    // The slow early response arrives afterwards and must be discarded.
    let early_outcome = early_search.await;
    session.complete_search(early_outcome);
    assert_eq!(
        session.view().search_results.content().unwrap()[0].title,
        "Fast"
    );
}

#[tokio::test]
async fn test_selecting_movie_hides_search_and_shows_selection() {
    let mut mock = MockCatalog::new();
    mock.expect_search_titles()
        .returning(|_| Ok(vec![movie(42, "Dune")]));

    let mut session = controller(mock, Mode::Single);
    session.submit_search("Dune");
    let trigger = session.try_trigger().unwrap();
    session.run_search(trigger).await;
    assert!(session.view().search_results.is_visible());

    session.select_movie(movie(42, "Dune"));

    let view = session.view();
    assert!(!view.search_results.is_visible());
    assert_eq!(view.selected_movie.content().unwrap().title, "Dune");
    assert_eq!(
        session.recommendations_page_url().unwrap(),
        "/recommendations?title=Dune"
    );
}

#[tokio::test]
async fn test_recommendations_page_url_is_encoded() {
    let mock = MockCatalog::new();
    let mut session = controller(mock, Mode::Single);
    session.select_movie(movie(7, "2001: A Space Odyssey"));

    assert_eq!(
        session.recommendations_page_url().unwrap(),
        "/recommendations?title=2001%3A+A+Space+Odyssey"
    );
}

#[tokio::test]
async fn test_single_recommendations_success_clears_loading() {
    let mut mock = MockCatalog::new();
    mock.expect_fetch_recommendations()
        .withf(|title| title == "Dune")
        .returning(|_| {
            Ok(single_result(
                movie(42, "Dune"),
                vec![movie(50, "Arrival"), movie(51, "Blade Runner 2049")],
            ))
        });

    let mut session = controller(mock, Mode::Single);
    session.select_movie(movie(42, "Dune"));
    session.request_recommendations().await;

    let view = session.view();
    assert!(!view.loading);
    assert!(!view.error.is_visible());
    assert_eq!(view.recommendations.content().unwrap().len(), 2);
    assert_eq!(view.source_movies.content().unwrap()[0].title, "Dune");
    assert!(!view.empty_state);
}

#[tokio::test]
async fn test_empty_single_recommendations_show_empty_state() {
    let mut mock = MockCatalog::new();
    mock.expect_fetch_recommendations()
        .returning(|_| Ok(single_result(movie(42, "Dune"), vec![])));

    let mut session = controller(mock, Mode::Single);
    session.select_movie(movie(42, "Dune"));
    session.request_recommendations().await;

    let view = session.view();
    assert!(view.empty_state);
    assert!(!view.recommendations.is_visible());
}

#[tokio::test]
async fn test_failed_recommendations_recover_on_retry() {
    let mut mock = MockCatalog::new();
    let mut seq = mockall::Sequence::new();
    mock.expect_fetch_recommendations()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Err(ClientError::Application("Movie \"Dune\" not found".to_string())));
    mock.expect_fetch_recommendations()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(single_result(movie(42, "Dune"), vec![movie(50, "Arrival")])));

    let mut session = controller(mock, Mode::Single);
    session.select_movie(movie(42, "Dune"));

    session.request_recommendations().await;
    let view = session.view();
    assert!(!view.loading);
    assert_eq!(
        view.error.content().unwrap(),
        "Movie \"Dune\" not found"
    );

    // Retrying the same action clears the error and succeeds.
    session.request_recommendations().await;
    let view = session.view();
    assert!(!view.error.is_visible());
    assert!(view.recommendations.is_visible());
}

#[tokio::test]
async fn test_group_request_posts_titles_in_addition_order() {
    let mut mock = MockCatalog::new();
    mock.expect_fetch_group_recommendations()
        .times(1)
        .withf(|titles| titles.to_vec() == vec!["A".to_string(), "B".to_string()])
        .returning(|_| Err(ClientError::Application("no matches".to_string())));

    let mut session = controller(mock, Mode::Group);
    assert_eq!(session.add_to_group(movie(1, "A")), AddResult::Added);
    assert_eq!(session.add_to_group(movie(2, "B")), AddResult::Added);
    assert_eq!(
        session.add_to_group(movie(1, "A")),
        AddResult::AlreadyPresent
    );
    assert!(session.group_request_enabled());

    session.request_group_recommendations().await;

    let view = session.view();
    assert!(!view.loading);
    assert_eq!(view.error.content().unwrap(), "no matches");
}

#[tokio::test]
async fn test_empty_group_request_short_circuits_without_network() {
    // No expectations: a group fetch would panic.
    let mock = MockCatalog::new();

    let mut session = controller(mock, Mode::Group);
    assert!(!session.group_request_enabled());

    session.request_group_recommendations().await;

    let view = session.view();
    assert!(!view.loading);
    assert_eq!(
        view.error.content().unwrap(),
        "Please select at least one movie first."
    );
}

#[tokio::test]
async fn test_empty_group_result_reports_no_matches() {
    let mut mock = MockCatalog::new();
    mock.expect_fetch_group_recommendations().returning(|_| {
        Ok(RecommendationResult {
            source: RecommendationSource::Group(vec![movie(1, "A")]),
            recommendations: vec![],
        })
    });

    let mut session = controller(mock, Mode::Group);
    session.add_to_group(movie(1, "A"));
    session.request_group_recommendations().await;

    let view = session.view();
    assert_eq!(
        view.error.content().unwrap(),
        "No group recommendations found. Try adding different movies."
    );
    assert!(view.source_movies.is_visible());
}

#[tokio::test]
async fn test_group_search_filters_out_selected_movies() {
    let mut mock = MockCatalog::new();
    mock.expect_search_titles()
        .returning(|_| Ok(vec![movie(1, "A"), movie(2, "B"), movie(3, "C")]));

    let mut session = controller(mock, Mode::Group);
    session.add_to_group(movie(2, "B"));

    session.submit_search("letters");
    let trigger = session.try_trigger().unwrap();
    session.run_search(trigger).await;

    let view = session.view();
    let cards = view.search_results.content().unwrap();
    assert_eq!(cards.len(), 2);
    assert_eq!(cards[0].id, 1);
    assert_eq!(cards[1].id, 3);
}

#[tokio::test]
async fn test_adding_to_group_hides_search_dropdown() {
    let mut mock = MockCatalog::new();
    mock.expect_search_titles()
        .returning(|_| Ok(vec![movie(1, "A"), movie(2, "B")]));

    let mut session = controller(mock, Mode::Group);
    session.submit_search("ab");
    let trigger = session.try_trigger().unwrap();
    session.run_search(trigger).await;
    assert!(session.view().search_results.is_visible());

    session.add_to_group(movie(1, "A"));

    let view = session.view();
    assert!(!view.search_results.is_visible());
    assert_eq!(view.selected_group.content().unwrap().len(), 1);
    assert!(view.group_request_enabled);
}

#[tokio::test]
async fn test_removing_last_group_movie_disables_request() {
    let mock = MockCatalog::new();

    let mut session = controller(mock, Mode::Group);
    session.add_to_group(movie(1, "A"));
    assert!(session.group_request_enabled());

    use cinematch_client::session::RemoveResult;
    assert_eq!(session.remove_from_group(1), RemoveResult::Removed);
    assert_eq!(session.remove_from_group(1), RemoveResult::NotFound);
    assert!(!session.group_request_enabled());
    assert!(!session.view().group_request_enabled);
}

#[tokio::test]
async fn test_search_failure_surfaces_server_message_in_single_mode() {
    let mut mock = MockCatalog::new();
    mock.expect_search_titles()
        .returning(|_| Err(ClientError::Application("Query parameter q is required".to_string())));

    let mut session = controller(mock, Mode::Single);
    session.submit_search("Dune");
    let trigger = session.try_trigger().unwrap();
    session.run_search(trigger).await;

    let view = session.view();
    assert!(!view.search_results.is_visible());
    assert_eq!(
        view.error.content().unwrap(),
        "Query parameter q is required"
    );
}

#[tokio::test]
async fn test_group_search_failure_is_swallowed() {
    let mut mock = MockCatalog::new();
    mock.expect_search_titles()
        .returning(|_| Err(ClientError::Application("boom".to_string())));

    let mut session = controller(mock, Mode::Group);
    session.submit_search("Dune");
    let trigger = session.try_trigger().unwrap();
    session.run_search(trigger).await;

    let view = session.view();
    assert!(!view.search_results.is_visible());
    assert!(!view.error.is_visible());
}
