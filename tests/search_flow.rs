//! Integration tests for the URL-driven search page.
//!
//! These tests drive the search controller the way a router would:
//! 1. A location's query string is handed to `navigate_to`
//! 2. Filter actions push the next location through the navigator
//! 3. The pushed location is navigated to in turn

use http::{Method, StatusCode};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;

use goodbooks_client::adapters::{
    InMemoryTokenStore, RecordingNavigator, ScriptedResponse, ScriptedTransport,
};
use goodbooks_client::application::{ApiGateway, SearchController};
use goodbooks_client::domain::foundation::TagId;
use goodbooks_client::domain::search::{self, FilterKind, FilterUpdate, MinRating, SortBy};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn book_page(titles: &[&str], total: u64, current_page: u32) -> Value {
    let books: Vec<Value> = titles
        .iter()
        .enumerate()
        .map(|(i, title)| {
            json!({
                "book_id": i + 1,
                "title": title,
                "authors": "Frank Herbert",
                "average_rating": 4.2,
                "ratings_count": 1000
            })
        })
        .collect();
    json!({
        "books": books,
        "pagination": {
            "total": total,
            "pages": (total + 19) / 20,
            "current_page": current_page,
            "per_page": 20
        }
    })
}

struct Harness {
    transport: ScriptedTransport,
    navigator: RecordingNavigator,
    controller: Arc<SearchController>,
}

impl Harness {
    fn new(transport: ScriptedTransport) -> Self {
        let navigator = RecordingNavigator::new();
        let gateway = Arc::new(ApiGateway::new(
            "http://localhost:5000/api/v1",
            Arc::new(transport.clone()),
            Arc::new(InMemoryTokenStore::new()),
        ));
        let controller = Arc::new(SearchController::new(
            gateway,
            Arc::new(navigator.clone()),
            20,
        ));
        Self {
            transport,
            navigator,
            controller,
        }
    }

    /// Follows the last pushed location like a router would.
    async fn follow(&self) {
        let location = self.navigator.last().unwrap_or_default();
        let query = location.split_once('?').map(|(_, q)| q).unwrap_or("");
        self.controller.navigate_to(query).await;
    }
}

// =============================================================================
// Fetching
// =============================================================================

#[tokio::test]
async fn query_with_filters_hits_search_endpoint() {
    let harness = Harness::new(ScriptedTransport::new().with_route(
        Method::GET,
        "/books/search",
        ScriptedResponse::data(book_page(&["Dune", "Dune Messiah"], 42, 2)),
    ));

    harness.controller.navigate_to("q=dune&min_rating=4&page=2").await;

    let requests = harness.transport.requests_to("/books/search");
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.param("q"), Some("dune"));
    assert_eq!(sent.param("min_rating"), Some("4"));
    assert_eq!(sent.param("page"), Some("2"));
    assert_eq!(sent.param("per_page"), Some("20"));
    assert_eq!(sent.param("sort_by"), Some("relevance"));
    assert!(harness.transport.requests_to("/books/").is_empty());

    let state = harness.controller.state();
    assert_eq!(state.books.len(), 2);
    assert_eq!(state.pagination.total, 42);
    assert_eq!(state.result_range(), Some((21, 40, 42)));
    assert!(!state.loading);
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn blank_query_lists_books() {
    let harness = Harness::new(ScriptedTransport::new().with_route(
        Method::GET,
        "/books/",
        ScriptedResponse::data(book_page(&["Emma"], 1, 1)),
    ));

    harness.controller.navigate_to("q=%20%20&sort_by=title").await;

    let sent = &harness.transport.requests_to("/books/")[0];
    assert_eq!(sent.param("q"), None);
    assert_eq!(sent.param("sort_by"), Some("title"));
    assert!(harness.transport.requests_to("/books/search").is_empty());
}

#[tokio::test]
async fn stale_navigation_never_overwrites_newer_results() {
    let transport = ScriptedTransport::new()
        .with_route(
            Method::GET,
            "/books/search",
            ScriptedResponse::data(book_page(&["Old result"], 1, 1))
                .with_delay(Duration::from_millis(200)),
        )
        .with_route(
            Method::GET,
            "/books/search",
            ScriptedResponse::data(book_page(&["New result"], 1, 1)),
        );
    let harness = Harness::new(transport);
    let controller = Arc::clone(&harness.controller);

    tokio::join!(harness.controller.navigate_to("q=old"), async {
        tokio::time::sleep(Duration::from_millis(20)).await;
        controller.navigate_to("q=new").await;
    });

    let state = harness.controller.state();
    assert_eq!(state.filters.query.as_deref(), Some("new"));
    assert_eq!(state.books.len(), 1);
    assert_eq!(state.books[0].title, "New result");
    assert!(!state.loading);
}

#[tokio::test]
async fn server_error_sets_error_and_stops_loading() {
    let harness = Harness::new(ScriptedTransport::new().with_route(
        Method::GET,
        "/books/search",
        ScriptedResponse::error(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable"),
    ));

    harness.controller.navigate_to("q=dune").await;

    let state = harness.controller.state();
    assert!(state.error.is_some());
    assert!(!state.loading);
    assert!(state.books.is_empty());
}

// =============================================================================
// Filter actions
// =============================================================================

#[tokio::test]
async fn clear_filters_keeps_only_the_query() {
    let harness = Harness::new(
        ScriptedTransport::new()
            .with_route(
                Method::GET,
                "/books/search",
                ScriptedResponse::data(book_page(&["Dune"], 1, 1)),
            ),
    );
    harness
        .controller
        .navigate_to("q=dune&tag_id=7&tag_name=scifi&min_rating=4&sort_by=rating&page=3")
        .await;

    let location = harness.controller.clear_filters();

    assert_eq!(location, "/search?q=dune");
    assert_eq!(harness.navigator.last().as_deref(), Some("/search?q=dune"));
}

#[tokio::test]
async fn changing_a_filter_resets_the_page_and_round_trips() {
    let harness = Harness::new(
        ScriptedTransport::new()
            .with_route(
                Method::GET,
                "/books/search",
                ScriptedResponse::data(book_page(&["Dune"], 60, 3)),
            ),
    );
    harness.controller.navigate_to("q=dune&page=3").await;

    harness
        .controller
        .update_filters(FilterUpdate::new().sort_by(SortBy::Rating));
    harness.follow().await;

    let state = harness.controller.state();
    assert_eq!(state.filters.page, 1);
    assert_eq!(state.filters.sort_by, SortBy::Rating);
    let last = harness.transport.requests_to("/books/search").pop().unwrap();
    assert_eq!(last.param("page"), Some("1"));
    assert_eq!(last.param("sort_by"), Some("rating"));
}

#[tokio::test]
async fn paging_keeps_every_filter() {
    let harness = Harness::new(ScriptedTransport::new().with_route(
        Method::GET,
        "/books/",
        ScriptedResponse::data(book_page(&["Emma"], 60, 1)),
    ));
    harness
        .controller
        .navigate_to("author=Austen&year_from=1800&year_to=1820")
        .await;

    harness.controller.change_page(2);
    harness.follow().await;

    let state = harness.controller.state();
    assert_eq!(state.filters.page, 2);
    assert_eq!(state.filters.author.as_deref(), Some("Austen"));
    assert_eq!(state.filters.year_from, Some(1800));
    assert_eq!(state.filters.year_to, Some(1820));
}

#[tokio::test]
async fn removing_a_chip_drops_only_that_filter() {
    let harness = Harness::new(ScriptedTransport::new().with_route(
        Method::GET,
        "/books/search",
        ScriptedResponse::data(book_page(&[], 0, 1)),
    ));
    harness
        .controller
        .navigate_to("q=dune&min_rating=4.5&tag_id=7&tag_name=scifi")
        .await;

    let chips = harness.controller.state().active_filters();
    let labels: Vec<&str> = chips.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["4.5+ Stars", "Tag: scifi"]);

    let tag_chip = chips
        .iter()
        .find(|c| c.kind == FilterKind::Tag)
        .unwrap()
        .clone();
    let location = harness.controller.update_filters(tag_chip.removal());
    assert_eq!(location, "/search?q=dune&min_rating=4.5");

    harness.follow().await;
    let filters = harness.controller.filters();
    assert_eq!(filters.min_rating, MinRating::FourAndHalf);
    assert_eq!(filters.tag_id, None::<TagId>);
}

#[test]
fn free_text_search_location_from_header_box() {
    assert_eq!(
        search::search_location("  the hobbit ").as_deref(),
        Some("/search?q=the+hobbit")
    );
    assert_eq!(search::search_location("   "), None);
}
