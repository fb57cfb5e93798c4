//! Search client against servers that fail, stall or answer garbage.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use axum::Json;
use axum::Router;
use axum::http::StatusCode;
use axum::routing::post;
use drape_core::{Product, SearchRequest, SearchResponse};
use drape_search::{Completion, FETCH_FAILED_MESSAGE, SearchState};
use serde_json::json;
use tokio::net::TcpListener;

use crate::support::{remote_session, spawn};

fn products(page: u32, count: usize) -> Vec<Product> {
    (0..count)
        .map(|i| Product {
            name: format!("Page {page} Item {i}"),
            price: 499.0,
            brand: "Brand".to_string(),
            description: String::new(),
            image_url: String::new(),
            similarity_score: 0.5,
        })
        .collect()
}

#[tokio::test]
async fn test_server_error_shows_fixed_message() {
    let router = Router::new().route(
        "/search",
        post(|| async {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "index exploded" })),
            )
        }),
    );
    let addr = spawn(router).await;
    let mut session = remote_session(addr, 5);

    assert_eq!(session.submit("jeans").await, Some(Completion::Failed));
    let controller = session.controller();
    assert_eq!(controller.state(), SearchState::Error);
    assert_eq!(controller.error(), Some(FETCH_FAILED_MESSAGE));
    assert!(controller.results().is_empty());
    assert!(!controller.shows_no_results());
}

#[tokio::test]
async fn test_malformed_body_is_a_failure() {
    let router = Router::new().route("/search", post(|| async { "<html>not json</html>" }));
    let addr = spawn(router).await;
    let mut session = remote_session(addr, 5);

    assert_eq!(session.submit("jeans").await, Some(Completion::Failed));
    assert_eq!(session.controller().error(), Some(FETCH_FAILED_MESSAGE));
}

#[tokio::test]
async fn test_unreachable_server_is_a_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut session = remote_session(addr, 5);
    assert_eq!(session.submit("jeans").await, Some(Completion::Failed));
    assert_eq!(session.controller().state(), SearchState::Error);
}

#[tokio::test]
async fn test_failed_load_more_keeps_results_and_retries_same_page() {
    let calls = Arc::new(AtomicUsize::new(0));
    let handler_calls = calls.clone();
    let router = Router::new().route(
        "/search",
        post(move |Json(request): Json<SearchRequest>| {
            let calls = handler_calls.clone();
            async move {
                // Second call fails; every other call answers the page asked for.
                if calls.fetch_add(1, Ordering::SeqCst) == 1 {
                    return Err(StatusCode::SERVICE_UNAVAILABLE);
                }
                Ok(Json(SearchResponse {
                    results: products(request.page, request.page_size as usize),
                    has_more: request.page < 3,
                    current_page: request.page,
                }))
            }
        }),
    );
    let addr = spawn(router).await;
    let mut session = remote_session(addr, 5);

    session.submit("jeans").await;
    assert_eq!(session.controller().results().len(), 5);

    assert_eq!(session.load_more().await, Some(Completion::Failed));
    let controller = session.controller();
    assert_eq!(controller.results().len(), 5);
    assert_eq!(controller.current_page(), 1);
    assert_eq!(controller.error(), Some(FETCH_FAILED_MESSAGE));
    assert!(controller.can_load_more());

    assert_eq!(
        session.load_more().await,
        Some(Completion::Applied { added: 5 })
    );
    let controller = session.controller();
    assert_eq!(controller.current_page(), 2);
    assert_eq!(controller.results()[5].name, "Page 2 Item 0");
    assert!(controller.error().is_none());
}

#[tokio::test]
async fn test_slow_response_to_superseded_query_is_discarded() {
    let router = Router::new().route(
        "/search",
        post(|Json(request): Json<SearchRequest>| async move {
            if request.query == "slow" {
                tokio::time::sleep(Duration::from_millis(200)).await;
            }
            Json(SearchResponse {
                results: products(request.page, 2)
                    .into_iter()
                    .map(|mut p| {
                        p.name = format!("{} {}", request.query, p.name);
                        p
                    })
                    .collect(),
                has_more: false,
                current_page: request.page,
            })
        }),
    );
    let addr = spawn(router).await;

    let mut config = drape_core::DrapeConfig::for_testing();
    config.client.endpoint = format!("http://{addr}/search");
    let service = drape_search::SearchService::remote(&config.client).unwrap();
    let mut controller = drape_search::SearchController::new(5);

    let slow = controller.submit("slow").unwrap();
    let fast = controller.submit("fast").unwrap();
    let (slow_outcome, fast_outcome) = futures::join!(
        service.search(&slow.request),
        service.search(&fast.request)
    );

    // The fast answer lands first, then the superseded one.
    assert_eq!(
        controller.complete(fast.ticket, fast_outcome),
        Completion::Applied { added: 2 }
    );
    assert_eq!(controller.complete(slow.ticket, slow_outcome), Completion::Stale);
    assert!(controller.results().iter().all(|p| p.name.starts_with("fast")));
    assert_eq!(controller.query(), "fast");
}

#[tokio::test]
async fn test_server_page_cursor_is_trusted() {
    let router = Router::new().route(
        "/search",
        post(|Json(request): Json<SearchRequest>| async move {
            // Skips ahead one page on load-more.
            let current_page = if request.page > 1 { request.page + 1 } else { 1 };
            Json(SearchResponse {
                results: products(current_page, 1),
                has_more: true,
                current_page,
            })
        }),
    );
    let addr = spawn(router).await;
    let mut session = remote_session(addr, 5);

    session.submit("jeans").await;
    session.load_more().await;
    assert_eq!(session.controller().current_page(), 3);
}
