//! HTMX + Tailwind web server for Drape
//!
//! Serves the search page, its HTMX fragments and the JSON search API
//! from one router.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use chrono::{DateTime, Utc};
use drape_core::DrapeConfig;
use drape_search::{Catalog, SearchService};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};

use crate::errors::WebError;
use crate::handlers::{api_placeholder, api_search, api_status, htmx_search};
use crate::pages::search_page;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Search backend for the API and the HTMX fragments
    pub search_service: SearchService,
    /// Settings the server was started with
    pub config: Arc<DrapeConfig>,
    /// Monotonic start time, for uptime
    pub server_started_at: Instant,
    /// Wall-clock start time, for status reports
    pub started_at: DateTime<Utc>,
}

impl AppState {
    /// Creates state for a server that starts now.
    pub fn new(search_service: SearchService, config: DrapeConfig) -> Self {
        Self {
            search_service,
            config: Arc::new(config),
            server_started_at: Instant::now(),
            started_at: Utc::now(),
        }
    }
}

/// Builds the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.allowed_origins);

    Router::new()
        // Pages
        .route("/", get(search_page))
        // HTMX fragments
        .route("/htmx/search", get(htmx_search))
        // JSON API
        .route("/search", post(api_search))
        .route("/api/status", get(api_status))
        .route("/api/placeholder/{width}/{height}", get(api_placeholder))
        .layer(cors)
        .with_state(state)
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Loads the catalog, binds the configured address and serves until the
/// process is stopped.
///
/// # Errors
/// - `WebError::Catalog` - Catalog file missing or malformed
/// - `WebError::Bind` - Address unavailable
/// - `WebError::Serve` - Server failed while running
pub async fn run_server(config: DrapeConfig) -> Result<(), WebError> {
    let catalog = Catalog::load(&config.catalog.path)?;
    tracing::info!(
        "Loaded {} products from {}",
        catalog.len(),
        config.catalog.path.display()
    );

    let search_service = SearchService::from_catalog(catalog, config.catalog.min_similarity);
    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| WebError::Bind {
            address: address.clone(),
            source,
        })?;

    tracing::info!("Drape search server running on http://{}", address);
    serve(listener, AppState::new(search_service, config)).await
}

/// Serves the router on an already bound listener.
///
/// # Errors
/// - `WebError::Serve` - Server failed while running
pub async fn serve(listener: TcpListener, state: AppState) -> Result<(), WebError> {
    axum::serve(listener, build_router(state))
        .await
        .map_err(WebError::Serve)
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use drape_core::{SearchResponse, format_price};
    use drape_search::providers::mock::{MockOutcome, MockProvider};
    use drape_search::{CatalogItem, FETCH_FAILED_MESSAGE};
    use tower::ServiceExt;

    use super::*;

    fn jeans(name: &str, price: f64) -> CatalogItem {
        CatalogItem {
            name: name.to_string(),
            brand: "Roadster".to_string(),
            colour: "Blue".to_string(),
            description: "Blue denim jeans".to_string(),
            price,
            ..Default::default()
        }
    }

    fn app() -> Router {
        app_with_config(DrapeConfig::for_testing())
    }

    fn app_with_config(config: DrapeConfig) -> Router {
        let mut items: Vec<CatalogItem> = (0..8)
            .map(|i| jeans(&format!("Jeans {i}"), 999.0 + f64::from(i)))
            .collect();
        items.push(CatalogItem {
            name: "Silk Saree".to_string(),
            brand: "Saree Mall".to_string(),
            description: "Woven silk saree".to_string(),
            price: 2499.0,
            ..Default::default()
        });
        let service = SearchService::from_catalog(Catalog::from_items(items), 0.01);
        build_router(AppState::new(service, config))
    }

    /// Router whose search backend answers every request with HTTP 500.
    fn failing_app() -> Router {
        let provider = MockProvider::new([MockOutcome::Status(500)]);
        let service = SearchService::with_provider(Arc::new(provider));
        build_router(AppState::new(service, DrapeConfig::for_testing()))
    }

    async fn htmx_get(app: Router, uri: &str) -> String {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        body_text(response).await
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn search_post(body: &str) -> Request<Body> {
        Request::post("/search")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_search_pages_do_not_overlap() {
        let app = app();

        let first = app
            .clone()
            .oneshot(search_post(r#"{"query":"blue jeans","page_size":5,"page":1}"#))
            .await
            .unwrap();
        assert_eq!(first.status(), StatusCode::OK);
        let first: SearchResponse = serde_json::from_str(&body_text(first).await).unwrap();
        assert_eq!(first.results.len(), 5);
        assert!(first.has_more);
        assert_eq!(first.current_page, 1);

        let second = app
            .oneshot(search_post(r#"{"query":"blue jeans","page_size":5,"page":2}"#))
            .await
            .unwrap();
        let second: SearchResponse = serde_json::from_str(&body_text(second).await).unwrap();
        assert_eq!(second.results.len(), 3);
        assert!(!second.has_more);
        assert_eq!(second.current_page, 2);

        for product in &second.results {
            assert!(first.results.iter().all(|p| p.name != product.name));
        }
    }

    #[tokio::test]
    async fn test_search_defaults_and_validation() {
        let response = app()
            .oneshot(search_post(r#"{"query":"jeans"}"#))
            .await
            .unwrap();
        let body: SearchResponse = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body.current_page, 1);
        assert_eq!(body.results.len(), 5);

        let response = app()
            .oneshot(search_post(r#"{"query":"jeans","page":0}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body_text(response).await.contains("detail"));
    }

    #[tokio::test]
    async fn test_status_reports_dataset() {
        let response = app()
            .oneshot(Request::get("/api/status").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(body["status"], "online");
        assert_eq!(body["dataset_size"], 9);
    }

    #[tokio::test]
    async fn test_placeholder_is_svg() {
        let response = app()
            .oneshot(
                Request::get("/api/placeholder/400/300")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/svg+xml");
        assert!(body_text(response).await.contains(r#"width="400" height="300""#));
    }

    #[tokio::test]
    async fn test_htmx_first_page_fragment() {
        let response = app()
            .oneshot(
                Request::get("/htmx/search?query=blue%20jeans")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.contains(r#"<div id="search-error"></div>"#));
        assert_eq!(html.matches("% match").count(), 5);
        assert!(html.contains(&format_price(999.0)));
        assert!(html.contains("/htmx/search?query=blue%20jeans&amp;page=2"));
    }

    #[tokio::test]
    async fn test_htmx_next_page_appends() {
        let response = app()
            .oneshot(
                Request::get("/htmx/search?query=blue%20jeans&page=2")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_text(response).await;

        assert!(html.starts_with(r#"<div id="load-more"></div>"#));
        assert!(html.contains(r##"hx-swap-oob="beforeend:#results""##));
        assert_eq!(html.matches("% match").count(), 3);
    }

    #[tokio::test]
    async fn test_htmx_blank_and_unmatched_queries() {
        let response = app()
            .oneshot(
                Request::get("/htmx/search?query=%20%20")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app()
            .oneshot(
                Request::get("/htmx/search?query=velvet")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let html = body_text(response).await;
        assert!(html.contains("No results found"));
        assert!(html.contains(r#"<div id="load-more"></div>"#));
    }

    #[tokio::test]
    async fn test_htmx_oversized_page_size_still_renders() {
        let mut config = DrapeConfig::for_testing();
        config.client.page_size = 150;

        let html = htmx_get(app_with_config(config), "/htmx/search?query=blue%20jeans").await;

        assert!(!html.contains(FETCH_FAILED_MESSAGE));
        assert_eq!(html.matches("% match").count(), 8);
    }

    #[tokio::test]
    async fn test_htmx_first_page_failure_shows_alert() {
        let html = htmx_get(failing_app(), "/htmx/search?query=jeans").await;

        assert!(html.contains(r#"role="alert""#));
        assert!(html.contains(FETCH_FAILED_MESSAGE));
        assert!(!html.contains("No results found"));
        assert_eq!(html.matches("% match").count(), 0);
        assert!(html.contains(r#"<div id="load-more"></div>"#));
    }

    #[tokio::test]
    async fn test_htmx_next_page_failure_keeps_page_for_retry() {
        let html = htmx_get(failing_app(), "/htmx/search?query=jeans&page=2").await;

        // Retry button still asks for page 2
        assert!(html.starts_with(r#"<div id="load-more" class="#));
        assert!(html.contains("/htmx/search?query=jeans&amp;page=2"));
        assert!(html.contains(r#"<div id="search-error" hx-swap-oob="true""#));
        assert!(html.contains(FETCH_FAILED_MESSAGE));
        assert!(!html.contains("beforeend:#results"));
    }
}
