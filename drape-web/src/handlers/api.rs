//! JSON API handlers: product search, service status, placeholder images

use axum::Json;
use axum::extract::{Path, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use drape_core::{SearchRequest, SearchResponse};
use serde::Serialize;
use serde_json::json;

use crate::server::AppState;

/// Largest placeholder edge, in pixels.
const MAX_PLACEHOLDER_SIZE: u32 = 2000;

/// Body of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct ServiceStatus {
    /// Always `"online"` while the server answers
    pub status: &'static str,
    /// Human-readable summary
    pub message: String,
    /// Number of searchable products, when known
    pub dataset_size: Option<usize>,
    /// Routes served
    pub endpoints: Vec<&'static str>,
    /// RFC 3339 start time
    pub started_at: String,
    /// Seconds since start
    pub uptime_seconds: u64,
}

/// Handles `POST /search`.
///
/// Invalid paging answers 422; every other failure answers 500 with a
/// `detail` message.
pub async fn api_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, (StatusCode, Json<serde_json::Value>)> {
    match state.search_service.search(&request).await {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            let status = if e.is_invalid_request() {
                StatusCode::UNPROCESSABLE_ENTITY
            } else {
                tracing::error!("Search error: {}", e);
                StatusCode::INTERNAL_SERVER_ERROR
            };
            Err((status, Json(json!({ "detail": e.to_string() }))))
        }
    }
}

/// Handles `GET /api/status`.
pub async fn api_status(State(state): State<AppState>) -> Json<ServiceStatus> {
    let dataset_size = state.search_service.dataset_size();
    let message = match dataset_size {
        Some(size) => format!("Fashion search API is running with {size} products"),
        None => "Fashion search API is running".to_string(),
    };

    Json(ServiceStatus {
        status: "online",
        message,
        dataset_size,
        endpoints: vec![
            "GET /",
            "GET /htmx/search",
            "POST /search",
            "GET /api/status",
            "GET /api/placeholder/{width}/{height}",
        ],
        started_at: state.started_at.to_rfc3339(),
        uptime_seconds: state.server_started_at.elapsed().as_secs(),
    })
}

/// Handles `GET /api/placeholder/{width}/{height}`.
///
/// Renders a neutral SVG of the requested size, clamped to a sane range.
pub async fn api_placeholder(Path((width, height)): Path<(u32, u32)>) -> Response {
    let width = width.clamp(1, MAX_PLACEHOLDER_SIZE);
    let height = height.clamp(1, MAX_PLACEHOLDER_SIZE);

    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{height}" viewBox="0 0 {width} {height}">
<rect width="100%" height="100%" fill="#e5e7eb"/>
<text x="50%" y="50%" dominant-baseline="middle" text-anchor="middle" fill="#9ca3af" font-family="sans-serif" font-size="{font}">{width}x{height}</text>
</svg>"##,
        font = (width.min(height) / 10).max(8),
    );

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        svg,
    )
        .into_response()
}
