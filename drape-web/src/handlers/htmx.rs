//! HTMX handlers returning search result fragments
//!
//! The first page replaces the whole result area. Later pages replace
//! only the load-more slot and append their cards to the grid
//! out-of-band, so earlier results are never re-rendered.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use drape_core::{MAX_PAGE_SIZE, SearchRequest};
use drape_search::SearchController;
use serde::Deserialize;

use crate::components::{
    ERROR_ID, RESULTS_ID, error_alert, load_more_control, no_results, product_cards, product_grid,
};
use crate::server::AppState;

/// Query string of `GET /htmx/search`.
#[derive(Debug, Deserialize)]
pub struct HtmxSearchQuery {
    /// Search text as typed
    #[serde(default)]
    pub query: String,
    /// Page to render, 1-based
    #[serde(default = "first_page")]
    pub page: u32,
}

fn first_page() -> u32 {
    1
}

/// Renders the result fragment for one page of a search.
///
/// A blank query answers `204 No Content`, which HTMX treats as nothing
/// to swap, so the page is left exactly as it was.
pub async fn htmx_search(
    State(state): State<AppState>,
    Query(params): Query<HtmxSearchQuery>,
) -> Response {
    if params.query.trim().is_empty() {
        return StatusCode::NO_CONTENT.into_response();
    }

    let page_size = state.config.client.page_size.clamp(1, MAX_PAGE_SIZE);
    if params.page <= 1 {
        Html(first_page_fragment(&state, &params.query, page_size).await).into_response()
    } else {
        Html(next_page_fragment(&state, &params.query, params.page, page_size).await)
            .into_response()
    }
}

async fn first_page_fragment(state: &AppState, query: &str, page_size: u32) -> String {
    let mut controller = SearchController::new(page_size);
    let Some(pending) = controller.submit(query) else {
        return String::new();
    };

    let outcome = state.search_service.search(&pending.request).await;
    controller.complete(pending.ticket, outcome);

    let next_page = controller
        .can_load_more()
        .then(|| controller.current_page().saturating_add(1));
    let notice = if controller.shows_no_results() {
        no_results()
    } else {
        String::new()
    };

    format!(
        "{}{}{notice}{}",
        error_alert(controller.error()),
        product_grid(controller.results()),
        load_more_control(controller.query(), next_page)
    )
}

async fn next_page_fragment(state: &AppState, query: &str, page: u32, page_size: u32) -> String {
    let request = SearchRequest::new(query, page, page_size);

    match state.search_service.search(&request).await {
        Ok(response) => {
            if response.current_page != page {
                tracing::warn!(
                    "Server answered page {} for a request of page {}",
                    response.current_page,
                    page
                );
            }
            let next_page = response
                .has_more
                .then(|| response.current_page.saturating_add(1));

            format!(
                r#"{}<div hx-swap-oob="beforeend:#{RESULTS_ID}">{}</div>{}"#,
                load_more_control(query, next_page),
                product_cards(&response.results),
                out_of_band(&error_alert(None))
            )
        }
        Err(e) => {
            tracing::error!("Search for {:?} (page {}) failed: {}", query, page, e);
            // Keep the button on the same page so the user can retry.
            format!(
                "{}{}",
                load_more_control(query, Some(page)),
                out_of_band(&error_alert(Some(e.user_message())))
            )
        }
    }
}

fn out_of_band(fragment: &str) -> String {
    fragment.replacen(
        &format!(r#"id="{ERROR_ID}""#),
        &format!(r#"id="{ERROR_ID}" hx-swap-oob="true""#),
        1,
    )
}
