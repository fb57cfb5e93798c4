//! Search page - query form and result area

use axum::response::Html;

use crate::components::{SEARCH_FORM_ID, button, input, page_header, render_page, spinner};

/// Element id of the container that search fragments are swapped into.
pub const SEARCH_RESULTS_ID: &str = "search-results";

/// Renders the search page.
///
/// Submitting the form replaces the result area with the first page for
/// the new query; a newer submission cancels one still in flight.
pub async fn search_page() -> Html<String> {
    let submit_label = format!(
        r#"{}<span class="htmx-indicator">Searching...</span><span class="idle-label">Search</span>"#,
        spinner("search-spinner")
    );

    let search_form = format!(
        r##"<form id="{SEARCH_FORM_ID}" class="mb-8"
                  hx-get="/htmx/search" hx-target="#{SEARCH_RESULTS_ID}" hx-swap="innerHTML"
                  hx-sync="this:replace" hx-disabled-elt="find button">
            <div class="flex gap-4">
                {}
                {}
            </div>
        </form>"##,
        input(
            "query",
            "Search for fashion items...",
            "text",
            Some(r#"autocomplete="off""#)
        ),
        button(&submit_label, "primary", Some(r#"type="submit""#))
    );

    let content = format!(
        r#"{}
        {search_form}
        <div id="{SEARCH_RESULTS_ID}"></div>"#,
        page_header("Fashion Search", None)
    );

    render_page("Fashion Search", &content)
}
