//! Reusable HTML components for the HTMX + Tailwind UI
//!
//! Components are server-rendered HTML fragments used both in full pages
//! and as HTMX partial updates.

pub mod layout;
pub mod product;

pub use layout::{button, html_escape, input, page_header, render_page, spinner};
pub use product::{
    ERROR_ID, LOAD_MORE_ID, RESULTS_ID, SEARCH_FORM_ID, error_alert, load_more_control, no_results, product_card,
    product_cards, product_grid,
};
