//! End-to-end tests for Drape
//!
//! Exercise the served search page the way a browser with HTMX does:
//! load the page, request fragments, follow the load-more link.

#[path = "../integration/support.rs"]
mod support;

mod search_workflow;
