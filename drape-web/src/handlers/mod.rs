//! HTTP request handlers organized by functionality

pub mod api;
pub mod htmx;

pub use api::{ServiceStatus, api_placeholder, api_search, api_status};
pub use htmx::{HtmxSearchQuery, htmx_search};
