//! Full page handlers
//!
//! Pages compose components into complete HTML documents.

pub mod search;

pub use search::search_page;
