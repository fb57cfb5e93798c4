//! Drape Search - Product ranking and search client state

#![warn(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
#![warn(clippy::too_many_lines)]
//!
//! Server side: a TF-IDF index over the product catalog answering paginated
//! queries. Client side: a search controller that tracks query, page cursor
//! and loading/error state, driven over HTTP or in-process.

pub mod catalog;
pub mod controller;
pub mod errors;
pub mod providers;
pub mod recommender;
pub mod service;
pub mod session;
pub mod tfidf;

// Re-export main types
pub use catalog::{Catalog, CatalogItem, CatalogStats};
pub use controller::{Completion, PendingSearch, RequestTicket, SearchController, SearchState};
pub use errors::{CatalogError, FETCH_FAILED_MESSAGE, SearchError};
pub use providers::{CatalogProvider, HttpSearchProvider, ProductSearchProvider};
pub use recommender::ProductRecommender;
pub use service::SearchService;
pub use session::SearchSession;

/// Convenience type alias for Results with SearchError.
pub type Result<T> = std::result::Result<T, SearchError>;
