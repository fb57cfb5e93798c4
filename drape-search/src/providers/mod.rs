//! Provider implementations behind the search service.

use async_trait::async_trait;
use drape_core::{SearchRequest, SearchResponse};

use crate::errors::SearchError;

pub mod catalog;
pub mod http;
pub mod mock;

pub use catalog::CatalogProvider;
pub use http::HttpSearchProvider;
pub use mock::MockProvider;

/// Trait for paginated product search backends.
///
/// Implementations answer one page of a query, either from an in-process
/// index or from a remote search service.
#[async_trait]
pub trait ProductSearchProvider: Send + Sync + std::fmt::Debug {
    /// Fetches one page of results.
    ///
    /// # Errors
    /// - `SearchError::NetworkError` - Transport failure
    /// - `SearchError::HttpStatus` - Remote service answered non-2xx
    /// - `SearchError::ParseError` - Response body could not be decoded
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError>;

    /// Number of searchable products, when known locally.
    fn dataset_size(&self) -> Option<usize> {
        None
    }
}
