//! Paginated product search service.
//!
//! Validates requests and delegates ranking to a provider: the local
//! catalog index on the server side, or a remote search service on the
//! client side.

use std::sync::Arc;

use drape_core::config::ClientConfig;
use drape_core::{SearchRequest, SearchResponse};
pub use drape_core::MAX_PAGE_SIZE;

use crate::catalog::Catalog;
use crate::errors::SearchError;
use crate::providers::{CatalogProvider, HttpSearchProvider, ProductSearchProvider};
use crate::recommender::ProductRecommender;

/// Product search service.
#[derive(Debug, Clone)]
pub struct SearchService {
    provider: Arc<dyn ProductSearchProvider>,
}

impl SearchService {
    /// Creates a service backed by an in-process index over `catalog`.
    pub fn from_catalog(catalog: Catalog, min_similarity: f64) -> Self {
        let recommender = Arc::new(ProductRecommender::new(catalog, min_similarity));
        Self::with_provider(Arc::new(CatalogProvider::new(recommender)))
    }

    /// Creates a service forwarding to a remote search endpoint.
    ///
    /// # Errors
    /// - `SearchError::InvalidRequest` - Endpoint is not a valid http(s) URL
    /// - `SearchError::NetworkError` - HTTP client could not be built
    pub fn remote(config: &ClientConfig) -> Result<Self, SearchError> {
        Ok(Self::with_provider(Arc::new(
            HttpSearchProvider::from_config(config)?,
        )))
    }

    /// Creates a service over any provider.
    pub fn with_provider(provider: Arc<dyn ProductSearchProvider>) -> Self {
        Self { provider }
    }

    /// Number of searchable products, when known locally.
    pub fn dataset_size(&self) -> Option<usize> {
        self.provider.dataset_size()
    }

    /// Fetches one page of results for `request`.
    ///
    /// # Errors
    /// - `SearchError::InvalidRequest` - Page is zero or page size out of range
    /// - `SearchError::NetworkError` - Remote service unreachable
    /// - `SearchError::HttpStatus` - Remote service answered non-2xx
    /// - `SearchError::ParseError` - Remote response could not be decoded
    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        validate(request)?;

        tracing::info!(
            "Search query: {:?}, page: {}, page_size: {}",
            request.query,
            request.page,
            request.page_size
        );

        let response = self.provider.search(request).await?;
        tracing::debug!(
            "Search returned {} results (has_more: {})",
            response.results.len(),
            response.has_more
        );
        Ok(response)
    }
}

fn validate(request: &SearchRequest) -> Result<(), SearchError> {
    if request.page == 0 {
        return Err(SearchError::InvalidRequest {
            reason: "page must be at least 1".to_string(),
        });
    }
    if request.page_size == 0 || request.page_size > MAX_PAGE_SIZE {
        return Err(SearchError::InvalidRequest {
            reason: format!("page_size must be between 1 and {MAX_PAGE_SIZE}"),
        });
    }
    Ok(())
}
