//! In-process provider ranking the local catalog.

use std::sync::Arc;

use async_trait::async_trait;
use drape_core::{SearchRequest, SearchResponse};

use super::ProductSearchProvider;
use crate::errors::SearchError;
use crate::recommender::ProductRecommender;

/// Answers searches from an in-memory TF-IDF index.
#[derive(Debug, Clone)]
pub struct CatalogProvider {
    recommender: Arc<ProductRecommender>,
}

impl CatalogProvider {
    /// Wraps a built recommender.
    pub fn new(recommender: Arc<ProductRecommender>) -> Self {
        Self { recommender }
    }

    /// Slices page `page` out of the ranking.
    ///
    /// One extra match beyond the page is ranked so `has_more` reflects
    /// whether another page actually has content.
    fn paginate(&self, request: &SearchRequest) -> SearchResponse {
        let page_size = request.page_size as usize;
        let end = (request.page as usize).saturating_mul(page_size);
        let start = end.saturating_sub(page_size);

        let mut ranked = self
            .recommender
            .search_similar(&request.query, end.saturating_add(1));
        let has_more = ranked.len() > end;
        ranked.truncate(end);

        SearchResponse {
            results: ranked.into_iter().skip(start).collect(),
            has_more,
            current_page: request.page,
        }
    }
}

#[async_trait]
impl ProductSearchProvider for CatalogProvider {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        Ok(self.paginate(request))
    }

    fn dataset_size(&self) -> Option<usize> {
        Some(self.recommender.dataset_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogItem};

    fn provider(count: usize) -> CatalogProvider {
        let items = (0..count)
            .map(|i| CatalogItem {
                name: format!("Denim Jeans {i}"),
                description: "blue jeans ".repeat(i + 1),
                price: 1000.0 + i as f64,
                ..Default::default()
            })
            .collect();
        CatalogProvider::new(Arc::new(ProductRecommender::new(
            Catalog::from_items(items),
            0.01,
        )))
    }

    #[tokio::test]
    async fn test_pages_do_not_overlap() {
        let provider = provider(8);

        let first = provider
            .search(&SearchRequest::new("blue jeans", 1, 5))
            .await
            .unwrap();
        assert_eq!(first.results.len(), 5);
        assert!(first.has_more);
        assert_eq!(first.current_page, 1);

        let second = provider
            .search(&SearchRequest::new("blue jeans", 2, 5))
            .await
            .unwrap();
        assert_eq!(second.results.len(), 3);
        assert!(!second.has_more);
        assert_eq!(second.current_page, 2);

        for product in &second.results {
            assert!(!first.results.contains(product));
        }
    }

    #[tokio::test]
    async fn test_exact_page_boundary_has_no_more() {
        let provider = provider(5);
        let page = provider
            .search(&SearchRequest::new("jeans", 1, 5))
            .await
            .unwrap();
        assert_eq!(page.results.len(), 5);
        assert!(!page.has_more);
        assert_eq!(provider.dataset_size(), Some(5));
    }

    #[tokio::test]
    async fn test_page_past_end_is_empty() {
        let provider = provider(3);
        let page = provider
            .search(&SearchRequest::new("jeans", 4, 5))
            .await
            .unwrap();
        assert!(page.results.is_empty());
        assert!(!page.has_more);
    }
}
