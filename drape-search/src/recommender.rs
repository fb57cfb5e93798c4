//! Similarity ranking over the product catalog.

use drape_core::Product;

use crate::catalog::Catalog;
use crate::tfidf::{SparseVector, TfidfVectorizer, cosine_similarity};

/// Ranks catalog products against free-text queries.
#[derive(Debug)]
pub struct ProductRecommender {
    catalog: Catalog,
    vectorizer: TfidfVectorizer,
    matrix: Vec<SparseVector>,
    min_similarity: f64,
}

impl ProductRecommender {
    /// Builds the TF-IDF index over every catalog item.
    pub fn new(catalog: Catalog, min_similarity: f64) -> Self {
        let features: Vec<String> = catalog
            .items()
            .iter()
            .map(|item| item.combined_features())
            .collect();
        let (vectorizer, matrix) = TfidfVectorizer::fit_transform(&features);

        tracing::info!(
            "Built TF-IDF index: {} products x {} terms",
            matrix.len(),
            vectorizer.vocabulary_len()
        );

        Self {
            catalog,
            vectorizer,
            matrix,
            min_similarity,
        }
    }

    /// Number of indexed products.
    pub fn dataset_size(&self) -> usize {
        self.catalog.len()
    }

    /// Indexed catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Returns up to `limit` products ordered by descending similarity.
    ///
    /// Products scoring below the minimum similarity are never returned,
    /// so fewer than `limit` results is normal for narrow queries.
    pub fn search_similar(&self, query: &str, limit: usize) -> Vec<Product> {
        let query_vector = self.vectorizer.transform(query);
        if query_vector.is_empty() || limit == 0 {
            tracing::debug!("No indexed terms in query: {}", query);
            return Vec::new();
        }

        let mut scored: Vec<(usize, f64)> = self
            .matrix
            .iter()
            .enumerate()
            .map(|(index, row)| (index, cosine_similarity(&query_vector, row)))
            .filter(|(_, score)| *score >= self.min_similarity)
            .collect();

        scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        scored.truncate(limit);

        let items = self.catalog.items();
        let results: Vec<Product> = scored
            .into_iter()
            .map(|(index, score)| items[index].to_product(score.clamp(0.0, 1.0)))
            .collect();

        tracing::debug!("Found {} results for query: {}", results.len(), query);
        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CatalogItem;

    fn catalog() -> Catalog {
        let item = |name: &str, colour: &str, description: &str| CatalogItem {
            name: name.to_string(),
            brand: "Brand".to_string(),
            colour: colour.to_string(),
            description: description.to_string(),
            price: 999.0,
            ..Default::default()
        };

        Catalog::from_items(vec![
            item("Slim Fit Jeans", "Blue", "Blue stretchable denim jeans"),
            item("Floral Dress", "Black", "Black dress with floral print"),
            item("Relaxed Jeans", "Black", "Black mid-rise jeans"),
            item("Cotton Kurta", "Orange", "Solid straight kurta"),
        ])
    }

    #[test]
    fn test_best_match_first() {
        let recommender = ProductRecommender::new(catalog(), 0.01);
        let results = recommender.search_similar("blue jeans", 5);

        assert_eq!(results[0].name, "Slim Fit Jeans");
        assert!(results.iter().all(|p| p.name != "Cotton Kurta"));
        assert!(
            results
                .windows(2)
                .all(|pair| pair[0].similarity_score >= pair[1].similarity_score)
        );
    }

    #[test]
    fn test_limit_and_threshold() {
        let recommender = ProductRecommender::new(catalog(), 0.01);
        assert_eq!(recommender.search_similar("jeans", 1).len(), 1);
        assert!(recommender.search_similar("velvet blazer", 5).is_empty());

        let strict = ProductRecommender::new(catalog(), 0.99);
        assert!(strict.search_similar("black", 5).is_empty());
    }
}
