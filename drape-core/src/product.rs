//! Wire types shared by the search service and its clients.
//!
//! Field names match the JSON exchanged on `POST /search`.

use serde::{Deserialize, Serialize};

/// Products requested per page unless configured otherwise.
pub const DEFAULT_PAGE_SIZE: u32 = 5;

/// Largest page the search service will serve.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Image shown when a product image is missing or fails to load.
pub const PLACEHOLDER_IMAGE_URL: &str = "/api/placeholder/400/400";

/// One product returned by the search service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,
    pub price: f64,
    pub brand: String,
    pub description: String,
    pub image_url: String,
    /// Cosine similarity to the query, in [0, 1]
    pub similarity_score: f64,
}

impl Product {
    /// Similarity as a percentage with one decimal, e.g. `87.3`.
    pub fn match_percentage(&self) -> String {
        format!("{:.1}", self.similarity_score * 100.0)
    }

    /// Image to display, falling back to the placeholder for blank URLs.
    pub fn display_image_url(&self) -> &str {
        if self.image_url.trim().is_empty() {
            PLACEHOLDER_IMAGE_URL
        } else {
            &self.image_url
        }
    }
}

/// Body of `POST /search`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_page")]
    pub page: u32,
}

impl SearchRequest {
    /// Creates a request for one page of `query`.
    pub fn new(query: impl Into<String>, page: u32, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page_size,
            page,
        }
    }
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_page() -> u32 {
    1
}

/// Successful response of `POST /search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<Product>,
    pub has_more: bool,
    pub current_page: u32,
}

/// Formats a price the way a browser's default number locale does:
/// rupee sign, thousands separators, at most three fraction digits with
/// trailing zeros dropped.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return format!("₹{price}");
    }

    let sign = if price < 0.0 { "-" } else { "" };
    let fixed = format!("{:.3}", price.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    if fraction.is_empty() {
        format!("₹{sign}{grouped}")
    } else {
        format!("₹{sign}{grouped}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn product(score: f64, image_url: &str) -> Product {
        Product {
            name: "Levis Men Blue Slim Fit Jeans".to_string(),
            price: 2199.0,
            brand: "Levis".to_string(),
            description: "Blue dark wash jeans".to_string(),
            image_url: image_url.to_string(),
            similarity_score: score,
        }
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(0.0), "₹0");
        assert_eq!(format_price(999.0), "₹999");
        assert_eq!(format_price(1299.0), "₹1,299");
        assert_eq!(format_price(1234567.5), "₹1,234,567.5");
        assert_eq!(format_price(12.3456), "₹12.346");
        assert_eq!(format_price(-4500.25), "₹-4,500.25");
    }

    #[test]
    fn test_match_percentage() {
        assert_eq!(product(0.8734, "x").match_percentage(), "87.3");
        assert_eq!(product(1.0, "x").match_percentage(), "100.0");
        assert_eq!(product(0.0, "x").match_percentage(), "0.0");
    }

    #[test]
    fn test_display_image_falls_back_to_placeholder() {
        assert_eq!(product(0.5, "  ").display_image_url(), PLACEHOLDER_IMAGE_URL);
        assert_eq!(
            product(0.5, "https://img.test/1.jpg").display_image_url(),
            "https://img.test/1.jpg"
        );
    }

    #[test]
    fn test_request_defaults_when_fields_missing() {
        let request: SearchRequest = serde_json::from_str(r#"{"query": "black dress"}"#).unwrap();
        assert_eq!(request, SearchRequest::new("black dress", 1, DEFAULT_PAGE_SIZE));
    }

    #[test]
    fn test_response_wire_shape() {
        let body = r#"{
            "results": [{"name": "Kurta", "price": 899.0, "brand": "Anouk",
                         "description": "Printed kurta", "image_url": "k.jpg",
                         "similarity_score": 0.42}],
            "has_more": true,
            "current_page": 1
        }"#;
        let response: SearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].brand, "Anouk");
        assert!(response.has_more);
    }

    proptest! {
        #[test]
        fn prop_format_price_keeps_digits(whole in 0u64..10_000_000_000) {
            let formatted = format_price(whole as f64);
            let digits: String = formatted.chars().filter(char::is_ascii_digit).collect();
            prop_assert_eq!(digits, whole.to_string());
        }
    }
}
