//! Scripted provider for tests.

use std::collections::VecDeque;

use async_trait::async_trait;
use drape_core::{Product, SearchRequest, SearchResponse};
use parking_lot::Mutex;

use super::ProductSearchProvider;
use crate::errors::SearchError;

/// Outcome a [`MockProvider`] returns for one request.
#[derive(Debug, Clone)]
pub enum MockOutcome {
    /// Successful response
    Respond(SearchResponse),
    /// Non-success HTTP status
    Status(u16),
    /// Transport failure
    Unreachable,
}

/// Provider replaying scripted outcomes in order and recording requests.
///
/// Once the script is exhausted every further request fails with HTTP 500.
#[derive(Debug, Default)]
pub struct MockProvider {
    script: Mutex<VecDeque<MockOutcome>>,
    requests: Mutex<Vec<SearchRequest>>,
}

impl MockProvider {
    /// Creates a mock replaying `outcomes`.
    pub fn new(outcomes: impl IntoIterator<Item = MockOutcome>) -> Self {
        Self {
            script: Mutex::new(outcomes.into_iter().collect()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.lock().clone()
    }

    /// Builds `count` distinct products named `<prefix> <n>`.
    pub fn products(prefix: &str, count: usize) -> Vec<Product> {
        (0..count)
            .map(|i| Product {
                name: format!("{prefix} {i}"),
                price: 500.0 + 100.0 * i as f64,
                brand: "Mock".to_string(),
                description: format!("Mock product {i}"),
                image_url: format!("https://img.test/{i}.jpg"),
                similarity_score: 1.0 / (i as f64 + 1.0),
            })
            .collect()
    }
}

#[async_trait]
impl ProductSearchProvider for MockProvider {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        self.requests.lock().push(request.clone());
        let outcome = self.script.lock().pop_front();

        match outcome {
            Some(MockOutcome::Respond(response)) => Ok(response),
            Some(MockOutcome::Status(status)) => Err(SearchError::HttpStatus { status }),
            Some(MockOutcome::Unreachable) => Err(SearchError::NetworkError {
                reason: "mock service unreachable".to_string(),
            }),
            None => Err(SearchError::HttpStatus { status: 500 }),
        }
    }
}
