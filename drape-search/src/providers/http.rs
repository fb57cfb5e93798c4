//! Remote provider calling a search service over HTTP.

use async_trait::async_trait;
use drape_core::config::ClientConfig;
use drape_core::{SearchRequest, SearchResponse};
use url::Url;

use super::ProductSearchProvider;
use crate::errors::SearchError;

/// Sends `POST <endpoint>` with a JSON [`SearchRequest`] body.
///
/// No retries and no request deduplication; any non-2xx status is a
/// failure regardless of the body.
#[derive(Debug, Clone)]
pub struct HttpSearchProvider {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpSearchProvider {
    /// Creates a provider with a default HTTP client.
    pub fn new(endpoint: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint,
        }
    }

    /// Creates a provider from client configuration.
    ///
    /// # Errors
    /// - `SearchError::InvalidRequest` - Endpoint is not a valid http(s) URL
    /// - `SearchError::NetworkError` - HTTP client could not be built
    pub fn from_config(config: &ClientConfig) -> Result<Self, SearchError> {
        let endpoint = config
            .endpoint_url()
            .map_err(|e| SearchError::InvalidRequest {
                reason: e.to_string(),
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(|e| SearchError::NetworkError {
            reason: format!("failed to build HTTP client: {e}"),
        })?;

        Ok(Self { client, endpoint })
    }

    /// Endpoint requests are sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl ProductSearchProvider for HttpSearchProvider {
    async fn search(&self, request: &SearchRequest) -> Result<SearchResponse, SearchError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| SearchError::NetworkError {
                reason: format!("search request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::HttpStatus {
                status: status.as_u16(),
            });
        }

        response
            .json::<SearchResponse>()
            .await
            .map_err(|e| SearchError::ParseError {
                reason: format!("search response JSON parsing failed: {e}"),
            })
    }
}
