//! Error types for product search.

use std::path::PathBuf;

use thiserror::Error;

/// Message shown to users for every kind of search failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch results. Please try again.";

/// Errors that can occur during search operations.
#[derive(Debug, Error)]
pub enum SearchError {
    /// Request parameters were rejected before ranking.
    #[error("Invalid search request: {reason}")]
    InvalidRequest {
        /// Why the request was rejected
        reason: String,
    },

    /// Network communication error occurred during search.
    #[error("Network error: {reason}")]
    NetworkError {
        /// The reason for the network error
        reason: String,
    },

    /// Search service answered with a non-success status.
    #[error("Search service returned HTTP {status}")]
    HttpStatus {
        /// HTTP status code returned by the service
        status: u16,
    },

    /// Failed to parse the search response body.
    #[error("Parse error: {reason}")]
    ParseError {
        /// The reason for the parse error
        reason: String,
    },

    /// Product catalog could not be loaded.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl SearchError {
    /// Message suitable for display; every failure collapses to the same text.
    pub fn user_message(&self) -> &'static str {
        FETCH_FAILED_MESSAGE
    }

    /// Whether the caller sent parameters the service refuses.
    pub fn is_invalid_request(&self) -> bool {
        matches!(self, SearchError::InvalidRequest { .. })
    }
}

/// Errors raised while loading a product catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        /// Catalog location
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Catalog file is not a JSON array of products.
    #[error("Failed to parse catalog {path}: {reason}")]
    Parse {
        /// Catalog location
        path: PathBuf,
        /// Parser message
        reason: String,
    },
}
