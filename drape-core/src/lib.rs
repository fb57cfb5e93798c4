//! Drape Core - Shared building blocks
//!
//! Configuration, the JSON wire types of the search API, tracing setup and
//! the top-level error type used by the server and the command line.

pub mod config;
pub mod product;
pub mod tracing_setup;

// Re-export main types for convenient access
pub use config::DrapeConfig;
pub use product::{
    DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE, PLACEHOLDER_IMAGE_URL, Product, SearchRequest, SearchResponse, format_price,
};

/// Core errors that can bubble up from any Drape subsystem.
#[derive(Debug, thiserror::Error)]
pub enum DrapeError {
    #[error("Configuration error: {reason}")]
    Configuration { reason: String },

    #[error("Invalid endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
}

impl DrapeError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            DrapeError::Configuration { .. } => "Configuration error occurred".to_string(),
            DrapeError::InvalidEndpoint { endpoint, .. } => {
                format!("Search endpoint is not a valid URL: {endpoint}")
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, DrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_messages() {
        let err = DrapeError::InvalidEndpoint {
            endpoint: "nope".to_string(),
            reason: "relative URL without a base".to_string(),
        };
        assert_eq!(
            err.user_message(),
            "Search endpoint is not a valid URL: nope"
        );
        assert_eq!(
            err.to_string(),
            "Invalid endpoint 'nope': relative URL without a base"
        );

        let config = DrapeError::Configuration {
            reason: "tracing already initialized".to_string(),
        };
        assert_eq!(config.user_message(), "Configuration error occurred");
    }
}
