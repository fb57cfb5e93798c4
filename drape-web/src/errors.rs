//! Web server errors

use drape_search::CatalogError;

/// Errors that stop the web server from starting or running.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Listener could not be bound
    #[error("Failed to bind {address}: {source}")]
    Bind {
        /// Address that could not be bound
        address: String,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// Server stopped with an I/O error
    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),

    /// Catalog could not be loaded at startup
    #[error("Catalog unavailable: {0}")]
    Catalog(#[from] CatalogError),
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn test_bind_error_keeps_address_and_cause() {
        let err = WebError::Bind {
            address: "127.0.0.1:8000".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use"),
        };

        assert_eq!(
            err.to_string(),
            "Failed to bind 127.0.0.1:8000: address in use"
        );
        assert!(err.source().is_some());
    }
}
