//! Transport error types.

use thiserror::Error;

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;

/// Errors that stop a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP listener could not be bound.
    #[error("Failed to bind to {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP server stopped with an I/O failure.
    #[error("HTTP server stopped: {0}")]
    Serve(#[source] std::io::Error),

    /// The rmcp STDIO session could not be established.
    #[error("STDIO session failed to start: {0}")]
    StdioInit(String),

    /// The rmcp STDIO session ended with an error.
    #[error("STDIO session ended abnormally: {0}")]
    StdioSession(String),
}

impl TransportError {
    /// Create a bind error.
    pub fn bind(address: impl Into<String>, source: std::io::Error) -> Self {
        Self::Bind {
            address: address.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_bind_error_keeps_source() {
        let source = std::io::Error::new(std::io::ErrorKind::AddrInUse, "address in use");
        let err = TransportError::bind("127.0.0.1:8080", source);
        assert_eq!(
            err.to_string(),
            "Failed to bind to 127.0.0.1:8080: address in use"
        );
        assert!(err.source().is_some());
    }
}
