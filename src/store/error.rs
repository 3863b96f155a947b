//! Image store error types.

use std::fmt;

/// Errors that can occur while persisting a composite.
#[derive(Debug, Clone)]
pub enum StoreError {
    /// Invalid store configuration
    Config(String),

    /// Upload request failed or was rejected
    Upload(String),

    /// The store's response could not be interpreted
    Response(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "Store configuration error: {}", msg),
            Self::Upload(msg) => write!(f, "Upload failed: {}", msg),
            Self::Response(msg) => write!(f, "Invalid store response: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

impl StoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn upload(msg: impl Into<String>) -> Self {
        Self::Upload(msg.into())
    }

    pub fn response(msg: impl Into<String>) -> Self {
        Self::Response(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StoreError::upload("status 503");
        assert_eq!(err.to_string(), "Upload failed: status 503");

        let err = StoreError::response("no URL in body");
        assert_eq!(err.to_string(), "Invalid store response: no URL in body");

        let err = StoreError::config("bad endpoint");
        assert_eq!(err.to_string(), "Store configuration error: bad endpoint");
    }
}
