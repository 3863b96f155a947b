//! Mockup pipeline error types.

use std::fmt;

/// Errors that can occur while generating mockups.
#[derive(Debug, Clone)]
pub enum MockupError {
    /// The result image could not be resolved; aborts the whole batch
    SourceFetch(String),

    /// An image could not be fetched from its URL
    Fetch(String),

    /// Image bytes could not be decoded
    Decode(String),

    /// Resize operation failed
    Resize(String),

    /// Encoding the composite failed
    Encode(String),

    /// Invalid pipeline configuration
    Config(String),
}

impl fmt::Display for MockupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SourceFetch(msg) => write!(f, "Failed to fetch result image: {}", msg),
            Self::Fetch(msg) => write!(f, "Failed to fetch image: {}", msg),
            Self::Decode(msg) => write!(f, "Failed to decode image: {}", msg),
            Self::Resize(msg) => write!(f, "Resize failed: {}", msg),
            Self::Encode(msg) => write!(f, "Failed to encode composite: {}", msg),
            Self::Config(msg) => write!(f, "Mockup configuration error: {}", msg),
        }
    }
}

impl std::error::Error for MockupError {}

impl MockupError {
    /// Helper constructors for common error patterns
    pub fn source_fetch(msg: impl Into<String>) -> Self {
        Self::SourceFetch(msg.into())
    }

    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    pub fn resize(msg: impl Into<String>) -> Self {
        Self::Resize(msg.into())
    }

    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Whether this error aborts the whole batch rather than one product.
    pub fn is_batch_fatal(&self) -> bool {
        matches!(self, Self::SourceFetch(_) | Self::Config(_))
    }
}
