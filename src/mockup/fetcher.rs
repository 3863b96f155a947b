//! Remote image resolution for the mockup pipeline.
//!
//! Images are referenced by URL in requests and resolved into decoded
//! pixels over HTTP. Fetches are bounded by the configured timeout and
//! payload cap; format is sniffed from magic bytes.

use async_trait::async_trait;
use image::io::Reader as ImageReader;
use image::DynamicImage;
use std::io::Cursor;
use std::time::Duration;

use super::error::MockupError;
use crate::config::FetchConfig;

/// Resolves an image reference into decoded pixels.
///
/// This is the seam between the batch pipeline and the network: production
/// uses [`HttpImageFetcher`], tests provide canned implementations.
#[async_trait]
pub trait ImageFetch: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<DynamicImage, MockupError>;
}

/// HTTP image fetcher with bounded timeout and payload size.
pub struct HttpImageFetcher {
    client: reqwest::Client,
    max_bytes: usize,
}

impl HttpImageFetcher {
    /// Create a fetcher from the fetch configuration.
    ///
    /// # Errors
    ///
    /// Returns `MockupError::Config` if the HTTP client cannot be created
    /// (e.g., TLS configuration issues, system resource exhaustion).
    pub fn new(config: &FetchConfig) -> Result<Self, MockupError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| MockupError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            max_bytes: config.max_image_bytes,
        })
    }
}

#[async_trait]
impl ImageFetch for HttpImageFetcher {
    async fn fetch(&self, url: &str) -> Result<DynamicImage, MockupError> {
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(MockupError::fetch(format!(
                "Unsupported image URL scheme: {}",
                url
            )));
        }

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| MockupError::fetch(format!("HTTP fetch failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(MockupError::fetch(format!(
                "HTTP request failed with status: {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| MockupError::fetch(format!("Failed to read HTTP body: {}", e)))?;

        if bytes.len() > self.max_bytes {
            return Err(MockupError::fetch(format!(
                "Image payload of {} bytes exceeds limit of {} bytes",
                bytes.len(),
                self.max_bytes
            )));
        }

        decode_image(&bytes)
    }
}

/// Decode image bytes, sniffing the format from magic bytes.
pub(crate) fn decode_image(data: &[u8]) -> Result<DynamicImage, MockupError> {
    ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| MockupError::decode(e.to_string()))?
        .decode()
        .map_err(|e| MockupError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([0, 128, 255, 255]));
        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_decode_png_bytes() {
        let data = png_bytes(4, 6);
        let img = decode_image(&data).unwrap();
        assert_eq!(img.width(), 4);
        assert_eq!(img.height(), 6);
    }

    #[test]
    fn test_decode_invalid_bytes() {
        let result = decode_image(&[0, 1, 2, 3, 4, 5]);
        assert!(matches!(result, Err(MockupError::Decode(_))));
    }

    #[test]
    fn test_fetcher_creation() {
        let config = FetchConfig::default();
        assert!(HttpImageFetcher::new(&config).is_ok());
    }

    // Test: unsupported schemes are rejected before any network activity
    #[tokio::test]
    async fn test_fetch_rejects_unknown_schemes() {
        let fetcher = HttpImageFetcher::new(&FetchConfig::default()).unwrap();

        for url in ["ftp://example.com/a.png", "file:///tmp/a.png", "not a url"] {
            let result = fetcher.fetch(url).await;
            assert!(matches!(result, Err(MockupError::Fetch(_))), "{}", url);
        }
    }
}
