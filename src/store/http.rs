//! Unsigned-upload HTTP client for the image store.
//!
//! Speaks the unsigned upload contract common to hosted image CDNs: the
//! image travels as a base64 data URI in a JSON body together with an
//! optional upload preset, a folder, and a caller-chosen public id; the
//! store answers with the durable URL in `secure_url` (or `url`).

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::Deserialize;
use std::time::Duration;

use super::error::StoreError;
use super::ImageStore;
use crate::config::StoreConfig;

/// HTTP image store client.
pub struct HttpImageStore {
    client: reqwest::Client,
    upload_url: String,
    upload_preset: Option<String>,
}

impl HttpImageStore {
    /// Create a store client from the store configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the HTTP client cannot be created.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| StoreError::config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            upload_url: config.upload_url.clone(),
            upload_preset: config.upload_preset.clone(),
        })
    }
}

/// Upload response body. Stores answer with `secure_url`; some deployments
/// only populate `url`.
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: Option<String>,
    url: Option<String>,
}

#[async_trait]
impl ImageStore for HttpImageStore {
    async fn store(&self, bytes: &[u8], folder: &str, id: &str) -> Result<String, StoreError> {
        let payload = upload_payload(bytes, self.upload_preset.as_deref(), folder, id);

        let response = self
            .client
            .post(&self.upload_url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| StoreError::upload(format!("Upload request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(StoreError::upload(format!(
                "Upload failed with status: {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| StoreError::response(format!("Failed to parse upload response: {}", e)))?;

        body.secure_url
            .or(body.url)
            .ok_or_else(|| StoreError::response("Upload response carried no URL"))
    }
}

/// Build the unsigned-upload JSON body.
fn upload_payload(
    bytes: &[u8],
    preset: Option<&str>,
    folder: &str,
    id: &str,
) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "file": format!("data:image/png;base64,{}", BASE64.encode(bytes)),
        "folder": folder,
        "public_id": id,
    });

    if let Some(preset) = preset {
        payload["upload_preset"] = serde_json::Value::String(preset.to_string());
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoreConfig;

    fn store_config() -> StoreConfig {
        StoreConfig {
            upload_url: "https://api.example.com/v1/image/upload".to_string(),
            upload_preset: Some("unsigned_mockups".to_string()),
            folder: "mockups".to_string(),
            timeout_seconds: 60,
        }
    }

    #[test]
    fn test_store_creation() {
        assert!(HttpImageStore::new(&store_config()).is_ok());
    }

    #[test]
    fn test_upload_payload_encodes_data_uri() {
        let payload = upload_payload(&[1, 2, 3], Some("preset"), "mockups", "abc-123");

        let file = payload["file"].as_str().unwrap();
        assert!(file.starts_with("data:image/png;base64,"));
        assert_eq!(payload["folder"], "mockups");
        assert_eq!(payload["public_id"], "abc-123");
        assert_eq!(payload["upload_preset"], "preset");
    }

    #[test]
    fn test_upload_payload_omits_missing_preset() {
        let payload = upload_payload(&[1, 2, 3], None, "mockups", "abc-123");
        assert!(payload.get("upload_preset").is_none());
    }

    #[test]
    fn test_upload_response_prefers_secure_url() {
        let body: UploadResponse = serde_json::from_str(
            r#"{"secure_url": "https://cdn.example.com/a.png", "url": "http://cdn.example.com/a.png"}"#,
        )
        .unwrap();
        assert_eq!(
            body.secure_url.or(body.url).as_deref(),
            Some("https://cdn.example.com/a.png")
        );
    }

    #[test]
    fn test_upload_response_falls_back_to_url() {
        let body: UploadResponse =
            serde_json::from_str(r#"{"url": "http://cdn.example.com/a.png"}"#).unwrap();
        assert_eq!(
            body.secure_url.or(body.url).as_deref(),
            Some("http://cdn.example.com/a.png")
        );
    }
}
