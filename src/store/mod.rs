//! External image store collaborator.
//!
//! Composites are transient buffers inside this service; durability lives
//! in an external store reached over HTTPS. The store hands back a public
//! URL for every accepted upload.

pub mod error;
pub mod http;

pub use error::StoreError;
pub use http::HttpImageStore;

use async_trait::async_trait;

/// Durable image persistence.
///
/// `store` uploads encoded image bytes under the given folder and id and
/// returns the durable public URL assigned by the store.
#[async_trait]
pub trait ImageStore: Send + Sync {
    async fn store(&self, bytes: &[u8], folder: &str, id: &str) -> Result<String, StoreError>;
}
