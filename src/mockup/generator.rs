//! Batch mockup generation.
//!
//! The artwork is fetched once per batch; each product is then processed in
//! input order: placement lookup, template fetch, composite, encode. A
//! failure for one product is recorded and skipped so that one bad product
//! never blocks the rest; only a failure to resolve the artwork itself
//! aborts the batch.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use super::compositor;
use super::error::MockupError;
use super::fetcher::ImageFetch;
use super::placement::PlacementTable;

/// Opaque product identifier, echoed back exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProductId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductId::Number(n) => write!(f, "{}", n),
            ProductId::Text(s) => f.write_str(s),
        }
    }
}

/// One product to composite in a batch.
#[derive(Debug, Clone)]
pub struct ProductRequest {
    pub id: ProductId,
    pub name: String,
    pub base_image_url: String,
}

/// A successfully composited mockup, ready for upload.
#[derive(Debug, Clone)]
pub struct Mockup {
    pub product_id: ProductId,
    pub product_name: String,
    /// PNG-encoded composite
    pub image: Vec<u8>,
}

/// Why a product was dropped from the batch.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// No placement rule exists for the product-type name
    NoPlacementRule,
    /// The template image could not be fetched
    BaseFetchFailed(String),
    /// The template image bytes could not be decoded
    DecodeFailed(String),
    /// Resize, blend, or encode failed for this product
    CompositeFailed(String),
}

impl SkipReason {
    /// Stable label for metrics and log fields.
    pub fn label(&self) -> &'static str {
        match self {
            SkipReason::NoPlacementRule => "no_placement_rule",
            SkipReason::BaseFetchFailed(_) => "base_fetch_failed",
            SkipReason::DecodeFailed(_) => "decode_failed",
            SkipReason::CompositeFailed(_) => "composite_failed",
        }
    }
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoPlacementRule => write!(f, "no placement rule for product type"),
            SkipReason::BaseFetchFailed(msg) => write!(f, "base image fetch failed: {}", msg),
            SkipReason::DecodeFailed(msg) => write!(f, "base image decode failed: {}", msg),
            SkipReason::CompositeFailed(msg) => write!(f, "compositing failed: {}", msg),
        }
    }
}

/// A skipped product and why, for the diagnostics channel.
#[derive(Debug, Clone)]
pub struct SkippedProduct {
    pub id: ProductId,
    pub name: String,
    pub reason: SkipReason,
}

/// Outcome of one batch: successes in input order plus recorded skips.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub mockups: Vec<Mockup>,
    pub skipped: Vec<SkippedProduct>,
}

/// Stateless batch transform from artwork plus products to composites.
///
/// Holds only immutable collaborators; every invocation works on buffers
/// local to that call.
pub struct MockupGenerator {
    fetcher: Arc<dyn ImageFetch>,
    placements: PlacementTable,
}

impl MockupGenerator {
    pub fn new(fetcher: Arc<dyn ImageFetch>, placements: PlacementTable) -> Self {
        Self {
            fetcher,
            placements,
        }
    }

    /// Generate one composite per product.
    ///
    /// The artwork is fetched once; failure to resolve or decode it aborts
    /// the whole batch with no partial output. Per-product failures are
    /// recorded as skips and the batch continues. Successes preserve the
    /// relative order of their input entries.
    pub async fn generate(
        &self,
        source_url: &str,
        products: &[ProductRequest],
    ) -> Result<BatchOutcome, MockupError> {
        let source = match self.fetcher.fetch(source_url).await {
            Ok(img) => img,
            Err(MockupError::Fetch(msg)) | Err(MockupError::Decode(msg)) => {
                return Err(MockupError::source_fetch(msg));
            }
            Err(e) => return Err(e),
        };

        tracing::debug!(
            source_url = %source_url,
            width = source.width(),
            height = source.height(),
            products = products.len(),
            "Fetched result image"
        );

        let mut outcome = BatchOutcome::default();

        for product in products {
            let Some(rule) = self.placements.lookup(&product.name) else {
                record_skip(&mut outcome, product, SkipReason::NoPlacementRule);
                continue;
            };

            let template = match self.fetcher.fetch(&product.base_image_url).await {
                Ok(img) => img,
                Err(MockupError::Decode(msg)) => {
                    record_skip(&mut outcome, product, SkipReason::DecodeFailed(msg));
                    continue;
                }
                Err(e) => {
                    record_skip(
                        &mut outcome,
                        product,
                        SkipReason::BaseFetchFailed(e.to_string()),
                    );
                    continue;
                }
            };

            let image = match compositor::composite(&source, &template, rule)
                .and_then(|canvas| compositor::encode_png(&canvas))
            {
                Ok(bytes) => bytes,
                Err(e) => {
                    record_skip(
                        &mut outcome,
                        product,
                        SkipReason::CompositeFailed(e.to_string()),
                    );
                    continue;
                }
            };

            outcome.mockups.push(Mockup {
                product_id: product.id.clone(),
                product_name: product.name.clone(),
                image,
            });
        }

        Ok(outcome)
    }
}

fn record_skip(outcome: &mut BatchOutcome, product: &ProductRequest, reason: SkipReason) {
    tracing::warn!(
        product_id = %product.id,
        product_name = %product.name,
        reason = %reason,
        "Skipping product"
    );
    outcome.skipped.push(SkippedProduct {
        id: product.id.clone(),
        name: product.name.clone(),
        reason,
    });
}
