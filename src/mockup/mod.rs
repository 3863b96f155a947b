//! Mockup generation pipeline.
//!
//! Turns one rendered artwork image plus a list of target products into one
//! composite image per product: the artwork is resized to a per-product-type
//! placement box and source-over blended onto the product's template photo.
//!
//! # Features
//!
//! - **Static placement table** keyed by product-type name, loaded once at
//!   startup (configuration-as-data, with a built-in default catalog)
//! - **Batch semantics**: source fetch failure aborts the batch; any
//!   per-product failure is logged, recorded, and skipped
//! - **Deterministic compositing**: exact-box Lanczos3 resize plus
//!   Porter-Duff source-over blending with edge clipping
//!
//! # Configuration Example
//!
//! ```yaml
//! placements:
//!   T-Shirt:
//!     x: 200
//!     y: 180
//!     width: 400
//!     height: 400
//!   Mug:
//!     x: 140
//!     y: 120
//!     width: 260
//!     height: 260
//! ```

pub mod compositor;
pub mod error;
pub mod fetcher;
pub mod generator;
pub mod placement;

// Re-export main types for convenience
pub use compositor::{composite, encode_png, overlay, resize_to_box};
pub use error::MockupError;
pub use fetcher::{HttpImageFetcher, ImageFetch};
pub use generator::{
    BatchOutcome, Mockup, MockupGenerator, ProductId, ProductRequest, SkipReason, SkippedProduct,
};
pub use placement::{PlacementRule, PlacementTable};
