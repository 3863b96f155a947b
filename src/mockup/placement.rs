//! Placement geometry for product mockups.
//!
//! Each product type maps to a fixed box on its template photo: the artwork
//! is resized to the box and blended at the box's offset. The table is built
//! once at startup from configuration and never changes afterwards.
//!
//! A lookup miss means the product type has no rule; callers treat it as a
//! skippable condition, never a fatal error.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Pixel-space placement of artwork on a product template.
///
/// `x`/`y` are measured from the template's top-left corner. The artwork is
/// resized to exactly `width` x `height`; aspect ratio is not preserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacementRule {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Immutable product-name keyed placement lookup.
#[derive(Debug, Clone)]
pub struct PlacementTable {
    rules: HashMap<String, PlacementRule>,
}

impl PlacementTable {
    /// Build a table from configured rules.
    pub fn new(rules: HashMap<String, PlacementRule>) -> Self {
        Self { rules }
    }

    /// Built-in table covering the stock product catalog.
    ///
    /// Used when the configuration file does not define a `placements`
    /// section of its own.
    pub fn builtin() -> Self {
        let mut rules = HashMap::new();
        rules.insert(
            "T-Shirt".to_string(),
            PlacementRule {
                x: 200,
                y: 180,
                width: 400,
                height: 400,
            },
        );
        rules.insert(
            "Hoodie".to_string(),
            PlacementRule {
                x: 220,
                y: 220,
                width: 360,
                height: 360,
            },
        );
        rules.insert(
            "Mug".to_string(),
            PlacementRule {
                x: 140,
                y: 120,
                width: 260,
                height: 260,
            },
        );
        rules.insert(
            "Poster".to_string(),
            PlacementRule {
                x: 60,
                y: 60,
                width: 680,
                height: 880,
            },
        );
        rules.insert(
            "Tote Bag".to_string(),
            PlacementRule {
                x: 180,
                y: 260,
                width: 340,
                height: 340,
            },
        );
        rules.insert(
            "Phone Case".to_string(),
            PlacementRule {
                x: 90,
                y: 160,
                width: 220,
                height: 380,
            },
        );
        Self { rules }
    }

    /// Exact-match lookup by product-type name.
    pub fn lookup(&self, name: &str) -> Option<&PlacementRule> {
        self.rules.get(name)
    }

    /// Number of configured rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
