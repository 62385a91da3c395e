//! Labelled subject regions reported by the detection provider.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::NormalizedRect;

/// One detected subject region in the current camera frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
pub struct BoundingBox {
    /// Subject category (e.g. "person", "dog")
    #[validate(length(min = 1))]
    pub label: String,
    /// Region in normalized frame coordinates
    #[validate(nested)]
    pub rect: NormalizedRect,
}

impl BoundingBox {
    /// Create a new bounding box.
    pub fn new(label: impl Into<String>, rect: NormalizedRect) -> Self {
        Self {
            label: label.into(),
            rect,
        }
    }

    /// Returns true if both boxes describe the same subject category.
    #[inline]
    pub fn same_label(&self, other: &BoundingBox) -> bool {
        self.label == other.label
    }

    /// Intersection over Union with another box, ignoring labels.
    #[inline]
    pub fn iou(&self, other: &BoundingBox) -> f64 {
        self.rect.iou(&other.rect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_label() {
        let a = BoundingBox::new("person", NormalizedRect::new(0.1, 0.1, 0.2, 0.2));
        let b = BoundingBox::new("person", NormalizedRect::new(0.5, 0.5, 0.2, 0.2));
        let c = BoundingBox::new("dog", NormalizedRect::new(0.1, 0.1, 0.2, 0.2));
        assert!(a.same_label(&b));
        assert!(!a.same_label(&c));
    }

    #[test]
    fn test_validate_rejects_empty_label() {
        let bbox = BoundingBox::new("", NormalizedRect::new(0.1, 0.1, 0.2, 0.2));
        assert!(bbox.validate().is_err());
    }

    #[test]
    fn test_validate_checks_rect() {
        let bbox = BoundingBox::new("person", NormalizedRect::new(0.9, 0.1, 0.2, 0.2));
        assert!(bbox.validate().is_err());
    }
}
