use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// Tolerance for rectangles touching the frame edge.
const EDGE_EPSILON: f64 = 0.001;

/// A normalized rectangle (0.0 to 1.0) representing a relative region of a frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema, Validate)]
#[validate(schema(function = "validate_rect_extent"))]
pub struct NormalizedRect {
    /// X coordinate of the top-left corner (0.0 = left, 1.0 = right)
    #[validate(range(min = 0.0, max = 1.0))]
    pub x: f64,
    /// Y coordinate of the top-left corner (0.0 = top, 1.0 = bottom)
    #[validate(range(min = 0.0, max = 1.0))]
    pub y: f64,
    /// Width of the rectangle (0.0 to 1.0)
    #[validate(range(min = 0.0, max = 1.0))]
    pub width: f64,
    /// Height of the rectangle (0.0 to 1.0)
    #[validate(range(min = 0.0, max = 1.0))]
    pub height: f64,
}

impl NormalizedRect {
    /// Create a new normalized rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Check if the rectangle is valid (finite, non-empty, within 0.0-1.0 range).
    pub fn is_valid(&self) -> bool {
        self.is_finite()
            && self.x >= 0.0
            && self.y >= 0.0
            && self.width > 0.0
            && self.height > 0.0
            && self.x + self.width <= 1.0 + EDGE_EPSILON
            && self.y + self.height <= 1.0 + EDGE_EPSILON
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.width.is_finite() && self.height.is_finite()
    }

    /// Right edge x-coordinate.
    #[inline]
    pub fn x2(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate.
    #[inline]
    pub fn y2(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Rectangle area as a fraction of the frame.
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// Area of the overlap with another rectangle (0.0 when disjoint).
    pub fn intersection_area(&self, other: &NormalizedRect) -> f64 {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.x2().min(other.x2());
        let y2 = self.y2().min(other.y2());

        if x2 <= x1 || y2 <= y1 {
            return 0.0;
        }

        (x2 - x1) * (y2 - y1)
    }

    /// Compute Intersection over Union with another rectangle.
    pub fn iou(&self, other: &NormalizedRect) -> f64 {
        let intersection = self.intersection_area(other);
        if intersection <= 0.0 {
            return 0.0;
        }

        let union = self.area() + other.area() - intersection;

        if union > 0.0 {
            intersection / union
        } else {
            0.0
        }
    }
}

fn validate_rect_extent(rect: &NormalizedRect) -> Result<(), ValidationError> {
    if !rect.is_valid() {
        return Err(ValidationError::new("rect_out_of_frame"));
    }
    Ok(())
}
