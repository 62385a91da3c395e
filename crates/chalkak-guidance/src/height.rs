//! Standing height tracking against a target height.

/// Height offsets are saturated to ±this many centimeters.
pub const HEIGHT_DISPLAY_RANGE_CM: f64 = 90.0;

/// Height offset for display, in centimeters.
///
/// The sign is inverted so a camera held too low yields a positive offset
/// (the marker points up), and the result is clamped to the display range.
#[inline]
pub fn height_offset_cm(measured_m: f64, target_m: f64) -> f64 {
    let raw = (measured_m - target_m) * -1.0 * 100.0;
    raw.clamp(-HEIGHT_DISPLAY_RANGE_CM, HEIGHT_DISPLAY_RANGE_CM)
}

/// Tracks the latest height offset for a target standing height.
#[derive(Debug, Clone)]
pub struct HeightTracker {
    target_m: f64,
    offset_cm: Option<f64>,
}

impl HeightTracker {
    /// Create a tracker for an ideal height in meters.
    pub fn new(target_m: f64) -> Self {
        Self {
            target_m,
            offset_cm: None,
        }
    }

    /// Ingest a measured height (meters) and return the clamped offset.
    #[inline]
    pub fn update(&mut self, measured_m: f64) -> f64 {
        let offset = height_offset_cm(measured_m, self.target_m);
        self.offset_cm = Some(offset);
        offset
    }

    /// Latest offset in centimeters.
    pub fn offset_cm(&self) -> Option<f64> {
        self.offset_cm
    }

    /// True if the latest offset is strictly within `tolerance_cm`.
    pub fn is_within(&self, tolerance_cm: f64) -> bool {
        self.offset_cm.map_or(false, |offset| offset.abs() < tolerance_cm)
    }
}
