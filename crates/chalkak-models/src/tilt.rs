//! Device tilt expressed as two angular components.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Device orientation in degrees.
///
/// `degree_x` is the left/right roll of the device, `degree_z` the
/// forward/backward pitch.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
pub struct Tilt {
    pub degree_x: f64,
    pub degree_z: f64,
}

/// A live orientation sample from the tracking provider.
pub type TiltSample = Tilt;

/// The reference orientation captured with a guide.
pub type TargetTilt = Tilt;

impl Tilt {
    /// Create a new tilt.
    pub fn new(degree_x: f64, degree_z: f64) -> Self {
        Self { degree_x, degree_z }
    }

    /// Returns true if both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.degree_x.is_finite() && self.degree_z.is_finite()
    }
}
