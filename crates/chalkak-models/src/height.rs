//! Standing height samples.

/// A live camera height above the ground plane, in meters.
pub type HeightSample = f64;

/// The ideal camera height for a session, in meters.
pub type TargetHeight = f64;
