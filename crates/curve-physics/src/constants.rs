//! Physical constants for the banked curve problem
//!
//! The calculator uses a rounded gravitational acceleration so the worked
//! numbers stay easy to follow by hand.

/// Gravitational acceleration in m/s² (simplified, not 9.81)
pub const G: f64 = 10.0;

/// Largest bank angle accepted by the formulas, in degrees
pub const MAX_ANGLE_DEGREES: f64 = 90.0;
