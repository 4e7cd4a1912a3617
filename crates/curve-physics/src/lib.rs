//! # Banked Curve Physics Engine
//!
//! Closed-form formulas for a car moving on a circular curve that may be banked
//! and may have friction: centripetal force, normal force, velocity, bank angle
//! and the static friction / slipping decision.

pub mod constants;
pub mod diagram;
pub mod error;
pub mod formulas;
pub mod scenario;

pub use constants::*;
pub use diagram::*;
pub use error::*;
pub use formulas::*;
pub use scenario::*;
