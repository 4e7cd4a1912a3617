//! Closed-form formulas for a car on a (possibly banked, possibly frictional) curve
//!
//! Every function is a pure evaluation of its arguments. Preconditions are
//! checked up front and reported as [`DomainError`] instead of producing
//! `inf` or `NaN`.

use crate::constants::{G, MAX_ANGLE_DEGREES};
use crate::error::DomainError;

/// Friction actually exerted by the road and whether the car slips
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrictionOutcome {
    /// Friction force in N
    pub friction_force: f64,
    /// True when the available friction cannot hold the turn
    pub is_slipping: bool,
}

fn finite(name: &'static str, value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::NonFinite(name))
    }
}

fn positive_mass(mass: f64) -> Result<f64, DomainError> {
    let mass = finite("mass", mass)?;
    if mass <= 0.0 {
        return Err(DomainError::NonPositiveMass(mass));
    }
    Ok(mass)
}

fn positive_radius(radius: f64) -> Result<f64, DomainError> {
    let radius = finite("radius", radius)?;
    if radius <= 0.0 {
        return Err(DomainError::ZeroRadius(radius));
    }
    Ok(radius)
}

/// Centripetal force needed to hold a circular path
/// F_c = m * v² / r
pub fn centripetal_force(mass: f64, velocity: f64, radius: f64) -> Result<f64, DomainError> {
    let mass = positive_mass(mass)?;
    let radius = positive_radius(radius)?;
    let velocity = finite("velocity", velocity)?;

    finite("centripetal force", mass * velocity * velocity / radius)
}

/// Normal force on a frictionless banked curve, using g = 10 m/s²
/// F_N = m * g / cos(θ)
///
/// Valid for θ in [0°, 90°). At 0° this is the weight of the car.
pub fn normal_force(mass: f64, angle_degrees: f64) -> Result<f64, DomainError> {
    normal_force_with_gravity(mass, angle_degrees, G)
}

/// [`normal_force`] with an explicit gravitational acceleration
pub fn normal_force_with_gravity(
    mass: f64,
    angle_degrees: f64,
    gravity: f64,
) -> Result<f64, DomainError> {
    let mass = positive_mass(mass)?;
    let gravity = finite("gravity", gravity)?;
    let angle_degrees = finite("angle", angle_degrees)?;

    if !(0.0..=MAX_ANGLE_DEGREES).contains(&angle_degrees) {
        return Err(DomainError::AngleOutOfRange(angle_degrees));
    }
    // cos(90°) evaluates to ~6e-17 rather than zero, so test the angle itself.
    if angle_degrees == MAX_ANGLE_DEGREES {
        return Err(DomainError::UndefinedNormalForce);
    }

    finite(
        "normal force",
        mass * gravity / angle_degrees.to_radians().cos(),
    )
}

/// Speed that a given centripetal force sustains on a curve
/// v = √(F_c * r / m)
pub fn velocity_from_centripetal_force(
    centripetal_force: f64,
    mass: f64,
    radius: f64,
) -> Result<f64, DomainError> {
    let mass = positive_mass(mass)?;
    let radius = positive_radius(radius)?;
    let centripetal_force = finite("centripetal force", centripetal_force)?;

    let radicand = centripetal_force * radius / mass;
    if radicand < 0.0 {
        return Err(DomainError::NegativeRadicand(radicand));
    }

    finite("velocity", radicand.sqrt())
}

/// Bank angle (radians) at which a centripetal force is supplied without friction,
/// using g = 10 m/s²
/// θ = atan(F_c / (m * g))
pub fn angle_from_centripetal_force(
    centripetal_force: f64,
    mass: f64,
) -> Result<f64, DomainError> {
    angle_from_centripetal_force_with_gravity(centripetal_force, mass, G)
}

/// [`angle_from_centripetal_force`] with an explicit gravitational acceleration
pub fn angle_from_centripetal_force_with_gravity(
    centripetal_force: f64,
    mass: f64,
    gravity: f64,
) -> Result<f64, DomainError> {
    let mass = positive_mass(mass)?;
    let gravity = finite("gravity", gravity)?;
    let centripetal_force = finite("centripetal force", centripetal_force)?;

    finite("angle", (centripetal_force / (mass * gravity)).atan())
}

/// Static friction decision for a car that needs `required_centripetal_force`
///
/// The road can supply at most μ * F_N. If that covers the demand, static friction
/// matches the demand exactly and the car holds the turn (a tie counts as holding).
/// Otherwise the car slips and the road only delivers the maximum.
pub fn friction_and_slipping(
    friction_coefficient: f64,
    normal_force: f64,
    required_centripetal_force: f64,
) -> Result<FrictionOutcome, DomainError> {
    let friction_coefficient = finite("friction coefficient", friction_coefficient)?;
    let normal_force = finite("normal force", normal_force)?;
    let required = finite("centripetal force", required_centripetal_force)?;

    if friction_coefficient < 0.0 {
        return Err(DomainError::NegativeFrictionCoefficient(friction_coefficient));
    }

    let max_friction = friction_coefficient * normal_force;

    let outcome = if max_friction >= required {
        FrictionOutcome {
            friction_force: required,
            is_slipping: false,
        }
    } else {
        FrictionOutcome {
            friction_force: max_friction,
            is_slipping: true,
        }
    };
    Ok(outcome)
}
