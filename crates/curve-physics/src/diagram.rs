//! Free-body force vectors for the car on the curve
//!
//! Vectors live in the radial plane of the curve: +x points toward the centre of
//! the turn, +y points up.

use glam::DVec2;

use crate::constants::G;
use crate::error::DomainError;
use crate::formulas::{friction_and_slipping, normal_force};
use crate::scenario::{Friction, ScenarioInputs};

/// Relative mismatch below which the bank alone is taken to supply the turn
const BALANCE_TOLERANCE: f64 = 1e-9;

/// Forces acting on the car, resolved into the radial plane
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceDiagram {
    /// Bank angle in radians
    pub bank_angle: f64,
    /// Gravity, straight down
    pub weight: DVec2,
    /// Road reaction, perpendicular to the road surface
    pub normal: DVec2,
    /// Static friction, along the road surface toward the centre
    pub friction: DVec2,
    /// Horizontal force the turn demands
    pub required_centripetal: DVec2,
    pub is_slipping: bool,
}

impl ForceDiagram {
    pub fn new(inputs: &ScenarioInputs) -> Result<Self, DomainError> {
        let angle_degrees = inputs.banking.angle_degrees();
        let theta = angle_degrees.to_radians();

        let normal_magnitude = normal_force(inputs.mass, angle_degrees)?;
        let required = inputs.required_centripetal_force()?;
        let outcome =
            friction_and_slipping(inputs.friction.coefficient(), normal_magnitude, required)?;

        let surface_normal = DVec2::new(theta.sin(), theta.cos());
        // Down the slope, which on a banked curve also points inward
        let down_slope = DVec2::new(theta.cos(), -theta.sin());

        let mut diagram = Self {
            bank_angle: theta,
            weight: DVec2::new(0.0, -inputs.mass * G),
            normal: surface_normal * normal_magnitude,
            friction: down_slope * outcome.friction_force,
            required_centripetal: DVec2::new(required, 0.0),
            is_slipping: outcome.is_slipping,
        };

        // Without friction only the bank can turn the car, so it holds exactly
        // when the inward component of the normal force meets the demand.
        if inputs.friction == Friction::Excluded {
            let shortfall = (diagram.net().x - required).abs();
            diagram.is_slipping = shortfall > BALANCE_TOLERANCE * required.abs().max(1.0);
        }

        Ok(diagram)
    }

    /// Sum of the forces the road and gravity actually apply
    pub fn net(&self) -> DVec2 {
        self.weight + self.normal + self.friction
    }

    /// Largest vector magnitude, used to scale the drawing
    pub fn max_magnitude(&self) -> f64 {
        [
            self.weight,
            self.normal,
            self.friction,
            self.required_centripetal,
            self.net(),
        ]
        .iter()
        .map(|force| force.length())
        .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::{compute, ComputationResult, Quantity};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_flat_frictionless_balances_vertically() {
        let diagram = ForceDiagram::new(&ScenarioInputs::new(1000.0, 50.0, 30.0)).unwrap();

        assert_eq!(diagram.weight, DVec2::new(0.0, -10000.0));
        assert_abs_diff_eq!(diagram.normal.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(diagram.normal.y, 10000.0, epsilon = 1e-9);
        assert_eq!(diagram.friction, DVec2::ZERO);
        assert_abs_diff_eq!(diagram.net().length(), 0.0, epsilon = 1e-9);
        assert!(diagram.is_slipping);
    }

    #[test]
    fn test_banked_normal_supplies_horizontal_force() {
        let inputs = ScenarioInputs::new(1000.0, 50.0, 30.0).banked(30.0);
        let diagram = ForceDiagram::new(&inputs).unwrap();

        // Vertical part of N cancels the weight; the horizontal part is m g tan θ
        assert_relative_eq!(diagram.normal.y, 10000.0, epsilon = 1e-6);
        let expected_inward = 10000.0 * 30.0_f64.to_radians().tan();
        assert_relative_eq!(diagram.net().x, expected_inward, epsilon = 1e-6);
        assert_abs_diff_eq!(diagram.net().y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_frictionless_bank_at_design_speed_holds() {
        // tan 45° = v² / (r g) with v = √500, r = 50
        let inputs = ScenarioInputs::new(1000.0, 50.0, 500.0_f64.sqrt()).banked(45.0);
        let diagram = ForceDiagram::new(&inputs).unwrap();

        assert_relative_eq!(diagram.net().x, 10000.0, epsilon = 1e-6);
        assert_relative_eq!(diagram.required_centripetal.x, 10000.0, epsilon = 1e-6);
        assert!(!diagram.is_slipping);

        // The friction calculation itself still has nothing to offer at μ = 0
        assert!(matches!(
            compute(Quantity::Friction, &inputs),
            Ok(ComputationResult::Friction {
                is_slipping: true,
                ..
            })
        ));
    }

    #[test]
    fn test_frictionless_bank_off_design_speed_slips() {
        let too_fast = ScenarioInputs::new(1000.0, 50.0, 30.0).banked(45.0);
        assert!(ForceDiagram::new(&too_fast).unwrap().is_slipping);

        let too_slow = ScenarioInputs::new(1000.0, 50.0, 10.0).banked(45.0);
        assert!(ForceDiagram::new(&too_slow).unwrap().is_slipping);
    }

    #[test]
    fn test_friction_points_down_the_slope() {
        let inputs = ScenarioInputs::new(1000.0, 50.0, 30.0)
            .banked(30.0)
            .with_friction(0.5);
        let diagram = ForceDiagram::new(&inputs).unwrap();

        assert!(diagram.is_slipping);
        assert_relative_eq!(diagram.friction.length(), 5773.5, epsilon = 0.01);
        assert!(diagram.friction.x > 0.0);
        assert!(diagram.friction.y < 0.0);
        // Along the road surface, so perpendicular to the normal force
        assert_abs_diff_eq!(diagram.friction.dot(diagram.normal), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_max_magnitude() {
        let diagram = ForceDiagram::new(&ScenarioInputs::new(1000.0, 50.0, 30.0)).unwrap();
        assert_eq!(diagram.max_magnitude(), 18000.0);
    }

    #[test]
    fn test_vertical_bank_has_no_diagram() {
        let inputs = ScenarioInputs::new(1000.0, 50.0, 30.0).banked(90.0);
        assert_eq!(
            ForceDiagram::new(&inputs),
            Err(DomainError::UndefinedNormalForce)
        );
    }
}
