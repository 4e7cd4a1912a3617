//! Scenario inputs, the quantity to solve for, and the result record
//!
//! Flat and banked roads, with or without friction, share one set of formulas;
//! the scenario is described by two closed enums instead of separate code paths.

use crate::error::DomainError;
use crate::formulas::{
    angle_from_centripetal_force, centripetal_force, friction_and_slipping, normal_force,
    velocity_from_centripetal_force,
};

/// Road profile
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Banking {
    /// Unbanked road (angle 0°)
    #[default]
    Flat,
    /// Road tilted toward the centre of the curve
    Banked { angle_degrees: f64 },
}

impl Banking {
    /// Bank angle in degrees, 0 for a flat road
    pub fn angle_degrees(&self) -> f64 {
        match self {
            Banking::Flat => 0.0,
            Banking::Banked { angle_degrees } => *angle_degrees,
        }
    }
}

/// Whether static friction between tyres and road is modelled
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Friction {
    /// Frictionless road (μ = 0)
    #[default]
    Excluded,
    Included { coefficient: f64 },
}

impl Friction {
    /// Static friction coefficient, 0 when friction is excluded
    pub fn coefficient(&self) -> f64 {
        match self {
            Friction::Excluded => 0.0,
            Friction::Included { coefficient } => *coefficient,
        }
    }
}

/// Quantity the calculator solves for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Quantity {
    #[default]
    CentripetalForce,
    NormalForce,
    Velocity,
    Angle,
    Friction,
}

impl Quantity {
    pub const ALL: [Quantity; 5] = [
        Quantity::CentripetalForce,
        Quantity::NormalForce,
        Quantity::Velocity,
        Quantity::Angle,
        Quantity::Friction,
    ];

    /// Human readable name
    pub fn label(&self) -> &'static str {
        match self {
            Quantity::CentripetalForce => "Centripetal Force",
            Quantity::NormalForce => "Normal Force",
            Quantity::Velocity => "Velocity",
            Quantity::Angle => "Angle",
            Quantity::Friction => "Friction",
        }
    }
}

/// Known values describing the car and the curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioInputs {
    /// Mass of the car in kg
    pub mass: f64,
    /// Radius of the curve in m
    pub radius: f64,
    /// Speed of the car in m/s
    pub velocity: f64,
    pub banking: Banking,
    pub friction: Friction,
    /// Known centripetal force in N. When `None` it follows from m, v and r.
    pub centripetal_force: Option<f64>,
}

impl ScenarioInputs {
    /// Flat, frictionless curve
    pub fn new(mass: f64, radius: f64, velocity: f64) -> Self {
        Self {
            mass,
            radius,
            velocity,
            banking: Banking::Flat,
            friction: Friction::Excluded,
            centripetal_force: None,
        }
    }

    pub fn banked(mut self, angle_degrees: f64) -> Self {
        self.banking = Banking::Banked { angle_degrees };
        self
    }

    pub fn with_friction(mut self, coefficient: f64) -> Self {
        self.friction = Friction::Included { coefficient };
        self
    }

    pub fn with_centripetal_force(mut self, force: f64) -> Self {
        self.centripetal_force = Some(force);
        self
    }

    /// Centripetal force the car needs: the known value if given, else m * v² / r
    pub fn required_centripetal_force(&self) -> Result<f64, DomainError> {
        match self.centripetal_force {
            Some(force) => Ok(force),
            None => centripetal_force(self.mass, self.velocity, self.radius),
        }
    }
}

/// Result of a single calculation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComputationResult {
    /// N
    CentripetalForce(f64),
    /// N
    NormalForce(f64),
    /// m/s
    Velocity(f64),
    /// Bank angle in radians
    Angle(f64),
    Friction { force: f64, is_slipping: bool },
}

impl ComputationResult {
    pub fn quantity(&self) -> Quantity {
        match self {
            ComputationResult::CentripetalForce(_) => Quantity::CentripetalForce,
            ComputationResult::NormalForce(_) => Quantity::NormalForce,
            ComputationResult::Velocity(_) => Quantity::Velocity,
            ComputationResult::Angle(_) => Quantity::Angle,
            ComputationResult::Friction { .. } => Quantity::Friction,
        }
    }

    /// Numeric value in its display unit (angles in degrees)
    pub fn display_value(&self) -> f64 {
        match *self {
            ComputationResult::CentripetalForce(force)
            | ComputationResult::NormalForce(force)
            | ComputationResult::Friction { force, .. } => force,
            ComputationResult::Velocity(velocity) => velocity,
            ComputationResult::Angle(radians) => radians.to_degrees(),
        }
    }
}

/// Solve for `quantity` given the scenario
pub fn compute(
    quantity: Quantity,
    inputs: &ScenarioInputs,
) -> Result<ComputationResult, DomainError> {
    let result = match quantity {
        Quantity::CentripetalForce => ComputationResult::CentripetalForce(centripetal_force(
            inputs.mass,
            inputs.velocity,
            inputs.radius,
        )?),
        Quantity::NormalForce => ComputationResult::NormalForce(normal_force(
            inputs.mass,
            inputs.banking.angle_degrees(),
        )?),
        Quantity::Velocity => ComputationResult::Velocity(velocity_from_centripetal_force(
            inputs.required_centripetal_force()?,
            inputs.mass,
            inputs.radius,
        )?),
        Quantity::Angle => ComputationResult::Angle(angle_from_centripetal_force(
            inputs.required_centripetal_force()?,
            inputs.mass,
        )?),
        Quantity::Friction => {
            let normal = normal_force(inputs.mass, inputs.banking.angle_degrees())?;
            let outcome = friction_and_slipping(
                inputs.friction.coefficient(),
                normal,
                inputs.required_centripetal_force()?,
            )?;
            ComputationResult::Friction {
                force: outcome.friction_force,
                is_slipping: outcome.is_slipping,
            }
        }
    };
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn textbook() -> ScenarioInputs {
        ScenarioInputs::new(1000.0, 50.0, 30.0)
    }

    #[test]
    fn test_compute_centripetal_force() {
        assert_eq!(
            compute(Quantity::CentripetalForce, &textbook()),
            Ok(ComputationResult::CentripetalForce(18000.0))
        );
    }

    #[test]
    fn test_compute_normal_force_flat_and_banked() {
        assert_eq!(
            compute(Quantity::NormalForce, &textbook()),
            Ok(ComputationResult::NormalForce(10000.0))
        );

        let banked = compute(Quantity::NormalForce, &textbook().banked(30.0)).unwrap();
        assert_relative_eq!(banked.display_value(), 11547.01, epsilon = 0.01);
    }

    #[test]
    fn test_compute_normal_force_vertical_bank_fails() {
        assert_eq!(
            compute(Quantity::NormalForce, &textbook().banked(90.0)),
            Err(DomainError::UndefinedNormalForce)
        );
    }

    #[test]
    fn test_velocity_uses_known_centripetal_force() {
        let derived = compute(Quantity::Velocity, &textbook()).unwrap();
        assert_relative_eq!(derived.display_value(), 30.0, epsilon = 1e-9);

        let known = textbook().with_centripetal_force(5000.0);
        let result = compute(Quantity::Velocity, &known).unwrap();
        assert_relative_eq!(result.display_value(), 250.0_f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_angle_result_is_radians() {
        let inputs = textbook().with_centripetal_force(10000.0);
        let result = compute(Quantity::Angle, &inputs).unwrap();
        match result {
            ComputationResult::Angle(radians) => {
                assert_relative_eq!(radians, std::f64::consts::FRAC_PI_4, epsilon = 1e-12)
            }
            other => panic!("unexpected result {other:?}"),
        }
        assert_relative_eq!(result.display_value(), 45.0, epsilon = 1e-9);
    }

    #[test]
    fn test_friction_worked_example() {
        let inputs = textbook().banked(30.0).with_friction(0.5);
        let result = compute(Quantity::Friction, &inputs).unwrap();
        match result {
            ComputationResult::Friction { force, is_slipping } => {
                assert!(is_slipping);
                assert_relative_eq!(force, 5773.5, epsilon = 0.01);
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn test_friction_holds_on_gentle_curve() {
        // Flat road, μ = 0.9: max friction 9000 N, needed 1000 * 10² / 50 = 2000 N
        let inputs = ScenarioInputs::new(1000.0, 50.0, 10.0).with_friction(0.9);
        assert_eq!(
            compute(Quantity::Friction, &inputs),
            Ok(ComputationResult::Friction {
                force: 2000.0,
                is_slipping: false,
            })
        );
    }

    #[test]
    fn test_frictionless_scenario_slips() {
        let result = compute(Quantity::Friction, &textbook().banked(30.0)).unwrap();
        assert_eq!(
            result,
            ComputationResult::Friction {
                force: 0.0,
                is_slipping: true,
            }
        );
    }

    #[test]
    fn test_errors_propagate() {
        let inputs = ScenarioInputs::new(1000.0, 0.0, 30.0);
        assert_eq!(
            compute(Quantity::Velocity, &inputs),
            Err(DomainError::ZeroRadius(0.0))
        );
        let negative = textbook().with_centripetal_force(-1.0);
        assert!(matches!(
            compute(Quantity::Velocity, &negative),
            Err(DomainError::NegativeRadicand(_))
        ));
    }

    #[test]
    fn test_result_reports_its_quantity() {
        for quantity in Quantity::ALL {
            let inputs = textbook().banked(20.0).with_friction(0.3);
            let result = compute(quantity, &inputs).unwrap();
            assert_eq!(result.quantity(), quantity);
        }
    }
}
