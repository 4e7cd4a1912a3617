//! Equations and result sentences shown next to each calculation

use curve_physics::{ComputationResult, DomainError, Quantity};

/// Equation displayed for a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Equation {
    pub heading: &'static str,
    /// LaTeX source, kept for export and copy/paste
    pub latex: &'static str,
    /// Same equation with Unicode symbols, drawn in the window
    pub display: &'static str,
}

pub fn equation_for(quantity: Quantity) -> Equation {
    match quantity {
        Quantity::CentripetalForce => Equation {
            heading: "Centripetal Force Calculation",
            latex: r"F_c = \frac{m v^2}{r}",
            display: "F_c = m·v² / r",
        },
        Quantity::NormalForce => Equation {
            heading: "Normal Force Calculation",
            latex: r"F_N = \frac{m g}{\cos(\theta)}",
            display: "F_N = m·g / cos(θ)",
        },
        Quantity::Velocity => Equation {
            heading: "Velocity Calculation",
            latex: r"v = \sqrt{\frac{F_c \cdot r}{m}}",
            display: "v = √(F_c·r / m)",
        },
        Quantity::Angle => Equation {
            heading: "Angle Calculation",
            latex: r"\theta = \tan^{-1}\left(\frac{F_c}{m g}\right)",
            display: "θ = tan⁻¹(F_c / (m·g))",
        },
        Quantity::Friction => Equation {
            heading: "Friction Calculation",
            latex: r"f = \min\left(F_c, \mu_s F_N\right)",
            display: "f = min(F_c, μ_s·F_N)",
        },
    }
}

/// Sentence reporting a result, rounded to two decimals
pub fn describe_result(result: &ComputationResult) -> String {
    match *result {
        ComputationResult::CentripetalForce(force) => {
            format!("The centripetal force is: {force:.2} N")
        }
        ComputationResult::NormalForce(force) => format!("The normal force is: {force:.2} N"),
        ComputationResult::Velocity(velocity) => {
            format!("The velocity of the car is: {velocity:.2} m/s")
        }
        ComputationResult::Angle(radians) => format!(
            "The angle of the banked curve is: {:.2} degrees",
            radians.to_degrees()
        ),
        ComputationResult::Friction { force, is_slipping } => {
            if is_slipping {
                format!(
                    "The friction force is: {force:.2} N. Friction is insufficient, the car is slipping."
                )
            } else {
                format!("The friction force is: {force:.2} N. The car holds the curve without slipping.")
            }
        }
    }
}

/// User-facing message for a calculation that could not be performed
pub fn describe_error(quantity: Quantity, error: &DomainError) -> String {
    format!(
        "Cannot calculate {}: {error}",
        quantity.label().to_lowercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_quantity_has_an_equation() {
        for quantity in Quantity::ALL {
            let equation = equation_for(quantity);
            assert!(!equation.heading.is_empty());
            assert!(!equation.latex.is_empty());
            assert!(!equation.display.is_empty());
        }
    }

    #[test]
    fn test_centripetal_equation() {
        let equation = equation_for(Quantity::CentripetalForce);
        assert_eq!(equation.latex, r"F_c = \frac{m v^2}{r}");
    }

    #[test]
    fn test_results_use_two_decimals() {
        assert_eq!(
            describe_result(&ComputationResult::CentripetalForce(18000.0)),
            "The centripetal force is: 18000.00 N"
        );
        assert_eq!(
            describe_result(&ComputationResult::NormalForce(11547.005383792515)),
            "The normal force is: 11547.01 N"
        );
        assert_eq!(
            describe_result(&ComputationResult::Velocity(15.811388300841896)),
            "The velocity of the car is: 15.81 m/s"
        );
    }

    #[test]
    fn test_angle_is_reported_in_degrees() {
        let result = ComputationResult::Angle(std::f64::consts::FRAC_PI_4);
        assert_eq!(
            describe_result(&result),
            "The angle of the banked curve is: 45.00 degrees"
        );
    }

    #[test]
    fn test_friction_reports_slip_verdict() {
        let slipping = describe_result(&ComputationResult::Friction {
            force: 5773.5,
            is_slipping: true,
        });
        assert!(slipping.starts_with("The friction force is: 5773.50 N"));
        assert!(slipping.contains("slipping"));

        let holding = describe_result(&ComputationResult::Friction {
            force: 2000.0,
            is_slipping: false,
        });
        assert!(holding.contains("without slipping"));
    }

    #[test]
    fn test_error_message() {
        let message = describe_error(Quantity::NormalForce, &DomainError::UndefinedNormalForce);
        assert_eq!(
            message,
            "Cannot calculate normal force: normal force is undefined at a 90 degree bank"
        );
    }
}
