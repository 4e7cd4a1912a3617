//! Domain errors raised when a formula's physical precondition does not hold

/// The physical precondition a calculation violated.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum DomainError {
    #[error("radius must be greater than zero (got {0} m)")]
    ZeroRadius(f64),

    #[error("mass must be greater than zero (got {0} kg)")]
    NonPositiveMass(f64),

    #[error("normal force is undefined at a 90 degree bank")]
    UndefinedNormalForce,

    #[error("bank angle must be between 0 and 90 degrees (got {0})")]
    AngleOutOfRange(f64),

    #[error("cannot take the square root of a negative value ({0})")]
    NegativeRadicand(f64),

    #[error("friction coefficient must not be negative (got {0})")]
    NegativeFrictionCoefficient(f64),

    #[error("{0} is not a finite number")]
    NonFinite(&'static str),
}

impl DomainError {
    /// Short kebab-case name of the violated precondition
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::ZeroRadius(_) => "zero-radius",
            DomainError::NonPositiveMass(_) => "non-positive-mass",
            DomainError::UndefinedNormalForce => "undefined-normal-force-at-90-degrees",
            DomainError::AngleOutOfRange(_) => "angle-out-of-range",
            DomainError::NegativeRadicand(_) => "negative-radicand",
            DomainError::NegativeFrictionCoefficient(_) => "negative-friction-coefficient",
            DomainError::NonFinite(_) => "non-finite",
        }
    }
}
