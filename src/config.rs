//! Calculator configuration
//!
//! Initial input values, widget ranges and chart sweeps. Loaded from TOML when a
//! config file exists, otherwise the defaults of the classroom example are used.

use curve_physics::{Banking, Friction, Quantity, ScenarioInputs, MAX_ANGLE_DEGREES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a config file
pub const CONFIG_ENV: &str = "BANKED_CURVE_CONFIG";

/// Config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "banked-curve.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub inputs: InputConfig,
    pub ranges: RangeConfig,
    pub sweeps: SweepConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Car on a Banked Curve Problem Solver".to_string(),
            width: 1280,
            height: 800,
        }
    }
}

/// Road profile as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoadKind {
    Flat,
    #[default]
    Banked,
}

/// Quantity as written in the config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuantityKind {
    #[default]
    CentripetalForce,
    NormalForce,
    Velocity,
    Angle,
    Friction,
}

impl From<QuantityKind> for Quantity {
    fn from(kind: QuantityKind) -> Self {
        match kind {
            QuantityKind::CentripetalForce => Quantity::CentripetalForce,
            QuantityKind::NormalForce => Quantity::NormalForce,
            QuantityKind::Velocity => Quantity::Velocity,
            QuantityKind::Angle => Quantity::Angle,
            QuantityKind::Friction => Quantity::Friction,
        }
    }
}

/// Starting values for the input panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// kg
    pub mass: f64,
    /// m
    pub radius: f64,
    /// m/s
    pub velocity: f64,
    /// N, used when solving for velocity and angle
    pub centripetal_force: f64,
    /// degrees
    pub angle: f64,
    pub friction_coefficient: f64,
    pub road: RoadKind,
    pub include_friction: bool,
    pub quantity: QuantityKind,
    pub auto_calculate: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            mass: 1000.0,
            radius: 50.0,
            velocity: 30.0,
            centripetal_force: 5000.0,
            angle: 30.0,
            friction_coefficient: 0.5,
            road: RoadKind::Banked,
            include_friction: false,
            quantity: QuantityKind::CentripetalForce,
            auto_calculate: true,
        }
    }
}

impl InputConfig {
    /// Engine inputs for solving `quantity`
    ///
    /// Velocity and angle are solved from the entered centripetal force; every
    /// other quantity derives the force from mass, speed and radius.
    pub fn scenario_for(&self, quantity: Quantity) -> ScenarioInputs {
        let use_known_force = matches!(quantity, Quantity::Velocity | Quantity::Angle);

        ScenarioInputs {
            mass: self.mass,
            radius: self.radius,
            velocity: self.velocity,
            banking: match self.road {
                RoadKind::Flat => Banking::Flat,
                RoadKind::Banked => Banking::Banked {
                    angle_degrees: self.angle,
                },
            },
            friction: if self.include_friction {
                Friction::Included {
                    coefficient: self.friction_coefficient,
                }
            } else {
                Friction::Excluded
            },
            centripetal_force: use_known_force.then_some(self.centripetal_force),
        }
    }
}

/// Closed interval accepted by an input widget
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: f64,
    pub max: f64,
}

impl Bounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Per-input widget ranges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    pub mass: Bounds,
    pub radius: Bounds,
    pub velocity: Bounds,
    pub centripetal_force: Bounds,
    pub angle: Bounds,
    pub friction_coefficient: Bounds,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            mass: Bounds::new(0.1, 100_000.0),
            radius: Bounds::new(1.0, 10_000.0),
            velocity: Bounds::new(1.0, 200.0),
            centripetal_force: Bounds::new(1.0, 1.0e7),
            angle: Bounds::new(0.0, MAX_ANGLE_DEGREES),
            friction_coefficient: Bounds::new(0.0, 2.0),
        }
    }
}

/// Linear sample range for a chart axis, endpoints included
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start: f64,
    pub end: f64,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    /// m/s
    pub velocity: SweepRange,
    /// degrees
    pub angle: SweepRange,
    /// N
    pub centripetal_force: SweepRange,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            velocity: SweepRange {
                start: 1.0,
                end: 100.0,
                samples: 100,
            },
            angle: SweepRange {
                start: 0.0,
                end: 90.0,
                samples: 100,
            },
            centripetal_force: SweepRange {
                start: 1.0,
                end: 50_000.0,
                samples: 100,
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    /// Parse and validate configuration from a TOML string
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Export configuration to a TOML string
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Config from `$BANKED_CURVE_CONFIG`, then `./banked-curve.toml`, then defaults
    pub fn discover() -> Result<Self, ConfigError> {
        match config_path() {
            Some(path) => {
                log::info!("Loading configuration from {}", path.display());
                Self::load_from_file(path)
            }
            None => {
                log::info!("No configuration file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let ranges = [
            ("mass", self.ranges.mass),
            ("radius", self.ranges.radius),
            ("velocity", self.ranges.velocity),
            ("centripetal_force", self.ranges.centripetal_force),
            ("angle", self.ranges.angle),
            ("friction_coefficient", self.ranges.friction_coefficient),
        ];
        for (name, bounds) in ranges {
            if !(bounds.min < bounds.max) {
                return Err(ConfigError::Validation(format!(
                    "range for {name} is empty ({} to {})",
                    bounds.min, bounds.max
                )));
            }
        }

        // Keep the widgets inside the physical domain of the formulas
        if self.ranges.mass.min <= 0.0 || self.ranges.radius.min <= 0.0 {
            return Err(ConfigError::Validation(
                "mass and radius must stay above zero".to_string(),
            ));
        }
        if self.ranges.velocity.min < 0.0 || self.ranges.friction_coefficient.min < 0.0 {
            return Err(ConfigError::Validation(
                "velocity and friction coefficient must not go below zero".to_string(),
            ));
        }
        if self.ranges.angle.min < 0.0 || self.ranges.angle.max > MAX_ANGLE_DEGREES {
            return Err(ConfigError::Validation(format!(
                "angle range must lie within 0 to {MAX_ANGLE_DEGREES} degrees"
            )));
        }

        let initial = [
            ("mass", self.inputs.mass, self.ranges.mass),
            ("radius", self.inputs.radius, self.ranges.radius),
            ("velocity", self.inputs.velocity, self.ranges.velocity),
            (
                "centripetal_force",
                self.inputs.centripetal_force,
                self.ranges.centripetal_force,
            ),
            ("angle", self.inputs.angle, self.ranges.angle),
            (
                "friction_coefficient",
                self.inputs.friction_coefficient,
                self.ranges.friction_coefficient,
            ),
        ];
        for (name, value, bounds) in initial {
            if !bounds.contains(value) {
                return Err(ConfigError::Validation(format!(
                    "initial {name} {value} is outside {} to {}",
                    bounds.min, bounds.max
                )));
            }
        }

        let sweeps = [
            ("velocity", self.sweeps.velocity),
            ("angle", self.sweeps.angle),
            ("centripetal_force", self.sweeps.centripetal_force),
        ];
        for (name, sweep) in sweeps {
            if sweep.samples < 2 {
                return Err(ConfigError::Validation(format!(
                    "{name} sweep needs at least 2 samples"
                )));
            }
            if !(sweep.start < sweep.end) {
                return Err(ConfigError::Validation(format!(
                    "{name} sweep must run from a lower to a higher value"
                )));
            }
        }

        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::Validation(
                "window size must be non-zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Some(PathBuf::from(path));
    }
    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Serialization error: {0}")]
    Serialize(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_validates() {
        assert!(AppConfig::default().validate().is_ok());
    }

    #[test]
    fn test_defaults_match_classroom_example() {
        let inputs = InputConfig::default();
        assert_eq!(inputs.mass, 1000.0);
        assert_eq!(inputs.radius, 50.0);
        assert_eq!(inputs.velocity, 30.0);
        assert_eq!(inputs.centripetal_force, 5000.0);
        assert_eq!(inputs.angle, 30.0);

        let sweeps = SweepConfig::default();
        assert_eq!(sweeps.velocity.start, 1.0);
        assert_eq!(sweeps.velocity.end, 100.0);
        assert_eq!(sweeps.velocity.samples, 100);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml_str(
            r#"
            [inputs]
            mass = 1500.0
            road = "flat"
            quantity = "normal_force"
            "#,
        )
        .unwrap();

        assert_eq!(config.inputs.mass, 1500.0);
        assert_eq!(config.inputs.road, RoadKind::Flat);
        assert_eq!(Quantity::from(config.inputs.quantity), Quantity::NormalForce);
        assert_eq!(config.inputs.radius, 50.0);
        assert_eq!(config.ranges, RangeConfig::default());
    }

    #[test]
    fn test_config_round_trips_through_toml() {
        let config = AppConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(AppConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_rejects_malformed_toml() {
        assert!(matches!(
            AppConfig::from_toml_str("[inputs\nmass = "),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_validation_errors() {
        let mut config = AppConfig::default();
        config.ranges.angle = Bounds::new(0.0, 120.0);
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = AppConfig::default();
        config.inputs.mass = 0.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = AppConfig::default();
        config.sweeps.angle.samples = 1;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        let mut config = AppConfig::default();
        config.ranges.radius = Bounds::new(0.0, 10.0);
        config.inputs.radius = 5.0;
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_scenario_from_inputs() {
        let mut inputs = InputConfig::default();
        inputs.include_friction = true;

        let scenario = inputs.scenario_for(Quantity::Friction);
        assert_eq!(
            scenario.banking,
            Banking::Banked {
                angle_degrees: 30.0
            }
        );
        assert_eq!(scenario.friction, Friction::Included { coefficient: 0.5 });
        assert_eq!(scenario.centripetal_force, None);

        inputs.road = RoadKind::Flat;
        let scenario = inputs.scenario_for(Quantity::Angle);
        assert_eq!(scenario.banking, Banking::Flat);
        assert_eq!(scenario.centripetal_force, Some(5000.0));
    }

    #[test]
    fn test_bounds() {
        let bounds = Bounds::new(1.0, 5.0);
        assert!(bounds.contains(1.0));
        assert!(bounds.contains(5.0));
        assert!(!bounds.contains(5.5));
        assert!(!bounds.contains(f64::NAN));
    }
}
