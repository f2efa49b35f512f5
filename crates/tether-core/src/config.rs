use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

// ---------------------------------------------------------------------------
// Serde default functions
// ---------------------------------------------------------------------------

const fn default_dt() -> f32 {
    1.0 / 60.0
}
const fn default_gravity() -> [f32; 2] {
    [0.0, 900.0]
}
const fn default_damping() -> f32 {
    0.1
}
const fn default_max_torque() -> f32 {
    0.245
}
const fn default_max_rpm() -> f32 {
    41.0
}
const fn default_shaft_diameter() -> f32 {
    3.0
}
const fn default_inner_radius_padding() -> f32 {
    7.5
}
const fn default_tether_diameter() -> f32 {
    1.0
}
const fn default_packing_factor() -> f32 {
    2.0
}
const fn default_tether_length() -> f32 {
    2000.0
}
const fn default_engage_distance() -> f32 {
    1000.0
}
const fn default_force_multiplier() -> f32 {
    2000.0
}
const fn default_tether_offset() -> [f32; 2] {
    [0.0, 0.0]
}

fn check_positive(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} (must be finite and > 0)"),
        ))
    }
}

fn check_non_negative(field: &str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} (must be finite and >= 0)"),
        ))
    }
}

// ---------------------------------------------------------------------------
// SimConfig
// ---------------------------------------------------------------------------

/// World stepping parameters.
///
/// Coordinates follow screen convention (y grows downward), so the default
/// gravity points along `+y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimConfig {
    /// Physics timestep in seconds (default: 1/60).
    #[serde(default = "default_dt")]
    pub dt: f32,

    /// Gravity vector [x, y] in world units/s^2.
    #[serde(default = "default_gravity")]
    pub gravity: [f32; 2],

    /// Fraction of velocity a free body keeps after one second (default: 0.1).
    #[serde(default = "default_damping")]
    pub damping: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: default_dt(),
            gravity: default_gravity(),
            damping: default_damping(),
        }
    }
}

impl SimConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("sim.dt", self.dt)?;
        if !self.gravity.iter().all(|g| g.is_finite()) {
            return Err(ConfigError::invalid("sim.gravity", "must be finite"));
        }
        if !(self.damping > 0.0 && self.damping <= 1.0) {
            return Err(ConfigError::invalid(
                "sim.damping",
                format!("{} (must be in (0, 1])", self.damping),
            ));
        }
        Ok(())
    }

    /// Step rate in Hz.
    pub fn hz(&self) -> f32 {
        1.0 / self.dt
    }

    /// Exponential linear damping coefficient equivalent to [`Self::damping`].
    ///
    /// `v(t) = v0 * damping^t = v0 * exp(-c * t)` gives `c = -ln(damping)`.
    pub fn linear_damping(&self) -> f32 {
        -self.damping.ln()
    }

    /// Angular counterpart of [`Self::linear_damping`]; spin decays at the
    /// same rate as linear velocity.
    pub fn angular_damping(&self) -> f32 {
        self.linear_damping()
    }
}

// ---------------------------------------------------------------------------
// ReelConfig
// ---------------------------------------------------------------------------

/// Motor and tether characteristics of a reel.
///
/// Lengths share the world's length unit (millimetres for the default
/// hardware).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReelConfig {
    /// Motor stall torque (Nm).
    #[serde(default = "default_max_torque")]
    pub max_torque: f32,

    /// Motor no-load speed (revolutions per minute).
    #[serde(default = "default_max_rpm")]
    pub max_rpm: f32,

    /// Motor shaft diameter.
    #[serde(default = "default_shaft_diameter")]
    pub shaft_diameter: f32,

    /// Spool core thickness added on top of the shaft radius.
    #[serde(default = "default_inner_radius_padding")]
    pub inner_radius_padding: f32,

    /// Diameter of the tether line.
    #[serde(default = "default_tether_diameter")]
    pub tether_diameter: f32,

    /// How tightly the line packs per wound layer (unitless).
    #[serde(default = "default_packing_factor")]
    pub packing_factor: f32,

    /// Total line on the spool, i.e. the longest the tether can pay out.
    #[serde(default = "default_tether_length")]
    pub tether_length: f32,
}

impl Default for ReelConfig {
    fn default() -> Self {
        Self {
            max_torque: default_max_torque(),
            max_rpm: default_max_rpm(),
            shaft_diameter: default_shaft_diameter(),
            inner_radius_padding: default_inner_radius_padding(),
            tether_diameter: default_tether_diameter(),
            packing_factor: default_packing_factor(),
            tether_length: default_tether_length(),
        }
    }
}

impl ReelConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("reel.max_torque", self.max_torque)?;
        check_positive("reel.max_rpm", self.max_rpm)?;
        check_non_negative("reel.shaft_diameter", self.shaft_diameter)?;
        check_non_negative("reel.inner_radius_padding", self.inner_radius_padding)?;
        check_positive("reel.tether_diameter", self.tether_diameter)?;
        check_positive("reel.packing_factor", self.packing_factor)?;
        check_positive("reel.tether_length", self.tether_length)?;
        check_positive("reel inner radius", self.inner_radius())?;
        Ok(())
    }

    /// Radius of the bare spool core.
    pub fn inner_radius(&self) -> f32 {
        self.shaft_diameter.mul_add(0.5, self.inner_radius_padding)
    }

    /// Motor no-load speed in revolutions per second.
    pub fn max_hz(&self) -> f32 {
        self.max_rpm / 60.0
    }
}

// ---------------------------------------------------------------------------
// ReactiveConfig
// ---------------------------------------------------------------------------

/// Engagement and force-application parameters of a world-bound reel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactiveConfig {
    /// Distance from the anchor beyond which the reel latches engaged.
    #[serde(default = "default_engage_distance")]
    pub engage_distance: f32,

    /// Multiplier handed to the force model each engaged step.
    #[serde(default = "default_force_multiplier")]
    pub force_multiplier: f32,

    /// Tether attachment point in the tethered body's local frame.
    #[serde(default = "default_tether_offset")]
    pub tether_offset: [f32; 2],
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            engage_distance: default_engage_distance(),
            force_multiplier: default_force_multiplier(),
            tether_offset: default_tether_offset(),
        }
    }
}

impl ReactiveConfig {
    /// Validate configuration. Returns Err on invalid values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_non_negative("reactive.engage_distance", self.engage_distance)?;
        check_non_negative("reactive.force_multiplier", self.force_multiplier)?;
        if !self.tether_offset.iter().all(|c| c.is_finite()) {
            return Err(ConfigError::invalid(
                "reactive.tether_offset",
                "must be finite",
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// TetherConfig
// ---------------------------------------------------------------------------

/// Complete configuration file: one section per concern.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TetherConfig {
    #[serde(default)]
    pub sim: SimConfig,
    #[serde(default)]
    pub reel: ReelConfig,
    #[serde(default)]
    pub reactive: ReactiveConfig,
}

impl TetherConfig {
    /// Validate every section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.sim.validate()?;
        self.reel.validate()?;
        self.reactive.validate()
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from TOML file.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- defaults ----

    #[test]
    fn reel_config_default_values() {
        let cfg = ReelConfig::default();
        assert!((cfg.max_torque - 0.245).abs() < f32::EPSILON);
        assert!((cfg.max_rpm - 41.0).abs() < f32::EPSILON);
        assert!((cfg.tether_length - 2000.0).abs() < f32::EPSILON);
        assert!((cfg.packing_factor - 2.0).abs() < f32::EPSILON);
        assert!((cfg.tether_diameter - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reel_config_inner_radius_is_shaft_radius_plus_padding() {
        let cfg = ReelConfig::default();
        // 3.0 / 2 + 7.5 = 9.0
        assert!((cfg.inner_radius() - 9.0).abs() < f32::EPSILON);
    }

    #[test]
    fn reel_config_max_hz() {
        let cfg = ReelConfig {
            max_rpm: 120.0,
            ..ReelConfig::default()
        };
        assert!((cfg.max_hz() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn sim_config_default_values() {
        let cfg = SimConfig::default();
        assert!((cfg.hz() - 60.0).abs() < 1e-3);
        assert!((cfg.gravity[1] - 900.0).abs() < f32::EPSILON);
        assert!((cfg.damping - 0.1).abs() < f32::EPSILON);
    }

    #[test]
    fn sim_config_linear_damping_matches_velocity_fraction() {
        let cfg = SimConfig::default();
        let c = cfg.linear_damping();
        // After one second exp(-c) must equal the kept fraction.
        assert!(((-c).exp() - 0.1).abs() < 1e-6);
        assert!((cfg.angular_damping() - c).abs() < f32::EPSILON);
    }

    #[test]
    fn sim_config_no_damping_is_zero_coefficient() {
        let cfg = SimConfig {
            damping: 1.0,
            ..SimConfig::default()
        };
        assert!(cfg.linear_damping().abs() < f32::EPSILON);
    }

    // ---- validate ----

    #[test]
    fn default_config_validates() {
        assert!(TetherConfig::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_rpm() {
        let cfg = ReelConfig {
            max_rpm: 0.0,
            ..ReelConfig::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "reel.max_rpm"));
    }

    #[test]
    fn validate_rejects_nan_tether_length() {
        let cfg = ReelConfig {
            tether_length: f32::NAN,
            ..ReelConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_inner_radius() {
        let cfg = ReelConfig {
            shaft_diameter: 0.0,
            inner_radius_padding: 0.0,
            ..ReelConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn validate_rejects_damping_out_of_range() {
        for damping in [0.0, -0.5, 1.5] {
            let cfg = SimConfig {
                damping,
                ..SimConfig::default()
            };
            assert!(cfg.validate().is_err(), "damping {damping} accepted");
        }
    }

    #[test]
    fn validate_rejects_negative_engage_distance() {
        let cfg = ReactiveConfig {
            engage_distance: -1.0,
            ..ReactiveConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    // ---- TOML ----

    #[test]
    fn toml_partial_sections_fill_defaults() {
        let toml_str = r"
            [reel]
            tether_length = 500.0

            [reactive]
            engage_distance = 200.0
            tether_offset = [-5.0, 0.0]
        ";
        let cfg = TetherConfig::from_toml_str(toml_str).unwrap();
        assert!((cfg.reel.tether_length - 500.0).abs() < f32::EPSILON);
        assert!((cfg.reel.max_torque - 0.245).abs() < f32::EPSILON);
        assert!((cfg.reactive.engage_distance - 200.0).abs() < f32::EPSILON);
        assert!((cfg.reactive.tether_offset[0] + 5.0).abs() < f32::EPSILON);
        assert_eq!(cfg.sim, SimConfig::default());
    }

    #[test]
    fn toml_empty_is_default() {
        let cfg = TetherConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, TetherConfig::default());
    }

    #[test]
    fn toml_invalid_value_rejected() {
        let err = TetherConfig::from_toml_str("[reel]\npacking_factor = -2.0\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn toml_syntax_error_is_toml_variant() {
        let err = TetherConfig::from_toml_str("[reel\n").unwrap_err();
        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn default_config_serializes_and_reloads() {
        let text = toml::to_string(&TetherConfig::default()).unwrap();
        let cfg = TetherConfig::from_toml_str(&text).unwrap();
        assert_eq!(cfg, TetherConfig::default());
    }

    #[test]
    fn from_file_reads_and_validates() {
        let dir = std::env::temp_dir().join("tether_test_config");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("reel.toml");
        std::fs::write(&path, "[sim]\ndamping = 0.5\n").unwrap();
        let cfg = TetherConfig::from_file(&path).unwrap();
        assert!((cfg.sim.damping - 0.5).abs() < f32::EPSILON);
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn from_file_missing_is_io_error() {
        let err = TetherConfig::from_file("/nonexistent/tether.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
