//! Reel configurations for known hardware.

use crate::config::{ReactiveConfig, ReelConfig};

/// Reel hardware presets.
pub mod reels {
    use super::ReelConfig;

    /// Small geared DC motor (0.245 Nm stall, 41 rpm) on a 3 mm shaft with a
    /// 7.5 mm core, carrying 2 m of 1 mm line.
    pub fn phone_tether() -> ReelConfig {
        ReelConfig::default()
    }

    /// Same motor with a short 500 mm tether, for tight test rigs.
    pub fn short_tether() -> ReelConfig {
        ReelConfig {
            tether_length: 500.0,
            ..ReelConfig::default()
        }
    }
}

/// Engagement presets.
pub mod reactive {
    use super::ReactiveConfig;

    /// Drop-catch tuning: engage 200 units out, pull on the left end of a
    /// 20-unit-long body.
    pub fn drop_catch() -> ReactiveConfig {
        ReactiveConfig {
            engage_distance: 200.0,
            force_multiplier: 2000.0,
            tether_offset: [-5.0, 0.0],
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_tether_valid() {
        let cfg = reels::phone_tether();
        assert!(cfg.validate().is_ok());
        assert!((cfg.inner_radius() - 9.0).abs() < f32::EPSILON);
    }

    #[test]
    fn short_tether_valid() {
        let cfg = reels::short_tether();
        assert!(cfg.validate().is_ok());
        assert!((cfg.tether_length - 500.0).abs() < f32::EPSILON);
    }

    #[test]
    fn drop_catch_valid() {
        let cfg = reactive::drop_catch();
        assert!(cfg.validate().is_ok());
        assert!((cfg.engage_distance - 200.0).abs() < f32::EPSILON);
    }
}
