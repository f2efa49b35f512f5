//! Spool geometry and motor force model for a tether reel.
//!
//! # Geometry
//!
//! Wound line occupies a fixed cross-sectional area, so the outer radius of
//! the spool follows from how much line is still wound:
//!
//! `r = sqrt(r_inner² + (L - used) / (packing · π))`
//!
//! # Force
//!
//! The motor behaves like a DC motor with a flat torque region:
//! - Unloaded (stall) line force: `F = max_torque / r`.
//! - Unloaded line speed: `v_max = 2πr · max_hz`.
//! - Full force below `0.75 · v_max`, linear falloff to zero at `v_max`.
//!
//! Near the anchor the force ramps in over `4r` so the pull does not jump
//! when the tether is almost fully wound.

use std::f32::consts::{PI, TAU};

use nalgebra::{Point2, Vector2};

use crate::body::{SpoolView, TetheredBody};
use crate::config::ReelConfig;
use crate::error::ReelError;

/// Distance cutoff before the first distance-factor evaluation.
pub const DEFAULT_DISTANCE_CUTOFF: f32 = 50.0;

/// The distance ramp spans this many spool radii.
pub const DISTANCE_CUTOFF_RADII: f32 = 4.0;

/// Empirical smoothing bias of the distance ramp.
pub const DISTANCE_FACTOR_BIAS: f32 = 5.0;

/// Fraction of the unloaded speed below which the motor delivers full force.
pub const VELOCITY_IDENTITY_FRACTION: f32 = 0.75;

// ---------------------------------------------------------------------------
// Reel
// ---------------------------------------------------------------------------

/// Motorized spool paying tether out to a single object.
///
/// Holds the static motor/tether description plus the per-step state: how
/// much line is paid out now and one step ago, and the accumulated spool
/// rotation.
#[derive(Clone, Debug)]
pub struct Reel {
    /// Motor stall torque (Nm).
    pub max_torque: f32,
    /// Motor no-load speed (rev/s).
    pub max_hz: f32,
    /// Longest length the tether can pay out.
    pub tether_length: f32,
    /// Radius of the bare spool core.
    pub inner_radius: f32,
    /// Diameter of the tether line.
    pub tether_diameter: f32,
    /// Wound-line packing factor.
    pub packing_factor: f32,
    distance_cutoff: f32,
    anchor: Option<Point2<f32>>,
    used_length: f32,
    last_used_length: f32,
    angle: f32,
}

impl Reel {
    /// Build a reel from motor and tether parameters.  The anchor is unset.
    pub fn from_parts(
        max_torque: f32,
        max_rpm: f32,
        tether_length: f32,
        inner_radius: f32,
        tether_diameter: f32,
        packing_factor: f32,
    ) -> Self {
        Self {
            max_torque,
            max_hz: max_rpm / 60.0,
            tether_length,
            inner_radius,
            tether_diameter,
            packing_factor,
            distance_cutoff: DEFAULT_DISTANCE_CUTOFF,
            anchor: None,
            used_length: 0.0,
            last_used_length: 0.0,
            angle: 0.0,
        }
    }

    /// Build a reel from a validated [`ReelConfig`].
    pub fn new(config: &ReelConfig) -> Self {
        Self::from_parts(
            config.max_torque,
            config.max_rpm,
            config.tether_length,
            config.inner_radius(),
            config.tether_diameter,
            config.packing_factor,
        )
    }

    /// Fix the spool position in world coordinates.
    pub fn with_anchor(mut self, anchor: Point2<f32>) -> Result<Self, ReelError> {
        self.set_anchor(anchor)?;
        Ok(self)
    }

    /// Fix the spool position in world coordinates.
    ///
    /// Rejects non-finite coordinates, leaving the previous anchor in place.
    pub fn set_anchor(&mut self, anchor: Point2<f32>) -> Result<(), ReelError> {
        if !(anchor.x.is_finite() && anchor.y.is_finite()) {
            return Err(ReelError::AnchorUnset);
        }
        self.anchor = Some(anchor);
        Ok(())
    }

    /// Spool position, if set.
    pub const fn anchor(&self) -> Option<Point2<f32>> {
        self.anchor
    }

    /// Tether length currently paid out.
    pub const fn used_length(&self) -> f32 {
        self.used_length
    }

    /// Tether length paid out one distance update ago.
    pub const fn last_used_length(&self) -> f32 {
        self.last_used_length
    }

    /// Accumulated spool rotation (rad).
    pub const fn angle(&self) -> f32 {
        self.angle
    }

    /// Length over which the pull ramps in, as of the last distance factor.
    pub const fn distance_cutoff(&self) -> f32 {
        self.distance_cutoff
    }

    /// Whether the whole tether is paid out.  Past this point the spool
    /// geometry is undefined.
    pub fn is_exhausted(&self) -> bool {
        self.used_length >= self.tether_length
    }

    /// Fails with [`ReelError::TetherExhausted`] once the tether is fully out.
    pub fn check_exhausted(&self) -> Result<(), ReelError> {
        if self.is_exhausted() {
            return Err(ReelError::TetherExhausted {
                used: self.used_length,
                limit: self.tether_length,
            });
        }
        Ok(())
    }

    // -- Geometry --

    /// Radius of the outermost wound layer.
    pub fn cur_radius(&self) -> f32 {
        let wound = (self.tether_length - self.used_length) / (self.packing_factor * PI);
        self.inner_radius.mul_add(self.inner_radius, wound).sqrt()
    }

    pub fn cur_circumference(&self) -> f32 {
        TAU * self.cur_radius()
    }

    /// Line force the motor can exert at the current radius (stall torque
    /// over lever arm).
    pub fn unloaded_force(&self) -> f32 {
        self.max_torque / self.cur_radius()
    }

    /// Line speed at the motor's no-load speed and the current radius.
    pub fn unloaded_speed(&self) -> f32 {
        self.cur_circumference() * self.max_hz
    }

    // -- Attenuation --

    /// Force fraction available while the object moves along the reel
    /// direction at `object_speed`.
    ///
    /// `1` below `0.75 · v_max`, then linear down to `0` at `v_max`, clamped
    /// to `[0, 1]`.
    pub fn velocity_factor(&self, object_speed: f32) -> f32 {
        let max_speed = self.unloaded_speed();
        let identity_cutoff = max_speed * VELOCITY_IDENTITY_FRACTION;
        if object_speed < identity_cutoff {
            return 1.0;
        }
        (1.0 - (object_speed - identity_cutoff) / (max_speed - identity_cutoff)).clamp(0.0, 1.0)
    }

    /// Force fraction near the anchor.
    ///
    /// Recomputes the distance cutoff as `4 · r` on every call.
    pub fn distance_factor(&mut self) -> f32 {
        self.distance_cutoff = DISTANCE_CUTOFF_RADII * self.cur_radius();
        if self.used_length > self.distance_cutoff {
            return 1.0;
        }
        let ramp = (self.distance_cutoff - self.used_length + DISTANCE_FACTOR_BIAS)
            / self.distance_cutoff;
        (1.0 - ramp).clamp(0.0, 1.0)
    }

    // -- Per-step state --

    /// Turn the length change since the last distance update into spool
    /// rotation at the current circumference.
    pub fn set_rotation_offset(&mut self) {
        let diff = self.last_used_length - self.used_length;
        let angle_delta = TAU * diff / self.cur_circumference();
        self.angle -= angle_delta;
    }

    /// Advance the spool rotation and report radius and angle together.
    ///
    /// Call exactly once per distance update so both stay in step.
    pub fn update_view(&mut self) -> SpoolView {
        self.set_rotation_offset();
        SpoolView {
            radius: self.cur_radius(),
            angle: self.angle,
        }
    }

    /// Measure the tether to an object at `position`.
    ///
    /// Shifts the current used length into the previous one and returns the
    /// unnormalized vector from the object to the anchor, i.e. the direction
    /// the motor pulls.
    pub fn update_distance(&mut self, position: Point2<f32>) -> Result<Vector2<f32>, ReelError> {
        let anchor = self.anchor.ok_or(ReelError::AnchorUnset)?;
        let direction = anchor - position;
        self.last_used_length = self.used_length;
        self.used_length = direction.norm();
        Ok(direction)
    }

    /// Pull on `body` for this step, scaled by `factor`.
    ///
    /// Returns `direction · factor · mass · velocity_factor · distance_factor`.
    /// Fails if the anchor is unset or the tether is fully paid out; the
    /// latter means the hard length cap did not hold.
    pub fn force(&mut self, body: &TetheredBody, factor: f32) -> Result<Vector2<f32>, ReelError> {
        let direction = self.update_distance(body.position)?;
        self.check_exhausted()?;
        self.update_view();

        let distance_factor = self.distance_factor();
        // Object sitting on the anchor: no line direction to pull along.
        let Some(direction) = direction.try_normalize(f32::EPSILON) else {
            return Ok(Vector2::zeros());
        };

        let speed_along = body.velocity.dot(&direction);
        let velocity_factor = self.velocity_factor(speed_along);

        Ok(direction * (factor * body.mass * velocity_factor * distance_factor))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
