//! Capability interface between a reel and the physics world that owns its
//! bodies.
//!
//! The reel never owns bodies or joints; it holds the world's handles and
//! reaches the world only through [`TetherWorld`], so any engine (or a test
//! double) can host it.

use std::fmt::Debug;

use rapier2d::na::{Point2, Vector2};
use tether_core::body::{SpoolView, TetheredBody};

// ---------------------------------------------------------------------------
// SlideJoint
// ---------------------------------------------------------------------------

/// Distance constraint between two body-local anchor points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SlideJoint {
    /// Anchor on the spool body (local coordinates).
    pub local_anchor1: Point2<f32>,
    /// Anchor on the tethered body (local coordinates).
    pub local_anchor2: Point2<f32>,
    /// Minimum separation.
    pub min: f32,
    /// Maximum separation.
    pub max: f32,
}

impl SlideJoint {
    /// Hard length cap for a tether of `length`: body origins, `[0, length]`.
    pub fn tether(length: f32) -> Self {
        Self {
            local_anchor1: Point2::origin(),
            local_anchor2: Point2::origin(),
            min: 0.0,
            max: length,
        }
    }
}

// ---------------------------------------------------------------------------
// TetherWorld
// ---------------------------------------------------------------------------

/// Operations a physics world must offer to host a reactive reel.
///
/// Forces applied through [`apply_force_at_point`](Self::apply_force_at_point)
/// act on the next world step only.
pub trait TetherWorld {
    /// Handle of a dynamic body.
    type BodyHandle: Copy + Debug + Send + Sync + 'static;
    /// Handle of the fixed body representing a spool.
    type SpoolHandle: Copy + Debug + Send + Sync + 'static;
    /// Handle of a registered constraint.
    type JointHandle: Copy + Debug + Send + Sync + 'static;

    /// Position, velocity and mass of a body, or `None` if it is gone.
    fn body(&self, handle: Self::BodyHandle) -> Option<TetheredBody>;

    /// Transform a body-local point to world coordinates.
    fn local_to_world(&self, handle: Self::BodyHandle, local: Point2<f32>) -> Option<Point2<f32>>;

    /// Accumulate `force` at world-space `point`.  Returns `false` if the
    /// body is gone.
    fn apply_force_at_point(
        &mut self,
        handle: Self::BodyHandle,
        force: Vector2<f32>,
        point: Point2<f32>,
    ) -> bool;

    /// Register a fixed spool body at `position` with a shape of `radius`.
    fn add_spool(&mut self, position: Point2<f32>, radius: f32) -> Self::SpoolHandle;

    /// Push the spool's current radius and rotation to its world body.
    fn update_spool(&mut self, handle: Self::SpoolHandle, view: &SpoolView);

    /// Register a slide joint between a spool and a body.
    fn add_slide_joint(
        &mut self,
        spool: Self::SpoolHandle,
        target: Self::BodyHandle,
        joint: SlideJoint,
    ) -> Self::JointHandle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tether_joint_spans_zero_to_length() {
        let joint = SlideJoint::tether(2000.0);
        assert!(joint.min.abs() < f32::EPSILON);
        assert!((joint.max - 2000.0).abs() < f32::EPSILON);
        assert_eq!(joint.local_anchor1, Point2::origin());
        assert_eq!(joint.local_anchor2, Point2::origin());
    }
}
