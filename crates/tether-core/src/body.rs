//! Plain value types exchanged between the reel model and a physics world.

use nalgebra::{Point2, Vector2};

/// Snapshot of the tethered body taken at the start of a step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TetheredBody {
    /// Position of the body origin in world coordinates.
    pub position: Point2<f32>,
    /// Linear velocity in world coordinates.
    pub velocity: Vector2<f32>,
    /// Body mass.
    pub mass: f32,
}

impl TetheredBody {
    pub const fn new(position: Point2<f32>, velocity: Vector2<f32>, mass: f32) -> Self {
        Self {
            position,
            velocity,
            mass,
        }
    }

    /// A body at rest.
    pub fn at_rest(position: Point2<f32>, mass: f32) -> Self {
        Self::new(position, Vector2::zeros(), mass)
    }
}

/// Visual state of the spool after a view update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpoolView {
    /// Radius of the outermost wound layer.
    pub radius: f32,
    /// Accumulated spool rotation (rad).
    pub angle: f32,
}
