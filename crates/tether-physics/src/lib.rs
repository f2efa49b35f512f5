// tether-physics: Hosts tether reels in a physics world.
//
// A `TetherWorld` trait lets a reel reach bodies, spools and joints through
// handles without owning them. `ReactiveReel` drives a core `Reel` against
// such a world. The rapier2d backend implements the trait on `RapierContext`
// and the plugin schedules reel steps before each world step.

pub mod backend;
pub mod plugin;
pub mod rapier;
pub mod reactive;
pub mod systems;
pub mod visual;
pub mod world;

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        backend::PhysicsBackend,
        plugin::{TetherPhysicsPlugin, TetherSet},
        rapier::{RapierBackend, RapierContext},
        reactive::{Engagement, ReactiveReel, ReelStep},
        systems::{ReelFault, ReelStats, Reels},
        visual::{SpoolVisualizer, TetherSample, TrajectoryRecorder},
        world::{SlideJoint, TetherWorld},
    };
}

// Re-export the plugin at crate root for convenience.
pub use plugin::{TetherPhysicsPlugin, TetherSet};

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
