//! Engine-agnostic physics backend trait.
//!
//! Any physics engine implements [`PhysicsBackend`] and passes it to
//! [`TetherPhysicsPlugin::new`](super::TetherPhysicsPlugin::new).

use bevy::app::App;

/// Trait that concrete physics engines must implement.
///
/// The backend is responsible for:
/// - Inserting its world resource (which implements
///   [`TetherWorld`](crate::world::TetherWorld)) and the matching
///   [`Reels`](crate::systems::Reels) resource
/// - Registering the reel step in [`TetherSet::Reel`](crate::TetherSet::Reel)
/// - Registering its own step in [`TetherSet::Simulate`](crate::TetherSet::Simulate)
pub trait PhysicsBackend: Send + Sync + 'static {
    /// Called once during plugin build to insert engine-specific resources
    /// and register systems.
    fn build(&self, app: &mut App);

    /// Human-readable engine name (e.g., "rapier2d").
    fn name(&self) -> &str;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
