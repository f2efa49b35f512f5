//! Rapier physics step system.

use bevy::prelude::*;

use super::context::RapierContext;

/// Integrate the world by one timestep, consuming the forces reels applied
/// earlier in the frame.
pub fn rapier_step_system(mut context: ResMut<RapierContext>) {
    context.step();
}
