//! [`RapierBackend`]: concrete physics backend using raw `rapier2d`.

use bevy::prelude::*;
use tether_core::config::SimConfig;

use crate::backend::PhysicsBackend;
use crate::plugin::TetherSet;
use crate::systems::{Reels, reel_step_system};

use super::context::RapierContext;
use super::systems::rapier_step_system;

/// Raw rapier2d physics backend.
///
/// Inserts a [`RapierContext`] built from its [`SimConfig`] and an empty
/// [`Reels<RapierContext>`], then registers the reel step in
/// [`TetherSet::Reel`] and the world step in [`TetherSet::Simulate`] on the
/// `Update` schedule.
#[derive(Clone, Debug, Default)]
pub struct RapierBackend {
    config: SimConfig,
}

impl RapierBackend {
    pub const fn new(config: SimConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &SimConfig {
        &self.config
    }
}

impl PhysicsBackend for RapierBackend {
    fn build(&self, app: &mut App) {
        app.insert_resource(RapierContext::from_config(&self.config))
            .init_resource::<Reels<RapierContext>>()
            .add_systems(
                Update,
                (
                    reel_step_system::<RapierContext>.in_set(TetherSet::Reel),
                    rapier_step_system.in_set(TetherSet::Simulate),
                ),
            );
        debug!(
            "tether: rapier2d backend at {:.0} Hz, gravity ({}, {})",
            self.config.hz(),
            self.config.gravity[0],
            self.config.gravity[1]
        );
    }

    fn name(&self) -> &str {
        "rapier2d"
    }
}
