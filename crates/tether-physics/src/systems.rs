//! Reel resources and the reel step system.

use bevy::prelude::*;
use tether_core::error::ReelError;

use crate::reactive::{ReactiveReel, ReelStep};
use crate::world::TetherWorld;

// ---------------------------------------------------------------------------
// Reels
// ---------------------------------------------------------------------------

/// Every reactive reel hosted by world `W`, stepped in insertion order.
#[derive(Resource)]
pub struct Reels<W: TetherWorld + 'static> {
    reels: Vec<ReactiveReel<W>>,
}

impl<W: TetherWorld + 'static> Default for Reels<W> {
    fn default() -> Self {
        Self { reels: Vec::new() }
    }
}

impl<W: TetherWorld + 'static> Reels<W> {
    pub fn push(&mut self, reel: ReactiveReel<W>) {
        self.reels.push(reel);
    }

    pub fn len(&self) -> usize {
        self.reels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&ReactiveReel<W>> {
        self.reels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReactiveReel<W>> {
        self.reels.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut ReactiveReel<W>> {
        self.reels.iter_mut()
    }
}

// ---------------------------------------------------------------------------
// ReelFault
// ---------------------------------------------------------------------------

/// First reel error raised.  Once set, no reel is stepped again.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct ReelFault(pub Option<ReelError>);

impl ReelFault {
    pub const fn is_set(&self) -> bool {
        self.0.is_some()
    }
}

// ---------------------------------------------------------------------------
// ReelStats
// ---------------------------------------------------------------------------

/// Aggregate statistics over all reel steps.
#[derive(Resource, Clone, Debug, Default, PartialEq)]
pub struct ReelStats {
    /// Frames in which reels were stepped.
    pub ticks: u64,
    /// Tick on which the first reel engaged.
    pub engaged_at: Option<u64>,
    /// Longest tether paid out by any reel.
    pub max_used_length: f32,
    /// Largest force magnitude applied by any reel.
    pub peak_force: f32,
}

impl ReelStats {
    /// Fold one reel step into the statistics.
    pub fn record(&mut self, step: &ReelStep) {
        if step.newly_engaged && self.engaged_at.is_none() {
            self.engaged_at = Some(self.ticks);
        }
        self.max_used_length = self.max_used_length.max(step.used_length);
        if let Some(force) = step.force {
            self.peak_force = self.peak_force.max(force.norm());
        }
    }
}

// ---------------------------------------------------------------------------
// System
// ---------------------------------------------------------------------------

/// Step every reel against world `W`.  Runs in
/// [`TetherSet::Reel`](crate::TetherSet::Reel), before the world step.
#[allow(clippy::needless_pass_by_value)]
pub fn reel_step_system<W: TetherWorld + Resource>(
    mut world: ResMut<W>,
    mut reels: ResMut<Reels<W>>,
    mut fault: ResMut<ReelFault>,
    mut stats: ResMut<ReelStats>,
) {
    if fault.is_set() {
        return;
    }
    stats.ticks += 1;

    for reel in reels.iter_mut() {
        match reel.step(&mut world) {
            Ok(step) => stats.record(&step),
            Err(err) => {
                error!("tether: {err}; reel stepping stopped");
                fault.0 = Some(err);
                return;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
