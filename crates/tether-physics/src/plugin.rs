//! The tether physics plugin and its schedule ordering.

use bevy::prelude::*;

use crate::backend::PhysicsBackend;
use crate::systems::{ReelFault, ReelStats};

/// System sets run in order every `Update`.
///
/// Reel forces are accumulated in [`Reel`](Self::Reel) and consumed by the
/// world step in [`Simulate`](Self::Simulate) of the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetherSet {
    /// Measure tethers, update spools, apply reel forces.
    Reel,
    /// Integrate the physics world.
    Simulate,
}

/// Bevy plugin that wires a [`PhysicsBackend`] into the app.
///
/// # Usage
///
/// ```ignore
/// app.add_plugins(TetherPhysicsPlugin::new(RapierBackend::default()));
/// ```
///
/// Configures [`TetherSet`] ordering, inserts [`ReelFault`] and
/// [`ReelStats`], then delegates the rest to the backend's
/// [`build`](PhysicsBackend::build).
pub struct TetherPhysicsPlugin {
    backend: Box<dyn PhysicsBackend>,
}

impl TetherPhysicsPlugin {
    /// Create a new physics plugin with the given backend.
    pub fn new(backend: impl PhysicsBackend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// The name of the active physics backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }
}

impl Plugin for TetherPhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, (TetherSet::Reel, TetherSet::Simulate).chain())
            .init_resource::<ReelFault>()
            .init_resource::<ReelStats>();
        self.backend.build(app);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct TestBackend {
        name: &'static str,
    }

    impl PhysicsBackend for TestBackend {
        fn build(&self, _app: &mut App) {}
        fn name(&self) -> &str {
            self.name
        }
    }

    #[test]
    fn plugin_delegates_name() {
        let plugin = TetherPhysicsPlugin::new(TestBackend { name: "test" });
        assert_eq!(plugin.backend_name(), "test");
    }

    #[test]
    fn plugin_inserts_shared_resources() {
        let mut app = App::new();
        app.add_plugins(TetherPhysicsPlugin::new(TestBackend { name: "test" }));
        app.update();
        assert!(app.world().get_resource::<ReelFault>().is_some());
        assert!(app.world().get_resource::<ReelStats>().is_some());
    }
}
