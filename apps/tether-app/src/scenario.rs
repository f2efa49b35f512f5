//! Drop-catch scene: a phone resting on a chair is flung off it and the reel
//! catches it before it hits the floor too hard.
//!
//! World coordinates have y pointing down, matching a 1200×800 viewport.

use bevy::prelude::*;
use rapier2d::na::Point2;
use rapier2d::prelude::{
    CoefficientCombineRule, ColliderBuilder, RigidBodyBuilder, RigidBodyHandle, Vector,
};
use tether_core::config::TetherConfig;
use tether_core::error::ReelError;
use tether_core::presets;
use tether_physics::prelude::*;
use tether_physics::systems::reel_step_system;

/// Spool anchor.
pub const ANCHOR: Point2<f32> = Point2::new(300.0, 400.0);
/// Phone spawn point, resting above the chair.
pub const PHONE_START: Point2<f32> = Point2::new(200.0, 430.0);

const CHAIR_WIDTH: f32 = 300.0;
const CHAIR_HEIGHT: f32 = 350.0;
const FLOOR_Y: f32 = 800.0;

/// Seconds of rest before the phone is flung.
pub const LAUNCH_AFTER: f32 = 2.0;

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// Configuration the scene runs with when none is given.
pub fn default_config() -> TetherConfig {
    TetherConfig {
        reactive: presets::reactive::drop_catch(),
        ..TetherConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Launch
// ---------------------------------------------------------------------------

/// One-shot impulse on a body once the world has run long enough.
#[derive(Resource, Clone, Debug)]
pub struct Launch {
    pub body: RigidBodyHandle,
    pub impulse: Vector<f32>,
    pub at_step: u64,
    pub fired: bool,
}

/// Apply the [`Launch`] impulse once its step is reached.
pub fn launch_system(mut launch: ResMut<Launch>, mut context: ResMut<RapierContext>) {
    if launch.fired || context.steps < launch.at_step {
        return;
    }
    let impulse = launch.impulse;
    if let Some(body) = context.rigid_body_set.get_mut(launch.body) {
        body.apply_impulse(impulse, true);
        info!("tether: launched phone with ({}, {})", impulse.x, impulse.y);
    }
    launch.fired = true;
}

// ---------------------------------------------------------------------------
// Scene
// ---------------------------------------------------------------------------

/// Handles of everything the scene spawned.
#[derive(Clone, Copy, Debug)]
pub struct DropScene {
    pub phone: RigidBodyHandle,
    pub floor: RigidBodyHandle,
    pub chair: RigidBodyHandle,
}

/// Build the app: physics plugin, scene bodies, the reel and the launch.
pub fn build_app(
    config: &TetherConfig,
    recorder: Option<TrajectoryRecorder>,
) -> Result<(App, DropScene), ReelError> {
    let mut app = App::new();
    app.add_plugins(TetherPhysicsPlugin::new(RapierBackend::new(config.sim.clone())));
    let scene = spawn_scene(&mut app, config, recorder)?;
    app.add_systems(
        Update,
        launch_system
            .in_set(TetherSet::Reel)
            .before(reel_step_system::<RapierContext>),
    );
    Ok((app, scene))
}

/// Spawn phone, floor and chair into the app's [`RapierContext`] and tether
/// the phone to a reel at [`ANCHOR`].
pub fn spawn_scene(
    app: &mut App,
    config: &TetherConfig,
    recorder: Option<TrajectoryRecorder>,
) -> Result<DropScene, ReelError> {
    let scene = app
        .world_mut()
        .resource_scope(|world, mut context: Mut<RapierContext>| {
            let scene = spawn_bodies(&mut context);
            let mut reel = ReactiveReel::attach(
                &mut *context,
                ANCHOR,
                scene.phone,
                &config.reel,
                &config.reactive,
            )?;
            if let Some(recorder) = recorder {
                reel = reel.with_visualizer(recorder);
            }
            world.resource_mut::<Reels<RapierContext>>().push(reel);
            Ok::<_, ReelError>(scene)
        })?;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let at_step = (LAUNCH_AFTER / config.sim.dt).round() as u64;
    app.insert_resource(Launch {
        body: scene.phone,
        impulse: Vector::new(40_000.0, -9_000.0),
        at_step,
        fired: false,
    });
    Ok(scene)
}

fn spawn_bodies(context: &mut RapierContext) -> DropScene {
    let phone = context.insert_body(
        RigidBodyBuilder::dynamic()
            .translation(PHONE_START.coords)
            .build(),
        ColliderBuilder::capsule_x(10.0, 2.0)
            .density(2.0)
            .restitution(0.8)
            .friction(0.1)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .restitution_combine_rule(CoefficientCombineRule::Multiply)
            .build(),
    );

    let floor = context.insert_body(
        RigidBodyBuilder::fixed()
            .translation(Vector::new(600.0, FLOOR_Y))
            .build(),
        ColliderBuilder::capsule_x(600.0, 20.0)
            .restitution(0.3)
            .friction(0.4)
            .build(),
    );

    let chair = context.insert_body(
        RigidBodyBuilder::fixed()
            .translation(Vector::new(100.0, FLOOR_Y - CHAIR_HEIGHT / 2.0))
            .build(),
        ColliderBuilder::cuboid(CHAIR_WIDTH / 2.0, CHAIR_HEIGHT / 2.0)
            .restitution(0.3)
            .friction(0.4)
            .build(),
    );

    DropScene {
        phone,
        floor,
        chair,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn phone_distance(app: &App, scene: &DropScene) -> f32 {
        let context = app.world().resource::<RapierContext>();
        (ANCHOR - Point2::from(*context.rigid_body_set[scene.phone].translation())).norm()
    }

    #[test]
    fn default_config_is_valid_drop_catch() {
        let config = default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.reactive, presets::reactive::drop_catch());
    }

    #[test]
    fn scene_starts_disengaged() {
        let (app, scene) = build_app(&default_config(), None).unwrap();
        let context = app.world().resource::<RapierContext>();
        assert!(context.rigid_body_set[scene.floor].is_fixed());
        assert!(context.rigid_body_set[scene.chair].is_fixed());
        assert!((context.rigid_body_set[scene.phone].mass() - 185.0).abs() < 2.0);

        let reels = app.world().resource::<Reels<RapierContext>>();
        assert_eq!(reels.len(), 1);
        assert!(!reels.get(0).unwrap().is_engaged());

        let launch = app.world().resource::<Launch>();
        assert_eq!(launch.at_step, 120);
        assert!(!launch.fired);
    }

    #[test]
    fn phone_rests_on_chair_before_launch() {
        let (mut app, scene) = build_app(&default_config(), None).unwrap();
        for _ in 0..100 {
            app.update();
        }
        let context = app.world().resource::<RapierContext>();
        let y = context.rigid_body_set[scene.phone].translation().y;
        assert!(y < FLOOR_Y - CHAIR_HEIGHT);
        assert!(y > FLOOR_Y - CHAIR_HEIGHT - 10.0);
    }

    #[test]
    fn reel_sees_launch_velocity_in_same_frame() {
        let mut config = default_config();
        config.reactive.engage_distance = 50.0;
        let (mut app, _) = build_app(&config, None).unwrap();
        app.world_mut().resource_mut::<Launch>().at_step = 0;

        app.update();

        assert!(app.world().resource::<Launch>().fired);
        let stats = app.world().resource::<ReelStats>();
        assert_eq!(stats.engaged_at, None);
        // Flung toward the anchor faster than the motor turns: no pull.
        assert!(stats.peak_force.abs() < f32::EPSILON);
    }

    #[test]
    fn launch_fires_once_and_tether_holds() {
        let config = default_config();
        let recorder = TrajectoryRecorder::new();
        let (mut app, scene) = build_app(&config, Some(recorder.clone())).unwrap();

        for _ in 0..600 {
            app.update();
            assert!(phone_distance(&app, &scene) < config.reel.tether_length);
            if app.world().resource::<ReelFault>().is_set() {
                break;
            }
        }

        assert!(app.world().resource::<Launch>().fired);
        assert!(!app.world().resource::<ReelFault>().is_set());
        assert_eq!(app.world().resource::<ReelStats>().ticks, 600);
        assert_eq!(recorder.len(), 600);
    }
}
