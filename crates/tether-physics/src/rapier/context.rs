//! Bevy resource wrapping all rapier2d physics pipeline state.

use std::collections::HashMap;

use bevy::prelude::Resource;
use rapier2d::prelude::{
    CCDSolver, Collider, ColliderHandle, ColliderSet, DefaultBroadPhase, ImpulseJointSet,
    IntegrationParameters, IslandManager, MultibodyJointSet, NarrowPhase, PhysicsPipeline, Real,
    RigidBody, RigidBodyHandle, RigidBodySet, Vector,
};
use tether_core::config::SimConfig;

// ---------------------------------------------------------------------------
// RapierContext
// ---------------------------------------------------------------------------

/// All rapier state in a single Bevy resource.
///
/// `PhysicsPipeline::step()` requires mutable access to every set
/// simultaneously, so they must all live together.
#[derive(Resource)]
pub struct RapierContext {
    // -- Rapier sets --
    pub rigid_body_set: RigidBodySet,
    pub collider_set: ColliderSet,
    pub impulse_joint_set: ImpulseJointSet,
    pub multibody_joint_set: MultibodyJointSet,

    // -- Pipeline objects --
    pub physics_pipeline: PhysicsPipeline,
    pub island_manager: IslandManager,
    pub broad_phase: DefaultBroadPhase,
    pub narrow_phase: NarrowPhase,
    pub ccd_solver: CCDSolver,

    // -- Parameters --
    pub integration_parameters: IntegrationParameters,
    pub gravity: Vector<Real>,
    /// Linear damping given to every dynamic body inserted through
    /// [`insert_body`](Self::insert_body).
    pub linear_damping: Real,
    /// Angular damping given to the same bodies.
    pub angular_damping: Real,

    // -- Spool bookkeeping --
    /// Spool body → its (sensor) shape collider.
    pub spool_colliders: HashMap<RigidBodyHandle, ColliderHandle>,

    /// Number of completed steps.
    pub steps: u64,
}

impl RapierContext {
    /// Create a new context with given gravity and timestep, no damping.
    pub fn new(gravity: Vector<Real>, dt: Real) -> Self {
        let integration_parameters = IntegrationParameters {
            dt,
            ..IntegrationParameters::default()
        };

        Self {
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            integration_parameters,
            gravity,
            linear_damping: 0.0,
            angular_damping: 0.0,
            spool_colliders: HashMap::new(),
            steps: 0,
        }
    }

    /// Create a context from [`SimConfig`] (gravity, timestep, damping).
    pub fn from_config(config: &SimConfig) -> Self {
        let mut context = Self::new(Vector::new(config.gravity[0], config.gravity[1]), config.dt);
        context.linear_damping = config.linear_damping();
        context.angular_damping = config.angular_damping();
        context
    }

    /// Timestep in seconds.
    pub const fn dt(&self) -> Real {
        self.integration_parameters.dt
    }

    /// Insert a body with one collider.
    ///
    /// Dynamic bodies receive the context's linear and angular damping.  Mass properties
    /// are computed immediately so the body's mass is valid before the first
    /// step.
    pub fn insert_body(&mut self, mut body: RigidBody, collider: Collider) -> RigidBodyHandle {
        if body.is_dynamic() {
            body.set_linear_damping(self.linear_damping);
            body.set_angular_damping(self.angular_damping);
        }
        let handle = self.rigid_body_set.insert(body);
        self.collider_set
            .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.recompute_mass_properties_from_colliders(&self.collider_set);
        }
        handle
    }

    /// Run one physics step.
    ///
    /// User forces are cleared afterwards: a force applied between two steps
    /// acts on the next step only.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
        for (_, body) in self.rigid_body_set.iter_mut() {
            body.reset_forces(false);
        }
        self.steps += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rapier2d::prelude::{ColliderBuilder, RigidBodyBuilder};

    #[test]
    fn from_config_converts_damping() {
        let config = SimConfig::default();
        let context = RapierContext::from_config(&config);
        assert!((context.dt() - config.dt).abs() < f32::EPSILON);
        assert!((context.gravity.y - 900.0).abs() < f32::EPSILON);
        assert!((context.linear_damping - config.linear_damping()).abs() < f32::EPSILON);
    }

    #[test]
    fn inserted_dynamic_body_has_mass_and_damping() {
        let mut context = RapierContext::from_config(&SimConfig::default());
        let handle = context.insert_body(
            RigidBodyBuilder::dynamic().build(),
            ColliderBuilder::ball(1.0).density(1.0).build(),
        );
        let body = &context.rigid_body_set[handle];
        assert!((body.mass() - std::f32::consts::PI).abs() < 1e-3);
        assert!((body.linear_damping() - context.linear_damping).abs() < f32::EPSILON);
    }

    #[test]
    fn damping_decays_spin_and_velocity_alike() {
        let config = SimConfig {
            gravity: [0.0, 0.0],
            ..SimConfig::default()
        };
        let mut context = RapierContext::from_config(&config);
        let handle = context.insert_body(
            RigidBodyBuilder::dynamic()
                .linvel(Vector::new(100.0, 0.0))
                .angvel(10.0)
                .build(),
            ColliderBuilder::ball(1.0).build(),
        );
        for _ in 0..60 {
            context.step();
        }
        let body = &context.rigid_body_set[handle];
        // One second at damping 0.1 keeps roughly a tenth of each.
        assert!((body.linvel().x - 10.0).abs() < 1.0, "{}", body.linvel().x);
        assert!((body.angvel() - 1.0).abs() < 0.1, "{}", body.angvel());
    }

    #[test]
    fn fixed_body_keeps_zero_damping() {
        let mut context = RapierContext::from_config(&SimConfig::default());
        let handle = context.insert_body(
            RigidBodyBuilder::fixed().build(),
            ColliderBuilder::cuboid(1.0, 1.0).build(),
        );
        assert!(context.rigid_body_set[handle].linear_damping().abs() < f32::EPSILON);
    }

    #[test]
    fn gravity_accelerates_free_body() {
        let mut context = RapierContext::new(Vector::new(0.0, 900.0), 1.0 / 60.0);
        let handle = context.insert_body(
            RigidBodyBuilder::dynamic().build(),
            ColliderBuilder::ball(1.0).build(),
        );
        for _ in 0..60 {
            context.step();
        }
        let body = &context.rigid_body_set[handle];
        assert!((body.linvel().y - 900.0).abs() < 1.0);
        assert_eq!(context.steps, 60);
    }

    #[test]
    fn user_forces_last_one_step() {
        let mut context = RapierContext::new(Vector::new(0.0, 0.0), 1.0 / 60.0);
        let handle = context.insert_body(
            RigidBodyBuilder::dynamic().build(),
            ColliderBuilder::ball(1.0).build(),
        );
        context.rigid_body_set[handle].add_force(Vector::new(60.0, 0.0), true);
        context.step();
        let after_one = context.rigid_body_set[handle].linvel().x;
        assert!(after_one > 0.0);
        context.step();
        let after_two = context.rigid_body_set[handle].linvel().x;
        assert!((after_two - after_one).abs() < 1e-4);
    }
}
