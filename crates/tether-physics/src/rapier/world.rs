//! [`TetherWorld`] for [`RapierContext`].
//!
//! A spool is a fixed body carrying a sensor ball collider, so it shows up in
//! debug views without colliding.  A slide joint is a generic joint whose two
//! linear axes are coupled and limited together, which limits the distance
//! between the anchors.

use rapier2d::na::{Point2, Vector2};
use rapier2d::prelude::{
    ColliderBuilder, GenericJointBuilder, ImpulseJointHandle, JointAxesMask, JointAxis,
    RigidBodyBuilder, RigidBodyHandle, Rotation, SharedShape,
};
use tether_core::body::{SpoolView, TetheredBody};

use crate::world::{SlideJoint, TetherWorld};

use super::context::RapierContext;

impl RapierContext {
    /// `[min, max]` limits of a slide joint, if it exists.
    pub fn slide_joint_limits(&self, handle: ImpulseJointHandle) -> Option<[f32; 2]> {
        let joint = self.impulse_joint_set.get(handle)?;
        joint
            .data
            .limits(JointAxis::LinX)
            .map(|limits| [limits.min, limits.max])
    }

    /// Current radius of a spool's shape.
    pub fn spool_radius(&self, handle: RigidBodyHandle) -> Option<f32> {
        let collider = self.collider_set.get(*self.spool_colliders.get(&handle)?)?;
        collider.shape().as_ball().map(|ball| ball.radius)
    }
}

impl TetherWorld for RapierContext {
    type BodyHandle = RigidBodyHandle;
    type SpoolHandle = RigidBodyHandle;
    type JointHandle = ImpulseJointHandle;

    fn body(&self, handle: RigidBodyHandle) -> Option<TetheredBody> {
        let body = self.rigid_body_set.get(handle)?;
        Some(TetheredBody::new(
            Point2::from(*body.translation()),
            *body.linvel(),
            body.mass(),
        ))
    }

    fn local_to_world(&self, handle: RigidBodyHandle, local: Point2<f32>) -> Option<Point2<f32>> {
        let body = self.rigid_body_set.get(handle)?;
        Some(body.position().transform_point(&local))
    }

    fn apply_force_at_point(
        &mut self,
        handle: RigidBodyHandle,
        force: Vector2<f32>,
        point: Point2<f32>,
    ) -> bool {
        let Some(body) = self.rigid_body_set.get_mut(handle) else {
            return false;
        };
        body.add_force_at_point(force, point, true);
        true
    }

    fn add_spool(&mut self, position: Point2<f32>, radius: f32) -> RigidBodyHandle {
        let body = RigidBodyBuilder::fixed().translation(position.coords).build();
        let handle = self.rigid_body_set.insert(body);
        let collider = ColliderBuilder::ball(radius).sensor(true).build();
        let collider_handle =
            self.collider_set
                .insert_with_parent(collider, handle, &mut self.rigid_body_set);
        self.spool_colliders.insert(handle, collider_handle);
        handle
    }

    fn update_spool(&mut self, handle: RigidBodyHandle, view: &SpoolView) {
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            body.set_rotation(Rotation::new(view.angle), false);
        }
        let collider = self
            .spool_colliders
            .get(&handle)
            .and_then(|&c| self.collider_set.get_mut(c));
        if let Some(collider) = collider {
            collider.set_shape(SharedShape::ball(view.radius));
        }
    }

    fn add_slide_joint(
        &mut self,
        spool: RigidBodyHandle,
        target: RigidBodyHandle,
        joint: SlideJoint,
    ) -> ImpulseJointHandle {
        let data = GenericJointBuilder::new(JointAxesMask::empty())
            .coupled_axes(JointAxesMask::LIN_AXES)
            .local_anchor1(joint.local_anchor1)
            .local_anchor2(joint.local_anchor2)
            .limits(JointAxis::LinX, [joint.min, joint.max])
            .build();
        self.impulse_joint_set.insert(spool, target, data, true)
    }
}
