//! A [`Reel`] bound to a body in a [`TetherWorld`].
//!
//! The reactive reel stays passive until the tethered body first travels
//! beyond the engage distance, then pulls on it every step for the rest of
//! the run.  A slide joint registered at construction caps the tether length
//! independently of the force model.

use bevy::prelude::{debug, info};
use rapier2d::na::{Point2, Vector2};
use tether_core::body::{SpoolView, TetheredBody};
use tether_core::config::{ReactiveConfig, ReelConfig};
use tether_core::error::ReelError;
use tether_core::reel::Reel;

use crate::visual::SpoolVisualizer;
use crate::world::{SlideJoint, TetherWorld};

// ---------------------------------------------------------------------------
// Engagement
// ---------------------------------------------------------------------------

/// Engagement latch.  Only ever moves from `Disengaged` to `Engaged`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Engagement {
    #[default]
    Disengaged,
    Engaged,
}

impl Engagement {
    pub const fn is_engaged(self) -> bool {
        matches!(self, Self::Engaged)
    }
}

// ---------------------------------------------------------------------------
// ReelStep
// ---------------------------------------------------------------------------

/// Outcome of one [`ReactiveReel::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReelStep {
    /// Engagement after this step.
    pub engaged: bool,
    /// Whether this step latched the reel.
    pub newly_engaged: bool,
    /// Tether paid out.
    pub used_length: f32,
    /// Spool radius and angle.
    pub view: SpoolView,
    /// Force applied to the body this step, if engaged.
    pub force: Option<Vector2<f32>>,
}

// ---------------------------------------------------------------------------
// ReactiveReel
// ---------------------------------------------------------------------------

/// Reel that engages on distance and pulls a world body.
pub struct ReactiveReel<W: TetherWorld> {
    reel: Reel,
    anchor: Point2<f32>,
    target: W::BodyHandle,
    spool: W::SpoolHandle,
    joint: W::JointHandle,
    engagement: Engagement,
    engage_distance: f32,
    force_multiplier: f32,
    tether_offset: Point2<f32>,
    visualizer: Option<Box<dyn SpoolVisualizer>>,
}

impl<W: TetherWorld> ReactiveReel<W> {
    /// Anchor a reel at `anchor` and tether it to `target`.
    ///
    /// Registers the spool body and the `[0, tether_length]` slide joint with
    /// the world.  The reel starts engaged if the target already lies beyond
    /// the engage distance.
    pub fn attach(
        world: &mut W,
        anchor: Point2<f32>,
        target: W::BodyHandle,
        reel_config: &ReelConfig,
        reactive_config: &ReactiveConfig,
    ) -> Result<Self, ReelError> {
        let mut reel = Reel::new(reel_config).with_anchor(anchor)?;
        let body = world
            .body(target)
            .ok_or_else(|| ReelError::BodyMissing(format!("{target:?}")))?;

        let spool = world.add_spool(anchor, reel.cur_radius());
        reel.update_distance(body.position)?;

        let engagement = if reel.used_length() > reactive_config.engage_distance {
            Engagement::Engaged
        } else {
            Engagement::Disengaged
        };

        let joint = world.add_slide_joint(spool, target, SlideJoint::tether(reel.tether_length));
        debug!(
            "tether: reel attached at ({}, {}) to {target:?}, {} out, {engagement:?}",
            anchor.x,
            anchor.y,
            reel.used_length()
        );

        Ok(Self {
            reel,
            anchor,
            target,
            spool,
            joint,
            engagement,
            engage_distance: reactive_config.engage_distance,
            force_multiplier: reactive_config.force_multiplier,
            tether_offset: Point2::new(
                reactive_config.tether_offset[0],
                reactive_config.tether_offset[1],
            ),
            visualizer: None,
        })
    }

    /// Inject a visualizer that receives every step's tether and spool.
    #[must_use]
    pub fn with_visualizer(mut self, visualizer: impl SpoolVisualizer + 'static) -> Self {
        self.visualizer = Some(Box::new(visualizer));
        self
    }

    pub const fn reel(&self) -> &Reel {
        &self.reel
    }

    pub const fn anchor(&self) -> Point2<f32> {
        self.anchor
    }

    pub const fn target(&self) -> W::BodyHandle {
        self.target
    }

    pub const fn spool(&self) -> W::SpoolHandle {
        self.spool
    }

    pub const fn joint(&self) -> W::JointHandle {
        self.joint
    }

    pub const fn engagement(&self) -> Engagement {
        self.engagement
    }

    pub const fn is_engaged(&self) -> bool {
        self.engagement.is_engaged()
    }

    pub const fn engage_distance(&self) -> f32 {
        self.engage_distance
    }

    fn read_body(&self, world: &W) -> Result<TetheredBody, ReelError> {
        world
            .body(self.target)
            .ok_or_else(|| ReelError::BodyMissing(format!("{:?}", self.target)))
    }

    /// Advance the reel by one tick.  Call before the world integrates.
    ///
    /// Measures the tether, refreshes the spool view, latches engagement and,
    /// once engaged, applies the reel force at the tether attachment point.
    pub fn step(&mut self, world: &mut W) -> Result<ReelStep, ReelError> {
        let body = self.read_body(world)?;
        self.reel.update_distance(body.position)?;
        self.reel.check_exhausted()?;

        let attachment = world
            .local_to_world(self.target, self.tether_offset)
            .ok_or_else(|| ReelError::BodyMissing(format!("{:?}", self.target)))?;
        if let Some(visualizer) = self.visualizer.as_mut() {
            visualizer.draw_tether(self.anchor, attachment);
        }

        let view = self.reel.update_view();
        world.update_spool(self.spool, &view);
        if let Some(visualizer) = self.visualizer.as_mut() {
            visualizer.draw_spool(self.anchor, &view);
        }

        let newly_engaged =
            !self.is_engaged() && self.reel.used_length() > self.engage_distance;
        if newly_engaged {
            self.engagement = Engagement::Engaged;
            info!(
                "tether: reel engaged at {:.1} out (threshold {:.1})",
                self.reel.used_length(),
                self.engage_distance
            );
        }

        let force = if self.is_engaged() {
            let force = self.reel.force(&body, self.force_multiplier)?;
            if !world.apply_force_at_point(self.target, force, attachment) {
                return Err(ReelError::BodyMissing(format!("{:?}", self.target)));
            }
            Some(force)
        } else {
            None
        };

        Ok(ReelStep {
            engaged: self.is_engaged(),
            newly_engaged,
            used_length: self.reel.used_length(),
            view,
            force,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
