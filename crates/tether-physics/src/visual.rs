//! Optional visual output for reels.
//!
//! A [`SpoolVisualizer`] is injected into a
//! [`ReactiveReel`](crate::reactive::ReactiveReel) and told where the tether
//! runs and how the spool looks after every step.  The force model never
//! depends on it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use rapier2d::na::Point2;
use serde::{Deserialize, Serialize};
use tether_core::body::SpoolView;

/// Receiver for per-step reel drawing commands.
pub trait SpoolVisualizer: Send + Sync {
    /// The tether runs from the spool at `from` to the attachment point `to`.
    fn draw_tether(&mut self, from: Point2<f32>, to: Point2<f32>);

    /// The spool at `anchor` now has the given radius and angle.
    fn draw_spool(&mut self, anchor: Point2<f32>, view: &SpoolView);
}

// ---------------------------------------------------------------------------
// TrajectoryRecorder
// ---------------------------------------------------------------------------

/// One recorded step of a reel.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TetherSample {
    /// Index of the step, starting at 0.
    pub tick: u64,
    /// Spool position.
    pub anchor: [f32; 2],
    /// Tether attachment point on the body.
    pub attachment: [f32; 2],
    /// Spool radius.
    pub radius: f32,
    /// Spool angle (rad).
    pub angle: f32,
}

/// Visualizer that records every step instead of drawing it.
///
/// Clones share the same sample buffer, so one clone can be handed to the
/// reel while another is kept to read the samples back.
#[derive(Clone, Debug, Default)]
pub struct TrajectoryRecorder {
    samples: Arc<Mutex<Vec<TetherSample>>>,
    pending_attachment: Option<Point2<f32>>,
    tick: u64,
}

impl TrajectoryRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<TetherSample>> {
        self.samples.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of everything recorded so far.
    pub fn samples(&self) -> Vec<TetherSample> {
        self.lock().clone()
    }

    /// Number of recorded steps.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SpoolVisualizer for TrajectoryRecorder {
    fn draw_tether(&mut self, _from: Point2<f32>, to: Point2<f32>) {
        self.pending_attachment = Some(to);
    }

    fn draw_spool(&mut self, anchor: Point2<f32>, view: &SpoolView) {
        let attachment = self.pending_attachment.take().unwrap_or(anchor);
        let sample = TetherSample {
            tick: self.tick,
            anchor: [anchor.x, anchor.y],
            attachment: [attachment.x, attachment.y],
            radius: view.radius,
            angle: view.angle,
        };
        self.lock().push(sample);
        self.tick += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_pairs_tether_with_spool() {
        let mut recorder = TrajectoryRecorder::new();
        recorder.draw_tether(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        recorder.draw_spool(
            Point2::new(0.0, 0.0),
            &SpoolView {
                radius: 12.0,
                angle: 0.5,
            },
        );
        let samples = recorder.samples();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].tick, 0);
        assert_eq!(samples[0].attachment, [3.0, 4.0]);
        assert!((samples[0].radius - 12.0).abs() < f32::EPSILON);
    }

    #[test]
    fn recorder_clones_share_samples() {
        let reader = TrajectoryRecorder::new();
        let mut writer = reader.clone();
        assert!(reader.is_empty());
        for _ in 0..3 {
            writer.draw_spool(Point2::origin(), &SpoolView::default());
        }
        assert_eq!(reader.len(), 3);
        assert_eq!(reader.samples()[2].tick, 2);
    }

    #[test]
    fn spool_without_tether_attaches_at_anchor() {
        let mut recorder = TrajectoryRecorder::new();
        recorder.draw_spool(Point2::new(7.0, 8.0), &SpoolView::default());
        assert_eq!(recorder.samples()[0].attachment, [7.0, 8.0]);
    }

    #[test]
    fn sample_serializes_to_json() {
        let sample = TetherSample {
            tick: 4,
            anchor: [300.0, 400.0],
            attachment: [195.0, 430.0],
            radius: 19.5,
            angle: -1.25,
        };
        let json = serde_json::to_string(&sample).unwrap();
        assert!(json.contains("\"tick\":4"));
        let back: TetherSample = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample);
    }
}
