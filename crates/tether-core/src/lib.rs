//! Engine-agnostic model of a motorized tether reel.
//!
//! Pure Rust library with no physics engine dependencies.  Computes spool
//! radius, spool rotation and the pull a DC-motor reel exerts on a tethered
//! body, given only the body's position, velocity and mass.
//!
//! # Step Pipeline
//!
//! ```text
//! Body snapshot → Distance → Spool view → Velocity factor ┐
//!                 (length)   (radius,     Distance factor ┴→ Force
//!                            angle)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use tether_core::prelude::*;
//! use nalgebra::Point2;
//!
//! let mut reel = Reel::new(&presets::reels::phone_tether())
//!     .with_anchor(Point2::new(300.0, 400.0))
//!     .unwrap();
//!
//! let phone = TetheredBody::at_rest(Point2::new(300.0, 700.0), 185.0);
//! let force = reel.force(&phone, 2000.0).unwrap();
//! assert!(force.y < 0.0); // pulled back up toward the spool
//! ```

pub mod body;
pub mod config;
pub mod error;
pub mod presets;
pub mod reel;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::body::{SpoolView, TetheredBody};
    pub use crate::config::{ReactiveConfig, ReelConfig, SimConfig, TetherConfig};
    pub use crate::error::{ConfigError, ReelError, TetherError};
    pub use crate::presets;
    pub use crate::reel::Reel;
}
