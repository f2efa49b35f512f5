//! Raw `rapier2d` physics backend.
//!
//! We own the [`PhysicsPipeline`](rapier2d::pipeline::PhysicsPipeline), call
//! `step()` ourselves, and host reels directly on the rapier sets through
//! [`TetherWorld`](crate::world::TetherWorld).

pub mod backend;
pub mod context;
pub mod systems;
pub mod world;

pub use backend::RapierBackend;
pub use context::RapierContext;
