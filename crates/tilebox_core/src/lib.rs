//! Core world container for the Tilebox engine
//!
//! This crate provides the simulation-facing surface on top of the
//! collision core:
//!
//! - [`World`] - container for bodies, tile maps and the stepping loop
//! - [`PhysicsConfig`] - simulation tuning (gravity)

mod world;

pub use world::{PhysicsConfig, World};

// Re-export commonly used types from the member crates for convenience
pub use tilebox_math::{round, round_vec, Vec2, PRECISION};
pub use tilebox_physics::{
    Aabb, BodyFlags, BodyKey, BodyState, CollisionEngine, Grid, MoveOutcome, PhysicsProperties,
    SlopeType, TileHit,
};
