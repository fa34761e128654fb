//! Tilebox: a 2D tile-grid collision/physics core
//!
//! Bodies are non-rotating rectangles moved per-axis through a grid of
//! solid blocks and 45-degree slope tiles. The workspace splits into
//! `tilebox_math` (vectors, decimal rounding), `tilebox_physics` (the
//! collision/resolution engine) and `tilebox_core` (world container and
//! stepping); this crate re-exports the lot and owns the layered
//! application configuration.

pub mod config;

pub use tilebox_core::{PhysicsConfig, World};
pub use tilebox_math::{round, round_vec, Vec2, PRECISION};
pub use tilebox_physics::{
    Aabb, BodyFlags, BodyKey, BodyState, CollisionEngine, Grid, MoveOutcome, PhysicsProperties,
    SlopeType, TileHit,
};
