//! Tile-grid collision and physics for Tilebox
//!
//! This crate provides the collision/resolution core for 2D tile worlds:
//! - An AABB collision shape and per-body material properties
//! - Tile maps of solid blocks and four 45-degree slope orientations
//! - Per-axis movement with tile classification, push-back resolution and
//!   momentum-exchange collision response
//! - Sticky slope adherence and a non-mutating proximity query

pub mod body;
pub mod collision;
pub mod engine;
pub mod properties;
pub mod reaction;
pub mod shapes;
pub mod tilemap;

// Re-export commonly used types
pub use body::{BodyKey, BodyState};
pub use collision::{
    pushback_from_block, pushback_from_body, pushback_from_slope, slope_collision, test_points,
    Axis, TileHit, PUSHBACK_LIMIT,
};
pub use engine::{CollisionEngine, MoveOutcome, PROBE};
pub use properties::{BodyFlags, PhysicsProperties};
pub use reaction::{body_reaction, tile_reaction};
pub use shapes::Aabb;
pub use tilemap::{cell_at, Cell, Grid, SlopeType, TILE_HALF};
