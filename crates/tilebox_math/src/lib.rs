//! 2D Mathematics Library
//!
//! This crate provides the numeric primitives for the Tilebox engine.
//!
//! ## Core Types
//!
//! - [`Vec2`] - 2D vector with x, y components
//! - [`round`] / [`round_vec`] - decimal snapping applied to every stored
//!   coordinate, with [`PRECISION`] as the smallest representable step

mod vec2;
mod round;

pub use vec2::Vec2;
pub use round::{round, round_vec, PRECISION};
