//! Decimal rounding for collision coordinates
//!
//! Raw f32 arithmetic makes logically-equal positions differ in their low
//! bits depending on the path that computed them (`a + b` vs `b + a`), which
//! turns flush contacts into phantom overlaps or hairline gaps. Every
//! position, extent, push-back and velocity is therefore snapped to three
//! decimal digits before it is stored or compared. The snap goes through the
//! decimal string representation rather than `(x * 1000.0).round() / 1000.0`
//! so that two values with the same printed form are guaranteed the same
//! bits.

use crate::Vec2;

/// One rounding unit: the smallest representable coordinate difference.
pub const PRECISION: f32 = 0.001;

/// Round a scalar to three decimal digits via its string representation.
///
/// Idempotent: `round(round(x)) == round(x)` for every input. Non-finite
/// values pass through unchanged.
#[must_use]
pub fn round(value: f32) -> f32 {
    format!("{value:.3}").parse().unwrap_or(value)
}

/// Round both components of a vector.
#[must_use]
pub fn round_vec(value: Vec2) -> Vec2 {
    Vec2::new(round(value.x), round(value.y))
}
