//! Tile collision classification and push-back computation
//!
//! Movement is resolved one axis at a time against sampled points of the
//! moving AABB. A colliding tile classifies as a full-block hit, a
//! vertical-only hit, or a true diagonal hit; the matching push-back is the
//! minimal signed displacement that separates the box, padded by one
//! rounding unit so the resolved position never lands exactly tangent.

use log::warn;
use tilebox_math::{round, Vec2, PRECISION};

use crate::shapes::Aabb;
use crate::tilemap::{Cell, SlopeType, TILE_HALF};

/// Push-backs above this magnitude mean a body out-ran the tile resolution
/// in a single step (tunneling risk); they are applied but logged.
pub const PUSHBACK_LIMIT: f32 = 0.2;

/// A resolution axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    /// This axis' component of a vector
    #[inline]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Replace this axis' component of a vector
    #[inline]
    pub fn with(self, v: Vec2, value: f32) -> Vec2 {
        match self {
            Axis::X => Vec2::new(value, v.y),
            Axis::Y => Vec2::new(v.x, value),
        }
    }

    /// The other axis
    #[inline]
    pub fn perp(self) -> Axis {
        match self {
            Axis::X => Axis::Y,
            Axis::Y => Axis::X,
        }
    }
}

/// Outcome of classifying an AABB against one tile cell
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TileHit {
    /// The cell obstructs like a full block on the current axis
    Block { cell: Cell },
    /// The cell obstructs vertically only (slope geometry, flat-edge side)
    BlockInY { cell: Cell },
    /// True diagonal contact with a slope surface
    Slope { cell: Cell, slope: SlopeType },
}

impl TileHit {
    /// The grid cell that produced this hit
    pub fn cell(&self) -> Cell {
        match *self {
            TileHit::Block { cell } | TileHit::BlockInY { cell } | TileHit::Slope { cell, .. } => {
                cell
            }
        }
    }
}

/// Sample points of an AABB used for tile lookups
///
/// One sample per whole unit of width along the bottom and top edges and per
/// whole unit of height along the left and right edges, so a box larger than
/// one tile cannot straddle a solid cell between two sampled corners. The
/// four corners come last: edge samples win the first-hit tie-break.
pub fn test_points(aabb: &Aabb) -> Vec<Vec2> {
    let min = aabb.min();
    let max = aabb.max();
    let mut points = Vec::with_capacity(8);

    let columns = (max.x - min.x).floor() as i32;
    for step in 1..=columns {
        let x = min.x + step as f32;
        points.push(Vec2::new(x, min.y));
        points.push(Vec2::new(x, max.y));
    }
    let rows = (max.y - min.y).floor() as i32;
    for step in 1..=rows {
        let y = min.y + step as f32;
        points.push(Vec2::new(min.x, y));
        points.push(Vec2::new(max.x, y));
    }

    points.push(min);
    points.push(Vec2::new(max.x, min.y));
    points.push(Vec2::new(min.x, max.y));
    points.push(max);
    points
}

/// Classify an AABB against a single slope cell
///
/// `dy` is the vertical delta applied by the pass issuing the query (zero
/// for the x pass). A slope tile has three faces: the diagonal, a flat face
/// flush with a neighboring block, and a full-height vertical back face.
/// Testing only the diagonal would let bodies fall through the other two,
/// so contacts away from the diagonal degrade to block-style hits:
///
/// - approaching the flat face (from below a floor slope, from above a
///   ceiling slope) clips like a full block
/// - past the tall side, the back face clips like a block when the body is
///   beside the cell, and vertically only when it is past the flat edge
///   (so a body can still walk off the tall end)
/// - otherwise a leading corner past the diagonal is a true `Slope` hit
pub fn slope_collision(aabb: &Aabb, cell: Cell, slope: SlopeType, dy: f32) -> Option<TileHit> {
    let cx = cell.0 as f32;
    let cy = cell.1 as f32;
    let center = aabb.center;
    let surface = slope.surface_at(cell, slope.leading_x(aabb));

    if slope.is_bottom() {
        if aabb.min().y >= surface {
            return None;
        }
        // Rising into the underside, or mostly beneath the cell
        if dy > PRECISION || center.y < cy - TILE_HALF {
            return Some(TileHit::Block { cell });
        }
        if past_tall_side(center.x, cx, slope) {
            return Some(if center.y > cy + TILE_HALF {
                TileHit::BlockInY { cell }
            } else {
                TileHit::Block { cell }
            });
        }
        Some(TileHit::Slope { cell, slope })
    } else {
        if aabb.max().y <= surface {
            return None;
        }
        // Dropping onto the flat top, or mostly above the cell
        if dy < -PRECISION || center.y > cy + TILE_HALF {
            return Some(TileHit::Block { cell });
        }
        if past_tall_side(center.x, cx, slope) {
            return Some(if center.y < cy - TILE_HALF {
                TileHit::BlockInY { cell }
            } else {
                TileHit::Block { cell }
            });
        }
        Some(TileHit::Slope { cell, slope })
    }
}

fn past_tall_side(center_x: f32, cell_x: f32, slope: SlopeType) -> bool {
    let tall_x = cell_x + slope.tall_side();
    if slope.tall_side() > 0.0 {
        center_x > tall_x
    } else {
        center_x < tall_x
    }
}

/// Signed displacement separating an AABB from a fully solid cell
///
/// `|center distance| - half extent - half tile - ε`, signed to eject the
/// box toward its own side of the cell.
pub fn pushback_from_block(aabb: &Aabb, cell: Cell, axis: Axis) -> f32 {
    let cell_center = match axis {
        Axis::X => cell.0 as f32,
        Axis::Y => cell.1 as f32,
    };
    let dist = axis.of(aabb.center) - cell_center;
    let margin = dist.abs() - axis.of(aabb.half) - TILE_HALF - PRECISION;
    let push = round(if dist >= 0.0 { -margin } else { margin });
    if push.abs() > PUSHBACK_LIMIT {
        warn!("oversized block push-back {push} at cell {cell:?}");
    }
    push
}

/// Signed vertical displacement separating an AABB from a slope surface
///
/// The margin between the leading edge and the diagonal at the leading
/// corner's x, padded one rounding unit away from the solid side: upward
/// for floor slopes, downward for ceiling slopes.
pub fn pushback_from_slope(aabb: &Aabb, cell: Cell, slope: SlopeType) -> f32 {
    let surface = slope.surface_at(cell, slope.leading_x(aabb));
    let push = if slope.is_bottom() {
        round(surface - aabb.min().y + PRECISION)
    } else {
        round(surface - aabb.max().y - PRECISION)
    };
    if push.abs() > PUSHBACK_LIMIT {
        warn!("oversized slope push-back {push} at cell {cell:?}");
    }
    push
}

/// Signed displacement separating the moving AABB from another body's AABB
pub fn pushback_from_body(aabb: &Aabb, other: &Aabb, axis: Axis) -> f32 {
    let dist = axis.of(aabb.center) - axis.of(other.center);
    let margin = dist.abs() - axis.of(aabb.half) - axis.of(other.half) - PRECISION;
    round(if dist >= 0.0 { -margin } else { margin })
}
