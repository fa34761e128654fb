//! Collision/resolution engine
//!
//! One `move_body` call per body per simulation tick: round the requested
//! delta, resolve the x axis, fold sticky slope adherence into the pending
//! vertical delta, resolve the y axis, then refresh the slope contact.
//! The engine mutates positions and velocities through the body store but
//! owns no bodies itself; tile maps are read-only between level loads.

use log::debug;
use slotmap::SlotMap;
use tilebox_math::{round, round_vec, Vec2, PRECISION};

use crate::body::{BodyKey, BodyState};
use crate::collision::{
    pushback_from_block, pushback_from_body, pushback_from_slope, slope_collision, test_points,
    Axis, TileHit,
};
use crate::reaction::{body_reaction, tile_reaction};
use crate::shapes::Aabb;
use crate::tilemap::{cell_at, Cell, Grid, SlopeType};

/// Nudge distance for proximity probes and the slope re-probe
///
/// Resolved contacts rest exactly one rounding unit from their surface, so
/// a two-unit nudge is the smallest step guaranteed to cross it.
pub const PROBE: f32 = 2.0 * PRECISION;

/// Result of one `move_body` call
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MoveOutcome {
    /// Whether the final position differs from the initial one on any axis
    pub moved: bool,
    /// Floor slope the body adheres to after y resolution; always `None`
    /// for non-sticky bodies. The caller writes this back onto the body.
    pub on_slope: Option<SlopeType>,
}

/// The tile-and-body collision engine
///
/// Holds the level's tile maps, handed over once per level load. With no
/// maps given, every cell reads as empty.
pub struct CollisionEngine {
    blocks: Grid<bool>,
    slopes: Grid<Option<SlopeType>>,
}

impl CollisionEngine {
    /// Create an engine with no tile maps loaded
    pub fn new() -> Self {
        Self {
            blocks: Grid::empty(),
            slopes: Grid::empty(),
        }
    }

    /// Install the solid-cell map, replacing any previous one
    pub fn give_block_map(&mut self, blocks: Grid<bool>) {
        debug!(
            "block map installed: {}x{}",
            blocks.width(),
            blocks.height()
        );
        self.blocks = blocks;
        self.validate_maps();
    }

    /// Install the slope map, replacing any previous one
    pub fn give_slope_map(&mut self, slopes: Grid<Option<SlopeType>>) {
        debug!(
            "slope map installed: {}x{}",
            slopes.width(),
            slopes.height()
        );
        self.slopes = slopes;
        self.validate_maps();
    }

    /// Both maps present: same dimensions, no cell both blocked and sloped
    fn validate_maps(&self) {
        if self.blocks.is_empty() || self.slopes.is_empty() {
            return;
        }
        assert_eq!(
            (self.blocks.width(), self.blocks.height()),
            (self.slopes.width(), self.slopes.height()),
            "block and slope maps must share dimensions"
        );
        for (cell, slope) in self.slopes.iter_cells() {
            if slope.is_some() {
                assert!(
                    !self.block_at(cell),
                    "cell {cell:?} is both blocked and sloped"
                );
            }
        }
    }

    fn block_at(&self, cell: Cell) -> bool {
        self.blocks.get(cell.0, cell.1).copied().unwrap_or(false)
    }

    fn slope_at(&self, cell: Cell) -> Option<SlopeType> {
        self.slopes.get(cell.0, cell.1).copied().flatten()
    }

    /// Classify an AABB against the tile maps
    ///
    /// `dy` is the vertical delta applied by the pass issuing the query
    /// (zero for the x pass). The first colliding cell in test-point order
    /// wins; gameplay depends on this tie-break, do not reorder.
    pub fn classify(&self, aabb: &Aabb, dy: f32) -> Option<TileHit> {
        for point in test_points(aabb) {
            let cell = cell_at(point);
            if let Some(slope) = self.slope_at(cell) {
                if let Some(hit) = slope_collision(aabb, cell, slope, dy) {
                    return Some(hit);
                }
            } else if self.block_at(cell) {
                return Some(TileHit::Block { cell });
            }
        }
        None
    }

    /// Move a body by the requested delta, resolving collisions per axis
    ///
    /// Returns whether any net displacement occurred and the refreshed
    /// slope contact. Unknown keys are a removed body: nothing happens.
    pub fn move_body(
        &self,
        bodies: &mut SlotMap<BodyKey, BodyState>,
        key: BodyKey,
        delta: Vec2,
        collidables: &[BodyKey],
    ) -> MoveOutcome {
        let Some(body) = bodies.get(key) else {
            return MoveOutcome::default();
        };
        let delta = round_vec(delta);
        let start = body.position;
        let sticky = body.props.is_sticky();

        if !body.props.is_collidable() {
            let target = round_vec(start + delta);
            bodies[key].position = target;
            return MoveOutcome {
                moved: target != start,
                on_slope: None,
            };
        }

        self.step_x(bodies, key, delta.x, collidables);

        // Walking down a descending slope: fold the x displacement into the
        // pending vertical delta so the body tracks the surface instead of
        // stepping off into the air each tick. Skipped when moving upward
        // (jumping off a slope must win over adhesion).
        let walked = bodies[key].position.x - start.x;
        let fold = if sticky && delta.y <= PRECISION {
            slope_fold(bodies[key].on_slope, walked)
        } else {
            0.0
        };

        self.step_y(bodies, key, delta.y + fold, collidables);

        let body = &bodies[key];
        let on_slope = if sticky {
            self.probe_slope(&body.aabb())
        } else {
            None
        };
        MoveOutcome {
            moved: body.position != start,
            on_slope,
        }
    }

    fn step_x(
        &self,
        bodies: &mut SlotMap<BodyKey, BodyState>,
        key: BodyKey,
        dx: f32,
        collidables: &[BodyKey],
    ) {
        let start = bodies[key].position.x;
        bodies[key].position.x = round(start + dx);
        let aabb = bodies[key].aabb();

        match self.classify(&aabb, 0.0) {
            Some(TileHit::Block { cell }) => {
                let push = pushback_from_block(&aabb, cell, Axis::X);
                let body = &mut bodies[key];
                body.position.x = round(body.position.x + push);
                body.velocity = tile_reaction(body.velocity, &body.props, Axis::X);
            }
            Some(TileHit::Slope { cell, slope }) => {
                // Ride the diagonal: lift vertically instead of clipping x,
                // otherwise every ramp would act as a wall
                let lift = pushback_from_slope(&aabb, cell, slope);
                let body = &mut bodies[key];
                body.position.y = round(body.position.y + lift);
            }
            // Vertical obstruction only; the y pass handles it
            Some(TileHit::BlockInY { .. }) => {}
            None => self.collide_bodies(bodies, key, collidables, Axis::X),
        }
    }

    fn step_y(
        &self,
        bodies: &mut SlotMap<BodyKey, BodyState>,
        key: BodyKey,
        dy: f32,
        collidables: &[BodyKey],
    ) {
        let start = bodies[key].position.y;
        bodies[key].position.y = round(start + dy);
        let aabb = bodies[key].aabb();

        match self.classify(&aabb, dy) {
            Some(TileHit::Block { cell }) | Some(TileHit::BlockInY { cell }) => {
                let push = pushback_from_block(&aabb, cell, Axis::Y);
                let body = &mut bodies[key];
                body.position.y = round(body.position.y + push);
                body.velocity = tile_reaction(body.velocity, &body.props, Axis::Y);
            }
            Some(TileHit::Slope { cell, slope }) => {
                let push = pushback_from_slope(&aabb, cell, slope);
                let body = &mut bodies[key];
                body.position.y = round(body.position.y + push);
                body.velocity = tile_reaction(body.velocity, &body.props, Axis::Y);
            }
            None => self.collide_bodies(bodies, key, collidables, Axis::Y),
        }
    }

    /// Scan the collidables list for the first overlapping body and resolve
    /// against it; later entries wait for their own moves (first collision
    /// wins, deliberately not exhaustive)
    fn collide_bodies(
        &self,
        bodies: &mut SlotMap<BodyKey, BodyState>,
        key: BodyKey,
        collidables: &[BodyKey],
        axis: Axis,
    ) {
        let aabb = bodies[key].aabb();
        for &other_key in collidables {
            if other_key == key {
                continue;
            }
            let Some(other) = bodies.get(other_key) else {
                continue;
            };
            if !other.props.is_collidable() {
                continue;
            }
            let other_aabb = other.aabb();
            if !aabb.overlaps(&other_aabb) {
                continue;
            }

            let push = pushback_from_body(&aabb, &other_aabb, axis);
            let (velocity, other_velocity) = body_reaction(
                bodies[key].velocity,
                &bodies[key].props,
                other.velocity,
                &other.props,
                axis,
            );

            {
                let body = &mut bodies[key];
                match axis {
                    Axis::X => body.position.x = round(body.position.x + push),
                    Axis::Y => body.position.y = round(body.position.y + push),
                }
                body.velocity = velocity;
            }
            bodies[other_key].velocity = other_velocity;
            break;
        }
    }

    /// Probe for tile or body contact one step in the given direction(s)
    /// without committing any movement
    ///
    /// Block hits count for any direction; slope-derived hits only obstruct
    /// vertically and count only for vertical probes.
    pub fn next_to(
        &self,
        bodies: &SlotMap<BodyKey, BodyState>,
        key: BodyKey,
        dir_x: f32,
        dir_y: f32,
        collidables: &[BodyKey],
    ) -> bool {
        let Some(body) = bodies.get(key) else {
            return false;
        };
        let step = Vec2::new(direction(dir_x), direction(dir_y)) * PROBE;
        if step == Vec2::ZERO {
            return false;
        }
        let probe = body.aabb().translated(step);

        let tile = match self.classify(&probe, step.y) {
            Some(TileHit::Block { .. }) => true,
            Some(_) => step.y != 0.0,
            None => false,
        };
        if tile {
            return true;
        }

        collidables.iter().any(|&other_key| {
            other_key != key
                && bodies.get(other_key).map_or(false, |other| {
                    other.props.is_collidable() && probe.overlaps(&other.aabb())
                })
        })
    }

    /// Nearest floor slope under the body's horizontal footprint, probed
    /// one step below the resolved position
    fn probe_slope(&self, aabb: &Aabb) -> Option<SlopeType> {
        let probe = aabb.translated(Vec2::new(0.0, -PROBE));
        let bottom = probe.min().y;
        let row = bottom.round() as i32;
        let first = probe.min().x.round() as i32;
        let last = probe.max().x.round() as i32;

        let mut nearest: Option<(f32, SlopeType)> = None;
        for column in first..=last {
            let cell = (column, row);
            let Some(slope) = self.slope_at(cell) else {
                continue;
            };
            if !slope.is_bottom() {
                continue;
            }
            let gap = slope.surface_at(cell, slope.leading_x(&probe)) - bottom;
            if gap <= 0.0 {
                continue;
            }
            if nearest.map_or(true, |(best, _)| gap < best) {
                nearest = Some((gap, slope));
            }
        }
        nearest.map(|(_, slope)| slope)
    }
}

impl Default for CollisionEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Vertical delta folded in for a sticky body that walked down its slope
fn slope_fold(on_slope: Option<SlopeType>, walked: f32) -> f32 {
    match on_slope {
        Some(SlopeType::PositiveBottom) if walked < -PRECISION => walked,
        Some(SlopeType::NegativeBottom) if walked > PRECISION => -walked,
        _ => 0.0,
    }
}

fn direction(value: f32) -> f32 {
    if value > 0.0 {
        1.0
    } else if value < 0.0 {
        -1.0
    } else {
        0.0
    }
}
