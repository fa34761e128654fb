//! Dynamic body state

use slotmap::new_key_type;
use tilebox_math::{round_vec, Vec2};

use crate::properties::PhysicsProperties;
use crate::shapes::Aabb;
use crate::tilemap::SlopeType;

// Define generational key type for bodies
new_key_type! {
    /// Key to a body in a body store
    ///
    /// Uses generational indexing to prevent the ABA problem where a handle
    /// could point to a reused slot. If a body is removed and its slot
    /// reused, old keys will return None instead of pointing to the wrong
    /// body.
    pub struct BodyKey;
}

/// A movable rectangle with velocity and material properties
///
/// The collision extent may be narrower than the body's full visual size;
/// the engine only ever sees `half_extents`. Position and velocity are kept
/// decimal-rounded by the engine; the constructors round whatever they are
/// given so a freshly built body starts on the same lattice.
#[derive(Clone, Debug, PartialEq)]
pub struct BodyState {
    /// Center position in world coordinates
    pub position: Vec2,
    /// Velocity in world units per second
    pub velocity: Vec2,
    /// Collision half-extents, both components >= 0
    pub half_extents: Vec2,
    /// Material and behavior properties
    pub props: PhysicsProperties,
    /// Floor slope currently adhered to; refreshed by the move outcome,
    /// meaningful only for sticky bodies
    pub on_slope: Option<SlopeType>,
}

impl BodyState {
    /// Create a body at rest
    pub fn new(position: Vec2, half_extents: Vec2) -> Self {
        assert!(
            half_extents.x >= 0.0 && half_extents.y >= 0.0,
            "body half-extents must be non-negative, got ({}, {})",
            half_extents.x,
            half_extents.y
        );
        Self {
            position: round_vec(position),
            velocity: Vec2::ZERO,
            half_extents,
            props: PhysicsProperties::default(),
            on_slope: None,
        }
    }

    /// Set the starting velocity
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = round_vec(velocity);
        self
    }

    /// Set the material properties
    pub fn with_props(mut self, props: PhysicsProperties) -> Self {
        self.props = props;
        self
    }

    /// The collision box at the current position
    pub fn aabb(&self) -> Aabb {
        Aabb::new(self.position, self.half_extents)
    }
}
