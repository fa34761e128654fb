//! Post-collision velocity rules
//!
//! Pure functions over velocities and material properties: the engine
//! computes the new velocities from copies, then writes them back through
//! the body store. Along the collision axis the rules are bounce and
//! momentum transfer; across it, glancing contact scales velocity by each
//! body's friction resistance.

use tilebox_math::{round, Vec2, PRECISION};

use crate::collision::Axis;
use crate::properties::PhysicsProperties;

/// New axis component plus friction across it, both rounded
fn resolve(velocity: Vec2, along: f32, friction_resistance: f32, axis: Axis) -> Vec2 {
    let across = axis.perp().of(velocity) * friction_resistance;
    axis.perp().with(axis.with(velocity, round(along)), round(across))
}

/// Velocity after colliding with a static tile on the given axis
///
/// Tiles are immovable and infinitely rigid: a rigid body simply stops on
/// the axis, a non-rigid body reflects the bounciness fraction of its
/// velocity. Both lose perpendicular speed to friction.
pub fn tile_reaction(velocity: Vec2, props: &PhysicsProperties, axis: Axis) -> Vec2 {
    let along = if props.is_rigid() {
        0.0
    } else {
        -axis.of(velocity) * props.bounciness
    };
    resolve(velocity, along, props.friction_resistance, axis)
}

/// Velocities after a body-pair collision on the given axis
///
/// `a` is the moving body, `b` the one it struck:
/// - both rigid: mutual blocking, both axis velocities drop to zero
/// - one rigid: the rigid body is unchanged by the encounter; the other
///   bounces off it when it is stationary, or receives its momentum scaled
///   by `(1 - knockback_resistance)` when it is moving
/// - neither rigid: each receives the other's momentum over its own mass,
///   scaled by its own `(1 - knockback_resistance)`
pub fn body_reaction(
    velocity_a: Vec2,
    props_a: &PhysicsProperties,
    velocity_b: Vec2,
    props_b: &PhysicsProperties,
    axis: Axis,
) -> (Vec2, Vec2) {
    let va = axis.of(velocity_a);
    let vb = axis.of(velocity_b);

    match (props_a.is_rigid(), props_b.is_rigid()) {
        (true, true) => (
            resolve(velocity_a, 0.0, props_a.friction_resistance, axis),
            resolve(velocity_b, 0.0, props_b.friction_resistance, axis),
        ),
        (false, true) => {
            let along = knock_or_bounce(va, vb, props_a, props_b);
            (
                resolve(velocity_a, along, props_a.friction_resistance, axis),
                velocity_b,
            )
        }
        (true, false) => {
            let along = knock_or_bounce(vb, va, props_b, props_a);
            (
                velocity_a,
                resolve(velocity_b, along, props_b.friction_resistance, axis),
            )
        }
        (false, false) => {
            let along_a = vb * props_b.mass / props_a.mass * (1.0 - props_a.knockback_resistance);
            let along_b = va * props_a.mass / props_b.mass * (1.0 - props_b.knockback_resistance);
            (
                resolve(velocity_a, along_a, props_a.friction_resistance, axis),
                resolve(velocity_b, along_b, props_b.friction_resistance, axis),
            )
        }
    }
}

/// Axis velocity of a non-rigid body after meeting a rigid one
fn knock_or_bounce(
    own: f32,
    rigid: f32,
    props: &PhysicsProperties,
    rigid_props: &PhysicsProperties,
) -> f32 {
    if rigid.abs() < PRECISION {
        // Stationary rigid body: reflect
        -own * props.bounciness
    } else {
        // Moving rigid body: take its momentum, minus what we reject
        rigid * rigid_props.mass / props.mass * (1.0 - props.knockback_resistance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::BodyFlags;

    fn rigid() -> PhysicsProperties {
        PhysicsProperties::new(10.0).with_flags(BodyFlags::RIGID | BodyFlags::COLLIDABLE)
    }

    // ==================== TILE REACTION TESTS ====================

    #[test]
    fn test_tile_reaction_dead_stop() {
        let props = PhysicsProperties::default(); // bounciness 0
        let v = tile_reaction(Vec2::new(3.0, -2.0), &props, Axis::Y);
        assert_eq!(v.y, 0.0);
        assert_eq!(v.x, 3.0); // friction resistance 1.0 keeps glancing speed
    }

    #[test]
    fn test_tile_reaction_bounce() {
        let props = PhysicsProperties::default().with_bounciness(0.5);
        let v = tile_reaction(Vec2::new(0.0, -2.0), &props, Axis::Y);
        assert_eq!(v.y, 1.0);
    }

    #[test]
    fn test_tile_reaction_friction() {
        let props = PhysicsProperties::default().with_friction_resistance(0.5);
        let v = tile_reaction(Vec2::new(4.0, -2.0), &props, Axis::Y);
        assert_eq!(v.x, 2.0);
    }

    #[test]
    fn test_tile_reaction_rigid_stops() {
        let props = rigid().with_bounciness(1.0);
        let v = tile_reaction(Vec2::new(0.0, -2.0), &props, Axis::Y);
        assert_eq!(v.y, 0.0);
    }

    // ==================== BODY REACTION TESTS ====================

    #[test]
    fn test_both_rigid_block_each_other() {
        let (va, vb) = body_reaction(
            Vec2::new(2.0, 1.0),
            &rigid(),
            Vec2::new(-3.0, 0.0),
            &rigid(),
            Axis::X,
        );
        assert_eq!(va.x, 0.0);
        assert_eq!(vb.x, 0.0);
    }

    #[test]
    fn test_bounce_off_stationary_rigid() {
        let props = PhysicsProperties::new(1.0).with_bounciness(0.5);
        let (va, vb) = body_reaction(
            Vec2::new(2.0, 0.0),
            &props,
            Vec2::ZERO,
            &rigid(),
            Axis::X,
        );
        assert_eq!(va.x, -1.0);
        assert_eq!(vb, Vec2::ZERO, "rigid body must be unchanged");
    }

    #[test]
    fn test_knockback_from_moving_rigid() {
        // 10-mass rigid body moving at 4 strikes a 2-mass body rejecting
        // half the incoming momentum: 4 * 10 / 2 * 0.5 = 10
        let props = PhysicsProperties::new(2.0).with_knockback_resistance(0.5);
        let (va, vb) = body_reaction(
            Vec2::ZERO,
            &props,
            Vec2::new(4.0, 0.0),
            &rigid(),
            Axis::X,
        );
        assert_eq!(va.x, 10.0);
        assert_eq!(vb.x, 4.0, "rigid body must be unchanged");
    }

    #[test]
    fn test_rigid_mover_is_unchanged() {
        let soft = PhysicsProperties::new(5.0);
        let (va, vb) = body_reaction(
            Vec2::new(4.0, 0.0),
            &rigid(),
            Vec2::ZERO,
            &soft,
            Axis::X,
        );
        assert_eq!(va.x, 4.0);
        // Struck body receives 4 * 10 / 5 = 8
        assert_eq!(vb.x, 8.0);
    }

    #[test]
    fn test_symmetric_head_on_exchange_cancels_momentum() {
        // Identical bodies, equal and opposite speed: axis velocities
        // exchange and the pair's net momentum is zero
        let props = PhysicsProperties::new(1.0);
        let (va, vb) = body_reaction(
            Vec2::new(1.0, 0.0),
            &props,
            Vec2::new(-1.0, 0.0),
            &props,
            Axis::X,
        );
        assert_eq!(va.x, -1.0);
        assert_eq!(vb.x, 1.0);
        assert_eq!(va.x * props.mass + vb.x * props.mass, 0.0);
    }

    #[test]
    fn test_momentum_scales_with_mass() {
        // 4-mass body at speed 1 strikes a stationary 1-mass body
        let heavy = PhysicsProperties::new(4.0);
        let light = PhysicsProperties::new(1.0);
        let (va, vb) = body_reaction(
            Vec2::new(1.0, 0.0),
            &heavy,
            Vec2::ZERO,
            &light,
            Axis::X,
        );
        assert_eq!(va.x, 0.0); // received the light body's zero momentum
        assert_eq!(vb.x, 4.0); // 1 * 4 / 1
    }

    #[test]
    fn test_knockback_resistance_scales_transfer() {
        let a = PhysicsProperties::new(1.0);
        let b = PhysicsProperties::new(1.0).with_knockback_resistance(0.75);
        let (_, vb) = body_reaction(
            Vec2::new(4.0, 0.0),
            &a,
            Vec2::ZERO,
            &b,
            Axis::X,
        );
        assert_eq!(vb.x, 1.0); // 4 * (1 - 0.75)
    }

    #[test]
    fn test_glancing_friction_applies_to_both() {
        let a = PhysicsProperties::new(1.0).with_friction_resistance(0.5);
        let b = PhysicsProperties::new(1.0).with_friction_resistance(0.25);
        let (va, vb) = body_reaction(
            Vec2::new(1.0, 4.0),
            &a,
            Vec2::new(-1.0, -4.0),
            &b,
            Axis::X,
        );
        assert_eq!(va.y, 2.0);
        assert_eq!(vb.y, -1.0);
    }
}
