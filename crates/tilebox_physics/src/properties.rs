//! Physical properties attached to every dynamic body

use bitflags::bitflags;

bitflags! {
    /// Behavior switches for a body
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct BodyFlags: u8 {
        /// Velocity cannot be altered by collision with non-rigid bodies
        const RIGID = 1 << 0;
        /// Participates in collision detection and resolution
        const COLLIDABLE = 1 << 1;
        /// Adheres to descending slopes instead of detaching and falling
        const STICKY = 1 << 2;
    }
}

/// Material and mass properties used by collision response
///
/// All ratio fields are clamped to `[0.0, 1.0]` at construction:
/// - `bounciness`: fraction of velocity reflected when hitting a rigid body
///   or a tile
/// - `friction_resistance`: fraction of the perpendicular velocity retained
///   after a collision (1.0 = frictionless glancing contact)
/// - `knockback_resistance`: fraction of incoming momentum rejected
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhysicsProperties {
    /// Mass of the body, strictly positive
    pub mass: f32,
    /// Velocity fraction reflected on rigid contact (0.0 = dead stop)
    pub bounciness: f32,
    /// Perpendicular velocity fraction retained after a collision
    pub friction_resistance: f32,
    /// Incoming momentum fraction rejected during a collision
    pub knockback_resistance: f32,
    /// Multiplier on world gravity for this body
    pub gravity_scale: f32,
    /// Behavior switches
    pub flags: BodyFlags,
}

impl Default for PhysicsProperties {
    fn default() -> Self {
        Self {
            mass: 1.0,
            bounciness: 0.0,
            friction_resistance: 1.0,
            knockback_resistance: 0.0,
            gravity_scale: 1.0,
            flags: BodyFlags::COLLIDABLE,
        }
    }
}

impl PhysicsProperties {
    /// Wooden-crate feel: heavy-ish, barely bounces, scrubs speed on contact
    pub const CRATE: Self = Self {
        mass: 4.0,
        bounciness: 0.1,
        friction_resistance: 0.6,
        knockback_resistance: 0.3,
        gravity_scale: 1.0,
        flags: BodyFlags::COLLIDABLE,
    };

    /// Rubber-ball feel: light, very bouncy, keeps its glancing speed
    pub const BALL: Self = Self {
        mass: 1.0,
        bounciness: 0.8,
        friction_resistance: 0.95,
        knockback_resistance: 0.0,
        gravity_scale: 1.0,
        flags: BodyFlags::COLLIDABLE,
    };

    /// Immovable-by-contact mass: rigid, rejects all knockback
    pub const ANVIL: Self = Self {
        mass: 40.0,
        bounciness: 0.0,
        friction_resistance: 0.8,
        knockback_resistance: 1.0,
        gravity_scale: 1.0,
        flags: BodyFlags::RIGID.union(BodyFlags::COLLIDABLE),
    };

    /// Passes through everything; moves but never collides
    pub const GHOST: Self = Self {
        mass: 1.0,
        bounciness: 0.0,
        friction_resistance: 1.0,
        knockback_resistance: 0.0,
        gravity_scale: 0.0,
        flags: BodyFlags::empty(),
    };

    /// Create properties with a given mass and defaults elsewhere
    ///
    /// Mass must be strictly positive; zero or negative mass is a
    /// programming error in the caller.
    pub fn new(mass: f32) -> Self {
        assert!(mass > 0.0, "body mass must be > 0, got {mass}");
        Self {
            mass,
            ..Self::default()
        }
    }

    /// Set bounciness, clamped to [0, 1]
    pub fn with_bounciness(mut self, bounciness: f32) -> Self {
        self.bounciness = bounciness.clamp(0.0, 1.0);
        self
    }

    /// Set friction resistance, clamped to [0, 1]
    pub fn with_friction_resistance(mut self, friction_resistance: f32) -> Self {
        self.friction_resistance = friction_resistance.clamp(0.0, 1.0);
        self
    }

    /// Set knockback resistance, clamped to [0, 1]
    pub fn with_knockback_resistance(mut self, knockback_resistance: f32) -> Self {
        self.knockback_resistance = knockback_resistance.clamp(0.0, 1.0);
        self
    }

    /// Set the gravity multiplier
    pub fn with_gravity_scale(mut self, gravity_scale: f32) -> Self {
        self.gravity_scale = gravity_scale;
        self
    }

    /// Replace the behavior flags
    pub fn with_flags(mut self, flags: BodyFlags) -> Self {
        self.flags = flags;
        self
    }

    #[inline]
    pub fn is_rigid(&self) -> bool {
        self.flags.contains(BodyFlags::RIGID)
    }

    #[inline]
    pub fn is_collidable(&self) -> bool {
        self.flags.contains(BodyFlags::COLLIDABLE)
    }

    #[inline]
    pub fn is_sticky(&self) -> bool {
        self.flags.contains(BodyFlags::STICKY)
    }
}
