//! World container and simulation stepping
//!
//! The `World` owns the bodies, the collidables list the engine scans, and
//! the tile maps (through the engine). `step` drives one simulation tick:
//! gravity, velocity integration, per-body collision resolution, and the
//! slope-contact write-back.

use serde::{Deserialize, Serialize};
use slotmap::SlotMap;
use tilebox_math::{round, Vec2};
use tilebox_physics::{BodyKey, BodyState, CollisionEngine, Grid, MoveOutcome, SlopeType};

/// Configuration for the physics simulation
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PhysicsConfig {
    /// Gravity acceleration applied to the y axis (negative = down)
    pub gravity: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self { gravity: -20.0 }
    }
}

impl PhysicsConfig {
    /// Create a new physics config with the given gravity
    pub fn new(gravity: f32) -> Self {
        Self { gravity }
    }
}

/// The simulation world containing all bodies
pub struct World {
    /// All bodies in the world (using generational keys)
    bodies: SlotMap<BodyKey, BodyState>,
    /// Bodies the engine tests pairwise, in insertion order. Gameplay
    /// observes this order through first-collision-wins resolution.
    collidables: Vec<BodyKey>,
    /// The collision engine holding the level's tile maps
    engine: CollisionEngine,
    /// Physics configuration
    pub config: PhysicsConfig,
}

impl World {
    /// Create a new world with default configuration
    pub fn new() -> Self {
        Self::with_config(PhysicsConfig::default())
    }

    /// Create a new world with custom configuration
    pub fn with_config(config: PhysicsConfig) -> Self {
        Self {
            bodies: SlotMap::with_key(),
            collidables: Vec::new(),
            engine: CollisionEngine::new(),
            config,
        }
    }

    /// Install the level's tile maps, replacing any previous level
    pub fn load_tile_maps(&mut self, blocks: Grid<bool>, slopes: Grid<Option<SlopeType>>) {
        self.engine.give_block_map(blocks);
        self.engine.give_slope_map(slopes);
        log::info!("level tile maps loaded");
    }

    /// Access the collision engine
    pub fn engine(&self) -> &CollisionEngine {
        &self.engine
    }

    /// Add a body to the world and return its key
    ///
    /// Collidable bodies also join the collidables list, in insertion
    /// order.
    pub fn add_body(&mut self, body: BodyState) -> BodyKey {
        let collidable = body.props.is_collidable();
        let key = self.bodies.insert(body);
        if collidable {
            self.collidables.push(key);
        }
        key
    }

    /// Remove a body from the world and return it
    pub fn remove_body(&mut self, key: BodyKey) -> Option<BodyState> {
        self.collidables.retain(|&k| k != key);
        self.bodies.remove(key)
    }

    /// Get an immutable reference to a body by key
    pub fn get_body(&self, key: BodyKey) -> Option<&BodyState> {
        self.bodies.get(key)
    }

    /// Get a mutable reference to a body by key
    pub fn get_body_mut(&mut self, key: BodyKey) -> Option<&mut BodyState> {
        self.bodies.get_mut(key)
    }

    /// Get the number of bodies in the world
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    /// Iterate over all body keys
    pub fn body_keys(&self) -> impl Iterator<Item = BodyKey> + '_ {
        self.bodies.keys()
    }

    /// The keys the engine tests pairwise, in insertion order
    pub fn collidables(&self) -> &[BodyKey] {
        &self.collidables
    }

    /// Move one body by an explicit delta, outside the stepping loop
    pub fn move_body(&mut self, key: BodyKey, delta: Vec2) -> MoveOutcome {
        let outcome = self
            .engine
            .move_body(&mut self.bodies, key, delta, &self.collidables);
        if let Some(body) = self.bodies.get_mut(key) {
            body.on_slope = outcome.on_slope;
        }
        outcome
    }

    /// Probe for contact next to a body without moving it
    pub fn next_to(&self, key: BodyKey, dir_x: f32, dir_y: f32) -> bool {
        self.engine
            .next_to(&self.bodies, key, dir_x, dir_y, &self.collidables)
    }

    /// Step the simulation forward by dt seconds
    ///
    /// For each body in insertion order: apply scaled gravity, integrate
    /// velocity into a requested delta, resolve the move through the
    /// engine, and write the refreshed slope contact back onto the body.
    pub fn step(&mut self, dt: f32) {
        let keys: Vec<BodyKey> = self.bodies.keys().collect();
        for key in keys {
            let delta = {
                let body = &mut self.bodies[key];
                let pull = self.config.gravity * body.props.gravity_scale * dt;
                body.velocity.y = round(body.velocity.y + pull);
                body.velocity * dt
            };
            let outcome = self
                .engine
                .move_body(&mut self.bodies, key, delta, &self.collidables);
            self.bodies[key].on_slope = outcome.on_slope;
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilebox_physics::PhysicsProperties;

    fn floored_world() -> World {
        let mut world = World::new();
        let mut blocks = Grid::new(16, 16);
        for x in 0..16 {
            blocks.set(x, 0, true);
        }
        world.load_tile_maps(blocks, Grid::new(16, 16));
        world
    }

    #[test]
    fn test_physics_config_default() {
        let config = PhysicsConfig::default();
        assert_eq!(config.gravity, -20.0);
    }

    #[test]
    fn test_physics_config_custom() {
        let config = PhysicsConfig::new(-10.0);
        assert_eq!(config.gravity, -10.0);
    }

    #[test]
    fn test_world_add_body() {
        let mut world = World::new();
        assert_eq!(world.body_count(), 0);

        let key = world.add_body(BodyState::new(Vec2::new(0.0, 5.0), Vec2::new(0.4, 0.4)));

        assert!(world.get_body(key).is_some());
        assert_eq!(world.body_count(), 1);
        assert_eq!(world.collidables(), &[key]);
    }

    #[test]
    fn test_non_collidable_body_not_listed() {
        let mut world = World::new();
        let key = world.add_body(
            BodyState::new(Vec2::ZERO, Vec2::new(0.4, 0.4)).with_props(PhysicsProperties::GHOST),
        );
        assert!(world.get_body(key).is_some());
        assert!(world.collidables().is_empty());
    }

    #[test]
    fn test_world_get_body_mut() {
        let mut world = World::new();
        let key = world.add_body(BodyState::new(Vec2::new(0.0, 5.0), Vec2::new(0.4, 0.4)));

        {
            let body = world.get_body_mut(key).expect("body should exist");
            body.velocity = Vec2::new(1.0, 0.0);
        }

        assert_eq!(world.get_body(key).unwrap().velocity, Vec2::new(1.0, 0.0));
    }

    #[test]
    fn test_stale_key_returns_none() {
        let mut world = World::new();
        let key = world.add_body(BodyState::new(Vec2::new(0.0, 5.0), Vec2::new(0.4, 0.4)));

        assert!(world.remove_body(key).is_some());
        assert!(world.get_body(key).is_none());
        assert!(world.collidables().is_empty());

        // A new body gets a different key; the old one stays dead
        let new_key = world.add_body(BodyState::new(Vec2::new(1.0, 5.0), Vec2::new(0.4, 0.4)));
        assert!(world.get_body(key).is_none());
        assert!(world.get_body(new_key).is_some());
    }

    #[test]
    fn test_gravity_application() {
        let mut world = floored_world();
        let key = world.add_body(BodyState::new(Vec2::new(5.0, 10.0), Vec2::new(0.4, 0.4)));

        world.step(0.1);

        // 0 + (-20) * 0.1 = -2.0
        let body = world.get_body(key).unwrap();
        assert_eq!(body.velocity.y, -2.0);
        assert!(body.position.y < 10.0);
    }

    #[test]
    fn test_gravity_scale() {
        let mut world = floored_world();
        let key = world.add_body(
            BodyState::new(Vec2::new(5.0, 10.0), Vec2::new(0.4, 0.4))
                .with_props(PhysicsProperties::default().with_gravity_scale(0.5)),
        );

        world.step(0.1);

        assert_eq!(world.get_body(key).unwrap().velocity.y, -1.0);
    }

    #[test]
    fn test_body_settles_on_floor() {
        let mut world = floored_world();
        let key = world.add_body(BodyState::new(Vec2::new(5.0, 3.0), Vec2::new(0.4, 0.4)));

        for _ in 0..120 {
            world.step(1.0 / 60.0);
        }

        let body = world.get_body(key).unwrap();
        // Floor row tops out at y = 0.5; the body rests a rounding unit above
        assert!(
            (body.aabb().min().y - 0.501).abs() < 0.01,
            "body should rest on the floor, bottom at {}",
            body.aabb().min().y
        );
        assert_eq!(body.velocity.y, 0.0);
        assert!(world.next_to(key, 0.0, -1.0), "grounded probe should hit");
    }

    #[test]
    fn test_step_is_deterministic() {
        let run = || {
            let mut world = floored_world();
            let key = world.add_body(
                BodyState::new(Vec2::new(5.0, 6.0), Vec2::new(0.4, 0.4))
                    .with_velocity(Vec2::new(1.3, 0.0)),
            );
            for _ in 0..60 {
                world.step(1.0 / 60.0);
            }
            let body = world.get_body(key).unwrap();
            (body.position, body.velocity)
        };
        assert_eq!(run(), run());
    }
}
