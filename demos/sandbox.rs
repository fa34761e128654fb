//! Sandbox - Falling Bodies Demo
//!
//! Demonstrates tile-grid physics without any rendering:
//! - Loading tile maps with a floor, walls and a slope ramp
//! - Dynamic bodies with different material properties
//! - A sticky walker descending the ramp
//! - Grounded checks via the proximity probe
//!
//! Run with: `cargo run --example sandbox`

use tilebox::config::AppConfig;
use tilebox::{BodyFlags, BodyState, Grid, PhysicsProperties, SlopeType, Vec2, World};

fn main() {
    let config = AppConfig::load().unwrap_or_default();
    env_logger::Builder::from_default_env()
        .parse_filters(&config.debug.log_level)
        .init();

    let mut world = World::with_config(config.physics.clone());
    world.load_tile_maps(level_blocks(), level_slopes());

    // A crate dropping onto the floor, a ball bouncing next to it, and a
    // sticky walker descending the ramp
    let crate_key = world.add_body(
        BodyState::new(Vec2::new(3.0, 8.0), Vec2::new(0.4, 0.4))
            .with_props(PhysicsProperties::CRATE),
    );
    let ball = world.add_body(
        BodyState::new(Vec2::new(6.0, 10.0), Vec2::new(0.3, 0.3))
            .with_props(PhysicsProperties::BALL),
    );
    let walker = world.add_body(
        BodyState::new(Vec2::new(11.0, 4.0), Vec2::new(0.3, 0.3)).with_props(
            PhysicsProperties::default().with_flags(BodyFlags::COLLIDABLE | BodyFlags::STICKY),
        ),
    );

    log::info!("stepping {} bodies", world.body_count());
    for frame in 0..360 {
        // Keep the walker strolling left, down the ramp
        world.get_body_mut(walker).unwrap().velocity.x = -1.2;
        world.step(1.0 / 60.0);

        if frame % 60 == 0 {
            for (name, key) in [("crate", crate_key), ("ball", ball), ("walker", walker)] {
                let body = world.get_body(key).unwrap();
                log::info!(
                    "t={:.1}s {name}: pos=({:.3}, {:.3}) vel=({:.3}, {:.3}) slope={:?}",
                    frame as f32 / 60.0,
                    body.position.x,
                    body.position.y,
                    body.velocity.x,
                    body.velocity.y,
                    body.on_slope,
                );
            }
        }
    }

    for (name, key) in [("crate", crate_key), ("ball", ball), ("walker", walker)] {
        let body = world.get_body(key).unwrap();
        println!(
            "{name}: rest=({:.3}, {:.3}) grounded={}",
            body.position.x,
            body.position.y,
            world.next_to(key, 0.0, -1.0),
        );
    }
}

/// 16x16 level: solid floor, side walls, a plinth and a ramp up to it
fn level_blocks() -> Grid<bool> {
    let mut blocks = Grid::new(16, 16);
    for x in 0..16 {
        blocks.set(x, 0, true);
    }
    for y in 0..16 {
        blocks.set(0, y, true);
        blocks.set(15, y, true);
    }
    // Plinth the ramp leads onto
    for x in 11..15 {
        blocks.set(x, 1, true);
    }
    blocks
}

fn level_slopes() -> Grid<Option<SlopeType>> {
    let mut slopes = Grid::new(16, 16);
    // Ramp rising rightward onto the plinth
    slopes.set(10, 1, Some(SlopeType::PositiveBottom));
    slopes
}
