//! plat2d - headless platformer demo
//!
//! Builds a small level in code and plays a scripted run through it,
//! reporting through the log.

use plat2d::config::AppConfig;
use plat2d::input::InputScript;
use plat2d::level::LevelBuilder;
use plat2d::systems::SimulationSystem;
use plat2d_core::{BlueprintError, GameWorld, Vec2, WorldConfig};

const GROUND: f32 = 480.0;

/// Floor with a gap, a ramp up to a ledge, a rope and a jump-through platform
fn build_level(config: WorldConfig) -> Result<GameWorld, BlueprintError> {
    let tile = config.tile_size;
    LevelBuilder::new(config)
        .add_floor(-10.0 * tile, 12.0 * tile, GROUND)
        .add_floor(14.0 * tile, 30.0 * tile, GROUND)
        .add_wall(-10.5 * tile, GROUND - 8.0 * tile, GROUND)
        .add_ramp(Vec2::new(16.0 * tile, GROUND), Vec2::new(19.0 * tile, GROUND - 2.0 * tile))
        .add_floor(19.0 * tile, 24.0 * tile, GROUND - 2.0 * tile)
        .add_rope(
            Vec2::new(24.0 * tile, GROUND - 2.0 * tile),
            Vec2::new(28.0 * tile, GROUND - 3.0 * tile),
        )
        .add_one_way(2.0 * tile, 6.0 * tile, GROUND - 2.5 * tile)
        .add_wall(30.5 * tile, GROUND - 8.0 * tile, GROUND)
        .add_green_slime(8.0 * tile, GROUND)
        .add_blue_slime(21.0 * tile, GROUND - 2.0 * tile)
        .add_blue_slime(4.0 * tile, GROUND - 2.5 * tile)
        .add_player(0.0, GROUND)
        .build()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load config: {}. Using defaults.", e);
        AppConfig::default()
    });

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(config.debug.log_level.as_str()))
        .init();

    let mut world = build_level(config.to_world_config())?;
    log::info!(
        "Built level with {} colliders and {} bodies",
        world.physics().colliders().len(),
        world.physics().body_count()
    );

    let script = InputScript::demo();
    let mut sim = SimulationSystem::new(&config.demo, &config.debug);
    for frame in 0..config.demo.frames {
        sim.update(&mut world, &script.input_at(frame));
    }

    let stats = sim.stats();
    log::info!(
        "Ran {} frames: {} shots, {} bodies removed, {} unconverged corrections",
        stats.frames,
        stats.shots,
        stats.kills,
        stats.unconverged
    );
    Ok(())
}
