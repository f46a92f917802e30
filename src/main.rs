//! Skyward headless demo
//!
//! Runs the simulation core without a renderer: a trivial autopilot flaps
//! toward each upcoming gap while a stand-in for the host physics reports
//! collision begin-events back into the core. Useful for watching the
//! recycling and scoring machinery under `RUST_LOG=debug`.

use skyward::consts::SIM_DT;
use skyward::sim::{
    on_collision_begin, tick, Collision, Phase, TickInput, World, WorldEvent, GROUND_OFFSET_Y,
};
use skyward::WorldConfig;

/// Stand-in for the host physics: derive collision begin-events from
/// positions. The real host does this with bodies and sensors.
fn detect_collisions(world: &World, next_gate_x: f32) -> Vec<Collision> {
    let mut out = Vec::new();
    let actor = &world.actor;
    let config = &world.config;

    if actor.pos.x >= next_gate_x {
        out.push(Collision::Gate);
    }

    // Ground contact
    if actor.pos.y <= config.ground_height + GROUND_OFFSET_Y {
        out.push(Collision::Terrain);
    }

    // Obstacle body contact: inside an obstacle column but outside its gap
    for obstacle in world.obstacles.iter() {
        let dx = (actor.pos.x - obstacle.pos.x).abs();
        let dy = (actor.pos.y - obstacle.gap_y).abs();
        if dx < config.obstacle_width / 2.0 && dy > config.obstacle_gap_height / 2.0 {
            out.push(Collision::Terrain);
        }
    }

    for pig in world.pigs.iter() {
        if pig.body.collides
            && !pig.popped
            && (actor.pos - pig.pos).length() < config.pig_width / 2.0
        {
            out.push(Collision::Pig { index: pig.index });
        }
    }
    out
}

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| std::time::UNIX_EPOCH.elapsed().map_or(0, |d| d.as_secs()));
    let config = match args.next() {
        Some(path) => {
            let json = std::fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("cannot read config {path}: {e}");
                std::process::exit(1);
            });
            WorldConfig::from_json(&json).unwrap_or_else(|e| {
                eprintln!("bad config {path}: {e}");
                std::process::exit(1);
            })
        }
        None => WorldConfig::default(),
    };

    let mut world = match World::new(config, seed) {
        Ok(world) => world,
        Err(e) => {
            eprintln!("bad config: {e}");
            std::process::exit(1);
        }
    };
    log::info!("demo run, seed {seed}");

    let mut next_gate_x = world.config.first_obstacle_x;
    let max_ticks = (120.0 / SIM_DT) as u64; // two simulated minutes

    while world.phase == Phase::Playing && world.time_ticks < max_ticks {
        // Autopilot: aim for the gap of the nearest obstacle ahead
        let target = world
            .obstacles
            .iter()
            .filter(|o| o.pos.x + world.config.obstacle_width / 2.0 >= world.actor.pos.x)
            .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x))
            .map_or(world.config.screen_height / 2.0, |o| o.gap_y);
        let activate = world.actor.pos.y < target && world.actor.body.vel.y < 50.0;

        for collision in detect_collisions(&world, next_gate_x) {
            if collision == Collision::Gate {
                next_gate_x += world.config.obstacle_spacing;
            }
            let _ = on_collision_begin(&mut world, collision);
        }

        tick(&mut world, &TickInput { activate }, SIM_DT);

        for event in world.drain_events() {
            if let WorldEvent::GameOver { score } = event {
                log::info!("terminal state after {} ticks, score {score}", world.time_ticks);
            }
        }
    }

    println!(
        "seed {seed}: score {} multiplier {} after {:.1}s",
        world.score,
        world.multiplier,
        world.time_ticks as f32 * SIM_DT
    );
}
