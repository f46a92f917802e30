//! Spawn planning and recycling
//!
//! Each recycle repositions the pool's current entity to the next upcoming
//! slot and steps the cursor; deterministic spacing plus seeded jitter keeps
//! the world endless with a constant entity set.
//!
//! Offscreen checks convert an entity's scroll-root x into the camera frame
//! by adding the scrolling root's own translation. They run only at gate
//! crossings, so the cost is bounded per obstacle passed, not per frame.

use rand::Rng;

use super::state::{RecycleKind, World, WorldEvent, GROUND_OFFSET_Y};
use crate::config::WorldConfig;

/// Camera-frame x of a point given in scroll-root space
#[inline]
pub fn camera_x(world: &World, x: f32) -> f32 {
    x + world.scroll_x
}

/// Recycling threshold for a category: one entity-width past the left edge
pub fn offscreen_threshold(config: &WorldConfig, kind: RecycleKind) -> f32 {
    match kind {
        RecycleKind::Ground => -config.ground_width,
        RecycleKind::Obstacle => -config.obstacle_width,
        RecycleKind::Pig => -config.pig_width,
        RecycleKind::Background => -config.panel_width,
    }
}

/// True iff the entity at scroll-root `x` has scrolled past `threshold`
#[inline]
pub fn is_offscreen(world: &World, x: f32, threshold: f32) -> bool {
    camera_x(world, x) <= threshold
}

/// Random pig height: anywhere in the usable band above the ground
pub fn random_pig_y(config: &WorldConfig, rng: &mut impl Rng) -> f32 {
    2.0 * config.ground_height + rng.random_range(0.0..config.usable_height())
}

/// Move the current obstacle to the next slot, re-roll its gap, and advance
/// both the spawn cursor and the pool cursor
pub fn recycle_obstacle(world: &mut World) {
    let config = &world.config;
    let gap_lo = config.ground_height + config.obstacle_gap_height / 2.0;
    let gap_hi = config.screen_height - config.obstacle_gap_height / 2.0;
    let gap_y = world.rng.random_range(gap_lo..gap_hi);

    let x = world.next_obstacle_x;
    let obstacle = world.obstacles.current_mut();
    obstacle.pos.x = x;
    obstacle.pos.y = GROUND_OFFSET_Y;
    obstacle.gap_y = gap_y;

    world.next_obstacle_x += world.config.obstacle_spacing;
    world.obstacles.advance();
    world.push_event(WorldEvent::Recycled {
        kind: RecycleKind::Obstacle,
    });
    log::debug!("obstacle recycled to x={x}");
}

/// Shift the current ground block to the far end of the tiled strip
pub fn recycle_ground(world: &mut World) {
    let shift = world.config.ground_width * world.ground.len() as f32;
    world.ground.current_mut().pos.x += shift;
    world.ground.advance();
    world.push_event(WorldEvent::Recycled {
        kind: RecycleKind::Ground,
    });
}

/// Jump the current background panel forward past the rest of the pool
pub fn recycle_background(world: &mut World) {
    let shift = (world.panels.len() as f32 + 1.0) * world.config.panel_width;
    world.panels.current_mut().pos.x += shift;
    world.panels.advance();
    world.push_event(WorldEvent::Recycled {
        kind: RecycleKind::Background,
    });
}

/// Reposition the current pig to a jittered slot centered between two
/// upcoming obstacles, then settle its streak bookkeeping
///
/// A popped pig is revived (flag and collision mask restored) without
/// touching the multiplier. A pig that went offscreen unpopped breaks the
/// streak unless it was the next one in slot order.
pub fn recycle_pig(world: &mut World) {
    let config = &world.config;
    let y = random_pig_y(config, &mut world.rng);
    let mut jitter = world
        .rng
        .random_range(0.0..config.obstacle_spacing / 3.0);
    if world.rng.random_bool(0.5) {
        jitter = -jitter;
    }
    let total = world.pigs.len() as f32;
    let x = config.obstacle_spacing / 2.0
        + world.next_obstacle_x
        + total * config.obstacle_spacing
        + jitter;

    let last_popped = world.last_popped;
    let index = world.pigs.cursor();
    let pig = world.pigs.current_mut();
    pig.pos.x = x;
    pig.pos.y = y;

    let mut broke_streak = false;
    if pig.popped {
        pig.popped = false;
        pig.body.collides = true;
    } else if last_popped != index + 1 {
        broke_streak = true;
    }
    if broke_streak {
        world.multiplier = 0;
    }

    world.pigs.advance();
    world.push_event(WorldEvent::Recycled {
        kind: RecycleKind::Pig,
    });
    log::debug!("pig {index} recycled to ({x:.1}, {y:.1})");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Phase;

    fn world() -> World {
        World::new(WorldConfig::default(), 42).unwrap()
    }

    #[test]
    fn camera_frame_compensates_scroll() {
        let mut w = world();
        w.scroll_x = -500.0;
        assert_eq!(camera_x(&w, 400.0), -100.0);
        assert!(is_offscreen(&w, 400.0, -80.0));
        assert!(!is_offscreen(&w, 450.0, -80.0));
    }

    #[test]
    fn thresholds_are_one_entity_width() {
        let config = WorldConfig::default();
        assert_eq!(
            offscreen_threshold(&config, RecycleKind::Ground),
            -config.ground_width
        );
        assert_eq!(
            offscreen_threshold(&config, RecycleKind::Background),
            -config.panel_width
        );
    }

    #[test]
    fn obstacle_recycle_advances_spawn_cursor() {
        let mut w = world();
        let before = w.next_obstacle_x;
        let slot = w.obstacles.cursor();
        recycle_obstacle(&mut w);
        assert_eq!(w.obstacles.get(slot).unwrap().pos.x, before);
        assert_eq!(w.next_obstacle_x, before + w.config.obstacle_spacing);
    }

    #[test]
    fn obstacle_gap_stays_in_band() {
        let mut w = world();
        for _ in 0..50 {
            let slot = w.obstacles.cursor();
            recycle_obstacle(&mut w);
            let gap = w.config.obstacle_gap_height;
            let gap_y = w.obstacles.get(slot).unwrap().gap_y;
            assert!(gap_y >= w.config.ground_height + gap / 2.0);
            assert!(gap_y <= w.config.screen_height - gap / 2.0);
        }
    }

    #[test]
    fn ground_recycle_shifts_to_strip_end() {
        let mut w = world();
        let width = w.config.ground_width;
        let len = w.ground.len() as f32;
        let before = w.ground.current().pos.x;
        recycle_ground(&mut w);
        assert_eq!(w.ground.get(0).unwrap().pos.x, before + width * len);
        assert_eq!(w.ground.cursor(), 1);
    }

    #[test]
    fn background_recycle_jumps_pool_plus_one_widths() {
        let mut w = world();
        let before = w.panels.current().pos.x;
        recycle_background(&mut w);
        let expected = before + 4.0 * w.config.panel_width;
        assert_eq!(w.panels.get(0).unwrap().pos.x, expected);
    }

    #[test]
    fn pig_slot_centered_between_upcoming_obstacles() {
        let mut w = world();
        let spacing = w.config.obstacle_spacing;
        let center = spacing / 2.0 + w.next_obstacle_x + w.pigs.len() as f32 * spacing;
        recycle_pig(&mut w);
        let x = w.pigs.get(0).unwrap().pos.x;
        assert!((x - center).abs() <= spacing / 3.0 + 1e-3);
        let y = w.pigs.get(0).unwrap().pos.y;
        assert!(y >= 2.0 * w.config.ground_height);
    }

    #[test]
    fn recycling_popped_pig_revives_it() {
        let mut w = world();
        w.multiplier = 2;
        {
            let pig = w.pigs.current_mut();
            pig.popped = true;
            pig.body.collides = false;
        }
        recycle_pig(&mut w);
        let pig = w.pigs.get(0).unwrap();
        assert!(!pig.popped);
        assert!(pig.body.collides);
        // Reviving never touches the multiplier
        assert_eq!(w.multiplier, 2);
    }

    #[test]
    fn recycling_unpopped_pig_out_of_order_breaks_streak() {
        let mut w = world();
        w.multiplier = 3;
        w.last_popped = 2; // cursor is 0, so last_popped != 0 + 1
        recycle_pig(&mut w);
        assert_eq!(w.multiplier, 0);
    }

    #[test]
    fn recycling_unpopped_pig_in_order_keeps_streak() {
        let mut w = world();
        w.multiplier = 3;
        w.last_popped = 1; // cursor is 0 and 1 == 0 + 1
        recycle_pig(&mut w);
        assert_eq!(w.multiplier, 3);
    }

    #[test]
    fn recycling_never_changes_pool_sizes() {
        let mut w = world();
        for _ in 0..20 {
            recycle_ground(&mut w);
            recycle_obstacle(&mut w);
            recycle_pig(&mut w);
            recycle_background(&mut w);
        }
        assert_eq!(w.ground.len(), 3);
        assert_eq!(w.obstacles.len(), 3);
        assert_eq!(w.pigs.len(), 3);
        assert_eq!(w.panels.len(), 3);
        assert_eq!(w.phase, Phase::Playing);
    }
}
