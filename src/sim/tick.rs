//! Per-frame world advance
//!
//! One tick per rendered frame, driven by the host frame clock. The tick
//! integrates the actor, counter-shifts the scrolling root so the actor's
//! screen position stays fixed, and consumes any recycle flags left by the
//! previous collision callbacks: at most one reposition per flagged category
//! per tick, each O(1).

use glam::Vec2;

use super::spawn;
use super::state::{Phase, RecycleKind, World};
use crate::clamp_vel_y;

/// Input for a single tick
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// The one "activate" signal (tap): apply the fixed upward impulse
    pub activate: bool,
}

/// Advance the world by one frame of `dt` seconds
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    world.time_ticks += 1;

    // Input is frozen once the game is over
    if input.activate && world.phase == Phase::Playing {
        world
            .actor
            .body
            .apply_impulse(Vec2::new(0.0, world.config.flap_impulse));
        world.actor.since_input = 0.0;
    } else {
        world.actor.since_input += dt;
    }

    // Integrate the actor body, clamping vertical speed so repeated impulses
    // or a long fall never run away
    world.actor.body.integrate(world.config.gravity, dt);
    world.actor.body.vel.y = clamp_vel_y(world.actor.body.vel.y);
    world.actor.pos.y += world.actor.body.vel.y * dt;

    // Actor advances; the scrolling root counter-shifts by the same amount,
    // so on screen the world moves left while the actor stays put
    let step = world.actor.speed_x * dt;
    world.actor.pos.x += step;
    world.scroll_x -= step;

    // Shake is a one-shot; it just runs down
    world.shake_left = (world.shake_left - dt).max(0.0);

    // Deferred recycling: flags set during collision handling are observed
    // exactly once, here, and cleared whether or not each category fired
    let pending = world.pending.take();
    if pending.any() {
        if pending.is_marked(RecycleKind::Ground) {
            spawn::recycle_ground(world);
        }
        if pending.is_marked(RecycleKind::Pig) {
            spawn::recycle_pig(world);
        }
        if pending.is_marked(RecycleKind::Obstacle) {
            spawn::recycle_obstacle(world);
        }
        if pending.is_marked(RecycleKind::Background) {
            spawn::recycle_background(world);
        }
    }
}
