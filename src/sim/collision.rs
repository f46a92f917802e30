//! Collision reaction state machine
//!
//! The host physics delivers begin-events tagged by semantic category; this
//! module reacts by mutating score and streak state, flagging deferred
//! recycles, or entering the terminal state. Heavy work (repositioning) is
//! never done here; it is flagged and consumed on the next tick.

use crate::consts::{GAME_OVER_ROTATION, GATE_SCORE, PIG_SCORE_BASE};

use super::spawn::{is_offscreen, offscreen_threshold};
use super::state::{Phase, RecycleKind, World, WorldEvent};

/// A collision begin-event, tagged by what the actor hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Ground or obstacle body
    Terrain,
    /// The scoring region between an obstacle pair
    Gate,
    /// A pig, identified by its pool slot
    Pig { index: usize },
}

/// Whether the host should resolve the collision physically.
/// Always [`Resolve`](CollisionResponse::Resolve) in this design; the type
/// exists so the contract with the host stays explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum CollisionResponse {
    Resolve,
    Ignore,
}

/// React to a collision begin-event
///
/// Events arriving after game over are tolerated as no-ops, never errors.
pub fn on_collision_begin(world: &mut World, collision: Collision) -> CollisionResponse {
    match collision {
        Collision::Terrain => {
            if world.phase == Phase::Playing {
                trigger_game_over(world);
            }
        }
        Collision::Gate => {
            if world.phase == Phase::Playing {
                cross_gate(world);
            }
        }
        Collision::Pig { index } => {
            if world.phase == Phase::Playing {
                pop_pig(world, index);
            }
        }
    }
    CollisionResponse::Resolve
}

/// Award the gate score, then run the amortized offscreen sweep: check each
/// pool's current recycle candidate and flag categories that crossed their
/// threshold. This keeps the per-frame tick free of offscreen math.
fn cross_gate(world: &mut World) {
    world.score += GATE_SCORE;
    log::info!("gate crossed, score {}", world.score);
    world.push_event(WorldEvent::GateCrossed { score: world.score });

    for kind in [
        RecycleKind::Ground,
        RecycleKind::Obstacle,
        RecycleKind::Pig,
        RecycleKind::Background,
    ] {
        let x = match kind {
            RecycleKind::Ground => world.ground.current().pos.x,
            RecycleKind::Obstacle => world.obstacles.current().pos.x,
            RecycleKind::Pig => world.pigs.current().pos.x,
            RecycleKind::Background => world.panels.current().pos.x,
        };
        let threshold = offscreen_threshold(&world.config, kind);
        if is_offscreen(world, x, threshold) {
            world.pending.mark(kind);
            log::debug!("{kind:?} flagged for repositioning");
        }
    }
}

/// Pop a pig and apply the streak law: pops must be consecutive by slot
/// index to build a multiplier; anything else resets the streak first.
fn pop_pig(world: &mut World, index: usize) {
    let Some(pig) = world.pigs.get_mut(index) else {
        return;
    };
    if pig.popped || !pig.body.collides {
        return;
    }
    pig.popped = true;

    if world.last_popped + 1 != index {
        world.multiplier = 0;
    }
    world.last_popped = index;
    world.multiplier += 1;
    world.score += PIG_SCORE_BASE * u64::from(world.multiplier);
    log::info!(
        "pig {index} popped, multiplier {}, score {}",
        world.multiplier,
        world.score
    );
    world.push_event(WorldEvent::PigPopped {
        index,
        multiplier: world.multiplier,
    });
}

/// Enter the terminal state, exactly once per session
///
/// Freezes input, reveals the restart control, kills the actor, and clears
/// every pig's collision participation so a falling actor cannot pop pigs
/// after death. Ticking continues; only collision effects are neutralized.
pub fn trigger_game_over(world: &mut World) {
    world.phase = Phase::GameOver;
    world.restart_visible = true;

    world.actor.alive = false;
    world.actor.speed_x = 0.0;
    world.actor.rotation = GAME_OVER_ROTATION;
    world.actor.body.allows_rotation = false;
    world.actor.body.angular_vel = 0.0;

    for pig in world.pigs.iter_mut() {
        pig.body.collides = false;
    }

    world.start_shake();
    world.push_event(WorldEvent::GameOver { score: world.score });
    log::info!("game over, final score {}", world.score);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;
    use crate::consts::SHAKE_DURATION;
    use proptest::prelude::*;

    fn world() -> World {
        World::new(WorldConfig::default(), 42).unwrap()
    }

    fn world_with_pigs(n: usize) -> World {
        let config = WorldConfig {
            pig_pool: n,
            ..WorldConfig::default()
        };
        World::new(config, 42).unwrap()
    }

    #[test]
    fn terrain_collision_ends_the_game() {
        let mut w = world();
        let response = on_collision_begin(&mut w, Collision::Terrain);
        assert_eq!(response, CollisionResponse::Resolve);
        assert_eq!(w.phase, Phase::GameOver);
        assert!(!w.actor.alive);
        assert_eq!(w.actor.speed_x, 0.0);
        assert_eq!(w.actor.rotation, GAME_OVER_ROTATION);
        assert!(!w.actor.body.allows_rotation);
        assert!(w.restart_visible);
        assert_eq!(w.shake_left, SHAKE_DURATION);
        assert!(w.pigs.iter().all(|p| !p.body.collides));
    }

    #[test]
    fn second_terrain_collision_is_a_no_op() {
        let mut w = world();
        let _ = on_collision_begin(&mut w, Collision::Terrain);
        w.shake_left = 0.0; // let the first shake finish
        let score = w.score;

        let response = on_collision_begin(&mut w, Collision::Terrain);
        assert_eq!(response, CollisionResponse::Resolve);
        assert_eq!(w.score, score);
        assert_eq!(w.actor.speed_x, 0.0);
        assert_eq!(w.shake_left, 0.0);
        assert!(w.pigs.iter().all(|p| !p.body.collides));
    }

    #[test]
    fn gate_awards_fixed_score_regardless_of_multiplier() {
        let mut w = world();
        w.multiplier = 5;
        let _ = on_collision_begin(&mut w, Collision::Gate);
        assert_eq!(w.score, 1000);
        let _ = on_collision_begin(&mut w, Collision::Gate);
        assert_eq!(w.score, 2000);
    }

    #[test]
    fn gate_flags_offscreen_candidates() {
        let mut w = world();
        // Scroll far enough that everything placed near the origin is out
        w.scroll_x = -10_000.0;
        let _ = on_collision_begin(&mut w, Collision::Gate);
        assert!(w.pending.any());
        for kind in [
            RecycleKind::Ground,
            RecycleKind::Obstacle,
            RecycleKind::Pig,
            RecycleKind::Background,
        ] {
            assert!(w.pending.is_marked(kind), "{kind:?} not flagged");
        }
    }

    #[test]
    fn gate_leaves_onscreen_candidates_alone() {
        let mut w = world();
        let _ = on_collision_begin(&mut w, Collision::Gate);
        assert!(!w.pending.any());
    }

    #[test]
    fn consecutive_pops_build_the_streak() {
        let mut w = world_with_pigs(5);
        let mut deltas = Vec::new();
        for index in [2, 3, 4] {
            let before = w.score;
            let _ = on_collision_begin(&mut w, Collision::Pig { index });
            deltas.push(w.score - before);
        }
        assert_eq!(deltas, vec![1000, 2000, 3000]);
        assert_eq!(w.multiplier, 3);
    }

    #[test]
    fn skipped_slot_resets_the_streak() {
        let mut w = world_with_pigs(5);
        let mut deltas = Vec::new();
        for index in [2, 4] {
            let before = w.score;
            let _ = on_collision_begin(&mut w, Collision::Pig { index });
            deltas.push(w.score - before);
        }
        assert_eq!(deltas, vec![1000, 1000]);
        assert_eq!(w.multiplier, 1);
    }

    #[test]
    fn popping_slot_one_first_continues_the_initial_streak() {
        // last_popped starts at 0, so slot 1 reads as consecutive
        let mut w = world();
        let _ = on_collision_begin(&mut w, Collision::Pig { index: 1 });
        assert_eq!(w.multiplier, 1);
        let _ = on_collision_begin(&mut w, Collision::Pig { index: 2 });
        assert_eq!(w.multiplier, 2);
    }

    #[test]
    fn double_pop_of_same_pig_scores_once() {
        let mut w = world();
        let _ = on_collision_begin(&mut w, Collision::Pig { index: 1 });
        let score = w.score;
        let response = on_collision_begin(&mut w, Collision::Pig { index: 1 });
        assert_eq!(response, CollisionResponse::Resolve);
        assert_eq!(w.score, score);
        assert_eq!(w.multiplier, 1);
    }

    #[test]
    fn pig_collisions_after_game_over_are_ignored() {
        let mut w = world();
        let _ = on_collision_begin(&mut w, Collision::Terrain);
        let score = w.score;
        let _ = on_collision_begin(&mut w, Collision::Pig { index: 1 });
        let _ = on_collision_begin(&mut w, Collision::Gate);
        assert_eq!(w.score, score);
        assert_eq!(w.multiplier, 0);
    }

    proptest! {
        /// For any pop sequence over distinct live pigs, the multiplier after
        /// each pop is previous + 1 when the slot follows the last popped
        /// slot, else exactly 1; score never decreases.
        #[test]
        fn streak_law_holds(indices in proptest::collection::vec(0usize..8, 1..8)) {
            let mut w = world_with_pigs(8);
            let mut last_popped = 0usize;
            let mut multiplier = 0u32;
            let mut prev_score = 0u64;
            for index in indices {
                let was_popped = w.pigs.get(index).unwrap().popped;
                let _ = on_collision_begin(&mut w, Collision::Pig { index });
                if !was_popped {
                    multiplier = if last_popped + 1 == index { multiplier + 1 } else { 1 };
                    last_popped = index;
                    prop_assert_eq!(w.multiplier, multiplier);
                }
                prop_assert!(w.score >= prev_score);
                prev_score = w.score;
            }
        }
    }
}
