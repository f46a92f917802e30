//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed-size pools only; entities are recycled, never reallocated
//! - Seeded RNG only
//! - Single logical thread: ticks and collision callbacks never interleave
//! - No rendering or platform dependencies

pub mod body;
pub mod collision;
pub mod pool;
pub mod spawn;
pub mod state;
pub mod tick;

pub use body::Body;
pub use collision::{on_collision_begin, trigger_game_over, Collision, CollisionResponse};
pub use pool::Pool;
pub use spawn::{camera_x, is_offscreen, offscreen_threshold};
pub use state::{
    Actor, BackgroundPanel, GroundBlock, Obstacle, PendingRecycles, Phase, Pig, RecycleKind,
    World, WorldEvent, GROUND_OFFSET_Y,
};
pub use tick::{tick, TickInput};
