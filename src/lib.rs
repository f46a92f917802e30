//! Skyward - scrolling-world recycling and scoring core for an endless flyer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (pools, recycling, scoring, game state)
//! - `config`: Data-driven world tuning with fail-fast validation
//!
//! Rendering, scene assembly and full physics resolution are host concerns;
//! this crate only owns the logic that keeps a fixed set of entities cycling
//! through an endless scrolling world.

pub mod config;
pub mod sim;

pub use config::{ConfigError, WorldConfig};

/// Game rule constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz, matching the host frame clock)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Vertical velocity clamp band (units/sec)
    pub const VEL_Y_MIN: f32 = -200.0;
    pub const VEL_Y_MAX: f32 = 300.0;

    /// Score awarded for crossing a scoring gate
    pub const GATE_SCORE: u64 = 1000;
    /// Base score per popped pig, scaled by the streak multiplier
    pub const PIG_SCORE_BASE: u64 = 1000;

    /// Rotation forced on the actor at game over (degrees, nose down)
    pub const GAME_OVER_ROTATION: f32 = 90.0;
    /// Duration of the one-shot impact shake on the world root (seconds)
    pub const SHAKE_DURATION: f32 = 0.4;
}

/// Clamp a vertical velocity to the allowed band
#[inline]
pub fn clamp_vel_y(vy: f32) -> f32 {
    vy.clamp(consts::VEL_Y_MIN, consts::VEL_Y_MAX)
}
