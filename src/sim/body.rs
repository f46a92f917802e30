//! Minimal physics-body proxy
//!
//! The real physics engine lives in the host; the sim only needs the handful
//! of knobs the collision handling touches: a mutable velocity,
//! impulse application, a rotation lock and a collision-participation switch.
//! Embedding this tiny stand-in keeps the sim runnable and testable headless.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Physics-body stand-in for the actor and pigs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Body {
    pub vel: Vec2,
    pub angular_vel: f32,
    /// Whether the host physics may rotate this body
    pub allows_rotation: bool,
    /// Whether this body participates in collision detection at all.
    /// Cleared on pigs at game over so a falling actor cannot pop them.
    pub collides: bool,
}

impl Default for Body {
    fn default() -> Self {
        Self {
            vel: Vec2::ZERO,
            angular_vel: 0.0,
            allows_rotation: true,
            collides: true,
        }
    }
}

impl Body {
    /// Apply an instantaneous impulse (unit mass, so impulse adds directly
    /// to velocity, matching the host engine's behavior for these bodies)
    pub fn apply_impulse(&mut self, impulse: Vec2) {
        self.vel += impulse;
    }

    /// Integrate gravity over one timestep. Horizontal motion is handled by
    /// the world advancer, not the body.
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.vel.y -= gravity * dt;
    }
}
