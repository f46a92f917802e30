//! World tuning and configuration
//!
//! All spacing/sizing numbers the recycling math depends on live here so the
//! sim itself stays data-driven. A bad configuration shows up as a visible
//! spacing glitch rather than a crash, so everything is checked once, up
//! front, when the world is built.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation failure
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("pool size for {0} must be at least 1")]
    EmptyPool(&'static str),
    #[error("{0} must be positive, got {1}")]
    NonPositive(&'static str, f32),
    #[error("ground ({ground} high) leaves no usable screen height ({screen} total)")]
    NoUsableHeight { ground: f32, screen: f32 },
    #[error("obstacle gap ({gap}) does not fit between ground and screen top")]
    GapTooTall { gap: f32 },
    #[error("invalid config json: {0}")]
    Json(String),
}

/// World tuning parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Total screen height (units)
    pub screen_height: f32,
    /// Ground block dimensions (all blocks homogeneous)
    pub ground_width: f32,
    pub ground_height: f32,
    /// Obstacle body width (used for the offscreen threshold)
    pub obstacle_width: f32,
    /// Vertical extent of the scoring gap in an obstacle
    pub obstacle_gap_height: f32,
    /// Pig sprite width (offscreen threshold)
    pub pig_width: f32,
    /// Background panel width (panels tile end-to-end)
    pub panel_width: f32,

    /// World-space x of the first obstacle slot
    pub first_obstacle_x: f32,
    /// Horizontal distance between consecutive obstacle slots.
    /// Should be a multiple or divisor of `panel_width` to avoid an aliasing
    /// glitch against background recycling.
    pub obstacle_spacing: f32,

    /// Constant horizontal speed of the actor while alive
    pub actor_speed_x: f32,
    /// Upward impulse applied on an activate signal
    pub flap_impulse: f32,
    /// Downward acceleration applied to the actor body (units/sec^2)
    pub gravity: f32,

    /// Pool sizes
    pub ground_pool: usize,
    pub obstacle_pool: usize,
    pub pig_pool: usize,
    pub panel_pool: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            screen_height: 568.0,
            ground_width: 350.0,
            ground_height: 128.0,
            obstacle_width: 80.0,
            obstacle_gap_height: 120.0,
            pig_width: 70.0,
            panel_width: 256.0,
            first_obstacle_x: 380.0,
            obstacle_spacing: 280.0,
            actor_speed_x: 80.0,
            flap_impulse: 300.0,
            gravity: 700.0,
            ground_pool: 3,
            obstacle_pool: 3,
            pig_pool: 3,
            panel_pool: 3,
        }
    }
}

impl WorldConfig {
    /// Screen height above the ground, where pigs and gaps may spawn
    pub fn usable_height(&self) -> f32 {
        self.screen_height - self.ground_height
    }

    /// Validate the configuration. Fail fast: a world is never built from a
    /// config that would make the recycling math degenerate.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, len) in [
            ("ground", self.ground_pool),
            ("obstacle", self.obstacle_pool),
            ("pig", self.pig_pool),
            ("background", self.panel_pool),
        ] {
            if len == 0 {
                return Err(ConfigError::EmptyPool(name));
            }
        }
        for (name, v) in [
            ("ground_width", self.ground_width),
            ("ground_height", self.ground_height),
            ("obstacle_width", self.obstacle_width),
            ("obstacle_gap_height", self.obstacle_gap_height),
            ("pig_width", self.pig_width),
            ("panel_width", self.panel_width),
            ("obstacle_spacing", self.obstacle_spacing),
            ("actor_speed_x", self.actor_speed_x),
        ] {
            if v <= 0.0 {
                return Err(ConfigError::NonPositive(name, v));
            }
        }
        if self.usable_height() <= 0.0 {
            return Err(ConfigError::NoUsableHeight {
                ground: self.ground_height,
                screen: self.screen_height,
            });
        }
        if self.obstacle_gap_height >= self.usable_height() {
            return Err(ConfigError::GapTooTall {
                gap: self.obstacle_gap_height,
            });
        }
        // Known latent aliasing between obstacle spacing and background
        // tiling. The historical value (280 vs 256) trips this, so it stays a
        // warning, not an error.
        let ratio = self.obstacle_spacing / self.panel_width;
        let inverse = self.panel_width / self.obstacle_spacing;
        let near_integer = |x: f32| (x - x.round()).abs() < 1e-3;
        if !near_integer(ratio) && !near_integer(inverse) {
            log::warn!(
                "obstacle_spacing {} is neither a multiple nor a divisor of panel_width {}; \
                 background recycling may drift out of phase",
                self.obstacle_spacing,
                self.panel_width
            );
        }
        Ok(())
    }

    /// Load a config from JSON, validated
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
