//! World state and entity types
//!
//! Everything mutable lives in [`World`]: the actor, the four entity pools,
//! the scoring state machine and the deferred-recycle flags. The world owns
//! its pooled entities outright; entities report back through drained
//! [`WorldEvent`]s rather than back-pointers.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::body::Body;
use super::pool::Pool;
use super::spawn;
use crate::config::{ConfigError, WorldConfig};
use crate::consts::SHAKE_DURATION;

/// Vertical offset of ground blocks and obstacle bodies below the origin
pub const GROUND_OFFSET_Y: f32 = -30.0;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Active gameplay
    Playing,
    /// Terminal; only a full restart leaves this state
    GameOver,
}

/// The player-controlled actor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    /// Bookkeeping position in scroll-root space. The x component only feeds
    /// relative spacing math; on screen the actor stays put while the world
    /// moves beneath it.
    pub pos: Vec2,
    /// Constant while alive, zeroed at game over
    pub speed_x: f32,
    /// Degrees; forced nose-down at game over
    pub rotation: f32,
    pub alive: bool,
    pub body: Body,
    /// Seconds since the last activate signal
    pub since_input: f32,
}

/// One tile of the endlessly recycled ground strip
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroundBlock {
    pub pos: Vec2,
}

/// An obstacle pair with a randomized scoring gap
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub pos: Vec2,
    /// Vertical center of the gap, re-rolled on every recycle
    pub gap_y: f32,
}

/// Collectible/hazard hybrid; popping consecutive slot indices builds a streak
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pig {
    pub pos: Vec2,
    /// Pool slot index, doubles as the streak slot
    pub index: usize,
    pub popped: bool,
    pub body: Body,
}

/// One panel of the tiled background
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackgroundPanel {
    pub pos: Vec2,
}

/// Category tag for deferred recycling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RecycleKind {
    Ground,
    Obstacle,
    Pig,
    Background,
}

/// Deferred-recycle flags set during collision handling and consumed
/// atomically on the next tick. Idempotent booleans, not counters: marking a
/// category twice before a tick still yields exactly one recycle.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct PendingRecycles {
    any: bool,
    ground: bool,
    obstacle: bool,
    pig: bool,
    background: bool,
}

impl PendingRecycles {
    pub fn mark(&mut self, kind: RecycleKind) {
        self.any = true;
        match kind {
            RecycleKind::Ground => self.ground = true,
            RecycleKind::Obstacle => self.obstacle = true,
            RecycleKind::Pig => self.pig = true,
            RecycleKind::Background => self.background = true,
        }
    }

    pub fn any(&self) -> bool {
        self.any
    }

    pub fn is_marked(&self, kind: RecycleKind) -> bool {
        match kind {
            RecycleKind::Ground => self.ground,
            RecycleKind::Obstacle => self.obstacle,
            RecycleKind::Pig => self.pig,
            RecycleKind::Background => self.background,
        }
    }

    /// Drain all flags, clearing them in place
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

/// Observable effects for the host (audio, UI), drained once per frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WorldEvent {
    GateCrossed { score: u64 },
    PigPopped { index: usize, multiplier: u32 },
    Recycled { kind: RecycleKind },
    GameOver { score: u64 },
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub config: WorldConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: Phase,
    pub actor: Actor,
    /// Translation of the scrolling root. Decreases as the run progresses;
    /// adding it to an entity's x yields the camera-frame x.
    pub scroll_x: f32,
    pub score: u64,
    /// Streak multiplier, reset to 0 when a streak breaks
    pub multiplier: u32,
    /// Slot index of the most recently popped pig
    pub last_popped: usize,
    /// Next world-space x an obstacle will be recycled to
    pub next_obstacle_x: f32,

    pub ground: Pool<GroundBlock>,
    pub obstacles: Pool<Obstacle>,
    pub pigs: Pool<Pig>,
    pub panels: Pool<BackgroundPanel>,

    pub pending: PendingRecycles,
    /// Remaining seconds of the one-shot impact shake on the world root
    pub shake_left: f32,
    /// Host-visible: show the restart control
    pub restart_visible: bool,
    /// Simulation tick counter
    pub time_ticks: u64,

    events: Vec<WorldEvent>,
}

impl World {
    /// Build a fresh world. Fails fast on an invalid configuration.
    pub fn new(config: WorldConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let ground = Pool::from_fn(config.ground_pool, |i| GroundBlock {
            pos: Vec2::new(config.ground_width * i as f32, GROUND_OFFSET_Y),
        });
        let panels = Pool::from_fn(config.panel_pool, |i| BackgroundPanel {
            pos: Vec2::new(config.panel_width * i as f32, 0.0),
        });
        // Pigs start centered between obstacle slots, at a random height each
        let pigs = Pool::from_fn(config.pig_pool, |i| Pig {
            pos: Vec2::new(
                config.obstacle_spacing / 2.0
                    + config.first_obstacle_x
                    + i as f32 * config.obstacle_spacing,
                spawn::random_pig_y(&config, &mut rng),
            ),
            index: i,
            popped: false,
            body: Body::default(),
        });
        // Placeholder positions; the initial recycle pass below assigns slots
        let obstacles = Pool::from_fn(config.obstacle_pool, |_| Obstacle {
            pos: Vec2::new(0.0, GROUND_OFFSET_Y),
            gap_y: 0.0,
        });

        let actor = Actor {
            pos: Vec2::new(0.0, config.screen_height / 2.0),
            speed_x: config.actor_speed_x,
            rotation: 0.0,
            alive: true,
            body: Body::default(),
            since_input: 0.0,
        };

        let mut world = Self {
            next_obstacle_x: config.first_obstacle_x,
            config,
            seed,
            rng,
            phase: Phase::Playing,
            actor,
            scroll_x: 0.0,
            score: 0,
            multiplier: 0,
            last_popped: 0,
            ground,
            obstacles,
            pigs,
            panels,
            pending: PendingRecycles::default(),
            shake_left: 0.0,
            restart_visible: false,
            time_ticks: 0,
            events: Vec::new(),
        };

        // Walk every obstacle through one recycle to lay out the opening run
        for _ in 0..world.obstacles.len() {
            spawn::recycle_obstacle(&mut world);
        }
        world.events.clear();

        log::debug!("world created, seed {seed}");
        Ok(world)
    }

    /// Destructive reset: rebuild everything from the initial configuration.
    /// The only way out of `Phase::GameOver`.
    pub fn restart(&mut self, seed: u64) {
        // Config was validated when this world was first built
        *self = Self::new(self.config.clone(), seed)
            .expect("restart from an already-validated config");
        log::info!("world restarted, seed {seed}");
    }

    pub fn push_event(&mut self, event: WorldEvent) {
        self.events.push(event);
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<WorldEvent> {
        std::mem::take(&mut self.events)
    }

    /// Roll the one-shot impact shake on the world root
    pub fn start_shake(&mut self) {
        self.shake_left = SHAKE_DURATION;
    }
}
