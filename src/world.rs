//! World simulation engine - main simulation loop.

use crate::bot::{Bot, BotId, SpawnOverrides};
use crate::config::Config;
use crate::policy::{policy, policy_by_name, PolicyKind, Spawner, SteerContext};
use crate::stats::{BotStatus, Stats, StatsHistory};
use crate::surface::{Raster, TrailSurface};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Minimum stroke opacity so even a nearly dry bot leaves a visible trail.
const MIN_STROKE_ALPHA: f32 = 0.15;

/// The simulation world
pub struct World {
    // Registry, in insertion order; depleted bots stay as inert records
    pub bots: Vec<Bot>,

    // Environment: the rendered trail history doubles as the sensed field
    pub surface: Box<dyn TrailSurface>,
    scale: f32,

    // State
    pub time: u64,

    // Configuration
    pub config: Config,

    // Statistics
    pub stats: Stats,
    pub stats_history: StatsHistory,

    // ID generation
    next_bot_id: u64,

    // Random number generator (seeded for reproducibility)
    rng: ChaCha8Rng,
    seed: u64,
}

/// Borrowed view of the world's spawn machinery, handed to policies so a
/// single request can create a whole group.
struct WorldSpawner<'a> {
    bots: &'a mut Vec<Bot>,
    next_id: &'a mut u64,
    rng: &'a mut ChaCha8Rng,
    config: &'a Config,
    kind: PolicyKind,
}

impl Spawner for WorldSpawner<'_> {
    fn spawn_bot(&mut self, overrides: SpawnOverrides) -> BotId {
        let id = *self.next_id;
        *self.next_id += 1;

        let mut bot = Bot::spawn(
            id,
            self.kind,
            &self.config.bots,
            &self.config.world,
            &overrides,
            self.rng,
        );
        policy(self.kind).init(&mut bot, self.config, self.rng);
        self.bots.push(bot);
        id
    }
}

impl World {
    /// Create a new world with the given configuration.
    ///
    /// `scale` is raster pixels per world unit; the surface dimensions follow
    /// from the world bounds.
    pub fn new(config: Config, scale: f32) -> Self {
        let seed = rand::thread_rng().gen();
        Self::new_with_seed(config, scale, seed)
    }

    /// Create a new world with a specific seed for reproducibility
    pub fn new_with_seed(config: Config, scale: f32, seed: u64) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let surface = Box::new(Raster::new(
            (config.world.width * scale).ceil() as u32,
            (config.world.height * scale).ceil() as u32,
        ));
        let interval = config.logging.stats_interval;

        Self {
            bots: Vec::new(),
            surface,
            scale,
            time: 0,
            config,
            stats: Stats::new(),
            stats_history: StatsHistory::new(interval),
            next_bot_id: 0,
            rng,
            seed,
        }
    }

    /// Spawn a policy's group and return the new ids in creation order.
    pub fn spawn(&mut self, kind: PolicyKind, overrides: &SpawnOverrides) -> Vec<BotId> {
        let p = policy(kind);
        let mut spawner = WorldSpawner {
            bots: &mut self.bots,
            next_id: &mut self.next_bot_id,
            rng: &mut self.rng,
            config: &self.config,
            kind,
        };
        let ids = p.spawn(&mut spawner, &self.config, overrides);
        log::info!("spawned {} {} bot(s): {:?}", ids.len(), p.name(), ids);
        ids
    }

    /// Spawn by policy name; `None` for an unknown name.
    pub fn spawn_by_name(&mut self, name: &str, overrides: &SpawnOverrides) -> Option<Vec<BotId>> {
        let kind = policy_by_name(name)?.kind();
        Some(self.spawn(kind, overrides))
    }

    /// Advance the simulation by one tick.
    ///
    /// Bots update strictly in registry order; each bot steers, moves, then
    /// draws before the next bot senses. Later bots therefore see earlier
    /// bots' fresh trails within the same tick.
    pub fn tick(&mut self) {
        self.time += 1;

        for i in 0..self.bots.len() {
            if !self.bots[i].alive {
                continue;
            }
            self.bots[i].advance_phases();

            let turn = {
                let bot = &self.bots[i];
                let p = policy(bot.policy);
                let ctx = SteerContext {
                    bots: &self.bots,
                    surface: self.surface.as_ref(),
                    scale: self.scale,
                    config: &self.config,
                };
                p.steer(bot, &ctx) + p.avoid_edges(bot, &self.config.world)
            };

            self.bots[i].integrate(turn, &self.config.world);

            let bot = &self.bots[i];
            let from = (bot.prev_x * self.scale, bot.prev_y * self.scale);
            let to = (bot.x * self.scale, bot.y * self.scale);
            let alpha = (bot.ink / bot.max_ink).max(MIN_STROKE_ALPHA);
            let rgb = bot.color.rgb();
            let width_px = bot.line_width * self.scale;
            self.surface.draw_segment(rgb, width_px, from, to, alpha);
        }

        self.stats.time = self.time;
        self.stats.update(&self.bots);
        // Interval zero disables history rather than dividing by it
        let interval = self.stats_history.interval;
        if interval > 0 && self.time % interval == 0 {
            self.stats_history.record(self.stats.clone());
        }
    }

    /// Run the simulation for a number of ticks
    pub fn run(&mut self, ticks: u64) {
        for _ in 0..ticks {
            self.tick();
        }
    }

    /// Remove all bots and wipe the surface. Ids keep increasing so old and
    /// new bots are never confused across a clear.
    pub fn clear(&mut self) {
        self.bots.clear();
        self.surface.clear();
        log::info!("world cleared at T:{}", self.time);
    }

    /// Swap in a fresh raster at a new resolution. Existing trails are lost,
    /// which also erases the bots' environmental memory.
    pub fn rescale(&mut self, scale: f32) {
        self.scale = scale;
        self.surface = Box::new(Raster::new(
            (self.config.world.width * scale).ceil() as u32,
            (self.config.world.height * scale).ceil() as u32,
        ));
        log::warn!("surface rescaled to {} px/unit, trail history dropped", scale);
    }

    /// Per-bot status snapshot in registry order
    pub fn status(&self) -> Vec<BotStatus> {
        self.bots.iter().map(BotStatus::of).collect()
    }

    /// Avoidance cone as (range in world units, half-angle in radians).
    ///
    /// The steering itself only consumes the range; the half-angle is for
    /// embedders drawing a cone overlay per bot.
    pub fn edge_cone(&self) -> (f32, f32) {
        (
            self.config.world.edge_range,
            self.config.world.edge_half_angle_deg.to_radians(),
        )
    }

    /// Number of bots still carrying ink
    pub fn active(&self) -> usize {
        self.bots.iter().filter(|b| b.alive).count()
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}
