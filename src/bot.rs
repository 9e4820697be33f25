//! Bot state and physics.

use crate::config::{BotConfig, WorldConfig};
use crate::noise::SimplexNoise;
use crate::policy::PolicyKind;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Unique bot identifier
pub type BotId = u64;

/// Default weave phase advance; the pair policy overrides it from config.
const DEFAULT_WEAVE_RATE: f64 = 0.05;

/// Fraction of the ink budget over which speed and turn authority taper.
const TAPER_FRACTION: f32 = 0.1;

/// The two trail color classes on the white surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorClass {
    /// #d64550
    Red,
    /// #00a6a6
    Teal,
}

impl ColorClass {
    /// RGB channel values used when drawing this class's trail.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            ColorClass::Red => [214, 69, 80],
            ColorClass::Teal => [0, 166, 166],
        }
    }

    /// The complementary class (Pair bots seek their opposite).
    pub fn opposite(self) -> Self {
        match self {
            ColorClass::Red => ColorClass::Teal,
            ColorClass::Teal => ColorClass::Red,
        }
    }

    /// Channel-threshold classifier for a sampled trail pixel.
    ///
    /// This substitutes for an explicit trail field: the thresholds assume
    /// trails are drawn on a near-white surface, so sensing is coupled to
    /// raster resolution and draw order by design.
    pub fn matches(self, r: u8, g: u8, b: u8) -> bool {
        let (r, g, b) = (r as i16, g as i16, b as i16);
        match self {
            // Red trail: R well above G and B, not washed out to white
            ColorClass::Red => r > g + 15 && r > b + 10 && g < 245 && b < 245,
            // Teal trail: G and B both well above R
            ColorClass::Teal => g > r + 15 && b > r + 15 && r < 245,
        }
    }
}

/// Optional per-spawn overrides, merged over [`BotConfig`] defaults.
#[derive(Debug, Clone, Default)]
pub struct SpawnOverrides {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub speed: Option<f32>,
    pub ink: Option<f32>,
    pub line_width: Option<f32>,
    pub wiggle: Option<f32>,
    pub max_turn_deg: Option<f32>,
    pub color: Option<ColorClass>,
}

/// An ink-carrying bot.
///
/// Positions are continuous world units; `heading` accumulates unbounded and
/// is only normalized when an angular difference is consumed. Depleted bots
/// stay in the registry as inert records.
#[derive(Clone)]
pub struct Bot {
    pub id: BotId,

    // Physical state
    pub x: f32,
    pub y: f32,
    pub heading: f32,
    pub prev_x: f32,
    pub prev_y: f32,

    // Motion parameters
    pub speed: f32,
    pub ink: f32,
    pub max_ink: f32,
    pub line_width: f32,
    pub wiggle: f32,
    pub max_turn: f32,

    // Identity
    pub color: ColorClass,
    pub alive: bool,
    pub policy: PolicyKind,

    // Policy-private state
    pub seed: u32,
    pub noise: SimplexNoise,
    pub t: f64,
    pub weave_t: f64,
    pub weave_rate: f64,
}

impl Bot {
    /// Create a bot from defaults merged with per-spawn overrides.
    ///
    /// Position defaults to a random point one unit inside the walls, heading
    /// to a random direction; the noise state is seeded afterwards by the
    /// policy's `init`.
    pub fn spawn(
        id: BotId,
        policy: PolicyKind,
        defaults: &BotConfig,
        world: &WorldConfig,
        overrides: &SpawnOverrides,
        rng: &mut ChaCha8Rng,
    ) -> Self {
        let x = overrides
            .x
            .unwrap_or_else(|| 1.0 + rng.gen::<f32>() * (world.width - 2.0));
        let y = overrides
            .y
            .unwrap_or_else(|| 1.0 + rng.gen::<f32>() * (world.height - 2.0));
        let heading = rng.gen::<f32>() * std::f32::consts::TAU;

        let ink = overrides.ink.unwrap_or(defaults.ink);
        let color = overrides.color.unwrap_or_else(|| {
            if rng.gen::<f32>() < 0.5 {
                ColorClass::Red
            } else {
                ColorClass::Teal
            }
        });

        Self {
            id,
            x,
            y,
            heading,
            prev_x: x,
            prev_y: y,
            speed: overrides.speed.unwrap_or(defaults.speed),
            ink,
            max_ink: ink,
            line_width: overrides.line_width.unwrap_or(defaults.line_width),
            wiggle: overrides.wiggle.unwrap_or(defaults.wiggle),
            max_turn: overrides
                .max_turn_deg
                .unwrap_or(defaults.max_turn_deg)
                .to_radians(),
            color,
            alive: true,
            policy,
            seed: 0,
            noise: SimplexNoise::new(0),
            t: 0.0,
            weave_t: 0.0,
            weave_rate: DEFAULT_WEAVE_RATE,
        }
    }

    /// Speed/turn authority factor: 1.0 until the final taper fraction of
    /// ink, then linearly down to 0.0 exactly at depletion.
    #[inline]
    pub fn ink_ratio(&self) -> f32 {
        (self.ink / (self.max_ink * TAPER_FRACTION)).min(1.0)
    }

    /// Advance the wander and weave phase accumulators.
    ///
    /// Runs once per tick before steering so policies can read the phases
    /// through a shared borrow of the whole registry.
    #[inline]
    pub fn advance_phases(&mut self) {
        self.t += self.wiggle as f64;
        self.weave_t += self.weave_rate;
    }

    /// Apply one tick of physics for the given total turn.
    ///
    /// No-op when depleted. The turn and the travel distance are both scaled
    /// by the ink taper; the position clamp is a safety net that should
    /// rarely trigger (edge avoidance keeps bots off the walls).
    pub fn integrate(&mut self, turn: f32, world: &WorldConfig) {
        if !self.alive {
            return;
        }

        self.prev_x = self.x;
        self.prev_y = self.y;

        let ink_ratio = self.ink_ratio();
        self.heading += turn * ink_ratio;

        let step = self.speed * ink_ratio;
        self.x = (self.x + self.heading.cos() * step).clamp(0.0, world.width);
        self.y = (self.y + self.heading.sin() * step).clamp(0.0, world.height);

        self.ink -= step;
        // The taper shrinks steps geometrically; once a step rounds to zero
        // the remaining ink can never be spent, so that counts as depletion.
        if self.ink <= 0.0 || step <= 0.0 {
            self.ink = 0.0;
            self.alive = false;
        }
    }

    /// Euclidean distance to another bot.
    #[inline]
    pub fn distance_to(&self, other: &Bot) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}
