//! Pair: mutual attraction between two complementary color classes.
//!
//! A red and a teal bot spawn together. Each wanders until it either sees
//! its mate directly (short range) or picks up the mate's trail color in a
//! wide forward cone, then steers toward it with a lateral weave layered on
//! top so the pursuit keeps an organic wobble.

use super::{init_noise_state, wander::wander_turn, Policy, PolicyKind, Spawner, SteerContext};
use crate::bot::{Bot, BotId, ColorClass, SpawnOverrides};
use crate::config::Config;
use crate::sensing::detect_trail;
use crate::steering::{normalize_angle, weave};
use rand_chacha::ChaCha8Rng;

pub struct Pair;

/// Nearest alive opposite-class pair bot within `range`, scanning the
/// registry in insertion order; ties keep the earlier candidate.
fn find_mate<'a>(bot: &Bot, bots: &'a [Bot], range: f32) -> Option<&'a Bot> {
    let mut best: Option<&Bot> = None;
    let mut best_dist = range;

    for other in bots {
        if other.id == bot.id || !other.alive {
            continue;
        }
        if other.policy != PolicyKind::Pair || other.color == bot.color {
            continue;
        }
        let dist = bot.distance_to(other);
        if dist >= best_dist {
            continue;
        }
        best_dist = dist;
        best = Some(other);
    }
    best
}

impl Policy for Pair {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Pair
    }

    fn name(&self) -> &'static str {
        "pair"
    }

    fn init(&self, bot: &mut Bot, config: &Config, rng: &mut ChaCha8Rng) {
        init_noise_state(bot, rng);
        bot.weave_rate = config.pair.weave_freq;
    }

    fn steer(&self, bot: &Bot, ctx: &SteerContext) -> f32 {
        let cfg = &ctx.config.pair;
        let weave_amp = cfg.weave_amp * bot.max_turn;

        // Priority 1: the mate itself is close - follow it directly
        if let Some(mate) = find_mate(bot, ctx.bots, cfg.follow_range) {
            let target = (mate.y - bot.y).atan2(mate.x - bot.x);
            let diff = normalize_angle(target - bot.heading);
            let turn = diff * cfg.attract + weave(bot, weave_amp);
            return turn.clamp(-bot.max_turn, bot.max_turn);
        }

        // Priority 2: the mate's trail color inside the wide search cone
        let sought = bot.color.opposite();
        if let Some(angle) = detect_trail(
            bot,
            |r, g, b| sought.matches(r, g, b),
            cfg.search_range,
            cfg.search_half_deg.to_radians(),
            ctx.config.sensing.scan_step,
            ctx.surface,
            ctx.scale,
        ) {
            let diff = normalize_angle(angle - bot.heading);
            let turn = diff * cfg.attract + weave(bot, weave_amp);
            return turn.clamp(-bot.max_turn, bot.max_turn);
        }

        // Priority 3: plain wandering
        wander_turn(bot)
    }

    /// Always spawns the couple: one red, one teal.
    fn spawn(
        &self,
        spawner: &mut dyn Spawner,
        _config: &Config,
        overrides: &SpawnOverrides,
    ) -> Vec<BotId> {
        let mut red = overrides.clone();
        red.color = Some(ColorClass::Red);
        let mut teal = overrides.clone();
        teal.color = Some(ColorClass::Teal);

        vec![spawner.spawn_bot(red), spawner.spawn_bot(teal)]
    }
}
