//! Wander: smooth noise-driven aimless steering, no sensing.

use super::{init_noise_state, Policy, PolicyKind, SteerContext};
use crate::bot::Bot;
use crate::config::Config;
use rand_chacha::ChaCha8Rng;

pub struct Wander;

/// Base wander turn, also used by the other policies as their fallback and
/// blend component.
pub(crate) fn wander_turn(bot: &Bot) -> f32 {
    bot.noise.noise2(bot.t, bot.seed as f64) as f32 * bot.max_turn
}

impl Policy for Wander {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Wander
    }

    fn name(&self) -> &'static str {
        "wander"
    }

    fn init(&self, bot: &mut Bot, _config: &Config, rng: &mut ChaCha8Rng) {
        init_noise_state(bot, rng);
    }

    fn steer(&self, bot: &Bot, _ctx: &SteerContext) -> f32 {
        wander_turn(bot)
    }
}
