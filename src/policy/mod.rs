//! Steering policy framework.
//!
//! Policies are stateless singletons; all per-bot state (noise seed, phases)
//! lives on the bot and is installed by `init`. The capability set is the
//! minimal one: `init`, `steer`, shared `avoid_edges`, optional multi-bot
//! `spawn`.

pub mod mill;
pub mod pair;
pub mod wander;

pub use mill::Mill;
pub use pair::Pair;
pub use wander::Wander;

use crate::bot::{Bot, BotId, SpawnOverrides};
use crate::config::{Config, WorldConfig};
use crate::noise::SimplexNoise;
use crate::steering;
use crate::surface::TrailSurface;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Tag identifying a bot's steering policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    Wander,
    Pair,
    Mill,
}

/// Read-only view of the world handed to `steer` each tick.
///
/// `bots` is the full registry in insertion order; within a tick, earlier
/// bots have already moved and drawn, so later bots observe their fresh
/// state. The raster scale is threaded explicitly rather than read from
/// ambient state.
pub struct SteerContext<'a> {
    pub bots: &'a [Bot],
    pub surface: &'a dyn TrailSurface,
    pub scale: f32,
    pub config: &'a Config,
}

/// Callback surface for policy-driven spawning (the world implements it).
pub trait Spawner {
    fn spawn_bot(&mut self, overrides: SpawnOverrides) -> BotId;
}

/// A steering strategy.
pub trait Policy: Sync {
    fn kind(&self) -> PolicyKind;

    fn name(&self) -> &'static str;

    /// Install policy-private state on a freshly spawned bot.
    fn init(&self, bot: &mut Bot, config: &Config, rng: &mut ChaCha8Rng);

    /// Turn contribution in radians for this tick.
    fn steer(&self, bot: &Bot, ctx: &SteerContext) -> f32;

    /// Wall repulsion, identical across policies.
    fn avoid_edges(&self, bot: &Bot, world: &WorldConfig) -> f32 {
        steering::avoid_edges(bot, world)
    }

    /// Create this policy's spawn group. Default: a single bot.
    fn spawn(
        &self,
        spawner: &mut dyn Spawner,
        _config: &Config,
        overrides: &SpawnOverrides,
    ) -> Vec<BotId> {
        vec![spawner.spawn_bot(overrides.clone())]
    }
}

/// Look up the policy singleton for a kind tag.
pub fn policy(kind: PolicyKind) -> &'static dyn Policy {
    match kind {
        PolicyKind::Wander => &Wander,
        PolicyKind::Pair => &Pair,
        PolicyKind::Mill => &Mill,
    }
}

/// Name registry for CLI / configuration lookups.
pub fn policy_by_name(name: &str) -> Option<&'static dyn Policy> {
    match name {
        "wander" => Some(&Wander),
        "pair" => Some(&Pair),
        "mill" => Some(&Mill),
        _ => None,
    }
}

/// Seed the wander noise state shared by every policy's `init`.
pub(crate) fn init_noise_state(bot: &mut Bot, rng: &mut ChaCha8Rng) {
    bot.seed = rng.gen_range(0..1_000_000);
    bot.noise = SimplexNoise::new(bot.seed);
    bot.t = rng.gen::<f64>() * 10_000.0;
    bot.weave_t = rng.gen::<f64>() * 10_000.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_lookup() {
        assert_eq!(policy_by_name("wander").unwrap().kind(), PolicyKind::Wander);
        assert_eq!(policy_by_name("pair").unwrap().kind(), PolicyKind::Pair);
        assert_eq!(policy_by_name("mill").unwrap().kind(), PolicyKind::Mill);
        assert!(policy_by_name("swarm").is_none());
    }

    #[test]
    fn test_kind_dispatch_is_consistent() {
        for kind in [PolicyKind::Wander, PolicyKind::Pair, PolicyKind::Mill] {
            assert_eq!(policy(kind).kind(), kind);
        }
    }
}
