//! Mill: ant-style trail following that collapses into rotating mills.
//!
//! A group of same-color bots follows whichever group member is ahead, or
//! failing that its own color's trail. Once the outside stimulus is gone the
//! group ends up following itself in a spiral until the ink runs out - the
//! intended emergent outcome, not a defect.

use super::{init_noise_state, wander::wander_turn, Policy, PolicyKind, Spawner, SteerContext};
use crate::bot::{Bot, BotId, ColorClass, SpawnOverrides};
use crate::config::Config;
use crate::sensing::detect_trail;
use crate::steering::normalize_angle;
use rand_chacha::ChaCha8Rng;
use std::f32::consts::FRAC_PI_2;

/// Wander blend factor while following a nearby bot.
const WANDER_BLEND_NEAR: f32 = 0.1;

/// Wander blend factor while following the trail.
const WANDER_BLEND_TRAIL: f32 = 0.15;

pub struct Mill;

/// Nearest alive same-class mill bot within `range` and inside the forward
/// half-plane (bearing within 90 degrees of heading). Registry-order scan;
/// ties keep the earlier candidate.
fn find_nearest_ahead<'a>(bot: &Bot, bots: &'a [Bot], range: f32) -> Option<&'a Bot> {
    let mut best: Option<&Bot> = None;
    let mut best_dist = range;

    for other in bots {
        if other.id == bot.id || !other.alive {
            continue;
        }
        if other.policy != PolicyKind::Mill || other.color != bot.color {
            continue;
        }
        let dist = bot.distance_to(other);
        if dist >= best_dist {
            continue;
        }
        let bearing = (other.y - bot.y).atan2(other.x - bot.x);
        if normalize_angle(bearing - bot.heading).abs() > FRAC_PI_2 {
            continue;
        }
        best_dist = dist;
        best = Some(other);
    }
    best
}

impl Policy for Mill {
    fn kind(&self) -> PolicyKind {
        PolicyKind::Mill
    }

    fn name(&self) -> &'static str {
        "mill"
    }

    fn init(&self, bot: &mut Bot, _config: &Config, rng: &mut ChaCha8Rng) {
        init_noise_state(bot, rng);
    }

    fn steer(&self, bot: &Bot, ctx: &SteerContext) -> f32 {
        let cfg = &ctx.config.mill;
        let base = wander_turn(bot);

        // Priority 1: follow the nearest group member ahead
        if let Some(ahead) = find_nearest_ahead(bot, ctx.bots, cfg.nearby_range) {
            let target = (ahead.y - bot.y).atan2(ahead.x - bot.x);
            let diff = normalize_angle(target - bot.heading);
            let turn = diff * cfg.nearby_strength + base * WANDER_BLEND_NEAR;
            return turn.clamp(-bot.max_turn, bot.max_turn);
        }

        // Priority 2: follow own-color trail
        if let Some(angle) = detect_trail(
            bot,
            |r, g, b| bot.color.matches(r, g, b),
            cfg.search_range,
            cfg.search_half_deg.to_radians(),
            ctx.config.sensing.scan_step,
            ctx.surface,
            ctx.scale,
        ) {
            let diff = normalize_angle(angle - bot.heading);
            let turn = diff * cfg.follow_strength + base * WANDER_BLEND_TRAIL;
            return turn.clamp(-bot.max_turn, bot.max_turn);
        }

        base
    }

    /// Spawns the whole group: `mill.count` teal bots.
    fn spawn(
        &self,
        spawner: &mut dyn Spawner,
        config: &Config,
        overrides: &SpawnOverrides,
    ) -> Vec<BotId> {
        let mut ids = Vec::with_capacity(config.mill.count);
        for _ in 0..config.mill.count {
            let mut ov = overrides.clone();
            ov.color = Some(ColorClass::Teal);
            ids.push(spawner.spawn_bot(ov));
        }
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BotConfig, WorldConfig};
    use rand::SeedableRng;

    fn mill_bot(id: BotId, x: f32, y: f32) -> Bot {
        let mut rng = ChaCha8Rng::seed_from_u64(id);
        let overrides = SpawnOverrides {
            x: Some(x),
            y: Some(y),
            color: Some(ColorClass::Teal),
            ..Default::default()
        };
        let mut bot = Bot::spawn(
            id,
            PolicyKind::Mill,
            &BotConfig::default(),
            &WorldConfig::default(),
            &overrides,
            &mut rng,
        );
        Mill.init(&mut bot, &Config::default(), &mut rng);
        bot
    }

    #[test]
    fn test_nearest_ahead_requires_forward_half_plane() {
        let mut me = mill_bot(0, 10.0, 10.0);
        me.heading = 0.0; // facing +x

        let behind = mill_bot(1, 8.0, 10.0);
        let ahead = mill_bot(2, 12.0, 10.0);
        let bots = vec![me.clone(), behind, ahead];

        let found = find_nearest_ahead(&me, &bots, 3.0).expect("no leader found");
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_nearest_ahead_prefers_strictly_closer() {
        let mut me = mill_bot(0, 10.0, 10.0);
        me.heading = 0.0;

        let far = mill_bot(1, 12.5, 10.0);
        let near = mill_bot(2, 11.0, 10.0);
        let bots = vec![me.clone(), far, near];

        let found = find_nearest_ahead(&me, &bots, 3.0).unwrap();
        assert_eq!(found.id, 2);
    }

    #[test]
    fn test_nearest_ahead_tie_keeps_registry_order() {
        let mut me = mill_bot(0, 10.0, 10.0);
        me.heading = 0.0;

        // Equidistant, both ahead
        let first = mill_bot(1, 12.0, 10.5);
        let second = mill_bot(2, 12.0, 9.5);
        let bots = vec![me.clone(), first, second];

        let found = find_nearest_ahead(&me, &bots, 3.0).unwrap();
        assert_eq!(found.id, 1);
    }

    #[test]
    fn test_follow_turn_clamped() {
        let mut me = mill_bot(0, 10.0, 10.0);
        me.heading = 0.0;
        let leader = mill_bot(1, 11.0, 12.0);
        let bots = vec![me.clone(), leader];

        let config = Config::default();
        let surface = crate::surface::Raster::new(100, 100);
        let ctx = SteerContext {
            bots: &bots,
            surface: &surface,
            scale: 1.0,
            config: &config,
        };

        let turn = Mill.steer(&me, &ctx);
        assert!(turn.abs() <= me.max_turn + 1e-6);
    }
}
