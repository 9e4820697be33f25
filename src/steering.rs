//! Shared steering primitives: angle normalization, edge avoidance, weave.

use crate::bot::Bot;
use crate::config::WorldConfig;
use std::f32::consts::PI;

/// Gain applied to the edge repulsion turn.
const EDGE_GAIN: f32 = 2.0;

/// Edge avoidance may exceed the nominal turn ceiling by this factor.
const EDGE_CEILING_FACTOR: f32 = 3.0;

/// Noise offset separating the weave channel from the wander channel.
const WEAVE_SEED_OFFSET: f64 = 511.0;

/// Normalize an angular difference into `(-PI, PI]`.
///
/// Assumes finite input; a non-finite heading is a caller bug.
pub fn normalize_angle(mut a: f32) -> f32 {
    while a > PI {
        a -= 2.0 * PI;
    }
    while a <= -PI {
        a += 2.0 * PI;
    }
    a
}

/// Wall repulsion turn, identical for every policy.
///
/// Each wall closer than `edge_range` contributes an inward component scaled
/// by `1 - distance/range`. The combined vector is converted to a turn toward
/// it, weighted by urgency, and clamped to three times the bot's base turn
/// rate: escaping a wall is allowed to out-turn normal steering.
pub fn avoid_edges(bot: &Bot, world: &WorldConfig) -> f32 {
    let range = world.edge_range;
    let d_left = bot.x;
    let d_right = world.width - bot.x;
    let d_top = bot.y;
    let d_bottom = world.height - bot.y;

    let mut rep_x = 0.0f32;
    let mut rep_y = 0.0f32;
    if d_left < range {
        rep_x += 1.0 - d_left / range;
    }
    if d_right < range {
        rep_x -= 1.0 - d_right / range;
    }
    if d_top < range {
        rep_y += 1.0 - d_top / range;
    }
    if d_bottom < range {
        rep_y -= 1.0 - d_bottom / range;
    }

    if rep_x == 0.0 && rep_y == 0.0 {
        return 0.0;
    }

    let away = rep_y.atan2(rep_x);
    let diff = normalize_angle(away - bot.heading);
    let urgency = (rep_x * rep_x + rep_y * rep_y).sqrt().min(1.0);
    let ceiling = bot.max_turn * EDGE_CEILING_FACTOR;

    (diff * urgency * EDGE_GAIN).clamp(-ceiling, ceiling)
}

/// Noise-driven lateral oscillation layered onto directed steering.
///
/// Reads the bot's weave phase on a noise channel offset from the wander
/// channel, so the two motions stay uncorrelated.
pub fn weave(bot: &Bot, amplitude: f32) -> f32 {
    bot.noise.noise2(bot.weave_t, bot.seed as f64 + WEAVE_SEED_OFFSET) as f32 * amplitude
}
