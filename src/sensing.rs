//! Trail sensor: recover a "scent" direction from the rendered trail surface.

use crate::bot::Bot;
use crate::steering::normalize_angle;
use crate::surface::{PixelRect, TrailSurface};

/// Inner dead-zone radius in pixels. Samples closer than this are the bot's
/// own fresh trail and would swamp the signal.
pub const MIN_RADIUS_PX: f32 = 3.0;

/// Scan the trail surface in a forward cone and return the direction of the
/// weighted centroid of matching pixels, or `None` when nothing matches.
///
/// `range` is in world units and converted through `scale`; `half_angle` is
/// in radians; `step` is the sampling stride in pixels, bounding the cost at
/// `O((range * scale / step)^2)` regardless of world size. `None` covers the
/// clipped-empty region, no matching samples and zero accumulated weight
/// alike — it is a valid no-signal result, not a failure.
pub fn detect_trail<F>(
    bot: &Bot,
    matches: F,
    range: f32,
    half_angle: f32,
    step: u32,
    surface: &dyn TrailSurface,
    scale: f32,
) -> Option<f32>
where
    F: Fn(u8, u8, u8) -> bool,
{
    let cx = bot.x * scale;
    let cy = bot.y * scale;
    let search_r = range * scale;

    // Bounding box of the search area, clipped to the raster
    let bx = ((cx - search_r).floor() as i64).max(0);
    let by = ((cy - search_r).floor() as i64).max(0);
    let span = (search_r * 2.0).ceil() as i64 + 1;
    let bw = span.min(surface.width() as i64 - bx);
    let bh = span.min(surface.height() as i64 - by);
    if bw <= 0 || bh <= 0 {
        return None;
    }

    let data = surface.sample_region(PixelRect {
        x: bx as u32,
        y: by as u32,
        w: bw as u32,
        h: bh as u32,
    });

    let stride = step.max(1) as usize;
    let mut sum_dx = 0.0f32;
    let mut sum_dy = 0.0f32;
    let mut total_weight = 0.0f32;

    for gy in (0..bh as usize).step_by(stride) {
        for gx in (0..bw as usize).step_by(stride) {
            let dx = (bx + gx as i64) as f32 - cx;
            let dy = (by + gy as i64) as f32 - cy;
            let dist = (dx * dx + dy * dy).sqrt();
            if dist > search_r || dist < MIN_RADIUS_PX {
                continue;
            }

            // Restrict to the forward cone
            let bearing = normalize_angle(dy.atan2(dx) - bot.heading);
            if bearing.abs() > half_angle {
                continue;
            }

            let idx = (gy * bw as usize + gx) * 4;
            if matches(data[idx], data[idx + 1], data[idx + 2]) {
                let weight = 1.0 - dist / search_r; // closer samples dominate
                sum_dx += dx * weight;
                sum_dy += dy * weight;
                total_weight += weight;
            }
        }
    }

    if total_weight == 0.0 {
        return None;
    }
    Some((sum_dy / total_weight).atan2(sum_dx / total_weight))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bot::{Bot, ColorClass, SpawnOverrides};
    use crate::config::{BotConfig, WorldConfig};
    use crate::policy::PolicyKind;
    use crate::surface::Raster;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    const SCALE: f32 = 10.0;

    fn sensing_bot(x: f32, y: f32, heading: f32) -> Bot {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let overrides = SpawnOverrides {
            x: Some(x),
            y: Some(y),
            color: Some(ColorClass::Red),
            ..Default::default()
        };
        let mut bot = Bot::spawn(
            0,
            PolicyKind::Pair,
            &BotConfig::default(),
            &WorldConfig::default(),
            &overrides,
            &mut rng,
        );
        bot.heading = heading;
        bot
    }

    fn teal_matches(r: u8, g: u8, b: u8) -> bool {
        ColorClass::Teal.matches(r, g, b)
    }

    #[test]
    fn test_blank_surface_yields_none() {
        let raster = Raster::new(200, 200);
        let bot = sensing_bot(10.0, 10.0, 0.0);
        let hit = detect_trail(&bot, teal_matches, 5.0, 1.2, 3, &raster, SCALE);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_far_outside_raster_yields_none() {
        let raster = Raster::new(50, 50);
        // Region is entirely right of the raster once clipped
        let bot = sensing_bot(100.0, 100.0, 0.0);
        let hit = detect_trail(&bot, teal_matches, 2.0, 1.2, 3, &raster, SCALE);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_single_spot_direction_sign() {
        let mut raster = Raster::new(300, 300);
        let bot = sensing_bot(15.0, 15.0, 0.0); // center at (150, 150) px

        // Spot ahead and below (+y): returned angle must be positive
        raster.draw_segment([0, 166, 166], 3.0, (170.0, 170.0), (174.0, 170.0), 1.0);
        let angle = detect_trail(&bot, teal_matches, 5.0, 1.2, 1, &raster, SCALE)
            .expect("spot in cone not detected");
        assert!(angle > 0.0, "expected +y direction, got {}", angle);

        // Spot ahead and above (-y): sign flips
        let mut raster = Raster::new(300, 300);
        raster.draw_segment([0, 166, 166], 3.0, (170.0, 130.0), (174.0, 130.0), 1.0);
        let angle = detect_trail(&bot, teal_matches, 5.0, 1.2, 1, &raster, SCALE)
            .expect("spot in cone not detected");
        assert!(angle < 0.0, "expected -y direction, got {}", angle);
    }

    #[test]
    fn test_cone_excludes_rearward_trail() {
        let mut raster = Raster::new(300, 300);
        // Trail directly behind a bot heading +x
        raster.draw_segment([0, 166, 166], 3.0, (110.0, 150.0), (114.0, 150.0), 1.0);
        let bot = sensing_bot(15.0, 15.0, 0.0);

        let hit = detect_trail(&bot, teal_matches, 5.0, 0.5, 1, &raster, SCALE);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_dead_zone_ignores_own_fresh_trail() {
        let mut raster = Raster::new(300, 300);
        // Paint right on top of the bot, within MIN_RADIUS_PX
        raster.draw_segment([0, 166, 166], 1.0, (149.0, 150.0), (151.0, 150.0), 1.0);
        let bot = sensing_bot(15.0, 15.0, 0.0);

        let hit = detect_trail(&bot, teal_matches, 5.0, 3.0, 1, &raster, SCALE);
        assert_eq!(hit, None);
    }

    #[test]
    fn test_predicate_filters_color() {
        let mut raster = Raster::new(300, 300);
        // Red trail ahead; a teal-seeking scan must ignore it
        raster.draw_segment([214, 69, 80], 3.0, (170.0, 150.0), (180.0, 150.0), 1.0);
        let bot = sensing_bot(15.0, 15.0, 0.0);

        assert_eq!(detect_trail(&bot, teal_matches, 5.0, 1.2, 1, &raster, SCALE), None);
        let red = |r: u8, g: u8, b: u8| ColorClass::Red.matches(r, g, b);
        assert!(detect_trail(&bot, red, 5.0, 1.2, 1, &raster, SCALE).is_some());
    }

    #[test]
    fn test_closer_samples_dominate() {
        let mut raster = Raster::new(400, 400);
        let bot = sensing_bot(20.0, 20.0, 0.0); // center (200, 200) px

        // A sample's pull is offset * (1 - dist/range), so it grows with
        // distance until the weight decays. Near spot below at ~16 px
        // (weight ~0.8); far spot above at ~76 px of the 80 px range, where
        // the weight has almost vanished.
        raster.draw_segment([0, 166, 166], 3.0, (210.0, 212.0), (214.0, 212.0), 1.0);
        raster.draw_segment([0, 166, 166], 3.0, (228.0, 130.0), (232.0, 130.0), 1.0);

        let angle = detect_trail(&bot, teal_matches, 8.0, 1.4, 1, &raster, SCALE)
            .expect("nothing detected");
        assert!(angle > 0.0, "near spot should win: {}", angle);
    }
}
