//! Trail surface: the rendered ink history, reused as the sensed environment.
//!
//! There is no separate chemical field. Bots paint segments onto a raster and
//! later read the same raster back through the trail sensor, so the rendered
//! output doubles as environmental memory.

/// A pixel-space rectangle. Callers clip to surface bounds before sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

/// The renderer-facing seam of the core.
///
/// The crate ships [`Raster`]; an embedding application may substitute its
/// own implementation (e.g. a GPU-backed canvas read back on demand).
pub trait TrailSurface {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Copy out an RGBA buffer for the given region, row-major.
    ///
    /// The rectangle must lie within surface bounds.
    fn sample_region(&self, rect: PixelRect) -> Vec<u8>;

    /// Stroke a trail segment in pixel coordinates with a round cap.
    ///
    /// `alpha` in [0, 1] blends the stroke over the existing surface.
    /// Zero-length segments draw nothing.
    fn draw_segment(&mut self, rgb: [u8; 3], width_px: f32, from: (f32, f32), to: (f32, f32), alpha: f32);

    /// Reset to the blank (white) state.
    fn clear(&mut self);
}

/// CPU raster surface: RGBA bytes on white.
#[derive(Clone)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![255; (width as usize) * (height as usize) * 4],
        }
    }

    /// Borrow the full RGBA buffer (for image export).
    pub fn rgba(&self) -> &[u8] {
        &self.data
    }

    /// Blend a filled disc into the raster.
    fn blend_disc(&mut self, cx: f32, cy: f32, radius: f32, rgb: [u8; 3], alpha: f32) {
        let x_min = ((cx - radius).floor().max(0.0)) as u32;
        let y_min = ((cy - radius).floor().max(0.0)) as u32;
        let x_max = ((cx + radius).ceil() as i64).min(self.width as i64 - 1);
        let y_max = ((cy + radius).ceil() as i64).min(self.height as i64 - 1);
        if x_max < x_min as i64 || y_max < y_min as i64 {
            return;
        }

        let r2 = radius * radius;
        for py in y_min..=y_max as u32 {
            for px in x_min..=x_max as u32 {
                let dx = px as f32 + 0.5 - cx;
                let dy = py as f32 + 0.5 - cy;
                if dx * dx + dy * dy > r2 {
                    continue;
                }
                let idx = ((py * self.width + px) * 4) as usize;
                for c in 0..3 {
                    let dst = self.data[idx + c] as f32;
                    let src = rgb[c] as f32;
                    self.data[idx + c] = (dst + (src - dst) * alpha).round() as u8;
                }
            }
        }
    }
}

impl TrailSurface for Raster {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn sample_region(&self, rect: PixelRect) -> Vec<u8> {
        debug_assert!(rect.x + rect.w <= self.width && rect.y + rect.h <= self.height);

        let mut out = Vec::with_capacity((rect.w as usize) * (rect.h as usize) * 4);
        for row in rect.y..rect.y + rect.h {
            let start = ((row * self.width + rect.x) * 4) as usize;
            out.extend_from_slice(&self.data[start..start + (rect.w as usize) * 4]);
        }
        out
    }

    fn draw_segment(&mut self, rgb: [u8; 3], width_px: f32, from: (f32, f32), to: (f32, f32), alpha: f32) {
        let dx = to.0 - from.0;
        let dy = to.1 - from.1;
        let len = (dx * dx + dy * dy).sqrt();
        if len < 1e-6 {
            return;
        }

        let radius = (width_px * 0.5).max(0.5);
        let alpha = alpha.clamp(0.0, 1.0);

        // Stamp discs densely enough that the stroke has no gaps
        let steps = (len / (radius * 0.5)).ceil().max(1.0) as u32;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            self.blend_disc(from.0 + dx * t, from.1 + dy * t, radius, rgb, alpha);
        }
    }

    fn clear(&mut self) {
        self.data.fill(255);
    }
}
