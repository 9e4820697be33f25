//! Seeded 2D simplex noise - the source of organic wandering and weave motion.

/// Skew/unskew factors for 2D simplex grids.
const F2: f64 = 0.366_025_403_784_438_6; // 0.5 * (sqrt(3) - 1)
const G2: f64 = 0.211_324_865_405_187_1; // (3 - sqrt(3)) / 6

/// Gradient set for 2D: the eight axis and diagonal directions.
const GRAD2: [[f64; 2]; 8] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// Deterministic gradient noise generator.
///
/// The permutation table is built once at construction from a Fisher-Yates
/// shuffle driven by the Park-Miller LCG keyed on the seed, so identical
/// seeds always produce identical noise fields.
#[derive(Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
}

impl SimplexNoise {
    /// Build a noise generator for the given seed.
    pub fn new(seed: u32) -> Self {
        let mut p: [u8; 256] = std::array::from_fn(|i| i as u8);
        let mut s = seed as u64;
        for i in (1..=255usize).rev() {
            s = (s * 16807) % 2_147_483_647;
            let j = (s % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }

        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        Self { perm }
    }

    /// Evaluate 2D noise at (x, y). Output is roughly in [-1, 1].
    pub fn noise2(&self, x: f64, y: f64) -> f64 {
        // Skew input space to determine the containing simplex cell
        let s = (x + y) * F2;
        let i = (x + s).floor() as i64;
        let j = (y + s).floor() as i64;
        let t = (i + j) as f64 * G2;
        let x0 = x - (i as f64 - t);
        let y0 = y - (j as f64 - t);

        // Offsets for the middle corner: lower or upper triangle
        let (i1, j1) = if x0 > y0 { (1usize, 0usize) } else { (0usize, 1usize) };
        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;

        let gi0 = self.perm[ii + self.perm[jj] as usize] as usize % 8;
        let gi1 = self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize % 8;
        let gi2 = self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize % 8;

        let n0 = corner(x0, y0, gi0);
        let n1 = corner(x1, y1, gi1);
        let n2 = corner(x2, y2, gi2);

        70.0 * (n0 + n1 + n2)
    }
}

/// Contribution of one simplex corner.
#[inline]
fn corner(x: f64, y: f64, gi: usize) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t <= 0.0 {
        return 0.0;
    }
    let t = t * t;
    let g = GRAD2[gi];
    t * t * (g[0] * x + g[1] * y)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let a = SimplexNoise::new(12345);
        let b = SimplexNoise::new(12345);

        for i in 0..200 {
            let x = i as f64 * 0.173;
            let y = i as f64 * 0.311;
            assert_eq!(a.noise2(x, y), b.noise2(x, y));
        }
    }

    #[test]
    fn test_output_bounded() {
        let noise = SimplexNoise::new(7);
        for i in 0..2000 {
            let v = noise.noise2(i as f64 * 0.07, (i % 37) as f64 * 0.13);
            assert!(v.is_finite());
            assert!(v.abs() <= 1.1, "noise out of range: {}", v);
        }
    }

    #[test]
    fn test_distinct_seeds_decorrelate() {
        let a = SimplexNoise::new(1);
        let b = SimplexNoise::new(2);

        let n = 500;
        let (mut sa, mut sb, mut saa, mut sbb, mut sab) = (0.0, 0.0, 0.0, 0.0, 0.0);
        for i in 0..n {
            let x = i as f64 * 0.21;
            let y = i as f64 * 0.09;
            let va = a.noise2(x, y);
            let vb = b.noise2(x, y);
            sa += va;
            sb += vb;
            saa += va * va;
            sbb += vb * vb;
            sab += va * vb;
        }

        let n = n as f64;
        let cov = sab / n - (sa / n) * (sb / n);
        let var_a = saa / n - (sa / n) * (sa / n);
        let var_b = sbb / n - (sb / n) * (sb / n);
        let corr = cov / (var_a * var_b).sqrt();

        assert!(corr.abs() < 0.5, "seeds too correlated: r = {}", corr);
    }

    #[test]
    fn test_smooth_over_small_steps() {
        let noise = SimplexNoise::new(99);
        let mut prev = noise.noise2(0.0, 42.0);
        for i in 1..1000 {
            let v = noise.noise2(i as f64 * 0.02, 42.0);
            assert!((v - prev).abs() < 0.2, "discontinuity at step {}", i);
            prev = v;
        }
    }
}
