use serde::{Deserialize, Serialize};

use crate::Noise2D;

// Seed and shape of one 2D noise field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseConfig {
    pub seed: u64,
    pub octaves: usize,
    // Base frequency in cycles per block. Smaller spread gives larger features.
    pub spread: f64,
    // Amplitude falloff between octaves.
    pub persistence: f64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            octaves: 1,
            spread: 1.0,
            persistence: 0.5,
        }
    }
}

// 2D Simplex noise generator with multiple octaves
// Based on Ken Perlin's Simplex algorithm
#[derive(Debug, Clone)]
pub struct Simplex2D {
    seed: u64,
    spread: f64,
    persistence: f64,
    octaves: usize,
    perm: [u8; 512],
    // Simplex divides space into triangles, rather than squares
    // This results in better isotropy (uniformity in all directions)
    grad: [(i8, i8); 12],
}

impl Simplex2D {
    pub fn new(seed: u64, spread: f64, persistence: f64, octaves: usize) -> Self {
        // Seeded xorshift shuffle of the identity permutation
        let mut p: Vec<u8> = (0..256).map(|i| i as u8).collect();
        let mut x = seed ^ 0x1234_5678_9ABC_DEF0_u64;
        if x == 0 {
            // xorshift never leaves zero
            x = 0x9E37_79B9_7F4A_7C15;
        }
        let mut rng = || {
            x ^= x << 13;
            x ^= x >> 7;
            x ^= x << 17;
            x
        };
        for i in (1..256).rev() {
            let j = (rng() % (i as u64 + 1)) as usize;
            p.swap(i, j);
        }
        let mut perm = [0u8; 512];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = p[i & 255];
        }

        // Predefined 2D gradient directions, symmetric so the sign is unbiased
        let grad = [
            (1, 1),
            (-1, 1),
            (1, -1),
            (-1, -1),
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 2),
            (-1, 2),
            (1, -2),
            (-1, -2),
        ];

        Self {
            seed,
            spread,
            persistence,
            octaves: octaves.max(1),
            perm,
            grad,
        }
    }

    pub fn from_config(config: &NoiseConfig) -> Self {
        Self::new(
            config.seed,
            config.spread,
            config.persistence,
            config.octaves,
        )
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn octaves(&self) -> usize {
        self.octaves
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    #[inline]
    fn dot(g: (i8, i8), x: f64, y: f64) -> f64 {
        (g.0 as f64) * x + (g.1 as f64) * y
    }

    // Raw single-octave 2D Simplex noise at (xin, yin)
    fn raw_noise(&self, xin: f64, yin: f64) -> f64 {
        const SQRT_3: f64 = 1.732_050_807_568_877_2;
        // Skewing/Unskewing factors for 2D simplex
        const F2: f64 = 0.5 * (SQRT_3 - 1.0);
        const G2: f64 = (3.0 - SQRT_3) / 6.0;

        // Skew input space to determine simplex cell
        let s = (xin + yin) * F2;
        let i = (xin + s).floor() as i64;
        let j = (yin + s).floor() as i64;

        // Unskew back to get the relative position to the origin corner
        let t = (i + j) as f64 * G2;
        let x0 = xin - (i as f64 - t);
        let y0 = yin - (j as f64 - t);

        // Lower or upper triangle
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // Masking wraps negative cells onto the table without a seam
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let gi0 = (self.perm[ii + self.perm[jj] as usize] as usize) % 12;
        let gi1 = (self.perm[ii + i1 + self.perm[jj + j1] as usize] as usize) % 12;
        let gi2 = (self.perm[ii + 1 + self.perm[jj + 1] as usize] as usize) % 12;

        let corner = |g: (i8, i8), x: f64, y: f64| {
            let t = 0.5 - x * x - y * y;
            if t > 0.0 {
                let t_sq = t * t;
                t_sq * t_sq * Self::dot(g, x, y)
            } else {
                0.0
            }
        };

        let n0 = corner(self.grad[gi0], x0, y0);
        let n1 = corner(self.grad[gi1], x1, y1);
        let n2 = corner(self.grad[gi2], x2, y2);

        70.0 * (n0 + n1 + n2)
    }

    // Sample a size×size block of columns starting at (origin_x, origin_z).
    // Row-major, access as `grid[z][x]`.
    pub fn grid(&self, origin_x: i32, origin_z: i32, size: usize) -> Vec<Vec<f32>> {
        (0..size as i32)
            .map(|dz| {
                (0..size as i32)
                    .map(|dx| self.noise_at(origin_x + dx, origin_z + dz) as f32)
                    .collect()
            })
            .collect()
    }
}

impl Noise2D for Simplex2D {
    fn noise(&self, x: f64, z: f64) -> f64 {
        let mut amplitude = 1.0;
        let mut freq = self.spread;
        let mut total = 0.0;
        let mut max_amp = 0.0;

        for _ in 0..self.octaves {
            total += self.raw_noise(x * freq, z * freq) * amplitude;
            max_amp += amplitude;
            amplitude *= self.persistence;
            freq *= 2.0;
        }

        total / max_amp
    }
}
