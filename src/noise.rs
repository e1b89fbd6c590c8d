//! Seeded deterministic value noise, used for non-uniform grid seeding.
//!
//! Random values are hashed at integer lattice points through a fixed
//! permutation table and smoothly interpolated between them. The same seed
//! always yields the same field, which keeps noise-based initialization
//! reproducible across runs.

/// Classic permutation table from Ken Perlin's reference implementation.
const PERM: [u8; 256] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180,
];

#[inline]
fn perm(x: i32, seed: i32) -> u8 {
    PERM[((x.wrapping_add(seed)) & 255) as usize]
}

/// Quintic fade curve: 6t^5 - 15t^4 + 10t^3.
#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + t * (b - a)
}

/// 2D value noise with a fixed integer seed.
///
/// `sample2d` is a pure function of `(seed, x, y)` and returns values in
/// [-1, 1].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ValueNoise {
    /// Random seed for the noise.
    pub seed: i32,
}

impl ValueNoise {
    /// Creates a value noise source with default seed (0).
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a value noise source with the given seed.
    pub fn with_seed(seed: i32) -> Self {
        Self { seed }
    }

    /// Sample the field at (x, y), returning a value in [-1, 1].
    pub fn sample2d(&self, x: f32, y: f32) -> f32 {
        let xi = x.floor() as i32;
        let yi = y.floor() as i32;

        let xf = x - x.floor();
        let yf = y - y.floor();

        let u = fade(xf);
        let v = fade(yf);

        let s = self.seed;
        let aa = perm(perm(xi, s) as i32 + yi, s) as f32 / 255.0;
        let ab = perm(perm(xi, s) as i32 + yi + 1, s) as f32 / 255.0;
        let ba = perm(perm(xi + 1, s) as i32 + yi, s) as f32 / 255.0;
        let bb = perm(perm(xi + 1, s) as i32 + yi + 1, s) as f32 / 255.0;

        let x1 = lerp(aa, ba, u);
        let x2 = lerp(ab, bb, u);

        // Lattice values are in [0, 1]; rescale to the signed range.
        lerp(x1, x2, v) * 2.0 - 1.0
    }
}
