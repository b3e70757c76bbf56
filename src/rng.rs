// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Jungle Protocol Simulation Suite - Seeded Draw Sources
//
// Every random decision the engine makes goes through `DrawSource`. The
// default `ReferenceRng` reproduces the reference dynamics draw-for-draw:
// a 32-bit Mersenne Twister with array seeding, 53-bit floats built from
// two outputs, and bounded integers rejection-sampled from the top bits.

/// Seeded generator owned by one simulator or topology builder.
pub trait DrawSource {
    fn seeded(seed: u64) -> Self
    where
        Self: Sized;

    /// Uniform float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;

    /// Uniform integer in `0..n`. Returns 0 when `n == 0`.
    fn below(&mut self, n: usize) -> usize;

    /// In-place Fisher–Yates shuffle, walking from the last index down.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

// ─── Mersenne Twister ────────────────────────────────────────────────────────

const MT_N: usize = 624;
const MT_M: usize = 397;
const MATRIX_A: u32 = 0x9908_b0df;
const UPPER_MASK: u32 = 0x8000_0000;
const LOWER_MASK: u32 = 0x7fff_ffff;

/// MT19937 generator matching the reference seeding and draw conventions.
#[derive(Clone)]
pub struct ReferenceRng {
    state: [u32; MT_N],
    index: usize,
}

impl std::fmt::Debug for ReferenceRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReferenceRng")
            .field("index", &self.index)
            .finish_non_exhaustive()
    }
}

impl ReferenceRng {
    /// Seed from the little-endian 32-bit words of `seed` (a single zero
    /// word for seed 0).
    pub fn from_seed(seed: u64) -> Self {
        let low = seed as u32;
        let high = (seed >> 32) as u32;
        if high == 0 {
            Self::from_key(&[low])
        } else {
            Self::from_key(&[low, high])
        }
    }

    /// Classic `init_genrand` single-word seeding.
    pub fn from_u32(seed: u32) -> Self {
        let mut state = [0u32; MT_N];
        state[0] = seed;
        for i in 1..MT_N {
            let prev = state[i - 1];
            state[i] = 1_812_433_253u32
                .wrapping_mul(prev ^ (prev >> 30))
                .wrapping_add(i as u32);
        }
        Self { state, index: MT_N }
    }

    /// Classic `init_by_array` seeding.
    pub fn from_key(key: &[u32]) -> Self {
        let mut rng = Self::from_u32(19_650_218);
        if key.is_empty() {
            return rng;
        }
        let state = &mut rng.state;
        let mut i = 1usize;
        let mut j = 0usize;

        for _ in 0..MT_N.max(key.len()) {
            let prev = state[i - 1] ^ (state[i - 1] >> 30);
            state[i] = (state[i] ^ prev.wrapping_mul(1_664_525))
                .wrapping_add(key[j])
                .wrapping_add(j as u32);
            i += 1;
            j += 1;
            if i >= MT_N {
                state[0] = state[MT_N - 1];
                i = 1;
            }
            if j >= key.len() {
                j = 0;
            }
        }
        for _ in 0..MT_N - 1 {
            let prev = state[i - 1] ^ (state[i - 1] >> 30);
            state[i] = (state[i] ^ prev.wrapping_mul(1_566_083_941)).wrapping_sub(i as u32);
            i += 1;
            if i >= MT_N {
                state[0] = state[MT_N - 1];
                i = 1;
            }
        }
        state[0] = UPPER_MASK;
        rng
    }

    fn twist(&mut self) {
        for i in 0..MT_N {
            let y = (self.state[i] & UPPER_MASK) | (self.state[(i + 1) % MT_N] & LOWER_MASK);
            let mut next = self.state[(i + MT_M) % MT_N] ^ (y >> 1);
            if y & 1 != 0 {
                next ^= MATRIX_A;
            }
            self.state[i] = next;
        }
        self.index = 0;
    }

    pub fn next_u32(&mut self) -> u32 {
        if self.index >= MT_N {
            self.twist();
        }
        let mut y = self.state[self.index];
        self.index += 1;

        y ^= y >> 11;
        y ^= (y << 7) & 0x9d2c_5680;
        y ^= (y << 15) & 0xefc6_0000;
        y ^= y >> 18;
        y
    }

    /// Top `bits` bits of one output, `bits` in `0..=32`.
    fn top_bits(&mut self, bits: u32) -> u32 {
        if bits == 0 {
            return 0;
        }
        self.next_u32() >> (32 - bits)
    }
}

impl DrawSource for ReferenceRng {
    fn seeded(seed: u64) -> Self {
        Self::from_seed(seed)
    }

    fn next_unit(&mut self) -> f64 {
        let a = (self.next_u32() >> 5) as f64;
        let b = (self.next_u32() >> 6) as f64;
        (a * 67_108_864.0 + b) * (1.0 / 9_007_199_254_740_992.0)
    }

    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        debug_assert!(n <= u32::MAX as usize, "bounded draws are limited to 32 bits");
        let bits = usize::BITS - n.leading_zeros();
        loop {
            let r = self.top_bits(bits) as usize;
            if r < n {
                return r;
            }
        }
    }
}

// ─── ChaCha (Monte Carlo sweeps) ─────────────────────────────────────────────

#[cfg(not(target_arch = "wasm32"))]
impl DrawSource for rand_chacha::ChaCha8Rng {
    fn seeded(seed: u64) -> Self {
        <Self as rand::SeedableRng>::seed_from_u64(seed)
    }

    fn next_unit(&mut self) -> f64 {
        rand::Rng::gen::<f64>(self)
    }

    fn below(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        rand::Rng::gen_range(self, 0..n)
    }
}
