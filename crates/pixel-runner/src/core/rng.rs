//! Seedable pseudo-random number generator (xorshift64).
//! Deterministic and cheap; every random decision in the simulation draws from one of these.

/// Named streams for `Rng::for_stream`.
pub mod streams {
    /// Runtime entity behaviour: enemy turns, speed re-rolls, weapon amounts.
    pub const ENTITIES: u64 = 1;
    /// Background cloud layout.
    pub const CLOUDS: u64 = 2;
}

/// splitmix64 finalizer so neighbouring seeds don't start on correlated states.
fn mix(seed: u64) -> u64 {
    let mut z = seed;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Seedable pseudo-random number generator (xorshift64).
#[derive(Debug, Clone)]
pub struct Rng {
    state: u64,
}

impl Rng {
    pub fn new(seed: u64) -> Self {
        Rng {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    /// Stream dedicated to one chunk of the world.
    /// The same `(world_seed, chunk)` pair always yields the same sequence.
    pub fn for_chunk(world_seed: u64, chunk: i32) -> Self {
        Self::new(mix(world_seed ^ (chunk as i64 as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)))
    }

    /// Non-chunk stream of the world (see `streams`), independent of every chunk stream.
    pub fn for_stream(world_seed: u64, stream: u64) -> Self {
        Self::new(mix(mix(world_seed) ^ stream.wrapping_mul(0xD1B5_4A32_D192_ED03)))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a random number in [0, upper_bound).
    pub fn next_int(&mut self, upper_bound: u32) -> u32 {
        if upper_bound == 0 {
            return 0;
        }
        (self.next_u64() % upper_bound as u64) as u32
    }

    /// Uniform float in [0, 1).
    pub fn next_f32(&mut self) -> f32 {
        // top 24 bits fit the f32 mantissa exactly, so the result never rounds up to 1.0
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    /// Uniform float in [min, max).
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform integer in [min, max] (inclusive).
    pub fn range_inclusive(&mut self, min: u32, max: u32) -> u32 {
        min + self.next_int(max - min + 1)
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }

    /// Pick an index from a table of relative weights.
    pub fn weighted(&mut self, weights: &[f32]) -> usize {
        let total: f32 = weights.iter().sum();
        let mut roll = self.next_f32() * total;
        for (i, w) in weights.iter().enumerate() {
            if roll < *w {
                return i;
            }
            roll -= w;
        }
        weights.len().saturating_sub(1)
    }
}
