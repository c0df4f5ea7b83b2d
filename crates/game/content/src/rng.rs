//! Deterministic random rolls for randomized skills.
//!
//! Every roll is derived from a fighter's seed and a roll counter, so a
//! battle replays identically from the same seeds.

/// Oracle producing deterministic pseudo-random values from a seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        // Full u32 range has a span of 2^32.
        let span = u64::from(max) - u64::from(min) + 1;
        let offset = u64::from(self.next_u32(seed)) % span;
        min + offset as u32
    }
}

/// PCG-XSH-RR generator: 64-bit LCG state, 32-bit permuted output.
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    #[inline]
    fn step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    #[inline]
    fn output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        Self::output(Self::step(seed))
    }
}

/// Mixes a base seed with a roll counter and a context discriminator.
///
/// Use distinct `context` values when one action needs independent rolls.
pub fn compute_seed(base_seed: u64, roll: u64, context: u32) -> u64 {
    let mut hash = base_seed;
    hash ^= roll.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= u64::from(context).wrapping_mul(0x85ebca6b);

    // SplitMix64 finalizer
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;
    hash
}

/// Seeded roll stream owned by one fighter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RollStream {
    seed: u64,
    rolls: u64,
}

impl RollStream {
    pub fn new(seed: u64) -> Self {
        Self { seed, rolls: 0 }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Rolls a value in [min, max] and advances the stream.
    pub fn roll(&mut self, min: u32, max: u32) -> u32 {
        let seed = compute_seed(self.seed, self.rolls, 0);
        self.rolls += 1;
        PcgRng.range(seed, min, max)
    }
}
