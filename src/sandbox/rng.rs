//! Deterministic PRNG for the demo host.

/// xorshift64 generator.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Rng {
    state: u64,
}

impl Rng {
    /// Create a new RNG with the given seed.
    pub(crate) const fn new(seed: u64) -> Self {
        // xorshift never leaves the zero state
        let state = if seed == 0 { 0x5555_5555_5555_5555 } else { seed };
        Self { state }
    }

    /// Generate next random u64.
    pub(crate) fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Generate a value in `[0, max)`, or 0 when `max` is 0.
    pub(crate) fn next_below(&mut self, max: u16) -> u16 {
        if max == 0 {
            return 0;
        }
        u16::try_from(self.next_u64() % u64::from(max)).unwrap_or(0)
    }
}
