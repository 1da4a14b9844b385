//! RNG module - deterministic random sampling for levels and enemy AI
//!
//! Level generation and enemy movement both draw from one seeded generator so
//! that a seed reproduces a match exactly. Free-position pools are sampled
//! destructively through [`PoolSampling`].

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// The high bits are used because the low bits of an LCG cycle quickly.
    pub fn next_range(&mut self, max: u32) -> u32 {
        debug_assert!(max > 0, "next_range called with an empty range");
        (self.next_u32() >> 8) % max.max(1)
    }

    /// Random index in [0, len)
    pub fn next_index(&mut self, len: usize) -> usize {
        self.next_range(len as u32) as usize
    }

    /// Remove and return a random element of `pool` under the given sampling policy
    ///
    /// Returns None when the policy leaves no selectable element.
    pub fn take_from<T>(&mut self, pool: &mut Vec<T>, sampling: PoolSampling) -> Option<T> {
        let bound = sampling.bound(pool.len());
        if bound == 0 {
            return None;
        }
        let idx = self.next_index(bound);
        Some(pool.remove(idx))
    }

    /// Get the current RNG state (for reproducing a match)
    pub fn seed(&self) -> u32 {
        self.state
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

/// How a random element is drawn from a shrinking free-position pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PoolSampling {
    /// Draw from `[0, len - 1)`: the last pool element is never selectable.
    #[default]
    SkipLast,
    /// Draw uniformly from `[0, len)`.
    Uniform,
}

impl PoolSampling {
    /// Exclusive upper bound of the drawable index range for a pool of `len`
    pub fn bound(self, len: usize) -> usize {
        match self {
            PoolSampling::SkipLast => len.saturating_sub(1),
            PoolSampling::Uniform => len,
        }
    }

    /// Smallest pool that still allows `draws` consecutive draws
    pub fn required_pool(self, draws: usize) -> usize {
        match (self, draws) {
            (_, 0) => 0,
            (PoolSampling::SkipLast, n) => n + 1,
            (PoolSampling::Uniform, n) => n,
        }
    }
}
