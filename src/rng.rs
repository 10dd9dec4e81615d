//! Deterministic, string-seeded pseudo-random generator.
//!
//! A 32-bit linear congruential generator (Numerical Recipes constants)
//! seeded from a polynomial hash of a string. Every instance owns its state,
//! so independent generators never interfere with each other.
//!
//! ```
//! use taguchi_l25::rng::Lcg;
//!
//! let mut a = Lcg::from_seed_str("kpi:CTR (%)");
//! let mut b = Lcg::from_seed_str("kpi:CTR (%)");
//! assert_eq!(a.next_f64(), b.next_f64());
//! ```

/// LCG multiplier.
pub const MULTIPLIER: u32 = 1_664_525;

/// LCG increment.
pub const INCREMENT: u32 = 1_013_904_223;

/// State substituted when a seed string hashes to zero.
pub const ZERO_SEED_FALLBACK: u32 = 123_456_789;

/// A seedable 32-bit linear congruential generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lcg {
    state: u32,
}

impl Lcg {
    /// Create a generator from a raw 32-bit state.
    ///
    /// A zero state is replaced by [`ZERO_SEED_FALLBACK`].
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        let state = if seed == 0 { ZERO_SEED_FALLBACK } else { seed };
        Self { state }
    }

    /// Create a generator from a string seed.
    ///
    /// The seed is hashed as `h = h * 31 + unit` over the string's UTF-16
    /// code units, left to right, with 32-bit wraparound.
    #[must_use]
    pub fn from_seed_str(seed: &str) -> Self {
        Self::new(hash_seed(seed))
    }

    /// The current internal state.
    #[must_use]
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Step the recurrence `state = A * state + C (mod 2^32)` and return the new state.
    pub fn advance(&mut self) -> u32 {
        self.state = MULTIPLIER.wrapping_mul(self.state).wrapping_add(INCREMENT);
        self.state
    }

    /// Advance and return `state / (2^32 - 1)`.
    ///
    /// The result lies in `[0, 1]`; exactly 1.0 only when the state reaches `u32::MAX`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.advance()) / f64::from(u32::MAX)
    }
}

impl Iterator for Lcg {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        Some(self.next_f64())
    }
}

/// Polynomial rolling hash of a seed string.
#[must_use]
pub fn hash_seed(seed: &str) -> u32 {
    seed.encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(u32::from(unit)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_seed() {
        assert_eq!(hash_seed(""), 0);
        assert_eq!(hash_seed("a"), 97);
        assert_eq!(hash_seed("ab"), 97 * 31 + 98);
        // Same value as Java's String.hashCode, reinterpreted as unsigned.
        assert_eq!(hash_seed("hello"), 99_162_322);
    }

    #[test]
    fn test_hash_wraps() {
        let long = "x".repeat(64);
        let expected = long
            .bytes()
            .fold(0u64, |acc, b| (acc * 31 + u64::from(b)) % (1u64 << 32));
        assert_eq!(u64::from(hash_seed(&long)), expected);
    }

    #[test]
    fn test_zero_seed_fallback() {
        assert_eq!(Lcg::from_seed_str("").state(), ZERO_SEED_FALLBACK);
        assert_eq!(Lcg::new(0), Lcg::new(ZERO_SEED_FALLBACK));
    }

    #[test]
    fn test_first_steps() {
        let mut rng = Lcg::new(1);
        assert_eq!(rng.advance(), 1_015_568_748);
        assert_eq!(rng.advance(), 1_586_005_467);

        let mut rng = Lcg::new(1);
        let x = rng.next_f64();
        assert!((x - 1_015_568_748.0 / 4_294_967_295.0).abs() < 1e-15);
    }

    #[test]
    fn test_reproducible() {
        let a: Vec<f64> = Lcg::from_seed_str("seed").take(100).collect();
        let b: Vec<f64> = Lcg::from_seed_str("seed").take(100).collect();
        assert_eq!(a, b);
        assert!(a.iter().all(|x| (0.0..=1.0).contains(x)));
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut ctr = Lcg::from_seed_str("CTR (%)");
        let mut cpa = Lcg::from_seed_str("CPA ($)");
        assert_ne!(ctr.next_f64(), cpa.next_f64());
    }

    #[test]
    fn test_instances_independent() {
        let mut a = Lcg::from_seed_str("seed");
        let mut b = Lcg::from_seed_str("seed");
        for _ in 0..10 {
            a.advance();
        }
        let mut fresh = Lcg::from_seed_str("seed");
        assert_eq!(b.next_f64(), fresh.next_f64());
    }
}
