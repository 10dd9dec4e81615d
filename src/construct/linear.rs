//! Linear-columns construction for strength-2 orthogonal arrays.
//!
//! Produces OA(p², k, p, 2) for a prime p and k ≤ p + 1.
//!
//! ## Algorithm
//!
//! For each row (i, j) with i, j ∈ Z_p, taken in i-major order:
//! - Column 0: i
//! - Column 1: j
//! - Column c (c = 2, ..., p): i + (c-1)·j (mod p)
//!
//! Every residue is then shifted by one so levels run `1..=p`.
//!
//! For a fixed multiplier k ≠ 0 the map j ↦ i + k·j is a bijection of Z_p,
//! which is what makes every pair of columns balanced.

use ndarray::Array2;

use super::{Constructor, L25_LEVELS};
use crate::error::{Error, Result};
use crate::oa::{OAParams, OA};
use crate::utils::is_prime;

/// Linear-columns construction over the prime field Z_p.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinearColumns {
    p: u32,
}

impl LinearColumns {
    /// Create a constructor for `p` levels.
    ///
    /// # Errors
    ///
    /// Returns an error if `p` is not prime.
    ///
    /// # Example
    ///
    /// ```
    /// use taguchi_l25::construct::{Constructor, LinearColumns};
    ///
    /// let l9 = LinearColumns::new(3).unwrap().construct(4).unwrap();
    /// assert_eq!(l9.runs(), 9);
    /// assert!(LinearColumns::new(6).is_err());
    /// ```
    pub fn new(p: u32) -> Result<Self> {
        if !is_prime(p) {
            return Err(Error::LevelsNotPrime {
                levels: p,
                algorithm: "LinearColumns",
            });
        }
        Ok(Self { p })
    }

    /// The five-level constructor behind the L25 table.
    #[must_use]
    pub(crate) const fn l25() -> Self {
        Self { p: L25_LEVELS }
    }

    /// Build every available column (p + 1 of them).
    #[must_use]
    pub(crate) fn full(&self) -> OA {
        let factors = (self.p + 1) as usize;
        let data = self.fill(factors);
        let params = OAParams {
            runs: self.runs(),
            factors,
            levels: self.p,
            strength: 2,
        };
        OA::new(data, params)
    }

    fn fill(&self, factors: usize) -> Array2<u32> {
        let p = self.p;
        let mut data = Array2::zeros((self.runs(), factors));

        for i in 0..p {
            for j in 0..p {
                let row = (i * p + j) as usize;
                for c in 0..factors {
                    let residue = match c {
                        0 => i,
                        1 => j,
                        _ => (i + (c as u32 - 1) * j) % p,
                    };
                    data[[row, c]] = residue + 1;
                }
            }
        }

        data
    }
}

impl Constructor for LinearColumns {
    fn name(&self) -> &'static str {
        "LinearColumns"
    }

    fn levels(&self) -> u32 {
        self.p
    }

    fn strength(&self) -> u32 {
        2
    }

    fn runs(&self) -> usize {
        (self.p * self.p) as usize
    }

    fn max_factors(&self) -> usize {
        (self.p + 1) as usize
    }

    fn construct(&self, factors: usize) -> Result<OA> {
        let max = self.max_factors();
        if factors > max {
            return Err(Error::TooManyFactors {
                factors,
                max,
                algorithm: self.name(),
            });
        }
        if factors == 0 {
            return Err(Error::invalid_params("factors must be at least 1"));
        }

        let strength = 2.min(factors as u32);
        let params = OAParams::new(self.runs(), factors, self.p, strength)?;
        OA::try_new(self.fill(factors), params)
    }
}
