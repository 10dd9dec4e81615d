//! Orthogonal array core types and operations.
//!
//! ## Overview
//!
//! - [`OA`]: a symmetric orthogonal array stored as an `ndarray` matrix
//! - [`OAParams`]: the parameters describing it
//!
//! ## Notation
//!
//! An orthogonal array OA(N, k, s, t) has N rows (runs), k columns (factors),
//! s levels and strength t. Levels are numbered `1..=s`, the way Taguchi
//! tables print them, so an L25(5^6) array holds values in `1..=5`.
//!
//! The defining property is that every N×t subarray contains each possible
//! t-tuple exactly λ = N/s^t times.

mod stats;
mod verify;

pub use stats::BalanceReport;
pub use verify::{compute_strength, verify_strength, VerificationIssue, VerificationResult};

use ndarray::{Array2, ArrayView1};
use std::fmt;

use crate::error::{Error, Result};

/// Parameters describing a symmetric orthogonal array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OAParams {
    /// Number of runs (rows).
    pub runs: usize,
    /// Number of factors (columns).
    pub factors: usize,
    /// Number of levels shared by every factor.
    pub levels: u32,
    /// Strength (orthogonality degree).
    pub strength: u32,
}

impl OAParams {
    /// Create new parameters with validation.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - levels is 0 or 1
    /// - strength exceeds factors
    /// - N is not divisible by s^t
    pub fn new(runs: usize, factors: usize, levels: u32, strength: u32) -> Result<Self> {
        if levels < 2 {
            return Err(Error::invalid_params("levels must be at least 2"));
        }

        if strength as usize > factors {
            return Err(Error::invalid_params(format!(
                "strength {strength} cannot exceed factors {factors}"
            )));
        }

        let s_to_t = (levels as usize)
            .checked_pow(strength)
            .ok_or_else(|| Error::invalid_params(format!("{levels}^{strength} overflows")))?;

        if runs % s_to_t != 0 {
            return Err(Error::invalid_params(format!(
                "runs {runs} must be divisible by levels^strength = {levels}^{strength} = {s_to_t}"
            )));
        }

        Ok(Self {
            runs,
            factors,
            levels,
            strength,
        })
    }

    /// Get the index (lambda): how often each t-tuple appears.
    #[must_use]
    pub fn index(&self) -> usize {
        self.runs / (self.levels as usize).pow(self.strength)
    }
}

impl fmt::Display for OAParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "OA({}, {}, {}, {})",
            self.runs, self.factors, self.levels, self.strength
        )
    }
}

/// An orthogonal array.
///
/// Column `j` holds level numbers in `1..=levels`.
#[derive(Clone, PartialEq, Eq)]
pub struct OA {
    data: Array2<u32>,
    params: OAParams,
}

impl OA {
    /// Create a new orthogonal array from data and parameters.
    ///
    /// # Panics
    ///
    /// Panics if the data dimensions don't match the parameters.
    #[must_use]
    pub fn new(data: Array2<u32>, params: OAParams) -> Self {
        assert_eq!(
            data.nrows(),
            params.runs,
            "data rows {} must match params.runs {}",
            data.nrows(),
            params.runs
        );
        assert_eq!(
            data.ncols(),
            params.factors,
            "data cols {} must match params.factors {}",
            data.ncols(),
            params.factors
        );

        Self { data, params }
    }

    /// Create an orthogonal array, validating data dimensions.
    ///
    /// # Errors
    ///
    /// Returns an error if the data dimensions don't match the parameters.
    pub fn try_new(data: Array2<u32>, params: OAParams) -> Result<Self> {
        if data.nrows() != params.runs {
            return Err(Error::DimensionMismatch {
                expected: format!("{} rows", params.runs),
                actual: format!("{} rows", data.nrows()),
            });
        }
        if data.ncols() != params.factors {
            return Err(Error::DimensionMismatch {
                expected: format!("{} columns", params.factors),
                actual: format!("{} columns", data.ncols()),
            });
        }

        Ok(Self { data, params })
    }

    /// Get the number of runs (rows).
    #[must_use]
    pub fn runs(&self) -> usize {
        self.params.runs
    }

    /// Get the number of factors (columns).
    #[must_use]
    pub fn factors(&self) -> usize {
        self.params.factors
    }

    /// Get the number of levels.
    #[must_use]
    pub fn levels(&self) -> u32 {
        self.params.levels
    }

    /// Get the strength.
    #[must_use]
    pub fn strength(&self) -> u32 {
        self.params.strength
    }

    /// Get the parameters.
    #[must_use]
    pub fn params(&self) -> &OAParams {
        &self.params
    }

    /// Get a reference to the underlying data.
    #[must_use]
    pub fn data(&self) -> &Array2<u32> {
        &self.data
    }

    /// Get the level at a specific position.
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> u32 {
        self.data[[row, col]]
    }

    /// Get a row of the array.
    #[must_use]
    pub fn row(&self, idx: usize) -> ArrayView1<'_, u32> {
        self.data.row(idx)
    }

    /// Get a column of the array.
    #[must_use]
    pub fn column(&self, idx: usize) -> ArrayView1<'_, u32> {
        self.data.column(idx)
    }

    /// Iterate over rows.
    pub fn rows(&self) -> impl Iterator<Item = ArrayView1<'_, u32>> {
        self.data.rows().into_iter()
    }

    /// Verify that this array has its claimed strength.
    ///
    /// # Errors
    ///
    /// Returns an error if verification encounters an unexpected condition.
    pub fn verify(&self) -> Result<VerificationResult> {
        verify_strength(self, self.strength())
    }

    /// Check if all values are in the valid range `1..=levels`.
    #[must_use]
    pub fn values_in_range(&self) -> bool {
        let s = self.levels();
        self.data.iter().all(|&v| (1..=s).contains(&v))
    }
}

impl fmt::Debug for OA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} with data {:?}", self.params, self.data)
    }
}

impl fmt::Display for OA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.params)?;
        for row in self.data.rows() {
            let row_str: Vec<String> = row.iter().map(ToString::to_string).collect();
            writeln!(f, "  {}", row_str.join(" "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_l4() -> OA {
        let params = OAParams::new(4, 3, 2, 2).unwrap();
        let data =
            Array2::from_shape_vec((4, 3), vec![1, 1, 1, 1, 2, 2, 2, 1, 2, 2, 2, 1]).unwrap();
        OA::try_new(data, params).unwrap()
    }

    #[test]
    fn test_params_new() {
        let params = OAParams::new(25, 6, 5, 2).unwrap();
        assert_eq!(params.runs, 25);
        assert_eq!(params.factors, 6);
        assert_eq!(params.levels, 5);
        assert_eq!(params.index(), 1);
    }

    #[test]
    fn test_params_invalid() {
        assert!(OAParams::new(9, 4, 1, 2).is_err());
        assert!(OAParams::new(9, 2, 3, 3).is_err());
        assert!(OAParams::new(24, 6, 5, 2).is_err());
    }

    #[test]
    fn test_try_new_dimension_mismatch() {
        let params = OAParams::new(4, 3, 2, 2).unwrap();
        let data = Array2::from_elem((4, 2), 1u32);
        assert!(matches!(
            OA::try_new(data, params),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_values_in_range() {
        let oa = make_l4();
        assert!(oa.values_in_range());
        assert_eq!(oa.get(1, 2), 2);
        assert_eq!(oa.row(2).to_vec(), vec![2, 1, 2]);
    }

    #[test]
    fn test_display() {
        let oa = make_l4();
        let text = oa.to_string();
        assert!(text.starts_with("OA(4, 3, 2, 2)"));
        assert!(text.contains("  1 2 2"));
    }
}
