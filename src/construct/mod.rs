//! Orthogonal array construction.
//!
//! | Construction | Parameters | Requirements |
//! |-------------|------------|--------------|
//! | [`LinearColumns`] | OA(p², k, p, 2) | Prime p, k ≤ p+1 |
//!
//! The experiment planner only ever needs the L25(5^6) table, available
//! directly through [`build_l25`]:
//!
//! ```
//! use taguchi_l25::construct::build_l25;
//!
//! let oa = build_l25();
//! assert_eq!(oa.runs(), 25);
//! assert_eq!(oa.factors(), 6);
//! assert_eq!(oa.levels(), 5);
//! assert_eq!(oa.row(7).to_vec(), vec![2, 3, 4, 1, 3, 5]);
//! ```

mod linear;

pub use linear::LinearColumns;

use crate::error::Result;
use crate::oa::OA;

/// Number of runs in the L25 table.
pub const L25_RUNS: usize = 25;

/// Number of factor columns in the L25 table.
pub const L25_FACTORS: usize = 6;

/// Number of levels per factor in the L25 table.
pub const L25_LEVELS: u32 = 5;

/// Trait for orthogonal array construction algorithms.
pub trait Constructor: Send + Sync {
    /// Get the name of this construction method.
    fn name(&self) -> &'static str;

    /// Get the number of levels for arrays produced by this constructor.
    fn levels(&self) -> u32;

    /// Get the strength of arrays produced by this constructor.
    fn strength(&self) -> u32;

    /// Get the number of runs for arrays produced by this constructor.
    fn runs(&self) -> usize;

    /// Get the maximum number of factors this constructor can produce.
    fn max_factors(&self) -> usize;

    /// Construct an orthogonal array with the specified number of factors.
    ///
    /// # Errors
    ///
    /// Returns an error if `factors` is zero or exceeds `max_factors()`.
    fn construct(&self, factors: usize) -> Result<OA>;
}

/// Build the fixed L25(5^6) array.
///
/// Rows are ordered `i`-major, `j`-minor over `i, j ∈ 0..5`; the columns are
/// `i, j, i+j, i+2j, i+3j, i+4j (mod 5)`, shifted to levels `1..=5`.
#[must_use]
pub fn build_l25() -> OA {
    LinearColumns::l25().full()
}
