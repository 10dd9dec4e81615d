//! Error types for the taguchi-l25 library.
//!
//! This module provides error handling using the `thiserror` crate, with
//! specific variants for array construction, schedule building, response
//! analysis and session management.

use thiserror::Error;

/// The main error type for the taguchi-l25 library.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    // ============ Parameter Validation Errors ============
    /// Invalid construction parameters.
    #[error("invalid parameters: {message}")]
    InvalidParams {
        /// Description of what is invalid.
        message: String,
    },

    /// The number of factors exceeds the maximum allowed by the construction.
    #[error("factors {factors} exceeds maximum {max} for {algorithm} construction")]
    TooManyFactors {
        /// Requested number of factors.
        factors: usize,
        /// Maximum allowed factors.
        max: usize,
        /// Name of the construction algorithm.
        algorithm: &'static str,
    },

    /// The number of levels is not prime as required.
    #[error("levels {levels} is not prime as required by {algorithm}")]
    LevelsNotPrime {
        /// The invalid levels value.
        levels: u32,
        /// Name of the construction algorithm.
        algorithm: &'static str,
    },

    // ============ Design Errors ============
    /// A factor (or the design as a whole) has the wrong shape.
    #[error("invalid factor configuration for factor {factor}: {message}")]
    InvalidFactorConfiguration {
        /// Index of the offending factor (0-based).
        factor: usize,
        /// Description of what is wrong.
        message: String,
    },

    // ============ Analysis Errors ============
    /// The schedule or the response vector does not cover all runs.
    #[error("response set does not match the design: {runs} runs, {values} values (expected 25 of each)")]
    EmptyResponseSet {
        /// Number of runs in the schedule.
        runs: usize,
        /// Number of response values supplied.
        values: usize,
    },

    /// A response value is NaN or infinite.
    #[error("response for run {run} is not a finite number")]
    NonFiniteResponse {
        /// The 1-based run index.
        run: usize,
    },

    // ============ Dimension Errors ============
    /// Array dimensions are inconsistent.
    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch {
        /// Expected dimension description.
        expected: String,
        /// Actual dimension description.
        actual: String,
    },

    /// Index is out of bounds.
    #[error("index {index} is out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The invalid index.
        index: usize,
        /// The maximum valid size.
        size: usize,
    },

    // ============ Session Errors ============
    /// An operation needs a schedule but none has been generated yet.
    #[error("no schedule has been generated")]
    ScheduleNotGenerated,

    /// No KPI with the given id exists in the session.
    #[error("unknown KPI id {0}")]
    UnknownKpi(u32),

    /// Serializing an export payload failed.
    #[error("serialization failed: {message}")]
    Serialization {
        /// Description of the failure.
        message: String,
    },
}

/// A specialized `Result` type for taguchi-l25 operations.
pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    /// Create a new `InvalidParams` error.
    #[must_use]
    pub fn invalid_params(message: impl Into<String>) -> Self {
        Self::InvalidParams {
            message: message.into(),
        }
    }

    /// Create a new `InvalidFactorConfiguration` error.
    #[must_use]
    pub fn invalid_factor(factor: usize, message: impl Into<String>) -> Self {
        Self::InvalidFactorConfiguration {
            factor,
            message: message.into(),
        }
    }
}

#[cfg(feature = "serde")]
impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: err.to_string(),
        }
    }
}
