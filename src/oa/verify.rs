//! Orthogonal array verification.
//!
//! Checks that an array has the claimed strength: for every selection of t
//! columns, every t-tuple of levels appears exactly λ = N/s^t times.

use std::collections::HashMap;

use crate::error::Result;
use crate::utils::combinations;

use super::OA;

/// Result of verifying an orthogonal array.
#[derive(Debug, Clone)]
pub struct VerificationResult {
    /// Whether the array passes verification.
    pub is_valid: bool,
    /// The claimed strength.
    pub claimed_strength: u32,
    /// The highest t for which the array is balanced.
    pub actual_strength: u32,
    /// Details about any issues found.
    pub issues: Vec<VerificationIssue>,
}

/// A specific issue found during verification.
#[derive(Debug, Clone)]
pub enum VerificationIssue {
    /// A value is outside `1..=levels`.
    ValueOutOfRange {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
        /// The value found.
        value: u32,
        /// Largest allowed level.
        max: u32,
    },
    /// Some t-tuples appear more or less often than expected.
    ImbalancedSubarray {
        /// Columns of the subarray.
        columns: Vec<usize>,
        /// Expected occurrences of each tuple.
        expected_count: usize,
        /// Observed occurrences.
        tuple_counts: HashMap<Vec<u32>, usize>,
    },
}

/// Verify that an orthogonal array has the claimed strength.
///
/// Time complexity: O(N * C(k, t) * t).
///
/// # Errors
///
/// Returns an error if verification encounters an unexpected condition.
pub fn verify_strength(oa: &OA, strength: u32) -> Result<VerificationResult> {
    let mut issues = Vec::new();
    let levels = oa.levels();
    let runs = oa.runs();
    let factors = oa.factors();

    for row in 0..runs {
        for col in 0..factors {
            let value = oa.get(row, col);
            if value == 0 || value > levels {
                issues.push(VerificationIssue::ValueOutOfRange {
                    row,
                    col,
                    value,
                    max: levels,
                });
            }
        }
    }

    if !issues.is_empty() {
        return Ok(VerificationResult {
            is_valid: false,
            claimed_strength: strength,
            actual_strength: 0,
            issues,
        });
    }

    let mut verified_strength = 0;

    for t in 1..=strength {
        if t as usize > factors {
            break;
        }

        let s_to_t = (levels as usize).pow(t);
        if runs % s_to_t != 0 {
            break;
        }
        let expected_count = runs / s_to_t;
        let mut balanced_at_t = true;

        for col_combo in combinations(factors, t as usize) {
            let mut tuple_counts: HashMap<Vec<u32>, usize> = HashMap::new();
            for row in 0..runs {
                let tuple: Vec<u32> = col_combo.iter().map(|&c| oa.get(row, c)).collect();
                *tuple_counts.entry(tuple).or_insert(0) += 1;
            }

            let all_equal = tuple_counts.values().all(|&c| c == expected_count);
            if tuple_counts.len() != s_to_t || !all_equal {
                balanced_at_t = false;
                issues.push(VerificationIssue::ImbalancedSubarray {
                    columns: col_combo,
                    expected_count,
                    tuple_counts,
                });
            }
        }

        if balanced_at_t {
            verified_strength = t;
        } else {
            break;
        }
    }

    Ok(VerificationResult {
        is_valid: issues.is_empty() && verified_strength >= strength,
        claimed_strength: strength,
        actual_strength: verified_strength,
        issues,
    })
}

/// Compute the actual strength of an orthogonal array, checking up to `max_check`.
///
/// # Errors
///
/// Returns an error if verification encounters an unexpected condition.
pub fn compute_strength(oa: &OA, max_check: u32) -> Result<u32> {
    let max_t = max_check.min(u32::try_from(oa.factors()).unwrap_or(u32::MAX));

    for t in (1..=max_t).rev() {
        if verify_strength(oa, t)?.is_valid {
            return Ok(t);
        }
    }

    Ok(0)
}
