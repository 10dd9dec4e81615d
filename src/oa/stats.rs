//! Balance statistics for orthogonal arrays.

use super::OA;

/// A report on how often each level appears in each column.
#[derive(Debug, Clone)]
pub struct BalanceReport {
    /// Whether each factor is perfectly balanced.
    pub factor_balance: Vec<bool>,
    /// `level_counts[f][l]` is how often level `l + 1` appears in column `f`.
    pub level_counts: Vec<Vec<usize>>,
    /// Expected count for each level if balanced (N / s).
    pub expected_count: usize,
}

impl BalanceReport {
    /// Whether every column is balanced.
    #[must_use]
    pub fn is_balanced(&self) -> bool {
        self.factor_balance.iter().all(|&b| b)
    }
}

impl OA {
    /// Count level occurrences per column.
    ///
    /// A column is balanced when each of the levels `1..=s` appears exactly N/s times.
    /// Out-of-range values are ignored by the counts and make the column unbalanced.
    #[must_use]
    pub fn balance_report(&self) -> BalanceReport {
        let s = self.levels() as usize;
        let expected_count = self.runs() / s;

        let mut factor_balance = Vec::with_capacity(self.factors());
        let mut level_counts = Vec::with_capacity(self.factors());

        for col in 0..self.factors() {
            let mut counts = vec![0usize; s];
            let mut stray = false;
            for &value in self.column(col) {
                match (value as usize).checked_sub(1).filter(|&l| l < s) {
                    Some(l) => counts[l] += 1,
                    None => stray = true,
                }
            }

            factor_balance.push(!stray && counts.iter().all(|&c| c == expected_count));
            level_counts.push(counts);
        }

        BalanceReport {
            factor_balance,
            level_counts,
            expected_count,
        }
    }
}
