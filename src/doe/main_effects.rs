//! Main effects calculation.
//!
//! Groups the responses by each factor's level and picks the best level.

use ndarray::Array2;

use super::types::{MainEffect, Objective};

/// Pick the best level from a slice of level means.
///
/// Scans left to right and only moves on a strict improvement, so ties keep
/// the earliest level.
///
/// ```
/// use taguchi_l25::doe::{select_best_level, Objective};
///
/// let means = [1.0, 3.0, 2.0, 0.5, 3.0];
/// assert_eq!(select_best_level(&means, Objective::Maximize), 1);
/// assert_eq!(select_best_level(&means, Objective::Minimize), 3);
/// ```
#[must_use]
pub fn select_best_level(means: &[f64], objective: Objective) -> usize {
    let mut best = 0;
    for (i, &m) in means.iter().enumerate().skip(1) {
        if objective.improves(m, means[best]) {
            best = i;
        }
    }
    best
}

/// Calculate main effects for each factor.
///
/// # Arguments
/// * `array_data` - Level matrix (runs × factors) with levels `1..=num_levels`
/// * `responses` - One response per run
/// * `grand_mean` - Mean of all responses
/// * `num_levels` - Levels per factor
/// * `objective` - Direction used to pick the best level
///
/// # Algorithm
/// For each factor:
/// 1. Group runs by their level for this factor
/// 2. Mean response at each level (an empty level has mean 0)
/// 3. Effect = level mean - grand mean, range = max - min
/// 4. Best level by [`select_best_level`]
///
/// Factors are then ranked by range, descending.
pub fn calculate_main_effects(
    array_data: &Array2<u32>,
    responses: &[f64],
    grand_mean: f64,
    num_levels: usize,
    objective: Objective,
) -> Vec<MainEffect> {
    let num_factors = array_data.ncols();
    let mut effects: Vec<MainEffect> = Vec::with_capacity(num_factors);

    for factor_idx in 0..num_factors {
        let column = array_data.column(factor_idx);

        let mut level_sums = vec![0.0; num_levels];
        let mut level_counts = vec![0usize; num_levels];

        for (&level, &y) in column.iter().zip(responses) {
            let level_idx = level as usize - 1;
            level_sums[level_idx] += y;
            level_counts[level_idx] += 1;
        }

        let level_means: Vec<f64> = level_sums
            .iter()
            .zip(&level_counts)
            .map(|(&sum, &count)| if count > 0 { sum / count as f64 } else { 0.0 })
            .collect();

        let level_effects: Vec<f64> = level_means.iter().map(|m| m - grand_mean).collect();

        let min_mean = level_means.iter().copied().fold(f64::INFINITY, f64::min);
        let max_mean = level_means.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let best_level = select_best_level(&level_means, objective);

        effects.push(MainEffect {
            factor_index: factor_idx,
            level_means,
            level_counts,
            level_effects,
            range: max_mean - min_mean,
            rank: 0,
            best_level,
        });
    }

    // Stable sort: equal ranges keep column order.
    let mut order: Vec<usize> = (0..effects.len()).collect();
    order.sort_by(|&a, &b| effects[b].range.total_cmp(&effects[a].range));
    for (rank, idx) in order.into_iter().enumerate() {
        effects[idx].rank = rank + 1;
    }

    effects
}
