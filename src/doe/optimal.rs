//! Optimal settings prediction using the additive main-effects model.

use super::types::{MainEffect, OptimalSettings};

/// Predict the response with every factor at its best level.
///
/// ŷ = Σ best_level_meanᵢ - (F - 1)·ȳ
///
/// Each best-level mean already contains the grand mean once, so F - 1
/// copies are subtracted.
pub fn predict_optimal(main_effects: &[MainEffect], grand_mean: f64) -> OptimalSettings {
    let factor_levels: Vec<usize> = main_effects.iter().map(|me| me.best_level).collect();

    let sum_best: f64 = main_effects.iter().map(MainEffect::best_mean).sum();
    let redundant = main_effects.len().saturating_sub(1) as f64;

    OptimalSettings {
        factor_levels,
        predicted_mean: sum_best - redundant * grand_mean,
    }
}
