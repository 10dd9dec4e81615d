//! Percent-contribution ANOVA.
//!
//! Decomposes total variation into per-factor sums of squares plus a
//! residual. The L25(5^6) design is saturated (24 factor df out of 24), so
//! the residual has no degrees of freedom and no F-test is attempted.

use super::types::{ANOVAEntry, ANOVAResult, MainEffect};

/// Calculate the ANOVA table from main effects.
///
/// # Algorithm
/// 1. Total SS = Σ(yᵢ - ȳ)²
/// 2. Factor SS = Σ nⱼ(ȳⱼ - ȳ)² over the factor's levels
/// 3. Error SS = max(0, Total SS - Σ Factor SS)
/// 4. Error df = max(0, (N - 1) - Σ factor df)
/// 5. Contribution = SS / Total SS × 100, or 0 when Total SS is 0
pub fn calculate_anova(
    main_effects: &[MainEffect],
    responses: &[f64],
    grand_mean: f64,
) -> ANOVAResult {
    let total_ss: f64 = responses.iter().map(|y| (y - grand_mean).powi(2)).sum();
    let total_df = responses.len().saturating_sub(1);

    let percent = |ss: f64| {
        if total_ss > 0.0 {
            ss / total_ss * 100.0
        } else {
            0.0
        }
    };

    let entries: Vec<ANOVAEntry> = main_effects
        .iter()
        .map(|me| {
            let ss: f64 = me
                .level_means
                .iter()
                .zip(&me.level_counts)
                .map(|(&mean, &count)| count as f64 * (mean - grand_mean).powi(2))
                .sum();
            let df = me.level_means.len().saturating_sub(1);
            let ms = if df > 0 { ss / df as f64 } else { 0.0 };

            ANOVAEntry {
                factor_index: me.factor_index,
                sum_of_squares: ss,
                degrees_of_freedom: df,
                mean_square: ms,
                contribution_percent: percent(ss),
            }
        })
        .collect();

    let factor_ss: f64 = entries.iter().map(|e| e.sum_of_squares).sum();
    let factor_df: usize = entries.iter().map(|e| e.degrees_of_freedom).sum();

    let error_ss = (total_ss - factor_ss).max(0.0);
    let error_df = total_df.saturating_sub(factor_df);

    ANOVAResult {
        entries,
        error_ss,
        error_df,
        error_contribution_percent: percent(error_ss),
        total_ss,
        total_df,
    }
}
