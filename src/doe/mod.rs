//! Taguchi main-effects analysis.
//!
//! This module turns the 25 responses of one KPI into:
//! - Level means and the best level of every factor
//! - A percent-contribution ANOVA table
//! - The predicted response at the optimal combination
//!
//! ## Quick Start
//!
//! ```rust
//! use taguchi_l25::construct::build_l25;
//! use taguchi_l25::design::{build_schedule, Design};
//! use taguchi_l25::doe::{analyze, Objective};
//! use taguchi_l25::simulate::simulate;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let schedule = build_schedule(&build_l25(), Design::default().factors())?;
//! let ctr = simulate("CTR (%)", &schedule);
//!
//! let result = analyze(&schedule, &ctr, Objective::Maximize)?;
//!
//! println!("Grand mean: {:.4}", result.grand_mean);
//! println!("Best levels: {:?}", result.optimal_settings.factor_levels);
//! println!("Predicted optimum: {:.4}", result.predicted_optimum());
//! # Ok(())
//! # }
//! ```
//!
//! ## Why percent contribution
//!
//! Six five-level factors use 6 × 4 = 24 degrees of freedom, which is all
//! that 25 runs provide. With no residual degrees of freedom there is no
//! error variance to test against, so factors are compared by their share
//! of the total sum of squares instead of by F-ratios.

mod anova;
mod main_effects;
mod optimal;
mod types;

pub use main_effects::select_best_level;
pub use types::{
    ANOVAEntry, ANOVAResult, Analysis, FactorSummary, MainEffect, Objective, OptimalSettings,
};

use ndarray::Array2;

use crate::construct::{L25_FACTORS, L25_LEVELS, L25_RUNS};
use crate::design::Schedule;
use crate::error::{Error, Result};

/// Analyze one KPI's responses against the schedule they were observed on.
///
/// `values[r]` is the response of run `r + 1`. The inputs are not modified
/// and nothing is shared between calls, so KPIs can be analyzed in any order.
///
/// # Errors
/// * `EmptyResponseSet` if the schedule or `values` does not have exactly 25 entries
/// * `NonFiniteResponse` if any value is NaN or infinite
pub fn analyze(schedule: &Schedule, values: &[f64], objective: Objective) -> Result<Analysis> {
    if schedule.len() != L25_RUNS || values.len() != L25_RUNS {
        return Err(Error::EmptyResponseSet {
            runs: schedule.len(),
            values: values.len(),
        });
    }

    if let Some(idx) = values.iter().position(|v| !v.is_finite()) {
        return Err(Error::NonFiniteResponse { run: idx + 1 });
    }

    let grand_mean = values.iter().sum::<f64>() / values.len() as f64;
    let array_data = level_matrix(schedule);

    let main_effects = main_effects::calculate_main_effects(
        &array_data,
        values,
        grand_mean,
        L25_LEVELS as usize,
        objective,
    );
    let anova = anova::calculate_anova(&main_effects, values, grand_mean);
    let optimal_settings = optimal::predict_optimal(&main_effects, grand_mean);

    Ok(Analysis {
        objective,
        grand_mean,
        main_effects,
        anova,
        optimal_settings,
    })
}

fn level_matrix(schedule: &Schedule) -> Array2<u32> {
    Array2::from_shape_fn((schedule.len(), L25_FACTORS), |(r, f)| {
        schedule.runs()[r].levels[f]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::build_l25;
    use crate::design::{build_schedule, Design};
    use crate::simulate::simulate;

    fn schedule() -> Schedule {
        build_schedule(&build_l25(), Design::default().factors()).unwrap()
    }

    /// A response that depends on factors 0 and 2 only.
    fn additive_response(schedule: &Schedule) -> Vec<f64> {
        schedule
            .iter()
            .map(|run| 10.0 + 2.0 * f64::from(run.levels[0]) - 0.5 * f64::from(run.levels[2]))
            .collect()
    }

    #[test]
    fn test_end_to_end_ctr() {
        let s = schedule();
        let ctr = simulate("CTR (%)", &s);
        let result = analyze(&s, &ctr, Objective::Maximize).unwrap();

        assert_eq!(result.main_effects.len(), 6);
        assert_eq!(result.anova.entries.len(), 6);
        for entry in &result.anova.entries {
            assert_eq!(entry.degrees_of_freedom, 4);
        }
        assert_eq!(result.anova.error_df, 0);
        assert_eq!(result.anova.total_df, 24);

        let pct: f64 = result
            .anova
            .entries
            .iter()
            .map(|e| e.contribution_percent)
            .sum::<f64>()
            + result.anova.error_contribution_percent;
        assert!((pct - 100.0).abs() < 1e-6, "contributions sum to {pct}");

        assert_eq!(result.optimal_settings.factor_levels.len(), 6);
        for summary in result.factors() {
            assert!(summary.best_level < 5);
            let best = summary.level_means[summary.best_level];
            assert!(summary.level_means.iter().all(|&m| m <= best));
        }
    }

    #[test]
    fn test_ss_error_decomposition() {
        let s = schedule();
        for (name, objective) in [
            ("CTR (%)", Objective::Maximize),
            ("CPA ($)", Objective::Minimize),
            ("Anything", Objective::Maximize),
        ] {
            let values = simulate(name, &s);
            let result = analyze(&s, &values, objective).unwrap();
            let factor_ss: f64 = result.anova.entries.iter().map(|e| e.sum_of_squares).sum();
            let direct = result.anova.total_ss - factor_ss;

            assert!(result.anova.error_ss >= 0.0);
            assert!((result.anova.error_ss - direct.max(0.0)).abs() < 1e-9);
            assert!(direct.abs() < 1e-9, "{name}: saturated design leaves {direct}");
        }
    }

    #[test]
    fn test_error_df_is_always_zero() {
        let s = schedule();
        let inputs: [Vec<f64>; 3] = [
            vec![1.0; 25],
            (0..25u8).map(f64::from).collect(),
            additive_response(&s),
        ];
        for values in &inputs {
            assert_eq!(analyze(&s, values, Objective::Minimize).unwrap().anova.error_df, 0);
        }
    }

    #[test]
    fn test_recovers_additive_model() {
        let s = schedule();
        let values = additive_response(&s);

        let max = analyze(&s, &values, Objective::Maximize).unwrap();
        assert_eq!(max.main_effects[0].best_level, 4);
        assert_eq!(max.main_effects[2].best_level, 0);
        // Factors without effect tie everywhere and keep level 1.
        assert_eq!(max.main_effects[1].best_level, 0);
        assert!((max.predicted_optimum() - (10.0 + 10.0 - 0.5)).abs() < 1e-9);

        let pct0 = max.anova.entries[0].contribution_percent;
        let pct2 = max.anova.entries[2].contribution_percent;
        // SS ratio is 2² : 0.5² = 16 : 1.
        assert!((pct0 - 100.0 * 16.0 / 17.0).abs() < 1e-9);
        assert!((pct2 - 100.0 / 17.0).abs() < 1e-9);
        assert_eq!(max.main_effects[0].rank, 1);
        assert_eq!(max.main_effects[2].rank, 2);

        let min = analyze(&s, &values, Objective::Minimize).unwrap();
        assert_eq!(min.main_effects[0].best_level, 0);
        assert_eq!(min.main_effects[2].best_level, 4);
        assert!((min.predicted_optimum() - (10.0 + 2.0 - 2.5)).abs() < 1e-9);
    }

    #[test]
    fn test_constant_response() {
        let s = schedule();
        let result = analyze(&s, &[3.25; 25], Objective::Maximize).unwrap();

        assert!((result.grand_mean - 3.25).abs() < 1e-12);
        assert!(result.anova.total_ss.abs() < 1e-12);
        for summary in result.factors() {
            assert!(summary.contribution_percent.abs() < 1e-12);
            assert_eq!(summary.best_level, 0);
        }
        assert!((result.predicted_optimum() - 3.25).abs() < 1e-9);
    }

    #[test]
    fn test_length_mismatch() {
        let s = schedule();
        assert!(matches!(
            analyze(&s, &[1.0; 24], Objective::Maximize),
            Err(Error::EmptyResponseSet { runs: 25, values: 24 })
        ));
        assert!(matches!(
            analyze(&s, &[1.0; 26], Objective::Maximize),
            Err(Error::EmptyResponseSet { values: 26, .. })
        ));
        assert!(analyze(&s, &[], Objective::Maximize).is_err());
    }

    #[test]
    fn test_non_finite_rejected() {
        let s = schedule();
        let mut values = vec![1.0; 25];
        values[7] = f64::NAN;
        assert_eq!(
            analyze(&s, &values, Objective::Maximize).unwrap_err(),
            Error::NonFiniteResponse { run: 8 }
        );
    }

    #[test]
    fn test_inputs_untouched_and_repeatable() {
        let s = schedule();
        let values = simulate("ROAS", &s);
        let before = values.clone();

        let a = analyze(&s, &values, Objective::Maximize).unwrap();
        let b = analyze(&s, &values, Objective::Maximize).unwrap();

        assert_eq!(values, before);
        assert_eq!(a, b);
    }
}
