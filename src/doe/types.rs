//! DOE analysis types.

use std::fmt;
use std::str::FromStr;

use crate::error::Error;

/// Optimization goal for a KPI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Objective {
    /// Larger responses are better.
    #[default]
    Maximize,
    /// Smaller responses are better.
    Minimize,
}

impl Objective {
    /// The lowercase name used in exports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Maximize => "maximize",
            Self::Minimize => "minimize",
        }
    }

    /// Whether `candidate` strictly beats `incumbent` under this objective.
    #[must_use]
    pub fn improves(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Self::Maximize => candidate > incumbent,
            Self::Minimize => candidate < incumbent,
        }
    }
}

impl fmt::Display for Objective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Objective {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "maximize" | "max" => Ok(Self::Maximize),
            "minimize" | "min" => Ok(Self::Minimize),
            other => Err(Error::invalid_params(format!(
                "unknown objective '{other}', expected maximize or minimize"
            ))),
        }
    }
}

/// Main effect analysis result for a single factor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MainEffect {
    /// Factor index (0-based column).
    pub factor_index: usize,
    /// Mean response at each level; index 0 is level 1.
    pub level_means: Vec<f64>,
    /// Number of runs at each level.
    pub level_counts: Vec<usize>,
    /// Effect at each level (level mean - grand mean).
    pub level_effects: Vec<f64>,
    /// Range of level means (max - min).
    pub range: f64,
    /// Rank by range (1 = most influential).
    pub rank: usize,
    /// 0-based index of the best level under the objective.
    pub best_level: usize,
}

impl MainEffect {
    /// Mean response at the best level.
    #[must_use]
    pub fn best_mean(&self) -> f64 {
        self.level_means[self.best_level]
    }
}

/// ANOVA table entry for a single factor.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ANOVAEntry {
    /// Factor index (0-based column).
    pub factor_index: usize,
    /// Sum of squares for this factor.
    pub sum_of_squares: f64,
    /// Degrees of freedom (levels - 1).
    pub degrees_of_freedom: usize,
    /// Mean square (SS / df).
    pub mean_square: f64,
    /// Percent contribution to total variation.
    pub contribution_percent: f64,
}

/// Percent-contribution ANOVA. No F-ratios: the L25 design is saturated.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ANOVAResult {
    /// One entry per factor.
    pub entries: Vec<ANOVAEntry>,
    /// Residual sum of squares, never negative.
    pub error_ss: f64,
    /// Residual degrees of freedom.
    pub error_df: usize,
    /// Residual share of total variation.
    pub error_contribution_percent: f64,
    /// Total sum of squares.
    pub total_ss: f64,
    /// Total degrees of freedom (runs - 1).
    pub total_df: usize,
}

/// Optimal settings prediction result.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptimalSettings {
    /// 0-based best level of each factor.
    pub factor_levels: Vec<usize>,
    /// Predicted response with every factor at its best level.
    pub predicted_mean: f64,
}

/// Complete analysis of one KPI.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Analysis {
    /// Objective the best levels were chosen under.
    pub objective: Objective,
    /// Mean of all responses.
    pub grand_mean: f64,
    /// Main effects, one per factor.
    pub main_effects: Vec<MainEffect>,
    /// ANOVA table.
    pub anova: ANOVAResult,
    /// Best-level recommendation and predicted optimum.
    pub optimal_settings: OptimalSettings,
}

/// Flattened per-factor view of an [`Analysis`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FactorSummary<'a> {
    /// Factor index (0-based column).
    pub factor_index: usize,
    /// Mean response at each level.
    pub level_means: &'a [f64],
    /// Factor sum of squares.
    pub sum_of_squares: f64,
    /// Factor degrees of freedom.
    pub degrees_of_freedom: usize,
    /// Percent contribution.
    pub contribution_percent: f64,
    /// 0-based best level.
    pub best_level: usize,
}

impl Analysis {
    /// Per-factor records joining main effects with their ANOVA rows.
    pub fn factors(&self) -> impl Iterator<Item = FactorSummary<'_>> {
        self.main_effects
            .iter()
            .zip(&self.anova.entries)
            .map(|(me, entry)| FactorSummary {
                factor_index: me.factor_index,
                level_means: &me.level_means,
                sum_of_squares: entry.sum_of_squares,
                degrees_of_freedom: entry.degrees_of_freedom,
                contribution_percent: entry.contribution_percent,
                best_level: me.best_level,
            })
    }

    /// Predicted response at the optimal combination.
    #[must_use]
    pub fn predicted_optimum(&self) -> f64 {
        self.optimal_settings.predicted_mean
    }
}
