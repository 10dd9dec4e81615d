//! Experimental design and run schedule.
//!
//! A [`Design`] names six factors with five levels each. Binding it to the
//! L25 array with [`build_schedule`] yields a [`Schedule`]: 25 labeled runs
//! that can be handed to an operator, exported, or analyzed.
//!
//! ```
//! use taguchi_l25::construct::build_l25;
//! use taguchi_l25::design::{build_schedule, Design};
//!
//! let design = Design::default();
//! let schedule = build_schedule(&build_l25(), design.factors()).unwrap();
//!
//! assert_eq!(schedule.len(), 25);
//! assert_eq!(schedule.runs()[0].labels[0], "Fixed CPC");
//! ```

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::construct::{L25_FACTORS, L25_LEVELS, L25_RUNS};
use crate::error::{Error, Result};
use crate::oa::OA;

/// Number of levels every factor must carry.
pub const LEVELS_PER_FACTOR: usize = L25_LEVELS as usize;

/// A named experimental factor with its level settings.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Factor {
    /// Display name of the factor.
    pub name: String,
    /// Level settings, positionally numbered 1..=5.
    pub levels: Vec<String>,
}

impl Factor {
    /// Create a factor from a name and level labels.
    pub fn new<N, L, S>(name: N, levels: L) -> Self
    where
        N: Into<String>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            levels: levels.into_iter().map(Into::into).collect(),
        }
    }

    /// Label for a 1-based level number, if it exists.
    #[must_use]
    pub fn label(&self, level: u32) -> Option<&str> {
        let idx = (level as usize).checked_sub(1)?;
        self.levels.get(idx).map(String::as_str)
    }
}

/// The full set of factors under study.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Design {
    factors: Vec<Factor>,
}

impl Design {
    /// Create a design from a list of factors.
    ///
    /// The shape is checked when a schedule is built, not here, so a design
    /// can be assembled incrementally.
    #[must_use]
    pub fn new(factors: Vec<Factor>) -> Self {
        Self { factors }
    }

    /// Load a design from a JSON array of `{ "name", "levels" }` objects.
    ///
    /// # Errors
    ///
    /// Returns an error if the document does not parse or the design does
    /// not have six factors of five levels.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self> {
        let design: Self = serde_json::from_str(json)?;
        design.validate()?;
        Ok(design)
    }

    /// The factors, in column order.
    #[must_use]
    pub fn factors(&self) -> &[Factor] {
        &self.factors
    }

    /// Check that there are six factors with five levels each.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFactorConfiguration` naming the first offending factor.
    pub fn validate(&self) -> Result<()> {
        validate_factors(&self.factors)
    }

    /// Rename a factor. An empty name falls back to `"Factor N"`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if `factor` does not exist.
    pub fn set_factor_name(&mut self, factor: usize, name: &str) -> Result<()> {
        let size = self.factors.len();
        let f = self
            .factors
            .get_mut(factor)
            .ok_or(Error::IndexOutOfBounds { index: factor, size })?;
        f.name = if name.is_empty() {
            format!("Factor {}", factor + 1)
        } else {
            name.to_owned()
        };
        Ok(())
    }

    /// Relabel one level of a factor. An empty label falls back to `"Level N"`.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the factor or level does not exist.
    pub fn set_level_label(&mut self, factor: usize, level: usize, label: &str) -> Result<()> {
        let size = self.factors.len();
        let f = self
            .factors
            .get_mut(factor)
            .ok_or(Error::IndexOutOfBounds { index: factor, size })?;
        let size = f.levels.len();
        let slot = f
            .levels
            .get_mut(level)
            .ok_or(Error::IndexOutOfBounds { index: level, size })?;
        *slot = if label.is_empty() {
            format!("Level {}", level + 1)
        } else {
            label.to_owned()
        };
        Ok(())
    }
}

impl Default for Design {
    /// The ad-campaign design: bidding, targeting, creative, audience, daypart and device.
    fn default() -> Self {
        Self::new(vec![
            Factor::new(
                "Bid Strategy",
                ["Fixed CPC", "Target CPA", "Max Conversions", "Target ROAS", "Enhanced CPC"],
            ),
            Factor::new(
                "Targeting Strategy",
                ["Contextual", "Behavioral", "Lookalike", "Keyword", "Retargeting"],
            ),
            Factor::new(
                "Creative Variant",
                ["Image A", "Image B", "Video A", "Video B", "Carousel"],
            ),
            Factor::new(
                "Audience Segment",
                [
                    "New Visitors",
                    "Returning Visitors",
                    "High Intent",
                    "Cart Abandoners",
                    "Loyalty Members",
                ],
            ),
            Factor::new(
                "Time of Day",
                ["Morning", "Afternoon", "Evening", "Night", "All Day"],
            ),
            Factor::new(
                "Device Platform",
                ["Mobile Web", "In-App", "Desktop", "Tablet", "CTV"],
            ),
        ])
    }
}

/// One row of the experiment: which level each factor runs at.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Run {
    /// 1-based run number.
    #[cfg_attr(feature = "serde", serde(rename = "run"))]
    pub index: usize,
    /// Level number (1..=5) of each factor.
    pub levels: [u32; L25_FACTORS],
    /// Level label of each factor, resolved from the design.
    pub labels: Vec<String>,
}

/// The 25 labeled runs of an L25 experiment.
///
/// Only [`build_schedule`] creates one, so every run holds levels in `1..=5`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Schedule {
    runs: Vec<Run>,
}

impl Schedule {
    /// The runs in run-number order.
    #[must_use]
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Number of runs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.runs.len()
    }

    /// Whether the schedule has no runs.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.runs.is_empty()
    }

    /// Iterate over the runs.
    pub fn iter(&self) -> std::slice::Iter<'_, Run> {
        self.runs.iter()
    }

    /// Level numbers of a single factor across all runs.
    pub fn factor_levels(&self, factor: usize) -> impl Iterator<Item = u32> + '_ {
        self.runs.iter().map(move |r| r.levels[factor])
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Run;
    type IntoIter = std::slice::Iter<'a, Run>;

    fn into_iter(self) -> Self::IntoIter {
        self.runs.iter()
    }
}

fn validate_factors(factors: &[Factor]) -> Result<()> {
    if factors.len() != L25_FACTORS {
        return Err(Error::invalid_factor(
            factors.len().min(L25_FACTORS),
            format!("expected {L25_FACTORS} factors, got {}", factors.len()),
        ));
    }

    for (idx, factor) in factors.iter().enumerate() {
        if factor.levels.len() != LEVELS_PER_FACTOR {
            return Err(Error::invalid_factor(
                idx,
                format!(
                    "'{}' needs {LEVELS_PER_FACTOR} levels, got {}",
                    factor.name,
                    factor.levels.len()
                ),
            ));
        }
    }

    Ok(())
}

/// Bind the L25 array to factor and level names.
///
/// Run `r` takes its levels from row `r` of the array, and
/// `labels[f] = factors[f].levels[level - 1]`.
///
/// # Errors
///
/// - `DimensionMismatch` if `oa` is not a 25×6 five-level array
/// - `InvalidFactorConfiguration` if there are not six factors of five levels
pub fn build_schedule(oa: &OA, factors: &[Factor]) -> Result<Schedule> {
    if oa.runs() != L25_RUNS || oa.factors() != L25_FACTORS || oa.levels() != L25_LEVELS {
        return Err(Error::DimensionMismatch {
            expected: format!("OA({L25_RUNS}, {L25_FACTORS}, {L25_LEVELS}, 2)"),
            actual: oa.params().to_string(),
        });
    }
    if !oa.values_in_range() {
        return Err(Error::invalid_params("array holds levels outside 1..=5"));
    }
    validate_factors(factors)?;

    let runs = oa
        .rows()
        .enumerate()
        .map(|(r, row)| {
            let mut levels = [0u32; L25_FACTORS];
            for (slot, &level) in levels.iter_mut().zip(row.iter()) {
                *slot = level;
            }
            let labels = factors
                .iter()
                .zip(levels)
                .enumerate()
                .map(|(f, (factor, level))| {
                    factor.label(level).map(str::to_owned).ok_or_else(|| {
                        Error::invalid_factor(f, format!("no label for level {level}"))
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Run {
                index: r + 1,
                levels,
                labels,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Schedule { runs })
}
