//! Synthetic KPI responses for seeding example data.
//!
//! Each KPI gets a small linear model over the centered factor levels plus
//! uniform noise. The generator is seeded with `"kpi:" + name`, so the same
//! KPI name on the same schedule always yields the same values.
//!
//! ```
//! use taguchi_l25::construct::build_l25;
//! use taguchi_l25::design::{build_schedule, Design};
//! use taguchi_l25::simulate::simulate;
//!
//! let schedule = build_schedule(&build_l25(), Design::default().factors()).unwrap();
//! let ctr = simulate("CTR (%)", &schedule);
//!
//! assert_eq!(ctr.len(), 25);
//! assert_eq!(ctr, simulate("CTR (%)", &schedule));
//! ```

use tracing::trace;

use crate::construct::L25_FACTORS;
use crate::design::Schedule;
use crate::rng::Lcg;

/// Built-in KPI families and their response scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KpiProfile {
    /// `"CTR (%)"`: click-through rate.
    ClickThroughRate,
    /// `"CVR (%)"`: conversion rate.
    ConversionRate,
    /// `"CPA ($)"`: cost per acquisition, a lower-is-better cost.
    CostPerAcquisition,
    /// `"ROAS"`: return on ad spend.
    ReturnOnAdSpend,
    /// Any other name.
    Custom,
}

impl KpiProfile {
    /// Resolve a KPI name. Matching is exact; unknown names map to [`KpiProfile::Custom`].
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "CTR (%)" => Self::ClickThroughRate,
            "CVR (%)" => Self::ConversionRate,
            "CPA ($)" => Self::CostPerAcquisition,
            "ROAS" => Self::ReturnOnAdSpend,
            _ => Self::Custom,
        }
    }

    /// Baseline response.
    #[must_use]
    pub fn base(self) -> f64 {
        match self {
            Self::ClickThroughRate => 1.5,
            Self::ConversionRate => 2.2,
            Self::CostPerAcquisition => 45.0,
            Self::ReturnOnAdSpend => 1.8,
            Self::Custom => 10.0,
        }
    }

    /// Size of one unit of factor effect, also the noise amplitude.
    #[must_use]
    pub fn scale(self) -> f64 {
        match self {
            Self::ClickThroughRate => 0.12,
            Self::ConversionRate => 0.15,
            Self::CostPerAcquisition => 3.2,
            Self::ReturnOnAdSpend => 0.25,
            Self::Custom => 0.5,
        }
    }

    /// Cost KPIs respond to the factor weights with inverted sign.
    #[must_use]
    pub fn is_cost(self) -> bool {
        matches!(self, Self::CostPerAcquisition)
    }
}

/// Simulate one response per run for the named KPI.
///
/// Draw order is fixed: a magnitude and a sign draw for each of the six
/// columns, then one noise draw per run in run order. Names containing
/// `"(%)"` are clamped at zero, and every value is rounded to 3 decimals.
#[must_use]
pub fn simulate(kpi_name: &str, schedule: &Schedule) -> Vec<f64> {
    let mut rng = Lcg::from_seed_str(&format!("kpi:{kpi_name}"));

    let weights: [f64; L25_FACTORS] = std::array::from_fn(|_| {
        let magnitude = rng.next_f64() * 0.25 + 0.05;
        let sign = if rng.next_f64() >= 0.5 { 1.0 } else { -1.0 };
        magnitude * sign
    });

    let profile = KpiProfile::from_name(kpi_name);
    let base = profile.base();
    let scale = profile.scale();
    let direction = if profile.is_cost() { -1.0 } else { 1.0 };
    let clamp = kpi_name.contains("(%)");

    trace!(kpi = kpi_name, ?profile, ?weights, "simulating responses");

    schedule
        .iter()
        .map(|run| {
            let effect = run
                .levels
                .iter()
                .zip(weights)
                .fold(0.0, |acc, (&level, weight)| {
                    let centered = f64::from(level) - 3.0;
                    acc + centered * (weight * direction) * scale
                });
            let mut y = base + effect;
            y += (rng.next_f64() - 0.5) * scale;
            if clamp {
                y = y.max(0.0);
            }
            round3(y)
        })
        .collect()
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::build_l25;
    use crate::design::{build_schedule, Design, Factor};

    fn schedule() -> Schedule {
        build_schedule(&build_l25(), Design::default().factors()).unwrap()
    }

    /// Re-derives the model from the raw draw sequence.
    fn reference(kpi_name: &str, schedule: &Schedule) -> Vec<f64> {
        let mut draws = Lcg::from_seed_str(&format!("kpi:{kpi_name}"));
        let mut weights = Vec::new();
        for _ in 0..6 {
            let m = draws.next_f64();
            let s = draws.next_f64();
            weights.push((m * 0.25 + 0.05) * if s >= 0.5 { 1.0 } else { -1.0 });
        }
        let profile = KpiProfile::from_name(kpi_name);
        let sign = if profile.is_cost() { -1.0 } else { 1.0 };
        schedule
            .iter()
            .map(|run| {
                let mut effect = 0.0;
                for f in 0..6 {
                    effect +=
                        (f64::from(run.levels[f]) - 3.0) * (weights[f] * sign) * profile.scale();
                }
                let mut y = profile.base() + effect;
                y += (draws.next_f64() - 0.5) * profile.scale();
                if kpi_name.contains("(%)") {
                    y = y.max(0.0);
                }
                (y * 1000.0).round() / 1000.0
            })
            .collect()
    }

    #[test]
    fn test_profiles() {
        assert_eq!(KpiProfile::from_name("CTR (%)"), KpiProfile::ClickThroughRate);
        assert_eq!(KpiProfile::from_name("ROAS"), KpiProfile::ReturnOnAdSpend);
        assert_eq!(KpiProfile::from_name("ctr (%)"), KpiProfile::Custom);
        assert!((KpiProfile::from_name("Revenue").base() - 10.0).abs() < 1e-12);
        assert!((KpiProfile::from_name("Revenue").scale() - 0.5).abs() < 1e-12);
        assert!(KpiProfile::CostPerAcquisition.is_cost());
        assert!(!KpiProfile::ReturnOnAdSpend.is_cost());
    }

    #[test]
    fn test_simulation_is_deterministic() {
        let s = schedule();
        let a = simulate("CTR (%)", &s);
        let b = simulate("CTR (%)", &s);
        assert_eq!(a.len(), 25);
        assert_eq!(
            a.iter().map(|v| v.to_bits()).collect::<Vec<_>>(),
            b.iter().map(|v| v.to_bits()).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_matches_reference_model() {
        let s = schedule();
        for name in ["CTR (%)", "CVR (%)", "CPA ($)", "ROAS", "New KPI"] {
            let got = simulate(name, &s);
            let want = reference(name, &s);
            for (g, w) in got.iter().zip(&want) {
                assert_eq!(g.to_bits(), w.to_bits(), "{name}: {g} vs {w}");
            }
        }
    }

    #[test]
    fn test_values_are_rounded_and_plausible() {
        let s = schedule();
        for name in ["CTR (%)", "CPA ($)", "Other"] {
            let profile = KpiProfile::from_name(name);
            // Six factors at |centered| <= 2 with |weight| <= 0.3, plus noise <= scale/2.
            let bound = profile.scale() * (6.0 * 2.0 * 0.3 + 0.5) + 1e-3;
            for v in simulate(name, &s) {
                assert!(((v * 1000.0).round() - v * 1000.0).abs() < 1e-6);
                assert!((v - profile.base()).abs() <= bound, "{name}: {v}");
            }
        }
    }

    #[test]
    fn test_percentage_kpis_are_clamped() {
        let s = schedule();
        assert!(simulate("CTR (%)", &s).iter().all(|&v| v >= 0.0));
        assert!(simulate("Share (%)", &s).iter().all(|&v| v >= 0.0));
    }

    #[test]
    fn test_depends_on_levels_not_labels() {
        let mut relabeled = Design::default();
        relabeled.set_level_label(0, 0, "Something else").unwrap();
        let a = build_schedule(&build_l25(), relabeled.factors()).unwrap();
        let b = schedule();
        assert_eq!(simulate("ROAS", &a), simulate("ROAS", &b));

        let renamed: Vec<Factor> = Design::default()
            .factors()
            .iter()
            .map(|f| Factor::new(format!("{} (renamed)", f.name), f.levels.clone()))
            .collect();
        let c = build_schedule(&build_l25(), &renamed).unwrap();
        assert_eq!(simulate("ROAS", &c), simulate("ROAS", &b));
    }

    #[test]
    fn test_known_values() {
        let s = schedule();

        let ctr = simulate("CTR (%)", &s);
        let expected = [
            1.515, 1.374, 1.57, 1.495, 1.606, 1.544, 1.568, 1.476, 1.57, 1.436, 1.484, 1.636, 1.539,
            1.42, 1.417, 1.447, 1.5, 1.511, 1.572, 1.432, 1.369, 1.398, 1.513, 1.46, 1.554,
        ];
        assert_eq!(ctr.len(), expected.len());
        for (r, (got, want)) in ctr.iter().zip(&expected).enumerate() {
            assert!((got - want).abs() < 1e-9, "run {}: {got} vs {want}", r + 1);
        }

        let cpa = simulate("CPA ($)", &s);
        let head = [45.123, 43.718, 45.249, 43.165, 42.968];
        for (got, want) in cpa.iter().zip(&head) {
            assert!((got - want).abs() < 1e-9, "{got} vs {want}");
        }
        assert!((cpa[24] - 43.204).abs() < 1e-9);
    }

    #[test]
    fn test_different_kpis_differ() {
        let s = schedule();
        assert_ne!(simulate("CVR (%)", &s), simulate("ROAS", &s));
    }
}
