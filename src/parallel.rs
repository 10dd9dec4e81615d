//! Parallel KPI analysis using Rayon.
//!
//! Every KPI is analyzed independently against the same schedule, so the
//! per-KPI work fans out across threads with no shared state.
//! Enable with the `parallel` feature flag.
//!
//! # Usage
//!
//! ```
//! use taguchi_l25::session::Session;
//!
//! let mut session = Session::default();
//! session.generate().unwrap();
//! let results = session.par_analyze_all().unwrap();
//! assert_eq!(results.len(), 2);
//! ```
//!
//! With only a handful of KPIs the sequential [`Session::analyze_all`] is
//! usually as fast.

use rayon::prelude::*;
use tracing::debug;

use crate::design::Schedule;
use crate::doe::{analyze, Analysis};
use crate::error::{Error, Result};
use crate::session::{Kpi, KpiId, Session};

/// Analyze many KPIs in parallel. Output order matches `kpis`.
///
/// # Errors
///
/// Returns the error of the first failing KPI in input order.
pub fn par_analyze(schedule: &Schedule, kpis: &[Kpi]) -> Result<Vec<(KpiId, Analysis)>> {
    debug!(kpis = kpis.len(), "parallel analysis");
    let results: Vec<Result<(KpiId, Analysis)>> = kpis
        .par_iter()
        .map(|k| Ok((k.id, analyze(schedule, &k.values, k.objective)?)))
        .collect();
    results.into_iter().collect()
}

/// Simulate many KPIs in parallel. Output order matches `names`.
#[must_use]
pub fn par_simulate(names: &[&str], schedule: &Schedule) -> Vec<Vec<f64>> {
    names
        .par_iter()
        .map(|name| crate::simulate::simulate(name, schedule))
        .collect()
}

impl Session {
    /// Parallel counterpart of [`Session::analyze_all`].
    ///
    /// # Errors
    ///
    /// Returns `ScheduleNotGenerated` or the first analysis error.
    pub fn par_analyze_all(&self) -> Result<Vec<(KpiId, Analysis)>> {
        let schedule = self.schedule().ok_or(Error::ScheduleNotGenerated)?;
        par_analyze(schedule, self.kpis())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doe::Objective;
    use crate::simulate::simulate;

    fn session_with_kpis() -> Session {
        let mut session = Session::default();
        session.generate().unwrap();
        for name in ["ROAS", "Conversion Rate (%)", "Revenue", "Bounce"] {
            session.add_kpi(name, Objective::Maximize).unwrap();
        }
        session
    }

    #[test]
    fn test_par_matches_sequential() {
        let session = session_with_kpis();

        let par = session.par_analyze_all().unwrap();
        let seq = session.analyze_all().unwrap();

        assert_eq!(par.len(), 6);
        assert_eq!(par, seq);
    }

    #[test]
    fn test_par_requires_schedule() {
        let session = Session::default();
        assert!(matches!(
            session.par_analyze_all(),
            Err(Error::ScheduleNotGenerated)
        ));
    }

    #[test]
    fn test_par_simulate_order() {
        let session = session_with_kpis();
        let schedule = session.schedule().unwrap();
        let names = ["CTR (%)", "CPA ($)", "ROAS"];

        let values = par_simulate(&names, schedule);

        assert_eq!(values.len(), 3);
        for (name, v) in names.iter().zip(&values) {
            assert_eq!(v, &simulate(name, schedule));
        }
    }

    #[test]
    fn test_par_propagates_errors() {
        let session = session_with_kpis();
        let schedule = session.schedule().unwrap();
        let mut kpis = session.kpis().to_vec();
        kpis[3].values.pop();

        assert!(matches!(
            par_analyze(schedule, &kpis),
            Err(Error::EmptyResponseSet { values: 24, .. })
        ));
    }

    #[test]
    fn test_par_reports_earliest_failure() {
        let session = session_with_kpis();
        let schedule = session.schedule().unwrap();
        let mut kpis = session.kpis().to_vec();
        kpis[1].values[0] = f64::NAN;
        for kpi in &mut kpis[2..] {
            kpi.values.pop();
        }

        for _ in 0..20 {
            assert_eq!(
                par_analyze(schedule, &kpis).unwrap_err(),
                Error::NonFiniteResponse { run: 1 }
            );
        }
    }
}
