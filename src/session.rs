//! Experiment session: the design, its schedule and the KPIs under study.
//!
//! [`Session`] owns all mutable experiment state and hands read-only
//! snapshots to the pure functions in [`crate::construct`],
//! [`crate::simulate`] and [`crate::doe`].
//!
//! ```
//! use taguchi_l25::doe::Objective;
//! use taguchi_l25::session::Session;
//!
//! let mut session = Session::default();
//! session.generate().unwrap();
//! assert_eq!(session.kpis().len(), 2);
//!
//! let id = session.add_kpi("ROAS", Objective::Maximize).unwrap();
//! let analysis = session.analyze(id).unwrap();
//! assert_eq!(analysis.main_effects.len(), 6);
//! ```

use std::fmt;

#[cfg(feature = "serde")]
use serde::Serialize;
use tracing::{debug, warn};

use crate::construct::build_l25;
use crate::design::{build_schedule, Design, Schedule};
use crate::doe::{self, Analysis, Objective};
use crate::error::{Error, Result};
use crate::simulate::simulate;

/// KPIs seeded by [`Session::generate`].
pub const SEED_KPIS: [(&str, Objective); 2] = [
    ("CTR (%)", Objective::Maximize),
    ("CPA ($)", Objective::Minimize),
];

/// Identifier of a KPI within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct KpiId(u32);

impl KpiId {
    /// The raw numeric id.
    #[must_use]
    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for KpiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "kpi-{}", self.0)
    }
}

/// A response set: one value per run, analyzed under an objective.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Kpi {
    /// Session-local identifier.
    pub id: KpiId,
    /// KPI name, also the simulation seed.
    pub name: String,
    /// Whether larger or smaller is better.
    pub objective: Objective,
    /// Response of each run, in run order.
    pub values: Vec<f64>,
}

/// Owner of the experiment state.
#[derive(Debug, Clone)]
pub struct Session {
    design: Design,
    schedule: Option<Schedule>,
    kpis: Vec<Kpi>,
    next_id: u32,
}

impl Session {
    /// Start a session for a design. No schedule exists until [`Session::generate`].
    #[must_use]
    pub fn new(design: Design) -> Self {
        Self {
            design,
            schedule: None,
            kpis: Vec::new(),
            next_id: 1,
        }
    }

    /// The current design.
    #[must_use]
    pub fn design(&self) -> &Design {
        &self.design
    }

    /// The current schedule, if one has been generated.
    #[must_use]
    pub fn schedule(&self) -> Option<&Schedule> {
        self.schedule.as_ref()
    }

    /// All KPIs in creation order.
    #[must_use]
    pub fn kpis(&self) -> &[Kpi] {
        &self.kpis
    }

    /// Look up a KPI.
    #[must_use]
    pub fn kpi(&self, id: KpiId) -> Option<&Kpi> {
        self.kpis.iter().find(|k| k.id == id)
    }

    /// Rename a factor and relabel the schedule.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the factor does not exist.
    pub fn set_factor_name(&mut self, factor: usize, name: &str) -> Result<()> {
        self.design.set_factor_name(factor, name)?;
        self.refresh_schedule()
    }

    /// Relabel a factor level and the schedule.
    ///
    /// # Errors
    ///
    /// Returns `IndexOutOfBounds` if the factor or level does not exist.
    pub fn set_level_label(&mut self, factor: usize, level: usize, label: &str) -> Result<()> {
        self.design.set_level_label(factor, level, label)?;
        self.refresh_schedule()
    }

    /// Build the L25 schedule for the current design.
    ///
    /// Any existing KPIs are discarded and the [`SEED_KPIS`] are simulated afresh.
    ///
    /// # Errors
    ///
    /// Returns `InvalidFactorConfiguration` if the design is not six factors of five levels.
    pub fn generate(&mut self) -> Result<&Schedule> {
        let schedule = build_schedule(&build_l25(), self.design.factors())?;
        debug!(runs = schedule.len(), "generated schedule");

        self.schedule = Some(schedule);
        self.kpis.clear();
        for (name, objective) in SEED_KPIS {
            self.add_kpi(name, objective)?;
        }

        self.schedule.as_ref().ok_or(Error::ScheduleNotGenerated)
    }

    /// Add a KPI with simulated values.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleNotGenerated` if no schedule exists yet.
    pub fn add_kpi(&mut self, name: &str, objective: Objective) -> Result<KpiId> {
        let schedule = self.schedule.as_ref().ok_or(Error::ScheduleNotGenerated)?;
        let values = simulate(name, schedule);

        let id = KpiId(self.next_id);
        self.next_id += 1;

        debug!(%id, kpi = name, %objective, "added KPI");
        self.kpis.push(Kpi {
            id,
            name: name.to_owned(),
            objective,
            values,
        });
        Ok(id)
    }

    /// Remove a KPI, returning it if it existed.
    pub fn remove_kpi(&mut self, id: KpiId) -> Option<Kpi> {
        let idx = self.kpis.iter().position(|k| k.id == id)?;
        debug!(%id, "removed KPI");
        Some(self.kpis.remove(idx))
    }

    /// Rename a KPI. Values are kept as they are.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKpi` if the id does not exist.
    pub fn rename_kpi(&mut self, id: KpiId, name: &str) -> Result<()> {
        self.kpi_mut(id)?.name = name.to_owned();
        Ok(())
    }

    /// Change a KPI's objective.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKpi` if the id does not exist.
    pub fn set_objective(&mut self, id: KpiId, objective: Objective) -> Result<()> {
        self.kpi_mut(id)?.objective = objective;
        Ok(())
    }

    /// Overwrite the response of one run (`run` is 0-based).
    ///
    /// Non-finite input is stored as 0.
    ///
    /// # Errors
    ///
    /// Returns `UnknownKpi` or `IndexOutOfBounds`.
    pub fn set_kpi_value(&mut self, id: KpiId, run: usize, value: f64) -> Result<()> {
        let kpi = self.kpi_mut(id)?;
        let size = kpi.values.len();
        let slot = kpi
            .values
            .get_mut(run)
            .ok_or(Error::IndexOutOfBounds { index: run, size })?;

        *slot = if value.is_finite() {
            value
        } else {
            warn!(%id, run, value, "non-finite response stored as 0");
            0.0
        };
        Ok(())
    }

    /// Analyze one KPI.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleNotGenerated`, `UnknownKpi`, or any error from [`doe::analyze`].
    pub fn analyze(&self, id: KpiId) -> Result<Analysis> {
        let schedule = self.schedule.as_ref().ok_or(Error::ScheduleNotGenerated)?;
        let kpi = self.kpi(id).ok_or(Error::UnknownKpi(id.0))?;
        doe::analyze(schedule, &kpi.values, kpi.objective)
    }

    /// Analyze every KPI in creation order.
    ///
    /// # Errors
    ///
    /// Returns the first error encountered.
    pub fn analyze_all(&self) -> Result<Vec<(KpiId, Analysis)>> {
        let schedule = self.schedule.as_ref().ok_or(Error::ScheduleNotGenerated)?;
        debug!(kpis = self.kpis.len(), "analyzing all KPIs");
        self.kpis
            .iter()
            .map(|k| Ok((k.id, doe::analyze(schedule, &k.values, k.objective)?)))
            .collect()
    }

    fn kpi_mut(&mut self, id: KpiId) -> Result<&mut Kpi> {
        self.kpis
            .iter_mut()
            .find(|k| k.id == id)
            .ok_or(Error::UnknownKpi(id.0))
    }

    fn refresh_schedule(&mut self) -> Result<()> {
        if self.schedule.is_some() {
            self.schedule = Some(build_schedule(&build_l25(), self.design.factors())?);
        }
        Ok(())
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Design::default())
    }
}
