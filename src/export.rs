//! JSON export of a whole experiment.
//!
//! The document layout is:
//!
//! ```json
//! {
//!   "meta": { "array": "L25(5^6)", "strength": 2, "runs": 25, "factors": 6, "generatedAt": "..." },
//!   "design": [ { "name": "...", "levels": ["...", ...] }, ... ],
//!   "schedule": [ { "run": 1, "levels": [1, 1, 1, 1, 1, 1], "labels": [...] }, ... ],
//!   "results": [ { "name": "CTR (%)", "objective": "maximize", "values": [...] }, ... ]
//! }
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;
use tracing::debug;

use crate::construct::{L25_FACTORS, L25_RUNS};
use crate::design::{Factor, Run};
use crate::doe::Objective;
use crate::error::{Error, Result};
use crate::session::Session;

/// Array name written to `meta.array`.
pub const ARRAY_NAME: &str = "L25(5^6)";

/// Suggested file name for the exported document.
pub const EXPORT_FILE_NAME: &str = "experiment-L25.json";

/// Header of an export document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMeta {
    /// Always [`ARRAY_NAME`].
    pub array: &'static str,
    /// Orthogonal array strength.
    pub strength: u32,
    /// Number of runs.
    pub runs: usize,
    /// Number of factors.
    pub factors: usize,
    /// Export time, as an RFC 3339 timestamp with millisecond precision.
    #[serde(serialize_with = "rfc3339_millis")]
    pub generated_at: DateTime<Utc>,
}

/// One KPI as it appears under `results`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiRecord<'a> {
    /// KPI name.
    pub name: &'a str,
    /// Optimization direction.
    pub objective: Objective,
    /// Response of each run. Integral values are written without a fraction.
    #[serde(serialize_with = "compact_numbers")]
    pub values: &'a [f64],
}

/// Borrowed view of a session, ready to serialize.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperimentExport<'a> {
    /// Document header.
    pub meta: ExportMeta,
    /// Factors and level labels.
    pub design: &'a [Factor],
    /// Labeled runs.
    pub schedule: &'a [Run],
    /// Every KPI in creation order.
    pub results: Vec<KpiRecord<'a>>,
}

impl ExperimentExport<'_> {
    /// Serialize as indented JSON.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if encoding fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Largest magnitude below which every integral `f64` is exact in `i64`.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

struct CompactNumber(f64);

impl Serialize for CompactNumber {
    #[allow(clippy::cast_possible_truncation)]
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        let v = self.0;
        if v.fract() == 0.0 && v.abs() < MAX_EXACT_INT {
            serializer.serialize_i64(v as i64)
        } else {
            serializer.serialize_f64(v)
        }
    }
}

fn compact_numbers<S: serde::Serializer>(
    values: &&[f64],
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_seq(values.iter().map(|&v| CompactNumber(v)))
}

fn rfc3339_millis<S: serde::Serializer>(
    at: &DateTime<Utc>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.serialize_str(&at.to_rfc3339_opts(SecondsFormat::Millis, true))
}

impl Session {
    /// Snapshot the session for export, stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleNotGenerated` if there is nothing to export yet.
    pub fn export(&self) -> Result<ExperimentExport<'_>> {
        self.export_at(Utc::now())
    }

    /// Snapshot the session for export with an explicit timestamp.
    ///
    /// # Errors
    ///
    /// Returns `ScheduleNotGenerated` if there is nothing to export yet.
    pub fn export_at(&self, generated_at: DateTime<Utc>) -> Result<ExperimentExport<'_>> {
        let schedule = self.schedule().ok_or(Error::ScheduleNotGenerated)?;

        let results = self
            .kpis()
            .iter()
            .map(|k| KpiRecord {
                name: &k.name,
                objective: k.objective,
                values: &k.values,
            })
            .collect::<Vec<_>>();
        debug!(kpis = results.len(), "exporting experiment");

        Ok(ExperimentExport {
            meta: ExportMeta {
                array: ARRAY_NAME,
                strength: 2,
                runs: L25_RUNS,
                factors: L25_FACTORS,
                generated_at,
            },
            design: self.design().factors(),
            schedule: schedule.runs(),
            results,
        })
    }
}
