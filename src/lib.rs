//! # Taguchi L25
//!
//! Planning and analysis of five-level, six-factor experiments on the
//! Taguchi L25(5^6) orthogonal array.
//!
//! ## Overview
//!
//! An experiment is described by six factors, each with five named levels.
//! This library:
//! - Builds the L25 array and binds it to the factor names as a 25-run schedule
//! - Simulates deterministic example responses for named KPIs
//! - Analyzes each KPI by main effects and percent contribution
//! - Predicts the response at the best combination of levels
//! - Exports the whole experiment as JSON
//!
//! ## Quick Start
//!
//! ```rust
//! use taguchi_l25::prelude::*;
//!
//! let mut session = Session::default();
//! session.generate().unwrap();
//!
//! let ctr = session.kpis()[0].id;
//! let analysis = session.analyze(ctr).unwrap();
//!
//! assert_eq!(analysis.anova.error_df, 0);
//! for factor in analysis.factors() {
//!     assert!(factor.best_level < 5);
//! }
//! ```
//!
//! Or work with the pieces directly:
//!
//! ```rust
//! use taguchi_l25::construct::build_l25;
//! use taguchi_l25::design::{build_schedule, Design};
//! use taguchi_l25::doe::{analyze, Objective};
//!
//! let oa = build_l25();
//! assert_eq!(oa.runs(), 25);
//! assert!(oa.verify().unwrap().is_valid);
//!
//! let schedule = build_schedule(&oa, Design::default().factors()).unwrap();
//! let values: Vec<f64> = schedule.iter().map(|r| f64::from(r.levels[0])).collect();
//! let analysis = analyze(&schedule, &values, Objective::Minimize).unwrap();
//! assert_eq!(analysis.optimal_settings.factor_levels[0], 0);
//! ```
//!
//! ## Notation
//!
//! An orthogonal array is denoted as OA(N, k, s, t) where:
//! - **N**: Number of runs (rows)
//! - **k**: Number of factors (columns)
//! - **s**: Number of levels (symbols 1, 2, ..., s)
//! - **t**: Strength (every t-column subarray contains all s^t tuples equally)
//!
//! L25(5^6) is OA(25, 6, 5, 2).
//!
//! ## Features
//!
//! - `serde` (default): JSON design loading and experiment export
//! - `parallel`: Analyze KPIs in parallel using rayon
//!
//! ## Logging
//!
//! Operations emit [`tracing`] events. No subscriber is installed by the
//! library.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod construct;
pub mod design;
pub mod doe;
pub mod error;
#[cfg(feature = "serde")]
pub mod export;
pub mod oa;
pub mod rng;
pub mod session;
pub mod simulate;
pub mod utils;

#[cfg(feature = "parallel")]
pub mod parallel;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::construct::{build_l25, Constructor, LinearColumns};
    pub use crate::design::{build_schedule, Design, Factor, Run, Schedule};
    pub use crate::doe::{
        analyze, ANOVAEntry, ANOVAResult, Analysis, FactorSummary, MainEffect, Objective,
        OptimalSettings,
    };
    pub use crate::error::{Error, Result};
    pub use crate::oa::{compute_strength, verify_strength, BalanceReport, OAParams, OA};
    pub use crate::rng::Lcg;
    pub use crate::session::{Kpi, KpiId, Session};
    pub use crate::simulate::{simulate, KpiProfile};

    #[cfg(feature = "serde")]
    pub use crate::export::ExperimentExport;

    #[cfg(feature = "parallel")]
    pub use crate::parallel::{par_analyze, par_simulate};
}

// Re-export commonly used items at crate root
pub use construct::build_l25;
pub use doe::{analyze, Objective};
pub use error::{Error, Result};
pub use session::Session;
