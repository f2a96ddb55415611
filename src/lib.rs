//! # Hydrologic Regression Estimation
//!
//! Regression-based estimation engine for hydrologic time series. Given a
//! dependent series Y (say, a streamflow gage with gaps) and an independent
//! series X (a nearby long-record gage), the engine builds one or twelve
//! (monthly) linear relationships used to estimate missing Y values from X.
//!
//! ## Key Features
//!
//! - **Two fitting methods**: ordinary least squares, and MOVE.2
//!   (Maintenance of Variance Extension), which adjusts the fitted line
//!   using the independent series' own distribution over a potentially
//!   longer period
//! - **Single and monthly equations**: one relationship for the whole
//!   analysis period, twelve per-calendar-month relationships, or both
//! - **Consistent transforms**: optional base-10 log transform with a
//!   configurable substitute for values ≤ 0, inverted consistently when
//!   estimates are mapped back to data space
//! - **Immutable results**: extraction, solving, error estimation, checks,
//!   and filling each produce a separate immutable container, connected
//!   only by scope indexing (single, months 1..=12)
//! - **Undefined, not erroneous**: a scope with too few paired points
//!   yields a record whose statistics are explicitly undefined, the
//!   expected outcome for short or highly seasonal records
//!
//! ## Quick Start
//!
//! ```rust
//! use hydro_regression::{
//!     AnalysisConfig, CheckCriteria, RegressionAnalysis, RegularSeries, ScopeSelection,
//! };
//!
//! fn main() -> Result<(), hydro_regression::RegressionAnalysisError> {
//!     // Twelve months of the independent record, and a dependent record
//!     // missing January and April.
//!     let x = RegularSeries::monthly(2000, 1, (1..=12).map(f64::from).collect())?;
//!     let mut observed: Vec<f64> = (1..=12).map(|t| 2.0 * f64::from(t)).collect();
//!     observed[0] = -999.0;
//!     observed[3] = -999.0;
//!     let y = RegularSeries::monthly(2000, 1, observed)?;
//!
//!     let analysis = RegressionAnalysis::new(&x, &y, AnalysisConfig::default())?;
//!     let outcome = analysis.analyze(&CheckCriteria::default())?;
//!
//!     let fit = outcome.results.single_equation().unwrap().statistics().unwrap();
//!     assert!((fit.slope - 2.0).abs() < 1e-9);
//!     assert_eq!(outcome.filled.filled_count(), 2);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! The crate is organized around the [`RegressionAnalysis`] driver, which
//! validates configuration, resolves analysis periods, and eagerly extracts
//! samples on construction; solving, error estimation, check evaluation,
//! and filling are explicit follow-on operations. The regression math
//! itself lives behind the [`RegressionPrimitive`] trait
//! ([`OlsPrimitive`] is the bundled implementation), and time-series
//! storage behind the [`TimeSeries`] trait ([`RegularSeries`] is the
//! bundled implementation).

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod analyzer;
pub mod checks;
pub mod config;
pub mod dataset;
pub mod errors;
pub mod estimate;
pub mod extract;
pub mod fill;
pub mod math_utils;
pub mod primitive;
pub mod results;
pub mod series;
pub mod solver;
pub mod transform;

pub use analyzer::{AnalysisOutcome, RegressionAnalysis};
pub use config::{
    AnalysisConfig, AnalysisMethod, CheckCriteria, DataTransform, EquationScope, ScopeSelection,
    DEFAULT_LE_ZERO_SUBSTITUTE, DEFAULT_MINIMUM_SAMPLE_SIZE,
};
pub use dataset::{RegressionDataSet, RegressionSamples};
pub use errors::{RegressionAnalysisError, RegressionResult};
pub use math_utils::SampleStats;
pub use primitive::{LineFit, OlsPrimitive, RegressionPrimitive};
pub use results::{
    CheckRecord, ErrorRecord, ErrorStatistics, FilledValue, RegressionCheckSet,
    RegressionErrorSet, RegressionFilledValues, RegressionResultSet, RelationshipRecord,
};
pub use series::{
    PeriodRange, RegularSeries, TimeSeries, TimeStep, TsObservation, DEFAULT_MISSING_SENTINEL,
};
