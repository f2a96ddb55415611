//! # Regression Analysis Driver
//!
//! [`RegressionAnalysis`] is the entry point of the engine. It is
//! constructed from two time series and a configuration, validates the
//! configuration, resolves the analysis periods for the chosen fitting
//! method, and eagerly extracts the sample arrays. The subsequent stages —
//! solving, error estimation, check evaluation, and gap filling — are
//! explicit operations the caller invokes in sequence, or all at once via
//! [`RegressionAnalysis::analyze`].
//!
//! The driver is the only mutable object in the engine and is not reused:
//! a new analysis (say, with a different month filter) means a new driver
//! and new result containers. Every produced container is immutable and
//! safe to share read-only across threads.
//!
//! ## Usage
//!
//! ```rust
//! use hydro_regression::{AnalysisConfig, CheckCriteria, RegressionAnalysis, RegularSeries};
//!
//! # fn main() -> Result<(), hydro_regression::RegressionAnalysisError> {
//! let x = RegularSeries::monthly(2000, 1, (1..=12).map(f64::from).collect())?;
//! let y = RegularSeries::monthly(2000, 1, (1..=12).map(|t| 3.0 * f64::from(t)).collect())?;
//!
//! let analysis = RegressionAnalysis::new(&x, &y, AnalysisConfig::default())?;
//! let results = analysis.solve()?;
//! let fit = results.single_equation().unwrap().statistics().unwrap();
//! assert!((fit.slope - 3.0).abs() < 1e-9);
//!
//! let errors = analysis.estimate_errors(&results);
//! let checks = analysis.evaluate_checks(&results, &CheckCriteria::default())?;
//! assert!(checks.all_passed());
//! # Ok(())
//! # }
//! ```

use crate::checks::evaluate_checks;
use crate::config::{AnalysisConfig, AnalysisMethod, CheckCriteria};
use crate::dataset::RegressionDataSet;
use crate::errors::{RegressionAnalysisError, RegressionResult};
use crate::estimate::estimate_errors;
use crate::extract::build_dataset;
use crate::fill::fill_missing;
use crate::primitive::{OlsPrimitive, RegressionPrimitive};
use crate::results::{
    RegressionCheckSet, RegressionErrorSet, RegressionFilledValues, RegressionResultSet,
};
use crate::series::{PeriodRange, TimeSeries};
use crate::solver::solve_dataset;

/// The four derived containers produced by a composed analysis.
///
/// The extracted data set itself stays with the driver
/// ([`RegressionAnalysis::dataset`]).
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    /// Fitted relationships per scope.
    pub results: RegressionResultSet,
    /// Estimation-error statistics per scope.
    pub errors: RegressionErrorSet,
    /// Pass/fail checks per scope.
    pub checks: RegressionCheckSet,
    /// The dependent series with estimable missing values filled.
    pub filled: RegressionFilledValues,
}

/// Driver for one regression analysis between an independent series X and a
/// dependent series Y.
pub struct RegressionAnalysis<'a> {
    independent: &'a dyn TimeSeries,
    dependent: &'a dyn TimeSeries,
    config: AnalysisConfig,
    dependent_period: PeriodRange,
    independent_period: PeriodRange,
    dataset: RegressionDataSet,
    primitive: Box<dyn RegressionPrimitive + 'a>,
}

impl<'a> RegressionAnalysis<'a> {
    /// Creates a driver with the bundled least-squares primitive.
    ///
    /// Validates the configuration, resolves the analysis periods for the
    /// chosen method, and eagerly extracts the sample arrays. Extraction
    /// itself never fails: series with no usable points produce empty
    /// arrays.
    pub fn new(
        independent: &'a dyn TimeSeries,
        dependent: &'a dyn TimeSeries,
        config: AnalysisConfig,
    ) -> RegressionResult<Self> {
        Self::with_primitive(independent, dependent, config, Box::new(OlsPrimitive))
    }

    /// Creates a driver with a caller-supplied regression primitive.
    pub fn with_primitive(
        independent: &'a dyn TimeSeries,
        dependent: &'a dyn TimeSeries,
        config: AnalysisConfig,
        primitive: Box<dyn RegressionPrimitive + 'a>,
    ) -> RegressionResult<Self> {
        config.validate()?;

        let dependent_period = config
            .dependent_period
            .unwrap_or_else(|| dependent.period());
        let independent_period = match config.method {
            AnalysisMethod::OrdinaryLeastSquares => {
                // OLS pairs X and Y point for point: the two periods must
                // coincide, so an explicit independent period may only
                // restate the dependent one.
                if let Some(period) = config.independent_period {
                    if period != dependent_period {
                        return Err(RegressionAnalysisError::PeriodMismatch);
                    }
                }
                dependent_period
            }
            AnalysisMethod::Move2 => config
                .independent_period
                .unwrap_or_else(|| independent.period()),
        };

        log::debug!(
            "extracting samples: dependent {} .. {}, independent {} .. {}",
            dependent_period.start(),
            dependent_period.end(),
            independent_period.start(),
            independent_period.end()
        );
        let dataset = build_dataset(
            independent,
            dependent,
            config.scopes,
            &dependent_period,
            &independent_period,
            &config.analysis_months,
        );

        Ok(Self {
            independent,
            dependent,
            config,
            dependent_period,
            independent_period,
            dataset,
            primitive,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// The resolved analysis period over the dependent series.
    pub fn dependent_period(&self) -> PeriodRange {
        self.dependent_period
    }

    /// The resolved analysis period over the independent series.
    pub fn independent_period(&self) -> PeriodRange {
        self.independent_period
    }

    /// The eagerly extracted sample arrays.
    pub fn dataset(&self) -> &RegressionDataSet {
        &self.dataset
    }

    /// Fits a relationship for every selected scope.
    pub fn solve(&self) -> RegressionResult<RegressionResultSet> {
        log::debug!("solving relationships ({:?})", self.config.method);
        solve_dataset(&self.dataset, &self.config, self.primitive.as_ref())
    }

    /// Computes residual error statistics for every fitted relationship.
    pub fn estimate_errors(&self, results: &RegressionResultSet) -> RegressionErrorSet {
        log::debug!("estimating errors");
        estimate_errors(&self.dataset, results)
    }

    /// Evaluates pass/fail criteria against every fitted relationship.
    pub fn evaluate_checks(
        &self,
        results: &RegressionResultSet,
        criteria: &CheckCriteria,
    ) -> RegressionResult<RegressionCheckSet> {
        log::debug!("evaluating checks");
        evaluate_checks(results, criteria, self.primitive.as_ref())
    }

    /// Fills missing dependent values over the dependent analysis period.
    pub fn fill_missing(&self, results: &RegressionResultSet) -> RegressionFilledValues {
        log::debug!("filling missing dependent values");
        fill_missing(
            self.independent,
            self.dependent,
            results,
            &self.dependent_period,
            &self.config.analysis_months,
        )
    }

    /// Runs the full pipeline: solve, estimate errors, evaluate checks,
    /// fill.
    pub fn analyze(&self, criteria: &CheckCriteria) -> RegressionResult<AnalysisOutcome> {
        let results = self.solve()?;
        let errors = self.estimate_errors(&results);
        let checks = self.evaluate_checks(&results, criteria)?;
        let filled = self.fill_missing(&results);
        Ok(AnalysisOutcome {
            results,
            errors,
            checks,
            filled,
        })
    }
}
