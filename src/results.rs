//! Result structures for regression analysis.
//!
//! Four immutable containers mirror the single/monthly scope structure of
//! the data set: fitted relationships, estimation errors, validity checks,
//! and filled values. Each is produced once and never updated; a scope with
//! too few paired points carries a record whose statistics are `None`
//! ("undefined") rather than raising an error.

use crate::config::{DataTransform, EquationScope};
use crate::errors::{RegressionAnalysisError, RegressionResult};
use crate::primitive::LineFit;
use chrono::NaiveDate;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Converts a 12-element vector into a month-indexed array.
///
/// Callers construct exactly twelve entries; a different count indicates an
/// internal bookkeeping fault and is reported rather than unwrapped.
pub(crate) fn month_array<T>(records: Vec<T>) -> RegressionResult<[T; 12]> {
    let count = records.len();
    records
        .try_into()
        .map_err(|_| RegressionAnalysisError::NumericalError {
            reason: format!("monthly scope produced {} records instead of 12", count),
        })
}

/// One fitted relationship for one scope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RelationshipRecord {
    scope: EquationScope,
    n1: usize,
    n2: usize,
    transform: DataTransform,
    le_zero_substitute: f64,
    statistics: Option<LineFit>,
}

impl RelationshipRecord {
    pub(crate) fn defined(
        scope: EquationScope,
        n1: usize,
        n2: usize,
        transform: DataTransform,
        le_zero_substitute: f64,
        statistics: LineFit,
    ) -> Self {
        Self {
            scope,
            n1,
            n2,
            transform,
            le_zero_substitute,
            statistics: Some(statistics),
        }
    }

    pub(crate) fn undefined(
        scope: EquationScope,
        n1: usize,
        n2: usize,
        transform: DataTransform,
        le_zero_substitute: f64,
    ) -> Self {
        Self {
            scope,
            n1,
            n2,
            transform,
            le_zero_substitute,
            statistics: None,
        }
    }

    /// The scope this relationship was fitted for.
    pub fn scope(&self) -> EquationScope {
        self.scope
    }

    /// Paired-sample size the fit was (or would have been) based on.
    pub fn n1(&self) -> usize {
        self.n1
    }

    /// Independent-sample size available to MOVE.2.
    pub fn n2(&self) -> usize {
        self.n2
    }

    /// The transform the relationship was fitted under.
    pub fn transform(&self) -> DataTransform {
        self.transform
    }

    /// The ≤0 substitute the relationship was fitted under.
    pub fn le_zero_substitute(&self) -> f64 {
        self.le_zero_substitute
    }

    /// Fitted coefficients and fit statistics; `None` when the paired
    /// sample was too small to fit (fewer than 2 points).
    pub fn statistics(&self) -> Option<&LineFit> {
        self.statistics.as_ref()
    }

    /// Whether the relationship carries defined statistics.
    pub fn is_defined(&self) -> bool {
        self.statistics.is_some()
    }

    /// Estimates the dependent value for a raw independent value: applies
    /// the transform, evaluates the fitted line, and inverts the transform.
    /// `None` when the relationship is undefined.
    pub fn estimate(&self, x: f64) -> Option<f64> {
        let fit = self.statistics.as_ref()?;
        let transformed = self.transform.apply(x, self.le_zero_substitute);
        Some(self.transform.invert(fit.predict(transformed)))
    }
}

/// Residual summary statistics for one defined relationship.
///
/// Computed in transformed space when a transform was configured.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorStatistics {
    /// Standard error of estimate, `sqrt(SSE / (n − 2))`; 0.0 for a
    /// two-point fit, which has no residual degrees of freedom.
    pub standard_error_of_estimate: f64,
    /// Mean residual.
    pub mean_bias: f64,
    /// Mean absolute residual.
    pub mean_absolute_error: f64,
}

/// Estimation-error record for one scope.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ErrorRecord {
    scope: EquationScope,
    n: usize,
    statistics: Option<ErrorStatistics>,
}

impl ErrorRecord {
    pub(crate) fn new(scope: EquationScope, n: usize, statistics: Option<ErrorStatistics>) -> Self {
        Self {
            scope,
            n,
            statistics,
        }
    }

    /// The scope the errors were computed for.
    pub fn scope(&self) -> EquationScope {
        self.scope
    }

    /// Paired-sample size the residuals were computed over.
    pub fn n(&self) -> usize {
        self.n
    }

    /// Residual statistics; `None` when the relationship was undefined.
    pub fn statistics(&self) -> Option<&ErrorStatistics> {
        self.statistics.as_ref()
    }

    /// Whether the record carries defined statistics.
    pub fn is_defined(&self) -> bool {
        self.statistics.is_some()
    }
}

/// Pass/fail evaluation for one scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckRecord {
    scope: EquationScope,
    n1: usize,
    sample_size_ok: bool,
    correlation_ok: bool,
    confidence_ok: bool,
}

impl CheckRecord {
    pub(crate) fn new(
        scope: EquationScope,
        n1: usize,
        sample_size_ok: bool,
        correlation_ok: bool,
        confidence_ok: bool,
    ) -> Self {
        Self {
            scope,
            n1,
            sample_size_ok,
            correlation_ok,
            confidence_ok,
        }
    }

    /// The scope the checks were evaluated for.
    pub fn scope(&self) -> EquationScope {
        self.scope
    }

    /// Paired-sample size the checks were evaluated against.
    pub fn n1(&self) -> usize {
        self.n1
    }

    /// Whether the paired sample meets the minimum size.
    pub fn sample_size_ok(&self) -> bool {
        self.sample_size_ok
    }

    /// Whether the correlation criterion passed (or was unset).
    pub fn correlation_ok(&self) -> bool {
        self.correlation_ok
    }

    /// Whether the slope significance criterion passed (or was unset).
    pub fn confidence_ok(&self) -> bool {
        self.confidence_ok
    }

    /// Overall pass: the AND of the three criteria.
    pub fn passed(&self) -> bool {
        self.sample_size_ok && self.correlation_ok && self.confidence_ok
    }
}

/// Immutable container of fitted relationships, single + monthly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionResultSet {
    single: Option<RelationshipRecord>,
    monthly: Option<[RelationshipRecord; 12]>,
}

impl RegressionResultSet {
    pub(crate) fn new(
        single: Option<RelationshipRecord>,
        monthly: Option<[RelationshipRecord; 12]>,
    ) -> Self {
        Self { single, monthly }
    }

    /// The single-equation relationship, when that scope was selected.
    pub fn single_equation(&self) -> Option<&RelationshipRecord> {
        self.single.as_ref()
    }

    /// The relationship for one month, when the monthly scope was selected.
    ///
    /// # Panics
    /// Panics if `month` is outside 1..=12 (a programming error; see
    /// [`crate::dataset::RegressionDataSet::monthly_equation_samples`]).
    pub fn monthly_equation(&self, month: u8) -> Option<&RelationshipRecord> {
        assert!((1..=12).contains(&month), "month {} out of range", month);
        self.monthly.as_ref().map(|m| &m[usize::from(month) - 1])
    }

    /// Iterates every present record, the single equation first.
    pub fn iter(&self) -> impl Iterator<Item = &RelationshipRecord> {
        self.single
            .iter()
            .chain(self.monthly.iter().flat_map(|m| m.iter()))
    }

    pub(crate) fn monthly_records(&self) -> Option<&[RelationshipRecord; 12]> {
        self.monthly.as_ref()
    }
}

/// Immutable container of estimation errors, single + monthly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionErrorSet {
    single: Option<ErrorRecord>,
    monthly: Option<[ErrorRecord; 12]>,
}

impl RegressionErrorSet {
    pub(crate) fn new(single: Option<ErrorRecord>, monthly: Option<[ErrorRecord; 12]>) -> Self {
        Self { single, monthly }
    }

    /// The single-equation error record, when that scope was selected.
    pub fn single_equation(&self) -> Option<&ErrorRecord> {
        self.single.as_ref()
    }

    /// The error record for one month, when the monthly scope was selected.
    ///
    /// # Panics
    /// Panics if `month` is outside 1..=12.
    pub fn monthly_equation(&self, month: u8) -> Option<&ErrorRecord> {
        assert!((1..=12).contains(&month), "month {} out of range", month);
        self.monthly.as_ref().map(|m| &m[usize::from(month) - 1])
    }

    /// Iterates every present record, the single equation first.
    pub fn iter(&self) -> impl Iterator<Item = &ErrorRecord> {
        self.single
            .iter()
            .chain(self.monthly.iter().flat_map(|m| m.iter()))
    }
}

/// Immutable container of check results, single + monthly.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionCheckSet {
    single: Option<CheckRecord>,
    monthly: Option<[CheckRecord; 12]>,
}

impl RegressionCheckSet {
    pub(crate) fn new(single: Option<CheckRecord>, monthly: Option<[CheckRecord; 12]>) -> Self {
        Self { single, monthly }
    }

    /// The single-equation check record, when that scope was selected.
    pub fn single_equation(&self) -> Option<&CheckRecord> {
        self.single.as_ref()
    }

    /// The check record for one month, when the monthly scope was selected.
    ///
    /// # Panics
    /// Panics if `month` is outside 1..=12.
    pub fn monthly_equation(&self, month: u8) -> Option<&CheckRecord> {
        assert!((1..=12).contains(&month), "month {} out of range", month);
        self.monthly.as_ref().map(|m| &m[usize::from(month) - 1])
    }

    /// Iterates every present record, the single equation first.
    pub fn iter(&self) -> impl Iterator<Item = &CheckRecord> {
        self.single
            .iter()
            .chain(self.monthly.iter().flat_map(|m| m.iter()))
    }

    /// Whether every present record passed.
    pub fn all_passed(&self) -> bool {
        self.iter().all(CheckRecord::passed)
    }
}

/// One estimated value produced by filling.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FilledValue {
    /// Date of the filled observation.
    pub date: NaiveDate,
    /// The estimate substituted for the missing dependent value.
    pub value: f64,
    /// The scope whose relationship produced the estimate.
    pub scope: EquationScope,
}

/// The dependent series over the fill period with estimable missing values
/// replaced, plus bookkeeping about what was and was not filled.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionFilledValues {
    dates: Vec<NaiveDate>,
    values: Vec<f64>,
    fills: Vec<FilledValue>,
    skipped_missing_independent: usize,
    skipped_undefined_relationship: usize,
    skipped_filtered: usize,
}

impl RegressionFilledValues {
    pub(crate) fn new(
        dates: Vec<NaiveDate>,
        values: Vec<f64>,
        fills: Vec<FilledValue>,
        skipped_missing_independent: usize,
        skipped_undefined_relationship: usize,
        skipped_filtered: usize,
    ) -> Self {
        Self {
            dates,
            values,
            fills,
            skipped_missing_independent,
            skipped_undefined_relationship,
            skipped_filtered,
        }
    }

    /// Dates over the fill period, in order.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Values over the fill period: observed where present, estimated where
    /// filled, the missing sentinel where neither.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Every filled point, in date order.
    pub fn fills(&self) -> &[FilledValue] {
        &self.fills
    }

    /// Number of missing values that were filled.
    pub fn filled_count(&self) -> usize {
        self.fills.len()
    }

    /// Missing values left unfilled because the independent value was also
    /// missing.
    pub fn skipped_missing_independent(&self) -> usize {
        self.skipped_missing_independent
    }

    /// Missing values left unfilled because the governing relationship was
    /// undefined.
    pub fn skipped_undefined_relationship(&self) -> usize {
        self.skipped_undefined_relationship
    }

    /// Missing values left unfilled because their month is excluded by the
    /// analysis month filter.
    pub fn skipped_filtered(&self) -> usize {
        self.skipped_filtered
    }
}
