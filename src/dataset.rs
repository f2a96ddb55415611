//! Immutable sample containers produced by extraction.

use crate::series::PeriodRange;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The extracted numeric arrays for one equation scope.
///
/// `x1`/`y1` form the paired sample: values of the independent and dependent
/// series at the same timestamps, where neither is missing. `x2` is the
/// independent sample over its own analysis period, not filtered against the
/// dependent series' missingness; only MOVE.2 consumes it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionSamples {
    x1: Vec<f64>,
    y1: Vec<f64>,
    x2: Vec<f64>,
}

impl RegressionSamples {
    pub(crate) fn new(x1: Vec<f64>, y1: Vec<f64>, x2: Vec<f64>) -> Self {
        debug_assert_eq!(x1.len(), y1.len());
        Self { x1, y1, x2 }
    }

    pub(crate) fn empty() -> Self {
        Self {
            x1: Vec::new(),
            y1: Vec::new(),
            x2: Vec::new(),
        }
    }

    /// Paired independent values.
    pub fn x1(&self) -> &[f64] {
        &self.x1
    }

    /// Paired dependent values; always the same length as [`x1`](Self::x1).
    pub fn y1(&self) -> &[f64] {
        &self.y1
    }

    /// Independent sample over its own analysis period.
    pub fn x2(&self) -> &[f64] {
        &self.x2
    }

    /// Size of the paired sample.
    pub fn n1(&self) -> usize {
        self.x1.len()
    }

    /// Size of the independent sample.
    pub fn n2(&self) -> usize {
        self.x2.len()
    }
}

/// Immutable container of extracted samples for every selected scope.
///
/// The single-equation and monthly groups are present exactly when the
/// corresponding scope was selected; a present monthly group always has
/// twelve entries, with months excluded by the filter holding empty arrays.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegressionDataSet {
    single: Option<RegressionSamples>,
    monthly: Option<[RegressionSamples; 12]>,
    dependent_period: PeriodRange,
    independent_period: PeriodRange,
    analysis_months: Vec<u8>,
}

impl RegressionDataSet {
    pub(crate) fn new(
        single: Option<RegressionSamples>,
        monthly: Option<[RegressionSamples; 12]>,
        dependent_period: PeriodRange,
        independent_period: PeriodRange,
        analysis_months: Vec<u8>,
    ) -> Self {
        Self {
            single,
            monthly,
            dependent_period,
            independent_period,
            analysis_months,
        }
    }

    /// Samples for the single equation, when that scope was selected.
    pub fn single_equation_samples(&self) -> Option<&RegressionSamples> {
        self.single.as_ref()
    }

    /// Samples for one monthly equation, when the monthly scope was
    /// selected.
    ///
    /// # Panics
    /// Panics if `month` is outside 1..=12; month indices are validated at
    /// configuration time, so an out-of-range index here is a programming
    /// error.
    pub fn monthly_equation_samples(&self, month: u8) -> Option<&RegressionSamples> {
        assert!((1..=12).contains(&month), "month {} out of range", month);
        self.monthly.as_ref().map(|m| &m[usize::from(month) - 1])
    }

    pub(crate) fn monthly_samples(&self) -> Option<&[RegressionSamples; 12]> {
        self.monthly.as_ref()
    }

    /// The resolved analysis period over the dependent series.
    pub fn dependent_period(&self) -> PeriodRange {
        self.dependent_period
    }

    /// The resolved analysis period over the independent series.
    pub fn independent_period(&self) -> PeriodRange {
        self.independent_period
    }

    /// The month filter the samples were extracted under; empty means all
    /// months.
    pub fn analysis_months(&self) -> &[u8] {
        &self.analysis_months
    }
}
