//! Time-series collaborator interface.
//!
//! The estimation engine never owns time-series storage; it works against the
//! [`TimeSeries`] trait, which exposes a period, a native time step, an
//! ordered iterator over a date range, and a missing-value convention.
//! [`RegularSeries`] is the bundled in-memory implementation for regularly
//! spaced daily or monthly data, using the conventional hydrologic missing
//! sentinel of `-999.0`.

use crate::errors::{validate_month, RegressionResult};
use crate::math_utils::float_ops;
use chrono::{Datelike, Days, Months, NaiveDate};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Missing-value sentinel used by [`RegularSeries`] unless overridden.
pub const DEFAULT_MISSING_SENTINEL: f64 = -999.0;

/// Tolerance used when comparing a value against the missing sentinel.
const MISSING_MATCH_EPSILON: f64 = 1e-6;

/// Inclusive date range over a time series.
///
/// A range whose start is after its end is empty and iterates no dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PeriodRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl PeriodRange {
    /// Creates a period from inclusive start and end dates.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// First date of the period.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last date of the period.
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Whether the period covers no dates.
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Whether a date lies inside the period.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Native sampling interval of a regular series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TimeStep {
    /// One value per day.
    Day,
    /// One value per calendar month, dated the first of the month.
    Month,
}

impl TimeStep {
    /// The date one step after `date`, if representable.
    pub fn advance(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeStep::Day => date.succ_opt(),
            TimeStep::Month => date.checked_add_months(Months::new(1)),
        }
    }

    /// The date `steps` steps after `date`, if representable.
    pub fn advance_by(&self, date: NaiveDate, steps: usize) -> Option<NaiveDate> {
        match self {
            TimeStep::Day => date.checked_add_days(Days::new(steps as u64)),
            TimeStep::Month => date.checked_add_months(Months::new(steps as u32)),
        }
    }

    /// The date one step before `date`, if representable.
    fn retreat(&self, date: NaiveDate) -> Option<NaiveDate> {
        match self {
            TimeStep::Day => date.pred_opt(),
            TimeStep::Month => date.checked_sub_months(Months::new(1)),
        }
    }

    /// Snaps an arbitrary date onto this step's grid (identity for daily,
    /// first of the month for monthly).
    fn align(&self, date: NaiveDate) -> NaiveDate {
        match self {
            TimeStep::Day => date,
            TimeStep::Month => {
                NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
            }
        }
    }
}

/// One dated observation from a time series.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TsObservation {
    /// Observation date.
    pub date: NaiveDate,
    /// Observed value; may be the series' missing sentinel.
    pub value: f64,
}

/// Date-indexed value storage for one variable.
///
/// Iteration visits dates in increasing order, inclusive of both endpoints,
/// at the series' native interval. Dates outside the series' own period
/// yield the missing sentinel.
pub trait TimeSeries {
    /// Full period of record.
    fn period(&self) -> PeriodRange;

    /// Native sampling interval.
    fn time_step(&self) -> TimeStep;

    /// The sentinel stored in place of a missing observation.
    fn missing_sentinel(&self) -> f64;

    /// Whether a value represents a missing observation.
    fn is_missing(&self, value: f64) -> bool {
        value.is_nan()
            || float_ops::approx_eq_eps(value, self.missing_sentinel(), MISSING_MATCH_EPSILON)
    }

    /// The value at a date, or `None` when the date lies outside the period
    /// of record.
    fn value_at(&self, date: NaiveDate) -> Option<f64>;

    /// Iterates the requested period at the native interval, in increasing
    /// date order, both endpoints inclusive.
    fn iter_period(&self, period: &PeriodRange) -> Box<dyn Iterator<Item = TsObservation> + '_>;
}

/// In-memory regularly spaced time series.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RegularSeries {
    start: NaiveDate,
    end: NaiveDate,
    step: TimeStep,
    values: Vec<f64>,
    missing: f64,
}

impl RegularSeries {
    /// Creates a series starting at `start` with one value per step.
    ///
    /// For a monthly step the start date is snapped to the first of its
    /// month. An empty value vector produces a series with an empty period.
    pub fn new(start: NaiveDate, step: TimeStep, values: Vec<f64>) -> Self {
        let start = step.align(start);
        let end = if values.is_empty() {
            step.retreat(start).unwrap_or(start)
        } else {
            step.advance_by(start, values.len() - 1).unwrap_or(start)
        };
        Self {
            start,
            end,
            step,
            values,
            missing: DEFAULT_MISSING_SENTINEL,
        }
    }

    /// Creates a monthly series starting at the given year and month.
    pub fn monthly(year: i32, month: u8, values: Vec<f64>) -> RegressionResult<Self> {
        validate_month(month)?;
        // Day 1 of a validated month always exists.
        let start = NaiveDate::from_ymd_opt(year, u32::from(month), 1)
            .unwrap_or(NaiveDate::MIN);
        Ok(Self::new(start, TimeStep::Month, values))
    }

    /// Creates a daily series starting at the given date.
    pub fn daily(start: NaiveDate, values: Vec<f64>) -> Self {
        Self::new(start, TimeStep::Day, values)
    }

    /// Overrides the missing-value sentinel.
    pub fn with_missing_sentinel(mut self, missing: f64) -> Self {
        self.missing = missing;
        self
    }

    /// Number of stored observations (missing ones included).
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether the series stores no observations.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let date = self.step.align(date);
        let offset = match self.step {
            TimeStep::Day => date.signed_duration_since(self.start).num_days(),
            TimeStep::Month => {
                let months = |d: NaiveDate| i64::from(d.year()) * 12 + i64::from(d.month0());
                months(date) - months(self.start)
            }
        };
        if offset < 0 {
            return None;
        }
        let index = usize::try_from(offset).ok()?;
        (index < self.values.len()).then_some(index)
    }
}

impl TimeSeries for RegularSeries {
    fn period(&self) -> PeriodRange {
        PeriodRange::new(self.start, self.end)
    }

    fn time_step(&self) -> TimeStep {
        self.step
    }

    fn missing_sentinel(&self) -> f64 {
        self.missing
    }

    fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.index_of(date).map(|i| self.values[i])
    }

    fn iter_period(&self, period: &PeriodRange) -> Box<dyn Iterator<Item = TsObservation> + '_> {
        let step = self.step;
        let end = period.end();
        let first = step.align(period.start());
        let dates = std::iter::successors(Some(first), move |d| step.advance(*d))
            .take_while(move |d| *d <= end);
        Box::new(dates.map(move |date| TsObservation {
            date,
            value: self.value_at(date).unwrap_or(self.missing),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn monthly_series_period_and_lookup() {
        let ts = RegularSeries::monthly(2000, 1, vec![1.0, 2.0, 3.0]).unwrap();
        assert_eq!(ts.period().start(), date(2000, 1, 1));
        assert_eq!(ts.period().end(), date(2000, 3, 1));
        assert_eq!(ts.value_at(date(2000, 2, 1)), Some(2.0));
        // Any day inside the month resolves to the month's value.
        assert_eq!(ts.value_at(date(2000, 2, 15)), Some(2.0));
        assert_eq!(ts.value_at(date(2000, 4, 1)), None);
        assert_eq!(ts.value_at(date(1999, 12, 1)), None);
    }

    #[test]
    fn monthly_series_rejects_bad_month() {
        assert!(RegularSeries::monthly(2000, 13, vec![1.0]).is_err());
    }

    #[test]
    fn daily_series_lookup() {
        let ts = RegularSeries::daily(date(2000, 1, 30), vec![1.0, 2.0, 3.0]);
        assert_eq!(ts.period().end(), date(2000, 2, 1));
        assert_eq!(ts.value_at(date(2000, 1, 31)), Some(2.0));
        assert_eq!(ts.value_at(date(2000, 2, 2)), None);
    }

    #[test]
    fn iteration_is_inclusive_and_ordered() {
        let ts = RegularSeries::monthly(2000, 1, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let period = PeriodRange::new(date(2000, 2, 1), date(2000, 4, 1));
        let observed: Vec<_> = ts.iter_period(&period).collect();
        assert_eq!(observed.len(), 3);
        assert_eq!(observed[0].date, date(2000, 2, 1));
        assert_eq!(observed[2].date, date(2000, 4, 1));
        assert_eq!(observed[1].value, 3.0);
    }

    #[test]
    fn iteration_past_record_yields_missing() {
        let ts = RegularSeries::monthly(2000, 1, vec![1.0]).unwrap();
        let period = PeriodRange::new(date(2000, 1, 1), date(2000, 2, 1));
        let observed: Vec<_> = ts.iter_period(&period).collect();
        assert_eq!(observed.len(), 2);
        assert!(ts.is_missing(observed[1].value));
    }

    #[test]
    fn empty_series_iterates_nothing_over_its_own_period() {
        let ts = RegularSeries::monthly(2000, 1, Vec::new()).unwrap();
        let period = ts.period();
        assert!(period.is_empty());
        assert_eq!(ts.iter_period(&period).count(), 0);
    }

    #[test]
    fn empty_period_iterates_nothing() {
        let ts = RegularSeries::monthly(2000, 1, vec![1.0, 2.0]).unwrap();
        let period = PeriodRange::new(date(2000, 2, 1), date(2000, 1, 1));
        assert_eq!(ts.iter_period(&period).count(), 0);
    }

    #[test]
    fn missing_sentinel_detection() {
        let ts = RegularSeries::monthly(2000, 1, vec![1.0, DEFAULT_MISSING_SENTINEL]).unwrap();
        assert!(!ts.is_missing(1.0));
        assert!(ts.is_missing(DEFAULT_MISSING_SENTINEL));
        assert!(ts.is_missing(f64::NAN));

        let custom = RegularSeries::monthly(2000, 1, vec![1.0]).unwrap().with_missing_sentinel(-1.0);
        assert!(custom.is_missing(-1.0));
        assert!(!custom.is_missing(DEFAULT_MISSING_SENTINEL));
    }
}
