//! Sample extraction.
//!
//! Builds the paired (`x1`/`y1`) and independent (`x2`) numeric arrays from
//! the two time series for each selected scope. Extraction is a pure
//! function of its inputs and never fails: an empty period, a month filter
//! with no matching dates, or an all-missing range all yield empty arrays.

use crate::config::ScopeSelection;
use crate::dataset::{RegressionDataSet, RegressionSamples};
use crate::series::{PeriodRange, TimeSeries};
use chrono::Datelike;

fn month_selected(filter: &[u8], month: u8) -> bool {
    filter.is_empty() || filter.contains(&month)
}

/// Extracts the paired sample: values of `x` and `y` at the same
/// timestamps, restricted to `period` and the month filter, where neither
/// value is missing. Iteration follows the dependent series' native
/// timestep. The returned arrays have equal length and preserve timestamp
/// order.
pub fn extract_paired(
    x: &dyn TimeSeries,
    y: &dyn TimeSeries,
    period: &PeriodRange,
    months: &[u8],
) -> (Vec<f64>, Vec<f64>) {
    let mut x1 = Vec::new();
    let mut y1 = Vec::new();
    for observation in y.iter_period(period) {
        let month = observation.date.month() as u8;
        if !month_selected(months, month) {
            continue;
        }
        if y.is_missing(observation.value) {
            continue;
        }
        let x_value = match x.value_at(observation.date) {
            Some(v) if !x.is_missing(v) => v,
            _ => continue,
        };
        x1.push(x_value);
        y1.push(observation.value);
    }
    (x1, y1)
}

/// Extracts the independent sample: values of `x` over `period` and the
/// month filter where `x` alone is non-missing, with no reference to the
/// dependent series.
pub fn extract_independent(x: &dyn TimeSeries, period: &PeriodRange, months: &[u8]) -> Vec<f64> {
    let mut x2 = Vec::new();
    for observation in x.iter_period(period) {
        let month = observation.date.month() as u8;
        if !month_selected(months, month) {
            continue;
        }
        if !x.is_missing(observation.value) {
            x2.push(observation.value);
        }
    }
    x2
}

fn extract_scope(
    x: &dyn TimeSeries,
    y: &dyn TimeSeries,
    dependent_period: &PeriodRange,
    independent_period: &PeriodRange,
    months: &[u8],
) -> RegressionSamples {
    let (x1, y1) = extract_paired(x, y, dependent_period, months);
    let x2 = extract_independent(x, independent_period, months);
    RegressionSamples::new(x1, y1, x2)
}

/// Builds the full data set for the selected scopes.
///
/// The single equation uses the whole month filter; the equation for month
/// `m` uses the filter narrowed to `{m}`, which leaves every array for a
/// filtered-out month empty.
pub fn build_dataset(
    x: &dyn TimeSeries,
    y: &dyn TimeSeries,
    scopes: ScopeSelection,
    dependent_period: &PeriodRange,
    independent_period: &PeriodRange,
    months: &[u8],
) -> RegressionDataSet {
    let single = scopes
        .single
        .then(|| extract_scope(x, y, dependent_period, independent_period, months));

    let monthly = scopes.monthly.then(|| {
        std::array::from_fn(|index| {
            let month = index as u8 + 1;
            if month_selected(months, month) {
                extract_scope(x, y, dependent_period, independent_period, &[month])
            } else {
                RegressionSamples::empty()
            }
        })
    });

    RegressionDataSet::new(
        single,
        monthly,
        *dependent_period,
        *independent_period,
        months.to_vec(),
    )
}
