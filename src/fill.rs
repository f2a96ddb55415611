//! Gap filling.
//!
//! Applies the fitted relationships to estimate missing dependent values
//! from the independent series. The governing relationship for a date is
//! the month's equation when the monthly scope was fitted, otherwise the
//! single equation; the estimate is computed in transformed space and
//! inverted back to data space by the relationship record itself.

use crate::results::{FilledValue, RegressionFilledValues, RegressionResultSet, RelationshipRecord};
use crate::series::{PeriodRange, TimeSeries};
use chrono::Datelike;

fn governing<'a>(
    results: &'a RegressionResultSet,
    month: u8,
) -> Option<&'a RelationshipRecord> {
    results
        .monthly_equation(month)
        .or_else(|| results.single_equation())
}

/// Fills missing dependent values over `period` from the independent
/// series and the fitted relationships.
///
/// A missing value is left in place, and counted, when its month is
/// excluded by the filter, the governing relationship is undefined, or the
/// independent value is itself missing.
pub fn fill_missing(
    x: &dyn TimeSeries,
    y: &dyn TimeSeries,
    results: &RegressionResultSet,
    period: &PeriodRange,
    months: &[u8],
) -> RegressionFilledValues {
    let mut dates = Vec::new();
    let mut values = Vec::new();
    let mut fills = Vec::new();
    let mut skipped_missing_independent = 0;
    let mut skipped_undefined = 0;
    let mut skipped_filtered = 0;

    for observation in y.iter_period(period) {
        dates.push(observation.date);

        if !y.is_missing(observation.value) {
            values.push(observation.value);
            continue;
        }

        let month = observation.date.month() as u8;
        if !(months.is_empty() || months.contains(&month)) {
            skipped_filtered += 1;
            values.push(observation.value);
            continue;
        }

        let record = match governing(results, month) {
            Some(record) if record.is_defined() => record,
            _ => {
                skipped_undefined += 1;
                values.push(observation.value);
                continue;
            }
        };

        let x_value = match x.value_at(observation.date) {
            Some(v) if !x.is_missing(v) => v,
            _ => {
                skipped_missing_independent += 1;
                values.push(observation.value);
                continue;
            }
        };

        match record.estimate(x_value) {
            Some(estimate) => {
                values.push(estimate);
                fills.push(FilledValue {
                    date: observation.date,
                    value: estimate,
                    scope: record.scope(),
                });
            }
            None => {
                skipped_undefined += 1;
                values.push(observation.value);
            }
        }
    }

    log::debug!(
        "filled {} of {} values ({} skipped: {} filtered, {} undefined, {} missing independent)",
        fills.len(),
        dates.len(),
        skipped_filtered + skipped_undefined + skipped_missing_independent,
        skipped_filtered,
        skipped_undefined,
        skipped_missing_independent
    );

    RegressionFilledValues::new(
        dates,
        values,
        fills,
        skipped_missing_independent,
        skipped_undefined,
        skipped_filtered,
    )
}
