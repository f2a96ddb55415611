//! Validity checks.
//!
//! Evaluates pass/fail criteria against each fitted relationship: minimum
//! paired-sample size, minimum correlation, and slope significance at a
//! requested confidence level. A criterion left unset always passes; a set
//! criterion fails when the relationship is undefined, since an undefined
//! statistic cannot demonstrate anything.

use crate::config::CheckCriteria;
use crate::errors::RegressionResult;
use crate::primitive::RegressionPrimitive;
use crate::results::{month_array, CheckRecord, RegressionCheckSet, RegressionResultSet, RelationshipRecord};

/// Evaluates the criteria against one relationship.
pub fn evaluate_record(
    record: &RelationshipRecord,
    criteria: &CheckCriteria,
    primitive: &dyn RegressionPrimitive,
) -> RegressionResult<CheckRecord> {
    let n1 = record.n1();
    let sample_size_ok = n1 >= criteria.minimum_sample_size;

    let correlation_ok = match criteria.minimum_correlation {
        None => true,
        Some(minimum) => record
            .statistics()
            .map(|fit| fit.correlation >= minimum)
            .unwrap_or(false),
    };

    let confidence_ok = match criteria.confidence_level {
        None => true,
        Some(level) => match record.statistics() {
            Some(fit) => primitive.slope_significant(fit, level)?,
            None => false,
        },
    };

    Ok(CheckRecord::new(
        record.scope(),
        n1,
        sample_size_ok,
        correlation_ok,
        confidence_ok,
    ))
}

/// Evaluates the criteria against every relationship in the result set.
pub fn evaluate_checks(
    results: &RegressionResultSet,
    criteria: &CheckCriteria,
    primitive: &dyn RegressionPrimitive,
) -> RegressionResult<RegressionCheckSet> {
    criteria.validate()?;

    let single = match results.single_equation() {
        Some(record) => Some(evaluate_record(record, criteria, primitive)?),
        None => None,
    };

    let monthly = match results.monthly_records() {
        Some(monthly_records) => {
            let mut records = Vec::with_capacity(12);
            for record in monthly_records {
                records.push(evaluate_record(record, criteria, primitive)?);
            }
            Some(month_array(records)?)
        }
        None => None,
    };

    Ok(RegressionCheckSet::new(single, monthly))
}
