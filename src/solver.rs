//! Relationship solving.
//!
//! For each populated scope the solver transforms the extracted arrays,
//! calls the regression primitive, and applies the MOVE.2 adjustment when
//! configured. A scope with fewer than two paired points yields an
//! undefined record; a primitive failure propagates as a computation error
//! naming the scope.

use crate::config::{AnalysisConfig, AnalysisMethod, EquationScope};
use crate::dataset::{RegressionDataSet, RegressionSamples};
use crate::errors::{RegressionAnalysisError, RegressionResult};
use crate::math_utils::SampleStats;
use crate::primitive::RegressionPrimitive;
use crate::results::{month_array, RegressionResultSet, RelationshipRecord};

fn computation_error(scope: EquationScope, source: RegressionAnalysisError) -> RegressionAnalysisError {
    RegressionAnalysisError::ComputationFailed {
        scope,
        reason: source.to_string(),
    }
}

/// Solves one scope's samples into a relationship record.
pub fn solve_samples(
    samples: &RegressionSamples,
    scope: EquationScope,
    config: &AnalysisConfig,
    primitive: &dyn RegressionPrimitive,
) -> RegressionResult<RelationshipRecord> {
    let n1 = samples.n1();
    let n2 = samples.n2();

    if n1 < 2 {
        return Ok(RelationshipRecord::undefined(
            scope,
            n1,
            n2,
            config.transform,
            config.le_zero_substitute,
        ));
    }

    let substitute = config.le_zero_substitute;
    let x1 = config.transform.apply_slice(samples.x1(), substitute);
    let y1 = config.transform.apply_slice(samples.y1(), substitute);

    let force_zero = config.forced_intercept.is_some();
    let mut fit = primitive
        .fit(&x1, &y1, force_zero)
        .map_err(|e| computation_error(scope, e))?;

    if config.method == AnalysisMethod::Move2 {
        if n2 >= 2 {
            let x2 = config.transform.apply_slice(samples.x2(), substitute);
            let stats = SampleStats::from_slice(&x2);
            fit = primitive
                .move2_adjust(&fit, &stats)
                .map_err(|e| computation_error(scope, e))?;
        } else {
            log::warn!(
                "MOVE.2 adjustment skipped for {}: independent sample has {} points",
                scope,
                n2
            );
        }
    }

    Ok(RelationshipRecord::defined(
        scope,
        n1,
        n2,
        config.transform,
        substitute,
        fit,
    ))
}

/// Solves every scope present in the data set.
pub fn solve_dataset(
    dataset: &RegressionDataSet,
    config: &AnalysisConfig,
    primitive: &dyn RegressionPrimitive,
) -> RegressionResult<RegressionResultSet> {
    let single = match dataset.single_equation_samples() {
        Some(samples) => Some(solve_samples(
            samples,
            EquationScope::Single,
            config,
            primitive,
        )?),
        None => None,
    };

    let monthly = match dataset.monthly_samples() {
        Some(samples) => {
            let mut records = Vec::with_capacity(12);
            for (index, month_samples) in samples.iter().enumerate() {
                let scope = EquationScope::Month(index as u8 + 1);
                records.push(solve_samples(month_samples, scope, config, primitive)?);
            }
            Some(month_array(records)?)
        }
        None => None,
    };

    Ok(RegressionResultSet::new(single, monthly))
}
