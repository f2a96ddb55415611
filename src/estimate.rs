//! Estimation-error statistics.
//!
//! Re-applies each fitted relationship to its own paired input and
//! summarizes the residuals. Residuals are computed in the space the line
//! was fitted in, so a log-transformed relationship reports log-space
//! errors.

use crate::dataset::{RegressionDataSet, RegressionSamples};
use crate::results::{ErrorRecord, ErrorStatistics, RegressionErrorSet, RegressionResultSet, RelationshipRecord};

/// Computes the error record for one scope.
///
/// An undefined relationship yields an undefined error record.
pub fn estimate_record(samples: &RegressionSamples, record: &RelationshipRecord) -> ErrorRecord {
    let scope = record.scope();
    let n = samples.n1();
    let fit = match record.statistics() {
        Some(fit) if n > 0 => fit,
        _ => return ErrorRecord::new(scope, n, None),
    };

    // The record carries the transform and substitute it was fitted under,
    // so error estimation sees the same transformed values as the solver.
    let transform = record.transform();
    let substitute = record.le_zero_substitute();
    let x1 = transform.apply_slice(samples.x1(), substitute);
    let y1 = transform.apply_slice(samples.y1(), substitute);

    let mut sum = 0.0;
    let mut sum_abs = 0.0;
    let mut sum_squares = 0.0;
    for (&x, &y) in x1.iter().zip(&y1) {
        let residual = y - fit.predict(x);
        sum += residual;
        sum_abs += residual.abs();
        sum_squares += residual * residual;
    }

    let nf = n as f64;
    let dof = n.saturating_sub(2);
    let standard_error_of_estimate = if dof > 0 {
        (sum_squares / dof as f64).sqrt()
    } else {
        // A two-point fit leaves no residual degrees of freedom.
        0.0
    };

    ErrorRecord::new(
        scope,
        n,
        Some(ErrorStatistics {
            standard_error_of_estimate,
            mean_bias: sum / nf,
            mean_absolute_error: sum_abs / nf,
        }),
    )
}

/// Computes error records for every scope present in both containers.
pub fn estimate_errors(
    dataset: &RegressionDataSet,
    results: &RegressionResultSet,
) -> RegressionErrorSet {
    let single = match (dataset.single_equation_samples(), results.single_equation()) {
        (Some(samples), Some(record)) => Some(estimate_record(samples, record)),
        _ => None,
    };

    let monthly = dataset.monthly_samples().map(|samples| {
        std::array::from_fn(|index| {
            let month = index as u8 + 1;
            match results.monthly_equation(month) {
                Some(record) => estimate_record(&samples[index], record),
                None => ErrorRecord::new(
                    crate::config::EquationScope::Month(month),
                    samples[index].n1(),
                    None,
                ),
            }
        })
    });

    RegressionErrorSet::new(single, monthly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AnalysisConfig, EquationScope};
    use crate::extract::build_dataset;
    use crate::primitive::OlsPrimitive;
    use crate::series::{RegularSeries, TimeSeries};
    use crate::solver::solve_dataset;
    use assert_approx_eq::assert_approx_eq;

    fn analyze(x: Vec<f64>, y: Vec<f64>) -> (RegressionDataSet, RegressionResultSet) {
        let x = RegularSeries::monthly(2000, 1, x).unwrap();
        let y = RegularSeries::monthly(2000, 1, y).unwrap();
        let config = AnalysisConfig::default();
        let period = y.period();
        let dataset = build_dataset(&x, &y, config.scopes, &period, &period, &[]);
        let results = solve_dataset(&dataset, &config, &OlsPrimitive).unwrap();
        (dataset, results)
    }

    #[test]
    fn perfect_fit_has_zero_errors() {
        let (dataset, results) = analyze(
            vec![1.0, 2.0, 3.0, 4.0, 5.0],
            vec![2.0, 4.0, 6.0, 8.0, 10.0],
        );
        let errors = estimate_errors(&dataset, &results);
        let stats = errors.single_equation().unwrap().statistics().unwrap();
        assert_approx_eq!(stats.standard_error_of_estimate, 0.0, 1e-9);
        assert_approx_eq!(stats.mean_bias, 0.0, 1e-9);
        assert_approx_eq!(stats.mean_absolute_error, 0.0, 1e-9);
    }

    #[test]
    fn residual_statistics_match_hand_computation() {
        // x = 1..4 against y with a known deviation pattern around y = 2x:
        // the least-squares residuals of this sample are computed by hand.
        let x = vec![1.0, 2.0, 3.0, 4.0];
        let y = vec![2.5, 3.5, 6.5, 7.5];
        let (dataset, results) = analyze(x, y);
        let fit = *results.single_equation().unwrap().statistics().unwrap();
        assert_approx_eq!(fit.slope, 1.8, 1e-12);
        assert_approx_eq!(fit.intercept, 0.5, 1e-12);

        let errors = estimate_errors(&dataset, &results);
        let stats = errors.single_equation().unwrap().statistics().unwrap();
        // Residuals: 0.2, -0.6, 0.6, -0.2 → bias 0, MAE 0.4,
        // SSE = 0.8, dof = 2 → standard error sqrt(0.4).
        assert_approx_eq!(stats.mean_bias, 0.0, 1e-12);
        assert_approx_eq!(stats.mean_absolute_error, 0.4, 1e-12);
        assert_approx_eq!(stats.standard_error_of_estimate, 0.4f64.sqrt(), 1e-12);
    }

    #[test]
    fn undefined_relationship_yields_undefined_errors() {
        let (dataset, results) = analyze(vec![1.0, 2.0], vec![3.0, -999.0]);
        let errors = estimate_errors(&dataset, &results);
        let record = errors.single_equation().unwrap();
        assert_eq!(record.scope(), EquationScope::Single);
        assert!(!record.is_defined());
    }
}
