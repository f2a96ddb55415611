//! Regression primitive interface and the bundled least-squares
//! implementation.
//!
//! The orchestration layer never re-derives regression math; it calls a
//! [`RegressionPrimitive`]. The bundled [`OlsPrimitive`] fits a line by
//! centered least squares (optionally without a free intercept term),
//! applies the MOVE.2 variance-maintenance adjustment from the independent
//! sample's own distribution, and tests slope significance with a two-sided
//! Student-t test.

use crate::errors::{validate_unit_open, RegressionAnalysisError, RegressionResult};
use crate::math_utils::{constants, float_ops, SampleStats};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, StudentsT};

/// One fitted linear relationship `y = slope * x + intercept` together with
/// its fit statistics.
///
/// The means and standard deviations describe the sample the line was
/// fitted against (after any data transform); MOVE.2 adjustment replaces
/// them with the extended-record estimates.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LineFit {
    /// Fitted slope.
    pub slope: f64,
    /// Fitted intercept (0.0 when the intercept was forced).
    pub intercept: f64,
    /// Pearson correlation coefficient of the paired sample.
    pub correlation: f64,
    /// Number of paired points the line was fitted against.
    pub n: usize,
    /// Standard error of the slope estimate; NaN when the fit leaves no
    /// residual degrees of freedom.
    pub slope_standard_error: f64,
    /// Mean of the predictor sample.
    pub x_mean: f64,
    /// Standard deviation of the predictor sample.
    pub x_stddev: f64,
    /// Mean of the response sample.
    pub y_mean: f64,
    /// Standard deviation of the response sample.
    pub y_stddev: f64,
}

impl LineFit {
    /// Evaluates the fitted line at `x` (in the space the line was fitted
    /// in, i.e. transformed space when a transform was configured).
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// External statistics primitive consumed by the solver and check evaluator.
///
/// Implementations are pure: no hidden state, identical inputs produce
/// identical outputs.
pub trait RegressionPrimitive {
    /// Fits `y = slope * x + intercept` over a paired sample, optionally
    /// without a free intercept term.
    fn fit(&self, x: &[f64], y: &[f64], force_zero_intercept: bool) -> RegressionResult<LineFit>;

    /// Adjusts a fitted line according to the Maintenance of Variance
    /// Extension (MOVE.2) method, using the independent sample's own mean
    /// and variance over its full analysis period.
    fn move2_adjust(&self, fit: &LineFit, independent: &SampleStats) -> RegressionResult<LineFit>;

    /// Two-sided significance test of the fitted slope against zero at the
    /// given confidence level in (0, 1).
    fn slope_significant(&self, fit: &LineFit, confidence_level: f64) -> RegressionResult<bool>;
}

/// Bundled least-squares implementation of [`RegressionPrimitive`].
#[derive(Debug, Clone, Copy, Default)]
pub struct OlsPrimitive;

impl RegressionPrimitive for OlsPrimitive {
    /// # Algorithm
    ///
    /// Centers the data before computing sums, preventing catastrophic
    /// cancellation when values are large but have small variance. With a
    /// forced zero intercept the slope is `Σxy / Σx²` over the raw values
    /// and the residual degrees of freedom become `n − 1` instead of
    /// `n − 2`.
    fn fit(&self, x: &[f64], y: &[f64], force_zero_intercept: bool) -> RegressionResult<LineFit> {
        if x.len() != y.len() {
            return Err(RegressionAnalysisError::NumericalError {
                reason: format!("paired sample lengths differ: {} vs {}", x.len(), y.len()),
            });
        }
        let n = x.len();
        if n < 2 {
            return Err(RegressionAnalysisError::NumericalError {
                reason: format!("at least 2 paired points required, got {}", n),
            });
        }
        if !x.iter().all(|v| v.is_finite()) || !y.iter().all(|v| v.is_finite()) {
            return Err(RegressionAnalysisError::NumericalError {
                reason: "non-finite values in regression data".to_string(),
            });
        }

        let nf = n as f64;
        let mean_x = x.iter().sum::<f64>() / nf;
        let mean_y = y.iter().sum::<f64>() / nf;

        let mut sxx = 0.0;
        let mut syy = 0.0;
        let mut sxy = 0.0;
        for (&xi, &yi) in x.iter().zip(y) {
            let dx = xi - mean_x;
            let dy = yi - mean_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }

        let (slope, intercept, sxx_for_error) = if force_zero_intercept {
            let sum_x2: f64 = x.iter().map(|&xi| xi * xi).sum();
            if float_ops::approx_zero_eps(sum_x2, constants::MIN_VARIANCE) {
                return Err(RegressionAnalysisError::NumericalError {
                    reason: "predictor variable is identically zero".to_string(),
                });
            }
            let sum_xy: f64 = x.iter().zip(y).map(|(&xi, &yi)| xi * yi).sum();
            (sum_xy / sum_x2, 0.0, sum_x2)
        } else {
            if float_ops::approx_zero_eps(sxx, constants::MIN_VARIANCE) {
                return Err(RegressionAnalysisError::NumericalError {
                    reason: "predictor variable has zero variance (constant values)".to_string(),
                });
            }
            (sxy / sxx, mean_y - (sxy / sxx) * mean_x, sxx)
        };

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(RegressionAnalysisError::NumericalError {
                reason: "non-finite regression coefficients computed".to_string(),
            });
        }

        let r_denominator = (sxx * syy).sqrt();
        let correlation = if float_ops::approx_zero_eps(r_denominator, constants::MIN_VARIANCE) {
            0.0
        } else {
            (sxy / r_denominator).clamp(-1.0, 1.0)
        };

        let rss: f64 = x
            .iter()
            .zip(y)
            .map(|(&xi, &yi)| {
                let residual = yi - (slope * xi + intercept);
                residual * residual
            })
            .sum();
        let dof = if force_zero_intercept { n - 1 } else { n.saturating_sub(2) };
        let slope_standard_error = if dof > 0 {
            ((rss / dof as f64) / sxx_for_error).sqrt()
        } else {
            f64::NAN
        };

        Ok(LineFit {
            slope,
            intercept,
            correlation,
            n,
            slope_standard_error,
            x_mean: mean_x,
            x_stddev: (sxx / (nf - 1.0)).sqrt(),
            y_mean: mean_y,
            y_stddev: (syy / (nf - 1.0)).sqrt(),
        })
    }

    /// # Method
    ///
    /// Maintenance of Variance Extension, two-parameter form (Hirsch 1982).
    /// The extended-record mean and variance of Y are estimated through the
    /// fitted line,
    ///
    /// ```text
    /// μ̂y = ȳ1 + b (x̄2 − x̄1)
    /// σ̂y² = s²y1 + b² (s²x2 − s²x1)
    /// ```
    ///
    /// and the adjusted line passes through (x̄2, μ̂y) with slope
    /// `sign(r) · sqrt(σ̂y² / s²x2)`, maintaining the estimated variance of
    /// Y rather than minimizing squared error.
    fn move2_adjust(&self, fit: &LineFit, independent: &SampleStats) -> RegressionResult<LineFit> {
        if independent.n < 2 {
            return Err(RegressionAnalysisError::NumericalError {
                reason: format!(
                    "independent sample must have at least 2 points, got {}",
                    independent.n
                ),
            });
        }
        if independent.variance <= constants::MIN_VARIANCE {
            return Err(RegressionAnalysisError::NumericalError {
                reason: "independent sample has zero variance".to_string(),
            });
        }

        let b = fit.slope;
        let mean_y = fit.y_mean + b * (independent.mean - fit.x_mean);
        let var_y = (fit.y_stddev * fit.y_stddev
            + b * b * (independent.variance - fit.x_stddev * fit.x_stddev))
            .max(0.0);
        let direction = if fit.correlation < 0.0 { -1.0 } else { 1.0 };
        let slope = direction * (var_y / independent.variance).sqrt();
        let intercept = mean_y - slope * independent.mean;

        if !slope.is_finite() || !intercept.is_finite() {
            return Err(RegressionAnalysisError::NumericalError {
                reason: "non-finite MOVE.2 coefficients computed".to_string(),
            });
        }

        Ok(LineFit {
            slope,
            intercept,
            correlation: fit.correlation,
            n: fit.n,
            slope_standard_error: fit.slope_standard_error,
            x_mean: independent.mean,
            x_stddev: independent.std_dev(),
            y_mean: mean_y,
            y_stddev: var_y.sqrt(),
        })
    }

    /// # Method
    ///
    /// Two-sided Student-t test of H₀: slope = 0 with `n − 2` degrees of
    /// freedom: significant when `|slope / se(slope)|` exceeds the t
    /// quantile at `(1 + confidence) / 2`. Fits with no residual degrees of
    /// freedom cannot demonstrate significance and return `false`.
    fn slope_significant(&self, fit: &LineFit, confidence_level: f64) -> RegressionResult<bool> {
        validate_unit_open(confidence_level, "confidence_level")?;

        if fit.n < 3 {
            return Ok(false);
        }
        let se = fit.slope_standard_error;
        if !se.is_finite() {
            return Ok(false);
        }
        if float_ops::approx_zero(se) {
            // An exact fit: any nonzero slope is trivially significant.
            return Ok(!float_ops::approx_zero(fit.slope));
        }

        let dof = (fit.n - 2) as f64;
        let distribution = StudentsT::new(0.0, 1.0, dof).map_err(|e| {
            RegressionAnalysisError::NumericalError {
                reason: format!("Student-t distribution with {} dof: {}", dof, e),
            }
        })?;
        let critical = distribution.inverse_cdf(0.5 + confidence_level / 2.0);
        Ok((fit.slope / se).abs() > critical)
    }
}
