//! Error types and validation functions for regression analysis.
//!
//! Two failure classes exist. Configuration errors are raised eagerly, when a
//! driver is constructed or criteria are validated. Computation errors are
//! raised while solving, when the regression primitive cannot produce a fit
//! for a scope. A scope whose paired sample is simply too small is *not* an
//! error: it yields a record whose statistics are undefined (see
//! [`crate::results::RelationshipRecord`]).

use crate::config::EquationScope;
use thiserror::Error;

/// Error types for regression analysis operations.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RegressionAnalysisError {
    /// No equation scope was selected in the configuration.
    #[error("no equation scope selected: enable the single equation, the monthly equations, or both")]
    NoEquationScope,

    /// A forced intercept other than exactly 0.0 was configured.
    #[error("forced intercept {value} is not supported: only an intercept of exactly 0.0 may be forced")]
    InvalidForcedIntercept {
        /// The configured intercept value
        value: f64,
    },

    /// A forced intercept was combined with the MOVE.2 method.
    #[error("a forced intercept is only legal with ordinary least squares, not MOVE.2")]
    InterceptWithMove2,

    /// An analysis month outside the calendar range was configured.
    #[error("analysis month {month} is out of range, expected 1..=12")]
    MonthOutOfRange {
        /// The offending month number
        month: u8,
    },

    /// Invalid parameter value for analysis configuration.
    #[error("invalid parameter: {parameter} = {value}, expected {constraint}")]
    InvalidParameter {
        /// Parameter name
        parameter: String,
        /// Invalid value provided
        value: f64,
        /// Valid range or constraint description
        constraint: String,
    },

    /// An explicit independent period differs from the dependent period
    /// under ordinary least squares, where the two must coincide.
    #[error("independent analysis period must equal the dependent period for ordinary least squares")]
    PeriodMismatch,

    /// Numerical computation error inside the regression primitive.
    #[error("numerical computation failed: {reason}")]
    NumericalError {
        /// Detailed reason for the numerical failure
        reason: String,
    },

    /// The regression primitive could not produce a fit for a scope.
    #[error("regression failed for {scope}: {reason}")]
    ComputationFailed {
        /// The scope whose fit failed
        scope: EquationScope,
        /// Detailed reason for the failure
        reason: String,
    },
}

impl RegressionAnalysisError {
    /// Whether this error is a configuration error (raised before any
    /// computation starts).
    pub fn is_configuration(&self) -> bool {
        !matches!(
            self,
            RegressionAnalysisError::NumericalError { .. }
                | RegressionAnalysisError::ComputationFailed { .. }
        )
    }

    /// Whether this error was raised during solving.
    pub fn is_computation(&self) -> bool {
        !self.is_configuration()
    }
}

/// Result type for regression analysis operations.
///
/// Convenience alias for operations that may fail with
/// [`RegressionAnalysisError`].
pub type RegressionResult<T> = Result<T, RegressionAnalysisError>;

/// Validates that a month number is a calendar month.
///
/// # Example
/// ```rust
/// use hydro_regression::errors::validate_month;
///
/// assert!(validate_month(6).is_ok());
/// assert!(validate_month(0).is_err());
/// assert!(validate_month(13).is_err());
/// ```
pub fn validate_month(month: u8) -> RegressionResult<()> {
    if (1..=12).contains(&month) {
        Ok(())
    } else {
        Err(RegressionAnalysisError::MonthOutOfRange { month })
    }
}

/// Validates that a parameter is strictly positive and finite.
pub fn validate_positive(value: f64, name: &str) -> RegressionResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(RegressionAnalysisError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: "a finite value > 0".to_string(),
        })
    }
}

/// Validates that a probability-like parameter lies strictly inside (0, 1).
pub fn validate_unit_open(value: f64, name: &str) -> RegressionResult<()> {
    if value.is_finite() && value > 0.0 && value < 1.0 {
        Ok(())
    } else {
        Err(RegressionAnalysisError::InvalidParameter {
            parameter: name.to_string(),
            value,
            constraint: "a value in (0, 1)".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_validation_bounds() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert_eq!(
            validate_month(0),
            Err(RegressionAnalysisError::MonthOutOfRange { month: 0 })
        );
        assert!(validate_month(13).is_err());
    }

    #[test]
    fn positive_validation_rejects_nonpositive_and_nonfinite() {
        assert!(validate_positive(0.001, "le_zero_substitute").is_ok());
        assert!(validate_positive(0.0, "le_zero_substitute").is_err());
        assert!(validate_positive(-1.0, "le_zero_substitute").is_err());
        assert!(validate_positive(f64::NAN, "le_zero_substitute").is_err());
    }

    #[test]
    fn unit_open_validation() {
        assert!(validate_unit_open(0.95, "confidence_level").is_ok());
        assert!(validate_unit_open(1.0, "confidence_level").is_err());
        assert!(validate_unit_open(0.0, "confidence_level").is_err());
    }

    #[test]
    fn error_taxonomy_classification() {
        assert!(RegressionAnalysisError::NoEquationScope.is_configuration());
        assert!(RegressionAnalysisError::MonthOutOfRange { month: 0 }.is_configuration());
        let failed = RegressionAnalysisError::ComputationFailed {
            scope: EquationScope::Month(3),
            reason: "zero variance".to_string(),
        };
        assert!(failed.is_computation());
        assert!(!failed.is_configuration());
    }

    #[test]
    fn computation_error_names_the_scope() {
        let err = RegressionAnalysisError::ComputationFailed {
            scope: EquationScope::Single,
            reason: "zero variance in predictor".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("single equation"));
        assert!(text.contains("zero variance"));
    }
}
