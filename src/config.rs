//! # Analysis Configuration
//!
//! Configuration structures controlling the regression analysis: fitting
//! method, equation scopes, month filter, data transform, forced intercept,
//! analysis periods, and the pass/fail criteria evaluated against fitted
//! relationships.

use crate::errors::{
    validate_month, validate_positive, validate_unit_open, RegressionAnalysisError,
    RegressionResult,
};
use crate::series::PeriodRange;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default substitute for values ≤ 0 ahead of a base-10 log transform.
pub const DEFAULT_LE_ZERO_SUBSTITUTE: f64 = 0.001;

/// Default minimum paired-sample size for the sample-size check.
pub const DEFAULT_MINIMUM_SAMPLE_SIZE: usize = 2;

/// Fitting method for the X/Y relationship.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnalysisMethod {
    /// Ordinary least squares over the paired sample.
    OrdinaryLeastSquares,
    /// Maintenance of Variance Extension (2-parameter): the least-squares
    /// line is adjusted using the independent series' own distribution over
    /// a potentially longer period.
    Move2,
}

/// Optional elementwise transform applied to sample values before fitting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DataTransform {
    /// Fit in raw data space.
    None,
    /// Fit in base-10 logarithm space; values ≤ 0 are replaced by the
    /// configured substitute before taking the logarithm. The inverse is
    /// `10^v` (see [`crate::transform`]).
    Log10,
}

/// Which equations are fitted: one relationship for the whole period, one
/// per calendar month, or both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ScopeSelection {
    /// Fit a single equation over the whole (optionally month-filtered)
    /// analysis period.
    pub single: bool,
    /// Fit twelve equations, one per calendar month.
    pub monthly: bool,
}

impl ScopeSelection {
    /// Single equation only (the default).
    pub fn single_only() -> Self {
        Self {
            single: true,
            monthly: false,
        }
    }

    /// Monthly equations only.
    pub fn monthly_only() -> Self {
        Self {
            single: false,
            monthly: true,
        }
    }

    /// Both the single equation and the twelve monthly equations.
    pub fn both() -> Self {
        Self {
            single: true,
            monthly: true,
        }
    }
}

impl Default for ScopeSelection {
    fn default() -> Self {
        Self::single_only()
    }
}

/// Identifies one fitted relationship: the single equation, or the equation
/// for one calendar month. Used to index every result container and to name
/// the offending scope in computation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EquationScope {
    /// The single equation covering the whole analysis period.
    Single,
    /// The equation for one calendar month (1..=12).
    Month(u8),
}

impl fmt::Display for EquationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EquationScope::Single => write!(f, "single equation"),
            EquationScope::Month(m) => write!(f, "month {}", m),
        }
    }
}

/// Configuration for one regression analysis.
///
/// Construct with [`AnalysisConfig::default`] and refine with the `with_`
/// builders; the driver validates the configuration before any extraction.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalysisConfig {
    /// Fitting method.
    pub method: AnalysisMethod,
    /// Which equations to fit.
    pub scopes: ScopeSelection,
    /// Calendar months included in the analysis; empty means all months.
    pub analysis_months: Vec<u8>,
    /// Optional data transform applied before fitting.
    pub transform: DataTransform,
    /// Positive value replacing any value ≤ 0 ahead of a log transform.
    pub le_zero_substitute: f64,
    /// Optional forced intercept; must be exactly 0.0 and is only legal with
    /// ordinary least squares.
    pub forced_intercept: Option<f64>,
    /// Analysis period over the dependent series; `None` means the series'
    /// full period.
    pub dependent_period: Option<PeriodRange>,
    /// Analysis period over the independent series. Under ordinary least
    /// squares this must equal the dependent period (leave `None` to mirror
    /// it); under MOVE.2 `None` means the independent series' full period.
    pub independent_period: Option<PeriodRange>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            method: AnalysisMethod::OrdinaryLeastSquares,
            scopes: ScopeSelection::single_only(),
            analysis_months: Vec::new(),
            transform: DataTransform::None,
            le_zero_substitute: DEFAULT_LE_ZERO_SUBSTITUTE,
            forced_intercept: None,
            dependent_period: None,
            independent_period: None,
        }
    }
}

impl AnalysisConfig {
    /// Sets the fitting method.
    pub fn with_method(mut self, method: AnalysisMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the equation scopes.
    pub fn with_scopes(mut self, scopes: ScopeSelection) -> Self {
        self.scopes = scopes;
        self
    }

    /// Restricts the analysis to the given calendar months (1..=12).
    pub fn with_analysis_months(mut self, months: Vec<u8>) -> Self {
        self.analysis_months = months;
        self
    }

    /// Sets the data transform.
    pub fn with_transform(mut self, transform: DataTransform) -> Self {
        self.transform = transform;
        self
    }

    /// Sets the substitute for values ≤ 0 ahead of a log transform.
    pub fn with_le_zero_substitute(mut self, substitute: f64) -> Self {
        self.le_zero_substitute = substitute;
        self
    }

    /// Forces the fitted intercept to 0.0 (ordinary least squares only).
    pub fn with_forced_zero_intercept(mut self) -> Self {
        self.forced_intercept = Some(0.0);
        self
    }

    /// Sets an explicit dependent analysis period.
    pub fn with_dependent_period(mut self, period: PeriodRange) -> Self {
        self.dependent_period = Some(period);
        self
    }

    /// Sets an explicit independent analysis period.
    pub fn with_independent_period(mut self, period: PeriodRange) -> Self {
        self.independent_period = Some(period);
        self
    }

    /// Validates every series-independent constraint of the configuration.
    ///
    /// Period defaulting and the OLS period-mirroring rule involve the
    /// series' own periods and are checked by the driver on construction.
    pub fn validate(&self) -> RegressionResult<()> {
        if !self.scopes.single && !self.scopes.monthly {
            return Err(RegressionAnalysisError::NoEquationScope);
        }
        for &month in &self.analysis_months {
            validate_month(month)?;
        }
        validate_positive(self.le_zero_substitute, "le_zero_substitute")?;
        if let Some(intercept) = self.forced_intercept {
            if intercept != 0.0 {
                return Err(RegressionAnalysisError::InvalidForcedIntercept { value: intercept });
            }
            if self.method == AnalysisMethod::Move2 {
                return Err(RegressionAnalysisError::InterceptWithMove2);
            }
        }
        Ok(())
    }

    /// Whether a calendar month passes the configured month filter.
    pub fn month_selected(&self, month: u8) -> bool {
        self.analysis_months.is_empty() || self.analysis_months.contains(&month)
    }
}

/// Pass/fail criteria evaluated against each fitted relationship.
///
/// A criterion left unset always passes.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckCriteria {
    /// Minimum paired-sample size; guards division by zero in downstream
    /// statistics.
    pub minimum_sample_size: usize,
    /// Minimum acceptable correlation coefficient, if any.
    pub minimum_correlation: Option<f64>,
    /// Confidence level in (0, 1) for the slope significance test, if any.
    pub confidence_level: Option<f64>,
}

impl Default for CheckCriteria {
    fn default() -> Self {
        Self {
            minimum_sample_size: DEFAULT_MINIMUM_SAMPLE_SIZE,
            minimum_correlation: None,
            confidence_level: None,
        }
    }
}

impl CheckCriteria {
    /// Validates threshold values.
    pub fn validate(&self) -> RegressionResult<()> {
        if let Some(r) = self.minimum_correlation {
            if !r.is_finite() || !(-1.0..=1.0).contains(&r) {
                return Err(RegressionAnalysisError::InvalidParameter {
                    parameter: "minimum_correlation".to_string(),
                    value: r,
                    constraint: "a value in [-1, 1]".to_string(),
                });
            }
        }
        if let Some(level) = self.confidence_level {
            validate_unit_open(level, "confidence_level")?;
        }
        Ok(())
    }
}
