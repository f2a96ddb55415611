//! Numeric helper functions shared by the regression primitive and the
//! orchestration layer.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Numerical tolerance constants.
pub mod constants {
    /// Default epsilon for floating point comparisons
    pub const DEFAULT_EPSILON: f64 = 1e-12;

    /// Minimum variance for a sample to be considered non-degenerate
    pub const MIN_VARIANCE: f64 = 1e-15;
}

/// Safe floating point comparison functions
pub mod float_ops {
    use super::constants::DEFAULT_EPSILON;

    /// Check if two floating point numbers are approximately equal
    #[inline]
    pub fn approx_eq(a: f64, b: f64) -> bool {
        approx_eq_eps(a, b, DEFAULT_EPSILON)
    }

    /// Check if two floating point numbers are approximately equal with custom epsilon
    #[inline]
    pub fn approx_eq_eps(a: f64, b: f64, epsilon: f64) -> bool {
        (a - b).abs() < epsilon
    }

    /// Check if a floating point number is approximately zero
    #[inline]
    pub fn approx_zero(x: f64) -> bool {
        x.abs() < DEFAULT_EPSILON
    }

    /// Check if a floating point number is approximately zero with custom epsilon
    #[inline]
    pub fn approx_zero_eps(x: f64, epsilon: f64) -> bool {
        x.abs() < epsilon
    }
}

/// Computes the sample mean; 0.0 for an empty slice.
pub fn calculate_mean(data: &[f64]) -> f64 {
    if data.is_empty() {
        return 0.0;
    }
    data.iter().sum::<f64>() / data.len() as f64
}

/// Computes the unbiased sample variance (n−1 denominator) with Welford's
/// single-pass update; 0.0 for fewer than two points.
pub fn calculate_variance(data: &[f64]) -> f64 {
    if data.len() <= 1 {
        return 0.0;
    }

    let mut mean = 0.0;
    let mut m2 = 0.0;
    for (i, &value) in data.iter().enumerate() {
        let count = (i + 1) as f64;
        let delta = value - mean;
        mean += delta / count;
        m2 += delta * (value - mean);
    }

    (m2 / (data.len() as f64 - 1.0)).max(0.0)
}

/// Count, mean, and unbiased variance of one numeric sample.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SampleStats {
    /// Number of values in the sample.
    pub n: usize,
    /// Sample mean.
    pub mean: f64,
    /// Unbiased sample variance (n−1 denominator).
    pub variance: f64,
}

impl SampleStats {
    /// Computes the statistics of a slice.
    pub fn from_slice(data: &[f64]) -> Self {
        Self {
            n: data.len(),
            mean: calculate_mean(data),
            variance: calculate_variance(data),
        }
    }

    /// Sample standard deviation.
    pub fn std_dev(&self) -> f64 {
        self.variance.sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn mean_of_simple_sample() {
        assert_approx_eq!(calculate_mean(&[1.0, 2.0, 3.0, 4.0]), 2.5);
        assert_eq!(calculate_mean(&[]), 0.0);
    }

    #[test]
    fn variance_matches_unbiased_estimator() {
        let data = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_approx_eq!(calculate_variance(&data), 2.5, 1e-12);
    }

    #[test]
    fn variance_of_constant_sample_is_zero() {
        assert_eq!(calculate_variance(&[4.2; 100]), 0.0);
        assert_eq!(calculate_variance(&[1.0]), 0.0);
        assert_eq!(calculate_variance(&[]), 0.0);
    }

    #[test]
    fn variance_is_stable_for_large_offsets() {
        // Large common offset with small spread must not cancel catastrophically.
        let data = [1e9 + 1.0, 1e9 + 2.0, 1e9 + 3.0];
        assert_approx_eq!(calculate_variance(&data), 1.0, 1e-6);
    }

    #[test]
    fn sample_stats_aggregate() {
        let stats = SampleStats::from_slice(&[2.0, 4.0, 6.0]);
        assert_eq!(stats.n, 3);
        assert_approx_eq!(stats.mean, 4.0);
        assert_approx_eq!(stats.variance, 4.0);
        assert_approx_eq!(stats.std_dev(), 2.0);
    }

    #[test]
    fn float_ops_comparisons() {
        assert!(float_ops::approx_eq(1.0, 1.0 + 1e-13));
        assert!(!float_ops::approx_eq(1.0, 1.0 + 1e-9));
        assert!(float_ops::approx_zero_eps(1e-7, 1e-6));
    }
}
