//! Data transform applied ahead of fitting and its exact inverse.
//!
//! The only non-trivial transform is base-10 logarithm. Values ≤ 0 cannot be
//! logged; they are replaced by a configured positive substitute first, so a
//! zero flow becomes `log10(substitute)` instead of being skipped or raising.
//! The inverse is `10^v`, keeping the transform/inverse pair mathematically
//! consistent.

use crate::config::DataTransform;

impl DataTransform {
    /// Transforms one raw value. For [`DataTransform::Log10`], values ≤ 0
    /// are replaced by `le_zero_substitute` before the logarithm.
    pub fn apply(&self, value: f64, le_zero_substitute: f64) -> f64 {
        match self {
            DataTransform::None => value,
            DataTransform::Log10 => {
                let positive = if value <= 0.0 { le_zero_substitute } else { value };
                positive.log10()
            }
        }
    }

    /// Inverts one transformed value back to data space.
    pub fn invert(&self, value: f64) -> f64 {
        match self {
            DataTransform::None => value,
            DataTransform::Log10 => 10f64.powf(value),
        }
    }

    /// Transforms a whole sample into a new vector; the input is untouched.
    pub fn apply_slice(&self, values: &[f64], le_zero_substitute: f64) -> Vec<f64> {
        match self {
            DataTransform::None => values.to_vec(),
            DataTransform::Log10 => values
                .iter()
                .map(|&v| self.apply(v, le_zero_substitute))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use crate::config::DEFAULT_LE_ZERO_SUBSTITUTE;

    #[test]
    fn zero_is_substituted_not_skipped() {
        let logged = DataTransform::Log10.apply(0.0, DEFAULT_LE_ZERO_SUBSTITUTE);
        assert_approx_eq!(logged, -3.0, 1e-12);
    }

    #[test]
    fn negative_values_use_the_substitute() {
        let logged = DataTransform::Log10.apply(-5.0, 0.01);
        assert_approx_eq!(logged, -2.0, 1e-12);
    }

    #[test]
    fn round_trip_is_identity_for_positive_values() {
        for v in [0.001, 0.5, 1.0, 42.0, 1.0e6] {
            let t = DataTransform::Log10.apply(v, DEFAULT_LE_ZERO_SUBSTITUTE);
            assert_approx_eq!(DataTransform::Log10.invert(t), v, v * 1e-12);

            let raw = DataTransform::None.apply(v, DEFAULT_LE_ZERO_SUBSTITUTE);
            assert_eq!(DataTransform::None.invert(raw), v);
        }
    }

    #[test]
    fn slice_transform_leaves_input_untouched() {
        let raw = vec![1.0, 10.0, 100.0];
        let logged = DataTransform::Log10.apply_slice(&raw, DEFAULT_LE_ZERO_SUBSTITUTE);
        assert_eq!(raw, vec![1.0, 10.0, 100.0]);
        assert_approx_eq!(logged[0], 0.0, 1e-12);
        assert_approx_eq!(logged[1], 1.0, 1e-12);
        assert_approx_eq!(logged[2], 2.0, 1e-12);
    }
}
