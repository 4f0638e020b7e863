use anipv_core::FEATURE_COUNT;

use crate::error::LoadError;

/// Ordinary linear regressor: `intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearModel {
    coefficients: [f64; FEATURE_COUNT],
    intercept: f64,
}

impl LinearModel {
    /// # Errors
    ///
    /// Returns [`LoadError::Corrupt`] unless there is exactly one finite
    /// coefficient per feature and a finite intercept.
    pub fn new(coefficients: &[f64], intercept: f64) -> Result<Self, LoadError> {
        let coefficients: [f64; FEATURE_COUNT] = coefficients.try_into().map_err(|_| {
            LoadError::Corrupt(format!(
                "linear model has {} coefficients, expected {FEATURE_COUNT}",
                coefficients.len()
            ))
        })?;
        if let Some(i) = coefficients.iter().position(|c| !c.is_finite()) {
            return Err(LoadError::Corrupt(format!(
                "linear model coefficient {i} is not finite"
            )));
        }
        if !intercept.is_finite() {
            return Err(LoadError::Corrupt(
                "linear model intercept is not finite".to_string(),
            ));
        }
        Ok(Self {
            coefficients,
            intercept,
        })
    }

    #[must_use]
    pub fn evaluate(&self, x: &[f64; FEATURE_COUNT]) -> f64 {
        self.coefficients
            .iter()
            .zip(x)
            .fold(self.intercept, |acc, (c, v)| c.mul_add(*v, acc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn evaluates_dot_product_plus_intercept() {
        let mut coefficients = [0.0; FEATURE_COUNT];
        coefficients[5] = 2.0;
        coefficients[10] = 100.0;
        let model = LinearModel::new(&coefficients, 10.0).expect("valid model");

        let mut x = [0.0; FEATURE_COUNT];
        x[5] = 12.0;
        x[10] = 0.5;
        assert!((model.evaluate(&x) - 84.0).abs() < 1e-9);
    }

    #[test]
    fn wrong_coefficient_count_is_corrupt() {
        let err = LinearModel::new(&[1.0; 14], 0.0).unwrap_err();
        assert!(matches!(err, LoadError::Corrupt(ref m) if m.contains("14 coefficients")));
    }

    #[test]
    fn non_finite_intercept_is_corrupt() {
        assert!(LinearModel::new(&[0.0; FEATURE_COUNT], f64::INFINITY).is_err());
    }
}
