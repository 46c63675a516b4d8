// ABOUTME: Statistical analysis engine for training trend calculations
// ABOUTME: Ordinary least-squares regression with correlation, R-squared, and standard error
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use pierre_training_core::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Complete linear regression analysis results
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RegressionResult {
    /// Slope of the regression line (change per session)
    pub slope: f64,
    /// Y-intercept of the regression line
    pub intercept: f64,
    /// Coefficient of determination (goodness of fit, 0-1)
    pub r_squared: f64,
    /// Pearson correlation coefficient (-1 to 1)
    pub correlation: f64,
    /// Standard error of the estimate
    pub standard_error: f64,
    /// Degrees of freedom (n - 2)
    pub degrees_of_freedom: usize,
}

impl RegressionResult {
    /// Value predicted by the fitted line at `x`
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }
}

/// Statistical analyzer for evenly spaced series
pub struct StatisticalAnalyzer;

impl StatisticalAnalyzer {
    /// Fit `values` against their index (0, 1, 2, ...) by least squares
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` with fewer than two values or zero variance in x
    pub fn linear_regression(values: &[f64]) -> AppResult<RegressionResult> {
        if values.len() < 2 {
            return Err(AppError::invalid_input(format!(
                "Insufficient data points for regression: need at least 2, got {}",
                values.len()
            )));
        }

        let n = values.len() as f64;
        let x_values: Vec<f64> = (0..values.len()).map(|i| i as f64).collect();

        let sum_x = x_values.iter().sum::<f64>();
        let sum_y = values.iter().sum::<f64>();
        let sum_xx = x_values.iter().map(|x| x * x).sum::<f64>();
        let sum_x_y = x_values
            .iter()
            .zip(values)
            .map(|(x, y)| x * y)
            .sum::<f64>();
        let sum_yy = values.iter().map(|y| y * y).sum::<f64>();

        let mean_x = sum_x / n;
        let mean_y = sum_y / n;

        let denominator = (n * mean_x).mul_add(-mean_x, sum_xx);
        if denominator.abs() < f64::EPSILON {
            return Err(AppError::invalid_input(
                "Cannot calculate regression: zero variance in x",
            ));
        }

        let slope = (n * mean_x).mul_add(-mean_y, sum_x_y) / denominator;
        let intercept = slope.mul_add(-mean_x, mean_y);

        let numerator = (n * mean_x).mul_add(-mean_y, sum_x_y);
        let y_variance = (n * mean_y).mul_add(-mean_y, sum_yy).max(0.0);
        let denominator_corr = (denominator * y_variance).sqrt();

        // Flat series: y has no variance, so there is nothing to correlate
        let correlation = if denominator_corr.abs() < f64::EPSILON {
            0.0
        } else {
            (numerator / denominator_corr).clamp(-1.0, 1.0)
        };
        let r_squared = correlation * correlation;

        let sse = x_values
            .iter()
            .zip(values)
            .map(|(x, actual)| {
                let diff = actual - slope.mul_add(*x, intercept);
                diff * diff
            })
            .sum::<f64>();

        let degrees_of_freedom = values.len().saturating_sub(2);
        let standard_error = if degrees_of_freedom > 0 {
            (sse / degrees_of_freedom as f64).sqrt()
        } else {
            0.0
        };

        Ok(RegressionResult {
            slope,
            intercept,
            r_squared,
            correlation,
            standard_error,
            degrees_of_freedom,
        })
    }

    /// Arithmetic mean, `None` for an empty slice
    #[must_use]
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            None
        } else {
            Some(values.iter().sum::<f64>() / values.len() as f64)
        }
    }
}
