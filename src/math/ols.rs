//! Closed-form ordinary least squares with a single predictor.
//!
//! We fit `y = intercept + slope * x` via the centered normal equations:
//!
//! ```text
//! slope     = Σ (x_i - x̄)(y_i - ȳ) / Σ (x_i - x̄)²
//! intercept = ȳ - slope * x̄
//! ```
//!
//! Degenerate inputs are defined rather than rejected:
//! - zero variance in `x` gives `slope = 0` (the line is the mean of `y`)
//! - zero variance in `y` gives `R² = 1`
//!
//! Callers must pass non-empty, equal-length vectors.

use nalgebra::DVector;

/// Coefficients of a fitted line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub slope: f64,
    pub intercept: f64,
}

impl Line {
    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit a line through `(x, y)` by ordinary least squares.
pub fn fit_line(x: &DVector<f64>, y: &DVector<f64>) -> Line {
    let x_mean = x.mean();
    let y_mean = y.mean();

    let dx = x.add_scalar(-x_mean);
    let dy = y.add_scalar(-y_mean);

    let denom = dx.dot(&dx);
    let slope = if denom == 0.0 { 0.0 } else { dx.dot(&dy) / denom };

    Line {
        slope,
        intercept: y_mean - slope * x_mean,
    }
}

/// Coefficient of determination for `fitted` against `y`, clamped below at `floor`.
pub fn r_squared(y: &DVector<f64>, fitted: &DVector<f64>, floor: f64) -> f64 {
    let y_mean = y.mean();
    let dy = y.add_scalar(-y_mean);
    let total = dy.dot(&dy);
    if total == 0.0 {
        return 1.0;
    }

    let resid = y - fitted;
    let residual = resid.dot(&resid);
    (1.0 - residual / total).max(floor)
}
