//! Regression engine: a linear trend of daily revenue against day ordinal.
//!
//! The fit is closed-form (`math::ols`) and deterministic for a given series.

use nalgebra::DVector;

use crate::domain::{ForecastConfig, LinearFit, TimeSeriesPoint};
use crate::error::{PipelineError, Stage};
use crate::math::{Line, fit_line, r_squared};

/// Minimum number of points that determine a slope.
pub const MIN_FIT_POINTS: usize = 2;

/// Fit a line to the series using the default R² floor.
pub fn fit(series: &[TimeSeriesPoint]) -> Result<LinearFit, PipelineError> {
    fit_with(series, &ForecastConfig::default())
}

/// Fit a line to the series.
pub fn fit_with(series: &[TimeSeriesPoint], config: &ForecastConfig) -> Result<LinearFit, PipelineError> {
    let n = series.len();
    if n < MIN_FIT_POINTS {
        return Err(PipelineError::insufficient(Stage::Fit, MIN_FIT_POINTS, n));
    }

    let x = DVector::from_iterator(n, series.iter().map(|p| p.x as f64));
    let y = DVector::from_iterator(n, series.iter().map(|p| p.y));

    let line = fit_line(&x, &y);
    let fitted = x.map(|v| line.eval(v));
    let r2 = r_squared(&y, &fitted, config.r_squared_floor);

    log::debug!(
        "fit: n={n} slope={:.6} intercept={:.6} r2={r2:.6}",
        line.slope,
        line.intercept
    );

    Ok(LinearFit {
        slope: line.slope,
        intercept: line.intercept,
        r_squared: r2,
        predictions: fitted.iter().copied().collect(),
    })
}

impl LinearFit {
    pub fn line(&self) -> Line {
        Line {
            slope: self.slope,
            intercept: self.intercept,
        }
    }
}
