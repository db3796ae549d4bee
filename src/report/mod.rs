//! Reporting utilities: derived figures and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{RegressionModel, TimeSeriesPoint};

/// Qualitative reading of R².
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitLabel {
    Good,
    Moderate,
    Low,
}

impl FitLabel {
    pub fn from_r_squared(r2: f64) -> Self {
        if r2 > 0.7 {
            FitLabel::Good
        } else if r2 > 0.5 {
            FitLabel::Moderate
        } else {
            FitLabel::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FitLabel::Good => "good",
            FitLabel::Moderate => "moderate",
            FitLabel::Low => "low",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    Increasing,
    Decreasing,
    Flat,
}

impl Trend {
    pub fn from_slope(slope: f64) -> Self {
        if slope > 0.0 {
            Trend::Increasing
        } else if slope < 0.0 {
            Trend::Decreasing
        } else {
            Trend::Flat
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Trend::Increasing => "increasing",
            Trend::Decreasing => "decreasing",
            Trend::Flat => "flat",
        }
    }
}

/// A forecast point with its change versus the previous projected day.
#[derive(Debug, Clone)]
pub struct ForecastRow<'a> {
    pub point: &'a TimeSeriesPoint,
    pub change: f64,
    /// Percent change; 0 when the previous value is 0.
    pub change_pct: f64,
    /// Whether the projection was clamped at 0.
    pub clamped: bool,
}

/// Pair each forecast point with its day-over-day change.
///
/// The first row compares against itself (zero change).
pub fn forecast_rows(model: &RegressionModel) -> Vec<ForecastRow<'_>> {
    let mut out = Vec::with_capacity(model.forecasts.len());
    let mut prev: Option<f64> = None;

    for p in &model.forecasts {
        let before = prev.unwrap_or(p.y);
        let change = p.y - before;
        let change_pct = if before > 0.0 { change / before * 100.0 } else { 0.0 };
        out.push(ForecastRow {
            point: p,
            change,
            change_pct,
            clamped: p.original_revenue < 0.0,
        });
        prev = Some(p.y);
    }

    out
}
