//! Shared domain types.
//!
//! Everything here is a plain, serializable snapshot: each pipeline run builds
//! fresh values and nothing is carried over between runs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default number of days projected past the last observed day.
pub const DEFAULT_HORIZON: usize = 30;

/// Lower bound applied to the reported R².
///
/// A fit worse than the mean would score negative; we report the floor instead.
pub const R_SQUARED_FLOOR: f64 = 0.0;

/// An untrusted transaction record, as decoded from the source.
///
/// Non-numeric quantity/revenue cells decode to `None`. Values supplied
/// programmatically may also be NaN or infinite; validation rejects those too.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawRecord {
    pub date: Option<String>,
    pub product: Option<String>,
    pub quantity: Option<f64>,
    pub revenue: Option<f64>,
}

impl RawRecord {
    /// Convenience constructor for fully populated records.
    pub fn new(date: &str, product: &str, quantity: f64, revenue: f64) -> Self {
        Self {
            date: Some(date.to_string()),
            product: Some(product.to_string()),
            quantity: Some(quantity),
            revenue: Some(revenue),
        }
    }
}

/// A record that passed every validation check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidatedRecord {
    /// Canonical calendar date (time-of-day discarded).
    pub date: NaiveDate,
    pub product: String,
    pub quantity: f64,
    pub revenue: f64,
}

/// Why a raw record was dropped. The first failing check wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DropReason {
    MissingDate,
    InvalidDate,
    MissingProduct,
    MissingQuantity,
    InvalidQuantity,
    NegativeQuantity,
    MissingRevenue,
    InvalidRevenue,
    NegativeRevenue,
}

impl DropReason {
    pub fn label(self) -> &'static str {
        match self {
            DropReason::MissingDate => "missing date",
            DropReason::InvalidDate => "unparsable date",
            DropReason::MissingProduct => "missing product",
            DropReason::MissingQuantity => "missing quantity",
            DropReason::InvalidQuantity => "non-numeric quantity",
            DropReason::NegativeQuantity => "negative quantity",
            DropReason::MissingRevenue => "missing revenue",
            DropReason::InvalidRevenue => "non-numeric revenue",
            DropReason::NegativeRevenue => "negative revenue",
        }
    }
}

/// One day of the revenue series (or one projected day).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    /// Whole days since the earliest aggregated date.
    pub x: i64,
    /// Revenue for the day (clamped at 0 for forecast points).
    pub y: f64,
    pub date: NaiveDate,
    /// Revenue before any downstream adjustment (the unclamped projection for
    /// forecast points).
    pub original_revenue: f64,
}

/// Output of the regression engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// In-sample fitted values, one per series point, same order.
    pub predictions: Vec<f64>,
}

/// Fitted trend plus its forward projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    pub predictions: Vec<f64>,
    pub forecasts: Vec<TimeSeriesPoint>,
}

impl RegressionModel {
    pub fn from_parts(fit: LinearFit, forecasts: Vec<TimeSeriesPoint>) -> Self {
        Self {
            slope: fit.slope,
            intercept: fit.intercept,
            r_squared: fit.r_squared,
            predictions: fit.predictions,
            forecasts,
        }
    }

    /// Sum of the (clamped) projected revenue over the horizon.
    pub fn expected_revenue(&self) -> f64 {
        self.forecasts.iter().map(|p| p.y).sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Summary statistics over the validated records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesSummary {
    pub raw_count: usize,
    pub valid_count: usize,
    pub total_revenue: f64,
    /// Total revenue divided by the validated-record count.
    pub average_revenue: f64,
    pub product_count: usize,
    pub date_range: DateRange,
}

/// Validated, aggregated data ready for fitting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessed {
    pub records: Vec<ValidatedRecord>,
    pub dropped_count: usize,
    pub drop_reasons: BTreeMap<DropReason, usize>,
    pub series: Vec<TimeSeriesPoint>,
    pub summary: SalesSummary,
}

/// Everything one run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub data: Preprocessed,
    pub regression: RegressionModel,
}

impl PipelineResult {
    /// Whether every derived figure is finite.
    ///
    /// Validated inputs are finite, but summing very large revenues can
    /// overflow to infinity and turn the fit into NaN.
    pub fn is_finite(&self) -> bool {
        let s = &self.data.summary;
        let m = &self.regression;
        [s.total_revenue, s.average_revenue, m.slope, m.intercept, m.r_squared]
            .iter()
            .chain(&m.predictions)
            .all(|v| v.is_finite())
            && self
                .data
                .series
                .iter()
                .chain(&m.forecasts)
                .all(|p| p.y.is_finite() && p.original_revenue.is_finite())
    }
}

/// Policy knobs for fitting and projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastConfig {
    /// Number of days to project.
    pub horizon: usize,
    /// Lower clamp for the reported R².
    pub r_squared_floor: f64,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            horizon: DEFAULT_HORIZON,
            r_squared_floor: R_SQUARED_FLOOR,
        }
    }
}

impl ForecastConfig {
    pub fn with_horizon(horizon: usize) -> Self {
        Self {
            horizon,
            ..Self::default()
        }
    }
}
