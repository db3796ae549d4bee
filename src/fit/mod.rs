//! Trend fitting and projection.
//!
//! - `regression`: least-squares line, R², in-sample predictions
//! - `forecast`: dated, non-negative projection past the last observed day

pub mod forecast;
pub mod regression;

pub use forecast::forecast;
pub use regression::{MIN_FIT_POINTS, fit, fit_with};
