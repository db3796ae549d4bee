//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw and validated transaction records (`RawRecord`, `ValidatedRecord`)
//! - the daily series (`TimeSeriesPoint`)
//! - fit outputs (`LinearFit`, `RegressionModel`) and run results
//! - policy configuration (`ForecastConfig`)

pub mod types;

pub use types::*;
