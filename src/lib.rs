//! `sales-forecast` library crate.
//!
//! Turns raw sales transactions into a daily revenue series, fits a linear
//! trend by ordinary least squares and projects it forward.
//!
//! The binary (`sf`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - the pipeline entry points are reusable from other callers

pub mod app;
pub mod cli;
pub mod data;
pub mod domain;
pub mod error;
pub mod fit;
pub mod io;
pub mod math;
pub mod plot;
pub mod prep;
pub mod report;

pub use app::pipeline::{preprocess, run_pipeline, train_and_forecast, train_and_forecast_with};
pub use error::{AppError, PipelineError};
