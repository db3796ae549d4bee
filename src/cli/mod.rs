//! Command-line parsing for the sales trend forecaster.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the pipeline code.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{ArgAction, Parser, Subcommand};

use crate::domain::DEFAULT_HORIZON;

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "sf", version, about = "Daily sales trend forecaster (linear regression)")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug). `RUST_LOG` overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fit a daily revenue trend and print the forecast for one or more CSV files.
    Forecast(ForecastArgs),
    /// Show the first rows of a sales CSV before processing.
    Preview(PreviewArgs),
    /// Write a synthetic sales CSV.
    Sample(SampleArgs),
}

#[derive(Debug, Parser, Clone)]
pub struct ForecastArgs {
    /// Sales CSV file(s) with `date,product,quantity,revenue` columns.
    #[arg(value_name = "CSV", required = true)]
    pub inputs: Vec<PathBuf>,

    /// Number of days to forecast.
    #[arg(
        long,
        env = "SF_HORIZON",
        default_value_t = DEFAULT_HORIZON,
        value_parser = parse_horizon
    )]
    pub horizon: usize,

    /// Render an ASCII plot of history, trend and forecast.
    #[arg(long)]
    pub plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 80)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 20)]
    pub height: usize,

    /// Export forecast rows to CSV (single input only).
    #[arg(long, value_name = "CSV")]
    pub export: Option<PathBuf>,

    /// Export the full result (series, model, forecast) to JSON (single input only).
    #[arg(long = "export-json", value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}

#[derive(Debug, Parser)]
pub struct PreviewArgs {
    /// Sales CSV file.
    #[arg(value_name = "CSV")]
    pub input: PathBuf,

    /// Number of rows to show.
    #[arg(long, default_value_t = 10)]
    pub rows: usize,
}

#[derive(Debug, Parser)]
pub struct SampleArgs {
    /// Output CSV path.
    #[arg(long, value_name = "CSV")]
    pub out: PathBuf,

    /// Number of days to generate.
    #[arg(long, default_value_t = 90)]
    pub days: usize,

    /// Random seed.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// First date (YYYY-MM-DD).
    #[arg(long, value_parser = parse_start)]
    pub start: Option<NaiveDate>,

    /// Probability that a row is deliberately malformed.
    #[arg(long = "bad-rows", default_value_t = 0.0)]
    pub bad_rows: f64,
}

fn parse_horizon(s: &str) -> Result<usize, String> {
    let h: usize = s.trim().parse().map_err(|e| format!("invalid horizon '{s}': {e}"))?;
    if h == 0 {
        return Err("horizon must be >= 1".to_string());
    }
    Ok(h)
}

fn parse_start(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").map_err(|e| format!("invalid start date '{s}': {e}"))
}
