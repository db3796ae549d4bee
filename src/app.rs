//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - ingests sales CSVs
//! - runs preprocessing, regression and forecasting
//! - prints reports/plots
//! - writes optional exports

use std::path::{Path, PathBuf};

use clap::Parser;
use rayon::prelude::*;

use crate::cli::{Cli, Command, ForecastArgs, PreviewArgs, SampleArgs};
use crate::data::SampleConfig;
use crate::domain::{ForecastConfig, PipelineResult};
use crate::error::{AppError, EXIT_INPUT};

pub mod pipeline;

/// Options for a `forecast` run, detached from clap.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub forecast: ForecastConfig,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Entry point for the `sf` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Forecast(args) => handle_forecast(args),
        Command::Preview(args) => handle_preview(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .target(env_logger::Target::Stderr)
        .init();
}

pub fn run_config_from_args(args: &ForecastArgs) -> RunConfig {
    RunConfig {
        forecast: ForecastConfig::with_horizon(args.horizon),
        plot: args.plot,
        plot_width: args.width,
        plot_height: args.height,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

fn handle_forecast(args: ForecastArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);

    if args.inputs.len() > 1 && (config.export_csv.is_some() || config.export_json.is_some()) {
        return Err(AppError::new(
            EXIT_INPUT,
            "--export/--export-json require a single input file.",
        ));
    }

    // Files are independent batches; run in parallel, report in input order.
    let results: Vec<Result<PipelineResult, AppError>> = args
        .inputs
        .par_iter()
        .map(|path| forecast_file(path, &config))
        .collect();

    let mut first_err = None;
    for (path, result) in args.inputs.iter().zip(results) {
        match result {
            Ok(result) => {
                println!("{}", render_report(path, &result, &config));
                write_exports(&result, &config)?;
            }
            Err(e) => {
                eprintln!("{e}");
                first_err.get_or_insert(e);
            }
        }
    }

    match first_err {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Ingest one CSV and run the full pipeline on it.
pub fn forecast_file(path: &Path, config: &RunConfig) -> Result<PipelineResult, AppError> {
    let ingested = crate::io::load_records(path)?;
    for row in &ingested.row_errors {
        log::debug!("{}: line {}: {}", path.display(), row.line, row.message);
    }
    let result = pipeline::run_pipeline(&ingested.records, &config.forecast).map_err(|e| {
        let err = AppError::from(e);
        AppError::new(err.exit_code(), format!("{}: {}", path.display(), err.message()))
    })?;
    Ok(result)
}

fn render_report(path: &Path, result: &PipelineResult, config: &RunConfig) -> String {
    let source = path.display().to_string();
    let mut out = crate::report::format_run_summary(&source, result);
    out.push('\n');
    out.push_str(&crate::report::format_forecast_table(result));

    if config.plot {
        out.push('\n');
        out.push_str(&crate::plot::render_ascii_plot(
            &result.data.series,
            &result.regression,
            config.plot_width,
            config.plot_height,
        ));
    }
    out
}

fn write_exports(result: &PipelineResult, config: &RunConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_csv {
        crate::io::write_forecast_csv(path, &result.regression)?;
        log::info!("wrote forecast CSV {}", path.display());
    }
    if let Some(path) = &config.export_json {
        crate::io::write_result_json(path, result)?;
        log::info!("wrote result JSON {}", path.display());
    }
    Ok(())
}

fn handle_preview(args: PreviewArgs) -> Result<(), AppError> {
    let ingested = crate::io::load_records(&args.input)?;
    let source = args.input.display().to_string();
    print!(
        "{}",
        crate::report::format_preview(&source, &ingested.records, args.rows)
    );
    if !ingested.row_errors.is_empty() {
        println!("Skipped malformed CSV rows: {}", ingested.row_errors.len());
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let defaults = SampleConfig::default();
    let config = SampleConfig {
        start: args.start.unwrap_or(defaults.start),
        days: args.days,
        seed: args.seed,
        bad_row_prob: args.bad_rows,
        ..defaults
    };

    let records = crate::data::generate_sample(&config)?;
    crate::data::write_sample_csv(&args.out, &records)?;
    println!(
        "Wrote {} rows over {} days to {}",
        records.len(),
        config.days,
        args.out.display()
    );
    Ok(())
}
