//! The pipeline entry points shared by the CLI and library callers.
//!
//! raw records -> validate -> aggregate -> fit -> forecast
//!
//! Every function here is pure: each call builds its own intermediates and
//! nothing is retained between calls, so independent batches can run on
//! separate threads.

use crate::domain::{ForecastConfig, PipelineResult, Preprocessed, RawRecord, RegressionModel, TimeSeriesPoint};
use crate::error::{PipelineError, Stage};
use crate::fit::{fit_with, forecast};
use crate::prep::{aggregate, summarize, validate};

/// Validate and aggregate a raw batch.
///
/// Fails with `InsufficientData` if no record survives validation.
pub fn preprocess(raw: &[RawRecord]) -> Result<Preprocessed, PipelineError> {
    let validation = validate(raw);
    let drop_reasons = validation.reason_counts();
    let dropped_count = validation.dropped_count();

    let summary = summarize(raw.len(), &validation.records)
        .ok_or_else(|| PipelineError::insufficient(Stage::Preprocess, 1, 0))?;
    let series = aggregate(&validation.records)?;

    Ok(Preprocessed {
        records: validation.records,
        dropped_count,
        drop_reasons,
        series,
        summary,
    })
}

/// Fit the trend and project the default horizon.
pub fn train_and_forecast(series: &[TimeSeriesPoint]) -> Result<RegressionModel, PipelineError> {
    train_and_forecast_with(series, &ForecastConfig::default())
}

/// Fit the trend and project `config.horizon` days.
///
/// Fails with `InsufficientData` for fewer than two points.
pub fn train_and_forecast_with(
    series: &[TimeSeriesPoint],
    config: &ForecastConfig,
) -> Result<RegressionModel, PipelineError> {
    let fit = fit_with(series, config)?;
    let forecasts = forecast(series, fit.line(), config.horizon)?;
    Ok(RegressionModel::from_parts(fit, forecasts))
}

/// Run both stages on a raw batch.
pub fn run_pipeline(raw: &[RawRecord], config: &ForecastConfig) -> Result<PipelineResult, PipelineError> {
    let data = preprocess(raw)?;
    let regression = train_and_forecast_with(&data.series, config)?;
    Ok(PipelineResult { data, regression })
}
