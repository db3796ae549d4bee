//! Result exports.
//!
//! - forecast rows as CSV (easy to consume in spreadsheets)
//! - the full `PipelineResult` as JSON (reloadable with `read_result_json`)

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{PipelineResult, RegressionModel};
use crate::error::{AppError, EXIT_INPUT, EXIT_INTERNAL};

/// Write forecast rows to a CSV file (`date,day,revenue,unclamped_revenue`).
pub fn write_forecast_csv(path: &Path, model: &RegressionModel) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["date", "day", "revenue", "unclamped_revenue"])
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV header: {e}")))?;

    for p in &model.forecasts {
        let row = [
            p.date.to_string(),
            p.x.to_string(),
            format!("{:.4}", p.y),
            format!("{:.4}", p.original_revenue),
        ];
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}

/// Write the full pipeline result as pretty JSON.
///
/// JSON has no NaN or infinity, so a result whose revenue sums overflowed
/// `f64` is refused rather than written as unreadable `null`s.
pub fn write_result_json(path: &Path, result: &PipelineResult) -> Result<(), AppError> {
    if !result.is_finite() {
        return Err(AppError::new(
            EXIT_INTERNAL,
            "Result contains non-finite values (revenue totals overflowed); refusing to write JSON.",
        ));
    }

    let file = File::create(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create result JSON '{}': {e}", path.display())))?;

    let mut out = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut out, result)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write result JSON: {e}")))?;
    out.flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush result JSON: {e}")))?;
    Ok(())
}

/// Read a result JSON file written by `write_result_json`.
pub fn read_result_json(path: &Path) -> Result<PipelineResult, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open result JSON '{}': {e}", path.display())))?;
    serde_json::from_reader(std::io::BufReader::new(file))
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Invalid result JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_pipeline;
    use crate::domain::{ForecastConfig, RawRecord};

    #[test]
    fn overflowed_revenue_is_not_written_as_json() {
        // Two maximal sales on one day sum to +inf.
        let raw = vec![
            RawRecord::new("2024-01-01", "p", 1.0, f64::MAX),
            RawRecord::new("2024-01-01", "p", 1.0, f64::MAX),
            RawRecord::new("2024-01-02", "p", 1.0, 1.0),
        ];
        let result = run_pipeline(&raw, &ForecastConfig::with_horizon(2)).unwrap();
        assert!(!result.is_finite());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        let err = write_result_json(&path, &result).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INTERNAL);
        assert!(!path.exists());
    }

    #[test]
    fn forecast_csv_has_header_and_one_row_per_day() {
        let raw = vec![
            RawRecord::new("2024-01-01", "p", 1.0, 10.0),
            RawRecord::new("2024-01-02", "p", 1.0, 20.0),
        ];
        let result = run_pipeline(&raw, &ForecastConfig::with_horizon(2)).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("forecast.csv");
        write_forecast_csv(&path, &result.regression).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            text,
            "date,day,revenue,unclamped_revenue\n2024-01-03,2,30.0000,30.0000\n2024-01-04,3,40.0000,40.0000\n"
        );
    }
}
