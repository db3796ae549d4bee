//! Synthetic sales data generation.
//!
//! Produces a reproducible (seeded) daily transaction log for a few products
//! whose combined revenue follows a linear trend plus Gaussian noise. A
//! fraction of rows can be deliberately corrupted to exercise validation.

use std::path::Path;

use chrono::{Days, NaiveDate};
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::Normal;

use crate::domain::RawRecord;
use crate::error::{AppError, EXIT_INPUT, EXIT_INTERNAL};

/// Products in the synthetic catalog with their unit prices.
const CATALOG: [(&str, f64); 4] = [
    ("Widget", 19.99),
    ("Gadget", 49.5),
    ("Gizmo", 7.25),
    ("Doohickey", 120.0),
];

/// Probability that a given product sells on a given day.
const SALE_PROB: f64 = 0.8;

#[derive(Debug, Clone)]
pub struct SampleConfig {
    pub start: NaiveDate,
    pub days: usize,
    pub seed: u64,
    /// Expected revenue multiplier on day 0.
    pub base_level: f64,
    /// Relative growth of the multiplier per day.
    pub daily_growth: f64,
    /// Relative standard deviation of per-row noise.
    pub noise: f64,
    /// Probability that an emitted row is corrupted.
    pub bad_row_prob: f64,
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            days: 90,
            seed: 42,
            base_level: 1.0,
            daily_growth: 0.01,
            noise: 0.15,
            bad_row_prob: 0.0,
        }
    }
}

/// Generate synthetic raw records.
pub fn generate_sample(config: &SampleConfig) -> Result<Vec<RawRecord>, AppError> {
    if config.days == 0 {
        return Err(AppError::new(EXIT_INPUT, "Sample days must be > 0."));
    }
    if !(0.0..1.0).contains(&config.bad_row_prob) {
        return Err(AppError::new(EXIT_INPUT, "Bad-row probability must be in [0, 1)."));
    }
    if !(config.noise.is_finite() && config.noise >= 0.0) {
        return Err(AppError::new(EXIT_INPUT, "Noise must be finite and >= 0."));
    }

    let mut rng = StdRng::seed_from_u64(config.seed);
    let normal = Normal::new(0.0, config.noise)
        .map_err(|e| AppError::new(EXIT_INTERNAL, format!("Noise distribution error: {e}")))?;

    let mut out = Vec::with_capacity(config.days * CATALOG.len());

    for day in 0..config.days {
        let date = config
            .start
            .checked_add_days(Days::new(day as u64))
            .ok_or_else(|| AppError::new(EXIT_INPUT, "Sample date range overflows the calendar."))?;
        let level = (config.base_level * (1.0 + config.daily_growth * day as f64)).max(0.0);

        for &(product, price) in &CATALOG {
            if !rng.gen_bool(SALE_PROB) {
                continue;
            }

            let quantity = f64::from(rng.gen_range(1u32..=12));
            let shock = 1.0 + normal.sample(&mut rng);
            let revenue = (quantity * price * level * shock).max(0.0);
            let revenue = (revenue * 100.0).round() / 100.0;

            let mut record = RawRecord::new(&date.format("%Y-%m-%d").to_string(), product, quantity, revenue);
            if config.bad_row_prob > 0.0 && rng.gen_bool(config.bad_row_prob) {
                corrupt(&mut record, &mut rng);
            }
            out.push(record);
        }
    }

    log::debug!("sample: generated {} rows over {} days", out.len(), config.days);
    Ok(out)
}

fn corrupt(record: &mut RawRecord, rng: &mut StdRng) {
    match rng.gen_range(0..5) {
        0 => record.date = None,
        1 => record.date = Some("not-a-date".to_string()),
        2 => record.product = None,
        3 => record.quantity = Some(f64::NAN),
        _ => record.revenue = record.revenue.map(|r| -r - 1.0),
    }
}

/// Write raw records as a sales CSV (`date,product,quantity,revenue`).
///
/// Missing values become empty cells and NaN amounts are written as `n/a`.
pub fn write_sample_csv(path: &Path, records: &[RawRecord]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create sample CSV '{}': {e}", path.display())))?;

    writer
        .write_record(["date", "product", "quantity", "revenue"])
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write sample CSV header: {e}")))?;

    for r in records {
        let row = [
            r.date.clone().unwrap_or_default(),
            r.product.clone().unwrap_or_default(),
            fmt_amount(r.quantity),
            fmt_amount(r.revenue),
        ];
        writer
            .write_record(&row)
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write sample CSV row: {e}")))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush sample CSV: {e}")))?;
    Ok(())
}

fn fmt_amount(v: Option<f64>) -> String {
    match v {
        Some(v) if v.is_nan() => "n/a".to_string(),
        Some(v) => v.to_string(),
        None => String::new(),
    }
}
