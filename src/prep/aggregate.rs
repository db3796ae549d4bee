//! Daily aggregation and summary statistics.
//!
//! Validated records are grouped by canonical calendar date and their revenue
//! summed. The earliest date becomes day 0; every other day's `x` is the whole
//! number of calendar days since then. Days with no records produce no point.

use std::collections::{BTreeMap, HashSet};

use crate::domain::{DateRange, SalesSummary, TimeSeriesPoint, ValidatedRecord};
use crate::error::{PipelineError, Stage};

/// Collapse validated records into one revenue point per distinct date.
pub fn aggregate(records: &[ValidatedRecord]) -> Result<Vec<TimeSeriesPoint>, PipelineError> {
    // Keyed by `NaiveDate`, so ordering is chronological and textual variants
    // of the same day share a bucket.
    let mut daily: BTreeMap<_, f64> = BTreeMap::new();
    for r in records {
        *daily.entry(r.date).or_insert(0.0) += r.revenue;
    }

    let Some(&first) = daily.keys().next() else {
        return Err(PipelineError::insufficient(Stage::Aggregate, 1, 0));
    };

    let series: Vec<TimeSeriesPoint> = daily
        .into_iter()
        .map(|(date, revenue)| TimeSeriesPoint {
            x: (date - first).num_days(),
            y: revenue,
            date,
            original_revenue: revenue,
        })
        .collect();

    log::debug!(
        "aggregate: {} records -> {} daily points starting {first}",
        records.len(),
        series.len()
    );
    Ok(series)
}

/// Summary statistics over the validated records.
///
/// Returns `None` when there are no records (no date range exists).
pub fn summarize(raw_count: usize, records: &[ValidatedRecord]) -> Option<SalesSummary> {
    let start = records.iter().map(|r| r.date).min()?;
    let end = records.iter().map(|r| r.date).max()?;

    let total_revenue: f64 = records.iter().map(|r| r.revenue).sum();
    let products: HashSet<&str> = records.iter().map(|r| r.product.as_str()).collect();

    Some(SalesSummary {
        raw_count,
        valid_count: records.len(),
        total_revenue,
        average_revenue: total_revenue / records.len() as f64,
        product_count: products.len(),
        date_range: DateRange { start, end },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn rec(date: NaiveDate, product: &str, revenue: f64) -> ValidatedRecord {
        ValidatedRecord {
            date,
            product: product.to_string(),
            quantity: 1.0,
            revenue,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sums_per_day_and_sorts() {
        let records = vec![
            rec(ymd(2024, 1, 3), "a", 5.0),
            rec(ymd(2024, 1, 1), "a", 100.0),
            rec(ymd(2024, 1, 3), "b", 7.5),
            rec(ymd(2024, 1, 1), "b", 20.0),
        ];

        let series = aggregate(&records).unwrap();
        assert_eq!(series.len(), 2);

        assert_eq!(series[0].x, 0);
        assert_eq!(series[0].date, ymd(2024, 1, 1));
        assert_eq!(series[0].y, 120.0);
        assert_eq!(series[0].original_revenue, 120.0);

        // Jan 2 has no records: no zero-filled point, x skips to 2.
        assert_eq!(series[1].x, 2);
        assert_eq!(series[1].y, 12.5);
    }

    #[test]
    fn day_offsets_cross_month_and_leap_year_boundaries() {
        let records = vec![
            rec(ymd(2023, 12, 31), "a", 1.0),
            rec(ymd(2024, 2, 28), "a", 1.0),
            rec(ymd(2024, 3, 1), "a", 1.0),
        ];

        let series = aggregate(&records).unwrap();
        let xs: Vec<i64> = series.iter().map(|p| p.x).collect();
        // 2024 is a leap year: Feb 29 sits between Feb 28 and Mar 1.
        assert_eq!(xs, vec![0, 59, 61]);
    }

    #[test]
    fn series_is_strictly_increasing() {
        let records: Vec<_> = [5, 1, 9, 1, 3, 9]
            .iter()
            .map(|&d| rec(ymd(2024, 6, d), "p", d as f64))
            .collect();

        let series = aggregate(&records).unwrap();
        assert_eq!(series[0].x, 0);
        for w in series.windows(2) {
            assert!(w[1].x > w[0].x);
            assert!(w[1].date > w[0].date);
        }
    }

    #[test]
    fn empty_input_is_insufficient() {
        let err = aggregate(&[]).unwrap_err();
        assert_eq!(
            err,
            PipelineError::InsufficientData {
                stage: Stage::Aggregate,
                required: 1,
                actual: 0
            }
        );
    }

    #[test]
    fn summary_counts_products_and_range() {
        let records = vec![
            rec(ymd(2024, 1, 2), "a", 10.0),
            rec(ymd(2024, 1, 1), "b", 20.0),
            rec(ymd(2024, 1, 5), "a", 30.0),
        ];

        let s = summarize(4, &records).unwrap();
        assert_eq!(s.raw_count, 4);
        assert_eq!(s.valid_count, 3);
        assert_eq!(s.total_revenue, 60.0);
        assert_eq!(s.average_revenue, 20.0);
        assert_eq!(s.product_count, 2);
        assert_eq!(s.date_range.start, ymd(2024, 1, 1));
        assert_eq!(s.date_range.end, ymd(2024, 1, 5));

        assert!(summarize(0, &[]).is_none());
    }
}
