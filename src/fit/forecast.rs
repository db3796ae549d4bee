//! Forward projection of a fitted trend.
//!
//! Projects `horizon` consecutive days past the last observed day. Projected
//! revenue is clamped at 0; the unclamped value is kept in `original_revenue`.

use chrono::Days;

use crate::domain::TimeSeriesPoint;
use crate::error::{PipelineError, Stage};
use crate::math::Line;

/// Project the line `horizon` days past the end of `series`.
pub fn forecast(series: &[TimeSeriesPoint], line: Line, horizon: usize) -> Result<Vec<TimeSeriesPoint>, PipelineError> {
    let last = series
        .iter()
        .max_by_key(|p| p.x)
        .ok_or_else(|| PipelineError::insufficient(Stage::Forecast, 1, 0))?;

    let out_of_range = PipelineError::DateOutOfRange {
        last: last.date,
        horizon,
    };
    // Reject up front so an oversized horizon fails before building any points.
    if last.date.checked_add_days(Days::new(horizon as u64)).is_none() {
        return Err(out_of_range);
    }

    let out = (1..=horizon as u64)
        .map(|i| {
            let date = last
                .date
                .checked_add_days(Days::new(i))
                .ok_or_else(|| out_of_range.clone())?;
            let x = last.x + i as i64;
            let raw = line.eval(x as f64);
            Ok(TimeSeriesPoint {
                x,
                y: raw.max(0.0),
                date,
                original_revenue: raw,
            })
        })
        .collect::<Result<Vec<_>, PipelineError>>()?;

    log::debug!(
        "forecast: {} days from x={} ({})",
        out.len(),
        last.x,
        last.date
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DEFAULT_HORIZON;
    use chrono::NaiveDate;

    fn point(x: i64, date: NaiveDate, y: f64) -> TimeSeriesPoint {
        TimeSeriesPoint {
            x,
            y,
            date,
            original_revenue: y,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn projects_contiguous_days_after_last_point() {
        let series = vec![point(0, ymd(2024, 1, 1), 100.0), point(1, ymd(2024, 1, 2), 200.0)];
        let line = Line {
            slope: 100.0,
            intercept: 100.0,
        };

        let out = forecast(&series, line, DEFAULT_HORIZON).unwrap();
        assert_eq!(out.len(), 30);
        assert_eq!(out[0].x, 2);
        assert_eq!(out[0].date, ymd(2024, 1, 3));
        assert!((out[0].y - 300.0).abs() < 1e-9);

        for (i, w) in out.windows(2).enumerate() {
            assert_eq!(w[1].x, w[0].x + 1, "row {i}");
            assert_eq!(w[1].date, w[0].date.succ_opt().unwrap(), "row {i}");
        }
        assert_eq!(out[29].x, 31);
    }

    #[test]
    fn dates_roll_over_month_and_year_ends() {
        let series = vec![point(0, ymd(2023, 12, 1), 1.0), point(30, ymd(2023, 12, 31), 2.0)];
        let out = forecast(&series, Line { slope: 0.0, intercept: 1.0 }, 31).unwrap();
        assert_eq!(out[0].date, ymd(2024, 1, 1));
        assert_eq!(out[30].date, ymd(2024, 1, 31));
    }

    #[test]
    fn negative_projection_is_clamped_but_kept_raw() {
        let series = vec![point(0, ymd(2024, 1, 1), 50.0), point(1, ymd(2024, 1, 2), 10.0)];
        let line = Line {
            slope: -40.0,
            intercept: 50.0,
        };

        let out = forecast(&series, line, DEFAULT_HORIZON).unwrap();
        assert!(out.iter().all(|p| p.y >= 0.0));
        // x=2 -> -30
        assert_eq!(out[0].y, 0.0);
        assert!((out[0].original_revenue + 30.0).abs() < 1e-9);
    }

    #[test]
    fn alternate_horizon() {
        let series = vec![point(0, ymd(2024, 1, 1), 1.0)];
        let line = Line { slope: 1.0, intercept: 0.0 };
        assert_eq!(forecast(&series, line, 7).unwrap().len(), 7);
        assert!(forecast(&series, line, 0).unwrap().is_empty());
    }

    #[test]
    fn projection_past_calendar_end_is_an_error() {
        let end = NaiveDate::MAX;
        let series = vec![point(0, end - chrono::Days::new(1), 1.0), point(1, end, 2.0)];
        let line = Line { slope: 1.0, intercept: 1.0 };

        assert_eq!(
            forecast(&series, line, DEFAULT_HORIZON).unwrap_err(),
            PipelineError::DateOutOfRange {
                last: end,
                horizon: DEFAULT_HORIZON
            }
        );
        // Nothing to project, nothing to overflow.
        assert!(forecast(&series, line, 0).unwrap().is_empty());
    }

    #[test]
    fn empty_series_is_insufficient() {
        let line = Line { slope: 1.0, intercept: 0.0 };
        assert!(matches!(
            forecast(&[], line, 30),
            Err(PipelineError::InsufficientData {
                stage: Stage::Forecast,
                ..
            })
        ));
    }
}
