use std::fs;

use approx::assert_relative_eq;
use chrono::NaiveDate;
use sales_forecast::data::{SampleConfig, generate_sample, write_sample_csv};
use sales_forecast::domain::{DEFAULT_HORIZON, DropReason, ForecastConfig};
use sales_forecast::io::{load_records, read_result_json, write_forecast_csv, write_result_json};
use sales_forecast::{preprocess, run_pipeline, train_and_forecast};

const SALES_CSV: &str = "\
Date,Product,Quantity,Revenue
2024-03-01,Widget,2,100
2024-03-01,Gadget,1,50
2024-03-02,Widget,3,180
2024/03/03,Widget,1,210
2024-03-04,,1,99
2024-03-04,Gizmo,1,abc
2024-03-05,Gizmo,2,-10
2024-03-06T10:15:00,Widget,4,300
";

#[test]
fn csv_to_forecast_and_json_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sales.csv");
    fs::write(&input, SALES_CSV).unwrap();

    let ingested = load_records(&input).unwrap();
    assert_eq!(ingested.records.len(), 8);
    assert!(ingested.row_errors.is_empty());

    let result = run_pipeline(&ingested.records, &ForecastConfig::default()).unwrap();
    let data = &result.data;
    assert_eq!(data.summary.raw_count, 8);
    assert_eq!(data.summary.valid_count, 5);
    assert_eq!(data.dropped_count, 3);
    assert_eq!(data.drop_reasons.get(&DropReason::MissingProduct), Some(&1));
    assert_eq!(data.drop_reasons.get(&DropReason::InvalidRevenue), Some(&1));
    assert_eq!(data.drop_reasons.get(&DropReason::NegativeRevenue), Some(&1));
    assert_eq!(data.drop_reasons.values().sum::<usize>(), data.dropped_count);

    // 03-01 sums two products; slash and datetime forms share the daily key.
    let xs: Vec<i64> = data.series.iter().map(|p| p.x).collect();
    let ys: Vec<f64> = data.series.iter().map(|p| p.y).collect();
    assert_eq!(xs, vec![0, 1, 2, 5]);
    assert_eq!(ys, vec![150.0, 180.0, 210.0, 300.0]);

    let model = &result.regression;
    assert_relative_eq!(model.slope, 30.0, epsilon = 1e-9);
    assert_relative_eq!(model.intercept, 150.0, epsilon = 1e-9);
    assert_relative_eq!(model.r_squared, 1.0, epsilon = 1e-12);
    assert_eq!(model.forecasts.len(), DEFAULT_HORIZON);
    assert_eq!(model.forecasts[0].x, 6);
    assert_eq!(model.forecasts[0].date, NaiveDate::from_ymd_opt(2024, 3, 7).unwrap());
    assert_relative_eq!(model.forecasts[0].y, 330.0, epsilon = 1e-9);

    let json = dir.path().join("result.json");
    write_result_json(&json, &result).unwrap();
    let back = read_result_json(&json).unwrap();
    assert_eq!(back.data.series.len(), result.data.series.len());
    assert_eq!(back.data.drop_reasons, result.data.drop_reasons);
    assert_eq!(back.regression.forecasts.len(), DEFAULT_HORIZON);
    assert_relative_eq!(back.regression.slope, model.slope, epsilon = 1e-9);
    assert_eq!(back.regression.forecasts[29].date, model.forecasts[29].date);
}

#[test]
fn forecast_csv_export_marks_unclamped_values() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("falling.csv");
    fs::write(
        &input,
        "date,product,quantity,revenue\n2024-01-01,p,1,100\n2024-01-02,p,1,50\n",
    )
    .unwrap();

    let ingested = load_records(&input).unwrap();
    let result = run_pipeline(&ingested.records, &ForecastConfig::with_horizon(3)).unwrap();

    let out = dir.path().join("forecast.csv");
    write_forecast_csv(&out, &result.regression).unwrap();
    let text = fs::read_to_string(&out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "date,day,revenue,unclamped_revenue");
    assert_eq!(lines[1], "2024-01-03,2,0.0000,0.0000");
    assert_eq!(lines[2], "2024-01-04,3,0.0000,-50.0000");
    assert_eq!(lines.len(), 4);
}

#[test]
fn missing_columns_is_an_input_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.csv");
    fs::write(&input, "date,product\n2024-01-01,p\n").unwrap();

    let err = load_records(&input).unwrap_err();
    assert_eq!(err.exit_code(), 2);
    assert!(err.message().contains("quantity, revenue"));
}

#[test]
fn sample_file_feeds_the_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sample.csv");
    let config = SampleConfig {
        bad_row_prob: 0.1,
        ..SampleConfig::default()
    };
    let raw = generate_sample(&config).unwrap();
    write_sample_csv(&path, &raw).unwrap();

    let ingested = load_records(&path).unwrap();
    assert_eq!(ingested.records.len(), raw.len());

    let data = preprocess(&ingested.records).unwrap();
    assert!(data.dropped_count > 0);
    assert_eq!(data.summary.raw_count, raw.len());
    assert!(data.series.windows(2).all(|w| w[0].x < w[1].x));

    let model = train_and_forecast(&data.series).unwrap();
    assert!(model.slope > 0.0);
    assert!((0.0..=1.0).contains(&model.r_squared));
    assert_eq!(model.predictions.len(), data.series.len());
    assert!(model.forecasts.iter().all(|p| p.y >= 0.0));
}

#[test]
fn nothing_valid_is_insufficient() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("junk.csv");
    fs::write(&input, "date,product,quantity,revenue\nnope,p,1,1\n2024-01-01,p,x,1\n").unwrap();

    let ingested = load_records(&input).unwrap();
    let err = preprocess(&ingested.records).unwrap_err();
    let app: sales_forecast::AppError = err.into();
    assert_eq!(app.exit_code(), 3);
}
