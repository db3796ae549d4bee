//! CSV ingest.
//!
//! Turns a sales CSV into `RawRecord`s. This is a thin decoder: it checks the
//! header schema and splits cells, but applies no validation predicate. Bad
//! values are passed through for the validator to drop and count.
//!
//! - Header names are trimmed, lowercased and BOM-stripped.
//! - Required columns: `date`, `product`, `quantity`, `revenue` (any order,
//!   extra columns ignored).
//! - Rows whose field count differs from the header are skipped and reported.
//! - Empty cells decode to `None`; non-numeric amounts decode to NaN.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::RawRecord;
use crate::error::{AppError, EXIT_INPUT};

pub const REQUIRED_COLUMNS: [&str; 4] = ["date", "product", "quantity", "revenue"];

/// A CSV row that could not be decoded into a record.
#[derive(Debug, Clone, PartialEq)]
pub struct RowError {
    /// 1-based line number (header is line 1).
    pub line: usize,
    pub message: String,
}

/// Ingest output: decoded records plus skipped rows.
#[derive(Debug, Clone, Default)]
pub struct IngestedRecords {
    pub records: Vec<RawRecord>,
    pub row_errors: Vec<RowError>,
    pub rows_read: usize,
}

/// Load raw records from a CSV file.
pub fn load_records(path: &Path) -> Result<IngestedRecords, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let out = read_records(file)
        .map_err(|e| AppError::new(e.exit_code(), format!("{}: {}", path.display(), e.message())))?;

    log::info!(
        "ingest {}: {} rows read, {} decoded, {} skipped",
        path.display(),
        out.rows_read,
        out.records.len(),
        out.row_errors.len()
    );
    Ok(out)
}

/// Decode raw records from any CSV source.
pub fn read_records<R: Read>(source: R) -> Result<IngestedRecords, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut out = IngestedRecords::default();

    for (idx, result) in reader.records().enumerate() {
        // +2: records start on the line after the header, lines are 1-based.
        let line = idx + 2;
        out.rows_read += 1;

        let record = match result {
            Ok(r) => r,
            Err(e) => {
                log::debug!("skipping line {line}: {e}");
                out.row_errors.push(RowError {
                    line,
                    message: format!("CSV parse error: {e}"),
                });
                continue;
            }
        };

        if record.len() != headers.len() {
            let message = format!("expected {} fields, found {}", headers.len(), record.len());
            log::debug!("skipping line {line}: {message}");
            out.row_errors.push(RowError { line, message });
            continue;
        }

        out.records.push(decode_row(&record, &header_map));
    }

    Ok(out)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Spreadsheet exports often prefix the first header with a UTF-8 BOM.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|c| !header_map.contains_key(*c))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::new(
            EXIT_INPUT,
            format!("Missing required columns: {}", missing.join(", ")),
        ))
    }
}

fn decode_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> RawRecord {
    RawRecord {
        date: get_cell(record, header_map, "date").map(str::to_string),
        product: get_cell(record, header_map, "product").map(str::to_string),
        quantity: get_cell(record, header_map, "quantity").map(parse_amount),
        revenue: get_cell(record, header_map, "revenue").map(parse_amount),
    }
}

fn get_cell<'a>(record: &'a StringRecord, header_map: &HashMap<String, usize>, name: &str) -> Option<&'a str> {
    let idx = header_map.get(name)?;
    record.get(*idx).map(str::trim).filter(|s| !s.is_empty())
}

fn parse_amount(s: &str) -> f64 {
    s.parse::<f64>().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_rows_in_any_column_order() {
        let csv = "\u{feff}Revenue, Product ,DATE,quantity,region\n\
                   100.5,Widget,2024-01-01,2,north\n\
                   ,Gadget,2024-01-02,abc,south\n";
        let out = read_records(csv.as_bytes()).unwrap();

        assert_eq!(out.rows_read, 2);
        assert!(out.row_errors.is_empty());
        assert_eq!(out.records[0], RawRecord::new("2024-01-01", "Widget", 2.0, 100.5));

        let second = &out.records[1];
        assert_eq!(second.revenue, None);
        assert!(second.quantity.unwrap().is_nan());
    }

    #[test]
    fn missing_columns_are_listed() {
        let err = read_records("date,product\n2024-01-01,a\n".as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), EXIT_INPUT);
        assert_eq!(err.message(), "Missing required columns: quantity, revenue");
    }

    #[test]
    fn short_rows_are_skipped_with_line_numbers() {
        let csv = "date,product,quantity,revenue\n\
                   2024-01-01,a,1,10\n\
                   2024-01-02,a,1\n\
                   2024-01-03,a,1,30\n";
        let out = read_records(csv.as_bytes()).unwrap();
        assert_eq!(out.rows_read, 3);
        assert_eq!(out.records.len(), 2);
        assert_eq!(out.row_errors.len(), 1);
        assert_eq!(out.row_errors[0].line, 3);
    }
}
