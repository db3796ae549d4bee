//! Record validation.
//!
//! A raw record is kept only if every check passes; nothing is repaired.
//! Survivors keep their input order. Failures are counted per reason, never raised.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::domain::{DropReason, RawRecord, ValidatedRecord};

/// Validator output: survivors in input order plus what was dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Validation {
    pub records: Vec<ValidatedRecord>,
    /// `(input index, reason)` for each dropped record.
    pub dropped: Vec<(usize, DropReason)>,
}

impl Validation {
    pub fn dropped_count(&self) -> usize {
        self.dropped.len()
    }

    pub fn reason_counts(&self) -> BTreeMap<DropReason, usize> {
        let mut counts = BTreeMap::new();
        for (_, reason) in &self.dropped {
            *counts.entry(*reason).or_insert(0) += 1;
        }
        counts
    }
}

/// Filter raw records down to those usable for analysis.
pub fn validate(raw: &[RawRecord]) -> Validation {
    let mut out = Validation {
        records: Vec::with_capacity(raw.len()),
        dropped: Vec::new(),
    };

    for (idx, record) in raw.iter().enumerate() {
        match check_record(record) {
            Ok(valid) => out.records.push(valid),
            Err(reason) => out.dropped.push((idx, reason)),
        }
    }

    log::debug!(
        "validate: {} raw, {} kept, {} dropped",
        raw.len(),
        out.records.len(),
        out.dropped.len()
    );
    out
}

/// Run every check on one record, reporting the first failure.
pub fn check_record(record: &RawRecord) -> Result<ValidatedRecord, DropReason> {
    let date_str = non_empty(record.date.as_deref()).ok_or(DropReason::MissingDate)?;
    let date = parse_date(date_str).ok_or(DropReason::InvalidDate)?;

    let product = non_empty(record.product.as_deref()).ok_or(DropReason::MissingProduct)?;

    let quantity = check_amount(
        record.quantity,
        DropReason::MissingQuantity,
        DropReason::InvalidQuantity,
        DropReason::NegativeQuantity,
    )?;
    let revenue = check_amount(
        record.revenue,
        DropReason::MissingRevenue,
        DropReason::InvalidRevenue,
        DropReason::NegativeRevenue,
    )?;

    Ok(ValidatedRecord {
        date,
        product: product.to_string(),
        quantity,
        revenue,
    })
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}

fn check_amount(
    value: Option<f64>,
    missing: DropReason,
    invalid: DropReason,
    negative: DropReason,
) -> Result<f64, DropReason> {
    let v = value.ok_or(missing)?;
    if !v.is_finite() {
        return Err(invalid);
    }
    if v < 0.0 {
        return Err(negative);
    }
    Ok(v)
}

/// Parse a calendar date, discarding any time-of-day component.
///
/// ISO dates (`YYYY-MM-DD`) are preferred, but exports often use slashes,
/// US month-first layouts (`MM/DD/YYYY`), or carry a timestamp. Parsing is
/// deterministic: formats are tried in a fixed order and the first match wins.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    const DATE_FMTS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%m-%d-%Y"];
    const DATETIME_FMTS: [&str; 5] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
    ];

    let s = s.trim();
    for fmt in DATE_FMTS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }
    for fmt in DATETIME_FMTS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    // Offset-qualified timestamps keep the calendar date as written.
    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}
