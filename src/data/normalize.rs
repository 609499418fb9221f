use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use super::model::{
    CATEGORY, HOVER_LABEL, NUMERIC_COLUMNS, ON_SALE_DATE, RawTable, Record, Schema,
};

/// Date-only layouts tried in order.  Four-digit years come before `%y`.
const DATE_FORMATS: [&str; 8] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%m/%d/%y",
    "%Y%m%d",
    "%d-%b-%Y",
    "%B %d, %Y",
    "%b %d, %Y",
];

/// `%.f` also matches when there is no fractional part.
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// `%Y` accepts as little as one digit, so `3/4/21` read as `%Y/%m/%d`
/// lands in year 3.  Anything before this is treated as a misparse.
const MIN_YEAR: i32 = 1000;

// ---------------------------------------------------------------------------
// Table normalizer
// ---------------------------------------------------------------------------

/// Coerce every raw row into a typed [`Record`].
///
/// Never fails: unparseable dates and numbers become `None`, absent optional
/// columns stay `None` in every record.
pub fn normalize(raw: &RawTable, schema: &Schema) -> Vec<Record> {
    let label_idx = raw.column_index(HOVER_LABEL);
    let date_idx = raw.column_index(ON_SALE_DATE);
    let category_idx = raw.column_index(CATEGORY);
    let numeric_idx: Vec<(&str, usize)> = NUMERIC_COLUMNS
        .iter()
        .filter_map(|c| raw.column_index(c).map(|i| (*c, i)))
        .collect();
    let extra_idx: Vec<(&String, usize)> = schema
        .extra_columns
        .iter()
        .filter_map(|c| raw.column_index(c).map(|i| (c, i)))
        .collect();

    let cell = |row: &[String], idx: Option<usize>| -> Option<String> {
        idx.and_then(|i| row.get(i)).map(|v| v.trim().to_string())
    };

    raw.rows
        .iter()
        .map(|row| {
            let mut record = Record {
                label: cell(row, label_idx).unwrap_or_default(),
                category: category_idx
                    .and_then(|i| row.get(i))
                    .filter(|c| !c.is_empty())
                    .cloned(),
                on_sale_date: cell(row, date_idx).and_then(|d| canonical_date(&d)),
                extra: BTreeMap::new(),
                ..Record::default()
            };

            for &(column, idx) in &numeric_idx {
                if let Some(slot) = record.numeric_mut(column) {
                    *slot = row.get(idx).and_then(|v| parse_number(v));
                }
            }

            for &(column, idx) in &extra_idx {
                if let Some(v) = row.get(idx) {
                    record.extra.insert(column.clone(), v.clone());
                }
            }

            record
        })
        .collect()
}

/// Parse a numeric cell.  Empty, non-numeric and non-finite values are missing.
pub fn parse_number(s: &str) -> Option<f64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Parse a date cell in any supported layout.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    let plausible = |d: &NaiveDate| d.year() >= MIN_YEAR;

    if let Some(d) = DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.date_naive())
        .filter(plausible)
    {
        return Some(d);
    }
    let from_datetime = DATETIME_FORMATS.iter().find_map(|fmt| {
        NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .map(|dt| dt.date())
            .filter(plausible)
    });
    from_datetime.or_else(|| {
        DATE_FORMATS.iter().find_map(|fmt| {
            NaiveDate::parse_from_str(s, fmt)
                .ok()
                .filter(plausible)
        })
    })
}

/// Canonical `YYYY-MM-DD` form, or `None` when the cell is not a date.
pub fn canonical_date(s: &str) -> Option<String> {
    parse_date(s).map(|d| d.format("%Y-%m-%d").to_string())
}
