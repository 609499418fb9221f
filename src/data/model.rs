use std::collections::BTreeMap;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const ON_SALE_DATE: &str = "On_Sale_Date";
pub const LIST_PRICE: &str = "List_Price";
pub const QUAL_SCORE: &str = "qual_score";
pub const AVG_ANNUAL_UNITS: &str = "avg_annual_units";
pub const HOVER_LABEL: &str = "hover_label";
pub const PAGE_COUNT: &str = "Page_Count";
pub const TITLE_AGE: &str = "Title_Age";
pub const RATING: &str = "amazonaveragerating";
pub const REVIEW_COUNT: &str = "amazontotalreviews";
pub const UNITS_2024: &str = "2024_units";
pub const UNITS_2025: &str = "2025_units";
pub const CATEGORY: &str = "Suggested Position Category";

/// Columns the chart cannot be drawn without.
pub const REQUIRED_COLUMNS: [&str; 5] =
    [ON_SALE_DATE, LIST_PRICE, QUAL_SCORE, AVG_ANNUAL_UNITS, HOVER_LABEL];

/// Columns coerced to numbers by the normalizer.
pub const NUMERIC_COLUMNS: [&str; 9] = [
    LIST_PRICE,
    QUAL_SCORE,
    AVG_ANNUAL_UNITS,
    PAGE_COUNT,
    TITLE_AGE,
    RATING,
    REVIEW_COUNT,
    UNITS_2024,
    UNITS_2025,
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum DataError {
    #[error("reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column(s): {}", .0.join(", "))]
    MissingColumns(Vec<String>),
    #[error("the file contains no data rows")]
    EmptyTable,
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
}

// ---------------------------------------------------------------------------
// RawTable – cells exactly as read from the file
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ---------------------------------------------------------------------------
// Schema – required columns plus capability flags for the optional ones
// ---------------------------------------------------------------------------

/// Which optional columns the uploaded file carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Capabilities {
    pub has_category: bool,
    pub has_page_count: bool,
    pub has_title_age: bool,
    pub has_rating: bool,
    pub has_review_count: bool,
    pub has_units_2024: bool,
    pub has_units_2025: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    pub capabilities: Capabilities,
    /// Header names outside the known column set, in file order.
    pub extra_columns: Vec<String>,
}

impl Schema {
    /// Single upfront pass over the header row.
    pub fn detect(headers: &[String]) -> Result<Self, DataError> {
        let has = |name: &str| headers.iter().any(|h| h == name);

        let missing: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .filter(|c| !has(c))
            .map(|c| c.to_string())
            .collect();
        if !missing.is_empty() {
            return Err(DataError::MissingColumns(missing));
        }

        let capabilities = Capabilities {
            has_category: has(CATEGORY),
            has_page_count: has(PAGE_COUNT),
            has_title_age: has(TITLE_AGE),
            has_rating: has(RATING),
            has_review_count: has(REVIEW_COUNT),
            has_units_2024: has(UNITS_2024),
            has_units_2025: has(UNITS_2025),
        };

        let extra_columns = headers
            .iter()
            .filter(|h| {
                h.as_str() != ON_SALE_DATE
                    && h.as_str() != HOVER_LABEL
                    && h.as_str() != CATEGORY
                    && !NUMERIC_COLUMNS.contains(&h.as_str())
            })
            .cloned()
            .collect();

        Ok(Schema {
            capabilities,
            extra_columns,
        })
    }
}

// ---------------------------------------------------------------------------
// Record – one title, normalized
// ---------------------------------------------------------------------------

/// One normalized row. `None` is the missing marker.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    pub label: String,
    pub category: Option<String>,
    pub list_price: Option<f64>,
    pub qual_score: Option<f64>,
    pub avg_annual_units: Option<f64>,
    pub page_count: Option<f64>,
    pub title_age: Option<f64>,
    pub rating: Option<f64>,
    pub review_count: Option<f64>,
    pub units_2024: Option<f64>,
    pub units_2025: Option<f64>,
    /// Canonical `YYYY-MM-DD`.
    pub on_sale_date: Option<String>,
    /// Unrecognised columns, verbatim.
    pub extra: BTreeMap<String, String>,
}

impl Record {
    /// Value of a numeric column by its header name.
    pub fn numeric(&self, column: &str) -> Option<f64> {
        match column {
            LIST_PRICE => self.list_price,
            QUAL_SCORE => self.qual_score,
            AVG_ANNUAL_UNITS => self.avg_annual_units,
            PAGE_COUNT => self.page_count,
            TITLE_AGE => self.title_age,
            RATING => self.rating,
            REVIEW_COUNT => self.review_count,
            UNITS_2024 => self.units_2024,
            UNITS_2025 => self.units_2025,
            _ => None,
        }
    }

    pub(crate) fn numeric_mut(&mut self, column: &str) -> Option<&mut Option<f64>> {
        match column {
            LIST_PRICE => Some(&mut self.list_price),
            QUAL_SCORE => Some(&mut self.qual_score),
            AVG_ANNUAL_UNITS => Some(&mut self.avg_annual_units),
            PAGE_COUNT => Some(&mut self.page_count),
            TITLE_AGE => Some(&mut self.title_age),
            RATING => Some(&mut self.rating),
            REVIEW_COUNT => Some(&mut self.review_count),
            UNITS_2024 => Some(&mut self.units_2024),
            UNITS_2025 => Some(&mut self.units_2025),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Table – normalized rows, last one reserved as the reference
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub schema: Schema,
    main: Vec<Record>,
    reference: Record,
}

impl Table {
    /// The last record becomes the reference.  Fails with
    /// [`DataError::EmptyTable`] when there are no rows.
    pub fn new(schema: Schema, mut records: Vec<Record>) -> Result<Self, DataError> {
        let reference = records.pop().ok_or(DataError::EmptyTable)?;
        Ok(Table {
            schema,
            main: records,
            reference,
        })
    }

    /// Main rows (all but the last) and the reference record.
    pub fn split_reference(&self) -> (&[Record], &Record) {
        (&self.main, &self.reference)
    }

    pub fn main_rows(&self) -> &[Record] {
        &self.main
    }

    pub fn reference(&self) -> &Record {
        &self.reference
    }

    /// Row count including the reference; never zero.
    pub fn row_count(&self) -> usize {
        self.main.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn detect_reports_every_missing_required_column() {
        let err = Schema::detect(&headers(&[LIST_PRICE, HOVER_LABEL])).unwrap_err();
        match err {
            DataError::MissingColumns(cols) => {
                assert_eq!(cols, vec![ON_SALE_DATE, QUAL_SCORE, AVG_ANNUAL_UNITS]);
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn detect_sets_capabilities_and_extras() {
        let mut names = REQUIRED_COLUMNS.to_vec();
        names.extend([CATEGORY, UNITS_2024, "ISBN"]);
        let schema = Schema::detect(&headers(&names)).unwrap();
        assert!(schema.capabilities.has_category);
        assert!(schema.capabilities.has_units_2024);
        assert!(!schema.capabilities.has_units_2025);
        assert!(!schema.capabilities.has_rating);
        assert_eq!(schema.extra_columns, vec!["ISBN".to_string()]);
    }

    #[test]
    fn empty_table_is_rejected() {
        let schema = Schema::detect(&headers(&REQUIRED_COLUMNS)).unwrap();
        assert!(matches!(
            Table::new(schema, Vec::new()),
            Err(DataError::EmptyTable)
        ));
    }

    #[test]
    fn reference_is_always_the_last_record() {
        let schema = Schema::detect(&headers(&REQUIRED_COLUMNS)).unwrap();
        let records: Vec<Record> = (0..4)
            .map(|i| Record {
                label: format!("t{i}"),
                ..Record::default()
            })
            .collect();
        let table = Table::new(schema, records).unwrap();
        let (main, reference) = table.split_reference();
        assert_eq!(main.len(), 3);
        assert_eq!(reference.label, "t3");
    }

    #[test]
    fn single_row_table_has_no_main_rows() {
        let schema = Schema::detect(&headers(&REQUIRED_COLUMNS)).unwrap();
        let table = Table::new(schema, vec![Record::default()]).unwrap();
        assert!(table.main_rows().is_empty());
    }
}
