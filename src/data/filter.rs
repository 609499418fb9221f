use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::model::{Record, Table};

// ---------------------------------------------------------------------------
// Filter selection: what the user picked in the side panel
// ---------------------------------------------------------------------------

/// Closed price interval, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub fn new(min: f64, max: f64) -> Self {
        PriceRange { min, max }
    }

    pub fn contains(&self, price: f64) -> bool {
        self.min <= price && price <= self.max
    }
}

/// Per-run filter state, built fresh from the widgets on every change.
///
/// * `categories: None` or an empty set → no category constraint.
/// * `price: None` → no price constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub categories: Option<BTreeSet<String>>,
    pub price: Option<PriceRange>,
}

impl FilterSelection {
    /// Everything selected: all observed categories and the full observed price span.
    pub fn defaults(table: &Table) -> Self {
        let main = table.main_rows();
        let categories = table
            .schema
            .capabilities
            .has_category
            .then(|| category_options(main).into_iter().collect::<BTreeSet<_>>());

        let mut selection = FilterSelection {
            categories,
            price: None,
        };
        selection.price = selection.price_bounds(table);
        selection
    }

    /// Price span of the main rows that pass the category choice.
    pub fn price_bounds(&self, table: &Table) -> Option<PriceRange> {
        price_bounds(
            table
                .main_rows()
                .iter()
                .filter(|r| self.accepts_category(table, r)),
        )
    }

    fn category_filter_active(&self, table: &Table) -> Option<&BTreeSet<String>> {
        if !table.schema.capabilities.has_category {
            return None;
        }
        self.categories.as_ref().filter(|set| !set.is_empty())
    }

    fn accepts_category(&self, table: &Table, record: &Record) -> bool {
        match self.category_filter_active(table) {
            Some(selected) => record
                .category
                .as_ref()
                .is_some_and(|c| selected.contains(c)),
            None => true,
        }
    }

    fn accepts_price(&self, record: &Record) -> bool {
        match &self.price {
            Some(range) => record.list_price.is_some_and(|p| range.contains(p)),
            None => true,
        }
    }
}

// ---------------------------------------------------------------------------
// Widget defaults
// ---------------------------------------------------------------------------

/// Sorted distinct non-missing categories.
pub fn category_options(rows: &[Record]) -> Vec<String> {
    rows.iter()
        .filter_map(|r| r.category.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Observed price span rounded to cents, `None` when no row has a price.
pub fn price_bounds<'a, I>(rows: I) -> Option<PriceRange>
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut bounds: Option<(f64, f64)> = None;
    for price in rows.into_iter().filter_map(|r| r.list_price) {
        bounds = Some(match bounds {
            Some((lo, hi)) => (lo.min(price), hi.max(price)),
            None => (price, price),
        });
    }
    bounds.map(|(lo, hi)| PriceRange::new(round2(lo), round2(hi)))
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

// ---------------------------------------------------------------------------
// Filter engine
// ---------------------------------------------------------------------------

/// Return indices (into `table.main_rows()`) of rows passing the selection.
///
/// The reference record is never a candidate. Order is preserved.
pub fn filtered_indices(table: &Table, selection: &FilterSelection) -> Vec<usize> {
    let indices: Vec<usize> = table
        .main_rows()
        .iter()
        .enumerate()
        .filter(|(_, r)| selection.accepts_category(table, r) && selection.accepts_price(r))
        .map(|(i, _)| i)
        .collect();
    log::debug!(
        "filter kept {} of {} main rows",
        indices.len(),
        table.main_rows().len()
    );
    indices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Schema, REQUIRED_COLUMNS, CATEGORY};

    fn record(label: &str, category: Option<&str>, price: Option<f64>) -> Record {
        Record {
            label: label.to_string(),
            category: category.map(str::to_string),
            list_price: price,
            ..Record::default()
        }
    }

    fn table(with_category: bool, records: Vec<Record>) -> Table {
        let mut headers: Vec<String> = REQUIRED_COLUMNS.iter().map(|s| s.to_string()).collect();
        if with_category {
            headers.push(CATEGORY.to_string());
        }
        Table::new(Schema::detect(&headers).unwrap(), records).unwrap()
    }

    fn sample() -> Table {
        table(
            true,
            vec![
                record("a", Some("Core"), Some(10.0)),
                record("b", Some("Niche"), Some(20.0)),
                record("c", None, Some(15.0)),
                record("d", Some("Core"), Some(30.004)),
                record("e", Some("Core"), None),
                record("ref", Some("Ref"), Some(1000.0)),
            ],
        )
    }

    fn set(items: &[&str]) -> Option<BTreeSet<String>> {
        Some(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn reference_row_is_never_a_candidate() {
        let t = sample();
        let all = filtered_indices(&t, &FilterSelection::default());
        assert_eq!(all, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn defaults_select_everything_observed_in_main_rows() {
        let t = sample();
        let defaults = FilterSelection::defaults(&t);
        assert_eq!(defaults.categories, set(&["Core", "Niche"]));
        assert_eq!(defaults.price, Some(PriceRange::new(10.0, 30.0)));
    }

    #[test]
    fn default_filter_drops_missing_category_and_price() {
        let t = sample();
        let kept = filtered_indices(&t, &FilterSelection::defaults(&t));
        // "c" has no category, "e" no price, "d" rounds outside the slider span
        assert_eq!(kept, vec![0, 1]);
    }

    #[test]
    fn price_interval_is_inclusive() {
        let t = sample();
        let sel = FilterSelection {
            categories: None,
            price: Some(PriceRange::new(15.0, 20.0)),
        };
        assert_eq!(filtered_indices(&t, &sel), vec![1, 2]);
    }

    #[test]
    fn empty_category_selection_means_no_category_filter() {
        let t = sample();
        let sel = FilterSelection {
            categories: set(&[]),
            price: None,
        };
        assert_eq!(filtered_indices(&t, &sel), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn category_filter_is_ignored_without_category_column() {
        let t = table(
            false,
            vec![record("a", None, Some(1.0)), record("ref", None, Some(2.0))],
        );
        let sel = FilterSelection {
            categories: set(&["Core"]),
            price: None,
        };
        assert_eq!(filtered_indices(&t, &sel), vec![0]);
        assert_eq!(FilterSelection::defaults(&t).categories, None);
    }

    #[test]
    fn narrowing_never_grows_the_result() {
        let t = sample();
        let wide = FilterSelection {
            categories: set(&["Core", "Niche"]),
            price: Some(PriceRange::new(0.0, 100.0)),
        };
        let narrower_price = FilterSelection {
            price: Some(PriceRange::new(12.0, 100.0)),
            ..wide.clone()
        };
        let fewer_categories = FilterSelection {
            categories: set(&["Core"]),
            ..wide.clone()
        };
        let n = filtered_indices(&t, &wide).len();
        assert!(filtered_indices(&t, &narrower_price).len() <= n);
        assert!(filtered_indices(&t, &fewer_categories).len() <= n);
    }

    #[test]
    fn bounds_follow_category_choice() {
        let t = table(
            true,
            vec![
                record("a", Some("Core"), Some(5.0)),
                record("b", Some("Niche"), Some(50.0)),
                record("ref", None, None),
            ],
        );
        let only_niche: Vec<&Record> = t
            .main_rows()
            .iter()
            .filter(|r| r.category.as_deref() == Some("Niche"))
            .collect();
        assert_eq!(price_bounds(only_niche), Some(PriceRange::new(50.0, 50.0)));
        assert_eq!(price_bounds(t.main_rows()), Some(PriceRange::new(5.0, 50.0)));
    }

    #[test]
    fn no_prices_means_no_bounds() {
        let rows = vec![record("a", None, None)];
        assert_eq!(price_bounds(&rows), None);
    }
}
