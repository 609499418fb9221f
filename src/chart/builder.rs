use crate::color::ColorMap;
use crate::config::ChartConfig;
use crate::data::filter::category_options;
use crate::data::model::{Capabilities, Record, Table};

use super::format::{currency, fixed, or_blank, thousands};
use super::spec::{Axis, ChartSpec, Hover, HoverField, Marker, Outline, Point, Series, SeriesKind};

/// Legend name of the bubble series for rows without a category.
pub const UNCATEGORISED: &str = "(no category)";

pub const LABEL_PRICE: &str = "List Price ($)";
pub const LABEL_QUALITY: &str = "Quality Score";
pub const LABEL_UNITS: &str = "Annual Unit Sales Average";
pub const LABEL_CATEGORY: &str = "Position Category";
pub const LABEL_PAGES: &str = "Page Count";
pub const LABEL_AGE: &str = "Title Age";
pub const LABEL_RATING: &str = "Amazon Rating";
pub const LABEL_REVIEWS: &str = "Amazon Review Count";
pub const LABEL_DATE: &str = "Pub Date";
pub const LABEL_UNITS_2024: &str = "Units Sold in 2024";
pub const LABEL_UNITS_2025: &str = "YTD Unit Sales";

// ---------------------------------------------------------------------------
// Chart builder
// ---------------------------------------------------------------------------

/// Build the chart description from the table and the filtered main-row indices.
///
/// The reference record is taken from `table` directly; `filtered` only
/// selects bubbles.  An empty selection still yields the reference series.
pub fn build_chart(table: &Table, filtered: &[usize], config: &ChartConfig) -> ChartSpec {
    let (main, reference) = table.split_reference();
    let rows: Vec<&Record> = filtered.iter().filter_map(|&i| main.get(i)).collect();
    let caps = table.schema.capabilities;

    let size_ref = size_ref(&rows, config.size_max).unwrap_or_else(|| {
        log::warn!(
            "no bubble sizes to scale from, using fallback size_ref {}",
            config.fallback_size_ref
        );
        config.fallback_size_ref
    });

    let colors = ColorMap::new(&category_options(main));
    let mut series: Vec<Series> = group_by_category(&rows, caps)
        .into_iter()
        .map(|(category, members)| Series {
            name: category.unwrap_or(UNCATEGORISED).to_string(),
            kind: SeriesKind::Bubble,
            marker: Marker {
                color: colors.color_for(category),
                size_ref,
                size_min: None,
                outline: None,
            },
            points: members
                .into_iter()
                .map(|r| Point {
                    x: r.list_price,
                    y: r.qual_score,
                    size: r.avg_annual_units,
                    hover: bubble_hover(r, caps),
                })
                .collect(),
        })
        .collect();

    series.push(reference_series(reference, size_ref, config));

    log::debug!(
        "built chart: {} bubbles in {} series, size_ref {size_ref}",
        rows.len(),
        series.len() - 1
    );

    ChartSpec {
        title: config.title.clone(),
        height: config.height,
        x_axis: Axis {
            title: LABEL_PRICE.to_string(),
            tick_prefix: "$".to_string(),
            tick_decimals: None,
        },
        y_axis: Axis {
            title: LABEL_QUALITY.to_string(),
            tick_prefix: String::new(),
            tick_decimals: Some(1),
        },
        legend_title: config.legend_title.clone(),
        series,
    }
}

/// Area scale factor, computed the way Plotly Express does: `max / size_max²`.
///
/// `None` when no row has a positive size.
pub fn size_ref(rows: &[&Record], size_max: f64) -> Option<f64> {
    let max = rows
        .iter()
        .filter_map(|r| r.avg_annual_units)
        .filter(|v| *v > 0.0)
        .fold(None, |acc: Option<f64>, v| Some(acc.map_or(v, |m| m.max(v))))?;
    Some(max / (size_max * size_max))
}

/// Split rows by category, keeping first-appearance order.
fn group_by_category<'a>(
    rows: &[&'a Record],
    caps: Capabilities,
) -> Vec<(Option<&'a str>, Vec<&'a Record>)> {
    let mut groups: Vec<(Option<&'a str>, Vec<&'a Record>)> = Vec::new();
    for &r in rows {
        let key = if caps.has_category {
            r.category.as_deref()
        } else {
            None
        };
        match groups.iter_mut().find(|(k, _)| *k == key) {
            Some((_, members)) => members.push(r),
            None => groups.push((key, vec![r])),
        }
    }
    groups
}

fn bubble_hover(r: &Record, caps: Capabilities) -> Hover {
    let mut fields = Vec::new();
    let mut push = |label: &str, value: String| {
        fields.push(HoverField {
            label: label.to_string(),
            value,
        })
    };

    if caps.has_category {
        push(LABEL_CATEGORY, r.category.clone().unwrap_or_default());
    }
    push(LABEL_PRICE, or_blank(r.list_price, currency));
    push(LABEL_QUALITY, or_blank(r.qual_score, |v| fixed(v, 1)));
    push(LABEL_UNITS, or_blank(r.avg_annual_units, |v| thousands(v, 0)));
    if caps.has_page_count {
        push(LABEL_PAGES, or_blank(r.page_count, |v| fixed(v, 0)));
    }
    if caps.has_title_age {
        push(LABEL_AGE, or_blank(r.title_age, |v| fixed(v, 0)));
    }
    if caps.has_rating {
        push(LABEL_RATING, or_blank(r.rating, |v| fixed(v, 1)));
    }
    if caps.has_review_count {
        push(LABEL_REVIEWS, or_blank(r.review_count, |v| thousands(v, 0)));
    }
    push(LABEL_DATE, r.on_sale_date.clone().unwrap_or_default());
    if caps.has_units_2024 {
        push(LABEL_UNITS_2024, or_blank(r.units_2024, |v| thousands(v, 0)));
    }
    if caps.has_units_2025 {
        push(LABEL_UNITS_2025, or_blank(r.units_2025, |v| thousands(v, 0)));
    }

    Hover {
        title: r.label.clone(),
        fields,
    }
}

fn reference_series(reference: &Record, size_ref: f64, config: &ChartConfig) -> Series {
    let style = &config.reference;
    Series {
        name: style.name.clone(),
        kind: SeriesKind::Reference,
        marker: Marker {
            color: style.fill.clone(),
            size_ref,
            size_min: Some(style.size_min),
            outline: Some(Outline {
                color: style.outline.clone(),
                width: style.outline_width,
            }),
        },
        points: vec![Point {
            x: reference.list_price,
            y: reference.qual_score,
            size: reference.avg_annual_units,
            hover: Hover {
                title: reference.label.clone(),
                fields: Vec::new(),
            },
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Schema, CATEGORY, PAGE_COUNT, REQUIRED_COLUMNS};

    fn record(label: &str, category: Option<&str>, price: f64, units: Option<f64>) -> Record {
        Record {
            label: label.to_string(),
            category: category.map(str::to_string),
            list_price: Some(price),
            qual_score: Some(5.0),
            avg_annual_units: units,
            ..Record::default()
        }
    }

    fn table(extra: &[&str], records: Vec<Record>) -> Table {
        let headers: Vec<String> = REQUIRED_COLUMNS
            .iter()
            .chain(extra.iter())
            .map(|s| s.to_string())
            .collect();
        Table::new(Schema::detect(&headers).unwrap(), records).unwrap()
    }

    #[test]
    fn one_series_per_category_in_first_appearance_order() {
        let t = table(
            &[CATEGORY],
            vec![
                record("a", Some("Niche"), 10.0, Some(100.0)),
                record("b", Some("Core"), 12.0, Some(200.0)),
                record("c", Some("Niche"), 14.0, Some(300.0)),
                record("ref", None, 20.0, Some(150.0)),
            ],
        );
        let chart = build_chart(&t, &[0, 1, 2], &ChartConfig::default());
        let names: Vec<&str> = chart.bubble_series().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Niche", "Core"]);
        assert_eq!(chart.bubble_count(), 3);
        assert_eq!(chart.series.last().unwrap().kind, SeriesKind::Reference);
    }

    #[test]
    fn all_series_share_the_bubble_scale() {
        let t = table(
            &[CATEGORY],
            vec![
                record("a", Some("Niche"), 10.0, Some(4000.0)),
                record("b", Some("Core"), 12.0, Some(20000.0)),
                record("ref", None, 20.0, Some(15000.0)),
            ],
        );
        let chart = build_chart(&t, &[0, 1], &ChartConfig::default());
        let expected = 20000.0 / (40.0 * 40.0);
        for s in &chart.series {
            assert_eq!(s.marker.size_ref, expected, "{}", s.name);
        }
    }

    #[test]
    fn empty_selection_uses_fallback_scale() {
        let t = table(&[], vec![record("a", None, 1.0, Some(5.0)), record("ref", None, 2.0, Some(9.0))]);
        let chart = build_chart(&t, &[], &ChartConfig::default());
        assert_eq!(chart.bubble_count(), 0);
        let reference = chart.reference_series().unwrap();
        assert_eq!(reference.marker.size_ref, 2.0);
        assert_eq!(reference.points.len(), 1);
    }

    #[test]
    fn rows_without_sizes_use_fallback_scale() {
        let rows = [record("a", None, 1.0, None), record("b", None, 1.0, Some(0.0))];
        let refs: Vec<&Record> = rows.iter().collect();
        assert_eq!(size_ref(&refs, 40.0), None);
    }

    #[test]
    fn without_category_column_everything_is_one_series() {
        let t = table(
            &[],
            vec![
                record("a", Some("ignored"), 1.0, Some(1.0)),
                record("b", None, 2.0, Some(1.0)),
                record("ref", None, 2.0, Some(1.0)),
            ],
        );
        let chart = build_chart(&t, &[0, 1], &ChartConfig::default());
        let names: Vec<&str> = chart.bubble_series().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec![UNCATEGORISED]);
        let hover = &chart.series[0].points[0].hover;
        assert_eq!(hover.field(LABEL_CATEGORY), None);
        assert_eq!(hover.field(LABEL_PAGES), None);
    }

    #[test]
    fn hover_formats_values() {
        let mut r = record("Big Book", Some("Core"), 1299.5, Some(15234.6));
        r.page_count = Some(352.4);
        r.on_sale_date = None;
        let t = table(&[CATEGORY, PAGE_COUNT], vec![r, record("ref", None, 1.0, Some(1.0))]);
        let chart = build_chart(&t, &[0], &ChartConfig::default());
        let hover = &chart.series[0].points[0].hover;
        assert_eq!(hover.title, "Big Book");
        assert_eq!(hover.field(LABEL_CATEGORY), Some("Core"));
        assert_eq!(hover.field(LABEL_PRICE), Some("$1,299.50"));
        assert_eq!(hover.field(LABEL_QUALITY), Some("5.0"));
        assert_eq!(hover.field(LABEL_UNITS), Some("15,235"));
        assert_eq!(hover.field(LABEL_PAGES), Some("352"));
        assert_eq!(hover.field(LABEL_DATE), Some(""));
    }

    #[test]
    fn reference_marker_style_comes_from_config() {
        let t = table(&[], vec![record("Ref Book", None, 50.0, Some(15000.0))]);
        let chart = build_chart(&t, &[], &ChartConfig::default());
        let reference = chart.reference_series().unwrap();
        assert_eq!(reference.name, "Reference Marker Size: 15k Units");
        assert_eq!(reference.marker.color, "#000000");
        assert_eq!(reference.marker.size_min, Some(4.0));
        let outline = reference.marker.outline.as_ref().unwrap();
        assert_eq!(outline.color, "#ffffff");
        assert_eq!(outline.width, 1.0);
        assert_eq!(reference.points[0].hover.title, "Ref Book");
        assert!(reference.points[0].hover.fields.is_empty());
    }

    #[test]
    fn layout_formatting() {
        let t = table(&[], vec![record("ref", None, 1.0, Some(1.0))]);
        let chart = build_chart(&t, &[], &ChartConfig::default());
        assert_eq!(chart.x_axis.tick_prefix, "$");
        assert_eq!(chart.y_axis.tick_decimals, Some(1));
        assert_eq!(chart.legend_title, "Position Category");
        assert_eq!(chart.height, 900.0);
        assert_eq!(chart.title, "📊 Product Quality vs List Price");
    }
}
