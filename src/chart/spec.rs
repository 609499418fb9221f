use serde::{Deserialize, Serialize};

use super::format;

// ---------------------------------------------------------------------------
// ChartSpec – renderer-neutral chart description
// ---------------------------------------------------------------------------

/// Everything a renderer needs to draw the chart.  No rendering library types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub title: String,
    /// Pixels.
    pub height: f64,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub legend_title: String,
    /// Bubble series first, the reference series last.
    pub series: Vec<Series>,
}

impl ChartSpec {
    pub fn bubble_series(&self) -> impl Iterator<Item = &Series> {
        self.series.iter().filter(|s| s.kind == SeriesKind::Bubble)
    }

    pub fn reference_series(&self) -> Option<&Series> {
        self.series.iter().find(|s| s.kind == SeriesKind::Reference)
    }

    /// Number of plotted bubbles (reference excluded).
    pub fn bubble_count(&self) -> usize {
        self.bubble_series().map(|s| s.points.len()).sum()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Axis {
    pub title: String,
    /// Text placed before every tick label, e.g. `$`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tick_prefix: String,
    /// Fixed decimals for tick labels; `None` lets the renderer choose.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tick_decimals: Option<usize>,
}

impl Axis {
    pub fn format_tick(&self, value: f64) -> String {
        let number = match self.tick_decimals {
            Some(d) => format::fixed(value, d),
            None => format::compact(value),
        };
        format!("{}{number}", self.tick_prefix)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeriesKind {
    Bubble,
    Reference,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub name: String,
    pub kind: SeriesKind,
    pub marker: Marker,
    pub points: Vec<Point>,
}

/// Area-sized marker style.
///
/// A point of size `v` has radius `sqrt(v / 2 / size_ref)` pixels, raised to
/// `size_min` when set.  Missing or non-positive sizes are not drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    /// `#rrggbb`.
    pub color: String,
    pub size_ref: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline: Option<Outline>,
}

impl Marker {
    pub fn radius(&self, size: Option<f64>) -> Option<f64> {
        let v = size.filter(|v| v.is_finite() && *v > 0.0)?;
        let r = (v / 2.0 / self.size_ref).sqrt();
        Some(match self.size_min {
            Some(min) => r.max(min),
            None => r,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: String,
    pub width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub size: Option<f64>,
    pub hover: Hover,
}

impl Point {
    /// Plot position, when both coordinates are present.
    pub fn position(&self) -> Option<[f64; 2]> {
        Some([self.x?, self.y?])
    }
}

/// Hover text: a bold title line followed by `label: value` lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hover {
    pub title: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<HoverField>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoverField {
    pub label: String,
    pub value: String,
}

impl Hover {
    pub fn field(&self, label: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }

    /// Plain multi-line text.
    pub fn to_text(&self) -> String {
        let mut text = self.title.clone();
        for f in &self.fields {
            text.push('\n');
            text.push_str(&f.label);
            text.push_str(": ");
            text.push_str(&f.value);
        }
        text
    }
}
