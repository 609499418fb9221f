//! Chart layer: renderer-neutral description of the bubble chart.

pub mod builder;
pub mod format;
pub mod spec;

pub use builder::build_chart;
pub use spec::{Axis, ChartSpec, Hover, HoverField, Marker, Outline, Point, Series, SeriesKind};
