use crate::chart::{build_chart, ChartSpec};
use crate::config::ChartConfig;
use crate::data::filter::{filtered_indices, FilterSelection};
use crate::data::model::Table;

/// Filter the main rows and build the chart.  Pure: same inputs, same chart.
pub fn render(table: &Table, selection: &FilterSelection, config: &ChartConfig) -> ChartSpec {
    let visible = filtered_indices(table, selection);
    build_chart(table, &visible, config)
}
