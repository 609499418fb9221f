use bubblescope::chart::{ChartSpec, Series, SeriesKind};
use eframe::egui::{Color32, ScrollArea, Ui};
use egui_plot::{Legend, MarkerShape, Plot, PlotPoint, Points};

use crate::state::AppState;
use crate::ui::panels::to_color32;

/// Bubble fill opacity, so overlapping bubbles stay readable.
const BUBBLE_ALPHA: u8 = 190;

// ---------------------------------------------------------------------------
// Bubble plot (central panel)
// ---------------------------------------------------------------------------

/// Render the chart description in the central panel.
pub fn bubble_plot(ui: &mut Ui, state: &AppState) {
    let Some(chart) = &state.chart else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.heading("Open a CSV to see the interactive bubble chart  (File → Open…)");
        });
        return;
    };

    ui.heading(&chart.title);
    ui.label(format!("Legend: {}", chart.legend_title));

    let x_axis = &chart.x_axis;
    let y_axis = &chart.y_axis;

    ScrollArea::vertical().show(ui, |ui: &mut Ui| {
        Plot::new("bubble_plot")
            .height(chart.height as f32)
            .legend(Legend::default())
            .x_axis_label(x_axis.title.clone())
            .y_axis_label(y_axis.title.clone())
            .x_axis_formatter(move |mark, _range| x_axis.format_tick(mark.value))
            .y_axis_formatter(move |mark, _range| y_axis.format_tick(mark.value))
            .label_formatter(|name, value| hover_text(chart, name, value))
            .allow_boxed_zoom(true)
            .allow_drag(true)
            .allow_scroll(true)
            .allow_zoom(true)
            .show(ui, |plot_ui| {
                for series in &chart.series {
                    for points in series_markers(series) {
                        plot_ui.points(points);
                    }
                }
            });
    });
}

/// One egui `Points` item per marker: egui_plot sizes whole items, not points.
fn series_markers(series: &Series) -> Vec<Points> {
    let fill = to_color32(&series.marker.color);
    let mut markers = Vec::with_capacity(series.points.len());

    for point in &series.points {
        let (Some(position), Some(radius)) = (point.position(), series.marker.radius(point.size))
        else {
            continue;
        };
        let radius = radius as f32;

        if let Some(outline) = &series.marker.outline {
            markers.push(
                Points::new(vec![position])
                    .name(&series.name)
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius + outline.width as f32)
                    .color(to_color32(&outline.color)),
            );
        }

        let color = match series.kind {
            SeriesKind::Bubble => {
                Color32::from_rgba_unmultiplied(fill.r(), fill.g(), fill.b(), BUBBLE_ALPHA)
            }
            SeriesKind::Reference => fill,
        };
        markers.push(
            Points::new(vec![position])
                .name(&series.name)
                .shape(MarkerShape::Circle)
                .filled(true)
                .radius(radius)
                .color(color),
        );
    }
    markers
}

/// Hover text of the marker under the cursor, or the raw coordinates.
fn hover_text(chart: &ChartSpec, name: &str, value: &PlotPoint) -> String {
    let hit = chart
        .series
        .iter()
        .filter(|s| s.name == name)
        .flat_map(|s| s.points.iter())
        .find(|p| {
            p.position().is_some_and(|[x, y]| {
                (x - value.x).abs() < 1e-9 && (y - value.y).abs() < 1e-9
            })
        });

    match hit {
        Some(point) => point.hover.to_text(),
        None => format!(
            "{}\n{}",
            chart.x_axis.format_tick(value.x),
            chart.y_axis.format_tick(value.y)
        ),
    }
}
