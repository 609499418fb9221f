use std::path::Path;

use bubblescope::color::parse_hex;
use bubblescope::data::model::CATEGORY;
use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.separator();

    let Some(table) = &state.table else {
        ui.label("No dataset loaded.");
        return;
    };
    let has_category = table.schema.capabilities.has_category;

    // Clone what we need so we can mutate state inside the loop.
    let options = state.category_options.clone();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if has_category {
                category_filter(ui, state, &options);
                ui.separator();
            }
            price_filter(ui, state);
        });
}

fn category_filter(ui: &mut Ui, state: &mut AppState, options: &[String]) {
    let n_selected = options
        .iter()
        .filter(|c| state.is_category_selected(c))
        .count();
    let header_text = format!("{CATEGORY}  ({n_selected}/{})", options.len());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt("category_filter")
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all();
                }
                if ui.small_button("None").clicked() {
                    state.select_none();
                }
            });
            if n_selected == 0 {
                ui.label(RichText::new("Nothing selected: showing all").italics().weak());
            }

            for category in options {
                let mut checked = state.is_category_selected(category);
                let swatch = to_color32(&state.color_map.color_for(Some(category.as_str())));
                let text = RichText::new(category).color(swatch);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_category(category);
                }
            }
        });
}

fn price_filter(ui: &mut Ui, state: &mut AppState) {
    ui.strong("List Price range");
    let (Some(limits), Some(current)) = (state.price_limits, state.selection.price) else {
        ui.label("No list prices in the selection.");
        return;
    };

    let mut min = current.min;
    let mut max = current.max;
    let mut changed = false;
    changed |= ui
        .add(
            egui::Slider::new(&mut min, limits.min..=limits.max)
                .text("min")
                .prefix("$")
                .fixed_decimals(2),
        )
        .changed();
    changed |= ui
        .add(
            egui::Slider::new(&mut max, limits.min..=limits.max)
                .text("max")
                .prefix("$")
                .fixed_decimals(2),
        )
        .changed();

    if changed {
        state.set_price(min, max);
    }
}

/// `#rrggbb` → egui colour (grey if malformed).
pub fn to_color32(hex: &str) -> Color32 {
    parse_hex(hex)
        .map(|(r, g, b)| Color32::from_rgb(r, g, b))
        .unwrap_or(Color32::GRAY)
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let Some(table) = &state.table {
            ui.label(format!(
                "{} titles loaded, {} plotted",
                table.main_rows().len(),
                state.visible_count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open title data")
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        open_path(state, &path);
    }
}

pub fn open_path(state: &mut AppState, path: &Path) {
    match bubblescope::data::loader::load_file(path) {
        Ok(table) => {
            log::info!("Opened {}", path.display());
            state.set_table(table);
        }
        Err(e) => {
            log::error!("Failed to load file: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
