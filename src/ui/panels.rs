use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::{Dataset, Dimension};
use crate::state::{AppState, View};

/// Shown in place of an empty grape variety.
const UNSPECIFIED: &str = "(unspecified)";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filters");
    ui.label(format!("Source: {}", state.dataset.source));
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            for dimension in Dimension::ALL {
                dimension_filter(ui, state, dimension);
            }
        });
}

fn dimension_filter(ui: &mut Ui, state: &mut AppState, dimension: Dimension) {
    // Clone what we need so we can mutate state inside the loop.
    let all_values: Vec<String> = state.facets.values(dimension).iter().cloned().collect();

    let n_selected = state.selection.values(dimension).len();
    let n_total = all_values.len();
    let header_text = format!("{}  ({n_selected}/{n_total})", dimension.label());

    egui::CollapsingHeader::new(RichText::new(header_text).strong())
        .id_salt(dimension)
        .default_open(true)
        .show(ui, |ui: &mut Ui| {
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button("All").clicked() {
                    state.select_all(dimension);
                }
                if ui.small_button("None").clicked() {
                    state.select_none(dimension);
                }
            });

            for value in &all_values {
                let label = if value.is_empty() { UNSPECIFIED } else { value.as_str() };
                let mut text = RichText::new(label);
                match dimension {
                    Dimension::Type => text = text.color(state.type_colors.color_for(value)),
                    Dimension::Region => text = text.color(state.region_colors.color_for(value)),
                    Dimension::Variety => {}
                }

                let mut checked = state.selection.is_selected(dimension, value);
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_filter_value(dimension, value);
                }
            }
        });
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
            if ui.button("Built-in sample").clicked() {
                state.set_dataset(Dataset::builtin());
                ui.close_menu();
            }
        });

        ui.separator();

        for view in View::ALL {
            ui.selectable_value(&mut state.view, view, view.label());
        }

        ui.separator();

        ui.label(format!(
            "{} wines loaded, {} visible",
            state.dataset.len(),
            state.visible_indices.len()
        ));

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
        .set_title("Open wine list")
        .add_filter("Supported files", &["csv", "json", "parquet", "pq"])
        .add_filter("CSV", &["csv"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}
