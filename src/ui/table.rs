use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::present::table::{TABLE_HEADERS, table_rows};
use crate::state::AppState;

const ROW_HEIGHT: f32 = 20.0;

/// Render the filtered wines as a table.
pub fn wine_table(ui: &mut Ui, state: &AppState) {
    let wines = state.visible_wines();
    let rows = table_rows(&wines);

    if rows.is_empty() {
        ui.label(RichText::new("No wines match the current filters.").italics());
    }

    TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .column(Column::auto().at_least(32.0))
        .column(Column::auto().at_least(160.0))
        .column(Column::auto().at_least(80.0))
        .column(Column::auto().at_least(200.0))
        .column(Column::remainder().at_least(100.0))
        .header(ROW_HEIGHT + 2.0, |mut header| {
            for title in TABLE_HEADERS {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(ROW_HEIGHT, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui| {
                    ui.label(r.index.to_string());
                });
                row.col(|ui| {
                    ui.label(r.name);
                });
                row.col(|ui| {
                    ui.label(r.wine_type);
                });
                row.col(|ui| {
                    ui.label(r.varieties);
                });
                row.col(|ui| {
                    ui.label(r.region);
                });
            });
        });
}
