use eframe::egui;

use crate::state::{AppState, View};
use crate::ui::{charts, map, panels, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct WineAtlasApp {
    pub state: AppState,
}

impl WineAtlasApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Load the first file dropped onto the window.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        if let Some(path) = dropped.into_iter().find_map(|f| f.path) {
            self.state.load_path(&path);
        }
    }
}

impl eframe::App for WineAtlasApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);

        // ---- Top panel: menu bar and view tabs ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: selected view ----
        egui::CentralPanel::default().show(ctx, |ui| match self.state.view {
            View::Charts => charts::charts(ui, &self.state),
            View::MarkerMap => map::marker_map(ui, &self.state),
            View::Choropleth => map::choropleth(ui, &mut self.state),
            View::Table => table::wine_table(ui, &self.state),
        });
    }
}
