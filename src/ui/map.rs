use std::collections::BTreeSet;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Line, Plot, PlotPoint, PlotUi, Points, Polygon, Text};

use crate::boundary::BoundarySet;
use crate::color::sequential_shade;
use crate::data::regions::{self, Coordinate, FRANCE_CENTER};
use crate::present::aggregate::count_by_region;
use crate::present::choropleth::{RegionJoin, join_counts};
use crate::present::markers::build_markers;
use crate::state::AppState;

/// Half extent of the initial view, in degrees.
const VIEW_HALF_LON: f64 = 7.5;
const VIEW_HALF_LAT: f64 = 5.5;

// ---------------------------------------------------------------------------
// Projection
// ---------------------------------------------------------------------------

/// Equirectangular projection around the centre of France, so the plot can
/// keep a 1:1 data aspect.
fn project(lon: f64, lat: f64) -> [f64; 2] {
    [lon * FRANCE_CENTER.lat.to_radians().cos(), lat]
}

fn project_coordinate(c: Coordinate) -> [f64; 2] {
    project(c.lon, c.lat)
}

/// Show a lon/lat plot framed on France.
fn show_france_plot(ui: &mut Ui, id: &str, add_contents: impl FnOnce(&mut PlotUi)) {
    let [min_x, min_y] = project(FRANCE_CENTER.lon - VIEW_HALF_LON, FRANCE_CENTER.lat - VIEW_HALF_LAT);
    let [max_x, max_y] = project(FRANCE_CENTER.lon + VIEW_HALF_LON, FRANCE_CENTER.lat + VIEW_HALF_LAT);
    Plot::new(id)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .include_x(min_x)
        .include_x(max_x)
        .include_y(min_y)
        .include_y(max_y)
        .label_formatter(|name, _value| name.to_string())
        .show(ui, |plot_ui| add_contents(plot_ui));
}

fn draw_outlines(plot_ui: &mut PlotUi, boundaries: &BoundarySet, color: Color32) {
    for boundary in &boundaries.boundaries {
        for ring in boundary.rings() {
            let points: Vec<[f64; 2]> = ring.iter().map(|&[lon, lat]| project(lon, lat)).collect();
            plot_ui.line(Line::new(points).color(color).width(0.8));
        }
    }
}

// ---------------------------------------------------------------------------
// Marker map
// ---------------------------------------------------------------------------

pub fn marker_map(ui: &mut Ui, state: &AppState) {
    let wines = state.visible_wines();
    let markers = build_markers(&wines);
    let unmapped = wines.len() - markers.len();

    ui.heading("Wine regions");
    if unmapped > 0 {
        ui.label(
            RichText::new(format!("{unmapped} wine(s) from regions without coordinates are not shown."))
                .italics(),
        );
    }

    // Outlines only if the choropleth already loaded them.
    let outlines = match state.boundaries.get(&state.config.boundaries.source) {
        Some(Ok(set)) => Some(set.clone()),
        _ => None,
    };

    let labelled: BTreeSet<&str> = wines
        .iter()
        .filter(|w| regions::lookup(&w.region).is_some())
        .map(|w| w.region.as_str())
        .collect();

    show_france_plot(ui, "marker_map", |plot_ui| {
        if let Some(set) = &outlines {
            draw_outlines(plot_ui, set, Color32::GRAY);
        }

        for marker in &markers {
            let color = state.type_colors.color_for(&marker.wine_type);
            plot_ui.points(
                Points::new(vec![project_coordinate(marker.coordinate)])
                    .radius(6.0)
                    .color(color)
                    .name(&marker.label),
            );
        }

        for region in &labelled {
            if let Some(c) = regions::coordinate(region) {
                let [x, y] = project_coordinate(c);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y + 0.35),
                    RichText::new(*region).strong(),
                ));
            }
        }
    });
}

// ---------------------------------------------------------------------------
// Choropleth
// ---------------------------------------------------------------------------

pub fn choropleth(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Wines per administrative region");

    let source = state.config.boundaries.source.clone();
    if state.boundaries.get(&source).is_none() && !state.boundaries_requested {
        // Paint a message first; the (blocking) load happens next frame.
        state.boundaries_requested = true;
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label(format!("Loading region boundaries from {source}…"));
        });
        ui.ctx().request_repaint();
        return;
    }

    let set = match state.boundaries() {
        Ok(set) => set,
        Err(e) => {
            ui.label(RichText::new(format!("Region boundaries unavailable: {e}")).color(Color32::RED));
            if ui.button("Retry").clicked() {
                state.retry_boundaries();
                state.boundaries_requested = false;
            }
            return;
        }
    };

    let wines = state.visible_wines();
    let region_counts = count_by_region(&wines);
    let join = state.config.boundaries.join;
    let counts = join_counts(&set.boundaries, &region_counts, join);
    let max = counts.iter().copied().max().unwrap_or(0);

    ui.horizontal(|ui| {
        ui.label(match join {
            RegionJoin::Exact => "Joined through region codes.",
            RegionJoin::Substring => "Joined by region name substring (legacy).",
        });
        ui.separator();
        scale_legend(ui, max);
    });

    show_france_plot(ui, "choropleth", |plot_ui| {
        for (boundary, &count) in set.boundaries.iter().zip(&counts) {
            let fill = sequential_shade(count, max);
            let name = format!("{}: {count}", boundary.name);
            for triangle in &boundary.triangles {
                let points: Vec<[f64; 2]> =
                    triangle.iter().map(|&[lon, lat]| project(lon, lat)).collect();
                plot_ui.polygon(
                    Polygon::new(points)
                        .fill_color(fill)
                        .stroke(Stroke::NONE)
                        .name(&name),
                );
            }
            if count > 0 {
                if let Some(p) = boundary.label_point {
                    let [x, y] = project(p.x(), p.y());
                    plot_ui.text(Text::new(
                        PlotPoint::new(x, y),
                        RichText::new(count.to_string()).strong(),
                    ));
                }
            }
        }
        draw_outlines(plot_ui, &set, Color32::DARK_GRAY);
    });
}

fn scale_legend(ui: &mut Ui, max: usize) {
    let steps = max.clamp(1, 5);
    for i in 0..=steps {
        let count = i * max / steps;
        let (rect, _) = ui.allocate_exact_size(egui::vec2(14.0, 14.0), egui::Sense::hover());
        ui.painter().rect_filled(rect, 2.0, sequential_shade(count, max));
        ui.label(count.to_string());
    }
}
