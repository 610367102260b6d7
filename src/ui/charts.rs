use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Polygon, Text};

use crate::color::ColorMap;
use crate::present::aggregate::{Share, count_by_region, count_by_type, proportions};
use crate::state::AppState;

/// Largest arc drawn as one polygon; keeps every piece convex.
const MAX_WEDGE_STEP: f64 = TAU / 8.0;
const ARC_SEGMENTS_PER_PIECE: usize = 12;

// ---------------------------------------------------------------------------
// Charts view (central panel)
// ---------------------------------------------------------------------------

pub fn charts(ui: &mut Ui, state: &AppState) {
    let wines = state.visible_wines();
    if wines.is_empty() {
        ui.label(RichText::new("No wines match the current filters.").italics());
    }

    let by_type = count_by_type(&wines);
    let by_region = count_by_region(&wines);

    ui.columns(2, |cols| {
        cols[0].heading("Wines by type");
        bar_chart(&mut cols[0], "type_chart", &by_type, &state.type_colors);

        cols[1].heading("Wines by region");
        bar_chart(&mut cols[1], "region_chart", &by_region, &state.region_colors);
    });

    ui.separator();
    ui.heading("Share of wine types");
    pie_chart(ui, &proportions(&by_type), &state.type_colors);
}

/// Vertical bar chart with one categorical bar per key.
fn bar_chart(ui: &mut Ui, id: &str, counts: &BTreeMap<String, usize>, colors: &ColorMap) {
    let labels: Vec<String> = counts.keys().cloned().collect();
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, &count))| {
            Bar::new(i as f64, count as f64)
                .name(label)
                .fill(colors.color_for(label))
                .width(0.7)
        })
        .collect();

    Plot::new(id)
        .height(260.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .y_axis_label("Count")
        .include_y(0.0)
        .include_y(1.0)
        .x_axis_formatter(move |mark, _range| {
            let idx = mark.value.round();
            if (mark.value - idx).abs() > 1e-6 || idx < 0.0 {
                return String::new();
            }
            labels.get(idx as usize).cloned().unwrap_or_default()
        })
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars));
        });
}

/// Pie chart drawn from polygon wedges in a unit circle.
fn pie_chart(ui: &mut Ui, shares: &[Share], colors: &ColorMap) {
    Plot::new("type_pie")
        .height(300.0)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for share in shares {
                let sweep = share.fraction * TAU;
                let color = colors.color_for(&share.label);
                let name = format!("{} ({})", share.label, share.count);

                for piece in wedge_pieces(start, sweep) {
                    plot_ui.polygon(
                        Polygon::new(piece)
                            .fill_color(color)
                            .stroke(Stroke::new(1.0, color))
                            .name(&name),
                    );
                }

                let mid = start + sweep / 2.0;
                plot_ui.text(Text::new(
                    PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                    RichText::new(format!("{:.1}%", share.fraction * 100.0))
                        .color(Color32::WHITE)
                        .strong(),
                ));
                start += sweep;
            }
        });
}

/// Split the arc `[start, start + sweep]` into convex pie slices.
fn wedge_pieces(start: f64, sweep: f64) -> Vec<Vec<[f64; 2]>> {
    if sweep <= 0.0 {
        return Vec::new();
    }
    let n_pieces = (sweep / MAX_WEDGE_STEP).ceil().max(1.0) as usize;
    let step = sweep / n_pieces as f64;

    (0..n_pieces)
        .map(|p| {
            let a0 = start + p as f64 * step;
            let mut points = vec![[0.0, 0.0]];
            for s in 0..=ARC_SEGMENTS_PER_PIECE {
                let a = a0 + step * s as f64 / ARC_SEGMENTS_PER_PIECE as f64;
                points.push([a.cos(), a.sin()]);
            }
            points
        })
        .collect()
}
