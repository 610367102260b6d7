use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            to_color32(hsl.into_color())
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0).round() as u8,
        (rgb.green * 255.0).round() as u8,
        (rgb.blue * 255.0).round() as u8,
    )
}

// ---------------------------------------------------------------------------
// Category colours: label → Color32
// ---------------------------------------------------------------------------

/// Maps the labels of one dimension (wine types, regions) to distinct
/// colours, so a label keeps its colour across charts.
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl ColorMap {
    pub fn new<'a>(labels: impl IntoIterator<Item = &'a String>) -> Self {
        let labels: Vec<&String> = labels.into_iter().collect();
        let palette = generate_palette(labels.len());
        let mapping = labels
            .into_iter()
            .zip(palette)
            .map(|(label, c)| (label.clone(), c))
            .collect();

        ColorMap {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    /// Look up the colour for a label.
    pub fn color_for(&self, label: &str) -> Color32 {
        self.mapping
            .get(label)
            .copied()
            .unwrap_or(self.default_color)
    }
}

// ---------------------------------------------------------------------------
// Sequential scale for the choropleth
// ---------------------------------------------------------------------------

const SCALE_LOW: (f32, f32, f32) = (0.99, 0.95, 0.93);
const SCALE_HIGH: (f32, f32, f32) = (0.50, 0.0, 0.15);

/// Shade for `count` on a light → wine-red scale whose top is `max`.
/// Zero counts (and `max == 0`) map to the lightest shade.
pub fn sequential_shade(count: usize, max: usize) -> Color32 {
    let t = if max == 0 {
        0.0
    } else {
        (count.min(max) as f32) / (max as f32)
    };
    let low: LinSrgb = Srgb::new(SCALE_LOW.0, SCALE_LOW.1, SCALE_LOW.2).into_linear();
    let high: LinSrgb = Srgb::new(SCALE_HIGH.0, SCALE_HIGH.1, SCALE_HIGH.2).into_linear();
    to_color32(Srgb::from_linear(low.mix(high, t)))
}
