use std::collections::BTreeMap;
use std::f64::consts::TAU;

use eframe::egui::{Color32, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoints, Points, Polygon};

use crate::data::model::Outcome;
use crate::state::AppState;

const SUCCESS_COLOR: Color32 = Color32::from_rgb(0x2a, 0x9d, 0x58);
const FAILURE_COLOR: Color32 = Color32::from_rgb(0xc0, 0x3b, 0x2e);

// ---------------------------------------------------------------------------
// Success pie chart
// ---------------------------------------------------------------------------

/// Render the success pie chart from the cached slices.
///
/// Wedges are plot polygons on the unit circle; all-sites mode colours by
/// site, single-site mode uses fixed success/failure colours. A selection
/// matching no records renders an empty chart.
pub fn success_pie(ui: &mut Ui, state: &AppState, height: f32) {
    let selector = &state.filters.selector;
    let title = if selector.is_all() {
        "Total Success Launches By All Sites".to_string()
    } else {
        format!("Total Success Launches for site {selector}")
    };
    ui.strong(title);

    let total: usize = state.pie_slices.iter().map(|s| s.count).sum();

    Plot::new("success_pie")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            if total == 0 {
                return;
            }
            // Start at 12 o'clock, sweep clockwise.
            let mut start = TAU / 4.0;
            for slice in &state.pie_slices {
                if slice.count == 0 {
                    continue;
                }
                let sweep = slice.count as f64 / total as f64 * TAU;
                let color = if selector.is_all() {
                    state.site_colors.color_for(&slice.label)
                } else if slice.label == Outcome::Success.label() {
                    SUCCESS_COLOR
                } else {
                    FAILURE_COLOR
                };
                let wedge = Polygon::new(wedge_points(start, sweep))
                    .name(format!("{} ({})", slice.label, slice.count))
                    .fill_color(color)
                    .stroke(Stroke::new(1.0, color));
                plot_ui.polygon(wedge);
                start -= sweep;
            }
        });
}

/// Vertices of one pie wedge: the centre plus an arc approximation.
fn wedge_points(start: f64, sweep: f64) -> PlotPoints<'static> {
    let steps = ((sweep / TAU * 64.0).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for k in 0..=steps {
        let angle = start - sweep * k as f64 / steps as f64;
        points.push([angle.cos(), angle.sin()]);
    }
    PlotPoints::from(points)
}

// ---------------------------------------------------------------------------
// Payload vs. outcome scatter chart
// ---------------------------------------------------------------------------

/// Render the payload/outcome scatter from the cached filtered indices,
/// one point series per booster version category.
pub fn payload_scatter(ui: &mut Ui, state: &AppState, height: f32) {
    let selector = &state.filters.selector;
    ui.strong(format!("Payload vs. Outcome for {}", selector.label()));

    let mut series: BTreeMap<&str, Vec<[f64; 2]>> = BTreeMap::new();
    for &idx in &state.scatter_indices {
        let rec = &state.dataset.records[idx];
        series
            .entry(rec.booster_category.as_str())
            .or_default()
            .push([rec.payload_mass_kg, rec.outcome.as_class() as f64]);
    }

    Plot::new("payload_scatter")
        .height(height)
        .x_axis_label("Payload Mass (kg)")
        .y_axis_label("Class")
        .include_y(-0.5)
        .include_y(1.5)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            for (category, points) in series {
                plot_ui.points(
                    Points::new(points)
                        .name(category)
                        .color(state.booster_colors.color_for(category))
                        .radius(4.0),
                );
            }
        });
}
