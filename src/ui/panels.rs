use eframe::egui::{self, Slider, Ui};

use crate::data::filter::SiteSelector;
use crate::state::AppState;

/// Payload slider bounds and step, matching the original dashboard controls.
pub const PAYLOAD_SLIDER_MIN: f64 = 0.0;
pub const PAYLOAD_SLIDER_MAX: f64 = 10_000.0;
pub const PAYLOAD_SLIDER_STEP: f64 = 1000.0;

// ---------------------------------------------------------------------------
// Left side panel – chart controls
// ---------------------------------------------------------------------------

/// Render the controls panel: site dropdown and payload range sliders.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Controls");
    ui.separator();

    // ---- Launch site dropdown ----
    ui.strong("Launch Site");
    let current = state.filters.selector.clone();
    let sites = state.dataset.sites.clone();
    egui::ComboBox::from_id_salt("site_dropdown")
        .selected_text(current.label().to_string())
        .show_ui(ui, |ui: &mut Ui| {
            if ui
                .selectable_label(current.is_all(), SiteSelector::AllSites.label())
                .clicked()
            {
                state.set_selector(SiteSelector::AllSites);
            }
            for site in &sites {
                let is_selected = matches!(&current, SiteSelector::Site(s) if s == site);
                if ui.selectable_label(is_selected, site).clicked() {
                    state.set_selector(SiteSelector::Site(site.clone()));
                }
            }
        });

    ui.add_space(8.0);

    // ---- Payload range sliders ----
    // Two single-ended sliders form the range; min above max is allowed and
    // simply matches nothing.
    ui.strong("Payload range (kg)");
    let (mut lo, mut hi) = state.filters.payload_range;
    let lo_changed = ui
        .add(
            Slider::new(&mut lo, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                .step_by(PAYLOAD_SLIDER_STEP)
                .suffix(" kg")
                .text("Min"),
        )
        .changed();
    let hi_changed = ui
        .add(
            Slider::new(&mut hi, PAYLOAD_SLIDER_MIN..=PAYLOAD_SLIDER_MAX)
                .step_by(PAYLOAD_SLIDER_STEP)
                .suffix(" kg")
                .text("Max"),
        )
        .changed();
    if lo_changed || hi_changed {
        state.set_payload_range(lo, hi);
    }

    ui.add_space(8.0);
    ui.separator();
    ui.label(format!("{} launches loaded", state.dataset.len()));
    ui.label(format!("{} in payload view", state.scatter_indices.len()));
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the title bar with the current selection summary.
pub fn top_bar(ui: &mut Ui, state: &AppState) {
    ui.horizontal(|ui: &mut Ui| {
        ui.heading("SpaceX Launch Records Dashboard");
        ui.separator();
        ui.label(format!("Viewing: {}", state.filters.selector));
    });
}
