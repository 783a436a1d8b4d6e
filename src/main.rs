mod app;
mod color;
mod data;
mod state;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use app::LaunchDashApp;
use eframe::egui;

/// Input file read once at startup; override with the first CLI argument.
const DEFAULT_DATA_FILE: &str = "spacex_launch_dash.csv";

fn main() -> Result<()> {
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_FILE));

    let dataset = data::loader::load_file(&path)
        .with_context(|| format!("loading launch records from {}", path.display()))?;
    log::info!(
        "Loaded {} launch records from {} ({} sites, {} booster categories)",
        dataset.len(),
        path.display(),
        dataset.sites.len(),
        dataset.booster_categories.len()
    );

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 850.0])
            .with_min_inner_size([700.0, 500.0]),
        ..Default::default()
    };

    eframe::run_native(
        "SpaceX Launch Records Dashboard",
        options,
        Box::new(move |_cc| Ok(Box::new(LaunchDashApp::new(dataset)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe failed: {e}"))
}
