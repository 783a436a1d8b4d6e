use crate::color::ColorMap;
use crate::data::aggregate::{success_pie, PieSlice};
use crate::data::filter::{filtered_indices, FilterState, SiteSelector};
use crate::data::model::LaunchDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The dataset is loaded once and never mutated; both chart payloads are
/// pure functions of (dataset, filters), recomputed synchronously whenever a
/// control changes.
pub struct AppState {
    /// Loaded dataset, immutable for the process lifetime.
    pub dataset: LaunchDataset,

    /// Current control values: site dropdown + payload range sliders.
    pub filters: FilterState,

    /// Pie chart payload for the current site selector (cached).
    pub pie_slices: Vec<PieSlice>,

    /// Indices of records feeding the scatter chart (cached).
    pub scatter_indices: Vec<usize>,

    /// Stable colour per launch site (pie wedges in all-sites mode).
    pub site_colors: ColorMap,

    /// Stable colour per booster version category (scatter series).
    pub booster_colors: ColorMap,
}

impl AppState {
    /// Build the initial state: selector "All Sites", payload range seeded
    /// from the dataset's min/max payload mass.
    pub fn new(dataset: LaunchDataset) -> Self {
        let payload_range = dataset.payload_bounds().unwrap_or((0.0, 0.0));
        let site_colors = ColorMap::new(dataset.sites.iter().cloned());
        let booster_colors = ColorMap::new(dataset.booster_categories.iter().cloned());

        let mut state = AppState {
            dataset,
            filters: FilterState {
                selector: SiteSelector::AllSites,
                payload_range,
            },
            pie_slices: Vec::new(),
            scatter_indices: Vec::new(),
            site_colors,
            booster_colors,
        };
        state.recompute();
        state
    }

    /// Recompute both chart payloads from the current control values.
    ///
    /// The pie depends on the selector only; the scatter on selector and
    /// payload range.
    pub fn recompute(&mut self) {
        self.pie_slices = success_pie(&self.dataset, &self.filters.selector);
        self.scatter_indices = filtered_indices(&self.dataset, &self.filters);
    }

    /// Change the site selector and recompute.
    pub fn set_selector(&mut self, selector: SiteSelector) {
        if self.filters.selector != selector {
            self.filters.selector = selector;
            self.recompute();
        }
    }

    /// Change the payload range and recompute.
    pub fn set_payload_range(&mut self, lo: f64, hi: f64) {
        if self.filters.payload_range != (lo, hi) {
            self.filters.payload_range = (lo, hi);
            self.recompute();
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
