use std::fmt;

use super::model::LaunchDataset;

// ---------------------------------------------------------------------------
// SiteSelector – the dropdown's value
// ---------------------------------------------------------------------------

/// The site filter: either the "ALL" sentinel or one specific launch site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SiteSelector {
    #[default]
    AllSites,
    Site(String),
}

impl SiteSelector {
    /// Whether a record at the given site passes this selector.
    ///
    /// A site name not present in the dataset simply matches nothing; an
    /// unknown selector is never an error.
    pub fn matches(&self, site: &str) -> bool {
        match self {
            SiteSelector::AllSites => true,
            SiteSelector::Site(s) => s == site,
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SiteSelector::AllSites)
    }

    /// Human-readable label used in chart titles and the dropdown.
    pub fn label(&self) -> &str {
        match self {
            SiteSelector::AllSites => "All Sites",
            SiteSelector::Site(s) => s,
        }
    }
}

impl fmt::Display for SiteSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// FilterState – current control values
// ---------------------------------------------------------------------------

/// The two control values driving recomputation: the site dropdown and the
/// inclusive payload range `[lo, hi]` in kilograms.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterState {
    pub selector: SiteSelector,
    pub payload_range: (f64, f64),
}

impl FilterState {
    /// Whether a payload mass lies within the inclusive range. An inverted
    /// range (`lo > hi`) contains nothing.
    pub fn payload_in_range(&self, mass_kg: f64) -> bool {
        let (lo, hi) = self.payload_range;
        mass_kg >= lo && mass_kg <= hi
    }
}

// ---------------------------------------------------------------------------
// Payload/outcome filter
// ---------------------------------------------------------------------------

/// Return indices of records passing the current filters, in dataset order.
///
/// A record passes when its payload mass lies within the inclusive range and
/// its site matches the selector. The scatter chart is drawn from exactly
/// this sequence.
pub fn filtered_indices(dataset: &LaunchDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| {
            filters.payload_in_range(rec.payload_mass_kg) && filters.selector.matches(&rec.site)
        })
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{LaunchDataset, LaunchRecord, Outcome};

    fn rec(site: &str, payload: f64, outcome: Outcome, booster: &str) -> LaunchRecord {
        LaunchRecord {
            site: site.to_string(),
            payload_mass_kg: payload,
            outcome,
            booster_category: booster.to_string(),
        }
    }

    /// The worked example: (SiteA, 500, 1, v1), (SiteA, 1500, 0, v1),
    /// (SiteB, 2000, 1, v2).
    fn sample_dataset() -> LaunchDataset {
        LaunchDataset::from_records(vec![
            rec("SiteA", 500.0, Outcome::Success, "v1"),
            rec("SiteA", 1500.0, Outcome::Failure, "v1"),
            rec("SiteB", 2000.0, Outcome::Success, "v2"),
        ])
    }

    fn filters(selector: SiteSelector, lo: f64, hi: f64) -> FilterState {
        FilterState {
            selector,
            payload_range: (lo, hi),
        }
    }

    #[test]
    fn all_sites_range_keeps_only_matching_payloads() {
        let ds = sample_dataset();
        let idx = filtered_indices(&ds, &filters(SiteSelector::AllSites, 0.0, 1000.0));
        assert_eq!(idx, vec![0]);
    }

    #[test]
    fn site_selector_restricts_further() {
        let ds = sample_dataset();
        let idx = filtered_indices(
            &ds,
            &filters(SiteSelector::Site("SiteA".to_string()), 0.0, 10_000.0),
        );
        assert_eq!(idx, vec![0, 1]);
    }

    #[test]
    fn range_bounds_are_inclusive() {
        let ds = sample_dataset();
        let idx = filtered_indices(&ds, &filters(SiteSelector::AllSites, 500.0, 2000.0));
        assert_eq!(idx, vec![0, 1, 2]);
        let idx = filtered_indices(&ds, &filters(SiteSelector::AllSites, 500.0, 500.0));
        assert_eq!(idx, vec![0]);
    }

    #[test]
    fn inverted_range_yields_empty() {
        let ds = sample_dataset();
        let idx = filtered_indices(&ds, &filters(SiteSelector::AllSites, 3000.0, 1000.0));
        assert!(idx.is_empty());
    }

    #[test]
    fn unknown_site_yields_empty() {
        let ds = sample_dataset();
        let idx = filtered_indices(
            &ds,
            &filters(SiteSelector::Site("SiteC".to_string()), 0.0, 10_000.0),
        );
        assert!(idx.is_empty());
    }

    #[test]
    fn output_preserves_dataset_order() {
        let ds = LaunchDataset::from_records(vec![
            rec("B", 3000.0, Outcome::Success, "v2"),
            rec("A", 1000.0, Outcome::Failure, "v1"),
            rec("B", 2000.0, Outcome::Success, "v2"),
            rec("A", 4000.0, Outcome::Success, "v1"),
        ]);
        let idx = filtered_indices(&ds, &filters(SiteSelector::AllSites, 1000.0, 3000.0));
        assert_eq!(idx, vec![0, 1, 2]);
    }

    #[test]
    fn filtering_is_idempotent() {
        let ds = sample_dataset();
        let f = filters(SiteSelector::AllSites, 400.0, 1800.0);
        let first = filtered_indices(&ds, &f);

        // Re-filter the already-filtered subset with the same bounds.
        let subset =
            LaunchDataset::from_records(first.iter().map(|&i| ds.records[i].clone()).collect());
        let second = filtered_indices(&subset, &f);
        assert_eq!(second.len(), first.len());
        assert!(second
            .iter()
            .zip(&first)
            .all(|(&j, &i)| subset.records[j] == ds.records[i]));
    }

    #[test]
    fn selector_labels() {
        assert_eq!(SiteSelector::AllSites.label(), "All Sites");
        assert_eq!(SiteSelector::Site("KSC LC-39A".into()).label(), "KSC LC-39A");
        assert!(SiteSelector::default().is_all());
    }
}
