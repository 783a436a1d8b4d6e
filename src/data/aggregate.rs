use super::filter::SiteSelector;
use super::model::{LaunchDataset, Outcome};

// ---------------------------------------------------------------------------
// PieSlice – one named count for the success pie chart
// ---------------------------------------------------------------------------

/// One slice of the success pie chart: a label and its count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PieSlice {
    pub label: String,
    pub count: usize,
}

impl PieSlice {
    fn new(label: impl Into<String>, count: usize) -> Self {
        PieSlice {
            label: label.into(),
            count,
        }
    }
}

// ---------------------------------------------------------------------------
// Site success aggregation
// ---------------------------------------------------------------------------

/// Compute the pie chart payload for the current site selector.
///
/// * `AllSites`: one slice per distinct site (in first-appearance order)
///   counting that site's successful launches. Sites with zero successes
///   keep their zero-count slice.
/// * One site: slices "Success" and "Failure" counting that site's records
///   by outcome; classes with no occurrences are omitted. A site with no
///   records at all (including an unknown site name) yields no slices.
pub fn success_pie(dataset: &LaunchDataset, selector: &SiteSelector) -> Vec<PieSlice> {
    match selector {
        SiteSelector::AllSites => successes_by_site(dataset),
        SiteSelector::Site(site) => outcome_split(dataset, site),
    }
}

/// Per-site success counts, one slice per site in dataset site order.
fn successes_by_site(dataset: &LaunchDataset) -> Vec<PieSlice> {
    dataset
        .sites
        .iter()
        .map(|site| {
            let successes = dataset
                .records
                .iter()
                .filter(|r| &r.site == site && r.outcome == Outcome::Success)
                .count();
            PieSlice::new(site.clone(), successes)
        })
        .collect()
}

/// Success/failure split for a single site. Empty when the site matches no
/// records.
fn outcome_split(dataset: &LaunchDataset, site: &str) -> Vec<PieSlice> {
    let mut successes = 0usize;
    let mut failures = 0usize;
    for rec in dataset.records.iter().filter(|r| r.site == site) {
        match rec.outcome {
            Outcome::Success => successes += 1,
            Outcome::Failure => failures += 1,
        }
    }

    let mut slices = Vec::with_capacity(2);
    if successes > 0 {
        slices.push(PieSlice::new(Outcome::Success.label(), successes));
    }
    if failures > 0 {
        slices.push(PieSlice::new(Outcome::Failure.label(), failures));
    }
    slices
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
