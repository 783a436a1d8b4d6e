use std::collections::BTreeSet;
use std::fmt;

// ---------------------------------------------------------------------------
// Outcome – the binary `class` column
// ---------------------------------------------------------------------------

/// Launch outcome, the `class` column of the source table (0 or 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    /// Map a raw `class` value. Anything other than 0 or 1 is a malformed row.
    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// The raw `class` value, used as the scatter chart's y coordinate.
    pub fn as_class(self) -> i64 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct LaunchRecord {
    /// Launch site name (`Launch Site` column).
    pub site: String,
    /// Payload mass in kilograms (`Payload Mass (kg)` column).
    pub payload_mass_kg: f64,
    /// Launch outcome (`class` column).
    pub outcome: Outcome,
    /// Booster version category (`Booster Version Category` column).
    pub booster_category: String,
}

// ---------------------------------------------------------------------------
// LaunchDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed category indices.
///
/// Loaded once at startup and treated as immutable for the process lifetime;
/// every chart payload is derived from it by pure functions.
#[derive(Debug, Clone)]
pub struct LaunchDataset {
    /// All launches, in source order.
    pub records: Vec<LaunchRecord>,
    /// Distinct launch sites in first-appearance order (dropdown options).
    pub sites: Vec<String>,
    /// Sorted distinct booster version categories (scatter legend domain).
    pub booster_categories: BTreeSet<String>,
}

impl LaunchDataset {
    /// Build the category indices from the loaded records.
    pub fn from_records(records: Vec<LaunchRecord>) -> Self {
        let mut sites: Vec<String> = Vec::new();
        let mut booster_categories: BTreeSet<String> = BTreeSet::new();

        for rec in &records {
            if !sites.iter().any(|s| s == &rec.site) {
                sites.push(rec.site.clone());
            }
            booster_categories.insert(rec.booster_category.clone());
        }

        LaunchDataset {
            records,
            sites,
            booster_categories,
        }
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Min and max payload mass over the whole dataset, used to seed the
    /// payload range control. `None` when the dataset is empty.
    pub fn payload_bounds(&self) -> Option<(f64, f64)> {
        let mut iter = self.records.iter().map(|r| r.payload_mass_kg);
        let first = iter.next()?;
        let (lo, hi) = iter.fold((first, first), |(lo, hi), m| (lo.min(m), hi.max(m)));
        Some((lo, hi))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
