/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → LaunchDataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ LaunchDataset │  Vec<LaunchRecord>, site / booster indices
///   └──────────────┘
///        │
///        ├──────────────────────┐
///        ▼                      ▼
///   ┌──────────┐          ┌───────────┐
///   │  filter   │          │ aggregate │
///   └──────────┘          └───────────┘
///   payload/site →          site →
///   scatter indices         pie slices
/// ```

pub mod aggregate;
pub mod filter;
pub mod loader;
pub mod model;
