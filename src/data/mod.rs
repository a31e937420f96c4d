/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → ClimateDataset (+ ColumnSet capability set)
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ ClimateDataset │  Vec<Record>, column index, year range, country order
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  year range + country selection → filtered indices
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  means, deltas, group-bys, rankings, correlations
///   └──────────┘
/// ```
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
