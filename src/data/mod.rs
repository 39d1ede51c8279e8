/// Data layer: core types, loading, and filtering.
///
/// Architecture:
/// ```text
///  .json / .csv / embedding app
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → GeoDataset
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ GeoDataset  │  Vec<DataPoint>, unique-value indexes
///   └────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  structured state OR query predicate → indices
///   └──────────┘
/// ```

pub mod filter;
pub mod loader;
pub mod model;
pub mod sample;
