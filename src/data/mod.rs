/// Data layer: core types, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///    movies.csv
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  (path, mtime) → Arc<Dataset>
///   └──────────┘
///        │ miss
///        ▼
///   ┌──────────┐
///   │  loader   │  project columns, coerce, drop bad rows → Dataset
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  genre ∧ years ∧ title → FilteredView
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  summary, tiers, top-N, genres, correlation → ViewReport
///   └──────────┘
/// ```

pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod stats;
pub mod tier;
