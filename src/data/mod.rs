/// Data layer: record model, loading, normalization, domains and projection.
///
/// Architecture:
/// ```text
///  .csv / .json
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → raw rows (structural errors are terminal)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ normalize  │  drop invalid rows, coerce types → Vec<Observation>
///   └───────────┘
///        │
///        ├──────────────▶ domains     (once: municipalities, segments, metrics)
///        ▼
///   ┌────────────┐
///   │ projection  │  active window + selection → Vec<Series>
///   └────────────┘
/// ```

pub mod domains;
pub mod filter;
pub mod loader;
pub mod model;
pub mod normalize;
pub mod projection;
