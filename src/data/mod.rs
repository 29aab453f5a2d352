/// Data layer: core types, loading/validation, and spatial statistics.
///
/// Architecture:
/// ```text
///  whitespace-delimited table
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → MeasurementTable + schema errors
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ MeasurementTable  │  ordered columns, typed cells
///   └──────────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  stats    │  robust layout checks → warnings
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod stats;
