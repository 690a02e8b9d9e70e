/// Data layer: core types, loading, and the frequency transform.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse + validate → ElementDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ transform │  E / h → FrequencyDataset, octave bounds
///   └───────────┘
///        │
///        ▼
///     render
/// ```

pub mod loader;
pub mod model;
pub mod transform;
