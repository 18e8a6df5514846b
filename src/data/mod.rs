/// Data layer: core types and loading.
///
/// Architecture:
/// ```text
///  .parquet / .json / .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Vec<PenguinRecord>
///   └──────────┘
///        │
///        ▼
///   ┌────────────────┐
///   │ PenguinDataset │  drop missing body mass, index species
///   └────────────────┘
/// ```

pub mod loader;
pub mod model;
