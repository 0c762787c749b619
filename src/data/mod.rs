/// Data layer: typed tables, loading, caching and plot sampling.
///
/// Architecture:
/// ```text
///  data/*.xlsx (or .csv)
///        │
///        ▼
///   ┌──────────┐
///   │  store    │  SheetSource::read → bytes, memoised by path
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse bytes → Table, then check required columns
///   └──────────┘
///        │
///        ▼
///   ┌──────────────┐
///   │ points/sample │  typed X/Y/Z/grade columns, capped random subset
///   └──────────────┘
/// ```

pub mod error;
pub mod loader;
pub mod model;
pub mod points;
pub mod sample;
pub mod store;

#[cfg(test)]
pub(crate) mod fixtures;
