/// Data layer: tabular input and column selection.
///
/// Architecture:
/// ```text
///  .csv / .txt / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → DataTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ DataTable │  named columns of cells
///   └──────────┘
///        │  wavelength + signal column, mode
///        ▼
///   SpectralSeries
/// ```

pub mod loader;
pub mod model;
