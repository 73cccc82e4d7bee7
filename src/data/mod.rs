/// Data layer: core types, loading, filtering, derived views and export.
///
/// Architecture:
/// ```text
///   factbook.db (facts) / exported .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  SELECT * FROM facts → Table
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  inclusive range bounds (AND) → Vec<&Record>
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  views    │   │  export   │  subset → CSV bytes
///   └──────────┘   └──────────┘
///   top-10 / scatter / choropleth
/// ```

pub mod export;
pub mod filter;
pub mod loader;
pub mod model;
pub mod views;
