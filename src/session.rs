use std::path::{Path, PathBuf};

use crate::config::DashboardConfig;
use crate::data::export::{export, CsvExport};
use crate::data::filter::FilterBounds;
use crate::data::loader::load_file;
use crate::data::model::Table;
use crate::data::views::{render, ViewSet};
use crate::error::DataResult;

/// One dashboard session: the table is loaded once and only read afterwards.
#[derive(Debug, Clone)]
pub struct Session {
    source: PathBuf,
    table: Table,
}

impl Session {
    /// Load the configured database.
    pub fn open(config: &DashboardConfig) -> DataResult<Self> {
        Self::open_path(&config.database, &config.table)
    }

    /// Load any supported file (SQLite database or exported CSV).
    pub fn open_path(path: &Path, table_name: &str) -> DataResult<Self> {
        let table = load_file(path, table_name)?;
        Ok(Self::from_table(path, table))
    }

    pub fn from_table(source: impl Into<PathBuf>, table: Table) -> Self {
        Self {
            source: source.into(),
            table,
        }
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Bounds the dashboard opens with for this table.
    pub fn initial_bounds(&self) -> FilterBounds {
        FilterBounds::initial(&self.table)
    }

    /// Recompute every view for `bounds`.
    pub fn render(&self, bounds: &FilterBounds) -> ViewSet<'_> {
        render(&self.table, bounds)
    }

    /// CSV of the rows passing `bounds`.
    pub fn export_csv(&self, bounds: &FilterBounds) -> DataResult<CsvExport> {
        let views = self.render(bounds);
        export(&self.table, &views.subset)
    }
}
