use std::path::PathBuf;

use thiserror::Error;

/// Convenience result type for loading and exporting.
pub type DataResult<T> = Result<T, DataError>;

/// Error type shared by the loader and the CSV export/import.
#[derive(Debug, Error)]
pub enum DataError {
    /// The backing store could not be opened.
    #[error("data store unavailable: {}: {source}", .path.display())]
    StoreUnavailable {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    #[error("table '{0}' not found in data store")]
    MissingTable(String),

    #[error("table '{table}' is missing required columns: {}", .missing.join(", "))]
    MissingColumns { table: String, missing: Vec<String> },

    /// A core column holds a value that does not fit its declared type.
    #[error("invalid value at row {row} column '{column}': {message}")]
    InvalidValue {
        row: usize,
        column: String,
        message: String,
    },

    #[error("unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl DataError {
    /// Whether this error means the session has no table to work with
    /// (store unreachable or schema not what the dashboard expects).
    pub fn is_data_unavailable(&self) -> bool {
        matches!(
            self,
            DataError::StoreUnavailable { .. }
                | DataError::MissingTable(_)
                | DataError::MissingColumns { .. }
                | DataError::Sqlite(_)
        )
    }
}
