//! Demographics dashboard core: load the factbook `facts` table, filter it by
//! inclusive numeric ranges and derive the views the dashboard draws.

pub mod config;
pub mod data;
pub mod error;
pub mod session;

pub use config::DashboardConfig;
pub use data::filter::FilterBounds;
pub use data::model::{CellValue, Field, Measure, Record, Table};
pub use data::views::ViewSet;
pub use error::{DataError, DataResult};
pub use session::Session;
