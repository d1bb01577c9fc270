//! Data acquisition: FRED, local CSV downloads, and the synthetic growth panel.

use std::path::Path;

use crate::domain::TimeSeries;
use crate::error::AppError;

pub mod csv_dir;
pub mod fred;
pub mod synthetic;

pub use csv_dir::CsvDirProvider;
pub use fred::FredClient;
pub use synthetic::{generate_panel, PanelRow, OECD_COUNTRIES};

/// Supplies a gap-free series for a series identifier.
///
/// Provider failures (network, missing files, empty results) are returned
/// as-is; they are not classified by the analysis core.
pub trait SeriesProvider {
    fn fetch(&self, series_id: &str) -> Result<TimeSeries, AppError>;
}

/// Local CSV directory when given, FRED otherwise.
pub fn provider_for(data_dir: Option<&Path>) -> Result<Box<dyn SeriesProvider>, AppError> {
    match data_dir {
        Some(dir) => Ok(Box::new(CsvDirProvider::new(dir))),
        None => Ok(Box::new(FredClient::from_env()?)),
    }
}
