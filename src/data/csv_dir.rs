//! Offline provider: FRED-style CSV downloads in a local directory.
//!
//! Each series lives in `<dir>/<series_id>.csv` with a header row and two
//! columns, date (`YYYY-MM-DD`) and value, as produced by FRED's
//! "Download CSV" button. Missing values (`.` or empty) are dropped.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::data::SeriesProvider;
use crate::data::fred::parse_value;
use crate::domain::TimeSeries;
use crate::error::AppError;

pub struct CsvDirProvider {
    dir: PathBuf,
}

impl CsvDirProvider {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, series_id: &str) -> PathBuf {
        self.dir.join(format!("{series_id}.csv"))
    }
}

impl SeriesProvider for CsvDirProvider {
    fn fetch(&self, series_id: &str) -> Result<TimeSeries, AppError> {
        let path = self.path_for(series_id);
        log::info!("reading {series_id} from {}", path.display());
        let text = fs::read_to_string(&path)
            .map_err(|e| AppError::new(2, format!("Failed to read '{}': {e}", path.display())))?;
        parse_series_csv(series_id, &text, &path)
    }
}

fn parse_series_csv(series_id: &str, text: &str, path: &Path) -> Result<TimeSeries, AppError> {
    // The first row is always a header (DATE,VALUE / observation_date,<id>).
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    reader
        .headers()
        .map_err(|e| AppError::new(2, format!("Failed to read CSV headers in '{}': {e}", path.display())))?;

    let mut raw = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|e| AppError::new(2, format!("{}: invalid CSV: {e}", path.display())))?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let (Some(date_raw), Some(value_raw)) = (record.get(0), record.get(1)) else {
            return Err(AppError::new(
                2,
                format!("{}:{line}: expected 'date,value'", path.display()),
            ));
        };

        let date = NaiveDate::parse_from_str(date_raw, "%Y-%m-%d").map_err(|e| {
            AppError::new(
                2,
                format!("{}:{line}: invalid date '{date_raw}': {e}", path.display()),
            )
        })?;
        raw.push((date, parse_value(value_raw)));
    }

    let series = TimeSeries::from_raw(series_id, raw)?;
    if series.is_empty() {
        return Err(AppError::new(2, format!("No observations in '{}'.", path.display())));
    }
    Ok(series)
}
