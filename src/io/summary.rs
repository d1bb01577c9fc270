//! Comparison JSON export.
//!
//! The JSON file is the portable record of a comparison run: the summary
//! statistics, their interpretation, and both decompositions (trend + cycle).

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::cycle::{interpret, Interpretation};
use crate::domain::{ComovementSummary, FilterResult};
use crate::error::AppError;

#[derive(Debug, Serialize)]
pub struct ComparisonFile<'a> {
    pub tool: &'static str,
    pub lambda: f64,
    pub summary: &'a ComovementSummary,
    pub interpretation: Interpretation,
    pub series_a: &'a FilterResult,
    pub series_b: &'a FilterResult,
}

impl<'a> ComparisonFile<'a> {
    pub fn new(summary: &'a ComovementSummary, a: &'a FilterResult, b: &'a FilterResult) -> Self {
        Self {
            tool: "hpc",
            lambda: a.lambda,
            summary,
            interpretation: interpret(summary),
            series_a: a,
            series_b: b,
        }
    }
}

/// Write a comparison JSON file.
pub fn write_comparison_json(
    path: &Path,
    summary: &ComovementSummary,
    a: &FilterResult,
    b: &FilterResult,
) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &ComparisonFile::new(summary, a, b))
        .map_err(|e| AppError::new(2, format!("Failed to write comparison JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::{decompose, summarize_comovement};
    use crate::domain::TimeSeries;
    use chrono::NaiveDate;

    #[test]
    fn json_contains_summary_and_cycles() {
        let points = |phase: f64| {
            (0..12)
                .map(|i| {
                    (
                        NaiveDate::from_ymd_opt(2000 + i, 1, 1).unwrap(),
                        10.0 + 0.1 * i as f64 + 0.05 * (i as f64 + phase).sin(),
                    )
                })
                .collect::<Vec<_>>()
        };
        let a = decompose(&TimeSeries::new("ES", points(0.0)).unwrap(), 100.0).unwrap();
        let b = decompose(&TimeSeries::new("JP", points(0.7)).unwrap(), 100.0).unwrap();
        let summary = summarize_comovement(&a.cycle, &b.cycle).unwrap();

        let value = serde_json::to_value(ComparisonFile::new(&summary, &a, &b)).unwrap();
        assert_eq!(value["tool"].as_str(), Some("hpc"));
        assert_eq!(value["lambda"].as_f64(), Some(100.0));
        assert_eq!(value["summary"]["n_obs"].as_u64(), Some(12));
        assert!(value["summary"]["strength"].is_string());
        assert_eq!(value["series_a"]["cycle"]["observations"].as_array().unwrap().len(), 12);
        assert_eq!(value["series_b"]["trend"]["observations"][0]["date"].as_str(), Some("2000-01-01"));
    }
}
