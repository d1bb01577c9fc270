//! CSV exports.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream scripts.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::domain::{FilterResult, GrowthRow};
use crate::error::AppError;

fn create(path: &Path) -> Result<BufWriter<File>, AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create export CSV '{}': {e}", path.display())))?;
    Ok(BufWriter::new(file))
}

fn write_err(e: std::io::Error) -> AppError {
    AppError::new(2, format!("Failed to write export CSV: {e}"))
}

/// Write trend and cycle of two aligned decompositions, one row per date.
pub fn write_cycles_csv(path: &Path, a: &FilterResult, b: &FilterResult) -> Result<(), AppError> {
    let mut w = create(path)?;
    write_cycles(&mut w, a, b)?;
    w.flush().map_err(write_err)
}

fn write_cycles<W: Write>(w: &mut W, a: &FilterResult, b: &FilterResult) -> Result<(), AppError> {
    if a.cycle.dates() != b.cycle.dates() {
        return Err(AppError::new(2, "Cannot export cycles that are not aligned on the same dates."));
    }

    let name_a = &a.cycle.name;
    let name_b = &b.cycle.name;
    let base = |s: &str| s.trim_end_matches(" cycle").to_string();
    writeln!(
        w,
        "date,{a}_trend,{a}_cycle,{b}_trend,{b}_cycle",
        a = base(name_a),
        b = base(name_b)
    )
    .map_err(write_err)?;

    let rows = a
        .trend
        .observations()
        .iter()
        .zip(a.cycle.observations())
        .zip(b.trend.observations().iter().zip(b.cycle.observations()));

    for ((ta, ca), (tb, cb)) in rows {
        writeln!(
            w,
            "{},{:.10},{:.10},{:.10},{:.10}",
            ta.date, ta.value, ca.value, tb.value, cb.value
        )
        .map_err(write_err)?;
    }
    Ok(())
}

/// Write the growth accounting table (including the average row).
pub fn write_growth_csv(path: &Path, rows: &[GrowthRow]) -> Result<(), AppError> {
    let mut w = create(path)?;
    write_growth(&mut w, rows)?;
    w.flush().map_err(write_err)
}

fn write_growth<W: Write>(w: &mut W, rows: &[GrowthRow]) -> Result<(), AppError> {
    writeln!(w, "Country,Growth Rate,TFP Growth,Capital Deepening,TFP Share,Capital Share").map_err(write_err)?;
    for r in rows {
        writeln!(
            w,
            "{},{:.2},{:.2},{:.2},{:.2},{:.2}",
            r.country, r.growth_rate, r.tfp_growth, r.capital_deepening, r.tfp_share, r.capital_share
        )
        .map_err(write_err)?;
    }
    Ok(())
}
