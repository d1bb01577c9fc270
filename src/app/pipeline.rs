//! Shared analysis pipelines used by both CLI and TUI front-ends.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! fetch -> align -> log -> HP filter -> comovement summary
//!
//! The CLI and the TUI can then focus on presentation (printing vs widgets).

use crate::cycle::{align_common_range, decompose, lambda_sensitivity, summarize_decompositions, SensitivityStudy};
use crate::data::{generate_panel, SeriesProvider};
use crate::domain::{ComovementSummary, CompareConfig, FilterResult, GrowthConfig, GrowthRow, SensitivityConfig, TimeSeries};
use crate::error::AppError;
use crate::growth::{format_table, growth_accounting};

/// Aligned log-level inputs of a comparison, before filtering.
///
/// The TUI keeps these around so it can refilter with a new λ without re-fetching.
#[derive(Debug, Clone)]
pub struct AlignedPair {
    pub a: TimeSeries,
    pub b: TimeSeries,
}

/// All computed outputs of a single `hpc compare` run.
#[derive(Debug, Clone)]
pub struct CompareOutput {
    pub a: FilterResult,
    pub b: FilterResult,
    pub summary: ComovementSummary,
}

/// Fetch both series, restrict them to their common range and take logs.
pub fn fetch_aligned(provider: &dyn SeriesProvider, config: &CompareConfig) -> Result<AlignedPair, AppError> {
    let raw_a = provider.fetch(&config.series_a)?;
    let raw_b = provider.fetch(&config.series_b)?;

    let (a, b) = align_common_range(&raw_a, &raw_b)?;
    log::info!(
        "aligned {} and {}: {} / {} observations",
        a.name,
        b.name,
        a.len(),
        b.len()
    );

    Ok(AlignedPair { a: a.ln()?, b: b.ln()? })
}

/// Filter an aligned pair with `lambda` and summarize the cycles.
pub fn compare_aligned(pair: &AlignedPair, lambda: f64) -> Result<CompareOutput, AppError> {
    let a = decompose(&pair.a, lambda)?;
    let b = decompose(&pair.b, lambda)?;
    let summary = summarize_decompositions(&a, &b)?;
    log::debug!(
        "lambda {lambda}: correlation {:.4} ({}), std ratio {:.3}",
        summary.correlation,
        summary.strength,
        summary.std_ratio
    );
    Ok(CompareOutput { a, b, summary })
}

/// Execute the full comparison pipeline.
pub fn run_compare(provider: &dyn SeriesProvider, config: &CompareConfig) -> Result<CompareOutput, AppError> {
    let pair = fetch_aligned(provider, config)?;
    compare_aligned(&pair, config.lambda)
}

/// Fetch one series and decompose its logs with every configured λ.
pub fn run_sensitivity(provider: &dyn SeriesProvider, config: &SensitivityConfig) -> Result<SensitivityStudy, AppError> {
    if config.lambdas.is_empty() {
        return Err(AppError::new(2, "At least one smoothing parameter is required."));
    }
    let series = provider.fetch(&config.series)?.ln()?;
    log::info!("sensitivity study on {} ({} obs)", series.name, series.len());
    Ok(lambda_sensitivity(&series, &config.lambdas)?)
}

/// Generate the synthetic panel and build the rounded table with its average row.
pub fn run_growth(config: &GrowthConfig) -> Result<Vec<GrowthRow>, AppError> {
    let panel = generate_panel(config)?;
    let rows = growth_accounting(&panel, config.alpha)?;
    log::info!("growth accounting: {} countries", rows.len());
    Ok(format_table(&rows))
}
