//! Command-line parsing for the HP-filter business cycle tool.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the filtering/statistics code.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::{DEFAULT_SENSITIVITY_LAMBDAS, LAMBDA_QUARTERLY, SERIES_JAPAN_GDP, SERIES_SPAIN_GDP};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "hpc", version, about = "HP-filter business cycle comparison (FRED-based)")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Decompose two log GDP series and compare their cycles.
    Compare(CompareArgs),
    /// Decompose one series with several smoothing parameters.
    Sensitivity(SensitivityArgs),
    /// Growth accounting on a synthetic OECD panel.
    Growth(GrowthArgs),
    /// Launch the interactive TUI.
    ///
    /// Uses the same comparison pipeline as `hpc compare`, rendered with Ratatui.
    Tui(CompareArgs),
}

/// Where series come from and how plots are sized.
#[derive(Debug, Args, Clone)]
pub struct SourceArgs {
    /// Read `<DIR>/<SERIES>.csv` (FRED download format) instead of calling the API.
    #[arg(long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Disable the terminal plot.
    #[arg(long)]
    pub no_plot: bool,

    /// Plot width (columns).
    #[arg(long, default_value_t = 100)]
    pub width: usize,

    /// Plot height (rows).
    #[arg(long, default_value_t = 25)]
    pub height: usize,
}

/// Options for comparing two series.
#[derive(Debug, Args, Clone)]
pub struct CompareArgs {
    /// First series id.
    #[arg(short = 'a', long = "series-a", default_value = SERIES_SPAIN_GDP)]
    pub series_a: String,

    /// Second series id.
    #[arg(short = 'b', long = "series-b", default_value = SERIES_JAPAN_GDP)]
    pub series_b: String,

    /// HP smoothing parameter.
    #[arg(short = 'l', long, default_value_t = LAMBDA_QUARTERLY)]
    pub lambda: f64,

    #[command(flatten)]
    pub source: SourceArgs,

    /// Export aligned trends and cycles to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Export summary, interpretation and both decompositions to JSON.
    #[arg(long = "export-json")]
    pub export_json: Option<PathBuf>,
}

/// Options for the smoothing-parameter study.
#[derive(Debug, Args, Clone)]
pub struct SensitivityArgs {
    /// Series id.
    #[arg(short = 's', long, default_value = SERIES_SPAIN_GDP)]
    pub series: String,

    /// Comma-separated smoothing parameters.
    #[arg(long, value_delimiter = ',', default_values_t = DEFAULT_SENSITIVITY_LAMBDAS)]
    pub lambdas: Vec<f64>,

    #[command(flatten)]
    pub source: SourceArgs,
}

/// Options for the growth accounting table.
#[derive(Debug, Args, Clone)]
pub struct GrowthArgs {
    /// First year of the panel.
    #[arg(long, default_value_t = 1990)]
    pub start: i32,

    /// Last year of the panel.
    #[arg(long, default_value_t = 2019)]
    pub end: i32,

    /// Capital share of income.
    #[arg(long, default_value_t = 0.33)]
    pub alpha: f64,

    /// Random seed for the synthetic panel.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Export the table to CSV.
    #[arg(long)]
    pub export: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compare_defaults() {
        let cli = Cli::parse_from(["hpc", "compare"]);
        let Command::Compare(args) = cli.command else {
            panic!("expected compare");
        };
        assert_eq!(args.series_a, SERIES_SPAIN_GDP);
        assert_eq!(args.series_b, SERIES_JAPAN_GDP);
        assert_eq!(args.lambda, 1600.0);
        assert!(!args.source.no_plot);
        assert!(args.source.data_dir.is_none());
    }

    #[test]
    fn sensitivity_parses_lambda_list() {
        let cli = Cli::parse_from(["hpc", "sensitivity", "--lambdas", "6.25,129600"]);
        let Command::Sensitivity(args) = cli.command else {
            panic!("expected sensitivity");
        };
        assert_eq!(args.lambdas, vec![6.25, 129600.0]);

        let cli = Cli::parse_from(["hpc", "sensitivity"]);
        let Command::Sensitivity(args) = cli.command else {
            panic!("expected sensitivity");
        };
        assert_eq!(args.lambdas, vec![10.0, 100.0, 1600.0]);
    }

    #[test]
    fn growth_flags() {
        let cli = Cli::parse_from(["hpc", "growth", "--alpha", "0.4", "--seed", "7"]);
        let Command::Growth(args) = cli.command else {
            panic!("expected growth");
        };
        assert_eq!((args.start, args.end, args.seed), (1990, 2019, 7));
        assert_eq!(args.alpha, 0.4);
    }
}
