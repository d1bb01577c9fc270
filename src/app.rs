//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - fetches series (FRED or a local CSV directory)
//! - runs the HP filter and comovement statistics
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, CompareArgs, GrowthArgs, SensitivityArgs};
use crate::cycle::fit_cycle_regression;
use crate::data::provider_for;
use crate::domain::{CompareConfig, GrowthConfig, SensitivityConfig};
use crate::error::AppError;
use crate::plot::{render_line_plot, render_scatter, PlotSeries};

pub mod pipeline;

/// Entry point for the `hpc` binary.
pub fn run() -> Result<(), AppError> {
    // We want `hpc` and `hpc -l 400` to behave like `hpc tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of the
    // argv list before parsing.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Compare(args) => handle_compare(&args),
        Command::Sensitivity(args) => handle_sensitivity(&args),
        Command::Growth(args) => handle_growth(&args),
        Command::Tui(args) => crate::tui::run(compare_config_from_args(&args)),
    }
}

fn handle_compare(args: &CompareArgs) -> Result<(), AppError> {
    let config = compare_config_from_args(args);
    let provider = provider_for(config.data_dir.as_deref())?;
    let run = pipeline::run_compare(provider.as_ref(), &config)?;

    println!("{}", crate::report::format_comparison(&run.summary, &config));

    if config.plot {
        let cycle_a = run.a.cycle.xy();
        let cycle_b = run.b.cycle.xy();
        let plot = render_line_plot(
            &[
                PlotSeries { label: &run.summary.name_a, points: &cycle_a },
                PlotSeries { label: &run.summary.name_b, points: &cycle_b },
            ],
            config.plot_width,
            config.plot_height,
            true,
        );
        println!("{plot}");

        let points: Vec<(f64, f64)> = run
            .a
            .cycle
            .values()
            .into_iter()
            .zip(run.b.cycle.values())
            .collect();
        let fit = fit_cycle_regression(&run.a.cycle, &run.b.cycle);
        println!("{}", render_scatter(&points, fit, config.plot_width, config.plot_height));
    }

    if let Some(path) = &config.export_csv {
        crate::io::write_cycles_csv(path, &run.a, &run.b)?;
        log::info!("wrote {}", path.display());
    }
    if let Some(path) = &config.export_json {
        crate::io::write_comparison_json(path, &run.summary, &run.a, &run.b)?;
        log::info!("wrote {}", path.display());
    }

    Ok(())
}

fn handle_sensitivity(args: &SensitivityArgs) -> Result<(), AppError> {
    let config = sensitivity_config_from_args(args);
    let provider = provider_for(config.data_dir.as_deref())?;
    let study = pipeline::run_sensitivity(provider.as_ref(), &config)?;

    println!("{}", crate::report::format_sensitivity(&study));

    if config.plot {
        let labels: Vec<String> = study
            .results
            .iter()
            .map(|r| format!("lambda={}", r.lambda))
            .collect();

        let original = study.series.xy();
        let trends: Vec<Vec<(f64, f64)>> = study.results.iter().map(|r| r.trend.xy()).collect();
        let mut series = vec![PlotSeries { label: &study.series.name, points: &original }];
        series.extend(
            labels
                .iter()
                .zip(&trends)
                .map(|(label, points)| PlotSeries { label, points }),
        );
        println!("Original and trends");
        println!("{}", render_line_plot(&series, config.plot_width, config.plot_height, false));

        let cycles: Vec<Vec<(f64, f64)>> = study.results.iter().map(|r| r.cycle.xy()).collect();
        let series: Vec<PlotSeries<'_>> = labels
            .iter()
            .zip(&cycles)
            .map(|(label, points)| PlotSeries { label, points })
            .collect();
        println!("Cycles");
        println!("{}", render_line_plot(&series, config.plot_width, config.plot_height, true));
    }

    Ok(())
}

fn handle_growth(args: &GrowthArgs) -> Result<(), AppError> {
    let config = growth_config_from_args(args);
    let rows = pipeline::run_growth(&config)?;

    println!("{}", crate::report::format_growth_table(&rows, &config));

    if let Some(path) = &config.export_csv {
        crate::io::write_growth_csv(path, &rows)?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

pub fn compare_config_from_args(args: &CompareArgs) -> CompareConfig {
    CompareConfig {
        series_a: args.series_a.clone(),
        series_b: args.series_b.clone(),
        lambda: args.lambda,
        data_dir: args.source.data_dir.clone(),
        plot: !args.source.no_plot,
        plot_width: args.source.width,
        plot_height: args.source.height,
        export_csv: args.export.clone(),
        export_json: args.export_json.clone(),
    }
}

pub fn sensitivity_config_from_args(args: &SensitivityArgs) -> SensitivityConfig {
    SensitivityConfig {
        series: args.series.clone(),
        lambdas: args.lambdas.clone(),
        data_dir: args.source.data_dir.clone(),
        plot: !args.source.no_plot,
        plot_width: args.source.width,
        plot_height: args.source.height,
    }
}

pub fn growth_config_from_args(args: &GrowthArgs) -> GrowthConfig {
    GrowthConfig {
        start_year: args.start,
        end_year: args.end,
        alpha: args.alpha,
        seed: args.seed,
        export_csv: args.export.clone(),
    }
}

/// Rewrite argv so `hpc` defaults to `hpc tui`.
///
/// Rules:
/// - `hpc`                       -> `hpc tui`
/// - `hpc -l 400 ...`            -> `hpc tui -l 400 ...`
/// - `hpc --help/--version/-h`   -> unchanged (show top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version = matches!(
        arg1.as_str(),
        "-h" | "--help" | "-V" | "--version" | "help"
    );
    if is_top_level_help_or_version {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
    }

    argv
}
