//! Formatted terminal output for the three analyses.
//!
//! We keep formatting code in one place so:
//! - the filter/statistics code stays clean and testable
//! - output changes are localized (important for future snapshot tests)

use crate::cycle::{interpret, LambdaDiagnostics, RelativeVolatility, SensitivityStudy, Synchronization};
use crate::domain::{ComovementSummary, CompareConfig, GrowthConfig, GrowthRow};
use crate::growth::AVERAGE_LABEL;

/// Full comparison summary: statistics, strength label, interpretation.
pub fn format_comparison(summary: &ComovementSummary, config: &CompareConfig) -> String {
    let mut out = String::new();
    let rule = "=".repeat(60);

    out.push_str(&format!("{rule}\n"));
    out.push_str("Business cycle comparison (HP filter on log real GDP)\n");
    out.push_str(&format!("{rule}\n"));
    out.push_str(&format!("Series:  {} vs {}\n", summary.name_a, summary.name_b));
    out.push_str(&format!(
        "Period:  {} .. {} ({} obs)\n",
        summary.start.format("%Y-%m"),
        summary.end.format("%Y-%m"),
        summary.n_obs
    ));
    out.push_str(&format!("Lambda:  {}\n\n", fmt_lambda(config.lambda)));

    out.push_str("Cycle volatility (std dev):\n");
    out.push_str(&format!("  {:<20} {:.4}\n", summary.name_a, summary.std_a));
    out.push_str(&format!("  {:<20} {:.4}\n", summary.name_b, summary.std_b));
    out.push_str(&format!(
        "  ratio ({}/{}): {:.3}\n\n",
        summary.name_a, summary.name_b, summary.std_ratio
    ));

    out.push_str("Correlation of cycles:\n");
    out.push_str(&format!("  coefficient: {:.4}\n", summary.correlation));
    out.push_str(&format!("  strength:    {}\n\n", summary.strength));

    let reading = interpret(summary);
    out.push_str("Interpretation:\n");
    out.push_str(&format!(
        "  - {} cycles are {:.2}x as volatile\n",
        reading.larger, reading.multiple
    ));
    let sync = match reading.synchronization {
        Synchronization::High => "highly synchronized",
        Synchronization::Moderate => "moderately synchronized",
        Synchronization::Low => "weakly synchronized",
    };
    out.push_str(&format!("  - the two business cycles are {sync}\n"));
    let vol = match reading.relative_volatility {
        RelativeVolatility::AMoreVolatile => format!("{} fluctuates more and is less stable", summary.name_a),
        RelativeVolatility::BMoreVolatile => format!("{} fluctuates more and is less stable", summary.name_b),
        RelativeVolatility::Similar => "fluctuations are of similar size".to_string(),
    };
    out.push_str(&format!("  - {vol}\n"));

    out
}

/// Per-λ diagnostics table for the sensitivity study.
pub fn format_sensitivity(study: &SensitivityStudy) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "HP filter sensitivity: {} ({} obs, log levels)\n",
        study.series.name,
        study.series.len()
    ));
    out.push_str(
        format!(
            "{:>10} {:>12} {:>12} {:>12} {:>14}\n",
            "lambda", "cycle_std", "cycle_min", "cycle_max", "trend_rough"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<10} {:-<12} {:-<12} {:-<12} {:-<14}\n", "", "", "", "", "").trim_end());
    out.push('\n');

    for d in &study.diagnostics {
        out.push_str(&format_diagnostics_row(d));
        out.push('\n');
    }
    out
}

fn format_diagnostics_row(d: &LambdaDiagnostics) -> String {
    format!(
        "{:>10} {:>12.5} {:>12.5} {:>12.5} {:>14.3e}",
        fmt_lambda(d.lambda),
        d.cycle_std,
        d.cycle_min,
        d.cycle_max,
        d.trend_roughness
    )
}

/// Table 5.1 style growth accounting table.
pub fn format_growth_table(rows: &[GrowthRow], config: &GrowthConfig) -> String {
    let mut out = String::new();
    let rule = "=".repeat(85);
    let thin = "-".repeat(85);

    out.push_str(&format!(
        "Growth accounting: {}-{} | alpha = {} | 1 - alpha = {:.2}\n",
        config.start_year,
        config.end_year,
        config.alpha,
        1.0 - config.alpha
    ));
    out.push_str(&format!("{rule}\n"));
    out.push_str(
        format!(
            "{:<15} {:<12} {:<12} {:<12} {:<10} {:<10}\n",
            "Country", "Growth Rate", "TFP Growth", "Capital", "TFP Share", "Capital"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:<15} {:<12} {:<12} {:<12} {:<10} {:<10}\n",
            "", "", "", "Deepening", "", "Share"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(&format!("{thin}\n"));

    for r in rows {
        if r.country == AVERAGE_LABEL {
            out.push_str(&format!("{thin}\n"));
        }
        out.push_str(
            format!(
                "{:<15} {:<12.2} {:<12.2} {:<12.2} {:<10.2} {:<10.2}\n",
                r.country, r.growth_rate, r.tfp_growth, r.capital_deepening, r.tfp_share, r.capital_share
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

fn fmt_lambda(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CorrelationStrength;
    use chrono::NaiveDate;

    fn summary() -> ComovementSummary {
        ComovementSummary {
            name_a: "ES".to_string(),
            name_b: "JP".to_string(),
            n_obs: 100,
            start: NaiveDate::from_ymd_opt(1995, 1, 1).unwrap(),
            end: NaiveDate::from_ymd_opt(2019, 10, 1).unwrap(),
            std_a: 0.0212,
            std_b: 0.0141,
            std_ratio: 1.5035,
            correlation: 0.4321,
            strength: CorrelationStrength::ModeratePositive,
        }
    }

    fn compare_config() -> CompareConfig {
        CompareConfig {
            series_a: "ES".to_string(),
            series_b: "JP".to_string(),
            lambda: 1600.0,
            data_dir: None,
            plot: false,
            plot_width: 80,
            plot_height: 20,
            export_csv: None,
            export_json: None,
        }
    }

    #[test]
    fn comparison_mentions_key_numbers() {
        let txt = format_comparison(&summary(), &compare_config());
        assert!(txt.contains("Period:  1995-01 .. 2019-10 (100 obs)"));
        assert!(txt.contains("Lambda:  1600"));
        assert!(txt.contains("coefficient: 0.4321"));
        assert!(txt.contains("strength:    moderate positive"));
        assert!(txt.contains("ES cycles are 1.50x as volatile"));
        assert!(txt.contains("moderately synchronized"));
        assert!(txt.contains("ES fluctuates more"));
    }

    #[test]
    fn growth_table_separates_average() {
        let rows = vec![
            GrowthRow {
                country: "Spain".to_string(),
                growth_rate: 2.5,
                tfp_growth: 0.8,
                capital_deepening: 2.7,
                tfp_share: 0.32,
                capital_share: 0.45,
            },
            GrowthRow {
                country: AVERAGE_LABEL.to_string(),
                growth_rate: 2.5,
                tfp_growth: 0.8,
                capital_deepening: 2.7,
                tfp_share: 0.32,
                capital_share: 0.45,
            },
        ];
        let config = GrowthConfig {
            start_year: 1990,
            end_year: 2019,
            alpha: 0.33,
            seed: 42,
            export_csv: None,
        };
        let txt = format_growth_table(&rows, &config);
        let lines: Vec<&str> = txt.lines().collect();
        assert_eq!(lines[0], "Growth accounting: 1990-2019 | alpha = 0.33 | 1 - alpha = 0.67");
        assert!(lines[5].starts_with("Spain           2.50"));
        assert_eq!(lines[6], "-".repeat(85));
        assert!(lines[7].starts_with("Average"));
    }

    #[test]
    fn lambda_formatting() {
        assert_eq!(fmt_lambda(1600.0), "1600");
        assert_eq!(fmt_lambda(6.25), "6.25");
    }
}
