//! Growth accounting with a Cobb–Douglas production function.
//!
//! With `Y = A K^α L^(1-α)`, growth rates decompose as
//!
//! ```text
//! g_Y = g_A + α g_K + (1 - α) g_L
//! ```
//!
//! so TFP growth is the residual `g_A = g_Y - α g_K - (1 - α) g_L`.
//! Growth rates are annualized over the whole sample:
//! `g = (X_end / X_start)^(1 / (T - 1)) - 1`.

use crate::data::{PanelRow, OECD_COUNTRIES};
use crate::domain::GrowthRow;
use crate::error::AppError;

pub const AVERAGE_LABEL: &str = "Average";

/// Unrounded decomposition for one country (rates as decimals).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposition {
    pub gdp_growth: f64,
    pub capital_growth: f64,
    pub labor_growth: f64,
    pub tfp_growth: f64,
}

fn annualized(first: f64, last: f64, periods: i32) -> f64 {
    (last / first).powf(1.0 / periods as f64) - 1.0
}

/// Decompose one country's series, sorted by year. `None` below two years.
///
/// Growth is annualized over the calendar span `last.year - first.year`, so a
/// panel with missing years is not mistaken for a shorter one.
pub fn decompose_country(rows: &[&PanelRow], alpha: f64) -> Option<Decomposition> {
    if rows.len() < 2 {
        return None;
    }
    let first = rows.first()?;
    let last = rows.last()?;
    let periods = last.year - first.year;
    if periods <= 0 {
        return None;
    }

    let gdp_growth = annualized(first.gdp, last.gdp, periods);
    let capital_growth = annualized(first.capital, last.capital, periods);
    let labor_growth = annualized(first.labor, last.labor, periods);
    let tfp_growth = gdp_growth - alpha * capital_growth - (1.0 - alpha) * labor_growth;

    Some(Decomposition {
        gdp_growth,
        capital_growth,
        labor_growth,
        tfp_growth,
    })
}

impl Decomposition {
    /// Table row: rates in percent, shares of GDP growth (zero when GDP shrank).
    pub fn to_row(&self, country: &str, alpha: f64) -> GrowthRow {
        let (tfp_share, capital_share) = if self.gdp_growth > 0.0 {
            (
                self.tfp_growth / self.gdp_growth,
                alpha * self.capital_growth / self.gdp_growth,
            )
        } else {
            (0.0, 0.0)
        };

        GrowthRow {
            country: country.to_string(),
            growth_rate: self.gdp_growth * 100.0,
            tfp_growth: self.tfp_growth * 100.0,
            capital_deepening: (self.capital_growth - self.labor_growth) * 100.0,
            tfp_share,
            capital_share,
        }
    }
}

/// Per-country rows in table order; countries with fewer than two years are skipped.
pub fn growth_accounting(panel: &[PanelRow], alpha: f64) -> Result<Vec<GrowthRow>, AppError> {
    if !(alpha.is_finite() && alpha > 0.0 && alpha < 1.0) {
        return Err(AppError::new(2, format!("Capital share must be in (0, 1), got {alpha}.")));
    }

    let mut out = Vec::with_capacity(OECD_COUNTRIES.len());
    for country in OECD_COUNTRIES {
        let mut rows: Vec<&PanelRow> = panel.iter().filter(|r| r.country == country).collect();
        rows.sort_by_key(|r| r.year);

        match decompose_country(&rows, alpha) {
            Some(d) => out.push(d.to_row(country, alpha)),
            None => log::warn!("{country}: fewer than two years of data, skipped"),
        }
    }
    Ok(out)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Round to two decimals and append the average row (mean of rounded values).
pub fn format_table(rows: &[GrowthRow]) -> Vec<GrowthRow> {
    let mut out: Vec<GrowthRow> = rows
        .iter()
        .map(|r| GrowthRow {
            country: r.country.clone(),
            growth_rate: round2(r.growth_rate),
            tfp_growth: round2(r.tfp_growth),
            capital_deepening: round2(r.capital_deepening),
            tfp_share: round2(r.tfp_share),
            capital_share: round2(r.capital_share),
        })
        .collect();

    if out.is_empty() {
        return out;
    }

    let n = out.len() as f64;
    let avg = |f: fn(&GrowthRow) -> f64| round2(out.iter().map(f).sum::<f64>() / n);
    let average = GrowthRow {
        country: AVERAGE_LABEL.to_string(),
        growth_rate: avg(|r| r.growth_rate),
        tfp_growth: avg(|r| r.tfp_growth),
        capital_deepening: avg(|r| r.capital_deepening),
        tfp_share: avg(|r| r.tfp_share),
        capital_share: avg(|r| r.capital_share),
    };
    out.push(average);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate_panel;
    use crate::domain::GrowthConfig;

    fn row(country: &str, year: i32, gdp: f64, capital: f64, labor: f64) -> PanelRow {
        PanelRow {
            country: country.to_string(),
            year,
            gdp,
            capital,
            labor,
        }
    }

    #[test]
    fn decomposition_satisfies_growth_identity() {
        let rows = [row("Spain", 1990, 100.0, 300.0, 100.0), row("Spain", 1992, 110.25, 340.0, 102.0)];
        let refs: Vec<&PanelRow> = rows.iter().collect();
        let alpha = 0.33;
        let d = decompose_country(&refs, alpha).unwrap();
        assert!((d.gdp_growth - 0.05).abs() < 1e-12);
        let rebuilt = d.tfp_growth + alpha * d.capital_growth + (1.0 - alpha) * d.labor_growth;
        assert!((rebuilt - d.gdp_growth).abs() < 1e-12);
    }

    #[test]
    fn contiguous_years_annualize_per_row() {
        let rows = [
            row("Japan", 2000, 100.0, 300.0, 100.0),
            row("Japan", 2001, 101.0, 303.0, 100.5),
            row("Japan", 2002, 102.01, 306.03, 101.0025),
        ];
        let refs: Vec<&PanelRow> = rows.iter().collect();
        let d = decompose_country(&refs, 0.33).unwrap();
        assert!((d.gdp_growth - 0.01).abs() < 1e-12);
        assert!((d.capital_growth - 0.01).abs() < 1e-12);
        assert!((d.labor_growth - 0.005).abs() < 1e-12);
    }

    #[test]
    fn shares_are_zero_when_gdp_shrinks() {
        let rows = [row("Greece", 2008, 100.0, 300.0, 100.0), row("Greece", 2009, 95.0, 301.0, 99.0)];
        let refs: Vec<&PanelRow> = rows.iter().collect();
        let r = decompose_country(&refs, 0.33).unwrap().to_row("Greece", 0.33);
        assert_eq!((r.tfp_share, r.capital_share), (0.0, 0.0));
        assert!(r.growth_rate < 0.0);
    }

    #[test]
    fn single_year_country_is_skipped() {
        let panel = vec![row("Spain", 1990, 100.0, 300.0, 100.0)];
        assert!(growth_accounting(&panel, 0.33).unwrap().is_empty());
        assert_eq!(growth_accounting(&panel, 1.5).unwrap_err().exit_code(), 2);
    }

    #[test]
    fn table_has_average_row_of_rounded_values() {
        let config = GrowthConfig {
            start_year: 1990,
            end_year: 2019,
            alpha: 0.33,
            seed: 42,
            export_csv: None,
        };
        let panel = generate_panel(&config).unwrap();
        let rows = growth_accounting(&panel, config.alpha).unwrap();
        assert_eq!(rows.len(), 22);

        let table = format_table(&rows);
        assert_eq!(table.len(), 23);
        let avg = table.last().unwrap();
        assert_eq!(avg.country, AVERAGE_LABEL);

        let mean_growth = table[..22].iter().map(|r| r.growth_rate).sum::<f64>() / 22.0;
        assert!((avg.growth_rate - round2(mean_growth)).abs() < 1e-9);
        for r in &table {
            assert!((r.tfp_growth * 100.0 - (r.tfp_growth * 100.0).round()).abs() < 1e-6);
        }
    }
}
