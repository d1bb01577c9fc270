//! Shared domain types.
//!
//! These types are intentionally kept lightweight and serializable so they can be:
//!
//! - used in-memory during filtering and summary statistics
//! - exported to JSON/CSV
//! - rendered by the terminal plot and the TUI

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::CycleError;

/// FRED series id for Spain real GDP (chain-linked volumes, quarterly, SA).
pub const SERIES_SPAIN_GDP: &str = "CLVMNACSCAB1GQES";
/// FRED series id for Japan real GDP (quarterly, SA).
pub const SERIES_JAPAN_GDP: &str = "JPNRGDPEXP";

/// Conventional smoothing parameter for quarterly data.
pub const LAMBDA_QUARTERLY: f64 = 1600.0;
/// Smoothing parameters compared by the sensitivity study.
pub const DEFAULT_SENSITIVITY_LAMBDAS: [f64; 3] = [10.0, 100.0, 1600.0];

/// One dated observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub date: NaiveDate,
    pub value: f64,
}

/// An ordered, gap-free time series.
///
/// Invariants (enforced by the constructors):
/// - dates are strictly increasing (no duplicates)
/// - every value is finite
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSeries {
    pub name: String,
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Build a series from already gap-free pairs.
    pub fn new(name: impl Into<String>, points: Vec<(NaiveDate, f64)>) -> Result<Self, CycleError> {
        let name = name.into();
        let mut observations: Vec<Observation> = Vec::with_capacity(points.len());
        for (date, value) in points {
            if !value.is_finite() {
                return Err(CycleError::NonFiniteValue { name, date });
            }
            if let Some(prev) = observations.last() {
                if date <= prev.date {
                    return Err(CycleError::UnorderedDates { name, date });
                }
            }
            observations.push(Observation { date, value });
        }
        Ok(Self { name, observations })
    }

    /// Build a series from raw provider output, dropping missing entries.
    ///
    /// Missing values are removed, never interpolated. Input order does not
    /// matter; duplicate dates are still rejected.
    pub fn from_raw(
        name: impl Into<String>,
        mut raw: Vec<(NaiveDate, Option<f64>)>,
    ) -> Result<Self, CycleError> {
        raw.sort_by_key(|(d, _)| *d);
        let total = raw.len();
        let points: Vec<(NaiveDate, f64)> = raw
            .into_iter()
            .filter_map(|(d, v)| v.filter(|x| x.is_finite()).map(|x| (d, x)))
            .collect();
        let name = name.into();
        if points.len() < total {
            log::debug!("{name}: dropped {} missing observations", total - points.len());
        }
        Self::new(name, points)
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.observations.iter().map(|o| o.date).collect()
    }

    pub fn values(&self) -> Vec<f64> {
        self.observations.iter().map(|o| o.value).collect()
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.observations.first().map(|o| o.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.observations.last().map(|o| o.date)
    }

    /// Keep observations with `start <= date <= end`.
    pub fn slice_range(&self, start: NaiveDate, end: NaiveDate) -> TimeSeries {
        TimeSeries {
            name: self.name.clone(),
            observations: self
                .observations
                .iter()
                .filter(|o| o.date >= start && o.date <= end)
                .copied()
                .collect(),
        }
    }

    /// Natural logarithm of every value.
    pub fn ln(&self) -> Result<TimeSeries, CycleError> {
        let mut observations = Vec::with_capacity(self.observations.len());
        for o in &self.observations {
            if o.value <= 0.0 {
                return Err(CycleError::NonPositiveValue {
                    name: self.name.clone(),
                    date: o.date,
                });
            }
            observations.push(Observation {
                date: o.date,
                value: o.value.ln(),
            });
        }
        Ok(TimeSeries {
            name: self.name.clone(),
            observations,
        })
    }

    /// Same dates, new values (lengths must match; used by the filter).
    pub(crate) fn with_values(&self, name: impl Into<String>, values: &[f64]) -> TimeSeries {
        debug_assert_eq!(values.len(), self.observations.len());
        TimeSeries {
            name: name.into(),
            observations: self
                .observations
                .iter()
                .zip(values)
                .map(|(o, &value)| Observation { date: o.date, value })
                .collect(),
        }
    }

    /// `(x, y)` pairs for plotting, x in fractional years.
    pub fn xy(&self) -> Vec<(f64, f64)> {
        self.observations
            .iter()
            .map(|o| (fractional_year(o.date), o.value))
            .collect()
    }
}

/// Decimal year (e.g. 2001-07-01 → ~2001.5) for chart x-axes.
pub fn fractional_year(date: NaiveDate) -> f64 {
    use chrono::Datelike;
    let days_in_year = if date.leap_year() { 366.0 } else { 365.0 };
    date.year() as f64 + (date.ordinal0() as f64) / days_in_year
}

/// HP filter output: a smooth trend and the residual cycle.
///
/// `trend` and `cycle` share the original dates and satisfy
/// `trend[t] + cycle[t] == original[t]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterResult {
    pub lambda: f64,
    pub trend: TimeSeries,
    pub cycle: TimeSeries,
}

/// Discrete label for the strength of a correlation coefficient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CorrelationStrength {
    VeryStrongPositive,
    StrongPositive,
    ModeratePositive,
    WeakPositive,
    Negligible,
    WeakNegative,
    ModerateOrStrongerNegative,
}

impl CorrelationStrength {
    /// Map a correlation to its label. Lower bounds are inclusive, checked top-down.
    pub fn from_correlation(correlation: f64) -> Self {
        if correlation >= 0.7 {
            Self::VeryStrongPositive
        } else if correlation >= 0.5 {
            Self::StrongPositive
        } else if correlation >= 0.3 {
            Self::ModeratePositive
        } else if correlation >= 0.1 {
            Self::WeakPositive
        } else if correlation >= -0.1 {
            Self::Negligible
        } else if correlation >= -0.3 {
            Self::WeakNegative
        } else {
            Self::ModerateOrStrongerNegative
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryStrongPositive => "very strong positive",
            Self::StrongPositive => "strong positive",
            Self::ModeratePositive => "moderate positive",
            Self::WeakPositive => "weak positive",
            Self::Negligible => "negligible",
            Self::WeakNegative => "weak negative",
            Self::ModerateOrStrongerNegative => "moderate-or-stronger negative",
        }
    }
}

impl std::fmt::Display for CorrelationStrength {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Read-only summary of how two cycle series move together.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComovementSummary {
    pub name_a: String,
    pub name_b: String,
    pub n_obs: usize,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub std_a: f64,
    pub std_b: f64,
    /// `std_a / std_b`.
    pub std_ratio: f64,
    pub correlation: f64,
    pub strength: CorrelationStrength,
}

/// One country row of the growth accounting table.
///
/// Rates are in percent per year; shares are fractions of GDP growth.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GrowthRow {
    pub country: String,
    pub growth_rate: f64,
    pub tfp_growth: f64,
    pub capital_deepening: f64,
    pub tfp_share: f64,
    pub capital_share: f64,
}

/// Configuration for the two-country cycle comparison.
#[derive(Debug, Clone)]
pub struct CompareConfig {
    pub series_a: String,
    pub series_b: String,
    pub lambda: f64,
    /// Read `<dir>/<series>.csv` instead of calling FRED.
    pub data_dir: Option<PathBuf>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
    pub export_csv: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}

/// Configuration for the smoothing-parameter sensitivity study.
#[derive(Debug, Clone)]
pub struct SensitivityConfig {
    pub series: String,
    pub lambdas: Vec<f64>,
    pub data_dir: Option<PathBuf>,
    pub plot: bool,
    pub plot_width: usize,
    pub plot_height: usize,
}

/// Configuration for the synthetic growth accounting exercise.
#[derive(Debug, Clone)]
pub struct GrowthConfig {
    pub start_year: i32,
    pub end_year: i32,
    /// Capital share of income.
    pub alpha: f64,
    pub seed: u64,
    pub export_csv: Option<PathBuf>,
}
