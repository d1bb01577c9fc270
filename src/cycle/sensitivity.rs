//! Smoothing-parameter sensitivity of the HP filter.

use serde::Serialize;

use crate::cycle::decompose_many;
use crate::domain::{FilterResult, TimeSeries};
use crate::error::CycleError;
use crate::math::{mean_squared_second_difference, sample_std};

/// Per-λ diagnostics for one series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LambdaDiagnostics {
    pub lambda: f64,
    pub cycle_std: f64,
    pub cycle_min: f64,
    pub cycle_max: f64,
    /// Mean squared second difference of the trend.
    pub trend_roughness: f64,
    /// `trend_roughness` relative to the input series.
    pub roughness_ratio: f64,
}

/// All filter results for one series plus their diagnostics, in λ order.
#[derive(Debug, Clone)]
pub struct SensitivityStudy {
    pub series: TimeSeries,
    pub results: Vec<FilterResult>,
    pub diagnostics: Vec<LambdaDiagnostics>,
}

pub fn lambda_sensitivity(series: &TimeSeries, lambdas: &[f64]) -> Result<SensitivityStudy, CycleError> {
    let results = decompose_many(series, lambdas)?;
    let base_roughness = mean_squared_second_difference(&series.values()).unwrap_or(0.0);

    let diagnostics = results
        .iter()
        .map(|r| {
            let cycle = r.cycle.values();
            let trend_roughness = mean_squared_second_difference(&r.trend.values()).unwrap_or(0.0);
            LambdaDiagnostics {
                lambda: r.lambda,
                cycle_std: sample_std(&cycle).unwrap_or(0.0),
                cycle_min: cycle.iter().copied().fold(f64::INFINITY, f64::min),
                cycle_max: cycle.iter().copied().fold(f64::NEG_INFINITY, f64::max),
                trend_roughness,
                roughness_ratio: if base_roughness > 0.0 {
                    trend_roughness / base_roughness
                } else {
                    0.0
                },
            }
        })
        .collect();

    Ok(SensitivityStudy {
        series: series.clone(),
        results,
        diagnostics,
    })
}
