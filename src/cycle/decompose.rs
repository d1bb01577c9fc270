//! Trend/cycle decomposition of a single series.

use crate::domain::{FilterResult, TimeSeries};
use crate::error::CycleError;
use crate::math::hp_filter;

/// Split `series` into an HP trend and the residual cycle.
///
/// Fails with `InsufficientData` below three observations and with
/// `InvalidLambda` unless `lambda` is positive and finite.
pub fn decompose(series: &TimeSeries, lambda: f64) -> Result<FilterResult, CycleError> {
    let values = series.values();
    let (trend, cycle) = hp_filter(&values, lambda)?;

    Ok(FilterResult {
        lambda,
        trend: series.with_values(format!("{} trend", series.name), &trend),
        cycle: series.with_values(format!("{} cycle", series.name), &cycle),
    })
}

/// Decompose the same series once per smoothing parameter, in order.
pub fn decompose_many(series: &TimeSeries, lambdas: &[f64]) -> Result<Vec<FilterResult>, CycleError> {
    lambdas.iter().map(|&lambda| decompose(series, lambda)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::mean_squared_second_difference;
    use chrono::{Months, NaiveDate};

    fn quarterly(name: &str, values: &[f64]) -> TimeSeries {
        let start = NaiveDate::from_ymd_opt(1995, 1, 1).unwrap();
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (start + Months::new(3 * i as u32), v))
            .collect();
        TimeSeries::new(name, points).unwrap()
    }

    fn wiggly(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                11.0 + 0.005 * t + 0.02 * (t / 3.0).sin() + 0.007 * (t * 1.7).cos()
            })
            .collect()
    }

    #[test]
    fn trend_plus_cycle_reconstructs_series() {
        let s = quarterly("ES", &wiggly(80));
        for &lambda in &[10.0, 100.0, 1600.0, 1e5] {
            let r = decompose(&s, lambda).unwrap();
            assert_eq!(r.trend.dates(), s.dates());
            assert_eq!(r.cycle.dates(), s.dates());
            for ((t, c), y) in r.trend.values().iter().zip(r.cycle.values()).zip(s.values()) {
                assert!(((t + c) - y).abs() <= 1e-9 * y.abs().max(1.0));
            }
        }
    }

    #[test]
    fn larger_lambda_gives_smoother_trend() {
        let s = quarterly("ES", &wiggly(120));
        let original = mean_squared_second_difference(&s.values()).unwrap();
        let results = decompose_many(&s, &[1.0, 10.0, 100.0, 1600.0, 1e5, 1e7]).unwrap();

        let mut prev = f64::INFINITY;
        for r in &results {
            let rough = mean_squared_second_difference(&r.trend.values()).unwrap() / original;
            assert!(rough <= prev * (1.0 + 1e-9), "lambda {} rougher than previous", r.lambda);
            prev = rough;
        }
        assert!(prev < 1e-4, "very large lambda should give a near-linear trend, got {prev}");
    }

    #[test]
    fn linear_series_cycle_sums_to_zero() {
        let values: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let r = decompose(&quarterly("lin", &values), 1600.0).unwrap();
        let sum: f64 = r.cycle.values().iter().sum();
        assert!(sum.abs() < 1e-9);
    }

    #[test]
    fn constant_series_has_zero_cycle() {
        let r = decompose(&quarterly("flat", &[5.0; 12]), 1600.0).unwrap();
        assert!(r.cycle.values().iter().all(|c| c.abs() < 1e-12));
        assert!(r.trend.values().iter().all(|t| (t - 5.0).abs() < 1e-12));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let s = quarterly("ES", &wiggly(40));
        assert_eq!(decompose(&s, 1600.0).unwrap(), decompose(&s, 1600.0).unwrap());
    }

    #[test]
    fn too_few_observations_fail() {
        let s = quarterly("short", &[1.0, 2.0]);
        assert_eq!(
            decompose(&s, 1600.0).unwrap_err(),
            CycleError::InsufficientData { required: 3, actual: 2 }
        );
    }
}
