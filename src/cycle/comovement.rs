//! Cross-series co-movement of cycle components.

use serde::Serialize;

use crate::domain::{ComovementSummary, CorrelationStrength, FilterResult, TimeSeries};
use crate::error::CycleError;
use crate::math::{fit_line, is_negligible_spread, max_abs, pearson, sample_std, LineFit};

/// Restrict two series to their overlapping date range.
///
/// Both are sliced to `[max(first_a, first_b), min(last_a, last_b)]`
/// (inclusive). Dates inside the window are not matched one-to-one; series
/// with different calendars come out with different lengths and are rejected
/// later by [`summarize_comovement`].
pub fn align_common_range(a: &TimeSeries, b: &TimeSeries) -> Result<(TimeSeries, TimeSeries), CycleError> {
    let empty = || CycleError::EmptyIntersection {
        a: a.name.clone(),
        b: b.name.clone(),
    };

    let (Some(a0), Some(a1), Some(b0), Some(b1)) = (a.first_date(), a.last_date(), b.first_date(), b.last_date())
    else {
        return Err(empty());
    };

    let start = a0.max(b0);
    let end = a1.min(b1);
    if start > end {
        return Err(empty());
    }

    let a_cut = a.slice_range(start, end);
    let b_cut = b.slice_range(start, end);
    if a_cut.is_empty() || b_cut.is_empty() {
        return Err(empty());
    }

    log::debug!(
        "common range {start}..={end}: {} has {} obs, {} has {} obs",
        a.name,
        a_cut.len(),
        b.name,
        b_cut.len()
    );

    Ok((a_cut, b_cut))
}

/// Standard deviations, their ratio and the correlation of two aligned cycles.
///
/// Requires identical dates. Fails with `DivisionByZero` when `cycle_b` has
/// zero variance (ratio denominator) or when `cycle_a` has zero variance
/// (correlation undefined). Zero variance is judged relative to each
/// cycle's own magnitude; see [`summarize_decompositions`] to judge it
/// against the filtered series instead.
pub fn summarize_comovement(cycle_a: &TimeSeries, cycle_b: &TimeSeries) -> Result<ComovementSummary, CycleError> {
    let scale_a = max_abs(&cycle_a.values());
    let scale_b = max_abs(&cycle_b.values());
    summarize_scaled(cycle_a, cycle_b, scale_a, scale_b)
}

/// [`summarize_comovement`] over two decompositions.
///
/// Zero variance is measured against the level of the original series
/// (`trend + cycle`), so a cycle made only of solver rounding counts as flat.
pub fn summarize_decompositions(a: &FilterResult, b: &FilterResult) -> Result<ComovementSummary, CycleError> {
    summarize_scaled(&a.cycle, &b.cycle, level_scale(a), level_scale(b))
}

fn level_scale(result: &FilterResult) -> f64 {
    let levels: Vec<f64> = result
        .trend
        .values()
        .iter()
        .zip(result.cycle.values())
        .map(|(t, c)| t + c)
        .collect();
    max_abs(&levels)
}

fn summarize_scaled(
    cycle_a: &TimeSeries,
    cycle_b: &TimeSeries,
    scale_a: f64,
    scale_b: f64,
) -> Result<ComovementSummary, CycleError> {
    if cycle_a.dates() != cycle_b.dates() {
        return Err(CycleError::MisalignedSeries {
            a: cycle_a.name.clone(),
            b: cycle_b.name.clone(),
        });
    }

    let n = cycle_a.len();
    let (Some(start), Some(end)) = (cycle_a.first_date(), cycle_a.last_date()) else {
        return Err(CycleError::InsufficientData { required: 2, actual: n });
    };

    let a = cycle_a.values();
    let b = cycle_b.values();
    let insufficient = CycleError::InsufficientData { required: 2, actual: n };
    let std_a = sample_std(&a).ok_or_else(|| insufficient.clone())?;
    let std_b = sample_std(&b).ok_or(insufficient)?;

    if is_negligible_spread(std_b, scale_b) {
        return Err(CycleError::DivisionByZero(cycle_b.name.clone()));
    }
    if is_negligible_spread(std_a, scale_a) {
        return Err(CycleError::DivisionByZero(cycle_a.name.clone()));
    }

    let correlation = pearson(&a, &b).ok_or_else(|| CycleError::DivisionByZero(cycle_a.name.clone()))?;

    Ok(ComovementSummary {
        name_a: cycle_a.name.clone(),
        name_b: cycle_b.name.clone(),
        n_obs: n,
        start,
        end,
        std_a,
        std_b,
        std_ratio: std_a / std_b,
        correlation,
        strength: CorrelationStrength::from_correlation(correlation),
    })
}

/// How closely two business cycles move together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Synchronization {
    High,
    Moderate,
    Low,
}

impl Synchronization {
    pub fn from_correlation(correlation: f64) -> Self {
        if correlation.abs() > 0.5 {
            Self::High
        } else if correlation.abs() > 0.3 {
            Self::Moderate
        } else {
            Self::Low
        }
    }
}

/// Which of the two series has the larger cyclical swings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeVolatility {
    AMoreVolatile,
    BMoreVolatile,
    Similar,
}

impl RelativeVolatility {
    pub fn from_ratio(std_ratio: f64) -> Self {
        if std_ratio > 1.2 {
            Self::AMoreVolatile
        } else if std_ratio < 0.8 {
            Self::BMoreVolatile
        } else {
            Self::Similar
        }
    }
}

/// Plain-language reading of a [`ComovementSummary`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Interpretation {
    pub synchronization: Synchronization,
    pub relative_volatility: RelativeVolatility,
    /// Name of the series with the larger cycle std.
    pub larger: String,
    /// `max(std) / min(std)`.
    pub multiple: f64,
}

pub fn interpret(summary: &ComovementSummary) -> Interpretation {
    let (larger, multiple) = if summary.std_ratio > 1.0 {
        (summary.name_a.clone(), summary.std_ratio)
    } else {
        (summary.name_b.clone(), 1.0 / summary.std_ratio)
    };

    Interpretation {
        synchronization: Synchronization::from_correlation(summary.correlation),
        relative_volatility: RelativeVolatility::from_ratio(summary.std_ratio),
        larger,
        multiple,
    }
}

/// Least-squares line of cycle B on cycle A, for the scatter views.
///
/// `None` when the series are not aligned or cycle A is constant.
pub fn fit_cycle_regression(cycle_a: &TimeSeries, cycle_b: &TimeSeries) -> Option<LineFit> {
    if cycle_a.dates() != cycle_b.dates() {
        return None;
    }
    fit_line(&cycle_a.values(), &cycle_b.values())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::decompose;
    use chrono::{Months, NaiveDate};

    fn quarterly_from(name: &str, start: NaiveDate, values: &[f64]) -> TimeSeries {
        let points = values
            .iter()
            .enumerate()
            .map(|(i, &v)| (start + Months::new(3 * i as u32), v))
            .collect();
        TimeSeries::new(name, points).unwrap()
    }

    fn q(y: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, 1, 1).unwrap()
    }

    fn noisy(n: usize, phase: f64) -> Vec<f64> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                0.03 * (t / 4.0 + phase).sin() + 0.01 * (t * 0.9 + 2.0 * phase).cos()
            })
            .collect()
    }

    #[test]
    fn align_takes_overlapping_window() {
        let a = quarterly_from("a", q(1995), &[1.0; 20]);
        let b = quarterly_from("b", q(1994), &[2.0; 12]);
        let (a2, b2) = align_common_range(&a, &b).unwrap();
        assert_eq!(a2.first_date(), Some(q(1995)));
        assert_eq!(b2.first_date(), Some(q(1995)));
        assert_eq!(a2.last_date(), b2.last_date());
        assert_eq!(a2.len(), 8);
        assert_eq!(b2.len(), 8);
    }

    #[test]
    fn align_rejects_disjoint_ranges() {
        let a = quarterly_from("a", q(1990), &[1.0; 4]);
        let b = quarterly_from("b", q(2000), &[1.0; 4]);
        assert!(matches!(
            align_common_range(&a, &b),
            Err(CycleError::EmptyIntersection { .. })
        ));
        let empty = TimeSeries::new("e", vec![]).unwrap();
        assert!(matches!(
            align_common_range(&a, &empty),
            Err(CycleError::EmptyIntersection { .. })
        ));
    }

    #[test]
    fn identical_series_are_perfectly_correlated() {
        let a = quarterly_from("a", q(2000), &noisy(40, 0.0));
        let b = quarterly_from("b", q(2000), &noisy(40, 0.0));
        let s = summarize_comovement(&a, &b).unwrap();
        assert!((s.correlation - 1.0).abs() < 1e-12);
        assert_eq!(s.std_ratio, 1.0);
        assert_eq!(s.strength, CorrelationStrength::VeryStrongPositive);
        assert_eq!(s.n_obs, 40);
    }

    #[test]
    fn correlation_is_symmetric() {
        let a = quarterly_from("a", q(2000), &noisy(40, 0.0));
        let b = quarterly_from("b", q(2000), &noisy(40, 1.3));
        let ab = summarize_comovement(&a, &b).unwrap();
        let ba = summarize_comovement(&b, &a).unwrap();
        assert_eq!(ab.correlation, ba.correlation);
        assert!((ab.std_ratio * ba.std_ratio - 1.0).abs() < 1e-12);
    }

    #[test]
    fn misaligned_dates_are_rejected() {
        let a = quarterly_from("a", q(2000), &noisy(10, 0.0));
        let b = quarterly_from("b", q(2001), &noisy(10, 0.0));
        assert!(matches!(
            summarize_comovement(&a, &b),
            Err(CycleError::MisalignedSeries { .. })
        ));
    }

    #[test]
    fn constant_denominator_is_division_by_zero() {
        let a = quarterly_from("a", q(2000), &noisy(12, 0.0));
        let flat = quarterly_from("flat", q(2000), &[4.2; 12]);
        let flat_cycle = decompose(&flat, 1600.0).unwrap().cycle;
        assert!(matches!(
            summarize_comovement(&a, &flat_cycle),
            Err(CycleError::DivisionByZero(name)) if name == "flat cycle"
        ));
    }

    #[test]
    fn tiny_cycles_are_still_summarized() {
        let scaled = |v: Vec<f64>| v.into_iter().map(|x| x * 1e-11).collect::<Vec<_>>();
        let a = quarterly_from("a", q(2000), &scaled(noisy(16, 0.0)));
        let b = quarterly_from("b", q(2000), &scaled(noisy(16, 0.2)));
        let s = summarize_comovement(&a, &b).unwrap();
        assert!(s.std_b < 1e-12);
        assert!(s.correlation > 0.5);
    }

    #[test]
    fn rounding_cycle_of_a_line_is_flat() {
        let level: Vec<f64> = noisy(40, 0.0).iter().map(|c| 11.5 + c).collect();
        let line: Vec<f64> = (0..40).map(|i| 11.5 + 0.0137 * i as f64).collect();
        let a = decompose(&quarterly_from("a", q(2000), &level), 1600.0).unwrap();
        let b = decompose(&quarterly_from("line", q(2000), &line), 1600.0).unwrap();
        assert!(matches!(
            summarize_decompositions(&a, &b),
            Err(CycleError::DivisionByZero(name)) if name == "line cycle"
        ));
    }

    #[test]
    fn interpretation_thresholds() {
        let base = ComovementSummary {
            name_a: "ES".to_string(),
            name_b: "JP".to_string(),
            n_obs: 10,
            start: q(2000),
            end: q(2002),
            std_a: 0.02,
            std_b: 0.01,
            std_ratio: 2.0,
            correlation: 0.6,
            strength: CorrelationStrength::StrongPositive,
        };
        let i = interpret(&base);
        assert_eq!(i.synchronization, Synchronization::High);
        assert_eq!(i.relative_volatility, RelativeVolatility::AMoreVolatile);
        assert_eq!(i.larger, "ES");
        assert!((i.multiple - 2.0).abs() < 1e-12);

        let flipped = ComovementSummary {
            std_ratio: 0.5,
            correlation: -0.2,
            ..base
        };
        let i = interpret(&flipped);
        assert_eq!(i.synchronization, Synchronization::Low);
        assert_eq!(i.relative_volatility, RelativeVolatility::BMoreVolatile);
        assert_eq!(i.larger, "JP");
        assert!((i.multiple - 2.0).abs() < 1e-12);
    }

    #[test]
    fn regression_of_scaled_cycle_recovers_slope() {
        let xs = noisy(30, 0.4);
        let a = quarterly_from("a", q(2000), &xs);
        let b = quarterly_from("b", q(2000), &xs.iter().map(|v| 0.5 * v).collect::<Vec<_>>());
        let fit = fit_cycle_regression(&a, &b).unwrap();
        assert!((fit.slope - 0.5).abs() < 1e-9);
        assert!(fit.intercept.abs() < 1e-9);

        let shifted = quarterly_from("c", q(2001), &xs);
        assert!(fit_cycle_regression(&a, &shifted).is_none());
    }
}
