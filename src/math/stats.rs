//! Descriptive statistics over plain slices.

/// Relative tolerance: a spread at or below `ZERO_VARIANCE_TOL * scale` is zero variance.
pub const ZERO_VARIANCE_TOL: f64 = 1e-9;

/// Largest absolute value in `values` (0 for an empty slice).
pub fn max_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0, |m, v| m.max(v.abs()))
}

/// Whether `std` is negligible next to `scale`, the magnitude of the data it was measured on.
///
/// With `scale == 0` only an exact zero counts.
pub fn is_negligible_spread(std: f64, scale: f64) -> bool {
    std <= ZERO_VARIANCE_TOL * scale.abs()
}

pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (n-1 denominator).
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() as f64 - 1.0)).sqrt())
}

/// Pearson correlation coefficient.
///
/// Returns `None` for mismatched lengths, fewer than two points, or when
/// either side has zero variance.
pub fn pearson(x: &[f64], y: &[f64]) -> Option<f64> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let mx = mean(x)?;
    let my = mean(y)?;

    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (a, b) in x.iter().zip(y) {
        let dx = a - mx;
        let dy = b - my;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }

    let denom = (sxx * syy).sqrt();
    if !(denom.is_finite() && denom > 0.0) {
        return None;
    }
    Some((sxy / denom).clamp(-1.0, 1.0))
}

/// Mean of squared second differences; a roughness measure for a path.
pub fn mean_squared_second_difference(values: &[f64]) -> Option<f64> {
    if values.len() < 3 {
        return None;
    }
    let sum: f64 = values
        .windows(3)
        .map(|w| (w[2] - 2.0 * w[1] + w[0]).powi(2))
        .sum();
    Some(sum / (values.len() - 2) as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_std_uses_n_minus_one() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Population std is 2.0; sample variance = 32 / 7.
        let s = sample_std(&v).unwrap();
        assert!((s - (32.0_f64 / 7.0).sqrt()).abs() < 1e-12);
        assert!(sample_std(&[1.0]).is_none());
    }

    #[test]
    fn pearson_perfect_and_inverse() {
        let x = [1.0, 2.0, 3.0, 4.0];
        let y = [2.0, 4.0, 6.0, 8.0];
        let z = [4.0, 3.0, 2.0, 1.0];
        assert!((pearson(&x, &y).unwrap() - 1.0).abs() < 1e-12);
        assert!((pearson(&x, &z).unwrap() + 1.0).abs() < 1e-12);
        assert!(pearson(&x, &[1.0, 1.0, 1.0, 1.0]).is_none());
        assert!(pearson(&x, &y[..3]).is_none());
    }

    #[test]
    fn second_difference_of_line_is_zero() {
        let v: Vec<f64> = (0..10).map(|i| 3.0 * i as f64 + 1.0).collect();
        assert_eq!(mean_squared_second_difference(&v), Some(0.0));
    }

    #[test]
    fn negligible_spread_is_relative_to_scale() {
        let tiny: Vec<f64> = (0..8).map(|i| 1e-13 * (i as f64).sin()).collect();
        let std = sample_std(&tiny).unwrap();
        assert!(!is_negligible_spread(std, max_abs(&tiny)));

        // Same spread next to a log-GDP sized level is rounding noise.
        assert!(is_negligible_spread(std, 12.0));
        assert!(is_negligible_spread(0.0, 0.0));
        assert!(!is_negligible_spread(1e-300, 0.0));
    }
}
