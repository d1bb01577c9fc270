//! Hodrick–Prescott filter.
//!
//! The trend `τ` minimizes
//!
//! ```text
//! Σ (y_t - τ_t)^2 + λ Σ (τ_{t+1} - 2τ_t + τ_{t-1})^2
//! ```
//!
//! which gives the linear system `(I + λ KᵀK) τ = y`, where `K` is the
//! `(n-2) × n` second-difference operator.
//!
//! Implementation choices:
//! - We solve for the **cycle** `c = y - τ` instead of the trend. Substituting
//!   gives `(I + λ KᵀK) c = λ KᵀK y`, so the right-hand side only sees second
//!   differences of the data. Constant and linear inputs produce an exactly zero
//!   right-hand side and therefore an exactly zero cycle.
//! - The system matrix is symmetric positive definite for any `λ > 0` and
//!   pentadiagonal. We assemble it in CSC form and factor it with
//!   `nalgebra-sparse`'s Cholesky, so fill-in stays inside the band and cost
//!   grows linearly with the series length (daily series included).

use nalgebra::DMatrix;
use nalgebra_sparse::factorization::CscCholesky;
use nalgebra_sparse::{CooMatrix, CscMatrix};

use crate::error::CycleError;

/// Minimum number of observations for a second-difference penalty.
pub const MIN_OBSERVATIONS: usize = 3;

/// Second-difference stencil (one row of `K`).
const STENCIL: [f64; 3] = [1.0, -2.0, 1.0];

/// Cycle component of `y` for smoothing parameter `lambda`.
pub fn hp_cycle(y: &[f64], lambda: f64) -> Result<Vec<f64>, CycleError> {
    let n = y.len();
    if n < MIN_OBSERVATIONS {
        return Err(CycleError::InsufficientData {
            required: MIN_OBSERVATIONS,
            actual: n,
        });
    }
    if !(lambda.is_finite() && lambda > 0.0) {
        return Err(CycleError::InvalidLambda(lambda));
    }

    let mut coo = CooMatrix::new(n, n);
    let mut rhs = vec![0.0; n];
    for i in 0..n {
        coo.push(i, i, 1.0);
    }

    // Duplicate COO entries are summed on conversion.
    for i in 0..n - 2 {
        let d2 = y[i] - 2.0 * y[i + 1] + y[i + 2];
        for (j, cj) in STENCIL.iter().enumerate() {
            rhs[i + j] += lambda * cj * d2;
            for (k, ck) in STENCIL.iter().enumerate() {
                coo.push(i + j, i + k, lambda * cj * ck);
            }
        }
    }

    let a = CscMatrix::from(&coo);
    let chol = CscCholesky::factor(&a).map_err(|_| CycleError::Solver { n })?;
    let cycle = chol.solve(&DMatrix::from_column_slice(n, 1, &rhs));

    if cycle.iter().any(|v| !v.is_finite()) {
        return Err(CycleError::Solver { n });
    }

    Ok(cycle.iter().copied().collect())
}

/// Trend and cycle of `y`, returned as `(trend, cycle)`.
pub fn hp_filter(y: &[f64], lambda: f64) -> Result<(Vec<f64>, Vec<f64>), CycleError> {
    let cycle = hp_cycle(y, lambda)?;
    let trend = y.iter().zip(&cycle).map(|(v, c)| v - c).collect();
    Ok((trend, cycle))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_input_has_zero_cycle() {
        let y: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let cycle = hp_cycle(&y, 1600.0).unwrap();
        assert!(cycle.iter().all(|c| c.abs() < 1e-12));
    }

    #[test]
    fn three_points_matches_closed_form() {
        // n = 3: K = [1, -2, 1], rhs = λ d Kᵀ, solution c = λ d / (1 + 6λ) Kᵀ.
        let y = [0.0, 1.0, 0.0];
        let lambda = 2.0;
        let cycle = hp_cycle(&y, lambda).unwrap();
        let d = -2.0;
        let scale = lambda * d / (1.0 + 6.0 * lambda);
        let expected = [scale, -2.0 * scale, scale];
        for (c, e) in cycle.iter().zip(expected) {
            assert!((c - e).abs() < 1e-12, "expected {e}, got {c}");
        }
    }

    #[test]
    fn rejects_short_input_and_bad_lambda() {
        assert!(matches!(
            hp_cycle(&[1.0, 2.0], 100.0),
            Err(CycleError::InsufficientData { required: 3, actual: 2 })
        ));
        assert!(matches!(hp_cycle(&[1.0, 2.0, 4.0], 0.0), Err(CycleError::InvalidLambda(_))));
        assert!(matches!(
            hp_cycle(&[1.0, 2.0, 4.0], f64::NAN),
            Err(CycleError::InvalidLambda(_))
        ));
    }

    #[test]
    fn long_series_is_solved_in_band() {
        // Roughly sixteen years of business days.
        let n = 4000;
        let y: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64;
                8.0 + 0.0004 * t + 0.03 * (t / 90.0).sin() + 0.004 * (t * 0.7).cos()
            })
            .collect();
        let (trend, cycle) = hp_filter(&y, 129600.0).unwrap();
        assert_eq!(cycle.len(), n);

        // 1 is in the null space of K, so the cycle sums to zero.
        let sum: f64 = cycle.iter().sum();
        assert!(sum.abs() < 1e-6, "cycle sum {sum}");
        for ((t, c), v) in trend.iter().zip(&cycle).zip(&y) {
            assert!(((t + c) - v).abs() < 1e-9);
        }
        assert!(cycle.iter().any(|c| c.abs() > 1e-3));
    }
}
