//! Least squares line fitting.
//!
//! Used for the regression line drawn through the cycle scatter plot
//! (cycle B regressed on cycle A).
//!
//! Implementation choices:
//! - We build the `n × 2` design matrix `[1, x_i]` and solve with SVD.
//!   (Nalgebra's `QR::solve` is intended for square systems and will panic for
//!   non-square matrices.)

use nalgebra::{DMatrix, DVector};

/// A fitted line `y = intercept + slope * x`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineFit {
    pub intercept: f64,
    pub slope: f64,
}

impl LineFit {
    pub fn predict(&self, x: f64) -> f64 {
        self.intercept + self.slope * x
    }
}

/// Solve a least squares problem using SVD.
///
/// Returns `None` if the system is too ill-conditioned to solve robustly.
pub fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);

    // Try progressively looser tolerances if strict solve fails.
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }

    None
}

/// Ordinary least squares line through `(x_i, y_i)`.
///
/// Returns `None` for mismatched lengths, fewer than two points, or a
/// constant `x` (vertical line).
pub fn fit_line(x: &[f64], y: &[f64]) -> Option<LineFit> {
    if x.len() != y.len() || x.len() < 2 {
        return None;
    }
    let x0 = x[0];
    if x.iter().all(|v| (v - x0).abs() < f64::EPSILON) {
        return None;
    }

    let design = DMatrix::from_fn(x.len(), 2, |r, c| if c == 0 { 1.0 } else { x[r] });
    let target = DVector::from_row_slice(y);
    let beta = solve_least_squares(&design, &target)?;

    Some(LineFit {
        intercept: beta[0],
        slope: beta[1],
    })
}
