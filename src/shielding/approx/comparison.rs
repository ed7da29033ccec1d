//! comparison — side-by-side SST curves and their discrepancy statistics.
//!
//! Produces the four curves used to judge the approximations on a grid
//! (exact EC, polynomial EC, paper form with the whitepaper constants, and
//! paper form with fitted constants) together with max / mean / RMSE of the
//! absolute deviation from the exact curve, plus a sign-change locator for
//! break-even displacements.
use crate::shielding::{
    approx::paper_form::{paper_form_array, PAPER_A, PAPER_B},
    core::{
        exigence::ECEvaluator,
        sst::{sst_with_array, SSTParams},
    },
    errors::{SIFError, SIFResult},
};
use ndarray::{Array1, ArrayView1};

/// Absolute-deviation summary between two curves on the same grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveStats {
    pub max_abs: f64,
    pub mean_abs: f64,
    pub rmse: f64,
}

impl CurveStats {
    /// # Errors
    /// `EmptyGrid` for empty curves, `LengthMismatch` for unequal lengths.
    pub fn between(reference: ArrayView1<f64>, other: ArrayView1<f64>) -> SIFResult<CurveStats> {
        if reference.is_empty() {
            return Err(SIFError::EmptyGrid);
        }
        if reference.len() != other.len() {
            return Err(SIFError::LengthMismatch {
                expected: reference.len(),
                actual: other.len(),
            });
        }
        let n = reference.len() as f64;
        let (mut max_abs, mut sum_abs, mut sum_sq) = (0.0_f64, 0.0, 0.0);
        for (&x, &y) in reference.iter().zip(other.iter()) {
            let d = (x - y).abs();
            max_abs = max_abs.max(d);
            sum_abs += d;
            sum_sq += d * d;
        }
        Ok(CurveStats { max_abs, mean_abs: sum_abs / n, rmse: (sum_sq / n).sqrt() })
    }
}

/// The four curves of a comparison plus their statistics against `exact`.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveComparison {
    pub grid: Array1<f64>,
    pub exact: Array1<f64>,
    pub polynomial: Array1<f64>,
    pub paper_original: Array1<f64>,
    pub paper_fitted: Array1<f64>,
    pub polynomial_stats: CurveStats,
    pub paper_original_stats: CurveStats,
    pub paper_fitted_stats: CurveStats,
}

/// Evaluate all four curves on `grid` for one `(r, σ)`.
///
/// `fitted` is the `(a, b)` pair from a calibration; the original curve uses
/// `(PAPER_A, PAPER_B)`.
pub fn compare_curves(
    grid: ArrayView1<f64>, r: f64, sigma: f64, fitted: (f64, f64),
) -> SIFResult<CurveComparison> {
    if grid.is_empty() {
        return Err(SIFError::EmptyGrid);
    }
    let params = SSTParams::new(r, sigma)?;
    let exact = sst_with_array(grid, &params, ECEvaluator::Exact)?;
    let polynomial = sst_with_array(grid, &params, ECEvaluator::polynomial())?;
    let paper_original = paper_form_array(grid, params.r(), params.sigma(), PAPER_A, PAPER_B);
    let paper_fitted = paper_form_array(grid, params.r(), params.sigma(), fitted.0, fitted.1);

    let polynomial_stats = CurveStats::between(exact.view(), polynomial.view())?;
    let paper_original_stats = CurveStats::between(exact.view(), paper_original.view())?;
    let paper_fitted_stats = CurveStats::between(exact.view(), paper_fitted.view())?;
    Ok(CurveComparison {
        grid: grid.to_owned(),
        exact,
        polynomial,
        paper_original,
        paper_fitted,
        polynomial_stats,
        paper_original_stats,
        paper_fitted_stats,
    })
}

/// Displacements where `values` changes sign, located by linear
/// interpolation between neighbouring grid points.
///
/// Grid points where the value is exactly zero are reported as-is.
///
/// # Errors
/// `LengthMismatch` when `grid` and `values` differ in length.
pub fn zero_crossings(grid: ArrayView1<f64>, values: ArrayView1<f64>) -> SIFResult<Vec<f64>> {
    if grid.len() != values.len() {
        return Err(SIFError::LengthMismatch { expected: grid.len(), actual: values.len() });
    }
    let mut out = Vec::new();
    for i in 0..grid.len() {
        let (x0, y0) = (grid[i], values[i]);
        if y0 == 0.0 {
            out.push(x0);
            continue;
        }
        if i + 1 < grid.len() {
            let (x1, y1) = (grid[i + 1], values[i + 1]);
            if y0 * y1 < 0.0 {
                out.push(x0 - y0 * (x1 - x0) / (y1 - y0));
            }
        }
    }
    Ok(out)
}
