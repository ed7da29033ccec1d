//! Closed-form SST approximation with an affine EC stand-in.
//!
//! `f(δ; r, σ, a, b) = δ/r − (δ / (σ·(a·δ + b)))²`
//!
//! Structurally the SST composer with `EC(δ)` replaced by `a·δ + b`. No
//! smoothing epsilon is added; `b > 0` keeps the denominator away from
//! zero on non-negative grids.
use ndarray::{Array1, ArrayView1};

/// Whitepaper slope of the affine EC stand-in.
pub const PAPER_A: f64 = 0.8;

/// Whitepaper intercept of the affine EC stand-in.
pub const PAPER_B: f64 = 1.2;

pub fn paper_form(delta: f64, r: f64, sigma: f64, a: f64, b: f64) -> f64 {
    let penalty = delta / (sigma * (a * delta + b));
    delta / r - penalty * penalty
}

pub fn paper_form_array(delta: ArrayView1<f64>, r: f64, sigma: f64, a: f64, b: f64) -> Array1<f64> {
    delta.mapv(|d| paper_form(d, r, sigma, a, b))
}

/// Partial derivatives `(∂f/∂a, ∂f/∂b)` at one grid point.
///
/// With `u = a·δ + b`: `∂f/∂b = 2δ² / (σ²·u³)` and `∂f/∂a = δ·∂f/∂b`. The
/// rate `r` only enters the linear term and drops out.
pub fn paper_form_grad(delta: f64, sigma: f64, a: f64, b: f64) -> (f64, f64) {
    let u = a * delta + b;
    let d_b = 2.0 * delta * delta / (sigma * sigma * u * u * u);
    (delta * d_b, d_b)
}
