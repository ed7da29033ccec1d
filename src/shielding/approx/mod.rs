//! shielding::approx — the affine SST approximation and its calibration.
//!
//! - `paper_form`: `δ/r − (δ/(σ(aδ + b)))²` and its gradient.
//! - `targets`: validated target curves and the summed-MSE loss.
//! - `objective`: the loss expressed in unconstrained θ-space.
//! - `fit`: bounded calibration of `(a, b)` with fit-quality diagnostics.
//! - `comparison`: curve overlays, deviation statistics, break-even points.

pub mod comparison;
pub mod fit;
pub mod objective;
pub mod paper_form;
pub mod targets;

pub use self::comparison::{compare_curves, zero_crossings, CurveComparison, CurveStats};
pub use self::fit::{
    fit_approx_params, fit_to_targets, ApproxFit, BoundSide, FitOptions, FitQualityWarning,
    ParamBounds, BOUND_TOL,
};
pub use self::paper_form::{paper_form, paper_form_array, paper_form_grad, PAPER_A, PAPER_B};
pub use self::targets::{loss_landscape, FitTargets};
