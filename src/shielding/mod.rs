//! shielding — Strategic Shielding Time model.
//!
//! Purpose
//! -------
//! Evaluate the Exigence Coefficient `EC(δ) = |Φ⁻¹(1/(2e^δ))|` stably over
//! the whole displacement domain, compose it into the Strategic Shielding
//! Time `SST = δ/r − (δ/(σ·EC))²`, and calibrate the closed-form stand-in
//! `EC ≈ aδ + b` against the exact curve.
//!
//! Key behaviors
//! -------------
//! - `core`: probit primitive, dual-regime EC with the polynomial baseline,
//!   and the evaluator-agnostic SST composer.
//! - `approx`: the affine paper form, bounded least-squares fitting over one
//!   or several volatilities, and comparison diagnostics.
//! - `errors`: [`SIFError`](errors::SIFError) / `SIFResult<T>` for every
//!   fallible path.
//!
//! Invariants & assumptions
//! ------------------------
//! - All evaluators are pure: inputs are never mutated and repeated calls
//!   are bit-identical.
//! - Negative or non-finite δ, and zero or non-finite `r` / `σ`, are errors;
//!   only `δ ∈ [0, 1e-9)` is clamped, and only inside the exact EC.
//! - Fits are local: a boundary hit or non-convergence is reported through a
//!   `FitQualityWarning`, not an error.
//!
//! Downstream usage
//! ----------------
//! - Rust callers use the scalar functions or their `_array` counterparts
//!   on `ndarray` views.
//! - The Python bindings in `lib.rs` dispatch scalars and arrays onto those
//!   two families.

pub mod approx;
pub mod core;
pub mod errors;

pub mod prelude {
    pub use super::approx::{
        compare_curves, fit_approx_params, fit_to_targets, loss_landscape, paper_form,
        zero_crossings, ApproxFit, FitOptions, FitQualityWarning, FitTargets, ParamBounds,
    };
    pub use super::core::{
        exigence_coefficient, exigence_coefficient_array, exigence_coefficient_poly,
        exigence_coefficient_poly_array, sst, sst_array, ECEvaluator, SSTParams,
    };
    pub use super::errors::{SIFError, SIFResult};
}
