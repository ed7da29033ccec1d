//! numerical_stability — numerically robust transforms for bounded fitting.
//!
//! Purpose
//! -------
//! Collect the stable scalar transforms that let an unconstrained
//! optimizer work on box-constrained parameters. This module centralizes
//! the logit clamp and the logistic box mapping so the fitting layer can
//! assume well-conditioned `f64` arithmetic.
//!
//! Key behaviors
//! -------------
//! - `safe_logistic` / `safe_logit` map between ℝ and (0, 1) without
//!   overflow or catastrophic cancellation.
//! - `BoxTransform` maps θ ∈ ℝ onto `[lower, upper]` and exposes the
//!   Jacobian needed to push gradients back into θ-space.
//!
//! Conventions
//! -----------
//! - Pure functions on `f64`; no I/O, no logging, no global state.
//! - Interval validity (`lower < upper`, both finite) is enforced by the
//!   callers' option types, not here.

pub mod transformations;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::transformations::{safe_logistic, safe_logit, BoxTransform, LOGIT_EPS};

pub mod prelude {
    pub use super::transformations::{safe_logistic, safe_logit, BoxTransform, LOGIT_EPS};
}
