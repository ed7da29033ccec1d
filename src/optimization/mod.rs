//! optimization — L-BFGS minimization stack, numerical helpers, and unified
//! error surface.
//!
//! Purpose
//! -------
//! Provide a cohesive optimization layer for curve fitting: an Argmin-backed
//! minimizer for user objectives, numerically stable box transforms, and a
//! single error/result surface. Callers implement an objective, choose
//! tolerances, and obtain fitted parameters and diagnostics without touching
//! backend solver details.
//!
//! Key behaviors
//! -------------
//! - `minimizer`: configure and run L-BFGS on an `Objective`, with analytic
//!   or finite-difference gradients.
//! - `numerical_stability`: logistic transforms for mapping unconstrained
//!   θ into bounded parameter boxes.
//! - `errors`: normalize configuration issues, numerical failures, and
//!   backend solver errors into `OptError` / `OptResult<T>`.
//!
//! Conventions
//! -----------
//! - Solvers operate on unconstrained `θ`; box constraints are handled by
//!   reparameterization in the caller.
//! - Public entrypoints that can fail return `OptResult<T>`; callers never
//!   see raw Argmin errors.
//! - No I/O apart from the optional `obs_slog` observer.
//!
//! Testing notes
//! -------------
//! - Unit tests live next to each submodule: solver wiring and tolerance
//!   handling in `minimizer`, transform accuracy in `numerical_stability`,
//!   and error conversions in `errors`.

pub mod errors;
pub mod minimizer;
pub mod numerical_stability;

// ---- Optional convenience prelude for downstream crates -------------------
//
// Downstream crates can write
//
//     use rust_sif::optimization::prelude::*;
//
// to import the main optimization surface in a single line.

pub mod prelude {
    pub use super::errors::{OptError, OptResult};
    pub use super::minimizer::prelude::*;
    pub use super::numerical_stability::prelude::*;
}
