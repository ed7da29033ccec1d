//! minimizer — Argmin-backed L-BFGS minimization of user objectives.
//!
//! Purpose
//! -------
//! Let crate code minimize a smooth scalar objective `c(θ)` over an
//! unconstrained parameter vector without touching Argmin types. Callers
//! implement [`Objective`], pick tolerances and a line search through
//! [`MinimizerOptions`], and receive a validated [`MinimizeOutcome`].
//!
//! Key behaviors
//! -------------
//! - [`minimize`] validates the starting point, runs the objective's own
//!   `check`, builds L-BFGS with More–Thuente or Hager–Zhang line search,
//!   and executes it.
//! - Analytic gradients are used when `Objective::grad` is implemented;
//!   otherwise a central finite-difference gradient is computed, with a
//!   forward-difference fallback.
//! - Non-finite objective values abort the run as
//!   [`OptError::NonFiniteCost`](crate::optimization::errors::OptError).
//!
//! Conventions
//! -----------
//! - No sign flips: the reported `value` is the minimized objective itself.
//! - `converged == true` only for argmin's `SolverConverged` and
//!   `TargetCostReached`; a line-search abort (`SolverExit`) or the iteration
//!   cap report `false`. [`StopReason`] carries the classification.
//! - Optional progress logging goes through `argmin-observer-slog` behind the
//!   `obs_slog` feature when `MinimizerOptions::verbose` is set.

pub mod adapter;
pub mod api;
pub mod builders;
pub mod finite_diff;
pub mod run;
pub mod traits;
pub mod types;
pub mod validation;

// ---- Re-exports (primary public surface) ----------------------------------

pub use self::api::minimize;
pub use self::traits::{
    LineSearcher, MinimizeOutcome, MinimizerOptions, Objective, StopReason, Tolerances,
};
pub use self::types::{Cost, FnEvalMap, Grad, Theta, DEFAULT_LBFGS_MEM};

pub mod prelude {
    pub use super::api::minimize;
    pub use super::traits::{
        LineSearcher, MinimizeOutcome, MinimizerOptions, Objective, StopReason, Tolerances,
    };
    pub use super::types::{Cost, Grad, Theta};
}
