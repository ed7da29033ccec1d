//! fit — calibrate the affine approximation `(a, b)` against target SST.
//!
//! Purpose
//! -------
//! Find the `(a, b)` for which `δ/r − (δ/(σ(aδ + b)))²` best matches a set
//! of target curves in the summed-MSE sense, searching a bounded box with a
//! local L-BFGS minimizer seeded from a caller-supplied guess.
//!
//! Key behaviors
//! -------------
//! - [`fit_approx_params`] targets the exact SST; [`fit_to_targets`] accepts
//!   any validated [`FitTargets`].
//! - The box constraint is enforced by a logistic reparameterization, so
//!   every iterate lies inside `[lower, upper]` by construction.
//! - Each L-BFGS run divides the loss by its θ-gradient norm at the run's
//!   starting point. The first unit step then has length one in θ-space and
//!   does not jump onto the saturated logistic plateau.
//! - A run that ends in a line-search abort is restarted from its best θ with
//!   More–Thuente, up to `MAX_FIT_ATTEMPTS` runs sharing one iteration budget.
//!   Restarts stop after `MAX_STALLED_RESTARTS` runs without improvement.
//! - A non-fatal [`FitQualityWarning`] is attached when the solver did not
//!   converge or a parameter ends within `BOUND_TOL · (upper − lower)` of a
//!   bound; a boundary hit signals an optimum outside the searched range.
//!
//! Invariants & assumptions
//! ------------------------
//! - The objective is smooth but not guaranteed convex: the result is a
//!   local optimum near the seed, never a claimed global one.
//! - The seed must lie inside both boxes; seeds sitting exactly on an edge
//!   are nudged inward by `LOGIT_EPS`.
use crate::{
    optimization::{
        minimizer::{minimize, LineSearcher, MinimizerOptions, StopReason},
        numerical_stability::BoxTransform,
    },
    shielding::{
        approx::{
            objective::{AffineLeastSquares, BoxedProblem},
            paper_form::{PAPER_A, PAPER_B},
            targets::FitTargets,
        },
        errors::{SIFError, SIFResult},
    },
};
use ndarray::ArrayView1;

/// Relative distance to a bound (as a share of the box width) under which a
/// fitted parameter is reported as sitting on that bound.
pub const BOUND_TOL: f64 = 1e-4;

/// Maximum number of L-BFGS runs per fit, the first one included.
pub const MAX_FIT_ATTEMPTS: usize = 6;

/// Consecutive restarts without loss improvement after which the fit gives up.
pub const MAX_STALLED_RESTARTS: usize = 2;

/// Default lower bound for `a` and `b`.
pub const DEFAULT_LOWER: f64 = 1e-6;

/// Default upper bound for `a` and `b`.
pub const DEFAULT_UPPER: f64 = 10.0;

/// Closed search interval for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamBounds {
    lower: f64,
    upper: f64,
}

impl ParamBounds {
    /// # Errors
    /// `InvalidBounds` unless both ends are finite and `lower < upper`.
    pub fn new(lower: f64, upper: f64) -> SIFResult<Self> {
        if !lower.is_finite() || !upper.is_finite() {
            return Err(SIFError::InvalidBounds { lower, upper, reason: "Bounds must be finite." });
        }
        if lower >= upper {
            return Err(SIFError::InvalidBounds {
                lower,
                upper,
                reason: "Lower bound must be strictly below the upper bound.",
            });
        }
        Ok(Self { lower, upper })
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> f64 {
        self.upper
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.lower && x <= self.upper
    }

    /// Which bound `x` sits on, if any, at tolerance `BOUND_TOL · width`.
    pub fn side(&self, x: f64) -> Option<BoundSide> {
        let tol = BOUND_TOL * (self.upper - self.lower);
        if x - self.lower <= tol {
            Some(BoundSide::Lower)
        } else if self.upper - x <= tol {
            Some(BoundSide::Upper)
        } else {
            None
        }
    }

    pub fn transform(&self) -> BoxTransform {
        BoxTransform::new(self.lower, self.upper)
    }
}

impl Default for ParamBounds {
    fn default() -> Self {
        Self { lower: DEFAULT_LOWER, upper: DEFAULT_UPPER }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundSide {
    Lower,
    Upper,
}

/// Search configuration for the fitter.
///
/// Default: both boxes `[1e-6, 10]`, `MinimizerOptions::default()`.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FitOptions {
    pub bounds_a: ParamBounds,
    pub bounds_b: ParamBounds,
    pub minimizer: MinimizerOptions,
}

/// Non-fatal diagnostic attached to an [`ApproxFit`].
#[derive(Debug, Clone, PartialEq)]
pub struct FitQualityWarning {
    pub loss: f64,
    pub converged: bool,
    pub a_bound: Option<BoundSide>,
    pub b_bound: Option<BoundSide>,
}

impl FitQualityWarning {
    /// Build a warning when the fit did not converge or touched a bound.
    pub fn assess(
        a: f64, b: f64, loss: f64, converged: bool, opts: &FitOptions,
    ) -> Option<FitQualityWarning> {
        let a_bound = opts.bounds_a.side(a);
        let b_bound = opts.bounds_b.side(b);
        if converged && a_bound.is_none() && b_bound.is_none() {
            return None;
        }
        Some(FitQualityWarning { loss, converged, a_bound, b_bound })
    }
}

impl std::fmt::Display for FitQualityWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "fit quality warning (loss = {:.6e}", self.loss)?;
        if !self.converged {
            write!(f, ", solver did not converge")?;
        }
        if let Some(side) = self.a_bound {
            write!(f, ", a at {side:?} bound")?;
        }
        if let Some(side) = self.b_bound {
            write!(f, ", b at {side:?} bound")?;
        }
        write!(f, ")")
    }
}

/// Outcome of a fit.
///
/// `loss` is the summed MSE at `(a, b)`. `status` is the last run's
/// termination status, `iterations` the total over all `attempts` runs.
#[derive(Debug, Clone, PartialEq)]
pub struct ApproxFit {
    pub a: f64,
    pub b: f64,
    pub loss: f64,
    pub converged: bool,
    pub status: String,
    pub iterations: usize,
    pub attempts: usize,
    pub warning: Option<FitQualityWarning>,
}

/// Fit `(a, b)` against the exact SST on `delta_grid` for every volatility
/// in `sigmas`.
///
/// `initial_guess` defaults to the whitepaper constants `(0.8, 1.2)`.
///
/// # Errors
/// - Grid / rate / volatility validation errors from [`FitTargets::exact`].
/// - `InitialGuessOutOfBounds` for a seed outside the boxes.
/// - `Optimization` for minimizer failures.
pub fn fit_approx_params(
    delta_grid: ArrayView1<f64>, r: f64, sigmas: &[f64], initial_guess: Option<(f64, f64)>,
    opts: &FitOptions,
) -> SIFResult<ApproxFit> {
    let targets = FitTargets::exact(delta_grid, r, sigmas)?;
    fit_to_targets(&targets, initial_guess, opts)
}

/// Fit `(a, b)` against arbitrary validated targets.
pub fn fit_to_targets(
    targets: &FitTargets, initial_guess: Option<(f64, f64)>, opts: &FitOptions,
) -> SIFResult<ApproxFit> {
    let (a0, b0) = initial_guess.unwrap_or((PAPER_A, PAPER_B));
    check_seed("a", a0, &opts.bounds_a)?;
    check_seed("b", b0, &opts.bounds_b)?;

    let problem =
        BoxedProblem::new(targets.clone(), opts.bounds_a.transform(), opts.bounds_b.transform());
    let mut best_theta = problem.to_theta(a0, b0);
    let (a, b) = problem.to_params(&best_theta)?;
    let mut best_loss = targets.loss(a, b);

    let mut run_opts = opts.minimizer.clone();
    let budget = opts.minimizer.tols.max_iter;
    let mut iterations = 0;
    let mut attempts = 0;
    let mut stalled = 0;
    let mut converged = false;
    let mut status = String::new();
    while attempts < MAX_FIT_ATTEMPTS && budget.map_or(true, |cap| iterations < cap) {
        attempts += 1;
        run_opts.tols.max_iter = budget.map(|cap| cap - iterations);
        let scaled = problem.rescaled_at(&best_theta)?;
        let outcome = minimize(&AffineLeastSquares, best_theta.clone(), &scaled, &run_opts)?;
        iterations += outcome.iterations;
        status = outcome.status;

        let (a, b) = problem.to_params(&outcome.theta_hat)?;
        let loss = targets.loss(a, b);
        let improved = loss < best_loss;
        if improved {
            best_loss = loss;
            best_theta = outcome.theta_hat;
        }
        match outcome.stop {
            StopReason::Converged => {
                converged = true;
                break;
            }
            StopReason::SolverExit => {
                run_opts.line_searcher = LineSearcher::MoreThuente;
                if improved {
                    stalled = 0;
                } else {
                    stalled += 1;
                    if stalled >= MAX_STALLED_RESTARTS {
                        break;
                    }
                }
            }
            StopReason::MaxIters | StopReason::Other => break,
        }
    }

    let (a, b) = problem.to_params(&best_theta)?;
    let loss = targets.loss(a, b);
    let warning = FitQualityWarning::assess(a, b, loss, converged, opts);
    Ok(ApproxFit { a, b, loss, converged, status, iterations, attempts, warning })
}

// ---- Helper Methods ----

fn check_seed(param: &'static str, value: f64, bounds: &ParamBounds) -> SIFResult<()> {
    if !value.is_finite() || !bounds.contains(value) {
        return Err(SIFError::InitialGuessOutOfBounds {
            param,
            value,
            lower: bounds.lower(),
            upper: bounds.upper(),
        });
    }
    Ok(())
}
