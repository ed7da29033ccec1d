//! minimizer::builders — L-BFGS solver construction helpers.
//!
//! Purpose
//! -------
//! Provide small, focused builders for L-BFGS solvers used by the
//! minimizer. These helpers hide Argmin’s generic wiring and apply
//! crate-level options (tolerances, memory size) so that higher-level
//! code can request a configured solver without touching Argmin types.
//!
//! Conventions
//! -----------
//! - The builders do **not** set an initial parameter vector (`theta0`)
//!   or `max_iters`; these are runtime concerns applied by
//!   [`run_lbfgs`](crate::optimization::minimizer::run::run_lbfgs).
//! - Errors are always reported via [`OptResult`]; argmin errors are
//!   converted on the way out.
use argmin::solver::quasinewton::LBFGS;

use crate::optimization::{
    errors::OptResult,
    minimizer::{
        traits::MinimizerOptions,
        types::{
            Cost, Grad, HagerZhangLS, LbfgsHagerZhang, LbfgsMoreThuente, MoreThuenteLS, Theta,
            DEFAULT_LBFGS_MEM,
        },
    },
};

/// Build L-BFGS with Hager–Zhang line search and the configured tolerances.
///
/// `opts.lbfgs_mem` selects the history size (default
/// [`DEFAULT_LBFGS_MEM`]).
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when argmin rejects a
/// tolerance.
pub fn build_optimizer_hager_zhang(opts: &MinimizerOptions) -> OptResult<LbfgsHagerZhang> {
    let hager_zhang = HagerZhangLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsHagerZhang::new(hager_zhang, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Build L-BFGS with More–Thuente line search and the configured tolerances.
///
/// # Errors
/// `OptError` (via `From<argmin::core::Error>`) when argmin rejects a
/// tolerance.
pub fn build_optimizer_more_thuente(opts: &MinimizerOptions) -> OptResult<LbfgsMoreThuente> {
    let more_thuente = MoreThuenteLS::new();
    let mem = opts.lbfgs_mem.unwrap_or(DEFAULT_LBFGS_MEM);
    let lbfgs = LbfgsMoreThuente::new(more_thuente, mem);
    configure_lbfgs(lbfgs, opts)
}

/// Apply the optional gradient and cost-change tolerances to any L-BFGS
/// solver, regardless of its line-search type.
///
/// A `None` tolerance leaves argmin's default in place.
pub fn configure_lbfgs<L>(
    mut solver: LBFGS<L, Theta, Grad, Cost>, opts: &MinimizerOptions,
) -> OptResult<LBFGS<L, Theta, Grad, Cost>> {
    if let Some(g) = opts.tols.tol_grad {
        solver = solver.with_tolerance_grad(g)?;
    }
    if let Some(c) = opts.tols.tol_cost {
        solver = solver.with_tolerance_cost(c)?;
    }
    Ok(solver)
}
