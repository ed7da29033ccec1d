//! Execution helper that runs an `argmin` solver on an objective and returns
//! a crate-friendly [`MinimizeOutcome`].
use crate::optimization::{
    errors::OptResult,
    minimizer::{adapter::ArgMinAdapter, Grad, MinimizeOutcome, MinimizerOptions, Objective, Theta},
};
#[cfg(feature = "obs_slog")]
use argmin::core::{CostFunction, Gradient};
use argmin::core::{Executor, State};
#[cfg(feature = "obs_slog")]
use argmin_math::ArgminL2Norm;

/// Run an `argmin` optimization and convert its final state.
///
/// Wires up the adapted problem, the solver, the initial parameter `theta0`
/// (consumed), an optional slog observer (behind `obs_slog`, when
/// `opts.verbose`), and the optional iteration cap.
///
/// # Errors
/// - Any argmin runtime error (line-search failures, objective errors, ...)
///   via `From<argmin::core::Error>`.
/// - Validation errors raised while building [`MinimizeOutcome`].
pub fn run_lbfgs<'a, F, S>(
    theta0: Theta, opts: &MinimizerOptions, problem: ArgMinAdapter<'a, F>, solver: S,
) -> OptResult<MinimizeOutcome>
where
    F: Objective,
    S: argmin::core::Solver<
            ArgMinAdapter<'a, F>,
            argmin::core::IterState<Theta, Grad, (), (), (), f64>,
        > + Send
        + 'static,
{
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        log_initial_state(&theta0, &problem)?;
    }
    let mut optimizer = Executor::new(problem, solver);
    optimizer = optimizer.configure(|state| state.param(theta0));
    #[cfg(feature = "obs_slog")]
    if opts.verbose {
        let observer = argmin_observer_slog::SlogLogger::term_noblock();
        optimizer = optimizer.add_observer(observer, argmin::core::observers::ObserverMode::Always);
    }
    if let Some(max_iter) = opts.tols.max_iter {
        optimizer = optimizer.configure(|state| state.max_iters(max_iter as u64));
    }

    let mut result = optimizer.run()?.state().clone();
    let iterations = result.get_iter();
    let function_counts = result.get_func_counts().clone();
    let termination = result.get_termination_status().clone();
    let grad = result.take_gradient();
    MinimizeOutcome::new(
        result.take_best_param(),
        result.get_best_cost(),
        termination,
        iterations,
        function_counts,
        grad,
    )
}

// ---- Helper Methods ----

#[cfg(feature = "obs_slog")]
fn log_initial_state<F>(theta0: &Theta, problem: &ArgMinAdapter<'_, F>) -> OptResult<()>
where
    F: Objective,
{
    let c0 = problem.cost(theta0)?;
    let g0n = problem.gradient(theta0).ok().map(|g| g.l2_norm());

    eprintln!(
        "init: cost(theta0) = {:.6e}{}",
        c0,
        g0n.map(|n| format!(", ||grad|| = {:.6e}", n)).unwrap_or_default()
    );
    Ok(())
}
