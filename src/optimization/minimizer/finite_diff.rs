//! minimizer::finite_diff — forward-difference gradient with error capture.
//!
//! Used by the adapter when an [`Objective`](crate::optimization::minimizer::Objective)
//! has no analytic gradient and the central-difference attempt failed.
use crate::optimization::{
    errors::OptResult,
    minimizer::{validation::validate_grad, Grad, Theta},
};
use argmin::core::Error;
use finitediff::FiniteDiff;
use std::cell::RefCell;

/// run_fd_diff — forward-difference gradient with error capture and validation.
///
/// Parameters
/// ----------
/// - `theta`: point at which the gradient is approximated; its length is the
///   expected gradient dimension.
/// - `func`: objective closure. It is assumed to route evaluation errors into
///   `closure_err` and return `NaN` in that case.
/// - `closure_err`: shared error slot, cleared on entry and inspected after
///   the FD call.
///
/// Errors
/// ------
/// - the error captured in `closure_err`, mapped through `From<Error>`;
/// - `OptError::GradientDimMismatch` / `OptError::InvalidGradient` from
///   [`validate_grad`].
pub fn run_fd_diff<G: Fn(&Theta) -> f64>(
    theta: &Theta, func: &G, closure_err: &RefCell<Option<Error>>,
) -> OptResult<Grad> {
    closure_err.replace(None);
    let fd_grad = theta.forward_diff(func);
    let dim = theta.len();
    if let Some(err) = closure_err.take() {
        return Err(err.into());
    }
    validate_grad(&fd_grad, dim)?;
    Ok(fd_grad)
}
