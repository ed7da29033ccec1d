//! exigence — the Exigence Coefficient (EC) and its polynomial baseline.
//!
//! Purpose
//! -------
//! Evaluate the standardized distance `EC(δ) = |Φ⁻¹(1 / (2·e^δ))|` over the
//! whole non-negative displacement domain without underflow, and provide the
//! rough polynomial stand-in `0.9δ − 0.07δ²` used as a comparison baseline.
//!
//! Key behaviors
//! -------------
//! - Exact regime (`δ < EXACT_THRESHOLD`): the hit probability is formed in
//!   log space, `p = exp(−(δ + ln 2))`, and passed to the probit.
//! - Asymptotic regime (`δ ≥ EXACT_THRESHOLD`): `EC = √(2δ)`; `p` would
//!   underflow to zero there. The two regimes agree to within 0.3% at the
//!   switch.
//! - Displacements in `[0, DELTA_FLOOR)` are clamped up to `DELTA_FLOOR`
//!   before the exact path; negative or non-finite δ is an error.
//! - Array evaluators select the regime per element and never mutate their
//!   input.
//!
//! Conventions
//! -----------
//! - [`ECEvaluator`] is the pluggable EC stage consumed by the SST composer;
//!   `ECEvaluator::from_use_exact(true)` is the exact evaluator.
//! - The polynomial baseline is not clamped and is not monotone: it peaks at
//!   `δ = 0.9 / 0.14 ≈ 6.43` and decreases afterwards.
use crate::shielding::{
    core::{
        probit::probit,
        validation::{validate_displacement, validate_displacement_array},
    },
    errors::SIFResult,
};
use ndarray::{Array1, ArrayView1};

/// Smallest displacement fed to the exact regime.
pub const DELTA_FLOOR: f64 = 1e-9;

/// Displacement at which the exact regime hands over to `√(2δ)`.
pub const EXACT_THRESHOLD: f64 = 700.0;

/// Linear coefficient of the polynomial baseline.
pub const POLY_LINEAR: f64 = 0.9;

/// Quadratic coefficient of the polynomial baseline.
pub const POLY_QUADRATIC: f64 = -0.07;

/// Exact Exigence Coefficient for a scalar displacement.
///
/// # Errors
/// - [`SIFError::InvalidDisplacement`](crate::shielding::errors::SIFError)
///   for negative or non-finite δ.
/// - [`SIFError::ProbitDomain`](crate::shielding::errors::SIFError) if the
///   hit probability ever leaves (0, 1).
pub fn exigence_coefficient(delta: f64) -> SIFResult<f64> {
    validate_displacement(delta, None)?;
    exact_unchecked(delta)
}

/// Element-wise exact Exigence Coefficient.
///
/// The first invalid element aborts the evaluation with its index.
pub fn exigence_coefficient_array(delta: ArrayView1<f64>) -> SIFResult<Array1<f64>> {
    validate_displacement_array(delta)?;
    let mut out = Array1::zeros(delta.len());
    for (slot, &d) in out.iter_mut().zip(delta.iter()) {
        *slot = exact_unchecked(d)?;
    }
    Ok(out)
}

/// Polynomial baseline `0.9δ − 0.07δ²` for a scalar displacement.
pub fn exigence_coefficient_poly(delta: f64) -> SIFResult<f64> {
    validate_displacement(delta, None)?;
    Ok(polynomial(delta, POLY_LINEAR, POLY_QUADRATIC))
}

/// Element-wise polynomial baseline.
pub fn exigence_coefficient_poly_array(delta: ArrayView1<f64>) -> SIFResult<Array1<f64>> {
    validate_displacement_array(delta)?;
    Ok(delta.mapv(|d| polynomial(d, POLY_LINEAR, POLY_QUADRATIC)))
}

/// Choice of EC stage feeding the SST composer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ECEvaluator {
    /// Dual-regime probit evaluator.
    #[default]
    Exact,
    /// `linear·δ + quadratic·δ²`.
    Polynomial { linear: f64, quadratic: f64 },
}

impl ECEvaluator {
    /// Baseline polynomial with the whitepaper coefficients (0.9, −0.07).
    pub fn polynomial() -> Self {
        ECEvaluator::Polynomial { linear: POLY_LINEAR, quadratic: POLY_QUADRATIC }
    }

    /// Map the `use_exact` flag of the public SST surface onto an evaluator.
    pub fn from_use_exact(use_exact: bool) -> Self {
        if use_exact {
            ECEvaluator::Exact
        } else {
            ECEvaluator::polynomial()
        }
    }

    pub fn eval(&self, delta: f64) -> SIFResult<f64> {
        validate_displacement(delta, None)?;
        self.eval_unchecked(delta)
    }

    pub fn eval_array(&self, delta: ArrayView1<f64>) -> SIFResult<Array1<f64>> {
        validate_displacement_array(delta)?;
        let mut out = Array1::zeros(delta.len());
        for (slot, &d) in out.iter_mut().zip(delta.iter()) {
            *slot = self.eval_unchecked(d)?;
        }
        Ok(out)
    }

    /// Evaluate a displacement that has already passed validation.
    pub(crate) fn eval_unchecked(&self, delta: f64) -> SIFResult<f64> {
        match *self {
            ECEvaluator::Exact => exact_unchecked(delta),
            ECEvaluator::Polynomial { linear, quadratic } => {
                Ok(polynomial(delta, linear, quadratic))
            }
        }
    }
}

// ---- Helper Methods ----

fn exact_unchecked(delta: f64) -> SIFResult<f64> {
    let delta = delta.max(DELTA_FLOOR);
    if delta >= EXACT_THRESHOLD {
        return Ok((2.0 * delta).sqrt());
    }
    let p_hit = (-(delta + std::f64::consts::LN_2)).exp();
    Ok(probit(p_hit)?.abs())
}

fn polynomial(delta: f64, linear: f64, quadratic: f64) -> f64 {
    linear * delta + quadratic * delta * delta
}
