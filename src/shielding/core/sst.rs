//! sst — the Strategic Shielding Time composer.
//!
//! `SST(δ) = δ/r − (δ / (σ·(EC(δ) + SST_EPS)))²`
//!
//! The composer is agnostic to how EC is produced: callers hand it an
//! [`ECEvaluator`], and the flag-based [`sst`] / [`sst_array`] surface maps
//! `use_exact` onto one.
//!
//! For large δ the exact EC grows like `√(2δ)`, so the penalty behaves like
//! `δ/(2σ²)` and SST is asymptotically linear with slope `1/r − 1/(2σ²)`.
//! At `δ = 0` both terms vanish and SST is exactly zero; just above zero the
//! penalty tends to `1/(σ·√(π/2))²`, a value that depends on `SST_EPS` only
//! once δ is comparable to it.
use crate::shielding::{
    core::{
        exigence::ECEvaluator,
        validation::{
            validate_displacement, validate_displacement_array, validate_rate,
            validate_volatility,
        },
    },
    errors::SIFResult,
};
use ndarray::{Array1, ArrayView1};

/// Smoothing added to EC before dividing. A numerical guard for `EC → 0`,
/// not a modeled effect; kept at 1e-9 for output compatibility.
pub const SST_EPS: f64 = 1e-9;

/// Validated `(r, σ)` pair for one SST evaluation.
///
/// Both must be finite and non-zero. Signs are not constrained.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SSTParams {
    r: f64,
    sigma: f64,
}

impl SSTParams {
    /// # Errors
    /// `ZeroRate`, `ZeroVolatility`, `InvalidRate`, or `InvalidVolatility`.
    pub fn new(r: f64, sigma: f64) -> SIFResult<Self> {
        validate_rate(r)?;
        validate_volatility(sigma)?;
        Ok(Self { r, sigma })
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Combine a displacement with an already evaluated EC.
    pub fn compose(&self, delta: f64, ec: f64) -> f64 {
        let funding_time = delta / self.r;
        let penalty = delta / (self.sigma * (ec + SST_EPS));
        funding_time - penalty * penalty
    }
}

/// SST for a scalar displacement with an explicit EC stage.
pub fn sst_with(delta: f64, params: &SSTParams, evaluator: ECEvaluator) -> SIFResult<f64> {
    validate_displacement(delta, None)?;
    let ec = evaluator.eval_unchecked(delta)?;
    Ok(params.compose(delta, ec))
}

/// Element-wise SST with an explicit EC stage. The input is not mutated.
pub fn sst_with_array(
    delta: ArrayView1<f64>, params: &SSTParams, evaluator: ECEvaluator,
) -> SIFResult<Array1<f64>> {
    validate_displacement_array(delta)?;
    let mut out = Array1::zeros(delta.len());
    for (slot, &d) in out.iter_mut().zip(delta.iter()) {
        *slot = params.compose(d, evaluator.eval_unchecked(d)?);
    }
    Ok(out)
}

/// SST with the EC stage chosen by `use_exact` (exact probit evaluator or
/// the `0.9δ − 0.07δ²` baseline).
///
/// # Errors
/// Invalid δ, `r`, or `σ` (see [`SSTParams::new`]).
pub fn sst(delta: f64, r: f64, sigma: f64, use_exact: bool) -> SIFResult<f64> {
    let params = SSTParams::new(r, sigma)?;
    sst_with(delta, &params, ECEvaluator::from_use_exact(use_exact))
}

/// Array form of [`sst`].
pub fn sst_array(
    delta: ArrayView1<f64>, r: f64, sigma: f64, use_exact: bool,
) -> SIFResult<Array1<f64>> {
    let params = SSTParams::new(r, sigma)?;
    sst_with_array(delta, &params, ECEvaluator::from_use_exact(use_exact))
}
