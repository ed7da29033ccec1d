//! Numerical stability utilities.
//!
//! Provides safe implementations of the logistic family of transforms
//! that are prone to overflow/underflow in naïve form, plus a box
//! reparameterization built from them.
//!
//! # Provided items
//! - [`LOGIT_EPS`]: clamp applied to probabilities before taking a logit.
//! - [`safe_logistic(x)`]: stable `1 / (1 + exp(-x))`, mapping ℝ → (0, 1).
//! - [`safe_logit(p)`]: stable inverse, mapping (0, 1) → ℝ.
//! - [`BoxTransform`]: `x = lo + (hi − lo)·logistic(θ)` together with its
//!   inverse and derivative, used to run an unconstrained solver over a
//!   bounded parameter.

/// Clamp for logit arguments.
///
/// `safe_logit` maps `p` into `[LOGIT_EPS, 1 − LOGIT_EPS]` before taking
/// the log-odds, so a value sitting exactly on a box edge lands at a finite
/// θ where the logistic slope is still usable by a gradient method.
pub const LOGIT_EPS: f64 = 1e-6;

/// Numerically stable logistic function `σ(x) = 1 / (1 + exp(-x))`.
///
/// Branches on the sign of `x` so that `exp` is only ever taken of a
/// non-positive argument.
pub fn safe_logistic(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

/// Stable log-odds `ln(p / (1 − p))` with `p` clamped to
/// `[LOGIT_EPS, 1 − LOGIT_EPS]`.
///
/// Uses `ln_1p(-p)` for the denominator to keep precision when `p` is
/// small.
pub fn safe_logit(p: f64) -> f64 {
    let p = p.clamp(LOGIT_EPS, 1.0 - LOGIT_EPS);
    p.ln() - (-p).ln_1p()
}

/// Logistic reparameterization of a closed interval `[lower, upper]`.
///
/// - `to_constrained(θ) = lower + (upper − lower)·σ(θ)`
/// - `to_unconstrained(x) = logit((x − lower) / (upper − lower))`
/// - `jacobian(θ) = dx/dθ = (upper − lower)·σ(θ)·(1 − σ(θ))`
///
/// The interval is assumed finite with `lower < upper`; callers validate
/// that before building a transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxTransform {
    pub lower: f64,
    pub upper: f64,
}

impl BoxTransform {
    pub fn new(lower: f64, upper: f64) -> Self {
        Self { lower, upper }
    }

    pub fn width(&self) -> f64 {
        self.upper - self.lower
    }

    /// Map a box value into θ-space. Values on (or past) an edge are pulled
    /// in by [`LOGIT_EPS`].
    pub fn to_unconstrained(&self, x: f64) -> f64 {
        safe_logit((x - self.lower) / self.width())
    }

    pub fn to_constrained(&self, theta: f64) -> f64 {
        let x = self.lower + self.width() * safe_logistic(theta);
        x.clamp(self.lower, self.upper)
    }

    /// Chain-rule factor turning `∂c/∂x` into `∂c/∂θ`.
    pub fn jacobian(&self, theta: f64) -> f64 {
        let s = safe_logistic(theta);
        self.width() * s * (1.0 - s)
    }
}
