//! Probit primitive: the inverse standard normal CDF.
use crate::shielding::errors::{SIFError, SIFResult};
use statrs::distribution::{ContinuousCDF, Normal};

/// `Φ⁻¹(p)` for `p ∈ (0, 1)`, evaluated with statrs' standard normal.
///
/// The exact EC path only ever passes `p ∈ (0, 0.5]`, but the check covers
/// the whole open interval since statrs panics outside `[0, 1]` and returns
/// `±∞` at the endpoints.
///
/// # Errors
/// - [`SIFError::ProbitDomain`] when `p ≤ 0`, `p ≥ 1`, or `p` is NaN.
/// - [`SIFError::Distribution`] if the standard normal cannot be built.
pub fn probit(p: f64) -> SIFResult<f64> {
    if !(p > 0.0 && p < 1.0) {
        return Err(SIFError::ProbitDomain { p });
    }
    let standard = Normal::new(0.0, 1.0)?;
    Ok(standard.inverse_cdf(p))
}
