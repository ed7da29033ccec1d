//! Input checks shared by the EC and SST evaluators.
//!
//! These helpers never clamp; clamping of tiny displacements is part of the
//! exact EC evaluator itself.
use crate::shielding::errors::{SIFError, SIFResult};
use ndarray::ArrayView1;

/// Reject negative or non-finite displacements.
///
/// `index` is attached to the error for array inputs.
pub fn validate_displacement(delta: f64, index: Option<usize>) -> SIFResult<()> {
    if !delta.is_finite() || delta < 0.0 {
        return Err(SIFError::InvalidDisplacement { index, value: delta });
    }
    Ok(())
}

/// Validate every element of a displacement grid, reporting the first
/// offender by index.
pub fn validate_displacement_array(delta: ArrayView1<f64>) -> SIFResult<()> {
    for (index, &value) in delta.iter().enumerate() {
        validate_displacement(value, Some(index))?;
    }
    Ok(())
}

pub fn validate_rate(r: f64) -> SIFResult<()> {
    if !r.is_finite() {
        return Err(SIFError::InvalidRate { value: r });
    }
    if r == 0.0 {
        return Err(SIFError::ZeroRate);
    }
    Ok(())
}

pub fn validate_volatility(sigma: f64) -> SIFResult<()> {
    if !sigma.is_finite() {
        return Err(SIFError::InvalidVolatility { value: sigma });
    }
    if sigma == 0.0 {
        return Err(SIFError::ZeroVolatility);
    }
    Ok(())
}
