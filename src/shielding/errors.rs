//! shielding::errors — error surface for the EC / SST / fitting core.
//!
//! Purpose
//! -------
//! Provide a single error enum and result alias for every fallible path in
//! the shielding model: displacement and parameter validation, the probit
//! primitive, target/grid checks for the approximation fitter, and
//! optimizer failures bubbling up from the minimizer stack.
//!
//! Key behaviors
//! -------------
//! - [`SIFError`] carries the offending value (and array index where one
//!   exists) so messages are actionable without extra context.
//! - `From<OptError>` wraps minimizer failures as
//!   [`SIFError::Optimization`]; `From<StatsError>` turns statrs
//!   construction failures into [`SIFError::Distribution`].
//! - Behind `python-bindings`, `From<SIFError> for PyErr` raises a Python
//!   `ValueError` carrying the `Display` message.
//!
//! Conventions
//! -----------
//! - Indices are 0-based.
//! - Singular inputs (`r == 0`, `σ == 0`) are errors, never silent `inf`.
//! - Fit-quality problems (boundary hits, non-convergence) are *not* errors;
//!   they are reported as a `FitQualityWarning` on the fit result.
use crate::optimization::errors::OptError;
#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, PyErr};
use statrs::StatsError;

/// Result alias for shielding-model operations.
pub type SIFResult<T> = Result<T, SIFError>;

#[derive(Debug, Clone, PartialEq)]
pub enum SIFError {
    // ---- Inputs ----
    /// Displacement is negative or non-finite. `index` is set for array inputs.
    InvalidDisplacement { index: Option<usize>, value: f64 },

    /// Discount rate `r == 0` makes the benefit term singular.
    ZeroRate,

    /// Volatility `σ == 0` makes the penalty term singular.
    ZeroVolatility,

    /// Discount rate is NaN/±inf.
    InvalidRate { value: f64 },

    /// Volatility is NaN/±inf.
    InvalidVolatility { value: f64 },

    // ---- Probit ----
    /// Probit argument outside the open interval (0, 1).
    ProbitDomain { p: f64 },

    /// statrs refused to build the standard normal.
    Distribution { text: String },

    // ---- Fitting ----
    /// Displacement grid is empty.
    EmptyGrid,

    /// No volatility was supplied to the fitter.
    EmptySigmas,

    /// Number of target curves differs from the number of volatilities.
    TargetCountMismatch { expected: usize, actual: usize },

    /// A target curve (or compared curve) has the wrong length.
    LengthMismatch { expected: usize, actual: usize },

    /// A target value is NaN/±inf.
    NonFiniteTarget { curve: usize, index: usize, value: f64 },

    /// Parameter box is not a finite interval with `lower < upper`.
    InvalidBounds { lower: f64, upper: f64, reason: &'static str },

    /// A candidate `a` or `b` handed to a diagnostic is NaN/±inf.
    NonFiniteCandidate { param: &'static str, value: f64 },

    /// Seed for `(a, b)` lies outside its box.
    InitialGuessOutOfBounds { param: &'static str, value: f64, lower: f64, upper: f64 },

    /// Minimizer failure.
    Optimization(OptError),
}

impl std::error::Error for SIFError {}

impl std::fmt::Display for SIFError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            // ---- Inputs ----
            SIFError::InvalidDisplacement { index: Some(index), value } => {
                write!(f, "Invalid displacement at index {index}: {value}. Must be finite and ≥ 0.")
            }
            SIFError::InvalidDisplacement { index: None, value } => {
                write!(f, "Invalid displacement: {value}. Must be finite and ≥ 0.")
            }
            SIFError::ZeroRate => write!(f, "Rate r must be non-zero."),
            SIFError::ZeroVolatility => write!(f, "Volatility sigma must be non-zero."),
            SIFError::InvalidRate { value } => {
                write!(f, "Invalid rate r: {value}. Must be finite.")
            }
            SIFError::InvalidVolatility { value } => {
                write!(f, "Invalid volatility sigma: {value}. Must be finite.")
            }

            // ---- Probit ----
            SIFError::ProbitDomain { p } => {
                write!(f, "Probit argument {p} outside the open interval (0, 1).")
            }
            SIFError::Distribution { text } => {
                write!(f, "Could not build standard normal: {text}")
            }

            // ---- Fitting ----
            SIFError::EmptyGrid => write!(f, "Displacement grid must not be empty."),
            SIFError::EmptySigmas => write!(f, "At least one volatility must be supplied."),
            SIFError::TargetCountMismatch { expected, actual } => {
                write!(f, "Expected {expected} target curves (one per sigma), got {actual}.")
            }
            SIFError::LengthMismatch { expected, actual } => {
                write!(f, "Length mismatch: expected {expected}, got {actual}.")
            }
            SIFError::NonFiniteTarget { curve, index, value } => {
                write!(f, "Non-finite target in curve {curve} at index {index}: {value}")
            }
            SIFError::InvalidBounds { lower, upper, reason } => {
                write!(f, "Invalid bounds [{lower}, {upper}]: {reason}")
            }
            SIFError::NonFiniteCandidate { param, value } => {
                write!(f, "Non-finite candidate {param} = {value}")
            }
            SIFError::InitialGuessOutOfBounds { param, value, lower, upper } => {
                write!(f, "Initial guess {param} = {value} lies outside [{lower}, {upper}].")
            }

            SIFError::Optimization(err) => write!(f, "Optimization failed: {err}"),
        }
    }
}

impl From<OptError> for SIFError {
    fn from(err: OptError) -> SIFError {
        SIFError::Optimization(err)
    }
}

impl From<StatsError> for SIFError {
    fn from(err: StatsError) -> SIFError {
        SIFError::Distribution { text: err.to_string() }
    }
}

/// Convert a [`SIFError`] into a Python `ValueError` with the error message.
#[cfg(feature = "python-bindings")]
impl From<SIFError> for PyErr {
    fn from(err: SIFError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}
