//! rust_sif — Strategic Shielding Time model with Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that exposes
//! the shielding model to Python via the `_rust_sif` extension module. When the
//! `python-bindings` feature is enabled, this module defines the Python-facing
//! functions, the `ApproxFit` result class, and the `shielding` submodule.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`shielding`, `optimization`) as the
//!   public crate surface.
//! - Expose `exigence_coefficient`, `exigence_coefficient_poly`, `sst`, and
//!   `fit_approx_params` to Python. The first three accept a float or a 1-D
//!   array-like and return a float or a `numpy.ndarray` to match.
//! - Register the `shielding` submodule under `rust_sif` in `sys.modules` so
//!   that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work lives in the inner Rust modules; this file performs
//!   only FFI glue, input conversion, and error mapping.
//! - Errors from the core propagate as `SIFError` and surface in Python as
//!   `ValueError`; malformed array-likes raise `TypeError`.
//!
//! Conventions
//! -----------
//! - Python-exposed items live under `_rust_sif.shielding` and are expected to
//!   be wrapped by a thin pure-Python facade in the `rust_sif` package.
//! - Keyword defaults mirror the Rust `Default` impls (`FitOptions`,
//!   `MinimizerOptions`) and the whitepaper seed `(0.8, 1.2)`.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should depend directly on `shielding` (or its prelude)
//!   and can ignore the PyO3 items guarded by the `python-bindings` feature.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner modules and
//!   by the pipeline integration test under `tests/`.
//! - The PyO3 layer is exercised from Python; it carries no Rust-side tests.

pub mod optimization;
pub mod shielding;
pub mod utils;

#[cfg(feature = "python-bindings")]
use pyo3::{prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::{
    shielding::{
        approx::{fit_approx_params, ApproxFit},
        core::{
            exigence_coefficient, exigence_coefficient_array, exigence_coefficient_poly,
            exigence_coefficient_poly_array, sst, sst_array,
        },
    },
    utils::{
        extract_f64_array, extract_fit_options, extract_minimizer_opts, extract_sigmas,
        map_scalar_or_array,
    },
};

/// ApproxFit — Python-facing result of an `(a, b)` calibration.
///
/// Purpose
/// -------
/// Give Python callers read-only access to the fitted parameters, the
/// residual loss, solver diagnostics, and the non-fatal fit-quality warning.
///
/// Notes
/// -----
/// - `values` returns the `(a, b, loss)` triple for tuple-style unpacking.
/// - `warning` is `None` for a clean fit and a human-readable string when the
///   solver did not converge or a parameter sits on a bound.
#[cfg(feature = "python-bindings")]
#[pyclass(name = "ApproxFit", module = "rust_sif.shielding")]
pub struct PyApproxFit {
    /// Underlying Rust fit result.
    pub inner: ApproxFit,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl PyApproxFit {
    #[getter]
    pub fn a(&self) -> f64 {
        self.inner.a
    }

    #[getter]
    pub fn b(&self) -> f64 {
        self.inner.b
    }

    #[getter]
    pub fn loss(&self) -> f64 {
        self.inner.loss
    }

    #[getter]
    pub fn converged(&self) -> bool {
        self.inner.converged
    }

    #[getter]
    pub fn status(&self) -> String {
        self.inner.status.clone()
    }

    #[getter]
    pub fn iterations(&self) -> usize {
        self.inner.iterations
    }

    #[getter]
    pub fn attempts(&self) -> usize {
        self.inner.attempts
    }

    #[getter]
    pub fn at_bound(&self) -> bool {
        self.inner.warning.as_ref().is_some_and(|w| w.a_bound.is_some() || w.b_bound.is_some())
    }

    #[getter]
    pub fn warning(&self) -> Option<String> {
        self.inner.warning.as_ref().map(|w| w.to_string())
    }

    #[getter]
    pub fn values(&self) -> (f64, f64, f64) {
        (self.inner.a, self.inner.b, self.inner.loss)
    }

    fn __repr__(&self) -> String {
        format!(
            "ApproxFit(a={:.6}, b={:.6}, loss={:.6e}, converged={})",
            self.inner.a, self.inner.b, self.inner.loss, self.inner.converged
        )
    }
}

/// Exact Exigence Coefficient `|Φ⁻¹(1/(2e^δ))|` for a float or 1-D array.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "exigence_coefficient")]
fn py_exigence_coefficient<'py>(py: Python<'py>, delta: &Bound<'py, PyAny>) -> PyResult<PyObject> {
    map_scalar_or_array(py, delta, exigence_coefficient, exigence_coefficient_array)
}

/// Polynomial baseline `0.9δ − 0.07δ²` for a float or 1-D array.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "exigence_coefficient_poly")]
fn py_exigence_coefficient_poly<'py>(
    py: Python<'py>, delta: &Bound<'py, PyAny>,
) -> PyResult<PyObject> {
    map_scalar_or_array(py, delta, exigence_coefficient_poly, exigence_coefficient_poly_array)
}

/// Strategic Shielding Time for a float or 1-D array of displacements.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "sst")]
#[pyo3(signature = (delta, r, sigma, use_exact = true))]
fn py_sst<'py>(
    py: Python<'py>, delta: &Bound<'py, PyAny>, r: f64, sigma: f64, use_exact: bool,
) -> PyResult<PyObject> {
    map_scalar_or_array(
        py,
        delta,
        |d| sst(d, r, sigma, use_exact),
        |view| sst_array(view, r, sigma, use_exact),
    )
}

/// Fit `(a, b)` of `δ/r − (δ/(σ(aδ + b)))²` against the exact SST.
///
/// `sigma` may be a float or a sequence; the loss sums the per-sigma MSEs.
#[cfg(feature = "python-bindings")]
#[pyfunction(name = "fit_approx_params")]
#[pyo3(signature = (
    delta_grid, r, sigma, initial_guess = None, bounds_a = None, bounds_b = None,
    tol_grad = None, tol_cost = None, max_iter = None, line_searcher = None,
    lbfgs_mem = None, verbose = false
))]
#[allow(clippy::too_many_arguments)]
fn py_fit_approx_params<'py>(
    py: Python<'py>, delta_grid: &Bound<'py, PyAny>, r: f64, sigma: &Bound<'py, PyAny>,
    initial_guess: Option<(f64, f64)>, bounds_a: Option<(f64, f64)>,
    bounds_b: Option<(f64, f64)>, tol_grad: Option<f64>, tol_cost: Option<f64>,
    max_iter: Option<usize>, line_searcher: Option<&str>, lbfgs_mem: Option<usize>,
    verbose: bool,
) -> PyResult<PyApproxFit> {
    let grid = extract_f64_array(py, delta_grid)?;
    let sigmas = extract_sigmas(py, sigma)?;
    let minimizer =
        extract_minimizer_opts(tol_grad, tol_cost, max_iter, line_searcher, lbfgs_mem, verbose)?;
    let opts = extract_fit_options(bounds_a, bounds_b, minimizer)?;
    let inner = fit_approx_params(grid.as_array(), r, &sigmas, initial_guess, &opts)?;
    Ok(PyApproxFit { inner })
}

/// _rust_sif — PyO3 module initializer for the `rust_sif` package.
///
/// Creates the `shielding` submodule, attaches it to `_rust_sif`, and
/// registers it in `sys.modules` as `rust_sif.shielding` so dotted imports
/// work from Python. Invoked by Python on import; never called directly.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _rust_sif<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let shielding_mod = PyModule::new(_py, "shielding")?;
    shielding(_py, m, &shielding_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?.getattr("modules")?.set_item("rust_sif.shielding", shielding_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn shielding<'py>(
    _py: Python, rust_sif: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(py_exigence_coefficient, m)?)?;
    m.add_function(wrap_pyfunction!(py_exigence_coefficient_poly, m)?)?;
    m.add_function(wrap_pyfunction!(py_sst, m)?)?;
    m.add_function(wrap_pyfunction!(py_fit_approx_params, m)?)?;
    m.add_class::<PyApproxFit>()?;
    rust_sif.add_submodule(m)?;
    Ok(())
}
