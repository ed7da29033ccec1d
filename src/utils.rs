//! Python-boundary helpers: array extraction, scalar/array dispatch, and
//! keyword-argument → option-struct mapping.
#[cfg(feature = "python-bindings")]
use ndarray::{Array1, ArrayView1};

#[cfg(feature = "python-bindings")]
use pyo3::{
    prelude::*,
    types::{PyAny, PyFloat},
};

#[cfg(feature = "python-bindings")]
use crate::{
    optimization::minimizer::{LineSearcher, MinimizerOptions, Tolerances},
    shielding::{
        approx::{FitOptions, ParamBounds},
        errors::{SIFError, SIFResult},
    },
};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Array1 → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        return Ok(arr_ro);
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            return Ok(series_ro);
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a float, a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

/// Evaluate `scalar` on float-like input and `array` on array-like input,
/// returning a Python float or a 1-D `numpy.ndarray` respectively.
///
/// 1-D float64 arrays always take the array path, even with one element.
#[cfg(feature = "python-bindings")]
pub fn map_scalar_or_array<'py, FS, FA>(
    py: Python<'py>, raw: &Bound<'py, PyAny>, scalar: FS, array: FA,
) -> PyResult<PyObject>
where
    FS: FnOnce(f64) -> SIFResult<f64>,
    FA: FnOnce(ArrayView1<f64>) -> SIFResult<Array1<f64>>,
{
    let is_vector = raw.extract::<PyReadonlyArray1<f64>>().is_ok();
    if !is_vector {
        if let Ok(x) = raw.extract::<f64>() {
            let value = scalar(x)?;
            return Ok(PyFloat::new(py, value).into_any().unbind());
        }
    }
    let arr = extract_f64_array(py, raw)?;
    let out = array(arr.as_array())?;
    Ok(out.into_pyarray(py).into_any().unbind())
}

/// Accept a single volatility or a sequence of them.
#[cfg(feature = "python-bindings")]
pub fn extract_sigmas<'py>(py: Python<'py>, raw: &Bound<'py, PyAny>) -> PyResult<Vec<f64>> {
    if let Ok(sigma) = raw.extract::<f64>() {
        return Ok(vec![sigma]);
    }
    Ok(extract_f64_array(py, raw)?.as_array().to_vec())
}

#[cfg(feature = "python-bindings")]
pub fn extract_minimizer_opts(
    tol_grad: Option<f64>, tol_cost: Option<f64>, max_iter: Option<usize>,
    line_searcher: Option<&str>, lbfgs_mem: Option<usize>, verbose: bool,
) -> PyResult<MinimizerOptions> {
    use std::str::FromStr;

    // Tolerances::new -> OptResult<Tolerances> -> SIFError -> PyErr
    let tols = if tol_grad.is_none() && tol_cost.is_none() && max_iter.is_none() {
        MinimizerOptions::default().tols
    } else {
        Tolerances::new(tol_grad, tol_cost, max_iter).map_err(SIFError::from)?
    };

    let ls = match line_searcher {
        Some(name) => LineSearcher::from_str(name).map_err(SIFError::from)?,
        None => LineSearcher::MoreThuente,
    };

    let opts = MinimizerOptions::new(tols, ls, lbfgs_mem).map_err(SIFError::from)?;
    Ok(opts.with_verbose(verbose))
}

#[cfg(feature = "python-bindings")]
pub fn extract_fit_options(
    bounds_a: Option<(f64, f64)>, bounds_b: Option<(f64, f64)>, minimizer: MinimizerOptions,
) -> PyResult<FitOptions> {
    let to_bounds = |raw: Option<(f64, f64)>| -> SIFResult<ParamBounds> {
        match raw {
            Some((lower, upper)) => ParamBounds::new(lower, upper),
            None => Ok(ParamBounds::default()),
        }
    };
    Ok(FitOptions { bounds_a: to_bounds(bounds_a)?, bounds_b: to_bounds(bounds_b)?, minimizer })
}
