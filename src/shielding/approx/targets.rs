//! Fit targets and the least-squares loss of the affine approximation.
//!
//! A [`FitTargets`] bundles one displacement grid, one rate, and one target
//! SST curve per volatility. The loss of a candidate `(a, b)` is the **sum
//! over volatilities of the mean squared error** between the paper form and
//! the target curve; a single volatility is the length-1 case.
use crate::shielding::{
    approx::paper_form::{paper_form, paper_form_grad},
    core::{
        exigence::ECEvaluator,
        sst::{sst_with_array, SSTParams},
        validation::{validate_displacement_array, validate_rate, validate_volatility},
    },
    errors::{SIFError, SIFResult},
};
use ndarray::{Array1, Array2, ArrayView1};

/// Validated least-squares targets.
#[derive(Debug, Clone, PartialEq)]
pub struct FitTargets {
    grid: Array1<f64>,
    r: f64,
    sigmas: Vec<f64>,
    curves: Vec<Array1<f64>>,
}

impl FitTargets {
    /// Bundle caller-supplied target curves.
    ///
    /// # Errors
    /// - `EmptyGrid`, `InvalidDisplacement` for the grid.
    /// - `ZeroRate` / `InvalidRate`, `EmptySigmas`, `ZeroVolatility` /
    ///   `InvalidVolatility` for the parameters.
    /// - `TargetCountMismatch`, `LengthMismatch`, `NonFiniteTarget` for the
    ///   curves.
    pub fn new(
        grid: Array1<f64>, r: f64, sigmas: Vec<f64>, curves: Vec<Array1<f64>>,
    ) -> SIFResult<Self> {
        validate_grid_and_params(grid.view(), r, &sigmas)?;
        if curves.len() != sigmas.len() {
            return Err(SIFError::TargetCountMismatch {
                expected: sigmas.len(),
                actual: curves.len(),
            });
        }
        for (curve_idx, curve) in curves.iter().enumerate() {
            if curve.len() != grid.len() {
                return Err(SIFError::LengthMismatch { expected: grid.len(), actual: curve.len() });
            }
            if let Some((index, &value)) = curve.iter().enumerate().find(|(_, v)| !v.is_finite())
            {
                return Err(SIFError::NonFiniteTarget { curve: curve_idx, index, value });
            }
        }
        Ok(Self { grid, r, sigmas, curves })
    }

    /// Targets given by the exact SST, one curve per volatility.
    pub fn exact(grid: ArrayView1<f64>, r: f64, sigmas: &[f64]) -> SIFResult<Self> {
        validate_grid_and_params(grid, r, sigmas)?;
        let curves = sigmas
            .iter()
            .map(|&sigma| {
                let params = SSTParams::new(r, sigma)?;
                sst_with_array(grid, &params, ECEvaluator::Exact)
            })
            .collect::<SIFResult<Vec<_>>>()?;
        Self::new(grid.to_owned(), r, sigmas.to_vec(), curves)
    }

    /// Targets generated by the paper form itself, so that `(a, b)` is a
    /// zero-loss solution.
    pub fn from_paper_form(
        grid: ArrayView1<f64>, r: f64, sigmas: &[f64], a: f64, b: f64,
    ) -> SIFResult<Self> {
        validate_grid_and_params(grid, r, sigmas)?;
        let curves =
            sigmas.iter().map(|&sigma| grid.mapv(|d| paper_form(d, r, sigma, a, b))).collect();
        Self::new(grid.to_owned(), r, sigmas.to_vec(), curves)
    }

    pub fn grid(&self) -> ArrayView1<'_, f64> {
        self.grid.view()
    }

    pub fn r(&self) -> f64 {
        self.r
    }

    pub fn sigmas(&self) -> &[f64] {
        &self.sigmas
    }

    pub fn curves(&self) -> &[Array1<f64>] {
        &self.curves
    }

    /// Σ_σ mean_i (f(δ_i; r, σ, a, b) − y_σ,i)².
    pub fn loss(&self, a: f64, b: f64) -> f64 {
        let n = self.grid.len() as f64;
        self.sigmas
            .iter()
            .zip(self.curves.iter())
            .map(|(&sigma, curve)| {
                let sse: f64 = self
                    .grid
                    .iter()
                    .zip(curve.iter())
                    .map(|(&d, &y)| {
                        let e = paper_form(d, self.r, sigma, a, b) - y;
                        e * e
                    })
                    .sum();
                sse / n
            })
            .sum()
    }

    /// Loss together with `(∂loss/∂a, ∂loss/∂b)`.
    pub fn loss_and_grad(&self, a: f64, b: f64) -> (f64, f64, f64) {
        let n = self.grid.len() as f64;
        let (mut loss, mut g_a, mut g_b) = (0.0, 0.0, 0.0);
        for (&sigma, curve) in self.sigmas.iter().zip(self.curves.iter()) {
            for (&d, &y) in self.grid.iter().zip(curve.iter()) {
                let e = paper_form(d, self.r, sigma, a, b) - y;
                let (df_a, df_b) = paper_form_grad(d, sigma, a, b);
                loss += e * e / n;
                g_a += 2.0 * e * df_a / n;
                g_b += 2.0 * e * df_b / n;
            }
        }
        (loss, g_a, g_b)
    }
}

/// Tabulate the loss on the Cartesian product `a_values × b_values`.
///
/// Entry `[i, j]` is `targets.loss(a_values[i], b_values[j])`. Handy for
/// spotting competing local minima before choosing a seed.
///
/// # Errors
/// `NonFiniteCandidate` for any NaN/±inf candidate.
pub fn loss_landscape(
    targets: &FitTargets, a_values: ArrayView1<f64>, b_values: ArrayView1<f64>,
) -> SIFResult<Array2<f64>> {
    if let Some(&value) = a_values.iter().find(|v| !v.is_finite()) {
        return Err(SIFError::NonFiniteCandidate { param: "a", value });
    }
    if let Some(&value) = b_values.iter().find(|v| !v.is_finite()) {
        return Err(SIFError::NonFiniteCandidate { param: "b", value });
    }
    Ok(Array2::from_shape_fn((a_values.len(), b_values.len()), |(i, j)| {
        targets.loss(a_values[i], b_values[j])
    }))
}

// ---- Helper Methods ----

fn validate_grid_and_params(grid: ArrayView1<f64>, r: f64, sigmas: &[f64]) -> SIFResult<()> {
    if grid.is_empty() {
        return Err(SIFError::EmptyGrid);
    }
    validate_displacement_array(grid)?;
    validate_rate(r)?;
    if sigmas.is_empty() {
        return Err(SIFError::EmptySigmas);
    }
    for &sigma in sigmas {
        validate_volatility(sigma)?;
    }
    Ok(())
}
