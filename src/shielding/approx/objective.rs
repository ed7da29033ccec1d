//! Least-squares objective for the affine approximation in θ-space.
//!
//! The minimizer works on unconstrained `θ = (θ_a, θ_b)`; each coordinate is
//! mapped into its box with a logistic [`BoxTransform`], and the analytic
//! gradient is pushed back through the transform's Jacobian.
use crate::{
    optimization::{
        errors::{OptError, OptResult},
        minimizer::{Cost, Grad, Objective, Theta},
        numerical_stability::BoxTransform,
    },
    shielding::approx::targets::FitTargets,
};
use ndarray::array;

/// Targets plus the box transforms for `a` and `b`.
///
/// `cost_scale` divides both value and gradient. The fit driver sets it to the
/// θ-gradient norm at the start of each L-BFGS run so the first unit step has
/// length one in θ-space.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxedProblem {
    pub targets: FitTargets,
    pub box_a: BoxTransform,
    pub box_b: BoxTransform,
    pub cost_scale: f64,
}

impl BoxedProblem {
    pub fn new(targets: FitTargets, box_a: BoxTransform, box_b: BoxTransform) -> BoxedProblem {
        BoxedProblem { targets, box_a, box_b, cost_scale: 1.0 }
    }

    /// Map θ into the box.
    ///
    /// # Errors
    /// - `OptError::InvalidThetaInput` for a non-finite coordinate.
    pub fn to_params(&self, theta: &Theta) -> OptResult<(f64, f64)> {
        if let Some((index, &value)) = theta.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(OptError::InvalidThetaInput { index, value });
        }
        Ok((self.box_a.to_constrained(theta[0]), self.box_b.to_constrained(theta[1])))
    }

    pub fn to_theta(&self, a: f64, b: f64) -> Theta {
        array![self.box_a.to_unconstrained(a), self.box_b.to_unconstrained(b)]
    }

    /// Unscaled θ-space gradient of the summed-MSE loss.
    pub fn raw_grad(&self, theta: &Theta) -> OptResult<Grad> {
        let (a, b) = self.to_params(theta)?;
        let (_, g_a, g_b) = self.targets.loss_and_grad(a, b);
        Ok(array![g_a * self.box_a.jacobian(theta[0]), g_b * self.box_b.jacobian(theta[1])])
    }

    /// Copy with `cost_scale = max(1, ‖∇θ loss(θ)‖)`.
    pub fn rescaled_at(&self, theta: &Theta) -> OptResult<BoxedProblem> {
        let g = self.raw_grad(theta)?;
        let norm = g.dot(&g).sqrt();
        let cost_scale = if norm.is_finite() { norm.max(1.0) } else { 1.0 };
        Ok(BoxedProblem { cost_scale, ..self.clone() })
    }
}

/// Summed-MSE loss of `δ/r − (δ/(σ(aδ + b)))²` against the targets.
#[derive(Debug, Clone, Copy, Default)]
pub struct AffineLeastSquares;

impl Objective for AffineLeastSquares {
    type Data = BoxedProblem;

    fn value(&self, theta: &Theta, data: &BoxedProblem) -> OptResult<Cost> {
        let (a, b) = data.to_params(theta)?;
        Ok(data.targets.loss(a, b) / data.cost_scale)
    }

    fn check(&self, theta: &Theta, _data: &BoxedProblem) -> OptResult<()> {
        if theta.len() != 2 {
            return Err(OptError::ThetaLengthMismatch { expected: 2, actual: theta.len() });
        }
        Ok(())
    }

    fn grad(&self, theta: &Theta, data: &BoxedProblem) -> OptResult<Grad> {
        Ok(data.raw_grad(theta)? / data.cost_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array1;

    // -------------------------------------------------------------------------
    // Scope
    // -----
    // θ-space value and chain-rule gradient of the boxed objective, the
    // gradient-norm cost scaling, and rejection of non-finite θ.
    // -------------------------------------------------------------------------

    fn problem() -> BoxedProblem {
        let grid = Array1::linspace(0.01, 2.0, 50);
        let targets = FitTargets::exact(grid.view(), 0.05, &[0.2]).expect("valid targets");
        BoxedProblem::new(targets, BoxTransform::new(1e-6, 10.0), BoxTransform::new(1e-6, 10.0))
    }

    #[test]
    // Purpose
    // -------
    // θ ↔ (a, b) mapping round-trips and `value` is the box-space loss.
    //
    // Given
    // -----
    // - (a, b) = (0.8, 1.2) mapped to θ and back.
    //
    // Expect
    // ------
    // - Recovered (a, b) within 1e-12; `value` equals `targets.loss(a, b)`.
    fn value_is_box_space_loss() {
        let p = problem();
        let theta = p.to_theta(0.8, 1.2);

        let (a, b) = p.to_params(&theta).expect("finite theta");
        let v = AffineLeastSquares.value(&theta, &p).expect("finite loss");

        assert!((a - 0.8).abs() < 1e-12 && (b - 1.2).abs() < 1e-12, "a = {a}, b = {b}");
        assert_eq!(v, p.targets.loss(a, b));
    }

    #[test]
    // Purpose
    // -------
    // The θ-space gradient equals central differences of `value`.
    //
    // Given
    // -----
    // - θ = to_theta(0.9, 0.5), h = 1e-6.
    //
    // Expect
    // ------
    // - Relative agreement within 1e-5 per coordinate.
    fn grad_matches_central_difference_in_theta_space() {
        let p = problem();
        let theta = p.to_theta(0.9, 0.5);
        let h = 1e-6;

        let g = AffineLeastSquares.grad(&theta, &p).expect("analytic gradient");

        for k in 0..2 {
            let mut up = theta.clone();
            let mut dn = theta.clone();
            up[k] += h;
            dn[k] -= h;
            let fd = (AffineLeastSquares.value(&up, &p).expect("finite")
                - AffineLeastSquares.value(&dn, &p).expect("finite"))
                / (2.0 * h);
            assert!((g[k] - fd).abs() <= 1e-5 * g[k].abs(), "k = {k}: {} vs {fd}", g[k]);
        }
    }

    #[test]
    // Purpose
    // -------
    // `check` insists on a two-dimensional θ.
    //
    // Given
    // -----
    // - θ of length 3.
    //
    // Expect
    // ------
    // - `ThetaLengthMismatch { expected: 2, actual: 3 }`.
    fn check_rejects_wrong_dimension() {
        let p = problem();
        assert_eq!(
            AffineLeastSquares.check(&array![0.0, 0.0, 0.0], &p),
            Err(OptError::ThetaLengthMismatch { expected: 2, actual: 3 })
        );
    }

    #[test]
    // Purpose
    // -------
    // Rescaling divides value and gradient by the θ-gradient norm at the
    // rescale point, leaving the minimizer unchanged.
    //
    // Given
    // -----
    // - A problem rescaled at θ0 = to_theta(0.8, 1.2), where the raw
    //   gradient norm is well above one.
    //
    // Expect
    // ------
    // - `cost_scale` equals ‖∇θ loss(θ0)‖; scaled gradient at θ0 has unit norm;
    //   scaled value times `cost_scale` is the raw loss.
    fn rescaling_normalizes_initial_gradient() {
        // Arrange
        let p = problem();
        let theta0 = p.to_theta(0.8, 1.2);
        let raw = p.raw_grad(&theta0).expect("finite gradient");
        let norm = raw.dot(&raw).sqrt();
        assert!(norm > 1.0, "norm = {norm}");

        // Act
        let scaled = p.rescaled_at(&theta0).expect("finite gradient");
        let g = AffineLeastSquares.grad(&theta0, &scaled).expect("analytic gradient");
        let v = AffineLeastSquares.value(&theta0, &scaled).expect("finite loss");

        // Assert
        assert!((scaled.cost_scale - norm).abs() <= 1e-12 * norm);
        assert!((g.dot(&g).sqrt() - 1.0).abs() < 1e-12);
        let (a, b) = p.to_params(&theta0).expect("finite theta");
        assert!((v * scaled.cost_scale - p.targets.loss(a, b)).abs() <= 1e-10 * v.abs().max(1.0));
    }

    #[test]
    // Purpose
    // -------
    // A NaN or infinite θ coordinate is an input error rather than a NaN cost.
    //
    // Given
    // -----
    // - θ = (NaN, 0) and θ = (0, +inf).
    //
    // Expect
    // ------
    // - `value`, `grad`, and `to_params` return `InvalidThetaInput` naming the
    //   offending index.
    fn non_finite_theta_is_rejected() {
        // Arrange
        let p = problem();
        let nan_a = array![f64::NAN, 0.0];
        let inf_b = array![0.0, f64::INFINITY];

        // Act
        let value_err = AffineLeastSquares.value(&nan_a, &p);
        let grad_err = AffineLeastSquares.grad(&inf_b, &p);
        let map_err = p.to_params(&inf_b);

        // Assert
        match value_err {
            Err(OptError::InvalidThetaInput { index: 0, value }) => assert!(value.is_nan()),
            other => panic!("Expected InvalidThetaInput at 0, got {other:?}"),
        }
        assert_eq!(grad_err, Err(OptError::InvalidThetaInput { index: 1, value: f64::INFINITY }));
        assert_eq!(map_err, Err(OptError::InvalidThetaInput { index: 1, value: f64::INFINITY }));
    }
}
