//! Integration tests for the EC → SST → approximation-fit pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end shielding model: exact Exigence Coefficient
//!   evaluation across both regimes, SST composition with exact and
//!   polynomial EC stages, and calibration of the affine paper form against
//!   the exact curve.
//! - Exercise the parameter regimes of the whitepaper studies (rate and
//!   volatility sensitivity, zoomed fitting grid) rather than toy cases only.
//!
//! Coverage
//! --------
//! - `shielding::core`:
//!   - Reference values, regime continuity, monotonicity, purity.
//!   - SST against manual computation and the polynomial baseline.
//! - `shielding::approx`:
//!   - Single- and multi-volatility fits on exact targets.
//!   - Seed sweep, iteration cap, and boundary-hit warnings.
//!   - Comparison curves and break-even points.
//! - `optimization::minimizer`:
//!   - L-BFGS with both line searches via `MinimizerOptions`.
//!
//! Exclusions
//! ----------
//! - Fine-grained validation of low-level building blocks (probit domain,
//!   box transforms, option validation); these are covered by unit tests.
//! - Python bindings, which are tested from Python.
use ndarray::Array1;
use rust_sif::{
    optimization::minimizer::{LineSearcher, MinimizerOptions, Tolerances},
    shielding::{
        approx::{
            compare_curves, fit_approx_params, fit_to_targets, zero_crossings, ApproxFit,
            BoundSide, FitOptions, FitTargets, ParamBounds, PAPER_A, PAPER_B,
        },
        core::{
            exigence_coefficient, exigence_coefficient_array, exigence_coefficient_poly_array,
            probit, sst, sst_array, EXACT_THRESHOLD,
        },
        errors::SIFError,
    },
};

/// Purpose
/// -------
/// The zoomed grid used by the fitting study: `linspace(0.001, 1.0, 400)`.
fn zoom_grid() -> Array1<f64> {
    Array1::linspace(0.001, 1.0, 400)
}

/// Summed MSE of the zoom-grid optimum for r = 0.05, σ = 0.2.
const ZOOM_OPTIMAL_LOSS: f64 = 10.714028608350757;

/// Purpose
/// -------
/// Whether a zoom-grid fit (r = 0.05, σ = 0.2) sits at the known optimum
/// (a, b) ≈ (0.95763, 0.021147).
fn at_zoom_optimum(fit: &ApproxFit) -> bool {
    fit.loss <= ZOOM_OPTIMAL_LOSS * (1.0 + 1e-6)
        && (fit.a - 0.957_634).abs() < 1e-3
        && (fit.b - 0.021_147).abs() < 1e-4
}

/// Purpose
/// -------
/// Provide an alternate optimizer configuration exercising the Hager–Zhang
/// line search with an explicit L-BFGS memory.
///
/// Invariants
/// ----------
/// - Panics if the constructors reject the settings; that is a test
///   configuration error, not a behavior under test.
fn hager_zhang_fit_options() -> FitOptions {
    let tols = Tolerances::new(Some(1e-8), Some(1e-12), Some(500))
        .expect("Tolerances::new should accept positive tolerances");
    let minimizer = MinimizerOptions::new(tols, LineSearcher::HagerZhang, Some(5))
        .expect("MinimizerOptions::new should accept explicit memory");
    FitOptions { minimizer, ..FitOptions::default() }
}

#[test]
// Purpose
// -------
// The exact EC equals |probit(1/(2e^δ))| below the threshold and √(2δ)
// above it, with the regimes agreeing to 0.3% at the switch.
//
// Given
// -----
// - δ in {0.01, 0.1, 0.5, 1, 2} and δ in {699.999, 700, 1e6}.
//
// Expect
// ------
// - Relative agreement within 1e-7 against `probit(0.5·e^{−δ})`.
// - EC(700) = √1400, EC(1e6) = √2e6, |EC(699.999)/EC(700) − 1| < 0.003.
fn exigence_coefficient_matches_probit_and_asymptote() {
    for &delta in &[0.01, 0.1, 0.5, 1.0, 2.0] {
        let expected = probit(1.0 / (2.0 * f64::exp(delta))).expect("p in (0, 0.5]").abs();
        let got = exigence_coefficient(delta).expect("valid displacement");
        assert!((got - expected).abs() <= 1e-7 * expected, "delta = {delta}");
    }

    let below = exigence_coefficient(699.999).expect("valid displacement");
    let at = exigence_coefficient(EXACT_THRESHOLD).expect("valid displacement");
    assert_eq!(at, 1400.0_f64.sqrt());
    assert_eq!(exigence_coefficient(1e6).expect("valid displacement"), 2e6_f64.sqrt());
    assert!((below / at - 1.0).abs() < 0.003);
}

#[test]
// Purpose
// -------
// Exact EC is strictly increasing and pure; the polynomial baseline is not
// monotone past δ ≈ 6.4.
//
// Given
// -----
// - δ = linspace(0.05, 12, 240), evaluated twice.
//
// Expect
// ------
// - Exact differences all positive; polynomial differences negative for
//   δ > 6.5; repeated evaluation bit-identical.
fn exact_ec_is_monotone_and_deterministic() {
    let grid = Array1::linspace(0.05, 12.0, 240);

    let first = exigence_coefficient_array(grid.view()).expect("valid grid");
    let second = exigence_coefficient_array(grid.view()).expect("valid grid");
    let poly = exigence_coefficient_poly_array(grid.view()).expect("valid grid");

    assert!(first.iter().zip(second.iter()).all(|(x, y)| x.to_bits() == y.to_bits()));
    for i in 1..grid.len() {
        assert!(first[i] > first[i - 1], "exact not increasing at {}", grid[i]);
        if grid[i - 1] > 6.5 {
            assert!(poly[i] < poly[i - 1], "poly not decreasing at {}", grid[i]);
        }
    }
}

#[test]
// Purpose
// -------
// SST matches the manual formula and the polynomial EC stage deviates
// materially from the exact one.
//
// Given
// -----
// - δ = 1.234, r = 0.05, σ = 0.20; δ = linspace(0.01, 5, 200) for the
//   comparison.
//
// Expect
// ------
// - |SST − (δ/r − (δ/(σ·EC))²)| ≤ 1e-7·|SST|.
// - max |SST_exact − SST_poly| > 1.
fn sst_matches_manual_formula_and_differs_from_polynomial() {
    let (delta, r, sigma) = (1.234, 0.05, 0.20);
    let ec = exigence_coefficient(delta).expect("valid displacement");
    let expected = delta / r - (delta / (sigma * ec)).powi(2);
    let got = sst(delta, r, sigma, true).expect("valid inputs");
    assert!((got - expected).abs() <= 1e-7 * expected.abs());

    let grid = Array1::linspace(0.01, 5.0, 200);
    let exact = sst_array(grid.view(), r, sigma, true).expect("valid inputs");
    let poly = sst_array(grid.view(), r, sigma, false).expect("valid inputs");
    let max_diff = exact.iter().zip(poly.iter()).map(|(x, y)| (x - y).abs()).fold(0.0, f64::max);
    assert!(max_diff > 1.0, "max_diff = {max_diff}");
}

#[test]
// Purpose
// -------
// Break-even displacements of the volatility-sensitivity study.
//
// Given
// -----
// - δ = linspace(0.001, 25, 400), r = 0.04, σ in {0.20, 0.15, 0.10}.
//
// Expect
// ------
// - One crossing near 1.536 for σ = 20%, one near 17.856 for σ = 15%, none
//   for σ = 10%.
fn break_even_points_by_volatility() {
    let grid = Array1::linspace(0.001, 25.0, 400);
    let crossings = |sigma: f64| {
        let values = sst_array(grid.view(), 0.04, sigma, true).expect("valid inputs");
        zero_crossings(grid.view(), values.view()).expect("same length")
    };

    let wide = crossings(0.20);
    let mid = crossings(0.15);
    let narrow = crossings(0.10);

    assert_eq!(wide.len(), 1);
    assert!((wide[0] - 1.5364).abs() < 1e-3, "wide = {wide:?}");
    assert_eq!(mid.len(), 1);
    assert!((mid[0] - 17.8558).abs() < 1e-2, "mid = {mid:?}");
    assert!(narrow.is_empty(), "narrow = {narrow:?}");
}

#[test]
// Purpose
// -------
// Calibrating on the zoomed grid beats the whitepaper constants by a wide
// margin and lands at the known optimum.
//
// Given
// -----
// - `zoom_grid()`, r = 0.05, σ = 0.2, default seed (0.8, 1.2) and options.
//
// Expect
// ------
// - Fitted loss < loss(0.8, 1.2) ≈ 441.08, and < 11.
// - (a, b) ≈ (0.9576, 0.0211); converged without warning.
fn fit_on_zoom_grid_improves_on_paper_constants() {
    // Arrange
    let grid = zoom_grid();
    let targets = FitTargets::exact(grid.view(), 0.05, &[0.2]).expect("valid targets");
    let paper_loss = targets.loss(PAPER_A, PAPER_B);

    // Act
    let fit = fit_approx_params(grid.view(), 0.05, &[0.2], None, &FitOptions::default())
        .expect("fit should succeed");

    // Assert
    assert!((paper_loss - 441.08).abs() < 0.5, "paper_loss = {paper_loss}");
    assert!(fit.loss < paper_loss && fit.loss < 11.0, "loss = {}", fit.loss);
    assert!((fit.a - 0.9576).abs() < 0.01, "a = {}", fit.a);
    assert!((fit.b - 0.0211).abs() < 0.002, "b = {}", fit.b);
    assert!(fit.converged, "status = {}", fit.status);
    assert!(fit.warning.is_none(), "warning = {:?}", fit.warning);
}

#[test]
// Purpose
// -------
// No seed may silently stall: every interior seed on the zoom grid either
// reaches the known optimum or reports a quality warning.
//
// Given
// -----
// - `zoom_grid()`, r = 0.05, σ = 0.2; seeds a in {0.2, 0.5, 0.8, 1, 2, 5}
//   crossed with b in {0.05, 0.3, 0.5, 1.2, 3}; both line searches.
//
// Expect
// ------
// - For each fit: `at_zoom_optimum` or `warning.is_some()`.
// - A fit reported as converged without a warning is at the optimum.
fn every_interior_seed_reaches_optimum_or_warns() {
    // Arrange
    let grid = zoom_grid();
    let seeds_a = [0.2, 0.5, 0.8, 1.0, 2.0, 5.0];
    let seeds_b = [0.05, 0.3, 0.5, 1.2, 3.0];

    for opts in [FitOptions::default(), hager_zhang_fit_options()] {
        for &a0 in &seeds_a {
            for &b0 in &seeds_b {
                // Act
                let fit = fit_approx_params(grid.view(), 0.05, &[0.2], Some((a0, b0)), &opts)
                    .expect("fit should succeed");

                // Assert
                assert!(
                    at_zoom_optimum(&fit) || fit.warning.is_some(),
                    "seed ({a0}, {b0}) with {:?}: a = {}, b = {}, loss = {}, status = {}",
                    opts.minimizer.line_searcher,
                    fit.a,
                    fit.b,
                    fit.loss,
                    fit.status
                );
                if fit.converged && fit.warning.is_none() {
                    assert!(at_zoom_optimum(&fit), "seed ({a0}, {b0}): loss = {}", fit.loss);
                }
            }
        }
    }
}

#[test]
// Purpose
// -------
// Seed (1.0, 0.5), where an unscaled first L-BFGS step sends More–Thuente
// into a non-descent direction, still reaches the optimum.
//
// Given
// -----
// - `zoom_grid()`, r = 0.05, σ = 0.2, seed (1.0, 0.5), default options.
//
// Expect
// ------
// - Loss < 11 and (a, b) at the optimum, converged without warning.
fn seed_near_optimum_does_not_stall() {
    // Arrange
    let grid = zoom_grid();

    // Act
    let fit = fit_approx_params(grid.view(), 0.05, &[0.2], Some((1.0, 0.5)), &FitOptions::default())
        .expect("fit should succeed");

    // Assert
    assert!(fit.loss < 11.0, "loss = {}, status = {}", fit.loss, fit.status);
    assert!(at_zoom_optimum(&fit), "a = {}, b = {}", fit.a, fit.b);
    assert!(fit.converged, "status = {}", fit.status);
    assert!(fit.warning.is_none(), "warning = {:?}", fit.warning);
    assert!(fit.attempts >= 1);
}

#[test]
// Purpose
// -------
// Exhausting the iteration budget is reported as non-convergence.
//
// Given
// -----
// - `zoom_grid()`, r = 0.05, σ = 0.2, default seed, `max_iter = 1`.
//
// Expect
// ------
// - `converged == false`, a warning with `converged == false`, and at most
//   one iteration spent across all attempts.
fn single_iteration_budget_warns_not_converged() {
    // Arrange
    let grid = zoom_grid();
    let tols = Tolerances::new(Some(1e-8), Some(1e-12), Some(1))
        .expect("Tolerances::new should accept a one-iteration cap");
    let minimizer = MinimizerOptions::new(tols, LineSearcher::MoreThuente, None)
        .expect("MinimizerOptions::new should accept default memory");
    let opts = FitOptions { minimizer, ..FitOptions::default() };

    // Act
    let fit = fit_approx_params(grid.view(), 0.05, &[0.2], None, &opts)
        .expect("fit should succeed");

    // Assert
    assert!(!fit.converged, "status = {}", fit.status);
    let warning = fit.warning.expect("non-converged fit carries a warning");
    assert!(!warning.converged);
    assert!(fit.iterations <= 1, "iterations = {}", fit.iterations);
}

#[test]
// Purpose
// -------
// An optimum below the searched range for `b` pins `b` to its lower bound
// and is flagged.
//
// Given
// -----
// - `zoom_grid()`, r = 0.05, σ = 0.2, `bounds_b = [0.5, 10]` (the optimum
//   has b ≈ 0.021), default seed.
//
// Expect
// ------
// - b within `BOUND_TOL` of 0.5; `warning.b_bound == Some(Lower)`.
fn optimum_outside_b_range_flags_lower_bound() {
    // Arrange
    let grid = zoom_grid();
    let opts = FitOptions {
        bounds_b: ParamBounds::new(0.5, 10.0).expect("valid bounds"),
        ..FitOptions::default()
    };

    // Act
    let fit = fit_approx_params(grid.view(), 0.05, &[0.2], None, &opts)
        .expect("fit should succeed");

    // Assert
    assert!((fit.b - 0.5).abs() < 1e-3, "b = {}", fit.b);
    assert!(fit.loss > ZOOM_OPTIMAL_LOSS, "loss = {}", fit.loss);
    let warning = fit.warning.expect("boundary hit carries a warning");
    assert_eq!(warning.b_bound, Some(BoundSide::Lower));
    assert_eq!(warning.a_bound, None);
}

#[test]
// Purpose
// -------
// The residual δ²/σ²·(1/EC² − 1/(aδ + b)²) does not involve r and scales
// uniformly in σ, so joint fits, other volatilities, and other rates share
// the single-volatility optimum.
//
// Given
// -----
// - `zoom_grid()`; fits for (r, σ) = (0.05, [0.2]), (0.05, [0.2, 0.5]),
//   (0.02, [0.3]); the last one with the Hager–Zhang configuration.
//
// Expect
// ------
// - All three (a, b) agree within 1e-3.
fn fitted_parameters_are_rate_and_volatility_invariant() {
    let grid = zoom_grid();

    let single = fit_approx_params(grid.view(), 0.05, &[0.2], None, &FitOptions::default())
        .expect("single-sigma fit");
    let joint = fit_approx_params(grid.view(), 0.05, &[0.2, 0.5], None, &FitOptions::default())
        .expect("joint fit");
    let other = fit_approx_params(grid.view(), 0.02, &[0.3], None, &hager_zhang_fit_options())
        .expect("alternate rate fit");

    for fit in [&joint, &other] {
        assert!((fit.a - single.a).abs() < 1e-3, "a = {} vs {}", fit.a, single.a);
        assert!((fit.b - single.b).abs() < 1e-3, "b = {} vs {}", fit.b, single.b);
    }
}

#[test]
// Purpose
// -------
// Zero-residual targets built from the paper form are recovered exactly,
// and the comparison report reflects the improvement.
//
// Given
// -----
// - Paper-form targets with (a, b) = (1.1, 0.4), δ = linspace(0.01, 2, 120),
//   σ in {0.2, 0.35}; seed (0.8, 1.2).
// - `compare_curves` on the zoom grid with the zoom-grid fit.
//
// Expect
// ------
// - (a, b) within 1e-4 of the truth.
// - Fitted RMSE against exact SST below the whitepaper-constant RMSE.
fn ground_truth_recovery_and_comparison_report() {
    let grid = Array1::linspace(0.01, 2.0, 120);
    let targets = FitTargets::from_paper_form(grid.view(), 0.05, &[0.2, 0.35], 1.1, 0.4)
        .expect("valid targets");
    let fit = fit_to_targets(&targets, Some((PAPER_A, PAPER_B)), &FitOptions::default())
        .expect("fit should succeed");
    assert!((fit.a - 1.1).abs() < 1e-4, "a = {}", fit.a);
    assert!((fit.b - 0.4).abs() < 1e-4, "b = {}", fit.b);

    let zoom = zoom_grid();
    let zoom_fit = fit_approx_params(zoom.view(), 0.05, &[0.2], None, &FitOptions::default())
        .expect("fit should succeed");
    let report =
        compare_curves(zoom.view(), 0.05, 0.2, (zoom_fit.a, zoom_fit.b)).expect("valid inputs");
    assert!(report.paper_fitted_stats.rmse < report.paper_original_stats.rmse);
    assert!(report.paper_fitted_stats.max_abs <= report.paper_original_stats.max_abs);
}

#[test]
// Purpose
// -------
// Invalid inputs surface as typed errors across the public surface.
//
// Given
// -----
// - δ < 0, σ = 0, r = 0, an empty grid, and an empty sigma list.
//
// Expect
// ------
// - `InvalidDisplacement`, `ZeroVolatility`, `ZeroRate`, `EmptyGrid`,
//   `EmptySigmas`.
fn invalid_inputs_surface_typed_errors() {
    let opts = FitOptions::default();

    assert!(matches!(sst(-0.1, 0.05, 0.2, true), Err(SIFError::InvalidDisplacement { .. })));
    assert_eq!(sst(1.0, 0.05, 0.0, true), Err(SIFError::ZeroVolatility));
    assert_eq!(sst(1.0, 0.0, 0.2, false), Err(SIFError::ZeroRate));
    assert_eq!(
        fit_approx_params(Array1::<f64>::zeros(0).view(), 0.05, &[0.2], None, &opts),
        Err(SIFError::EmptyGrid)
    );
    assert_eq!(
        fit_approx_params(zoom_grid().view(), 0.05, &[], None, &opts),
        Err(SIFError::EmptySigmas)
    );
}
