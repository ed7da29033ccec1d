//! shielding::core — probit, Exigence Coefficient, and SST evaluators.
//!
//! Dependency order is `probit → exigence → sst`; `validation` holds the
//! shared input checks. Everything here is a pure function of its inputs.

pub mod exigence;
pub mod probit;
pub mod sst;
pub mod validation;

pub use self::exigence::{
    exigence_coefficient, exigence_coefficient_array, exigence_coefficient_poly,
    exigence_coefficient_poly_array, ECEvaluator, DELTA_FLOOR, EXACT_THRESHOLD, POLY_LINEAR,
    POLY_QUADRATIC,
};
pub use self::probit::probit;
pub use self::sst::{sst, sst_array, sst_with, sst_with_array, SSTParams, SST_EPS};
