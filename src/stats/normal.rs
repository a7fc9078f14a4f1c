//! Standard normal quantile function

use statrs::function::erf;

/// `Φ⁻¹(0.9) - Φ⁻¹(0.1)`: the distance, in standard deviations, between the pessimistic (P90)
/// and the optimistic (P10) estimate of a normally distributed quantity
pub const P90_P10_SPREAD: f64 = 2.563_103_131_089_201;

/// Returns the value `z` such that `P(Z <= z) = p` for a standard normal `Z`
///
/// Returns `-inf` at `p = 0` and `+inf` at `p = 1`.
///
/// # Panics
///
/// Panics if `p` is outside the closed `[0, 1]` range
pub(crate) fn quantile(p: f64) -> f64 {
    assert!((0. ..=1.).contains(&p));

    -::std::f64::consts::SQRT_2 * erf::erfc_inv(2. * p)
}
