//! Lognormal distribution, parameterized in log space

use serde::Serialize;

use crate::error::{InvalidInput, Result};
use crate::stats::normal;

/// Mean and standard deviation of the natural logarithm of a lognormal quantity
///
/// Invariants:
///
/// - Both parameters are finite
/// - `log_std_dev >= 0`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct LognormalParams {
    log_mean: f64,
    log_std_dev: f64,
}

impl LognormalParams {
    pub(crate) fn new(log_mean: f64, log_std_dev: f64) -> LognormalParams {
        debug_assert!(log_mean.is_finite() && log_std_dev.is_finite());
        debug_assert!(log_std_dev >= 0.);

        LognormalParams {
            log_mean,
            log_std_dev,
        }
    }

    /// Mean of the natural logarithm
    pub fn log_mean(&self) -> f64 {
        self.log_mean
    }

    /// Standard deviation of the natural logarithm
    pub fn log_std_dev(&self) -> f64 {
        self.log_std_dev
    }

    /// Variance of the natural logarithm
    pub fn log_variance(&self) -> f64 {
        self.log_std_dev.powi(2)
    }

    /// Returns the 50th percentile, `exp(log_mean)`
    pub fn median(&self) -> f64 {
        self.log_mean.exp()
    }

    /// Returns the arithmetic mean, `exp(log_mean + log_variance / 2)`
    pub fn mean(&self) -> f64 {
        (self.log_mean + self.log_variance() / 2.).exp()
    }

    /// Returns the value below which a fraction `q` of the probability mass lies
    ///
    /// See [`quantile`].
    pub fn quantile(&self, q: f64) -> Result<f64> {
        quantile(q, self.log_mean, self.log_std_dev)
    }

    /// Passes `value` through if it is finite; fails with `InvalidInput::Overflow` otherwise
    pub(crate) fn bounded(&self, value: f64) -> Result<f64> {
        bounded(value, self.log_mean, self.log_std_dev)
    }

    /// Distribution of the product of two independent lognormal quantities
    ///
    /// Log-means add, and so do log-variances. No covariance term is modeled.
    pub fn product(&self, other: &LognormalParams) -> LognormalParams {
        LognormalParams::new(
            self.log_mean + other.log_mean,
            (self.log_variance() + other.log_variance()).sqrt(),
        )
    }
}

/// Returns `x` such that `P(X <= x) = q` for `X ~ Lognormal(mu, sigma)`
///
/// `q = 0` maps to the lower support bound, `0`. A degenerate distribution (`sigma = 0`) maps
/// every `q > 0` to `exp(mu)`.
///
/// Fails with `InvalidInput::QuantileOutOfRange` if `q` is outside the half-open `[0, 1)` range,
/// and with `InvalidInput::Overflow` if the result does not fit in an `f64`.
pub fn quantile(q: f64, mu: f64, sigma: f64) -> Result<f64> {
    if !(0. ..1.).contains(&q) {
        return Err(InvalidInput::QuantileOutOfRange { q }.into());
    }

    if q == 0. {
        Ok(0.)
    } else if sigma == 0. {
        bounded(mu.exp(), mu, sigma)
    } else {
        bounded((mu + sigma * normal::quantile(q)).exp(), mu, sigma)
    }
}

fn bounded(value: f64, mu: f64, sigma: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InvalidInput::Overflow {
            log_mean: mu,
            log_std_dev: sigma,
        }
        .into())
    }
}
