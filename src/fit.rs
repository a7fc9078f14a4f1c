//! Lognormal fit of a pessimistic/optimistic percentile pair
//!
//! By domain convention "P90" is the pessimistic value, exceeded in 90% of outcomes (the 10th
//! percentile of the distribution), and "P10" the optimistic value, exceeded in 10% of outcomes
//! (the 90th percentile). The fitted distribution honours exactly that: its 10th percentile is
//! `p90` and its 90th percentile is `p10`.

use serde::{Deserialize, Serialize};

use crate::error::{finite, InvalidInput, Result};
use crate::stats::normal::P90_P10_SPREAD;
use crate::stats::LognormalParams;

/// A quantity described by its pessimistic (P90) and optimistic (P10) estimates
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PercentileEstimate {
    p90: f64,
    p10: f64,
}

impl PercentileEstimate {
    /// Creates an estimate from its pessimistic and optimistic values
    ///
    /// No validation happens here; see [`fit`].
    pub const fn new(p90: f64, p10: f64) -> PercentileEstimate {
        PercentileEstimate { p90, p10 }
    }

    /// The pessimistic value
    pub fn p90(&self) -> f64 {
        self.p90
    }

    /// The optimistic value
    pub fn p10(&self) -> f64 {
        self.p10
    }

    /// Shorthand for [`fit`]
    pub fn fit(&self) -> Result<LognormalParams> {
        fit(self)
    }
}

/// Fits a lognormal distribution through the P90 and P10 values of `estimate`
///
/// - `log_mean = (ln(p90) + ln(p10)) / 2`
/// - `log_std_dev = (ln(p10) - ln(p90)) / (Φ⁻¹(0.9) - Φ⁻¹(0.1))`
///
/// Fails with:
///
/// - `InvalidInput::NotFinite` if either value is `NaN` or infinite
/// - `InvalidInput::NonPositive` if either value is zero or negative
/// - `InvalidInput::Inverted` unless `p90 < p10`
/// - `InvalidInput::Indistinct` if `p90 < p10` but `ln(p90) == ln(p10)`, which happens for
///   adjacent large floats
pub fn fit(estimate: &PercentileEstimate) -> Result<LognormalParams> {
    let p90 = positive(estimate.p90)?;
    let p10 = positive(estimate.p10)?;

    if p90 >= p10 {
        return Err(InvalidInput::Inverted { p90, p10 }.into());
    }

    let (ln_p90, ln_p10) = (p90.ln(), p10.ln());
    let log_std_dev = (ln_p10 - ln_p90) / P90_P10_SPREAD;

    if log_std_dev <= 0. {
        return Err(InvalidInput::Indistinct { p90, p10 }.into());
    }

    let params = LognormalParams::new((ln_p90 + ln_p10) / 2., log_std_dev);

    trace!(
        "fit P90={} P10={} -> log_mean={} log_std_dev={}",
        p90,
        p10,
        params.log_mean(),
        params.log_std_dev()
    );

    Ok(params)
}

fn positive(value: f64) -> Result<f64> {
    let value = finite(value)?;

    if value > 0. {
        Ok(value)
    } else {
        Err(InvalidInput::NonPositive { value }.into())
    }
}
