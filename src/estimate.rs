use serde::Serialize;
use std::ops::Index;
use std::slice;

use crate::error::{InvalidInput, Result};
use crate::fit::PercentileEstimate;
use crate::stats::LognormalParams;

/// Number of points in a confidence curve
pub const CURVE_POINTS: usize = 100;

/// Capacity distribution of one prospect: the product of two independent lognormal quantities,
/// productive area (km²) and power density (MWe/km²)
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CapacityDistribution {
    area: LognormalParams,
    power_density: LognormalParams,
    capacity: LognormalParams,
}

impl CapacityDistribution {
    /// Combines the area and power density distributions, assuming independence
    pub fn combine(area: LognormalParams, power_density: LognormalParams) -> CapacityDistribution {
        let capacity = area.product(&power_density);

        debug!(
            "capacity log_mean={} log_std_dev={} (median {} MWe)",
            capacity.log_mean(),
            capacity.log_std_dev(),
            capacity.median()
        );

        CapacityDistribution {
            area,
            power_density,
            capacity,
        }
    }

    /// Sum of the area and power density log-means
    pub fn log_mean(&self) -> f64 {
        self.capacity.log_mean()
    }

    /// Root-sum-of-squares of the area and power density log standard deviations
    pub fn log_std_dev(&self) -> f64 {
        self.capacity.log_std_dev()
    }

    /// Capacity distribution parameters
    pub fn capacity(&self) -> &LognormalParams {
        &self.capacity
    }

    /// Fitted area distribution
    pub fn area(&self) -> &LognormalParams {
        &self.area
    }

    /// Fitted power density distribution
    pub fn power_density(&self) -> &LognormalParams {
        &self.power_density
    }

    /// Returns the capacity (MWe) below which a fraction `q` of outcomes lie
    pub fn quantile(&self, q: f64) -> Result<f64> {
        self.capacity.quantile(q)
    }

    /// Discretizes the distribution into a confidence curve
    pub fn confidence_curve(&self) -> Result<ConfidenceCurve> {
        let points = (0..CURVE_POINTS)
            .map(|k| {
                Ok(ConfidencePoint {
                    confidence: confidence_label(k),
                    capacity: self.quantile(quantile_at(k))?,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(ConfidenceCurve(points.into_boxed_slice()))
    }
}

// Point `k` holds the `k/100` quantile
fn quantile_at(k: usize) -> f64 {
    k as f64 / CURVE_POINTS as f64
}

// Point `k` is labeled `100 - k`: the percent chance the capacity is at least `capacity`
fn confidence_label(k: usize) -> u8 {
    (CURVE_POINTS - k) as u8
}

/// One row of a confidence curve
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ConfidencePoint {
    /// Percent chance that the true capacity is at least `capacity`
    pub confidence: u8,
    /// Expected development size, MWe
    pub capacity: f64,
}

/// Cumulative confidence curve of a prospect's capacity
///
/// Invariants:
///
/// - The curve has exactly `CURVE_POINTS` points
/// - Point `k` holds confidence `100 - k` and the `k/100` quantile of the capacity distribution,
///   so confidence runs from 100 down to 1 while capacity never decreases
/// - The first point (confidence 100) has capacity `0`
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ConfidenceCurve(Box<[ConfidencePoint]>);

impl ConfidenceCurve {
    /// Returns the points, highest confidence first
    pub fn points(&self) -> &[ConfidencePoint] {
        &self.0
    }

    /// Iterates over the points, highest confidence first
    pub fn iter(&self) -> slice::Iter<'_, ConfidencePoint> {
        self.0.iter()
    }

    /// Number of points, always `CURVE_POINTS`
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the capacity that is reached or exceeded with `confidence` percent chance
    ///
    /// Fails with `InvalidInput::ConfidenceOutOfRange` unless `confidence` is in `1..=100`.
    pub fn at_confidence(&self, confidence: u8) -> Result<f64> {
        if confidence == 0 || usize::from(confidence) > CURVE_POINTS {
            return Err(InvalidInput::ConfidenceOutOfRange { confidence }.into());
        }

        Ok(self.0[CURVE_POINTS - usize::from(confidence)].capacity)
    }

    /// Returns every tenth point, confidence 100, 90, ... down to 10
    pub fn deciles(&self) -> Vec<ConfidencePoint> {
        self.0.iter().step_by(CURVE_POINTS / 10).copied().collect()
    }

    /// Capacities in curve order
    pub fn capacities(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|point| point.capacity)
    }
}

impl Index<usize> for ConfidenceCurve {
    type Output = ConfidencePoint;

    fn index(&self, i: usize) -> &ConfidencePoint {
        &self.0[i]
    }
}

impl<'a> IntoIterator for &'a ConfidenceCurve {
    type Item = &'a ConfidencePoint;
    type IntoIter = slice::Iter<'a, ConfidencePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Capacity estimator configuration
///
/// ```
/// use geocap::{CapacityEstimator, PercentileEstimate};
///
/// let curve = CapacityEstimator::default()
///     .estimate(&PercentileEstimate::new(1., 10.), &PercentileEstimate::new(10., 24.))
///     .unwrap();
///
/// assert_eq!(curve.len(), 100);
/// ```
#[derive(Clone, Debug)]
pub struct CapacityEstimator {
    pub(crate) parallel: bool,
}

impl Default for CapacityEstimator {
    /// Creates an estimator that evaluates batches in parallel when the `rayon` feature is on
    fn default() -> CapacityEstimator {
        CapacityEstimator {
            parallel: cfg!(feature = "rayon"),
        }
    }
}

impl CapacityEstimator {
    /// Changes whether scenario batches are evaluated on the rayon thread pool
    ///
    /// Has no effect without the `rayon` feature. Output order is the input order either way.
    pub fn parallel(mut self, parallel: bool) -> CapacityEstimator {
        self.parallel = parallel;
        self
    }

    /// Fits both inputs and combines them into a capacity distribution
    pub fn distribution(
        &self,
        area: &PercentileEstimate,
        power_density: &PercentileEstimate,
    ) -> Result<CapacityDistribution> {
        let area = area.fit()?;
        let power_density = power_density.fit()?;

        Ok(CapacityDistribution::combine(area, power_density))
    }

    /// Computes the cumulative confidence curve of a prospect
    ///
    /// Fails with `InvalidInput` if either estimate cannot be fitted; nothing is computed in that
    /// case. Fails with `InvalidInput::Overflow` if the capacities exceed the `f64` range.
    pub fn estimate(
        &self,
        area: &PercentileEstimate,
        power_density: &PercentileEstimate,
    ) -> Result<ConfidenceCurve> {
        self.distribution(area, power_density)?.confidence_curve()
    }
}
