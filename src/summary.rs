//! P90/P50/P10 overview of a prospect

use serde::Serialize;
use std::fmt;

use crate::error::Result;
use crate::estimate::{CapacityDistribution, CapacityEstimator};
use crate::fit::PercentileEstimate;
use crate::stats::LognormalParams;

/// Quantities reported in a summary
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum Quantity {
    Area,
    PowerDensity,
    Capacity,
}

impl Quantity {
    pub fn label(self) -> &'static str {
        match self {
            Quantity::Area => "Area",
            Quantity::PowerDensity => "Power density",
            Quantity::Capacity => "Power capacity",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Quantity::Area => "km2",
            Quantity::PowerDensity => "MWe/km2",
            Quantity::Capacity => "MWe",
        }
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.unit())
    }
}

/// Pessimistic, median and optimistic values of one quantity, plus its lognormal mean and the
/// parameters of its logarithm
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SummaryRow {
    pub quantity: Quantity,
    pub p90: f64,
    pub p50: f64,
    pub p10: f64,
    pub mean: f64,
    pub log_mean: f64,
    pub log_std_dev: f64,
}

impl SummaryRow {
    fn new(quantity: Quantity, params: &LognormalParams, p90: f64, p10: f64) -> Result<SummaryRow> {
        Ok(SummaryRow {
            quantity,
            p90,
            p50: params.quantile(0.5)?,
            p10,
            mean: params.bounded(params.mean())?,
            log_mean: params.log_mean(),
            log_std_dev: params.log_std_dev(),
        })
    }
}

/// Inputs and capacity of a prospect side by side
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct CapacitySummary {
    pub area: SummaryRow,
    pub power_density: SummaryRow,
    pub capacity: SummaryRow,
}

impl CapacitySummary {
    /// Builds the summary from the raw estimates and their combined distribution
    ///
    /// Area and power density rows echo the given P90/P10 values; the capacity row is read off
    /// the capacity distribution at the 10th, 50th and 90th percentiles. Fails with
    /// `InvalidInput::Overflow` if any reported value does not fit in an `f64`.
    pub fn new(
        area: &PercentileEstimate,
        power_density: &PercentileEstimate,
        distribution: &CapacityDistribution,
    ) -> Result<CapacitySummary> {
        let capacity = distribution.capacity();

        Ok(CapacitySummary {
            area: SummaryRow::new(Quantity::Area, distribution.area(), area.p90(), area.p10())?,
            power_density: SummaryRow::new(
                Quantity::PowerDensity,
                distribution.power_density(),
                power_density.p90(),
                power_density.p10(),
            )?,
            capacity: SummaryRow::new(
                Quantity::Capacity,
                capacity,
                capacity.quantile(0.1)?,
                capacity.quantile(0.9)?,
            )?,
        })
    }

    /// Rows in display order
    pub fn rows(&self) -> [&SummaryRow; 3] {
        [&self.area, &self.power_density, &self.capacity]
    }
}

impl CapacityEstimator {
    /// Computes the P90/P50/P10 summary of a prospect
    pub fn summarize(
        &self,
        area: &PercentileEstimate,
        power_density: &PercentileEstimate,
    ) -> Result<CapacitySummary> {
        let distribution = self.distribution(area, power_density)?;

        CapacitySummary::new(area, power_density, &distribution)
    }
}

#[cfg(test)]
mod test {
    use approx::relative_eq;

    use super::Quantity;
    use crate::error::InvalidInput;
    use crate::estimate::CapacityEstimator;
    use crate::fit::PercentileEstimate;
    use crate::{DEFAULT_AREA, DEFAULT_POWER_DENSITY};

    #[test]
    fn default_prospect() {
        let estimator = CapacityEstimator::default();
        let summary = estimator
            .summarize(&DEFAULT_AREA, &DEFAULT_POWER_DENSITY)
            .unwrap();
        let curve = estimator
            .estimate(&DEFAULT_AREA, &DEFAULT_POWER_DENSITY)
            .unwrap();

        assert_eq!(summary.area.p90, 1.);
        assert_eq!(summary.area.p10, 10.);
        assert!(relative_eq!(summary.area.p50, 3.162_277_66, max_relative = 1e-8));
        assert!(relative_eq!(summary.power_density.p50, 15.491_933_38, max_relative = 1e-8));

        assert_eq!(summary.capacity.quantity, Quantity::Capacity);
        assert_eq!(summary.capacity.p90, curve.at_confidence(90).unwrap());
        assert_eq!(summary.capacity.p10, curve.at_confidence(10).unwrap());
        assert!(relative_eq!(summary.capacity.p50, 48.989_794_86, max_relative = 1e-8));
        assert!(relative_eq!(summary.capacity.mean, 77.747_742_47, max_relative = 1e-6));
    }

    #[test]
    fn log_space_parameters() {
        let summary = CapacityEstimator::default()
            .summarize(&DEFAULT_AREA, &DEFAULT_POWER_DENSITY)
            .unwrap();

        assert!(relative_eq!(summary.area.log_mean, 10f64.ln() / 2., max_relative = 1e-12));
        assert!(relative_eq!(summary.area.log_std_dev, 0.898_358_35, max_relative = 1e-6));
        assert!(relative_eq!(summary.power_density.log_std_dev, 0.341_565_94, max_relative = 1e-6));
        assert!(relative_eq!(summary.capacity.log_std_dev, 0.961_100_94, max_relative = 1e-6));
        assert!(relative_eq!(
            summary.capacity.log_mean,
            summary.area.log_mean + summary.power_density.log_mean,
            max_relative = 1e-12
        ));
    }

    #[test]
    fn overflow() {
        let huge = PercentileEstimate::new(1e200, 1e250);
        let e = CapacityEstimator::default()
            .summarize(&huge, &huge)
            .unwrap_err();

        match e.invalid_input() {
            Some(InvalidInput::Overflow { .. }) => {}
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn rows_in_order() {
        let summary = CapacityEstimator::default()
            .summarize(&DEFAULT_AREA, &DEFAULT_POWER_DENSITY)
            .unwrap();
        let quantities = summary.rows().iter().map(|r| r.quantity).collect::<Vec<_>>();

        assert_eq!(
            quantities,
            [Quantity::Area, Quantity::PowerDensity, Quantity::Capacity]
        );
        assert_eq!(Quantity::PowerDensity.to_string(), "Power density (MWe/km2)");
    }
}
