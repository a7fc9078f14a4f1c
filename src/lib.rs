//! Probabilistic power capacity of a conventional geothermal prospect, by the power density method.
//!
//! Productive area (km²) and power density (MWe/km²) are each given as a pessimistic (P90) and an
//! optimistic (P10) estimate. Both are modeled as independent lognormal quantities, so their
//! product, the capacity (MWe), is lognormal too. The capacity distribution is reported as a
//! cumulative confidence curve: 100 points, from 100% confidence (capacity `0`) down to 1%
//! confidence (the 99th percentile).
//!
//! ```
//! use geocap::{CapacityEstimator, PercentileEstimate};
//!
//! let area = PercentileEstimate::new(1., 10.);
//! let power_density = PercentileEstimate::new(10., 24.);
//! let curve = CapacityEstimator::default().estimate(&area, &power_density).unwrap();
//!
//! // Median capacity, about 49 MWe
//! let p50 = curve.at_confidence(50).unwrap();
//! assert!(p50 > 48.9 && p50 < 49.1);
//! ```
//!
//! Logging goes through the `log` facade; the library never installs a logger.

#![warn(bare_trait_objects)]

#[macro_use]
extern crate log;

mod error;
mod estimate;
mod exploration;
mod fit;
mod scenario;
mod summary;

pub mod csv_report;
pub mod format;
pub mod stats;

pub use crate::error::{parse_value, Error, InvalidInput, Result};
pub use crate::estimate::{
    CapacityDistribution, CapacityEstimator, ConfidenceCurve, ConfidencePoint, CURVE_POINTS,
};
pub use crate::exploration::ExplorationRisk;
pub use crate::fit::{fit, PercentileEstimate};
pub use crate::scenario::{ScenarioBatch, ScenarioCurve, ScenarioKey};
pub use crate::stats::LognormalParams;
pub use crate::summary::{CapacitySummary, Quantity, SummaryRow};

/// Default productive area estimate, km²
pub const DEFAULT_AREA: PercentileEstimate = PercentileEstimate::new(1., 10.);

/// Default power density estimate, MWe/km²
pub const DEFAULT_POWER_DENSITY: PercentileEstimate = PercentileEstimate::new(10., 24.);

/// Header of the confidence column of a curve table
pub const CONFIDENCE_HEADER: &str = "Cumulative confidence (%)";

/// Header of the capacity column of a curve table
pub const CAPACITY_HEADER: &str = "Expected development size (MWe)";

/// Computes the confidence curve of a prospect with the default estimator
pub fn estimate(
    area_p90: f64,
    area_p10: f64,
    power_density_p90: f64,
    power_density_p10: f64,
) -> Result<ConfidenceCurve> {
    CapacityEstimator::default().estimate(
        &PercentileEstimate::new(area_p90, area_p10),
        &PercentileEstimate::new(power_density_p90, power_density_p10),
    )
}

/// Computes the confidence curves of a batch of scenarios with the default estimator
pub fn estimate_scenarios(
    area_p90s: &[f64],
    area_p10s: &[f64],
    power_density_p90s: &[f64],
    power_density_p10s: &[f64],
) -> Result<ScenarioBatch> {
    CapacityEstimator::default().estimate_scenarios(
        area_p90s,
        area_p10s,
        power_density_p90s,
        power_density_p10s,
    )
}
