//! Batched evaluation of named scenarios

use itertools::{izip, Itertools};
#[cfg(feature = "rayon")]
use rayon::prelude::*;
use serde::Serialize;
use std::fmt;
use std::slice;

use crate::error::{Error, InvalidInput, Result};
use crate::estimate::{CapacityEstimator, ConfidenceCurve};
use crate::fit::PercentileEstimate;

/// Human-readable scenario identifier: the four raw inputs joined with `_`, in the order
/// area P90, area P10, power density P90, power density P10
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ScenarioKey(String);

impl ScenarioKey {
    /// Builds the key of a scenario from its raw inputs
    pub fn new(area: &PercentileEstimate, power_density: &PercentileEstimate) -> ScenarioKey {
        ScenarioKey(
            [area.p90(), area.p10(), power_density.p90(), power_density.p10()]
                .iter()
                .join("_"),
        )
    }

    /// The key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ScenarioKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}

/// One evaluated scenario
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioCurve {
    /// Scenario identifier
    pub key: ScenarioKey,
    /// Area estimate, km²
    pub area: PercentileEstimate,
    /// Power density estimate, MWe/km²
    pub power_density: PercentileEstimate,
    /// Confidence curve of the scenario's capacity
    pub curve: ConfidenceCurve,
}

/// Confidence curves of several scenarios, in input order
///
/// Scenarios with identical inputs share a key; each still gets its own entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ScenarioBatch {
    scenarios: Vec<ScenarioCurve>,
}

impl ScenarioBatch {
    /// Number of scenarios
    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    /// Returns `true` if the batch holds no scenario
    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }

    /// Iterates over the scenarios in input order
    pub fn iter(&self) -> slice::Iter<'_, ScenarioCurve> {
        self.scenarios.iter()
    }

    /// Returns the first scenario with the given key
    pub fn get(&self, key: &str) -> Option<&ScenarioCurve> {
        self.scenarios.iter().find(|s| s.key.as_str() == key)
    }

    /// Scenario keys in input order
    pub fn keys(&self) -> impl Iterator<Item = &ScenarioKey> {
        self.scenarios.iter().map(|s| &s.key)
    }

    /// Column headers of the combined table: a confidence and a capacity column per scenario
    pub fn headers(&self) -> Vec<String> {
        self.scenarios
            .iter()
            .flat_map(|s| {
                vec![
                    format!("{} [{}]", crate::CONFIDENCE_HEADER, s.key),
                    format!("{} [{}]", crate::CAPACITY_HEADER, s.key),
                ]
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a ScenarioBatch {
    type Item = &'a ScenarioCurve;
    type IntoIter = slice::Iter<'a, ScenarioCurve>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl CapacityEstimator {
    /// Computes the confidence curve of every scenario
    ///
    /// Scenario `i` is made of `area_p90s[i]`, `area_p10s[i]`, `power_density_p90s[i]` and
    /// `power_density_p10s[i]`.
    ///
    /// Fails with:
    ///
    /// - `InvalidInput::LengthMismatch` if the four sequences differ in length, before any
    ///   scenario is evaluated
    /// - `InvalidInput::Scenario` naming the first scenario (in input order) that cannot be
    ///   evaluated; no partial batch is returned
    pub fn estimate_scenarios(
        &self,
        area_p90s: &[f64],
        area_p10s: &[f64],
        power_density_p90s: &[f64],
        power_density_p10s: &[f64],
    ) -> Result<ScenarioBatch> {
        let n = area_p90s.len();
        if area_p10s.len() != n || power_density_p90s.len() != n || power_density_p10s.len() != n
        {
            return Err(InvalidInput::LengthMismatch {
                area_p90: n,
                area_p10: area_p10s.len(),
                power_density_p90: power_density_p90s.len(),
                power_density_p10: power_density_p10s.len(),
            }
            .into());
        }

        let inputs = izip!(area_p90s, area_p10s, power_density_p90s, power_density_p10s)
            .map(|(&a90, &a10, &pd90, &pd10)| {
                (
                    PercentileEstimate::new(a90, a10),
                    PercentileEstimate::new(pd90, pd10),
                )
            })
            .collect::<Vec<_>>();

        self.estimate_all(&inputs)
    }

    /// Computes the confidence curve of every `(area, power density)` pair
    ///
    /// Same failure policy as [`CapacityEstimator::estimate_scenarios`].
    pub fn estimate_all(
        &self,
        inputs: &[(PercentileEstimate, PercentileEstimate)],
    ) -> Result<ScenarioBatch> {
        info!("Estimating {} scenarios", inputs.len());

        #[cfg(feature = "rayon")]
        let results: Vec<Result<ScenarioCurve>> = if self.parallel {
            inputs
                .par_iter()
                .enumerate()
                .map(|(i, (area, power_density))| self.evaluate(i, area, power_density))
                .collect()
        } else {
            inputs
                .iter()
                .enumerate()
                .map(|(i, (area, power_density))| self.evaluate(i, area, power_density))
                .collect()
        };

        #[cfg(not(feature = "rayon"))]
        let results: Vec<Result<ScenarioCurve>> = inputs
            .iter()
            .enumerate()
            .map(|(i, (area, power_density))| self.evaluate(i, area, power_density))
            .collect();

        let scenarios = results.into_iter().collect::<Result<Vec<_>>>()?;

        Ok(ScenarioBatch { scenarios })
    }

    fn evaluate(
        &self,
        index: usize,
        area: &PercentileEstimate,
        power_density: &PercentileEstimate,
    ) -> Result<ScenarioCurve> {
        let key = ScenarioKey::new(area, power_density);

        match self.estimate(area, power_density) {
            Ok(curve) => Ok(ScenarioCurve {
                key,
                area: *area,
                power_density: *power_density,
                curve,
            }),
            Err(Error::InvalidInput(reason)) => {
                debug!("scenario #{} ({}) rejected: {}", index, key, reason);

                Err(InvalidInput::Scenario {
                    index,
                    key: key.0,
                    reason: Box::new(reason),
                }
                .into())
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{ScenarioBatch, ScenarioKey};
    use crate::error::InvalidInput;
    use crate::estimate::CapacityEstimator;
    use crate::fit::PercentileEstimate;

    fn both() -> Vec<CapacityEstimator> {
        vec![
            CapacityEstimator::default().parallel(false),
            CapacityEstimator::default().parallel(true),
        ]
    }

    #[test]
    fn key() {
        let key = ScenarioKey::new(
            &PercentileEstimate::new(1., 10.5),
            &PercentileEstimate::new(10., 24.),
        );

        assert_eq!(key.as_str(), "1_10.5_10_24");
    }

    #[test]
    fn single_scenario_matches_estimate() {
        for estimator in both() {
            let batch = estimator
                .estimate_scenarios(&[1.], &[10.], &[10.], &[24.])
                .unwrap();
            let direct = estimator
                .estimate(
                    &PercentileEstimate::new(1., 10.),
                    &PercentileEstimate::new(10., 24.),
                )
                .unwrap();

            assert_eq!(batch.len(), 1);
            assert_eq!(batch.get("1_10_10_24").unwrap().curve, direct);
        }
    }

    #[test]
    fn preserves_order_and_duplicates() {
        for estimator in both() {
            let batch = estimator
                .estimate_scenarios(
                    &[1., 2., 1., 0.5],
                    &[10., 20., 10., 4.],
                    &[10., 5., 10., 2.],
                    &[24., 15., 24., 30.],
                )
                .unwrap();
            let keys = batch.keys().map(|k| k.as_str()).collect::<Vec<_>>();

            assert_eq!(keys, ["1_10_10_24", "2_20_5_15", "1_10_10_24", "0.5_4_2_30"]);
            assert_eq!(
                batch.headers()[2..4],
                [
                    "Cumulative confidence (%) [2_20_5_15]".to_owned(),
                    "Expected development size (MWe) [2_20_5_15]".to_owned(),
                ]
            );
        }
    }

    #[test]
    fn length_mismatch() {
        let e = CapacityEstimator::default()
            .estimate_scenarios(&[1., 2.], &[5.], &[1., 2.], &[1., 2.])
            .unwrap_err();

        assert_eq!(
            e.invalid_input(),
            Some(&InvalidInput::LengthMismatch {
                area_p90: 2,
                area_p10: 1,
                power_density_p90: 2,
                power_density_p10: 2,
            })
        );
    }

    #[test]
    fn names_first_bad_scenario() {
        for estimator in both() {
            let e = estimator
                .estimate_scenarios(&[1., 1., 0.], &[10., 10., 10.], &[10., 30., 10.], &[24., 24., 24.])
                .unwrap_err();

            assert_eq!(
                e.invalid_input(),
                Some(&InvalidInput::Scenario {
                    index: 1,
                    key: "1_10_30_24".to_owned(),
                    reason: Box::new(InvalidInput::Inverted { p90: 30., p10: 24. }),
                })
            );
        }
    }

    #[test]
    fn empty() {
        let batch = CapacityEstimator::default()
            .estimate_scenarios(&[], &[], &[], &[])
            .unwrap();

        assert!(batch.is_empty());
        assert_eq!(batch, ScenarioBatch::default());
    }
}
