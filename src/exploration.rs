//! Probability of exploration success
//!
//! A conventional resource needs adequate temperature, permeability and fluid chemistry. Each is
//! judged independently as a chance of success; their product is the probability that an
//! exploration well finds a commercial resource at all.

use serde::Serialize;

use crate::error::{finite, InvalidInput, Result};

/// Chances of success of the three resource elements, as fractions in `(0, 1]`
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ExplorationRisk {
    temperature: f64,
    permeability: f64,
    chemistry: f64,
}

impl Default for ExplorationRisk {
    fn default() -> ExplorationRisk {
        ExplorationRisk {
            temperature: 0.65,
            permeability: 0.65,
            chemistry: 0.95,
        }
    }
}

impl ExplorationRisk {
    pub fn new(temperature: f64, permeability: f64, chemistry: f64) -> Result<ExplorationRisk> {
        Ok(ExplorationRisk {
            temperature: chance("temperature", temperature)?,
            permeability: chance("permeability", permeability)?,
            chemistry: chance("chemistry", chemistry)?,
        })
    }

    pub fn temperature(&self) -> f64 {
        self.temperature
    }

    pub fn permeability(&self) -> f64 {
        self.permeability
    }

    pub fn chemistry(&self) -> f64 {
        self.chemistry
    }

    /// Product of the three chances of success
    pub fn probability_of_success(&self) -> f64 {
        self.temperature * self.permeability * self.chemistry
    }
}

fn chance(name: &'static str, value: f64) -> Result<f64> {
    let value = finite(value)?;

    if value > 0. && value <= 1. {
        Ok(value)
    } else {
        Err(InvalidInput::ProbabilityOutOfRange { name, value }.into())
    }
}
