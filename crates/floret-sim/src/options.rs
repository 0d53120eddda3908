use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationOptions {
    /// Seed for the jiggle applied to coincident bodies, so runs are reproducible.
    pub random_seed: u64,
    /// The run converges once `alpha` drops below this.
    pub alpha_min: f64,
    /// Per-tick decay of `alpha` towards zero.
    pub alpha_decay: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Pull of every body towards the origin.
    pub center_strength: f64,
    /// Fraction of an overlap resolved per tick.
    pub collide_strength: f64,
    /// Hard cap on ticks, whether or not `alpha` converged.
    pub max_iterations: usize,
}

impl Default for SimulationOptions {
    fn default() -> Self {
        let alpha_min = 0.001;
        Self {
            random_seed: 0,
            alpha_min,
            alpha_decay: 1.0 - alpha_min.powf(1.0 / 300.0),
            velocity_decay: 0.4,
            center_strength: 0.05,
            collide_strength: 0.7,
            max_iterations: 1000,
        }
    }
}

impl SimulationOptions {
    pub fn validate(&self) -> Result<()> {
        let unit = |name: &str, v: f64, closed_low: bool| -> Result<()> {
            let ok = v.is_finite() && v <= 1.0 && if closed_low { v >= 0.0 } else { v > 0.0 };
            if ok {
                Ok(())
            } else {
                Err(Error::InvalidOptions {
                    message: format!("{name} must be in the unit interval, got {v}"),
                })
            }
        };
        unit("alpha_min", self.alpha_min, false)?;
        unit("alpha_decay", self.alpha_decay, true)?;
        unit("velocity_decay", self.velocity_decay, true)?;
        unit("collide_strength", self.collide_strength, true)?;
        if !(self.center_strength.is_finite() && self.center_strength >= 0.0) {
            return Err(Error::InvalidOptions {
                message: format!(
                    "center_strength must be finite and non-negative, got {}",
                    self.center_strength
                ),
            });
        }
        Ok(())
    }
}
