//! Normal tail probabilities.

use super::Experiment;
use crate::error::{Result, SimError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::{ContinuousCDF, Normal};

/// One standard normal draw via the Box-Muller transform.
pub fn standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    // 1 - U keeps u1 in (0, 1] so ln() stays finite
    let u1 = 1.0 - rng.gen::<f64>();
    let u2 = rng.gen::<f64>();
    (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos()
}

/// P(X > threshold) for X ~ N(mean, std_dev²).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GaussianTail {
    pub mean: f64,
    pub std_dev: f64,
    pub threshold: f64,
}

impl Default for GaussianTail {
    fn default() -> Self {
        Self {
            mean: 0.0,
            std_dev: 1.0,
            threshold: 1.0,
        }
    }
}

impl Experiment for GaussianTail {
    type Outcome = f64;

    fn name(&self) -> &'static str {
        "gaussian"
    }

    fn label(&self) -> String {
        format!(
            "P(X > {}) for X ~ N({}, {}^2)",
            self.threshold, self.mean, self.std_dev
        )
    }

    fn validate(&self) -> Result<()> {
        if !(self.std_dev > 0.0 && self.std_dev.is_finite()) {
            return Err(SimError::invalid(format!(
                "std_dev must be positive, got {}",
                self.std_dev
            )));
        }
        if !self.mean.is_finite() {
            return Err(SimError::invalid("mean must be finite"));
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.mean + self.std_dev * standard_normal(rng)
    }

    fn score(&self, x: &f64) -> f64 {
        if *x > self.threshold {
            1.0
        } else {
            0.0
        }
    }

    fn expected(&self) -> Option<f64> {
        let normal = Normal::new(self.mean, self.std_dev).ok()?;
        Some(1.0 - normal.cdf(self.threshold))
    }
}
