//! Coin flips: probability of at least `min_heads` heads in `flips` tosses.

use super::Experiment;
use crate::combinatorics::binomial_at_least;
use crate::error::{check_probability, Result, SimError};
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinFlips {
    pub flips: u32,
    pub p_heads: f64,
    pub min_heads: u32,
}

impl Default for CoinFlips {
    /// One fair coin, success on heads.
    fn default() -> Self {
        Self {
            flips: 1,
            p_heads: 0.5,
            min_heads: 1,
        }
    }
}

impl Experiment for CoinFlips {
    /// Number of heads.
    type Outcome = u32;

    fn name(&self) -> &'static str {
        "coin"
    }

    fn label(&self) -> String {
        format!(
            "P(heads >= {} in {} flips, p = {})",
            self.min_heads, self.flips, self.p_heads
        )
    }

    fn validate(&self) -> Result<()> {
        check_probability("p_heads", self.p_heads)?;
        if self.flips == 0 {
            return Err(SimError::invalid("flips must be positive"));
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        (0..self.flips).filter(|_| rng.gen_bool(self.p_heads)).count() as u32
    }

    fn score(&self, heads: &u32) -> f64 {
        if *heads >= self.min_heads {
            1.0
        } else {
            0.0
        }
    }

    fn expected(&self) -> Option<f64> {
        binomial_at_least(self.flips, self.min_heads, self.p_heads).ok()
    }
}
