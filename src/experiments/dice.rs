//! Dice sums.

use super::Experiment;
use crate::error::{Result, SimError};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest number of distinct sums the exact distribution will tabulate.
const MAX_SUM_TABLE: u64 = 1_000_000;

/// Probability that `dice` rolls of a `sides`-sided die sum to `target_sum`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceRoll {
    pub dice: u32,
    pub sides: u32,
    pub target_sum: u32,
}

impl Default for DiceRoll {
    fn default() -> Self {
        Self {
            dice: 2,
            sides: 6,
            target_sum: 7,
        }
    }
}

/// Exact distribution of the sum, indexed by the sum itself.
///
/// Built by repeated convolution with a single die.
pub fn sum_distribution(dice: u32, sides: u32) -> Result<Vec<f64>> {
    if dice == 0 || sides == 0 {
        return Err(SimError::invalid("dice and sides must be positive"));
    }
    if dice as u64 * sides as u64 > MAX_SUM_TABLE {
        return Err(SimError::invalid(format!(
            "{dice}d{sides} is too large to tabulate"
        )));
    }

    let face = 1.0 / sides as f64;
    let mut dist = vec![1.0];
    for _ in 0..dice {
        let mut next = vec![0.0; dist.len() + sides as usize];
        for (sum, &p) in dist.iter().enumerate() {
            if p == 0.0 {
                continue;
            }
            for roll in 1..=sides as usize {
                next[sum + roll] += p * face;
            }
        }
        dist = next;
    }
    Ok(dist)
}

impl Experiment for DiceRoll {
    type Outcome = u32;

    fn name(&self) -> &'static str {
        "dice"
    }

    fn label(&self) -> String {
        format!("P({}d{} sums to {})", self.dice, self.sides, self.target_sum)
    }

    fn validate(&self) -> Result<()> {
        if self.dice == 0 || self.sides == 0 {
            return Err(SimError::invalid("dice and sides must be positive"));
        }
        if self.dice as u64 * self.sides as u64 > u32::MAX as u64 {
            return Err(SimError::invalid(format!(
                "{}d{} can sum past {}",
                self.dice,
                self.sides,
                u32::MAX
            )));
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        (0..self.dice).map(|_| rng.gen_range(1..=self.sides)).sum()
    }

    fn score(&self, sum: &u32) -> f64 {
        if *sum == self.target_sum {
            1.0
        } else {
            0.0
        }
    }

    fn expected(&self) -> Option<f64> {
        let dist = sum_distribution(self.dice, self.sides).ok()?;
        Some(dist.get(self.target_sum as usize).copied().unwrap_or(0.0))
    }
}
