//! Ready-made random experiments.
//!
//! Each experiment knows how to draw one trial, how to score it, and (where a
//! closed form exists) what the estimate should converge to:
//! - Coin flips and dice sums
//! - Card draws without replacement
//! - Gaussian tail probabilities
//! - π from the quarter circle
//! - Gambler's ruin
//! - European options and Value-at-Risk

pub mod cards;
pub mod coin;
pub mod dice;
pub mod finance;
pub mod gamblers_ruin;
pub mod gaussian;
pub mod pi;

pub use cards::{CardDraw, CardEvent};
pub use coin::CoinFlips;
pub use dice::DiceRoll;
pub use finance::{EuropeanOption, OptionKind, ValueAtRisk, VarReport};
pub use gamblers_ruin::{GamblersRuin, RuinOutcome, RuinSummary};
pub use gaussian::GaussianTail;
pub use pi::PiEstimate;

use crate::error::Result;
use crate::estimator::estimate;
use crate::stats::Estimate;
use rand::Rng;

/// A random process plus the statistic estimated from it.
pub trait Experiment {
    type Outcome;

    fn name(&self) -> &'static str;

    /// Human-readable description of the estimated quantity.
    fn label(&self) -> String;

    fn validate(&self) -> Result<()>;

    /// Draw one trial.
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Outcome;

    fn score(&self, outcome: &Self::Outcome) -> f64;

    /// Factor from the mean score to the reported quantity.
    fn scale(&self) -> f64 {
        1.0
    }

    /// Closed-form value of the reported quantity, if known.
    fn expected(&self) -> Option<f64> {
        None
    }
}

/// Validate `experiment` and estimate its reported quantity.
pub fn run_experiment<E, R>(experiment: &E, sample_count: u64, rng: &mut R) -> Result<Estimate>
where
    E: Experiment,
    R: Rng + ?Sized,
{
    experiment.validate()?;
    let raw = estimate(
        sample_count,
        rng,
        |r| experiment.sample(r),
        |outcome| experiment.score(outcome),
    )?;
    Ok(raw.scaled(experiment.scale()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_run_experiment_validates_first() {
        let bad = CoinFlips {
            p_heads: 2.0,
            ..Default::default()
        };
        let mut rng = seeded(Some(1));
        assert!(run_experiment(&bad, 10, &mut rng)
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_run_experiment_applies_scale() {
        let mut rng = seeded(Some(42));
        let e = run_experiment(&PiEstimate, 2000, &mut rng).unwrap();
        // 4 * hits / 2000 lands on a multiple of 1/500
        let hits = e.mean * 500.0;
        assert!((hits - hits.round()).abs() < 1e-9);
        assert!(e.max <= 4.0 && e.min >= 0.0);
    }
}
