//! Simulation configuration.

use crate::error::{Result, SimError};
use crate::experiments::{
    CardDraw, CoinFlips, DiceRoll, EuropeanOption, Experiment, GamblersRuin, GaussianTail,
    PiEstimate, ValueAtRisk,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which experiment the simulator runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Distribution {
    Coin,
    Dice,
    Card,
    Gaussian,
    #[value(alias = "gamblers_ruin")]
    GamblersRuin,
    Pi,
    Option,
    Var,
}

impl Distribution {
    pub fn as_str(&self) -> &'static str {
        match self {
            Distribution::Coin => "coin",
            Distribution::Dice => "dice",
            Distribution::Card => "card",
            Distribution::Gaussian => "gaussian",
            Distribution::GamblersRuin => "gamblers_ruin",
            Distribution::Pi => "pi",
            Distribution::Option => "option",
            Distribution::Var => "var",
        }
    }
}

/// Configuration for a simulation run.
///
/// Every experiment keeps its own parameter table; only the one selected by
/// `distribution` is used. In TOML:
///
/// ```toml
/// sample_count = 10000
/// distribution = "gamblers_ruin"
/// seed = 42
///
/// [ruin]
/// stake = 6
/// target = 12
/// win_prob = 0.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Trials per run
    pub sample_count: u64,

    pub distribution: Distribution,

    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,

    /// Independent repetitions, seeded `seed + run index`
    pub runs: u32,

    /// Log verbosity (0 = quiet, 1 = summary, 2 = per run)
    pub verbosity: u8,

    pub coin: CoinFlips,
    pub dice: DiceRoll,
    pub card: CardDraw,
    pub gaussian: GaussianTail,
    pub ruin: GamblersRuin,
    pub option: EuropeanOption,
    pub var: ValueAtRisk,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            sample_count: 10_000,
            distribution: Distribution::Pi,
            seed: None,
            runs: 1,
            verbosity: 1,
            coin: CoinFlips::default(),
            dice: DiceRoll::default(),
            card: CardDraw::default(),
            gaussian: GaussianTail::default(),
            ruin: GamblersRuin::default(),
            option: EuropeanOption::default(),
            var: ValueAtRisk::default(),
        }
    }
}

impl SimConfig {
    /// 2000 seeded points for π.
    pub fn pi_baseline() -> Self {
        Self {
            sample_count: 2000,
            distribution: Distribution::Pi,
            seed: Some(42),
            ..Default::default()
        }
    }

    /// Stake 6, target 12, fair bets, 10k walks.
    pub fn gamblers_ruin_classroom() -> Self {
        Self {
            sample_count: 10_000,
            distribution: Distribution::GamblersRuin,
            seed: Some(7),
            ruin: GamblersRuin::default(),
            ..Default::default()
        }
    }

    /// Single fair coin flip.
    pub fn fair_coin(sample_count: u64) -> Self {
        Self {
            sample_count,
            distribution: Distribution::Coin,
            coin: CoinFlips::default(),
            ..Default::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load a TOML configuration file. Missing keys take their defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Label and closed-form value of the selected experiment.
    pub fn describe(&self) -> (String, Option<f64>) {
        fn of<E: Experiment>(e: &E) -> (String, Option<f64>) {
            (e.label(), e.expected())
        }
        match self.distribution {
            Distribution::Coin => of(&self.coin),
            Distribution::Dice => of(&self.dice),
            Distribution::Card => of(&self.card),
            Distribution::Gaussian => of(&self.gaussian),
            Distribution::GamblersRuin => of(&self.ruin),
            Distribution::Pi => of(&PiEstimate),
            Distribution::Option => of(&self.option),
            Distribution::Var => of(&self.var),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.sample_count == 0 {
            return Err(SimError::invalid("sample_count must be positive"));
        }
        if self.runs == 0 {
            return Err(SimError::invalid("runs must be positive"));
        }
        match self.distribution {
            Distribution::Coin => self.coin.validate(),
            Distribution::Dice => self.dice.validate(),
            Distribution::Card => self.card.validate(),
            Distribution::Gaussian => self.gaussian.validate(),
            Distribution::GamblersRuin => self.ruin.validate(),
            Distribution::Pi => PiEstimate.validate(),
            Distribution::Option => self.option.validate(),
            Distribution::Var => self.var.validate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::CardEvent;

    #[test]
    fn test_default_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
        assert!(SimConfig::pi_baseline().validate().is_ok());
        assert!(SimConfig::gamblers_ruin_classroom().validate().is_ok());
    }

    #[test]
    fn test_zero_samples_invalid() {
        let config = SimConfig::fair_coin(0);
        assert!(config.validate().unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_only_selected_experiment_is_validated() {
        let mut config = SimConfig::pi_baseline();
        config.ruin.win_prob = 3.0;
        assert!(config.validate().is_ok());
        config.distribution = Distribution::GamblersRuin;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_partial_override() {
        let config = SimConfig::from_toml_str(
            r#"
            sample_count = 500
            distribution = "card"
            seed = 9

            [card]
            hand_size = 7
            event = "contains_pair"
            "#,
        )
        .unwrap();
        assert_eq!(config.sample_count, 500);
        assert_eq!(config.distribution, Distribution::Card);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.card.hand_size, 7);
        assert_eq!(config.card.event, CardEvent::ContainsPair);
        // Untouched tables keep their defaults
        assert_eq!(config.ruin, GamblersRuin::default());
        assert_eq!(config.runs, 1);
    }

    #[test]
    fn test_toml_rejects_unknown_distribution() {
        let err = SimConfig::from_toml_str(r#"distribution = "roulette""#).unwrap_err();
        assert!(matches!(err, SimError::Config(_)));
    }

    #[test]
    fn test_describe_pi() {
        let (label, expected) = SimConfig::pi_baseline().describe();
        assert!(label.contains('π'));
        assert_eq!(expected, Some(std::f64::consts::PI));
    }
}
