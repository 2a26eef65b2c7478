//! Gambler's ruin.
//!
//! A gambler starts with `stake` units and bets one unit at a time, winning
//! each bet with probability `win_prob`, until wealth hits 0 (ruin) or
//! `target` (success). The bet count includes the bet that ends the walk;
//! a stake already at 0 or at the target places no bets.

use super::Experiment;
use crate::error::{check_probability, Result, SimError};
use crate::estimator::estimate_vector;
use crate::stats::Estimate;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamblersRuin {
    pub stake: u32,
    pub target: u32,
    pub win_prob: f64,
}

impl Default for GamblersRuin {
    fn default() -> Self {
        Self {
            stake: 6,
            target: 12,
            win_prob: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuinOutcome {
    pub reached_target: bool,
    pub bets: u64,
}

/// Success probability and mean walk length from one batch of walks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuinSummary {
    pub success: Estimate,
    pub bets: Estimate,
}

impl GamblersRuin {
    /// Closed-form expected number of bets until absorption.
    pub fn expected_bets(&self) -> Option<f64> {
        self.validate().ok()?;
        let i = self.stake as f64;
        let n = self.target as f64;
        if self.stake == 0 || self.stake == self.target {
            return Some(0.0);
        }
        let p = self.win_prob;
        let q = 1.0 - p;
        if p == 0.0 {
            return Some(i);
        }
        if p == 1.0 {
            return Some(n - i);
        }
        if p == 0.5 {
            return Some(i * (n - i));
        }
        Some(i / (q - p) - (n / (q - p)) * hitting_probability(p, i, n))
    }

    /// Estimate success probability and mean bets together.
    pub fn simulate<R: Rng + ?Sized>(&self, sample_count: u64, rng: &mut R) -> Result<RuinSummary> {
        self.validate()?;
        let [success, bets] = estimate_vector(
            sample_count,
            rng,
            |r| self.sample(r),
            |o: &RuinOutcome| [self.score(o), o.bets as f64],
        )?;
        debug!(
            stake = self.stake,
            target = self.target,
            success = success.mean,
            bets = bets.mean,
            "gambler's ruin simulated"
        );
        Ok(RuinSummary { success, bets })
    }
}

impl Experiment for GamblersRuin {
    type Outcome = RuinOutcome;

    fn name(&self) -> &'static str {
        "gamblers_ruin"
    }

    fn label(&self) -> String {
        format!(
            "P(reach {} from {}, p = {})",
            self.target, self.stake, self.win_prob
        )
    }

    fn validate(&self) -> Result<()> {
        check_probability("win_prob", self.win_prob)?;
        if self.target == 0 {
            return Err(SimError::invalid("target must be positive"));
        }
        if self.stake > self.target {
            return Err(SimError::invalid(format!(
                "stake {} exceeds target {}",
                self.stake, self.target
            )));
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> RuinOutcome {
        let mut wealth = self.stake;
        let mut bets = 0u64;
        while wealth > 0 && wealth < self.target {
            if rng.gen_bool(self.win_prob) {
                wealth += 1;
            } else {
                wealth -= 1;
            }
            bets += 1;
        }
        RuinOutcome {
            reached_target: wealth == self.target,
            bets,
        }
    }

    fn score(&self, outcome: &RuinOutcome) -> f64 {
        if outcome.reached_target {
            1.0
        } else {
            0.0
        }
    }

    fn expected(&self) -> Option<f64> {
        self.validate().ok()?;
        let i = self.stake as f64;
        let n = self.target as f64;
        if self.stake == 0 {
            return Some(0.0);
        }
        if self.stake == self.target {
            return Some(1.0);
        }
        let p = self.win_prob;
        if p == 0.0 || p == 1.0 {
            return Some(p);
        }
        if p == 0.5 {
            return Some(i / n);
        }
        Some(hitting_probability(p, i, n))
    }
}

/// (1 - r^i) / (1 - r^n) with r = q / p, for p strictly inside (0, 1), p != 1/2.
///
/// When r > 1 both powers overflow for long walks, so the ratio is taken in
/// terms of s = 1 / r instead: (s^(n-i) - s^n) / (1 - s^n).
fn hitting_probability(p: f64, i: f64, n: f64) -> f64 {
    let q = 1.0 - p;
    if q < p {
        let r = q / p;
        (1.0 - r.powf(i)) / (1.0 - r.powf(n))
    } else {
        let s = p / q;
        (s.powf(n - i) - s.powf(n)) / (1.0 - s.powf(n))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::seeded;

    #[test]
    fn test_fair_game_closed_forms() {
        let game = GamblersRuin::default();
        assert_eq!(game.expected(), Some(0.5));
        assert_eq!(game.expected_bets(), Some(36.0));
    }

    #[test]
    fn test_unfair_game_closed_forms() {
        let game = GamblersRuin {
            stake: 1,
            target: 2,
            win_prob: 0.3,
        };
        // One bet decides it
        assert!((game.expected().unwrap() - 0.3).abs() < 1e-12);
        assert!((game.expected_bets().unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_long_unfair_walk_stays_finite() {
        let losing = GamblersRuin {
            stake: 1000,
            target: 2000,
            win_prob: 0.3,
        };
        let p = losing.expected().unwrap();
        let bets = losing.expected_bets().unwrap();
        assert!(p.is_finite() && (0.0..1e-12).contains(&p), "p {p}");
        // Drift of -0.4 per bet from 1000 units
        assert!((bets - 2500.0).abs() < 1e-6, "bets {bets}");

        let winning = GamblersRuin {
            stake: 1000,
            target: 2000,
            win_prob: 0.7,
        };
        let p = winning.expected().unwrap();
        let bets = winning.expected_bets().unwrap();
        assert!((p - 1.0).abs() < 1e-12, "p {p}");
        assert!((bets - 2500.0).abs() < 1e-6, "bets {bets}");
    }

    #[test]
    fn test_both_branches_agree_near_fair() {
        // p and 1 - p mirror each other: P_win(i; p) = 1 - P_win(n - i; 1 - p)
        for &(stake, target, p) in &[(3u32, 10u32, 0.45), (7, 20, 0.49), (1, 5, 0.2)] {
            let game = GamblersRuin {
                stake,
                target,
                win_prob: p,
            };
            let mirror = GamblersRuin {
                stake: target - stake,
                target,
                win_prob: 1.0 - p,
            };
            let a = game.expected().unwrap();
            let b = mirror.expected().unwrap();
            assert!((a + b - 1.0).abs() < 1e-12, "{a} + {b}");
            let da = game.expected_bets().unwrap();
            let db = mirror.expected_bets().unwrap();
            assert!((da - db).abs() < 1e-9, "{da} vs {db}");
        }
    }

    #[test]
    fn test_absorbed_start_places_no_bets() {
        let mut rng = seeded(Some(1));
        let ruined = GamblersRuin {
            stake: 0,
            ..Default::default()
        };
        assert_eq!(
            ruined.sample(&mut rng),
            RuinOutcome {
                reached_target: false,
                bets: 0
            }
        );
        let done = GamblersRuin {
            stake: 12,
            ..Default::default()
        };
        assert_eq!(
            done.sample(&mut rng),
            RuinOutcome {
                reached_target: true,
                bets: 0
            }
        );
        assert_eq!(done.expected(), Some(1.0));
        assert_eq!(done.expected_bets(), Some(0.0));
    }

    #[test]
    fn test_walk_length_parity() {
        // From 6 to either 0 or 12 always takes an even number of bets
        let game = GamblersRuin::default();
        let mut rng = seeded(Some(66));
        for _ in 0..500 {
            let o = game.sample(&mut rng);
            assert_eq!(o.bets % 2, 0);
            assert!(o.bets >= 6);
        }
    }

    #[test]
    fn test_certain_loss() {
        let game = GamblersRuin {
            stake: 4,
            target: 10,
            win_prob: 0.0,
        };
        let mut rng = seeded(Some(3));
        let summary = game.simulate(100, &mut rng).unwrap();
        assert_eq!(summary.success.mean, 0.0);
        assert_eq!(summary.bets.mean, 4.0);
        assert_eq!(game.expected_bets(), Some(4.0));
    }

    #[test]
    fn test_simulated_duration_matches_closed_form() {
        let game = GamblersRuin {
            stake: 5,
            target: 10,
            win_prob: 0.45,
        };
        let mut rng = seeded(Some(45));
        let summary = game.simulate(20_000, &mut rng).unwrap();
        let exact_p = game.expected().unwrap();
        let exact_bets = game.expected_bets().unwrap();
        assert!((summary.success.mean - exact_p).abs() < 5.0 * summary.success.std_error());
        assert!((summary.bets.mean - exact_bets).abs() < 5.0 * summary.bets.std_error());
    }

    #[test]
    fn test_invalid_configurations() {
        let over = GamblersRuin {
            stake: 13,
            ..Default::default()
        };
        assert!(over.validate().is_err());
        let zero_target = GamblersRuin {
            stake: 0,
            target: 0,
            win_prob: 0.5,
        };
        assert!(zero_target.validate().is_err());
        let bad_p = GamblersRuin {
            win_prob: 1.2,
            ..Default::default()
        };
        assert!(bad_p.validate().is_err());
        assert_eq!(bad_p.expected(), None);
    }
}
