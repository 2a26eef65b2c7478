//! Hands drawn without replacement from a standard 52-card deck.

use super::Experiment;
use crate::combinatorics::combinations;
use crate::error::{Result, SimError};
use rand::seq::index;
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const DECK_SIZE: u32 = 52;
pub const RANKS: u32 = 13;
pub const SUITS: u32 = 4;

/// Rank 0 is the ace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: u8,
    pub suit: u8,
}

impl Card {
    pub fn from_index(i: usize) -> Self {
        Self {
            rank: (i % RANKS as usize) as u8,
            suit: (i / RANKS as usize) as u8,
        }
    }

    pub fn is_ace(&self) -> bool {
        self.rank == 0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardEvent {
    AtLeastOneAce,
    AllSameSuit,
    /// At least two cards share a rank.
    ContainsPair,
}

impl CardEvent {
    pub fn matches(&self, hand: &[Card]) -> bool {
        match self {
            CardEvent::AtLeastOneAce => hand.iter().any(Card::is_ace),
            CardEvent::AllSameSuit => hand.windows(2).all(|w| w[0].suit == w[1].suit),
            CardEvent::ContainsPair => {
                let mut seen = [false; RANKS as usize];
                hand.iter().any(|c| std::mem::replace(&mut seen[c.rank as usize], true))
            }
        }
    }

    /// Exact probability for a hand of `k` cards.
    pub fn probability(&self, k: u32) -> Result<f64> {
        let hands = combinations(DECK_SIZE, k)? as f64;
        let p = match self {
            CardEvent::AtLeastOneAce => {
                if k > DECK_SIZE - SUITS {
                    1.0
                } else {
                    1.0 - combinations(DECK_SIZE - SUITS, k)? as f64 / hands
                }
            }
            CardEvent::AllSameSuit => {
                if k > RANKS {
                    0.0
                } else {
                    SUITS as f64 * combinations(RANKS, k)? as f64 / hands
                }
            }
            CardEvent::ContainsPair => {
                if k > RANKS {
                    1.0
                } else {
                    let distinct = combinations(RANKS, k)? as f64 * (SUITS as f64).powi(k as i32);
                    1.0 - distinct / hands
                }
            }
        };
        Ok(p)
    }

    fn describe(&self) -> &'static str {
        match self {
            CardEvent::AtLeastOneAce => "at least one ace",
            CardEvent::AllSameSuit => "all one suit",
            CardEvent::ContainsPair => "a pair",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CardDraw {
    pub hand_size: u32,
    pub event: CardEvent,
}

impl Default for CardDraw {
    fn default() -> Self {
        Self {
            hand_size: 5,
            event: CardEvent::AtLeastOneAce,
        }
    }
}

impl Experiment for CardDraw {
    type Outcome = Vec<Card>;

    fn name(&self) -> &'static str {
        "card"
    }

    fn label(&self) -> String {
        format!("P({}-card hand has {})", self.hand_size, self.event.describe())
    }

    fn validate(&self) -> Result<()> {
        if self.hand_size == 0 || self.hand_size > DECK_SIZE {
            return Err(SimError::invalid(format!(
                "hand_size must be in 1..={DECK_SIZE}, got {}",
                self.hand_size
            )));
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<Card> {
        index::sample(rng, DECK_SIZE as usize, self.hand_size as usize)
            .into_iter()
            .map(Card::from_index)
            .collect()
    }

    fn score(&self, hand: &Vec<Card>) -> f64 {
        if self.event.matches(hand) {
            1.0
        } else {
            0.0
        }
    }

    fn expected(&self) -> Option<f64> {
        self.event.probability(self.hand_size).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiments::run_experiment;
    use crate::rng::seeded;
    use std::collections::HashSet;

    #[test]
    fn test_deck_indices_are_distinct_cards() {
        let cards: HashSet<Card> = (0..52).map(Card::from_index).collect();
        assert_eq!(cards.len(), 52);
        assert_eq!((0..52).map(Card::from_index).filter(Card::is_ace).count(), 4);
    }

    #[test]
    fn test_hand_has_no_duplicates() {
        let draw = CardDraw {
            hand_size: 13,
            ..Default::default()
        };
        let mut rng = seeded(Some(4));
        for _ in 0..200 {
            let hand = draw.sample(&mut rng);
            let unique: HashSet<Card> = hand.iter().copied().collect();
            assert_eq!(unique.len(), 13);
        }
    }

    #[test]
    fn test_exact_probabilities() {
        // 1 - C(48,5)/C(52,5)
        let ace = CardEvent::AtLeastOneAce.probability(5).unwrap();
        assert!((ace - 0.341_158).abs() < 1e-6);
        // 4 * C(13,5) / C(52,5)
        let flush = CardEvent::AllSameSuit.probability(5).unwrap();
        assert!((flush - 0.001_980_792).abs() < 1e-8);
        let pair = CardEvent::ContainsPair.probability(5).unwrap();
        assert!((pair - 0.492_917).abs() < 1e-6);
        assert_eq!(CardEvent::ContainsPair.probability(14).unwrap(), 1.0);
        assert_eq!(CardEvent::AllSameSuit.probability(14).unwrap(), 0.0);
        assert_eq!(CardEvent::AtLeastOneAce.probability(49).unwrap(), 1.0);
    }

    #[test]
    fn test_event_matching() {
        let hand = [Card { rank: 0, suit: 1 }, Card { rank: 4, suit: 1 }];
        assert!(CardEvent::AtLeastOneAce.matches(&hand));
        assert!(CardEvent::AllSameSuit.matches(&hand));
        assert!(!CardEvent::ContainsPair.matches(&hand));
        let pair = [Card { rank: 4, suit: 0 }, Card { rank: 4, suit: 3 }];
        assert!(CardEvent::ContainsPair.matches(&pair));
        assert!(!CardEvent::AllSameSuit.matches(&pair));
    }

    #[test]
    fn test_simulated_ace_probability() {
        let mut rng = seeded(Some(52));
        let draw = CardDraw::default();
        let e = run_experiment(&draw, 30_000, &mut rng).unwrap();
        assert!((e.mean - 0.341_158).abs() < 0.015, "mean {}", e.mean);
    }

    #[test]
    fn test_oversized_hand_rejected() {
        let draw = CardDraw {
            hand_size: 53,
            ..Default::default()
        };
        assert!(draw.validate().is_err());
    }
}
