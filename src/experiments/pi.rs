//! π from random points in the unit square.

use super::Experiment;
use crate::error::Result;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fraction of uniform points with x² + y² ≤ 1, reported ×4.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PiEstimate;

impl Experiment for PiEstimate {
    type Outcome = (f64, f64);

    fn name(&self) -> &'static str {
        "pi"
    }

    fn label(&self) -> String {
        "π ≈ 4 · P(x² + y² ≤ 1)".to_string()
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> (f64, f64) {
        (rng.gen::<f64>(), rng.gen::<f64>())
    }

    fn score(&self, &(x, y): &(f64, f64)) -> f64 {
        if x * x + y * y <= 1.0 {
            1.0
        } else {
            0.0
        }
    }

    fn scale(&self) -> f64 {
        4.0
    }

    fn expected(&self) -> Option<f64> {
        Some(std::f64::consts::PI)
    }
}
