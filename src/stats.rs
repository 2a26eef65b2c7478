//! Streaming statistics over trial contributions.

use crate::error::{Result, SimError};
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};

/// Sample-mean aggregate of scorer outputs over one trial batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Estimate {
    pub samples: u64,
    pub mean: f64,
    /// Sample standard deviation of contributions (0 for a single sample).
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

impl Estimate {
    /// Standard error of the mean.
    pub fn std_error(&self) -> f64 {
        self.std_dev / (self.samples as f64).sqrt()
    }

    /// Two-sided normal-approximation confidence interval at `level`.
    pub fn confidence_interval(&self, level: f64) -> Result<(f64, f64)> {
        if !(level > 0.0 && level < 1.0) {
            return Err(SimError::invalid(format!(
                "confidence level must be in (0, 1), got {level}"
            )));
        }
        let z = standard_normal()?.inverse_cdf(0.5 + level / 2.0);
        let half_width = z * self.std_error();
        Ok((self.mean - half_width, self.mean + half_width))
    }

    /// Multiply every location statistic by `factor` (e.g. 4 for π).
    pub fn scaled(&self, factor: f64) -> Estimate {
        let (lo, hi) = (self.min * factor, self.max * factor);
        Estimate {
            samples: self.samples,
            mean: self.mean * factor,
            std_dev: self.std_dev * factor.abs(),
            min: lo.min(hi),
            max: lo.max(hi),
        }
    }
}

/// Online accumulator using Welford's update for the variance.
///
/// The mean is reported as `sum / n` so that an all-indicator batch can
/// never leave `[0, 1]`.
#[derive(Debug, Clone)]
pub struct Accumulator {
    count: u64,
    sum: f64,
    running_mean: f64,
    m2: f64,
    min: f64,
    max: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            running_mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    pub fn push(&mut self, x: f64) {
        self.count += 1;
        self.sum += x;
        let delta = x - self.running_mean;
        self.running_mean += delta / self.count as f64;
        self.m2 += delta * (x - self.running_mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// None when nothing was pushed.
    pub fn finish(&self) -> Option<Estimate> {
        if self.count == 0 {
            return None;
        }
        let variance = if self.count > 1 {
            (self.m2 / (self.count - 1) as f64).max(0.0)
        } else {
            0.0
        };
        Some(Estimate {
            samples: self.count,
            mean: self.sum / self.count as f64,
            std_dev: variance.sqrt(),
            min: self.min,
            max: self.max,
        })
    }
}

impl Default for Accumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Linear-interpolated percentile of a sorted slice, `p` in `[0, 100]`.
pub fn percentile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() || !(0.0..=100.0).contains(&p) {
        return None;
    }
    let rank = p / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let weight = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * weight)
}

pub(crate) fn standard_normal() -> Result<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| SimError::invalid(e.to_string()))
}
