//! Toy finance: European option pricing and Value-at-Risk under geometric
//! Brownian motion.

use super::gaussian::standard_normal;
use super::Experiment;
use crate::error::{Result, SimError};
use crate::estimator::sample_batch;
use crate::stats::{percentile, standard_normal as unit_normal, Accumulator, Estimate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use statrs::distribution::ContinuousCDF;

/// Trading days per year, used to convert a VaR horizon to years.
pub const TRADING_DAYS: f64 = 252.0;

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::invalid(format!("{name} must be positive, got {value}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OptionKind {
    Call,
    Put,
}

/// Discounted payoff of a European option on a GBM underlying.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EuropeanOption {
    pub kind: OptionKind,
    pub spot: f64,
    pub strike: f64,
    /// Continuously compounded risk-free rate.
    pub rate: f64,
    pub volatility: f64,
    /// Years to expiry.
    pub maturity: f64,
}

impl Default for EuropeanOption {
    fn default() -> Self {
        Self {
            kind: OptionKind::Call,
            spot: 100.0,
            strike: 100.0,
            rate: 0.05,
            volatility: 0.2,
            maturity: 1.0,
        }
    }
}

impl EuropeanOption {
    fn discount(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }

    /// Black-Scholes price.
    pub fn black_scholes(&self) -> Result<f64> {
        self.validate()?;
        let n = unit_normal()?;
        let vol_sqrt_t = self.volatility * self.maturity.sqrt();
        let d1 = ((self.spot / self.strike).ln()
            + (self.rate + 0.5 * self.volatility * self.volatility) * self.maturity)
            / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;
        let df = self.discount();
        Ok(match self.kind {
            OptionKind::Call => self.spot * n.cdf(d1) - self.strike * df * n.cdf(d2),
            OptionKind::Put => self.strike * df * n.cdf(-d2) - self.spot * n.cdf(-d1),
        })
    }
}

impl Experiment for EuropeanOption {
    /// Terminal price of the underlying.
    type Outcome = f64;

    fn name(&self) -> &'static str {
        "option"
    }

    fn label(&self) -> String {
        let kind = match self.kind {
            OptionKind::Call => "call",
            OptionKind::Put => "put",
        };
        format!(
            "European {kind} price (S={}, K={}, r={}, σ={}, T={})",
            self.spot, self.strike, self.rate, self.volatility, self.maturity
        )
    }

    fn validate(&self) -> Result<()> {
        check_positive("spot", self.spot)?;
        check_positive("strike", self.strike)?;
        check_positive("volatility", self.volatility)?;
        check_positive("maturity", self.maturity)?;
        if !self.rate.is_finite() {
            return Err(SimError::invalid("rate must be finite"));
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let drift = (self.rate - 0.5 * self.volatility * self.volatility) * self.maturity;
        let diffusion = self.volatility * self.maturity.sqrt() * standard_normal(rng);
        self.spot * (drift + diffusion).exp()
    }

    fn score(&self, terminal: &f64) -> f64 {
        let payoff = match self.kind {
            OptionKind::Call => (terminal - self.strike).max(0.0),
            OptionKind::Put => (self.strike - terminal).max(0.0),
        };
        self.discount() * payoff
    }

    fn expected(&self) -> Option<f64> {
        self.black_scholes().ok()
    }
}

/// Portfolio loss over a short horizon, with VaR and expected shortfall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueAtRisk {
    pub portfolio_value: f64,
    /// Annualised expected return (GBM drift).
    pub mean_return: f64,
    /// Annualised volatility.
    pub volatility: f64,
    pub horizon_days: f64,
    /// Loss quantile, e.g. 0.99.
    pub confidence: f64,
}

impl Default for ValueAtRisk {
    fn default() -> Self {
        Self {
            portfolio_value: 1_000_000.0,
            mean_return: 0.07,
            volatility: 0.2,
            horizon_days: 10.0,
            confidence: 0.99,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VarReport {
    pub mean_loss: Estimate,
    /// Empirical loss quantile at the configured confidence.
    pub value_at_risk: f64,
    /// Mean loss at or beyond the VaR.
    pub expected_shortfall: f64,
    pub analytic_var: f64,
}

impl ValueAtRisk {
    fn horizon_years(&self) -> f64 {
        self.horizon_days / TRADING_DAYS
    }

    fn log_drift(&self) -> f64 {
        (self.mean_return - 0.5 * self.volatility * self.volatility) * self.horizon_years()
    }

    fn log_vol(&self) -> f64 {
        self.volatility * self.horizon_years().sqrt()
    }

    /// Exact loss quantile under the lognormal model.
    pub fn analytic_var(&self) -> Result<f64> {
        self.validate()?;
        let z = unit_normal()?.inverse_cdf(1.0 - self.confidence);
        Ok(self.portfolio_value * (1.0 - (self.log_drift() + self.log_vol() * z).exp()))
    }

    /// Simulate a batch of losses and read VaR and expected shortfall off it.
    pub fn simulate<R: Rng + ?Sized>(&self, sample_count: u64, rng: &mut R) -> Result<VarReport> {
        self.validate()?;
        let mut losses = sample_batch(sample_count, rng, |r| self.sample(r))?;
        losses.sort_by(|a, b| a.total_cmp(b));

        let value_at_risk = percentile(&losses, self.confidence * 100.0)
            .ok_or_else(|| SimError::invalid("no losses sampled"))?;
        let tail: Vec<f64> = losses
            .iter()
            .copied()
            .filter(|&l| l >= value_at_risk)
            .collect();
        let expected_shortfall = if tail.is_empty() {
            value_at_risk
        } else {
            tail.iter().sum::<f64>() / tail.len() as f64
        };

        let mut acc = Accumulator::new();
        for &loss in &losses {
            acc.push(loss);
        }
        let mean_loss = acc
            .finish()
            .ok_or_else(|| SimError::invalid("no losses sampled"))?;

        Ok(VarReport {
            mean_loss,
            value_at_risk,
            expected_shortfall,
            analytic_var: self.analytic_var()?,
        })
    }
}

impl Experiment for ValueAtRisk {
    /// Loss (positive = money lost).
    type Outcome = f64;

    fn name(&self) -> &'static str {
        "var"
    }

    fn label(&self) -> String {
        format!(
            "expected {}-day loss on {:.0}",
            self.horizon_days, self.portfolio_value
        )
    }

    fn validate(&self) -> Result<()> {
        check_positive("portfolio_value", self.portfolio_value)?;
        check_positive("volatility", self.volatility)?;
        check_positive("horizon_days", self.horizon_days)?;
        if !(self.confidence > 0.0 && self.confidence < 1.0) {
            return Err(SimError::invalid(format!(
                "confidence must be in (0, 1), got {}",
                self.confidence
            )));
        }
        if !self.mean_return.is_finite() {
            return Err(SimError::invalid("mean_return must be finite"));
        }
        Ok(())
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let log_return = self.log_drift() + self.log_vol() * standard_normal(rng);
        self.portfolio_value * (1.0 - log_return.exp())
    }

    fn score(&self, loss: &f64) -> f64 {
        *loss
    }

    fn expected(&self) -> Option<f64> {
        self.validate().ok()?;
        Some(self.portfolio_value * (1.0 - (self.mean_return * self.horizon_years()).exp()))
    }
}
