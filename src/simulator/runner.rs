//! Main simulation runner.
//!
//! Dispatches on the configured distribution, runs every repetition with its
//! own seeded generator and collects the statistic lines into a report.

use super::config::{Distribution, SimConfig};
use super::report::{ConvergencePoint, RunResult, SimReport, StatLine};
use crate::error::{Result, SimError};
use crate::experiments::{run_experiment, Experiment, PiEstimate};
use crate::rng::{self, SimRng};
use rand::Rng;
use tracing::{debug, info};

/// Run the full simulation and return a report.
pub fn run_simulation(config: &SimConfig) -> Result<SimReport> {
    config.validate()?;
    info!(
        distribution = config.distribution.as_str(),
        samples = config.sample_count,
        runs = config.runs,
        seed = ?config.seed,
        "starting simulation"
    );

    let mut runs = Vec::with_capacity(config.runs as usize);
    for run_idx in 0..config.runs {
        // One generator per run, never shared
        let seed = config.seed.map(|s| s.wrapping_add(run_idx as u64));
        let mut rng = rng::seeded(seed);

        let lines = run_once(config, config.sample_count, &mut rng)?;

        if config.verbosity >= 2 {
            for line in &lines {
                info!(
                    run = run_idx + 1,
                    label = %line.label,
                    value = line.value,
                    expected = ?line.expected,
                    "run finished"
                );
            }
        }

        runs.push(RunResult {
            run: run_idx,
            seed,
            lines,
        });
    }

    Ok(SimReport::from_runs(config, runs))
}

fn single<E: Experiment>(
    experiment: &E,
    sample_count: u64,
    rng: &mut SimRng,
) -> Result<Vec<StatLine>> {
    let estimate = run_experiment(experiment, sample_count, rng)?;
    Ok(vec![StatLine::from_estimate(
        experiment.label(),
        &estimate,
        experiment.expected(),
    )?])
}

/// Execute one repetition of the selected experiment.
fn run_once(config: &SimConfig, sample_count: u64, rng: &mut SimRng) -> Result<Vec<StatLine>> {
    match config.distribution {
        Distribution::Coin => single(&config.coin, sample_count, rng),
        Distribution::Dice => single(&config.dice, sample_count, rng),
        Distribution::Card => single(&config.card, sample_count, rng),
        Distribution::Gaussian => single(&config.gaussian, sample_count, rng),
        Distribution::Pi => single(&PiEstimate, sample_count, rng),
        Distribution::Option => single(&config.option, sample_count, rng),
        Distribution::GamblersRuin => {
            let ruin = &config.ruin;
            let summary = ruin.simulate(sample_count, rng)?;
            Ok(vec![
                StatLine::from_estimate(ruin.label(), &summary.success, ruin.expected())?,
                StatLine::from_estimate(
                    "mean bets until absorption (incl. final bet)",
                    &summary.bets,
                    ruin.expected_bets(),
                )?,
            ])
        }
        Distribution::Var => {
            let var = &config.var;
            let report = var.simulate(sample_count, rng)?;
            let pct = var.confidence * 100.0;
            Ok(vec![
                StatLine::from_estimate(var.label(), &report.mean_loss, var.expected())?,
                StatLine::point(
                    format!("{pct}% Value-at-Risk"),
                    report.value_at_risk,
                    Some(report.analytic_var),
                ),
                StatLine::point(
                    format!("{pct}% expected shortfall"),
                    report.expected_shortfall,
                    None,
                ),
            ])
        }
    }
}

/// Measure how the error of the first statistic shrinks with sample size.
///
/// Each (sample count, repeat) pair gets its own ChaCha stream so the points
/// are independent of each other and of the order they run in.
pub fn convergence_study(
    config: &SimConfig,
    sample_counts: &[u64],
    repeats: u32,
) -> Result<Vec<ConvergencePoint>> {
    config.validate()?;
    if repeats == 0 {
        return Err(SimError::invalid("repeats must be positive"));
    }
    if sample_counts.iter().any(|&n| n == 0) {
        return Err(SimError::invalid("sample counts must be positive"));
    }

    let base_seed = config
        .seed
        .unwrap_or_else(|| rng::seeded(None).gen::<u64>());

    let mut points = Vec::with_capacity(sample_counts.len());
    for (count_idx, &sample_count) in sample_counts.iter().enumerate() {
        let mut total_error = 0.0;
        for repeat in 0..repeats {
            let mut rng = rng::stream(base_seed.wrapping_add(repeat as u64), count_idx as u64);
            let lines = run_once(config, sample_count, &mut rng)?;
            let error = lines
                .first()
                .and_then(StatLine::abs_error)
                .ok_or_else(|| {
                    SimError::invalid(format!(
                        "{} has no closed form to converge to",
                        config.distribution.as_str()
                    ))
                })?;
            total_error += error;
        }
        let point = ConvergencePoint {
            sample_count,
            repeats,
            mean_abs_error: total_error / repeats as f64,
        };
        debug!(
            samples = point.sample_count,
            error = point.mean_abs_error,
            "convergence point"
        );
        points.push(point);
    }

    Ok(points)
}
