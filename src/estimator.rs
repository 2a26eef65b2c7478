//! Monte Carlo estimator.
//!
//! Runs `sample_count` independent trials from a generator, scores each one
//! and reduces the scores by arithmetic mean. The estimate converges to the
//! scorer's expectation as the sample count grows; the sample standard
//! deviation travels with it so callers can build a confidence bound.
//!
//! The random source is always passed in by the caller. A generator that
//! consumes randomness in a fixed sequence per call reproduces the same
//! batch for the same seed.

use crate::error::{Result, SimError};
use crate::rng;
use crate::stats::{Accumulator, Estimate};
use rand::Rng;
use tracing::debug;

fn check_sample_count(sample_count: u64) -> Result<()> {
    if sample_count == 0 {
        return Err(SimError::invalid("sample_count must be positive"));
    }
    Ok(())
}

/// Estimate the mean of `scorer` over `sample_count` trials.
pub fn estimate<R, T, G, S>(
    sample_count: u64,
    rng: &mut R,
    generator: G,
    mut scorer: S,
) -> Result<Estimate>
where
    R: Rng + ?Sized,
    G: FnMut(&mut R) -> T,
    S: FnMut(&T) -> f64,
{
    let [estimate] = estimate_vector(sample_count, rng, generator, |trial| [scorer(trial)])?;
    Ok(estimate)
}

/// Seed a fresh generator and run [`estimate`] with it.
///
/// `None` draws the seed from OS entropy.
pub fn estimate_seeded<T, G, S>(
    sample_count: u64,
    seed: Option<u64>,
    generator: G,
    scorer: S,
) -> Result<Estimate>
where
    G: FnMut(&mut rng::SimRng) -> T,
    S: FnMut(&T) -> f64,
{
    let mut rng = rng::seeded(seed);
    estimate(sample_count, &mut rng, generator, scorer)
}

/// Estimate `K` statistics per trial in a single pass.
pub fn estimate_vector<R, T, G, S, const K: usize>(
    sample_count: u64,
    rng: &mut R,
    mut generator: G,
    mut scorer: S,
) -> Result<[Estimate; K]>
where
    R: Rng + ?Sized,
    G: FnMut(&mut R) -> T,
    S: FnMut(&T) -> [f64; K],
{
    check_sample_count(sample_count)?;

    let mut accumulators: [Accumulator; K] = std::array::from_fn(|_| Accumulator::new());
    for _ in 0..sample_count {
        let trial = generator(rng);
        for (acc, score) in accumulators.iter_mut().zip(scorer(&trial)) {
            acc.push(score);
        }
    }

    finish_all(accumulators)
}

/// Like [`estimate`], but the generator and scorer may fail.
///
/// The first failure aborts the run and is returned as-is. No partial
/// estimate is produced.
pub fn try_estimate<R, T, E, G, S>(
    sample_count: u64,
    rng: &mut R,
    mut generator: G,
    mut scorer: S,
) -> std::result::Result<Estimate, E>
where
    R: Rng + ?Sized,
    E: From<SimError>,
    G: FnMut(&mut R) -> std::result::Result<T, E>,
    S: FnMut(&T) -> std::result::Result<f64, E>,
{
    check_sample_count(sample_count)?;

    let mut acc = Accumulator::new();
    for _ in 0..sample_count {
        let trial = generator(rng)?;
        acc.push(scorer(&trial)?);
    }

    let [estimate] = finish_all([acc])?;
    Ok(estimate)
}

/// Draw the full trial batch, in order.
pub fn sample_batch<R, T, G>(sample_count: u64, rng: &mut R, mut generator: G) -> Result<Vec<T>>
where
    R: Rng + ?Sized,
    G: FnMut(&mut R) -> T,
{
    check_sample_count(sample_count)?;
    let capacity = usize::try_from(sample_count)
        .map_err(|_| SimError::invalid("sample_count does not fit in memory"))?;
    let mut batch = Vec::new();
    batch.try_reserve_exact(capacity).map_err(|e| {
        SimError::invalid(format!("cannot hold {sample_count} samples in memory: {e}"))
    })?;
    for _ in 0..sample_count {
        batch.push(generator(rng));
    }
    Ok(batch)
}

fn finish_all<const K: usize>(accumulators: [Accumulator; K]) -> Result<[Estimate; K]> {
    let mut out = [Estimate {
        samples: 0,
        mean: 0.0,
        std_dev: 0.0,
        min: 0.0,
        max: 0.0,
    }; K];
    for (slot, acc) in out.iter_mut().zip(accumulators.iter()) {
        *slot = acc
            .finish()
            .ok_or_else(|| SimError::invalid("no trials were scored"))?;
    }
    if let Some(first) = out.first() {
        debug!(
            samples = first.samples,
            mean = first.mean,
            std_dev = first.std_dev,
            "estimate complete"
        );
    }
    Ok(out)
}
