//! Counting: factorials, permutations, combinations and binomial probabilities.
//!
//! Counts are exact `u128` values; anything that would overflow is reported
//! as an invalid argument instead of wrapping. Binomial probabilities use the
//! exact counts while they fit and statrs' log-space forms past that.

use crate::error::{check_probability, Result, SimError};
use statrs::distribution::{Binomial, Discrete, DiscreteCDF};

/// n!
pub fn factorial(n: u32) -> Result<u128> {
    (1..=n as u128).try_fold(1u128, |acc, k| {
        acc.checked_mul(k)
            .ok_or_else(|| SimError::invalid(format!("{n}! overflows u128")))
    })
}

/// Ordered selections of `k` items out of `n` (nPr).
pub fn permutations(n: u32, k: u32) -> Result<u128> {
    if k > n {
        return Err(SimError::invalid(format!("cannot arrange {k} of {n} items")));
    }
    ((n - k + 1) as u128..=n as u128).try_fold(1u128, |acc, f| {
        acc.checked_mul(f)
            .ok_or_else(|| SimError::invalid(format!("P({n}, {k}) overflows u128")))
    })
}

/// Unordered selections of `k` items out of `n` (nCr).
pub fn combinations(n: u32, k: u32) -> Result<u128> {
    if k > n {
        return Err(SimError::invalid(format!("cannot choose {k} of {n} items")));
    }
    let k = k.min(n - k);
    let mut acc: u128 = 1;
    for i in 0..k as u128 {
        // acc * (n - i) is always divisible by (i + 1) at this step
        acc = acc
            .checked_mul(n as u128 - i)
            .ok_or_else(|| SimError::invalid(format!("C({n}, {k}) overflows u128")))?
            / (i + 1);
    }
    Ok(acc)
}

fn binomial(n: u32, p: f64) -> Result<Binomial> {
    Binomial::new(p, n as u64).map_err(|e| SimError::invalid(e.to_string()))
}

/// P(X = k) for X ~ Binomial(n, p).
pub fn binomial_pmf(n: u32, k: u32, p: f64) -> Result<f64> {
    check_probability("p", p)?;
    if k > n {
        return Ok(0.0);
    }
    match combinations(n, k) {
        Ok(ways) => Ok(ways as f64 * p.powi(k as i32) * (1.0 - p).powi((n - k) as i32)),
        Err(_) => Ok(binomial(n, p)?.pmf(k as u64)),
    }
}

/// P(X >= k) for X ~ Binomial(n, p).
pub fn binomial_at_least(n: u32, k: u32, p: f64) -> Result<f64> {
    check_probability("p", p)?;
    if k == 0 {
        return Ok(1.0);
    }
    if k > n {
        return Ok(0.0);
    }
    // C(n, n/2) is the largest coefficient of the row
    if combinations(n, n / 2).is_err() {
        return Ok(binomial(n, p)?.sf(k as u64 - 1));
    }
    let mut total = 0.0;
    for j in k..=n {
        total += binomial_pmf(n, j, p)?;
    }
    Ok(total.min(1.0))
}
