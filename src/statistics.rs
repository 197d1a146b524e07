#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]

//! Summary statistics over resolved numeric samples.
//!
//! These back the default reduction of the Bayesian network engine and are
//! handy as user reducers. All of them return `None` on an empty slice.

use crate::error::Result;
use crate::random::RandomSource;
use crate::sampler::sample_n_f64;
use crate::value::Value;

/// Arithmetic mean.
///
/// # Example
/// ```rust
/// use dist_algebra::statistics::mean;
///
/// assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
/// assert_eq!(mean(&[]), None);
/// ```
#[must_use]
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Population variance (divides by `n`).
#[must_use]
pub fn variance(samples: &[f64]) -> Option<f64> {
    let mean = mean(samples)?;
    Some(samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / samples.len() as f64)
}

#[must_use]
pub fn std_dev(samples: &[f64]) -> Option<f64> {
    variance(samples).map(f64::sqrt)
}

/// Empirical quantile, `q` in `[0, 1]`, taking the lower order statistic.
#[must_use]
pub fn quantile(samples: &[f64], q: f64) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    let mut sorted = samples.to_vec();
    sorted.sort_by(f64::total_cmp);

    let q = q.clamp(0.0, 1.0);
    let index = (q * sorted.len().saturating_sub(1) as f64).floor() as usize;
    Some(sorted[index.min(sorted.len() - 1)])
}

/// Mean of `n` fully resolved samples of `value`.
///
/// Booleans count as 0 and 1, so for a comparison node this estimates the
/// probability that it holds.
///
/// # Errors
/// Fails when `n` is zero or a sample does not resolve to a number.
pub fn expected_value(value: &Value, n: usize, rng: &mut dyn RandomSource) -> Result<f64> {
    let samples = sample_n_f64(value, n, rng)?;
    Ok(samples.iter().sum::<f64>() / samples.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::bernoulli;
    use crate::random::fake::ScriptedSource;

    #[test]
    fn test_variance_and_std_dev() {
        let samples = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((variance(&samples).unwrap() - 4.0).abs() < 1e-12);
        assert!((std_dev(&samples).unwrap() - 2.0).abs() < 1e-12);
        assert_eq!(variance(&[]), None);
    }

    #[test]
    fn test_quantile() {
        let samples = [5.0, 1.0, 3.0, 2.0, 4.0];
        assert_eq!(quantile(&samples, 0.0), Some(1.0));
        assert_eq!(quantile(&samples, 0.5), Some(3.0));
        assert_eq!(quantile(&samples, 1.0), Some(5.0));
        assert_eq!(quantile(&samples, 2.0), Some(5.0));
        assert_eq!(quantile(&[], 0.5), None);
    }

    #[test]
    fn test_expected_value_of_scripted_draws() {
        let mut rng = ScriptedSource::new().queue("bernoulli", &[1.0, 0.0, 1.0, 1.0]);
        let p = expected_value(&bernoulli(0.5).into(), 4, &mut rng).unwrap();
        assert!((p - 0.75).abs() < 1e-12);
    }
}
