//! Rejection-sampled Bayesian networks and closed-form updates.
//!
//! [`bayesnet`] runs a scenario function many times and hands back a
//! [`Population`]. Conditioning discards records (rejection sampling),
//! `find*` projects and reduces what is left. Generated populations are
//! stored in a caller-owned [`PopulationCache`] under a caller-chosen key.

use crate::cache::{CacheKey, PopulationCache};
use crate::config::NetworkOptions;
use crate::distributions::{Dist, DistKind, beta, mixture, norm_mean_sd};
use crate::error::{DistError, Result};
use crate::random::RandomSource;
use crate::statistics;
use std::sync::Arc;
use tracing::debug;

/// Bayes' rule for a binary hypothesis: `p(h|e)`.
///
/// # Example
/// ```rust
/// use dist_algebra::simple_bayes;
///
/// // 1% prior, 80% true positive rate, 9.6% false positive rate.
/// let posterior = simple_bayes(0.8, 0.096, 0.01);
/// assert!((posterior - 0.077_639_751_552_795_04).abs() < 1e-15);
/// ```
#[must_use]
pub fn simple_bayes(likelihood_h: f64, likelihood_not_h: f64, prior: f64) -> f64 {
    (likelihood_h * prior) / (likelihood_h * prior + likelihood_not_h * (1.0 - prior))
}

/// Runs `event_fn` `options.samples` times, or reuses the population
/// cached under `key`.
///
/// A cached population is reused whole when it holds at least the requested
/// number of records; a smaller one is an error rather than being topped
/// up. `options.reload_cache` ignores the cache, and `options.cache` decides
/// whether a fresh population replaces the entry under `key`.
///
/// # Errors
/// - [`DistError::InvalidSampleCount`] when `options.samples` is zero
/// - [`DistError::CacheShortfall`] when the cached population is too small
/// - any error returned by `event_fn`
///
/// # Example
/// ```rust
/// use dist_algebra::{bayesnet, bernoulli, sample_f64, NetworkOptions, PopulationCache, RngSource};
///
/// let cache = PopulationCache::new();
/// let mut rng = RngSource::seeded(42);
/// let rain = bernoulli(0.3);
///
/// let population = bayesnet(
///     &cache,
///     "weather",
///     |rng| sample_f64(&rain.clone().into(), rng),
///     &mut rng,
///     &NetworkOptions::default().samples(1_000),
/// )
/// .unwrap();
/// let p_rain = population.find_mean(|wet| *wet).unwrap();
/// assert!((p_rain - 0.3).abs() < 0.1);
/// ```
pub fn bayesnet<T, F>(
    cache: &PopulationCache<T>,
    key: impl Into<CacheKey>,
    mut event_fn: F,
    rng: &mut dyn RandomSource,
    options: &NetworkOptions,
) -> Result<Population<T>>
where
    F: FnMut(&mut dyn RandomSource) -> Result<T>,
{
    let n = options.samples;
    if n < 1 {
        return Err(DistError::invalid_sample_count(n));
    }
    let key = key.into();

    if options.reload_cache {
        debug!(key = %key, "reloading cache");
    } else if let Some(entry) = cache.get(&key) {
        let cached = entry.metadata.sample_count;
        if cached < n {
            return Err(DistError::CacheShortfall {
                cached,
                requested: n,
            });
        }
        debug!(key = %key, cached, requested = n, "using cached population");
        return Ok(Population::new(entry.population));
    }

    debug!(key = %key, samples = n, "generating population");
    let mut events = Vec::with_capacity(n);
    for _ in 0..n {
        events.push(event_fn(rng)?);
    }

    let events = if options.cache {
        cache.insert(key, events)
    } else {
        Arc::new(events)
    };
    Ok(Population::new(events))
}

/// A generated population, optionally narrowed by conditions.
///
/// Conditioning never copies records; it only tracks which of the shared
/// records survived.
#[derive(Debug)]
pub struct Population<T> {
    events: Arc<Vec<T>>,
    selection: Option<Vec<usize>>,
}

impl<T> Clone for Population<T> {
    fn clone(&self) -> Self {
        Self {
            events: Arc::clone(&self.events),
            selection: self.selection.clone(),
        }
    }
}

impl<T> Population<T> {
    /// Wraps a whole population with no condition applied.
    pub fn new(events: Arc<Vec<T>>) -> Self {
        Self {
            events,
            selection: None,
        }
    }

    /// The underlying generated population, ignoring any condition.
    #[must_use]
    pub fn shared(&self) -> &Arc<Vec<T>> {
        &self.events
    }

    /// Records remaining after conditioning.
    #[must_use]
    pub fn len(&self) -> usize {
        self.selection
            .as_ref()
            .map_or(self.events.len(), Vec::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        match &self.selection {
            None => Box::new(self.events.iter()),
            Some(indices) => Box::new(indices.iter().map(|&i| &self.events[i])),
        }
    }

    /// Keeps the records for which `predicate` holds.
    ///
    /// # Errors
    /// Returns [`DistError::InsufficientSamples`] when no record survives.
    pub fn conditional_on<P>(self, mut predicate: P) -> Result<Self>
    where
        P: FnMut(&T) -> bool,
    {
        let generated = self.len();
        let kept: Vec<usize> = match &self.selection {
            None => (0..self.events.len())
                .filter(|&i| predicate(&self.events[i]))
                .collect(),
            Some(indices) => indices
                .iter()
                .copied()
                .filter(|&i| predicate(&self.events[i]))
                .collect(),
        };
        if kept.is_empty() {
            return Err(DistError::InsufficientSamples { generated });
        }
        debug!(generated, accepted = kept.len(), "applied condition");
        Ok(Self {
            events: self.events,
            selection: Some(kept),
        })
    }

    /// Projects every remaining record, without reducing.
    pub fn find<U, F>(&self, find: F) -> Vec<U>
    where
        F: FnMut(&T) -> U,
    {
        self.iter().map(find).collect()
    }

    /// Projects every remaining record and averages the results.
    ///
    /// # Errors
    /// Returns [`DistError::InsufficientSamples`] on an empty population.
    pub fn find_mean<U, F>(&self, mut find: F) -> Result<f64>
    where
        F: FnMut(&T) -> U,
        U: Into<f64>,
    {
        let values: Vec<f64> = self.iter().map(|event| find(event).into()).collect();
        statistics::mean(&values).ok_or(DistError::InsufficientSamples { generated: 0 })
    }

    /// Projects every remaining record and hands the projections to `reduce`.
    pub fn find_reduce<U, R, F, G>(&self, find: F, reduce: G) -> R
    where
        F: FnMut(&T) -> U,
        G: FnOnce(Vec<U>) -> R,
    {
        reduce(self.find(find))
    }

    /// Hands the remaining records themselves to `reduce`.
    pub fn reduce<R, G>(&self, reduce: G) -> R
    where
        G: FnOnce(Vec<&T>) -> R,
    {
        reduce(self.iter().collect())
    }

    /// The remaining records, cloned.
    #[must_use]
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }
}

/// Closed-form conjugate update of `prior` by `evidence`.
///
/// Normal with normal combines the two by their variances, with the
/// evidence counted `evidence_weight` times. Beta with beta adds the shape
/// parameters and ignores the weight.
///
/// # Errors
/// - [`DistError::MismatchedUpdate`] when the two kinds differ
/// - [`DistError::UnsupportedUpdate`] for any other kind
///
/// # Example
/// ```rust
/// use dist_algebra::{update, norm, DistKind};
///
/// let posterior = update(&norm(1.0, 5.0).unwrap(), &norm(2.0, 3.0).unwrap(), 1.0).unwrap();
/// let DistKind::Normal { mean, sd } = posterior.kind() else { unreachable!() };
/// assert!((mean - 2.53).abs() < 0.01);
/// assert!((sd - 0.29).abs() < 0.01);
/// ```
pub fn update(prior: &Dist, evidence: &Dist, evidence_weight: f64) -> Result<Dist> {
    match (prior.kind(), evidence.kind()) {
        (
            DistKind::Normal {
                mean: prior_mean,
                sd: prior_sd,
            },
            DistKind::Normal {
                mean: evidence_mean,
                sd: evidence_sd,
            },
        ) => {
            let prior_var = prior_sd.powi(2);
            let evidence_var = evidence_sd.powi(2);
            let denominator = evidence_weight * prior_var + evidence_var;
            let mean = (evidence_var * prior_mean + evidence_weight * prior_var * evidence_mean)
                / denominator;
            let sd = ((evidence_var * prior_var) / denominator).sqrt();
            Ok(norm_mean_sd(mean, sd))
        }
        (DistKind::Beta { a: prior_a, b: prior_b }, DistKind::Beta { a, b }) => {
            Ok(beta(prior_a + a, prior_b + b))
        }
        _ if prior.kind_name() != evidence.kind_name() => Err(DistError::MismatchedUpdate {
            prior: prior.kind_name(),
            evidence: evidence.kind_name(),
        }),
        _ => Err(DistError::UnsupportedUpdate {
            kind: prior.kind_name(),
        }),
    }
}

/// Lazy average of two distributions: a mixture of `prior` and `evidence`.
///
/// Without weights both get one half. A single weight is the prior's, and
/// the evidence gets the rest.
///
/// # Errors
/// Fails when more than two weights are given or the weights are invalid.
pub fn average(prior: &Dist, evidence: &Dist, weights: Option<&[f64]>) -> Result<Dist> {
    let weights = weights.map_or_else(|| vec![0.5, 0.5], <[f64]>::to_vec);
    mixture([prior, evidence], Some(weights))
}
