//! The random source the sampler draws from.
//!
//! The sampler only ever talks to [`RandomSource`]: one primitive per family,
//! each taking that family's native parameters and returning one scalar.
//! [`RngSource`] is the default implementation on top of `rand` and
//! `rand_distr`; tests substitute scripted sources.

use crate::config::SamplerConfig;
use crate::error::{DistError, Result};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{
    Bernoulli, Beta, Binomial, ChiSquared, Distribution, Exp, Gamma, LogNormal, Normal, Poisson,
    StudentT, Triangular, Uniform,
};
use std::fmt::Display;

/// One draw per call from a named family.
///
/// Implementations report parameter errors as [`DistError::Sampling`]; the
/// sampler passes them on unchanged.
pub trait RandomSource {
    fn normal(&mut self, mean: f64, sd: f64) -> Result<f64>;

    /// `mean` and `sd` describe the underlying normal.
    fn lognormal(&mut self, mean: f64, sd: f64) -> Result<f64>;

    fn uniform(&mut self, low: f64, high: f64) -> Result<f64>;

    fn binomial(&mut self, trials: u64, p: f64) -> Result<f64>;

    fn beta(&mut self, a: f64, b: f64) -> Result<f64>;

    /// 1.0 with probability `p`, otherwise 0.0.
    fn bernoulli(&mut self, p: f64) -> Result<f64>;

    fn gamma(&mut self, shape: f64, scale: f64) -> Result<f64>;

    fn poisson(&mut self, lambda: f64) -> Result<f64>;

    /// Parameterized by scale (`1 / rate`).
    fn exponential(&mut self, scale: f64) -> Result<f64>;

    fn triangular(&mut self, left: f64, mode: f64, right: f64) -> Result<f64>;

    fn standard_t(&mut self, df: f64) -> Result<f64>;

    fn chisquare(&mut self, df: f64) -> Result<f64>;
}

/// [`RandomSource`] backed by any `rand` generator.
///
/// Seed it once per scope to make whole-network samples reproducible.
///
/// # Example
/// ```rust
/// use dist_algebra::{RandomSource, RngSource};
///
/// let mut a = RngSource::seeded(42);
/// let mut b = RngSource::seeded(42);
/// assert_eq!(a.normal(0.0, 1.0).unwrap(), b.normal(0.0, 1.0).unwrap());
/// ```
#[derive(Debug, Clone)]
pub struct RngSource<R = StdRng> {
    rng: R,
}

impl RngSource<StdRng> {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seeded from the operating system.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Seeded from the config when it carries a seed, otherwise from the OS.
    #[must_use]
    pub fn from_config(config: &SamplerConfig) -> Self {
        match config.seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_os_rng(),
        }
    }
}

impl<R: Rng> RngSource<R> {
    /// Wraps an existing generator.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    pub fn into_inner(self) -> R {
        self.rng
    }

    fn draw<D, E>(&mut self, family: &'static str, dist: std::result::Result<D, E>) -> Result<f64>
    where
        D: Distribution<f64>,
        E: Display,
    {
        let dist = dist.map_err(|e| DistError::sampling(family, e))?;
        Ok(dist.sample(&mut self.rng))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn normal(&mut self, mean: f64, sd: f64) -> Result<f64> {
        self.draw("normal", Normal::new(mean, sd))
    }

    fn lognormal(&mut self, mean: f64, sd: f64) -> Result<f64> {
        self.draw("lognormal", LogNormal::new(mean, sd))
    }

    fn uniform(&mut self, low: f64, high: f64) -> Result<f64> {
        self.draw("uniform", Uniform::<f64>::new_inclusive(low, high))
    }

    #[allow(clippy::cast_precision_loss)]
    fn binomial(&mut self, trials: u64, p: f64) -> Result<f64> {
        let dist = Binomial::new(trials, p).map_err(|e| DistError::sampling("binomial", e))?;
        Ok(dist.sample(&mut self.rng) as f64)
    }

    fn beta(&mut self, a: f64, b: f64) -> Result<f64> {
        self.draw("beta", Beta::new(a, b))
    }

    fn bernoulli(&mut self, p: f64) -> Result<f64> {
        let dist = Bernoulli::new(p).map_err(|e| DistError::sampling("bernoulli", e))?;
        Ok(if dist.sample(&mut self.rng) { 1.0 } else { 0.0 })
    }

    fn gamma(&mut self, shape: f64, scale: f64) -> Result<f64> {
        self.draw("gamma", Gamma::new(shape, scale))
    }

    fn poisson(&mut self, lambda: f64) -> Result<f64> {
        self.draw("poisson", Poisson::new(lambda))
    }

    fn exponential(&mut self, scale: f64) -> Result<f64> {
        if scale <= 0.0 || scale.is_nan() {
            return Err(DistError::sampling(
                "exponential",
                format!("scale must be positive, got {scale}"),
            ));
        }
        self.draw("exponential", Exp::new(1.0 / scale))
    }

    fn triangular(&mut self, left: f64, mode: f64, right: f64) -> Result<f64> {
        self.draw("triangular", Triangular::new(left, right, mode))
    }

    fn standard_t(&mut self, df: f64) -> Result<f64> {
        self.draw("t", StudentT::new(df))
    }

    fn chisquare(&mut self, df: f64) -> Result<f64> {
        self.draw("chisquare", ChiSquared::new(df))
    }
}


/// Deterministic source for unit tests: records every call and echoes the
/// first parameter unless a value was scripted for the family.
#[cfg(test)]
pub(crate) mod fake {
    use super::RandomSource;
    use crate::error::Result;
    use std::collections::{HashMap, VecDeque};

    #[derive(Debug, Clone, PartialEq)]
    pub struct Draw {
        pub family: &'static str,
        pub params: Vec<f64>,
    }

    #[derive(Debug, Default)]
    pub struct ScriptedSource {
        pub calls: Vec<Draw>,
        fixed: HashMap<&'static str, f64>,
        queued: HashMap<&'static str, VecDeque<f64>>,
    }

    impl ScriptedSource {
        pub fn new() -> Self {
            Self::default()
        }

        /// Every draw from `family` returns `value`.
        pub fn returning(mut self, family: &'static str, value: f64) -> Self {
            self.fixed.insert(family, value);
            self
        }

        /// Draws from `family` return `values` in order, then fall back.
        pub fn queue(mut self, family: &'static str, values: &[f64]) -> Self {
            self.queued
                .entry(family)
                .or_default()
                .extend(values.iter().copied());
            self
        }

        fn record(&mut self, family: &'static str, params: &[f64]) -> Result<f64> {
            self.calls.push(Draw {
                family,
                params: params.to_vec(),
            });
            if let Some(next) = self.queued.get_mut(family).and_then(VecDeque::pop_front) {
                return Ok(next);
            }
            Ok(self.fixed.get(family).copied().unwrap_or(params[0]))
        }
    }

    impl RandomSource for ScriptedSource {
        fn normal(&mut self, mean: f64, sd: f64) -> Result<f64> {
            self.record("normal", &[mean, sd])
        }

        fn lognormal(&mut self, mean: f64, sd: f64) -> Result<f64> {
            self.record("lognormal", &[mean, sd])
        }

        fn uniform(&mut self, low: f64, high: f64) -> Result<f64> {
            self.record("uniform", &[low, high])
        }

        #[allow(clippy::cast_precision_loss)]
        fn binomial(&mut self, trials: u64, p: f64) -> Result<f64> {
            self.record("binomial", &[trials as f64, p])
        }

        fn beta(&mut self, a: f64, b: f64) -> Result<f64> {
            self.record("beta", &[a, b])
        }

        fn bernoulli(&mut self, p: f64) -> Result<f64> {
            self.record("bernoulli", &[p])
        }

        fn gamma(&mut self, shape: f64, scale: f64) -> Result<f64> {
            self.record("gamma", &[shape, scale])
        }

        fn poisson(&mut self, lambda: f64) -> Result<f64> {
            self.record("poisson", &[lambda])
        }

        fn exponential(&mut self, scale: f64) -> Result<f64> {
            self.record("exponential", &[scale])
        }

        fn triangular(&mut self, left: f64, mode: f64, right: f64) -> Result<f64> {
            self.record("triangular", &[left, mode, right])
        }

        fn standard_t(&mut self, df: f64) -> Result<f64> {
            self.record("t", &[df])
        }

        fn chisquare(&mut self, df: f64) -> Result<f64> {
            self.record("chisquare", &[df])
        }
    }
}
