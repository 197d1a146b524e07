//! # dist-algebra
//!
//! Lazy probability distributions for estimating under uncertainty.
//!
//! Distributions are immutable nodes. Arithmetic, comparisons and function
//! application build new composite nodes without drawing anything; samples
//! are only produced when a node is resolved against an explicit
//! [`RandomSource`].
//!
//! ```rust
//! use dist_algebra::{norm, lognorm, sample_n_f64, RngSource, Transform};
//!
//! let visitors = lognorm(1_000.0, 5_000.0).unwrap();
//! let conversion = norm(0.01, 0.03).unwrap();
//! let sales = (visitors * conversion) >> Transform::lclip(0.0) >> Transform::round(0);
//!
//! let mut rng = RngSource::seeded(2024);
//! let samples = sample_n_f64(&sales.into(), 1_000, &mut rng).unwrap();
//! assert!(samples.iter().all(|s| *s >= 0.0 && s.fract() == 0.0));
//! ```
//!
//! ## Resolution depth
//!
//! A single [`sample`] pass resolves primitives and composites completely,
//! but `const`, `discrete` and `mixture` nodes return what they wrap or
//! select without sampling it. [`resolve_fully`] keeps going until the
//! result is concrete.
//!
//! ## Bayesian networks
//!
//! [`bayesnet`] estimates conditional probabilities by rejection sampling
//! a scenario function, caching the generated population in a
//! [`PopulationCache`] under a caller-chosen key. [`update`] and
//! [`average`] combine distributions without sampling.

pub mod bayes;
pub mod cache;
pub mod computation;
pub mod config;
pub mod distributions;
pub mod error;
pub mod operations;
pub mod random;
pub mod sampler;
pub mod statistics;
pub mod value;

pub use bayes::{Population, average, bayesnet, simple_bayes, update};
pub use cache::{CacheEntry, CacheKey, CacheMetadata, PopulationCache};
pub use computation::{BinaryOperation, Composite, Transform, UnaryOperation};
pub use config::{NetworkOptions, SamplerConfig};
pub use distributions::{
    DEFAULT_CREDIBILITY, Dist, DistKind, TParams, Weighted, bernoulli, beta, binomial, chisquare,
    constant, credible_z, discrete, discrete_map, discrete_weighted, exponential, gamma,
    gamma_with_scale, log_tdist, log_tdist_with_credibility, lognorm, lognorm_mean_sd, lognorm_sd,
    lognorm_with_credibility, mixture, mixture_map, mixture_weighted, norm, norm_mean_sd, norm_sd,
    norm_with_credibility, poisson, tdist, tdist_with_credibility, triangular, uniform,
};
pub use error::{DistError, Result};
pub use operations::{
    Comparison, apply, clip, dist_ceil, dist_floor, dist_max, dist_min, dist_round, lclip, pow,
    rclip,
};
pub use random::{RandomSource, RngSource};
pub use sampler::{resolve_fully, sample, sample_f64, sample_n, sample_n_f64};
pub use value::{Deferred, Value};
