//! Resolution of sampleable values into concrete ones.
//!
//! Two entry points carry the depth semantics:
//!
//! - [`sample`] performs exactly one resolution pass. Primitives draw once,
//!   composites follow their children through to concrete values, but
//!   `const`, `discrete` and `mixture` nodes hand back whatever they wrap or
//!   select without sampling it further.
//! - [`resolve_fully`] repeats passes until the result is neither a
//!   distribution nor a deferred computation.
//!
//! Deferred computations always resolve fully.

use crate::distributions::{Dist, DistKind, TParams, Weighted};
use crate::error::{DistError, Result};
use crate::random::RandomSource;
use crate::value::Value;
use tracing::trace;

/// One resolution pass over `value`.
///
/// # Errors
/// Fails on lists, on parameter errors reported by the random source, and
/// on operator or transform errors inside composites.
///
/// # Example
/// ```rust
/// use dist_algebra::{constant, norm_mean_sd, sample, RngSource, Value};
///
/// let mut rng = RngSource::seeded(3);
/// let wrapped = constant(norm_mean_sd(0.0, 1.0));
/// // The first pass unwraps the constant, the second draws from the normal.
/// let inner = sample(&wrapped.into(), &mut rng).unwrap();
/// assert!(inner.is_dist());
/// assert!(matches!(sample(&inner, &mut rng).unwrap(), Value::Number(_)));
/// ```
pub fn sample(value: &Value, rng: &mut dyn RandomSource) -> Result<Value> {
    match value {
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::Text(_) => Ok(value.clone()),
        Value::Deferred(deferred) => {
            let produced = deferred.call(rng)?;
            resolve_fully(&produced, rng)
        }
        Value::Dist(dist) => sample_dist(dist, rng),
        Value::List(_) => Err(DistError::NotADistribution {
            found: value.type_name(),
        }),
    }
}

/// Repeats [`sample`] until the result is concrete: neither a distribution
/// nor a deferred computation.
///
/// # Errors
/// Same as [`sample`].
pub fn resolve_fully(value: &Value, rng: &mut dyn RandomSource) -> Result<Value> {
    let mut current = sample(value, rng)?;
    loop {
        match current {
            Value::Dist(dist) => current = sample_dist(&dist, rng)?,
            Value::Deferred(deferred) => current = deferred.call(rng)?,
            resolved => return Ok(resolved),
        }
    }
}

/// `n` independent single passes, in order.
///
/// # Errors
/// Fails when `n` is zero, or when any pass fails.
pub fn sample_n(value: &Value, n: usize, rng: &mut dyn RandomSource) -> Result<Vec<Value>> {
    if n < 1 {
        return Err(DistError::invalid_sample_count(n));
    }
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(sample(value, rng)?);
    }
    Ok(out)
}

/// Resolves `value` fully and reads the result as a number.
///
/// # Errors
/// Fails like [`resolve_fully`], or with [`DistError::NotNumeric`] when the
/// result is not a number or boolean.
pub fn sample_f64(value: &Value, rng: &mut dyn RandomSource) -> Result<f64> {
    resolve_fully(value, rng)?.try_f64()
}

/// `n` fully resolved numeric samples.
///
/// # Errors
/// Fails when `n` is zero or any sample is not numeric.
pub fn sample_n_f64(value: &Value, n: usize, rng: &mut dyn RandomSource) -> Result<Vec<f64>> {
    if n < 1 {
        return Err(DistError::invalid_sample_count(n));
    }
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        out.push(sample_f64(value, rng)?);
    }
    Ok(out)
}

fn sample_dist(dist: &Dist, rng: &mut dyn RandomSource) -> Result<Value> {
    trace!(kind = dist.kind_name(), "resolving distribution");

    let resolved = match dist.kind() {
        DistKind::Const(inner) => inner.clone(),
        DistKind::Discrete(weighted) | DistKind::Mixture(weighted) => {
            select(weighted, rng)?.clone()
        }
        DistKind::Composite(node) => {
            let children = node.children();
            let mut resolved = Vec::with_capacity(children.len());
            for child in children {
                resolved.push(resolve_fully(child, rng)?);
            }
            node.combine(resolved)?
        }
        DistKind::Normal { mean, sd } => Value::Number(rng.normal(*mean, *sd)?),
        DistKind::LogNormal { mean, sd } => Value::Number(rng.lognormal(*mean, *sd)?),
        DistKind::Uniform { low, high } => Value::Number(rng.uniform(*low, *high)?),
        DistKind::Binomial { trials, p } => Value::Number(rng.binomial(*trials, *p)?),
        DistKind::Beta { a, b } => Value::Number(rng.beta(*a, *b)?),
        DistKind::Bernoulli { p } => Value::Number(rng.bernoulli(*p)?),
        DistKind::Gamma { shape, scale } => Value::Number(rng.gamma(*shape, *scale)?),
        DistKind::Poisson { lambda } => Value::Number(rng.poisson(*lambda)?),
        DistKind::Exponential { scale } => Value::Number(rng.exponential(*scale)?),
        DistKind::Triangular { left, mode, right } => {
            Value::Number(rng.triangular(*left, *mode, *right)?)
        }
        DistKind::ChiSquare { df } => Value::Number(rng.chisquare(*df)?),
        DistKind::StudentT(params) => Value::Number(scaled_t(params, rng)?),
        DistKind::LogT(params) => Value::Number(scaled_t(params, rng)?.exp()),
    };

    Ok(dist.clamp(resolved))
}

fn scaled_t(params: &TParams, rng: &mut dyn RandomSource) -> Result<f64> {
    Ok(params.mean + params.scale * rng.standard_t(params.df)?)
}

/// Weighted choice driven by a single uniform draw.
fn select<'a>(weighted: &'a Weighted, rng: &mut dyn RandomSource) -> Result<&'a Value> {
    let r = rng.uniform(0.0, 1.0)?;
    Ok(weighted.select(r))
}

impl Dist {
    /// One resolution pass over this node. See [`sample`].
    ///
    /// # Errors
    /// Same as [`sample`].
    pub fn sample(&self, rng: &mut dyn RandomSource) -> Result<Value> {
        sample_dist(self, rng)
    }

    /// `n` single passes over this node. See [`sample_n`].
    ///
    /// # Errors
    /// Same as [`sample_n`].
    pub fn sample_n(&self, n: usize, rng: &mut dyn RandomSource) -> Result<Vec<Value>> {
        sample_n(&Value::Dist(self.clone()), n, rng)
    }

    /// Fully resolved numeric sample. See [`sample_f64`].
    ///
    /// # Errors
    /// Same as [`sample_f64`].
    pub fn sample_f64(&self, rng: &mut dyn RandomSource) -> Result<f64> {
        sample_f64(&Value::Dist(self.clone()), rng)
    }
}
