//! Distribution nodes and their constructors.
//!
//! A [`Dist`] is an immutable description of a stochastic primitive or of a
//! deferred composition of other values. Nothing is drawn when a node is
//! built; sampling happens in [`crate::sampler`].

use crate::computation::Composite;
use crate::error::{DistError, Result};
use crate::value::Value;
use statrs::function::erf::erf_inv;
use std::f64::consts::SQRT_2;
use std::fmt;
use std::sync::Arc;

/// Credibility used when an interval is given without one.
pub const DEFAULT_CREDIBILITY: f64 = 90.0;

/// An immutable distribution node.
///
/// Cloning is cheap and shares the node. Every builder method returns a new
/// node and leaves the receiver untouched.
#[derive(Clone)]
pub struct Dist {
    node: Arc<DistNode>,
}

#[derive(Clone, Debug)]
struct DistNode {
    kind: DistKind,
    lower_clip: Option<f64>,
    upper_clip: Option<f64>,
}

/// The family (or composition) a node describes, with its native parameters.
#[derive(Clone, Debug)]
pub enum DistKind {
    /// Returns the wrapped value as-is on resolution, one layer of opacity.
    Const(Value),
    Normal { mean: f64, sd: f64 },
    /// Parameters of the underlying normal.
    LogNormal { mean: f64, sd: f64 },
    Uniform { low: f64, high: f64 },
    Binomial { trials: u64, p: f64 },
    Beta { a: f64, b: f64 },
    Bernoulli { p: f64 },
    Gamma { shape: f64, scale: f64 },
    Poisson { lambda: f64 },
    Exponential { scale: f64 },
    Triangular { left: f64, mode: f64, right: f64 },
    ChiSquare { df: f64 },
    StudentT(TParams),
    LogT(TParams),
    Discrete(Weighted),
    Mixture(Weighted),
    Composite(Composite),
}

/// Interval-specified Student-t parameters.
///
/// `mean` and `scale` are derived from the interval at construction time; for
/// log-t they live on the log scale.
#[derive(Clone, Debug, PartialEq)]
pub struct TParams {
    pub low: f64,
    pub high: f64,
    pub df: f64,
    pub credibility: f64,
    pub mean: f64,
    pub scale: f64,
}

/// Outcomes with weights normalized to sum to one.
#[derive(Clone, Debug)]
pub struct Weighted {
    outcomes: Vec<Value>,
    weights: Vec<f64>,
}

impl Weighted {
    /// Validates and normalizes the weights.
    ///
    /// # Errors
    /// Fails when there are no outcomes, the counts differ, a weight is
    /// negative or non-finite, or all weights are zero.
    pub fn new(outcomes: Vec<Value>, weights: Vec<f64>) -> Result<Self> {
        if outcomes.is_empty() {
            return Err(DistError::EmptyComponents);
        }
        if weights.len() != outcomes.len() {
            return Err(DistError::weight_mismatch(outcomes.len(), weights.len()));
        }
        if let Some(bad) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(DistError::invalid_weights(format!(
                "weight {bad} is negative or not finite"
            )));
        }

        let total: f64 = weights.iter().sum();
        if total <= 0.0 {
            return Err(DistError::invalid_weights("all weights are zero"));
        }

        Ok(Self {
            outcomes,
            weights: weights.iter().map(|w| w / total).collect(),
        })
    }

    /// Equal weight on every outcome.
    ///
    /// # Errors
    /// Fails when there are no outcomes.
    pub fn uniform(outcomes: Vec<Value>) -> Result<Self> {
        let weights = vec![1.0; outcomes.len()];
        Self::new(outcomes, weights)
    }

    #[must_use]
    pub fn outcomes(&self) -> &[Value] {
        &self.outcomes
    }

    /// Normalized weights, in outcome order.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }

    /// Picks the first outcome whose cumulative weight exceeds `r`.
    ///
    /// `r` is a uniform draw from [0, 1]. When `r` reaches the final
    /// cumulative weight, the last outcome with a positive weight is picked,
    /// so zero-weight outcomes are never selected.
    #[must_use]
    pub fn select(&self, r: f64) -> &Value {
        let mut cumulative = 0.0;
        let mut fallback = &self.outcomes[0];
        for (outcome, weight) in self.outcomes.iter().zip(&self.weights) {
            if *weight <= 0.0 {
                continue;
            }
            cumulative += weight;
            if cumulative > r {
                return outcome;
            }
            fallback = outcome;
        }
        fallback
    }
}

impl Dist {
    pub(crate) fn from_kind(kind: DistKind) -> Self {
        Self {
            node: Arc::new(DistNode {
                kind,
                lower_clip: None,
                upper_clip: None,
            }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &DistKind {
        &self.node.kind
    }

    /// Discriminant name of the node.
    #[must_use]
    pub fn kind_name(&self) -> &'static str {
        match self.kind() {
            DistKind::Const(_) => "const",
            DistKind::Normal { .. } => "normal",
            DistKind::LogNormal { .. } => "lognormal",
            DistKind::Uniform { .. } => "uniform",
            DistKind::Binomial { .. } => "binomial",
            DistKind::Beta { .. } => "beta",
            DistKind::Bernoulli { .. } => "bernoulli",
            DistKind::Gamma { .. } => "gamma",
            DistKind::Poisson { .. } => "poisson",
            DistKind::Exponential { .. } => "exponential",
            DistKind::Triangular { .. } => "triangular",
            DistKind::ChiSquare { .. } => "chisquare",
            DistKind::StudentT(_) => "t",
            DistKind::LogT(_) => "log_t",
            DistKind::Discrete(_) => "discrete",
            DistKind::Mixture(_) => "mixture",
            DistKind::Composite(_) => "composite",
        }
    }

    #[must_use]
    pub fn lower_clip(&self) -> Option<f64> {
        self.node.lower_clip
    }

    #[must_use]
    pub fn upper_clip(&self) -> Option<f64> {
        self.node.upper_clip
    }

    /// A copy of this node whose samples are clamped to at least `bound`.
    ///
    /// # Example
    /// ```rust
    /// use dist_algebra::norm_mean_sd;
    ///
    /// let positive = norm_mean_sd(1.0, 2.0).with_lower_clip(0.0);
    /// assert_eq!(positive.lower_clip(), Some(0.0));
    /// ```
    #[must_use]
    pub fn with_lower_clip(&self, bound: f64) -> Self {
        self.with_bounds(Some(bound), self.node.upper_clip)
    }

    /// A copy of this node whose samples are clamped to at most `bound`.
    #[must_use]
    pub fn with_upper_clip(&self, bound: f64) -> Self {
        self.with_bounds(self.node.lower_clip, Some(bound))
    }

    /// A copy of this node clamped to `[lower, upper]`.
    #[must_use]
    pub fn with_clip(&self, lower: f64, upper: f64) -> Self {
        self.with_bounds(Some(lower), Some(upper))
    }

    fn with_bounds(&self, lower_clip: Option<f64>, upper_clip: Option<f64>) -> Self {
        Self {
            node: Arc::new(DistNode {
                kind: self.node.kind.clone(),
                lower_clip,
                upper_clip,
            }),
        }
    }

    /// Applies this node's clip bounds. Clamps, never rejects; non-numeric
    /// values pass through.
    pub(crate) fn clamp(&self, value: Value) -> Value {
        if self.node.lower_clip.is_none() && self.node.upper_clip.is_none() {
            return value;
        }
        match value {
            Value::Number(x) => Value::Number(self.clamp_f64(x)),
            other => other,
        }
    }

    pub(crate) fn clamp_f64(&self, mut x: f64) -> f64 {
        if let Some(lower) = self.node.lower_clip {
            x = x.max(lower);
        }
        if let Some(upper) = self.node.upper_clip {
            x = x.min(upper);
        }
        x
    }

    /// True when both handles share the same node.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }
}

impl fmt::Debug for Dist {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.kind_name());
        out.field("kind", &self.node.kind);
        if let Some(lower) = self.node.lower_clip {
            out.field("lower_clip", &lower);
        }
        if let Some(upper) = self.node.upper_clip {
            out.field("upper_clip", &upper);
        }
        out.finish()
    }
}

/// Normal quantile for the two-sided `credibility` percentage, e.g. 1.645 for 90.
///
/// # Errors
/// Fails unless `0 < credibility < 100`.
pub fn credible_z(credibility: f64) -> Result<f64> {
    if !(credibility > 0.0 && credibility < 100.0) {
        return Err(DistError::InvalidCredibility { value: credibility });
    }
    Ok(SQRT_2 * erf_inv(credibility / 100.0))
}

fn check_interval(low: f64, high: f64) -> Result<()> {
    // Written so that NaN bounds are rejected as well.
    if low <= high {
        Ok(())
    } else {
        Err(DistError::InvalidInterval { low, high })
    }
}

fn check_log_interval(low: f64, high: f64) -> Result<(f64, f64)> {
    check_interval(low, high)?;
    if low <= 0.0 {
        return Err(DistError::invalid_parameter(
            "low",
            low,
            "must be positive for a log-scale interval",
        ));
    }
    Ok((low.ln(), high.ln()))
}

/// Converts a credible interval into `(mean, sd)` of a normal.
fn interval_to_normal(low: f64, high: f64, credibility: f64) -> Result<(f64, f64)> {
    check_interval(low, high)?;
    let z = credible_z(credibility)?;
    Ok(((low + high) / 2.0, (high - low) / 2.0 / z))
}

/// Wraps a value so that one resolution pass returns it untouched.
///
/// # Example
/// ```rust
/// use dist_algebra::{constant, sample, RngSource, Value};
///
/// let mut rng = RngSource::seeded(1);
/// assert_eq!(sample(&constant(11).into(), &mut rng).unwrap(), Value::Number(11.0));
/// ```
pub fn constant(value: impl Into<Value>) -> Dist {
    Dist::from_kind(DistKind::Const(value.into()))
}

/// Normal distribution with a 90% credible interval of `[low, high]`.
///
/// # Errors
/// Fails when `low > high`.
///
/// # Example
/// ```rust
/// use dist_algebra::{norm, DistKind};
///
/// let d = norm(1.0, 2.0).unwrap();
/// if let DistKind::Normal { mean, sd } = d.kind() {
///     assert!((mean - 1.5).abs() < 1e-12);
///     assert!((sd - 0.304).abs() < 1e-3);
/// }
/// ```
pub fn norm(low: f64, high: f64) -> Result<Dist> {
    norm_with_credibility(low, high, DEFAULT_CREDIBILITY)
}

/// Normal distribution with a `credibility`% credible interval of `[low, high]`.
///
/// # Errors
/// Fails when `low > high` or the credibility is outside (0, 100).
pub fn norm_with_credibility(low: f64, high: f64, credibility: f64) -> Result<Dist> {
    let (mean, sd) = interval_to_normal(low, high, credibility)?;
    Ok(norm_mean_sd(mean, sd))
}

/// Normal distribution from native parameters.
#[must_use]
pub fn norm_mean_sd(mean: f64, sd: f64) -> Dist {
    Dist::from_kind(DistKind::Normal { mean, sd })
}

/// Normal distribution centred on zero.
#[must_use]
pub fn norm_sd(sd: f64) -> Dist {
    norm_mean_sd(0.0, sd)
}

/// Log-normal whose 90% credible interval is `[low, high]`.
///
/// # Errors
/// Fails when `low > high` or `low <= 0`.
pub fn lognorm(low: f64, high: f64) -> Result<Dist> {
    lognorm_with_credibility(low, high, DEFAULT_CREDIBILITY)
}

/// Log-normal whose `credibility`% credible interval is `[low, high]`.
///
/// # Errors
/// Fails when `low > high`, `low <= 0` or the credibility is outside (0, 100).
pub fn lognorm_with_credibility(low: f64, high: f64, credibility: f64) -> Result<Dist> {
    let (log_low, log_high) = check_log_interval(low, high)?;
    let (mean, sd) = interval_to_normal(log_low, log_high, credibility)?;
    Ok(lognorm_mean_sd(mean, sd))
}

/// Log-normal from the mean and standard deviation of the underlying normal.
#[must_use]
pub fn lognorm_mean_sd(mean: f64, sd: f64) -> Dist {
    Dist::from_kind(DistKind::LogNormal { mean, sd })
}

/// Log-normal whose underlying normal is centred on zero.
#[must_use]
pub fn lognorm_sd(sd: f64) -> Dist {
    lognorm_mean_sd(0.0, sd)
}

#[must_use]
pub fn uniform(low: f64, high: f64) -> Dist {
    Dist::from_kind(DistKind::Uniform { low, high })
}

#[must_use]
pub fn binomial(trials: u64, p: f64) -> Dist {
    Dist::from_kind(DistKind::Binomial { trials, p })
}

#[must_use]
pub fn beta(a: f64, b: f64) -> Dist {
    Dist::from_kind(DistKind::Beta { a, b })
}

/// Resolves to 1 with probability `p`, otherwise 0.
#[must_use]
pub fn bernoulli(p: f64) -> Dist {
    Dist::from_kind(DistKind::Bernoulli { p })
}

/// Gamma distribution with unit scale.
#[must_use]
pub fn gamma(shape: f64) -> Dist {
    gamma_with_scale(shape, 1.0)
}

#[must_use]
pub fn gamma_with_scale(shape: f64, scale: f64) -> Dist {
    Dist::from_kind(DistKind::Gamma { shape, scale })
}

#[must_use]
pub fn poisson(lambda: f64) -> Dist {
    Dist::from_kind(DistKind::Poisson { lambda })
}

/// Exponential distribution parameterized by its scale (the mean, `1 / rate`).
#[must_use]
pub fn exponential(scale: f64) -> Dist {
    Dist::from_kind(DistKind::Exponential { scale })
}

#[must_use]
pub fn triangular(left: f64, mode: f64, right: f64) -> Dist {
    Dist::from_kind(DistKind::Triangular { left, mode, right })
}

#[must_use]
pub fn chisquare(df: f64) -> Dist {
    Dist::from_kind(DistKind::ChiSquare { df })
}

fn t_params(low: f64, high: f64, df: f64, credibility: f64) -> Result<TParams> {
    let (mean, scale) = interval_to_normal(low, high, credibility)?;
    Ok(TParams {
        low,
        high,
        df,
        credibility,
        mean,
        scale,
    })
}

/// Student-t with `df` degrees of freedom, scaled so that a normal with the
/// same location and scale would put 90% of its mass in `[low, high]`.
///
/// # Errors
/// Fails when `low > high`.
pub fn tdist(low: f64, high: f64, df: f64) -> Result<Dist> {
    tdist_with_credibility(low, high, df, DEFAULT_CREDIBILITY)
}

/// Interval-specified Student-t at an explicit credibility.
///
/// # Errors
/// Fails when `low > high` or the credibility is outside (0, 100).
pub fn tdist_with_credibility(low: f64, high: f64, df: f64, credibility: f64) -> Result<Dist> {
    let params = t_params(low, high, df, credibility)?;
    Ok(Dist::from_kind(DistKind::StudentT(params)))
}

/// Log-scale Student-t over the positive interval `[low, high]`.
///
/// # Errors
/// Fails when `low > high` or `low <= 0`.
pub fn log_tdist(low: f64, high: f64, df: f64) -> Result<Dist> {
    log_tdist_with_credibility(low, high, df, DEFAULT_CREDIBILITY)
}

/// Log-scale Student-t at an explicit credibility.
///
/// # Errors
/// Fails when `low > high`, `low <= 0` or the credibility is outside (0, 100).
pub fn log_tdist_with_credibility(
    low: f64,
    high: f64,
    df: f64,
    credibility: f64,
) -> Result<Dist> {
    let (log_low, log_high) = check_log_interval(low, high)?;
    let mut params = t_params(log_low, log_high, df, credibility)?;
    params.low = low;
    params.high = high;
    Ok(Dist::from_kind(DistKind::LogT(params)))
}

/// Uniform choice among `outcomes`.
///
/// # Errors
/// Fails when `outcomes` is empty.
///
/// # Example
/// ```rust
/// use dist_algebra::discrete;
///
/// let die = discrete([1, 2, 3, 4, 5, 6]).unwrap();
/// assert_eq!(die.kind_name(), "discrete");
/// ```
pub fn discrete<I, V>(outcomes: I) -> Result<Dist>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let weighted = Weighted::uniform(outcomes.into_iter().map(Into::into).collect())?;
    Ok(Dist::from_kind(DistKind::Discrete(weighted)))
}

/// Weighted choice from `(weight, outcome)` pairs.
///
/// # Errors
/// Fails on empty input or invalid weights.
pub fn discrete_weighted<I, V>(pairs: I) -> Result<Dist>
where
    I: IntoIterator<Item = (f64, V)>,
    V: Into<Value>,
{
    let (weights, outcomes) = split_pairs(pairs);
    Ok(Dist::from_kind(DistKind::Discrete(Weighted::new(outcomes, weights)?)))
}

/// Weighted choice from an outcome → weight mapping, in iteration order.
///
/// # Errors
/// Fails on empty input or invalid weights.
pub fn discrete_map<I, V>(mapping: I) -> Result<Dist>
where
    I: IntoIterator<Item = (V, f64)>,
    V: Into<Value>,
{
    discrete_weighted(mapping.into_iter().map(|(outcome, weight)| (weight, outcome)))
}

fn split_pairs<I, V>(pairs: I) -> (Vec<f64>, Vec<Value>)
where
    I: IntoIterator<Item = (f64, V)>,
    V: Into<Value>,
{
    pairs
        .into_iter()
        .map(|(weight, outcome)| (weight, outcome.into()))
        .unzip()
}

/// Mixture of distributions or plain values.
///
/// Without weights every component is equally likely. With one weight fewer
/// than there are components, the last weight is inferred as `1 - sum`.
/// Weights need not be normalized otherwise.
///
/// # Errors
/// Fails when there are no components, the weight count does not fit, or the
/// weights are invalid.
///
/// # Example
/// ```rust
/// use dist_algebra::{mixture, norm_mean_sd};
///
/// let bimodal = mixture(
///     [norm_mean_sd(0.0, 1.0), norm_mean_sd(5.0, 1.0)],
///     Some(vec![0.7, 0.3]),
/// )
/// .unwrap();
/// assert_eq!(bimodal.kind_name(), "mixture");
/// ```
pub fn mixture<I, V>(components: I, weights: Option<Vec<f64>>) -> Result<Dist>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
{
    let components: Vec<Value> = components.into_iter().map(Into::into).collect();
    let weighted = match weights {
        None => Weighted::uniform(components)?,
        Some(mut weights) => {
            if !components.is_empty() && weights.len() + 1 == components.len() {
                let given: f64 = weights.iter().sum();
                if given > 1.0 {
                    return Err(DistError::invalid_weights(format!(
                        "cannot infer the last weight, given weights sum to {given}"
                    )));
                }
                weights.push(1.0 - given);
            }
            Weighted::new(components, weights)?
        }
    };
    Ok(Dist::from_kind(DistKind::Mixture(weighted)))
}

/// Mixture from `(weight, component)` pairs.
///
/// # Errors
/// Fails on empty input or invalid weights.
pub fn mixture_weighted<I, V>(pairs: I) -> Result<Dist>
where
    I: IntoIterator<Item = (f64, V)>,
    V: Into<Value>,
{
    let (weights, components) = split_pairs(pairs);
    Ok(Dist::from_kind(DistKind::Mixture(Weighted::new(components, weights)?)))
}

/// Mixture from an outcome-to-weight mapping.
///
/// # Errors
/// Fails on empty input or invalid weights.
pub fn mixture_map<I, V>(mapping: I) -> Result<Dist>
where
    I: IntoIterator<Item = (V, f64)>,
    V: Into<Value>,
{
    mixture_weighted(mapping.into_iter().map(|(outcome, weight)| (weight, outcome)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normal_params(d: &Dist) -> (f64, f64) {
        match d.kind() {
            DistKind::Normal { mean, sd } | DistKind::LogNormal { mean, sd } => (*mean, *sd),
            other => panic!("not a normal: {other:?}"),
        }
    }

    fn round2(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }

    #[test]
    fn test_norm_interval_converts_to_mean_sd() {
        let (mean, sd) = normal_params(&norm(1.0, 2.0).unwrap());
        assert!((round2(mean) - 1.5).abs() < f64::EPSILON);
        assert!((round2(sd) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_norm_with_credibility() {
        let (mean, sd) = normal_params(&norm_with_credibility(1.0, 2.0, 70.0).unwrap());
        assert!((round2(mean) - 1.5).abs() < f64::EPSILON);
        assert!((round2(sd) - 0.48).abs() < f64::EPSILON);
    }

    #[test]
    fn test_norm_with_just_sd_infers_zero_mean() {
        let (mean, sd) = normal_params(&norm_sd(2.0));
        assert!(mean.abs() < f64::EPSILON);
        assert!((sd - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lognorm_interval_on_log_scale() {
        let (mean, sd) = normal_params(&lognorm(1.0, 2.0).unwrap());
        assert!((round2(mean) - 0.35).abs() < f64::EPSILON);
        assert!((round2(sd) - 0.21).abs() < f64::EPSILON);

        let (_, sd70) = normal_params(&lognorm_with_credibility(1.0, 2.0, 70.0).unwrap());
        assert!((round2(sd70) - 0.33).abs() < f64::EPSILON);
    }

    #[test]
    fn test_lognorm_rejects_non_positive_low() {
        let err = lognorm(0.0, 2.0).unwrap_err();
        assert!(matches!(
            err,
            DistError::InvalidParameter {
                parameter: "low",
                ..
            }
        ));
    }

    #[test]
    fn test_interval_rejects_reversed_bounds() {
        assert!(matches!(
            tdist(10.0, 5.0, 3.0),
            Err(DistError::InvalidInterval { .. })
        ));
        assert!(matches!(
            log_tdist(10.0, 5.0, 3.0),
            Err(DistError::InvalidInterval { .. })
        ));
        assert!(matches!(
            norm(2.0, 1.0),
            Err(DistError::InvalidInterval { .. })
        ));
    }

    #[test]
    fn test_credibility_bounds() {
        assert!(credible_z(0.0).is_err());
        assert!(credible_z(100.0).is_err());
        assert!((credible_z(95.0).unwrap() - 1.959_964).abs() < 1e-5);
    }

    #[test]
    fn test_t_params_derived_at_construction() {
        let d = tdist_with_credibility(1.0, 3.0, 5.0, 90.0).unwrap();
        let DistKind::StudentT(params) = d.kind() else {
            panic!("expected t");
        };
        assert!((params.mean - 2.0).abs() < 1e-12);
        assert!((params.scale - 1.0 / credible_z(90.0).unwrap()).abs() < 1e-12);
        assert!((params.df - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_gamma_defaults_scale_to_one() {
        let g = gamma(10.0);
        let DistKind::Gamma { shape, scale } = g.kind() else {
            panic!("expected gamma");
        };
        assert!((shape - 10.0).abs() < f64::EPSILON);
        assert!((scale - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_clip_builders_do_not_mutate() {
        let base = norm_mean_sd(1.0, 2.0);
        let clipped = base.with_clip(1.0, 3.0);
        assert_eq!(base.lower_clip(), None);
        assert_eq!(base.upper_clip(), None);
        assert_eq!(clipped.lower_clip(), Some(1.0));
        assert_eq!(clipped.upper_clip(), Some(3.0));
        assert!(!base.ptr_eq(&clipped));
    }

    #[test]
    fn test_clamp_only_touches_numbers() {
        let d = norm_mean_sd(0.0, 1.0).with_upper_clip(3.0);
        assert_eq!(d.clamp(Value::Number(10.0)), Value::Number(3.0));
        assert_eq!(d.clamp(Value::from("a")), Value::from("a"));
    }

    #[test]
    fn test_discrete_formats_agree() {
        let list = discrete(["a", "b"]).unwrap();
        let pairs = discrete_weighted([(0.9, "a"), (0.1, "b")]).unwrap();
        let map = discrete_map([("a", 0.9), ("b", 0.1)]).unwrap();

        let DistKind::Discrete(w) = list.kind() else {
            panic!("expected discrete");
        };
        assert_eq!(w.weights(), &[0.5, 0.5]);

        for d in [pairs, map] {
            let DistKind::Discrete(w) = d.kind() else {
                panic!("expected discrete");
            };
            assert_eq!(w.outcomes(), &[Value::from("a"), Value::from("b")]);
            assert!((w.weights()[0] - 0.9).abs() < 1e-12);
        }
    }

    #[test]
    fn test_mixture_normalizes_weights() {
        let m = mixture([1, 2], Some(vec![2.0, 6.0])).unwrap();
        let DistKind::Mixture(w) = m.kind() else {
            panic!("expected mixture");
        };
        assert_eq!(w.weights(), &[0.25, 0.75]);
    }

    #[test]
    fn test_mixture_infers_last_weight() {
        let m = mixture([1, 2, 3], Some(vec![0.2, 0.3])).unwrap();
        let DistKind::Mixture(w) = m.kind() else {
            panic!("expected mixture");
        };
        assert!((w.weights()[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_mixture_validation() {
        assert_eq!(
            mixture(Vec::<Value>::new(), None).unwrap_err(),
            DistError::EmptyComponents
        );
        assert_eq!(
            mixture([1, 2, 3], Some(vec![0.5])).unwrap_err(),
            DistError::weight_mismatch(3, 1)
        );
        assert!(matches!(
            mixture([1, 2], Some(vec![-1.0, 2.0])),
            Err(DistError::InvalidWeights { .. })
        ));
        assert!(matches!(
            mixture([1, 2], Some(vec![0.0, 0.0])),
            Err(DistError::InvalidWeights { .. })
        ));
    }

    #[test]
    fn test_select_first_cumulative_above_draw() {
        let w = Weighted::new(
            vec![Value::from("a"), Value::from("b"), Value::from("c")],
            vec![0.2, 0.3, 0.5],
        )
        .unwrap();
        assert_eq!(w.select(0.0), &Value::from("a"));
        assert_eq!(w.select(0.2), &Value::from("b"));
        assert_eq!(w.select(0.49), &Value::from("b"));
        assert_eq!(w.select(0.5), &Value::from("c"));
        assert_eq!(w.select(1.0), &Value::from("c"));
    }

    #[test]
    fn test_select_never_returns_zero_weight_outcome() {
        let trailing =
            Weighted::new(vec![Value::from("a"), Value::from("zero")], vec![1.0, 0.0]).unwrap();
        assert_eq!(trailing.select(1.0), &Value::from("a"));
        assert_eq!(trailing.select(0.999_999), &Value::from("a"));

        let middle = Weighted::new(
            vec![Value::from("a"), Value::from("zero"), Value::from("c")],
            vec![0.5, 0.0, 0.5],
        )
        .unwrap();
        assert_eq!(middle.select(0.5), &Value::from("c"));
        assert_eq!(middle.select(1.0), &Value::from("c"));
    }

    #[test]
    fn test_mixture_formats_agree() {
        let pairs = mixture_weighted([(0.9, "a"), (0.1, "b")]).unwrap();
        let map = mixture_map([("a", 0.9), ("b", 0.1)]).unwrap();

        for m in [pairs, map] {
            let DistKind::Mixture(w) = m.kind() else {
                panic!("expected mixture");
            };
            assert_eq!(w.outcomes(), &[Value::from("a"), Value::from("b")]);
            assert!((w.weights()[0] - 0.9).abs() < 1e-12);
            assert_eq!(w.select(0.5), &Value::from("a"));
        }
    }
}
