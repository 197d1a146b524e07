//! Function application and the library helpers built on it.

use super::arithmetic::pipe;
use crate::computation::{Composite, Transform, composite};
use crate::distributions::Dist;
use crate::error::{DistError, Result};
use crate::value::Value;

/// Defers `transforms` over `inputs` until sampling time.
///
/// The first transform receives every resolved input; each later transform
/// receives the single result of the one before it.
///
/// # Errors
/// Fails with [`DistError::EmptyComponents`] without inputs and
/// [`DistError::EmptyTransforms`] without transforms.
///
/// # Example
/// ```rust
/// use dist_algebra::{apply, norm_mean_sd, sample_f64, RngSource, Transform};
///
/// let spread = apply(
///     [norm_mean_sd(10.0, 0.0), norm_mean_sd(4.0, 0.0)],
///     [Transform::binary("spread", |a, b| a - b), Transform::unary("double", |x| x * 2.0)],
/// )
/// .unwrap();
/// let mut rng = RngSource::seeded(0);
/// assert!((sample_f64(&spread.into(), &mut rng).unwrap() - 12.0).abs() < 1e-9);
/// ```
pub fn apply<I, V, T>(inputs: I, transforms: T) -> Result<Dist>
where
    I: IntoIterator<Item = V>,
    V: Into<Value>,
    T: IntoIterator<Item = Transform>,
{
    let inputs: Vec<Value> = inputs.into_iter().map(Into::into).collect();
    if inputs.is_empty() {
        return Err(DistError::EmptyComponents);
    }
    let transforms: Vec<Transform> = transforms.into_iter().collect();
    if transforms.is_empty() {
        return Err(DistError::EmptyTransforms);
    }
    Ok(composite(Composite::Apply { inputs, transforms }))
}

/// Samples of `input` clamped to at least `bound`.
pub fn lclip(input: impl Into<Value>, bound: f64) -> Dist {
    pipe(input, Transform::lclip(bound))
}

/// Samples of `input` clamped to at most `bound`.
pub fn rclip(input: impl Into<Value>, bound: f64) -> Dist {
    pipe(input, Transform::rclip(bound))
}

/// Samples of `input` clamped into `[lower, upper]`.
pub fn clip(input: impl Into<Value>, lower: f64, upper: f64) -> Dist {
    pipe(input, Transform::clip(lower, upper))
}

/// Samples of `input` rounded to `digits` decimal places.
pub fn dist_round(input: impl Into<Value>, digits: i32) -> Dist {
    pipe(input, Transform::round(digits))
}

pub fn dist_ceil(input: impl Into<Value>) -> Dist {
    pipe(input, Transform::ceil())
}

pub fn dist_floor(input: impl Into<Value>) -> Dist {
    pipe(input, Transform::floor())
}

/// Larger of one sample from each input.
pub fn dist_max(a: impl Into<Value>, b: impl Into<Value>) -> Dist {
    composite(Composite::Apply {
        inputs: vec![a.into(), b.into()],
        transforms: vec![Transform::max()],
    })
}

/// Smaller of one sample from each input.
pub fn dist_min(a: impl Into<Value>, b: impl Into<Value>) -> Dist {
    composite(Composite::Apply {
        inputs: vec![a.into(), b.into()],
        transforms: vec![Transform::min()],
    })
}
