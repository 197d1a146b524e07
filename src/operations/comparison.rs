use crate::computation::{BinaryOperation, binary_node};
use crate::distributions::Dist;
use crate::value::Value;

/// Deferred comparisons.
///
/// Each method returns a new composite node that resolves to a boolean, so
/// comparisons compose with the rest of the algebra: a boolean counts as 0
/// or 1 in later arithmetic, and the mean of many resolutions estimates the
/// probability that the comparison holds.
pub trait Comparison<T> {
    /// Evidence that this value is greater than `other`
    #[must_use]
    fn gt(&self, other: T) -> Dist;

    /// Evidence that this value is less than `other`
    #[must_use]
    fn lt(&self, other: T) -> Dist;

    /// Evidence that this value is greater than or equal to `other`
    #[must_use]
    fn ge(&self, other: T) -> Dist;

    /// Evidence that this value is less than or equal to `other`
    #[must_use]
    fn le(&self, other: T) -> Dist;

    /// Evidence that this value equals `other`
    ///
    /// Exact equality is mostly useful for discrete outcomes.
    #[must_use]
    fn eq(&self, other: T) -> Dist;

    /// Evidence that this value differs from `other`
    #[must_use]
    fn ne(&self, other: T) -> Dist;
}

impl<T> Comparison<T> for Dist
where
    T: Into<Value>,
{
    /// # Example
    /// ```rust
    /// use dist_algebra::{norm_mean_sd, sample, RngSource, Value, operations::Comparison};
    ///
    /// let speed = norm_mean_sd(55.0, 5.0);
    /// let speeding = Comparison::gt(&speed, 60.0);
    /// let mut rng = RngSource::seeded(4);
    /// assert!(matches!(sample(&speeding.into(), &mut rng).unwrap(), Value::Bool(_)));
    /// ```
    fn gt(&self, other: T) -> Dist {
        binary_node(BinaryOperation::Gt, self, other)
    }

    fn lt(&self, other: T) -> Dist {
        binary_node(BinaryOperation::Lt, self, other)
    }

    fn ge(&self, other: T) -> Dist {
        binary_node(BinaryOperation::Ge, self, other)
    }

    fn le(&self, other: T) -> Dist {
        binary_node(BinaryOperation::Le, self, other)
    }

    fn eq(&self, other: T) -> Dist {
        binary_node(BinaryOperation::Eq, self, other)
    }

    fn ne(&self, other: T) -> Dist {
        binary_node(BinaryOperation::Ne, self, other)
    }
}
