//! Error types for the dist-algebra library.
//!
//! Every failure is reported synchronously to the caller. Nothing inside the
//! crate retries or downgrades an error; the caller decides whether to try
//! again with a larger sample count, a relaxed condition or a reloaded cache.

use thiserror::Error;

/// The main error type for the dist-algebra library.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DistError {
    /// A batch resolution or network run was asked for fewer than one sample.
    #[error("Invalid sample count {count}: n must be >= 1")]
    InvalidSampleCount {
        /// The rejected count
        count: usize,
    },

    /// The value handed to the sampler is not something that can be resolved.
    #[error("Cannot sample a {found}: input must be a distribution, a scalar or a deferred computation")]
    NotADistribution {
        /// Short description of the offending value
        found: &'static str,
    },

    /// An interval was specified with its bounds reversed.
    #[error("Invalid interval [{low}, {high}]: `high value` cannot be lower than `low value`")]
    InvalidInterval {
        /// Lower bound as given
        low: f64,
        /// Upper bound as given
        high: f64,
    },

    /// A credibility percentage outside the open interval (0, 100).
    #[error("Invalid credibility {value}: must be in range (0, 100)")]
    InvalidCredibility {
        /// The rejected percentage
        value: f64,
    },

    /// Error when an invalid parameter value is provided.
    #[error("Invalid parameter '{parameter}': value {value} {constraint}")]
    InvalidParameter {
        /// The name of the parameter
        parameter: &'static str,
        /// The invalid value
        value: f64,
        /// A description of the constraint that was violated
        constraint: &'static str,
    },

    /// Error when an empty collection is provided where at least one element is required.
    #[error("Empty components: at least one component is required")]
    EmptyComponents,

    /// Error when the number of weights doesn't match the number of components.
    #[error("Weight count mismatch: expected {expected} components, got {actual} weights")]
    WeightCountMismatch {
        /// The expected number of weights
        expected: usize,
        /// The actual number of weights provided
        actual: usize,
    },

    /// Error when weights are invalid (negative, non-finite or all zero).
    #[error("Invalid weights: {reason}")]
    InvalidWeights {
        /// The reason the weights are invalid
        reason: String,
    },

    /// `apply` was called without any function to apply.
    #[error("Empty transforms: at least one function is required")]
    EmptyTransforms,

    /// Rejection sampling discarded every generated record.
    #[error("Insufficient samples for condition: {generated} generated, none accepted")]
    InsufficientSamples {
        /// Size of the population before conditioning
        generated: usize,
    },

    /// A cached population is smaller than the requested sample count.
    #[error("{cached} results cached but requested {requested}")]
    CacheShortfall {
        /// Records held by the cache entry
        cached: usize,
        /// Records requested by the caller
        requested: usize,
    },

    /// Conjugate update between two distributions of an unsupported kind.
    #[error("Type `{kind}` not supported for conjugate update")]
    UnsupportedUpdate {
        /// Kind of both distributions
        kind: &'static str,
    },

    /// Conjugate update between two distributions of different kinds.
    #[error("Can only update distributions of the same type: got `{prior}` and `{evidence}`")]
    MismatchedUpdate {
        /// Kind of the prior
        prior: &'static str,
        /// Kind of the evidence
        evidence: &'static str,
    },

    /// An operator was applied to resolved values it does not support.
    #[error("Unsupported operand types for {operation}: {left} and {right}")]
    UnsupportedOperand {
        /// Operator name
        operation: &'static str,
        /// Left operand description
        left: &'static str,
        /// Right operand description
        right: &'static str,
    },

    /// A numeric value was required but something else was resolved.
    #[error("Expected a number, got {found}")]
    NotNumeric {
        /// Short description of what was found instead
        found: &'static str,
    },

    /// The random source rejected the parameters of a family.
    #[error("Sampling from {family} failed: {reason}")]
    Sampling {
        /// Family that was being sampled
        family: &'static str,
        /// Message reported by the random source
        reason: String,
    },

    /// A transform applied at sampling time failed.
    #[error("Transform '{name}' failed: {reason}")]
    Transform {
        /// Name of the transform
        name: String,
        /// Why it failed
        reason: String,
    },
}

/// A specialized `Result` type for distribution operations.
pub type Result<T> = std::result::Result<T, DistError>;

impl DistError {
    /// Create an error for a sample count below one.
    ///
    /// # Example
    /// ```
    /// use dist_algebra::error::DistError;
    ///
    /// let error = DistError::invalid_sample_count(0);
    /// assert!(error.to_string().contains("n must be >= 1"));
    /// ```
    pub fn invalid_sample_count(count: usize) -> Self {
        Self::InvalidSampleCount { count }
    }

    /// Create an error for invalid parameter with constraint.
    pub fn invalid_parameter(
        parameter: &'static str,
        value: f64,
        constraint: &'static str,
    ) -> Self {
        Self::InvalidParameter {
            parameter,
            value,
            constraint,
        }
    }

    /// Create an error for weight count mismatch.
    pub fn weight_mismatch(expected: usize, actual: usize) -> Self {
        Self::WeightCountMismatch { expected, actual }
    }

    /// Create an error for invalid weights.
    pub fn invalid_weights(reason: impl Into<String>) -> Self {
        Self::InvalidWeights {
            reason: reason.into(),
        }
    }

    /// Wrap a parameter error reported by the random source.
    pub fn sampling(family: &'static str, reason: impl ToString) -> Self {
        Self::Sampling {
            family,
            reason: reason.to_string(),
        }
    }

    /// Create an error raised from inside a transform.
    ///
    /// # Example
    /// ```
    /// use dist_algebra::error::DistError;
    ///
    /// let error = DistError::transform("mirror", "expected one input");
    /// assert_eq!(error.to_string(), "Transform 'mirror' failed: expected one input");
    /// ```
    pub fn transform(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Transform {
            name: name.into(),
            reason: reason.into(),
        }
    }
}
