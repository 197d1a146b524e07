use crate::computation::{
    BinaryOperation, Composite, Transform, UnaryOperation, binary_node, composite, unary_node,
};
use crate::distributions::Dist;
use crate::value::Value;
use std::ops::{Add, Div, Mul, Neg, Shr, Sub};

/// Implements one `std::ops` trait for every operand pairing a user is
/// likely to write: node with node, node with `f64`, and `f64` with node,
/// by value and by reference.
macro_rules! impl_binary_op {
    ($trait:ident, $method:ident, $operation:expr) => {
        impl $trait for Dist {
            type Output = Dist;

            fn $method(self, rhs: Dist) -> Dist {
                binary_node($operation, self, rhs)
            }
        }

        impl $trait<&Dist> for Dist {
            type Output = Dist;

            fn $method(self, rhs: &Dist) -> Dist {
                binary_node($operation, self, rhs)
            }
        }

        impl $trait<Dist> for &Dist {
            type Output = Dist;

            fn $method(self, rhs: Dist) -> Dist {
                binary_node($operation, self, rhs)
            }
        }

        impl $trait<&Dist> for &Dist {
            type Output = Dist;

            fn $method(self, rhs: &Dist) -> Dist {
                binary_node($operation, self, rhs)
            }
        }

        impl $trait<f64> for Dist {
            type Output = Dist;

            fn $method(self, rhs: f64) -> Dist {
                binary_node($operation, self, rhs)
            }
        }

        impl $trait<f64> for &Dist {
            type Output = Dist;

            fn $method(self, rhs: f64) -> Dist {
                binary_node($operation, self, rhs)
            }
        }

        impl $trait<Dist> for f64 {
            type Output = Dist;

            fn $method(self, rhs: Dist) -> Dist {
                binary_node($operation, self, rhs)
            }
        }

        impl $trait<&Dist> for f64 {
            type Output = Dist;

            fn $method(self, rhs: &Dist) -> Dist {
                binary_node($operation, self, rhs)
            }
        }
    };
}

impl_binary_op!(Add, add, BinaryOperation::Add);
impl_binary_op!(Sub, sub, BinaryOperation::Sub);
impl_binary_op!(Mul, mul, BinaryOperation::Mul);
impl_binary_op!(Div, div, BinaryOperation::Div);

impl Neg for Dist {
    type Output = Dist;

    fn neg(self) -> Dist {
        unary_node(UnaryOperation::Neg, self)
    }
}

impl Neg for &Dist {
    type Output = Dist;

    fn neg(self) -> Dist {
        unary_node(UnaryOperation::Neg, self)
    }
}

impl Dist {
    /// Deferred exponentiation, `self ** exponent`.
    ///
    /// # Example
    /// ```rust
    /// use dist_algebra::{norm_mean_sd, sample_f64, RngSource};
    ///
    /// let squared = norm_mean_sd(3.0, 0.0).pow(2.0);
    /// let mut rng = RngSource::seeded(1);
    /// assert!((sample_f64(&squared.into(), &mut rng).unwrap() - 9.0).abs() < 1e-9);
    /// ```
    #[must_use]
    pub fn pow(&self, exponent: impl Into<Value>) -> Dist {
        binary_node(BinaryOperation::Pow, self, exponent)
    }
}

/// Deferred exponentiation with either side a node or a plain value.
pub fn pow(base: impl Into<Value>, exponent: impl Into<Value>) -> Dist {
    binary_node(BinaryOperation::Pow, base, exponent)
}

/// Pipe: `dist >> transform` defers `transform(sample)`.
///
/// Pipes chain left to right, so `d >> Transform::rclip(10.0) >>
/// Transform::round(0)` clips first and rounds second.
impl Shr<Transform> for Dist {
    type Output = Dist;

    fn shr(self, transform: Transform) -> Dist {
        pipe(self, transform)
    }
}

impl Shr<Transform> for &Dist {
    type Output = Dist;

    fn shr(self, transform: Transform) -> Dist {
        pipe(self, transform)
    }
}

pub(crate) fn pipe(input: impl Into<Value>, transform: Transform) -> Dist {
    composite(Composite::Apply {
        inputs: vec![input.into()],
        transforms: vec![transform],
    })
}
