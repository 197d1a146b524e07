use crate::distributions::{Dist, DistKind};
use crate::error::{DistError, Result};
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Deferred operation captured by a composite node.
///
/// Children are held by value (cheap, nodes are shared) and are only resolved
/// when the composite itself is sampled. Every child is followed through to a
/// concrete value before the operation is applied.
#[derive(Clone, Debug)]
pub enum Composite {
    Unary {
        operation: UnaryOperation,
        operand: Value,
    },
    Binary {
        operation: BinaryOperation,
        left: Value,
        right: Value,
    },
    /// Function application. The first transform receives every resolved
    /// input; each later transform receives the previous result.
    Apply {
        inputs: Vec<Value>,
        transforms: Vec<Transform>,
    },
}

impl Composite {
    /// Sub-expressions in evaluation order.
    #[must_use]
    pub fn children(&self) -> Vec<&Value> {
        match self {
            Composite::Unary { operand, .. } => vec![operand],
            Composite::Binary { left, right, .. } => vec![left, right],
            Composite::Apply { inputs, .. } => inputs.iter().collect(),
        }
    }

    /// Operator tag, e.g. `add` or `apply`.
    #[must_use]
    pub fn operator_name(&self) -> &'static str {
        match self {
            Composite::Unary { operation, .. } => operation.name(),
            Composite::Binary { operation, .. } => operation.name(),
            Composite::Apply { .. } => "apply",
        }
    }

    /// Applies the operation to children that have already been resolved.
    ///
    /// `resolved` must line up with [`Composite::children`].
    pub(crate) fn combine(&self, resolved: Vec<Value>) -> Result<Value> {
        match self {
            Composite::Unary { operation, .. } => {
                let operand = resolved.into_iter().next().unwrap_or(Value::Null);
                operation.apply(&operand)
            }
            Composite::Binary { operation, .. } => {
                let mut iter = resolved.into_iter();
                let left = iter.next().unwrap_or(Value::Null);
                let right = iter.next().unwrap_or(Value::Null);
                operation.apply(&left, &right)
            }
            Composite::Apply { transforms, .. } => {
                let mut transforms = transforms.iter();
                let first = transforms.next().ok_or(DistError::EmptyTransforms)?;
                let mut current = first.call(&resolved)?;
                for transform in transforms {
                    current = transform.call(std::slice::from_ref(&current))?;
                }
                Ok(current)
            }
        }
    }
}

pub(crate) fn composite(node: Composite) -> Dist {
    Dist::from_kind(DistKind::Composite(node))
}

pub(crate) fn binary_node(
    operation: BinaryOperation,
    left: impl Into<Value>,
    right: impl Into<Value>,
) -> Dist {
    composite(Composite::Binary {
        operation,
        left: left.into(),
        right: right.into(),
    })
}

pub(crate) fn unary_node(operation: UnaryOperation, operand: impl Into<Value>) -> Dist {
    composite(Composite::Unary {
        operation,
        operand: operand.into(),
    })
}

/// Binary operators a composite node can defer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOperation {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl BinaryOperation {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            BinaryOperation::Add => "add",
            BinaryOperation::Sub => "subtract",
            BinaryOperation::Mul => "multiply",
            BinaryOperation::Div => "divide",
            BinaryOperation::Pow => "power",
            BinaryOperation::Eq => "eq",
            BinaryOperation::Ne => "ne",
            BinaryOperation::Lt => "lt",
            BinaryOperation::Le => "le",
            BinaryOperation::Gt => "gt",
            BinaryOperation::Ge => "ge",
        }
    }

    /// Applies the operator to two resolved values.
    ///
    /// Arithmetic works on numbers (booleans count as 0/1); `add` also
    /// concatenates strings. Ordering compares numbers or strings, equality
    /// compares anything.
    ///
    /// # Errors
    /// Returns [`DistError::UnsupportedOperand`] for operand types the
    /// operator does not accept.
    pub fn apply(self, left: &Value, right: &Value) -> Result<Value> {
        let unsupported = || DistError::UnsupportedOperand {
            operation: self.name(),
            left: left.type_name(),
            right: right.type_name(),
        };

        match self {
            BinaryOperation::Eq => return Ok(Value::Bool(loose_eq(left, right))),
            BinaryOperation::Ne => return Ok(Value::Bool(!loose_eq(left, right))),
            BinaryOperation::Add => {
                if let (Value::Text(a), Value::Text(b)) = (left, right) {
                    return Ok(Value::Text(format!("{a}{b}")));
                }
            }
            BinaryOperation::Lt
            | BinaryOperation::Le
            | BinaryOperation::Gt
            | BinaryOperation::Ge => {
                let ordering = match (left, right) {
                    (Value::Text(a), Value::Text(b)) => a.partial_cmp(b),
                    _ => {
                        let (a, b) = left
                            .as_f64()
                            .zip(right.as_f64())
                            .ok_or_else(unsupported)?;
                        a.partial_cmp(&b)
                    }
                };
                let holds = ordering.is_some_and(|ord| match self {
                    BinaryOperation::Lt => ord.is_lt(),
                    BinaryOperation::Le => ord.is_le(),
                    BinaryOperation::Gt => ord.is_gt(),
                    _ => ord.is_ge(),
                });
                return Ok(Value::Bool(holds));
            }
            _ => {}
        }

        let (a, b) = left
            .as_f64()
            .zip(right.as_f64())
            .ok_or_else(unsupported)?;
        let result = match self {
            BinaryOperation::Add => a + b,
            BinaryOperation::Sub => a - b,
            BinaryOperation::Mul => a * b,
            BinaryOperation::Div => a / b,
            BinaryOperation::Pow => a.powf(b),
            BinaryOperation::Eq
            | BinaryOperation::Ne
            | BinaryOperation::Lt
            | BinaryOperation::Le
            | BinaryOperation::Gt
            | BinaryOperation::Ge => return Err(unsupported()),
        };
        Ok(Value::Number(result))
    }
}

/// Equality with numeric coercion, so `true == 1`.
fn loose_eq(left: &Value, right: &Value) -> bool {
    match (left.as_f64(), right.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => left == right,
    }
}

/// Unary operators a composite node can defer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOperation {
    Neg,
}

impl UnaryOperation {
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            UnaryOperation::Neg => "negate",
        }
    }

    /// # Errors
    /// Fails when the operand is not numeric.
    pub fn apply(self, operand: &Value) -> Result<Value> {
        match self {
            UnaryOperation::Neg => {
                let x = operand.as_f64().ok_or(DistError::UnsupportedOperand {
                    operation: self.name(),
                    left: operand.type_name(),
                    right: "nothing",
                })?;
                Ok(Value::Number(-x))
            }
        }
    }
}

type TransformFn = dyn Fn(&[Value]) -> Result<Value> + Send + Sync;

/// A named function applied to resolved values at sampling time.
///
/// Transforms are what `apply` and the pipe operator (`>>`) defer. The
/// library ones (clipping, rounding, min/max) are ordinary transforms too.
///
/// # Example
/// ```rust
/// use dist_algebra::{Transform, Value};
///
/// let mirror = Transform::unary("mirror", |x| if x > 0.5 { 1.0 - x } else { x });
/// assert_eq!(mirror.call(&[Value::Number(10.0)]).unwrap(), Value::Number(-9.0));
/// ```
#[derive(Clone)]
pub struct Transform {
    name: Arc<str>,
    func: Arc<TransformFn>,
}

impl Transform {
    /// A transform over arbitrary resolved values.
    pub fn new<F>(name: impl AsRef<str>, func: F) -> Self
    where
        F: Fn(&[Value]) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name.as_ref()),
            func: Arc::new(func),
        }
    }

    /// A transform of exactly one numeric input.
    pub fn unary<F>(name: impl AsRef<str>, func: F) -> Self
    where
        F: Fn(f64) -> f64 + Send + Sync + 'static,
    {
        let owned: Arc<str> = Arc::from(name.as_ref());
        let label = Arc::clone(&owned);
        Self {
            name: owned,
            func: Arc::new(move |inputs: &[Value]| {
                let [x] = numeric_inputs::<1>(&label, inputs)?;
                Ok(Value::Number(func(x)))
            }),
        }
    }

    /// A transform of exactly two numeric inputs.
    pub fn binary<F>(name: impl AsRef<str>, func: F) -> Self
    where
        F: Fn(f64, f64) -> f64 + Send + Sync + 'static,
    {
        let owned: Arc<str> = Arc::from(name.as_ref());
        let label = Arc::clone(&owned);
        Self {
            name: owned,
            func: Arc::new(move |inputs: &[Value]| {
                let [x, y] = numeric_inputs::<2>(&label, inputs)?;
                Ok(Value::Number(func(x, y)))
            }),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invokes the transform on resolved inputs.
    ///
    /// # Errors
    /// Propagates whatever the function reports.
    pub fn call(&self, inputs: &[Value]) -> Result<Value> {
        (self.func)(inputs)
    }

    /// Clamps from below: `max(x, bound)`.
    #[must_use]
    pub fn lclip(bound: f64) -> Self {
        Self::unary("lclip", move |x| x.max(bound))
    }

    /// Clamps from above: `min(x, bound)`.
    #[must_use]
    pub fn rclip(bound: f64) -> Self {
        Self::unary("rclip", move |x| x.min(bound))
    }

    /// Clamps into `[lower, upper]`.
    #[must_use]
    pub fn clip(lower: f64, upper: f64) -> Self {
        Self::unary("clip", move |x| x.max(lower).min(upper))
    }

    /// Rounds to `digits` decimal places, ties to even.
    #[must_use]
    pub fn round(digits: i32) -> Self {
        let factor = 10f64.powi(digits);
        Self::unary("round", move |x| (x * factor).round_ties_even() / factor)
    }

    #[must_use]
    pub fn ceil() -> Self {
        Self::unary("ceil", f64::ceil)
    }

    #[must_use]
    pub fn floor() -> Self {
        Self::unary("floor", f64::floor)
    }

    /// Larger of two inputs.
    #[must_use]
    pub fn max() -> Self {
        Self::binary("max", f64::max)
    }

    /// Smaller of two inputs.
    #[must_use]
    pub fn min() -> Self {
        Self::binary("min", f64::min)
    }
}

fn numeric_inputs<const N: usize>(name: &str, inputs: &[Value]) -> Result<[f64; N]> {
    if inputs.len() != N {
        return Err(DistError::transform(
            name,
            format!("expected {N} input(s), got {}", inputs.len()),
        ));
    }
    let mut out = [0.0; N];
    for (slot, value) in out.iter_mut().zip(inputs) {
        *slot = value.try_f64()?;
    }
    Ok(out)
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Transform({})", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_on_numbers() {
        let a = Value::Number(6.0);
        let b = Value::Number(3.0);
        assert_eq!(BinaryOperation::Add.apply(&a, &b).unwrap(), Value::Number(9.0));
        assert_eq!(BinaryOperation::Sub.apply(&a, &b).unwrap(), Value::Number(3.0));
        assert_eq!(BinaryOperation::Mul.apply(&a, &b).unwrap(), Value::Number(18.0));
        assert_eq!(BinaryOperation::Div.apply(&a, &b).unwrap(), Value::Number(2.0));
        assert_eq!(BinaryOperation::Pow.apply(&b, &b).unwrap(), Value::Number(27.0));
    }

    #[test]
    fn test_booleans_coerce_in_arithmetic() {
        let t = Value::Bool(true);
        assert_eq!(
            BinaryOperation::Add.apply(&t, &Value::Number(1.0)).unwrap(),
            Value::Number(2.0)
        );
        assert_eq!(
            BinaryOperation::Eq.apply(&t, &Value::Number(1.0)).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_string_concat_and_compare() {
        let a = Value::from("a");
        let b = Value::from("b");
        assert_eq!(BinaryOperation::Add.apply(&a, &b).unwrap(), Value::from("ab"));
        assert_eq!(BinaryOperation::Lt.apply(&a, &b).unwrap(), Value::Bool(true));
        assert_eq!(BinaryOperation::Eq.apply(&a, &a).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_unsupported_operands() {
        let err = BinaryOperation::Mul
            .apply(&Value::from("a"), &Value::Number(2.0))
            .unwrap_err();
        assert_eq!(
            err,
            DistError::UnsupportedOperand {
                operation: "multiply",
                left: "string",
                right: "number",
            }
        );
        assert!(UnaryOperation::Neg.apply(&Value::Null).is_err());
    }

    #[test]
    fn test_comparisons() {
        let one = Value::Number(1.0);
        let two = Value::Number(2.0);
        assert_eq!(BinaryOperation::Gt.apply(&two, &one).unwrap(), Value::Bool(true));
        assert_eq!(BinaryOperation::Ge.apply(&one, &one).unwrap(), Value::Bool(true));
        assert_eq!(BinaryOperation::Le.apply(&two, &one).unwrap(), Value::Bool(false));
        assert_eq!(BinaryOperation::Ne.apply(&two, &one).unwrap(), Value::Bool(true));
    }

    #[test]
    fn test_apply_chain_feeds_previous_result() {
        let node = Composite::Apply {
            inputs: vec![Value::Null],
            transforms: vec![Transform::rclip(10.0), Transform::round(0)],
        };
        assert_eq!(
            node.combine(vec![Value::Number(1.6)]).unwrap(),
            Value::Number(2.0)
        );
    }

    #[test]
    fn test_round_digits() {
        let round2 = Transform::round(2);
        assert_eq!(
            round2.call(&[Value::Number(3.1415)]).unwrap(),
            Value::Number(3.14)
        );
        assert_eq!(
            Transform::round(0).call(&[Value::Number(2.5)]).unwrap(),
            Value::Number(2.0)
        );
    }

    #[test]
    fn test_transform_arity_is_checked() {
        let err = Transform::max().call(&[Value::Number(1.0)]).unwrap_err();
        assert_eq!(
            err,
            DistError::transform("max", "expected 2 input(s), got 1")
        );
    }

    #[test]
    fn test_operator_names() {
        let node = Composite::Binary {
            operation: BinaryOperation::Pow,
            left: Value::Number(2.0),
            right: Value::Number(3.0),
        };
        assert_eq!(node.operator_name(), "power");
        assert_eq!(node.children().len(), 2);
    }
}
