use crate::distributions::Dist;
use crate::error::{DistError, Result};
use crate::random::RandomSource;
use std::fmt;
use std::sync::Arc;

type DeferredFn = dyn Fn(&mut dyn RandomSource) -> Result<Value> + Send + Sync;

/// Anything the sampler can be handed, and anything it can hand back.
///
/// Scalars (`Null`, `Bool`, `Number`, `Text`) are already resolved. A `Dist`
/// resolves by one layer per pass, a `Deferred` computation resolves fully.
/// `List` exists so that resolved collections can be carried around, but it
/// is not itself sampleable.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    List(Vec<Value>),
    Dist(Dist),
    Deferred(Deferred),
}

/// A zero-argument computation evaluated at sampling time.
///
/// The random source is threaded in explicitly so that scenario functions
/// draw from the same seeded stream as the rest of the resolution.
#[derive(Clone)]
pub struct Deferred {
    func: Arc<DeferredFn>,
}

impl Deferred {
    pub fn new<F>(func: F) -> Self
    where
        F: Fn(&mut dyn RandomSource) -> Result<Value> + Send + Sync + 'static,
    {
        Self {
            func: Arc::new(func),
        }
    }

    /// Runs the computation once. The returned value may still need resolving.
    pub fn call(&self, rng: &mut dyn RandomSource) -> Result<Value> {
        (self.func)(rng)
    }

    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Deferred(..)")
    }
}

impl Value {
    /// Wraps a computation so it can appear wherever a distribution may.
    ///
    /// # Example
    /// ```rust
    /// use dist_algebra::{Value, norm_mean_sd, sample_f64, RngSource};
    ///
    /// let scenario = Value::deferred(|rng| {
    ///     let a = sample_f64(&norm_mean_sd(10.0, 1.0).into(), rng)?;
    ///     Ok(Value::Number(a.max(0.0)))
    /// });
    /// let mut rng = RngSource::seeded(7);
    /// assert!(sample_f64(&scenario, &mut rng).unwrap() >= 0.0);
    /// ```
    pub fn deferred<F>(func: F) -> Self
    where
        F: Fn(&mut dyn RandomSource) -> Result<Value> + Send + Sync + 'static,
    {
        Value::Deferred(Deferred::new(func))
    }

    /// Short name of the variant, used in error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "none",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::Text(_) => "string",
            Value::List(_) => "list",
            Value::Dist(_) => "distribution",
            Value::Deferred(_) => "deferred computation",
        }
    }

    /// True for values the sampler returns unchanged.
    #[must_use]
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::Text(_)
        )
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn is_dist(&self) -> bool {
        matches!(self, Value::Dist(_))
    }

    /// Numeric view of the value. Booleans count as 0 and 1.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(x) => Some(*x),
            Value::Bool(b) => Some(f64::from(u8::from(*b))),
            _ => None,
        }
    }

    /// Like [`Value::as_f64`], but reports what was found instead.
    ///
    /// # Errors
    /// Returns [`DistError::NotNumeric`] for anything other than a number or boolean.
    pub fn try_f64(&self) -> Result<f64> {
        self.as_f64().ok_or(DistError::NotNumeric {
            found: self.type_name(),
        })
    }

    /// Truthiness: booleans as-is, numbers are true when non-zero.
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Number(x) => Some(*x != 0.0),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_dist(&self) -> Option<&Dist> {
        match self {
            Value::Dist(d) => Some(d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Structural equality for resolved values; distributions and deferred
    /// computations compare by identity.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::Text(a), Value::Text(b)) => a == b,
            (Value::List(a), Value::List(b)) => a == b,
            (Value::Dist(a), Value::Dist(b)) => a.ptr_eq(b),
            (Value::Deferred(a), Value::Deferred(b)) => a.ptr_eq(b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(b) => write!(f, "Bool({b})"),
            Value::Number(x) => write!(f, "Number({x})"),
            Value::Text(s) => write!(f, "Text({s:?})"),
            Value::List(items) => f.debug_tuple("List").field(items).finish(),
            Value::Dist(d) => write!(f, "Dist({d:?})"),
            Value::Deferred(d) => d.fmt(f),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("None"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(x) => write!(f, "{x}"),
            Value::Text(s) => f.write_str(s),
            Value::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Value::Dist(d) => write!(f, "<Distribution> {}", d.kind_name()),
            Value::Deferred(_) => f.write_str("<deferred>"),
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[allow(
                    clippy::cast_precision_loss,
                    clippy::cast_lossless,
                    clippy::unnecessary_cast
                )]
                fn from(x: $ty) -> Self {
                    Value::Number(x as f64)
                }
            }
        )*
    };
}

impl_from_number!(f64, f32, i32, i64, u32, u64, usize);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Value::Null
    }
}

impl From<Dist> for Value {
    fn from(d: Dist) -> Self {
        Value::Dist(d)
    }
}

impl From<&Dist> for Value {
    fn from(d: &Dist) -> Self {
        Value::Dist(d.clone())
    }
}

impl From<Deferred> for Value {
    fn from(d: Deferred) -> Self {
        Value::Deferred(d)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::List(items)
    }
}

impl<T> From<Option<T>> for Value
where
    T: Into<Value>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::norm_mean_sd;

    #[test]
    fn test_scalar_conversions() {
        assert_eq!(Value::from(4), Value::Number(4.0));
        assert_eq!(Value::from(3.5), Value::Number(3.5));
        assert_eq!(Value::from("a"), Value::Text("a".to_string()));
        assert_eq!(Value::from(()), Value::Null);
        assert_eq!(Value::from(None::<f64>), Value::Null);
        assert_eq!(Value::from(Some(2.0)), Value::Number(2.0));
    }

    #[test]
    #[allow(clippy::float_cmp)]
    fn test_bool_coerces_to_number() {
        assert_eq!(Value::Bool(true).as_f64(), Some(1.0));
        assert_eq!(Value::Bool(false).as_f64(), Some(0.0));
        assert_eq!(Value::Number(0.0).as_bool(), Some(false));
        assert_eq!(Value::Number(2.0).as_bool(), Some(true));
    }

    #[test]
    fn test_try_f64_reports_type() {
        let err = Value::from("a").try_f64().unwrap_err();
        assert_eq!(err, DistError::NotNumeric { found: "string" });
    }

    #[test]
    fn test_distributions_compare_by_identity() {
        let d = norm_mean_sd(0.0, 1.0);
        let same = Value::from(&d);
        let other = Value::from(norm_mean_sd(0.0, 1.0));
        assert_eq!(Value::from(&d), same);
        assert_ne!(same, other);
    }

    #[test]
    fn test_display() {
        let list = Value::List(vec![Value::Number(1.0), Value::from("b"), Value::Null]);
        assert_eq!(list.to_string(), "[1, b, None]");
        assert_eq!(
            Value::from(norm_mean_sd(0.0, 1.0)).to_string(),
            "<Distribution> normal"
        );
    }
}
