use std::fmt;

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};

// RUST CONCEPT: Closed tagged union for the interpreter's numeric tower
// The host interpreter has a richer value hierarchy; this core only ever
// sees numbers after coercion, so the tower here is exactly two rungs:
// Integer: BigInt - exact, arbitrary precision
// Real:    f64    - inexact, double precision
// Mixing the two promotes to Real (precision is lost once a float appears).
#[derive(Debug, Clone)]
pub enum Number {
    Integer(BigInt),
    Real(f64),
}

impl Number {
    pub fn type_name(&self) -> &'static str {
        match self {
            Number::Integer(_) => "integer",
            Number::Real(_) => "real",
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_zero(),
            Number::Real(r) => *r == 0.0,
        }
    }

    pub fn is_negative(&self) -> bool {
        match self {
            Number::Integer(i) => i.is_negative(),
            Number::Real(r) => *r < 0.0,
        }
    }

    pub fn abs(&self) -> Number {
        match self {
            Number::Integer(i) => Number::Integer(i.abs()),
            Number::Real(r) => Number::Real(r.abs()),
        }
    }

    // Lossy view used wherever a branch has already committed to Real math
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Integer(i) => i.to_f64().unwrap_or(f64::INFINITY),
            Number::Real(r) => *r,
        }
    }

    /// The exact integer inside, if this is the `Integer` variant.
    pub fn as_integer(&self) -> Option<&BigInt> {
        match self {
            Number::Integer(i) => Some(i),
            Number::Real(_) => None,
        }
    }

    // RUST CONCEPT: Automatic numeric demotion for cleaner results
    // Operations whose contract produces an integer (truncating division,
    // digit extraction) can land on the Real rung with an exactly integral
    // value; demote folds that back to the Integer rung. Mirrors the
    // interpreter's habit of keeping values in their simplest form.
    pub fn demote(self) -> Number {
        match &self {
            Number::Real(r) if r.fract() == 0.0 && r.is_finite() => {
                match BigInt::from_f64(*r) {
                    Some(i) => Number::Integer(i),
                    None => self,
                }
            }
            _ => self,
        }
    }
}

impl From<i64> for Number {
    fn from(i: i64) -> Number {
        Number::Integer(BigInt::from(i))
    }
}

impl From<BigInt> for Number {
    fn from(i: BigInt) -> Number {
        Number::Integer(i)
    }
}

impl From<f64> for Number {
    fn from(r: f64) -> Number {
        Number::Real(r)
    }
}

// RUST CONCEPT: Promote two numbers to a common rung for arithmetic
// Integer op Integer stays exact; anything touching a Real becomes Real.
pub fn promote_pair(a: &Number, b: &Number) -> (Number, Number) {
    match (a, b) {
        (Number::Integer(_), Number::Integer(_)) => (a.clone(), b.clone()),
        _ => (Number::Real(a.to_f64()), Number::Real(b.to_f64())),
    }
}

impl std::ops::Add for &Number {
    type Output = Number;
    fn add(self, other: Self) -> Number {
        match promote_pair(self, other) {
            (Number::Integer(x), Number::Integer(y)) => Number::Integer(x + y),
            (x, y) => Number::Real(x.to_f64() + y.to_f64()),
        }
    }
}

impl std::ops::Sub for &Number {
    type Output = Number;
    fn sub(self, other: Self) -> Number {
        match promote_pair(self, other) {
            (Number::Integer(x), Number::Integer(y)) => Number::Integer(x - y),
            (x, y) => Number::Real(x.to_f64() - y.to_f64()),
        }
    }
}

impl std::ops::Mul for &Number {
    type Output = Number;
    fn mul(self, other: Self) -> Number {
        match promote_pair(self, other) {
            (Number::Integer(x), Number::Integer(y)) => Number::Integer(x * y),
            (x, y) => Number::Real(x.to_f64() * y.to_f64()),
        }
    }
}

impl std::ops::Neg for &Number {
    type Output = Number;
    fn neg(self) -> Number {
        match self {
            Number::Integer(i) => Number::Integer(-i),
            Number::Real(r) => Number::Real(-r),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        match (self, other) {
            (Number::Integer(x), Number::Integer(y)) => x == y,
            _ => self.to_f64() == other.to_f64(),
        }
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Number) -> Option<std::cmp::Ordering> {
        match (self, other) {
            (Number::Integer(x), Number::Integer(y)) => Some(x.cmp(y)),
            _ => self.to_f64().partial_cmp(&other.to_f64()),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Real(r) => write!(f, "{}", r),
        }
    }
}

// RUST CONCEPT: Recursive tree shape for nested host values
// The statistics visitors branch on "is this element itself a sequence";
// modelling that as a small recursive enum makes the nesting explicit and
// lets the compiler check every case, instead of ad hoc iterable sniffing.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Num(Number),
    Str(String),
    List(Vec<Value>),
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(n) => n.type_name(),
            Value::Str(_) => "string",
            Value::List(_) => "list",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", n),
            Value::Str(s) => write!(f, "\"{}\"", s),
            Value::List(elements) => {
                write!(f, "[")?;
                let mut iter = elements.iter();
                if let Some(first) = iter.next() {
                    write!(f, "{}", first)?;
                    for elem in iter {
                        write!(f, " {}", elem)?;
                    }
                }
                write!(f, "]")
            }
        }
    }
}

// RUST CONCEPT: Trait at the seam to the host's coercion layer
// The interpreter owns value coercion policy (what "abc" means as a number,
// what counts as iterable, structural equality). This core consumes that
// policy through a trait object rather than defining it.
pub trait Coercion {
    /// Coerce a host value to a number; `None` when the value has no
    /// numeric reading (the caller decides whether that is an error).
    fn to_number(&self, v: &Value) -> Option<Number>;

    /// Coerce a host value to an exact integer.
    fn to_integer(&self, v: &Value) -> Option<BigInt>;

    /// Whether the host treats this value as a sequence of elements.
    fn is_iterable(&self, v: &Value) -> bool;

    /// Structural equality (not identity) between two host values.
    fn equals(&self, a: &Value, b: &Value) -> bool;
}

#[derive(Debug)]
pub enum NumericError {
    DivisionByZero,
    ModuloByZero,
    UndefinedDomain(String),
    InvalidBase(i64),
    SymbolNotFound(String),
}

impl fmt::Display for NumericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumericError::DivisionByZero => write!(f, "Division by zero"),
            NumericError::ModuloByZero => write!(f, "Modulo by zero"),
            NumericError::UndefinedDomain(msg) => write!(f, "Domain error: {}", msg),
            NumericError::InvalidBase(b) => write!(f, "Invalid base: {}", b),
            NumericError::SymbolNotFound(sym) => {
                write!(f, "Symbol not found in alphabet: {}", sym)
            }
        }
    }
}

impl std::error::Error for NumericError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_promote_same_types() {
        let a = Number::Integer(BigInt::from(5));
        let b = Number::Integer(BigInt::from(3));
        let (pa, pb) = promote_pair(&a, &b);
        assert!(matches!(pa, Number::Integer(_)));
        assert!(matches!(pb, Number::Integer(_)));
    }

    #[test]
    fn test_promote_integer_to_real() {
        let a = Number::Integer(BigInt::from(5));
        let b = Number::Real(3.25);
        let (pa, pb) = promote_pair(&a, &b);
        assert!(matches!(pa, Number::Real(n) if n == 5.0));
        assert!(matches!(pb, Number::Real(n) if n == 3.25));
    }

    #[test]
    fn test_mixed_comparison() {
        let a = Number::Integer(BigInt::from(2));
        let b = Number::Real(2.0);
        assert_eq!(a, b);
        assert!(Number::Real(1.5) < Number::Integer(BigInt::from(2)));
    }

    #[test]
    fn test_demote_integral_real() {
        let d = Number::Real(4.0).demote();
        assert!(matches!(d, Number::Integer(ref i) if *i == BigInt::from(4)));
        let kept = Number::Real(4.5).demote();
        assert!(matches!(kept, Number::Real(n) if n == 4.5));
    }
}
