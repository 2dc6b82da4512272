// Generalized arithmetic rules shared by every numeric command.
//
// The interpreter's mod/pow/div words all funnel through here, so the sign
// and promotion rules in this module are the single source of truth for
// "what does -7 mod 2 mean" across the whole language.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, Pow, Signed, ToPrimitive, Zero};

use crate::value::{promote_pair, Number, NumericError};

// RUST CONCEPT: Floored modulo with tag dispatch
// The result carries the divisor's sign (or is zero). Rules in decreasing
// precedence, matching the interpreter's documented semantics:
//   1. both negative          -> -mod(|a|, |b|)
//   2. divisor is Real        -> normalize through mod(a/b, 1) * b; on a
//                                sign mismatch, flip through the positive
//                                case and correct with |b| - m
//   3. dividend Real, int b   -> floor-split the dividend, integer modulo
//                                on the floor part, add back the fraction
//   4. both Integer           -> remainder corrected to the divisor's sign
pub fn modulo(a: &Number, b: &Number) -> Result<Number, NumericError> {
    if b.is_zero() {
        return Err(NumericError::ModuloByZero);
    }
    if a.is_negative() && b.is_negative() {
        let m = modulo(&a.abs(), &b.abs())?;
        return Ok(-&m);
    }
    match (a, b) {
        (_, Number::Real(divisor)) => {
            if a.is_negative() != b.is_negative() && !a.is_zero() {
                let m = modulo(&a.abs(), &b.abs())?;
                if m.is_zero() {
                    Ok(Number::Real(0.0))
                } else {
                    let r = divisor.abs() - m.to_f64();
                    Ok(Number::Real(if *divisor < 0.0 { -r } else { r }))
                }
            } else {
                let q = a.to_f64() / divisor;
                let wrapped = q - q.floor();
                Ok(Number::Real(wrapped * divisor))
            }
        }
        (Number::Real(dividend), Number::Integer(_)) => {
            let floor_part = dividend.floor();
            let fraction = dividend - floor_part;
            let whole = BigInt::from_f64(floor_part).ok_or_else(|| {
                NumericError::UndefinedDomain(format!("non-finite dividend: {}", dividend))
            })?;
            let m = modulo(&Number::Integer(whole), b)?;
            Ok(Number::Real(m.to_f64() + fraction))
        }
        (Number::Integer(x), Number::Integer(y)) => {
            let mut r = x % y;
            if !r.is_zero() && (r.is_negative() != y.is_negative()) {
                r += y;
            }
            Ok(Number::Integer(r))
        }
    }
}

// RUST CONCEPT: Exact integer exponentiation, transcendental fallback
// A non-negative integer exponent on an integer base multiplies out exactly
// in BigInt - no rounding, 2^10 is the integer 1024. Everything else goes
// through f64 powf. Negative exponents reciprocate: 1 / pow(base, -exp).
pub fn power(base: &Number, exponent: &Number) -> Result<Number, NumericError> {
    if exponent.is_negative() {
        if base.is_zero() {
            return Err(NumericError::DivisionByZero);
        }
        let p = power(base, &-exponent)?;
        return Ok(Number::Real(1.0 / p.to_f64()));
    }
    match (base, exponent) {
        (Number::Integer(b), Number::Integer(e)) => {
            let e = e.to_u64().ok_or_else(|| {
                NumericError::UndefinedDomain(format!("exponent too large: {}", e))
            })?;
            Ok(Number::Integer(Pow::pow(b, e)))
        }
        _ => Ok(Number::Real(base.to_f64().powf(exponent.to_f64()))),
    }
}

// RUST CONCEPT: Integer division consistent with `modulo`
// On the exact path this is floor division, so a = b * div(a,b) + mod(a,b)
// holds for every sign combination. With a Real operand the real quotient
// is truncated toward zero and demoted back to Integer when it fits.
pub fn int_divide(a: &Number, b: &Number) -> Result<Number, NumericError> {
    if b.is_zero() {
        return Err(NumericError::DivisionByZero);
    }
    match (a, b) {
        (Number::Integer(x), Number::Integer(y)) => {
            let quotient = x / y;
            let remainder = x % y;
            // Rust's / truncates; adjust to floor when signs differ
            if !remainder.is_zero() && (remainder.is_negative() != y.is_negative()) {
                Ok(Number::Integer(quotient - 1))
            } else {
                Ok(Number::Integer(quotient))
            }
        }
        _ => {
            let q = (a.to_f64() / b.to_f64()).trunc();
            Ok(Number::Real(q).demote())
        }
    }
}

// RUST CONCEPT: Two gcd algorithms behind one entry point
// Integer operands use the classic Euclidean remainder loop. If either
// operand is Real the remainder trick is meaningless, so this falls back
// to subtractive Euclid - intentionally linear, which is what lets it
// handle non-integral magnitudes like gcd(4.5, 3.0) = 1.5.
pub fn gcd(a: &Number, b: &Number) -> Number {
    if a.is_negative() || b.is_negative() {
        return gcd(&a.abs(), &b.abs());
    }
    match promote_pair(a, b) {
        (Number::Integer(mut x), Number::Integer(mut y)) => {
            while !y.is_zero() {
                let r = &x % &y;
                x = y;
                y = r;
            }
            Number::Integer(x)
        }
        (x, y) => {
            let mut x = x.to_f64();
            let mut y = y.to_f64();
            if x == 0.0 {
                return Number::Real(y);
            }
            if y == 0.0 {
                return Number::Real(x);
            }
            while x != y {
                if x > y {
                    x -= y;
                } else {
                    y -= x;
                }
            }
            Number::Real(x)
        }
    }
}

pub fn lcm(a: &Number, b: &Number) -> Result<Number, NumericError> {
    if a.is_zero() || b.is_zero() {
        return Ok(Number::from(0));
    }
    let g = gcd(a, b);
    let product = (a * b).abs();
    int_divide(&product, &g)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(i: i64) -> Number {
        Number::from(i)
    }

    #[test]
    fn test_modulo_sign_follows_divisor() {
        // positive/positive: ordinary remainder
        assert_eq!(modulo(&int(13), &int(5)).unwrap(), int(3));
        // negative dividend: b - mod(a, b)
        assert_eq!(modulo(&int(-13), &int(5)).unwrap(), int(2));
        // negative divisor
        assert_eq!(modulo(&int(13), &int(-5)).unwrap(), int(-2));
        // both negative: -mod(|a|, |b|)
        assert_eq!(modulo(&int(-13), &int(-5)).unwrap(), int(-3));
        // exact multiple stays zero in every quadrant
        assert_eq!(modulo(&int(-10), &int(5)).unwrap(), int(0));
    }

    #[test]
    fn test_modulo_real_divisor() {
        let m = modulo(&Number::Real(5.5), &Number::Real(2.0)).unwrap();
        assert!(matches!(m, Number::Real(r) if (r - 1.5).abs() < 1e-12));
        // sign mismatch flips through the positive case
        let m = modulo(&Number::Real(-5.5), &Number::Real(2.0)).unwrap();
        assert!(matches!(m, Number::Real(r) if (r - 0.5).abs() < 1e-12));
        let m = modulo(&Number::Real(5.5), &Number::Real(-2.0)).unwrap();
        assert!(matches!(m, Number::Real(r) if (r + 0.5).abs() < 1e-12));
    }

    #[test]
    fn test_modulo_real_dividend_integer_divisor() {
        let m = modulo(&Number::Real(7.25), &int(3)).unwrap();
        assert!(matches!(m, Number::Real(r) if (r - 1.25).abs() < 1e-12));
        // floor split keeps the fractional remainder non-negative
        let m = modulo(&Number::Real(-2.5), &int(2)).unwrap();
        assert!(matches!(m, Number::Real(r) if (r - 1.5).abs() < 1e-12));
    }

    #[test]
    fn test_modulo_by_zero() {
        assert!(matches!(
            modulo(&int(1), &int(0)),
            Err(NumericError::ModuloByZero)
        ));
    }

    #[test]
    fn test_power_exact_and_reciprocal() {
        assert_eq!(power(&int(2), &int(10)).unwrap(), int(1024));
        let p = power(&int(2), &int(-3)).unwrap();
        assert!(matches!(p, Number::Real(r) if r == 0.125));
        let p = power(&Number::Real(2.0), &Number::Real(0.5)).unwrap();
        assert!(matches!(p, Number::Real(r) if (r - 2f64.sqrt()).abs() < 1e-12));
    }

    #[test]
    fn test_power_no_float_drift() {
        // 3^40 overflows f64's exact integer range; BigInt keeps it exact
        let p = power(&int(3), &int(40)).unwrap();
        assert_eq!(
            p,
            Number::Integer("12157665459056928801".parse().unwrap())
        );
    }

    #[test]
    fn test_power_zero_to_negative() {
        assert!(matches!(
            power(&int(0), &int(-2)),
            Err(NumericError::DivisionByZero)
        ));
    }

    #[test]
    fn test_int_divide_matches_modulo() {
        for (a, b) in [(13, 5), (-13, 5), (13, -5), (-13, -5)] {
            let (a, b) = (int(a), int(b));
            let q = int_divide(&a, &b).unwrap();
            let r = modulo(&a, &b).unwrap();
            assert_eq!(&(&b * &q) + &r, a);
        }
    }

    #[test]
    fn test_int_divide_real_truncates() {
        let q = int_divide(&Number::Real(-7.0), &int(2)).unwrap();
        // truncation toward zero, then demotion back to Integer
        assert_eq!(q, int(-3));
    }

    #[test]
    fn test_gcd_lcm() {
        assert_eq!(gcd(&int(12), &int(18)), int(6));
        assert_eq!(gcd(&int(-12), &int(18)), int(6));
        assert_eq!(gcd(&int(7), &int(0)), int(7));
        assert_eq!(lcm(&int(4), &int(6)).unwrap(), int(12));
        assert_eq!(lcm(&int(0), &int(5)).unwrap(), int(0));
    }

    #[test]
    fn test_gcd_subtractive_real() {
        let g = gcd(&Number::Real(4.5), &Number::Real(3.0));
        assert!(matches!(g, Number::Real(r) if r == 1.5));
    }
}
