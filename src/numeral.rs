// Positional numeral codec: fixed-base against the canonical code page,
// arbitrary (including negative) bases as digit-value lists, and
// caller-supplied alphabets resolved through the host's structural equality.

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};

use crate::codepage::{char_digit, digit_char, CODE_PAGE_LEN};
use crate::value::{Coercion, NumericError, Value};

fn check_fixed_base(base: i64) -> Result<BigInt, NumericError> {
    if base < 2 || base as usize > CODE_PAGE_LEN {
        return Err(NumericError::InvalidBase(base));
    }
    Ok(BigInt::from(base))
}

// RUST CONCEPT: Fixed-base encoding through the canonical alphabet
// Digits come out most-significant first and are mapped through the code
// page; a negative value encodes as '-' followed by its absolute value.
pub fn to_base(value: &BigInt, base: i64) -> Result<String, NumericError> {
    let big_base = check_fixed_base(base)?;
    if value.is_negative() {
        let rest = to_base(&value.abs(), base)?;
        return Ok(format!("-{}", rest));
    }
    let mut digits = Vec::new();
    let mut v = value.clone();
    loop {
        let d = (&v % &big_base)
            .to_usize()
            .ok_or(NumericError::InvalidBase(base))?;
        digits.push(digit_char(d).ok_or(NumericError::InvalidBase(base))?);
        v /= &big_base;
        if v.is_zero() {
            break;
        }
    }
    digits.reverse();
    Ok(digits.into_iter().collect())
}

/// Inverse of `to_base`: map each symbol back through the code page and
/// evaluate positionally.
pub fn from_base(text: &str, base: i64) -> Result<BigInt, NumericError> {
    let big_base = check_fixed_base(base)?;
    let (negative, body) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let mut acc = BigInt::zero();
    for c in body.chars() {
        let d = char_digit(c).ok_or_else(|| NumericError::SymbolNotFound(c.to_string()))?;
        acc = acc * &big_base + d;
    }
    Ok(if negative { -acc } else { acc })
}

// RUST CONCEPT: Arbitrary-base decomposition, negative bases included
// For a negative base the machine remainder (truncated, sign of the
// dividend) can come out negative; the correction rule subtracts the base
// from the remainder (making it non-negative, since the base is negative)
// and bumps the quotient by one. That yields the unique representation
// with every digit in 0..|base|.
//
// A negative value in a positive base decomposes as |value| with every
// digit negated, which keeps positional evaluation an exact inverse.
pub fn to_base_digits(value: &BigInt, base: &BigInt) -> Result<Vec<BigInt>, NumericError> {
    if base.abs() < BigInt::from(2) {
        return Err(NumericError::InvalidBase(base.to_i64().unwrap_or(0)));
    }
    if value.is_zero() {
        return Ok(vec![BigInt::zero()]);
    }
    let mut digits = Vec::new();
    if base.is_positive() {
        let negative = value.is_negative();
        let mut v = value.abs();
        while !v.is_zero() {
            digits.push(&v % base);
            v /= base;
        }
        if negative {
            for d in digits.iter_mut() {
                *d = -&*d;
            }
        }
    } else {
        let mut v = value.clone();
        while !v.is_zero() {
            let mut r = &v % base;
            let mut q = &v / base;
            if r.is_negative() {
                r -= base;
                q += 1;
            }
            digits.push(r);
            v = q;
        }
    }
    digits.reverse();
    Ok(digits)
}

/// Evaluate a digit-value list positionally: sum of digit[i] * base^(len-1-i).
pub fn from_base_digits(digits: &[BigInt], base: &BigInt) -> BigInt {
    let mut acc = BigInt::zero();
    for d in digits {
        acc = acc * base + d;
    }
    acc
}

// RUST CONCEPT: Custom alphabets carry symbols, not digit magnitudes
// The caller's alphabet defines both the base (its length) and the digit
// symbols; encoding substitutes symbols for digit values, decoding finds
// each symbol's index by the host's structural equality - two equal strings
// match even when they are distinct objects.
pub fn to_custom_base(value: &BigInt, alphabet: &[Value]) -> Result<Vec<Value>, NumericError> {
    if alphabet.len() < 2 {
        return Err(NumericError::InvalidBase(alphabet.len() as i64));
    }
    if value.is_negative() {
        return Err(NumericError::UndefinedDomain(format!(
            "cannot encode negative value {} in a custom alphabet",
            value
        )));
    }
    let base = BigInt::from(alphabet.len());
    let digits = to_base_digits(value, &base)?;
    let mut symbols = Vec::with_capacity(digits.len());
    for d in &digits {
        let index = d
            .to_usize()
            .ok_or_else(|| NumericError::UndefinedDomain(format!("digit out of range: {}", d)))?;
        symbols.push(alphabet[index].clone());
    }
    Ok(symbols)
}

pub fn from_custom_base(
    symbols: &[Value],
    alphabet: &[Value],
    coercion: &dyn Coercion,
) -> Result<BigInt, NumericError> {
    if alphabet.len() < 2 {
        return Err(NumericError::InvalidBase(alphabet.len() as i64));
    }
    let base = BigInt::from(alphabet.len());
    let mut acc = BigInt::zero();
    for sym in symbols {
        let index = alphabet
            .iter()
            .position(|candidate| coercion.equals(sym, candidate))
            .ok_or_else(|| NumericError::SymbolNotFound(sym.to_string()))?;
        acc = acc * &base + index;
    }
    Ok(acc)
}
