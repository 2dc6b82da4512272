// Special sequences: factorial and its gamma extension, Fibonacci/Lucas,
// Roman numerals, combinatorics, and the integer perfect-square test.

use std::collections::HashSet;
use std::f64::consts::PI;

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use crate::value::{Number, NumericError};

// RUST CONCEPT: Lanczos approximation with a fixed coefficient table
// g = 7, eight series terms. Accurate to roughly 1e-13 over the real line;
// arguments below 1/2 go through the reflection formula.
const LANCZOS_G: f64 = 7.0;
const LANCZOS_BASE: f64 = 0.999_999_999_999_809_93;
const LANCZOS: [f64; 8] = [
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

fn gamma(x: f64) -> f64 {
    if x < 0.5 {
        PI / ((PI * x).sin() * gamma(1.0 - x))
    } else {
        let x = x - 1.0;
        let mut series = LANCZOS_BASE;
        for (i, c) in LANCZOS.iter().enumerate() {
            series += c / (x + i as f64 + 1.0);
        }
        let t = x + LANCZOS_G + 0.5;
        (2.0 * PI).sqrt() * t.powf(x + 0.5) * (-t).exp() * series
    }
}

/// Product of every second integer down from `n`: n(n-2)(n-4)...
fn double_factorial(n: u64) -> BigInt {
    let mut product = BigInt::one();
    let mut i = n;
    while i > 1 {
        product *= i;
        i -= 2;
    }
    product
}

// Half-integer arguments have a closed form and skip the series entirely:
// gamma(m + 1/2) = (2m-1)!! / 2^m * sqrt(pi), extended below zero by
// dividing back down the recurrence.
fn half_integer_gamma(m: i64) -> f64 {
    if m >= 0 {
        let odd = double_factorial((2 * m - 1).max(0) as u64);
        odd.to_f64().unwrap_or(f64::INFINITY) / 2f64.powi(m as i32) * PI.sqrt()
    } else {
        let mut g = PI.sqrt();
        for j in 1..=(-m) {
            g /= 0.5 - j as f64;
        }
        g
    }
}

// RUST CONCEPT: Exact integer path, gamma extension for reals
// factorial(n) for a non-negative Integer is the exact BigInt product.
// For a Real it is gamma(n + 1). A negative Integer has no factorial and
// no sanctioned extension here, so it surfaces as a domain error.
pub fn factorial(n: &Number) -> Result<Number, NumericError> {
    match n {
        Number::Integer(i) => {
            if i.is_negative() {
                return Err(NumericError::UndefinedDomain(format!(
                    "factorial of negative integer {}",
                    i
                )));
            }
            Ok(Number::Integer(int_factorial(i)))
        }
        Number::Real(r) => {
            // gamma(r + 1) has poles at the negative integers. The
            // reflection formula cannot be trusted to hit them: sin(pi*x)
            // at an integer is ~1e-16 in f64, not 0, so the result would
            // come back huge and finite instead of infinite.
            if *r < 0.0 && r.fract() == 0.0 {
                return Err(NumericError::UndefinedDomain(format!(
                    "factorial undefined at {}",
                    r
                )));
            }
            let shifted = r + 0.5;
            let value = if shifted.fract() == 0.0 && shifted.abs() < 1e15 {
                half_integer_gamma(shifted as i64)
            } else {
                gamma(r + 1.0)
            };
            if value.is_nan() || value.is_infinite() {
                return Err(NumericError::UndefinedDomain(format!(
                    "factorial undefined at {}",
                    r
                )));
            }
            Ok(Number::Real(value))
        }
    }
}

fn int_factorial(n: &BigInt) -> BigInt {
    let mut product = BigInt::one();
    let mut i = BigInt::from(2);
    while i <= *n {
        product *= &i;
        i += 1;
    }
    product
}

/// Binomial coefficient via factorials; zero when k is outside [0, n].
pub fn n_choose_k(n: &BigInt, k: &BigInt) -> Result<BigInt, NumericError> {
    if n.is_negative() {
        return Err(NumericError::UndefinedDomain(format!(
            "n choose k with negative n: {}",
            n
        )));
    }
    if k.is_negative() || k > n {
        return Ok(BigInt::zero());
    }
    Ok(int_factorial(n) / (int_factorial(k) * int_factorial(&(n - k))))
}

/// Ordered selections via factorials; zero when k is outside [0, n].
pub fn n_permute_k(n: &BigInt, k: &BigInt) -> Result<BigInt, NumericError> {
    if n.is_negative() {
        return Err(NumericError::UndefinedDomain(format!(
            "n permute k with negative n: {}",
            n
        )));
    }
    if k.is_negative() || k > n {
        return Ok(BigInt::zero());
    }
    Ok(int_factorial(n) / int_factorial(&(n - k)))
}

/// Fibonacci number at index `n`, iterating up from seeds (0, 1).
pub fn fibonacci(n: u64) -> BigInt {
    iterate_pair(BigInt::zero(), BigInt::one(), n)
}

/// Lucas number at index `n`, iterating up from seeds (2, 1).
pub fn lucas(n: u64) -> BigInt {
    iterate_pair(BigInt::from(2), BigInt::one(), n)
}

fn iterate_pair(mut a: BigInt, mut b: BigInt, n: u64) -> BigInt {
    for _ in 0..n {
        let next = &a + &b;
        a = std::mem::replace(&mut b, next);
    }
    a
}

// Thirteen (value, symbol) pairs in strictly descending value order; greedy
// subtraction against this table is exact and canonical.
const ROMAN_TABLE: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Greedy encoding: repeatedly subtract the largest table value that fits.
pub fn to_roman_numeral(n: &BigInt) -> Result<String, NumericError> {
    if !n.is_positive() {
        return Err(NumericError::UndefinedDomain(format!(
            "no Roman numeral for {}",
            n
        )));
    }
    let mut remaining = n.clone();
    let mut out = String::new();
    while remaining.is_positive() {
        for (value, symbol) in ROMAN_TABLE {
            let value = BigInt::from(value);
            if value <= remaining {
                remaining -= value;
                out.push_str(symbol);
                break;
            }
        }
    }
    Ok(out)
}

/// Greedy decoding: repeatedly match the longest symbol prefix. The table
/// order already puts two-character subtractive forms before their
/// single-character components.
pub fn from_roman_numeral(text: &str) -> Result<BigInt, NumericError> {
    let mut rest = text;
    let mut total = BigInt::zero();
    'outer: while !rest.is_empty() {
        for (value, symbol) in ROMAN_TABLE {
            if let Some(tail) = rest.strip_prefix(symbol) {
                total += value;
                rest = tail;
                continue 'outer;
            }
        }
        return Err(NumericError::SymbolNotFound(
            rest.chars().take(1).collect(),
        ));
    }
    Ok(total)
}

// RUST CONCEPT: Cycle-guarded integer Newton iteration
// Integer Newton (x <- (x + n/x) / 2) converges to floor(sqrt(n)) but can
// fall into a 2-cycle between two adjacent candidates when n is not a
// perfect square. The visited set detects that oscillation; bounding the
// iteration count instead would risk wrong answers near the root.
pub fn is_square(n: &Number) -> bool {
    let n = match n {
        Number::Integer(i) => i,
        Number::Real(_) => return false,
    };
    if n.is_negative() {
        return false;
    }
    if *n < BigInt::from(2) {
        return true; // 0 and 1
    }
    let mut visited = HashSet::new();
    let mut x: BigInt = n / 2;
    loop {
        if &x * &x == *n {
            return true;
        }
        if !visited.insert(x.clone()) {
            return false;
        }
        x = (&x + n / &x) / 2;
    }
}
