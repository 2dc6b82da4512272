// Cross-module property tests for the numeric core. These exercise the
// documented algebraic identities over whole operand ranges rather than
// single hand-picked cases.

use num_bigint::BigInt;
use sigil_core::value::{Coercion, Number, Value};
use sigil_core::{arith, contfrac, numeral, primes, sequences, stats};

fn int(i: i64) -> Number {
    Number::from(i)
}

#[test]
fn modulo_identities_for_positive_operands() {
    for a in 1i64..=40 {
        for b in 1i64..=12 {
            // mod(a, b) is the ordinary remainder
            let m = arith::modulo(&int(a), &int(b)).unwrap();
            assert_eq!(m, int(a % b));

            // mod(-a, b) is b - mod(a, b), or 0 at exact multiples
            let neg = arith::modulo(&int(-a), &int(b)).unwrap();
            let expected = if a % b == 0 { 0 } else { b - a % b };
            assert_eq!(neg, int(expected), "mod(-{}, {})", a, b);
        }
    }
}

#[test]
fn modulo_sign_always_matches_divisor() {
    for a in -20i64..=20 {
        for b in -7i64..=7 {
            if b == 0 {
                continue;
            }
            let m = arith::modulo(&int(a), &int(b)).unwrap();
            if !m.is_zero() {
                assert_eq!(
                    m.is_negative(),
                    b < 0,
                    "mod({}, {}) = {} has the wrong sign",
                    a,
                    b,
                    m
                );
            }
        }
    }
}

#[test]
fn division_and_modulo_agree() {
    // a = b * div(a, b) + mod(a, b) in every quadrant
    for a in -30i64..=30 {
        for b in [-7i64, -3, -2, 2, 3, 7] {
            let q = arith::int_divide(&int(a), &int(b)).unwrap();
            let r = arith::modulo(&int(a), &int(b)).unwrap();
            assert_eq!(&(&int(b) * &q) + &r, int(a), "a={} b={}", a, b);
        }
    }
}

#[test]
fn power_known_values() {
    assert_eq!(
        arith::power(&int(2), &int(-3)).unwrap(),
        Number::Real(0.125)
    );
    assert_eq!(arith::power(&int(2), &int(10)).unwrap(), int(1024));
}

#[test]
fn gcd_lcm_known_values() {
    assert_eq!(arith::gcd(&int(12), &int(18)), int(6));
    assert_eq!(arith::gcd(&int(-12), &int(18)), int(6));
    assert_eq!(arith::lcm(&int(4), &int(6)).unwrap(), int(12));
}

#[test]
fn prime_known_values() {
    assert!(primes::is_prime(&BigInt::from(97)));
    assert!(!primes::is_prime(&BigInt::from(91)));
    assert_eq!(primes::nth_prime(0), BigInt::from(2));
    assert_eq!(primes::nth_prime(4), BigInt::from(11));
}

#[test]
fn concurrent_cache_extension_converges() {
    // many threads race to extend the shared cache; every one must observe
    // the identical contiguous prime sequence
    let handles: Vec<_> = (0usize..8)
        .map(|t| {
            std::thread::spawn(move || {
                let mut seen = Vec::new();
                for i in 0..(50 + t * 10) {
                    seen.push(primes::nth_prime(i));
                }
                seen
            })
        })
        .collect();
    let mut results: Vec<Vec<BigInt>> = Vec::new();
    for h in handles {
        results.push(h.join().unwrap());
    }
    for r in &results {
        assert_eq!(r[0], BigInt::from(2));
        for w in r.windows(2) {
            assert!(w[0] < w[1], "cache sequence must be strictly increasing");
            assert_eq!(primes::next_prime(&w[0]), w[1], "no prime skipped");
        }
    }
}

#[test]
fn fixed_base_round_trip_every_base() {
    for base in 2i64..=255 {
        for v in [0i64, 1, 7, 254, 255, 256, 100_000] {
            let encoded = numeral::to_base(&BigInt::from(v), base).unwrap();
            assert_eq!(
                numeral::from_base(&encoded, base).unwrap(),
                BigInt::from(v),
                "value {} in base {}",
                v,
                base
            );
        }
    }
}

#[test]
fn negative_base_round_trip() {
    for base in [-2i64, -3, -10] {
        for v in -200i64..=200 {
            let digits = numeral::to_base_digits(&BigInt::from(v), &BigInt::from(base)).unwrap();
            assert_eq!(
                numeral::from_base_digits(&digits, &BigInt::from(base)),
                BigInt::from(v),
                "value {} in base {}",
                v,
                base
            );
        }
    }
}

#[test]
fn roman_round_trip_full_range() {
    for n in 1i64..=3999 {
        let encoded = sequences::to_roman_numeral(&BigInt::from(n)).unwrap();
        assert_eq!(
            sequences::from_roman_numeral(&encoded).unwrap(),
            BigInt::from(n)
        );
    }
    assert_eq!(
        sequences::to_roman_numeral(&BigInt::from(1994)).unwrap(),
        "MCMXCIV"
    );
}

#[test]
fn factorial_known_values() {
    assert_eq!(sequences::factorial(&int(5)).unwrap(), int(120));
    assert_eq!(sequences::factorial(&int(0)).unwrap(), int(1));
    // 4.5! must agree with gamma(5.5)
    let gamma_5_5 = 52.342_777_784_553_52;
    let got = sequences::factorial(&Number::Real(4.5)).unwrap().to_f64();
    assert!((got - gamma_5_5).abs() < 1e-9);
}

#[test]
fn continued_fraction_of_one_third() {
    let cf = contfrac::ContinuedFraction::new(
        |k| BigInt::from(if k == 0 { 0 } else if k == 1 { 3 } else { 1 }),
        |k| BigInt::from(if k == 1 { 1 } else { 0 }),
    );
    let digits: Vec<BigInt> = cf.take(10).collect();
    assert_eq!(digits[0], BigInt::from(0));
    for d in &digits[1..] {
        assert_eq!(*d, BigInt::from(3));
    }
}

struct HostCoercion;

impl Coercion for HostCoercion {
    fn to_number(&self, v: &Value) -> Option<Number> {
        match v {
            Value::Num(n) => Some(n.clone()),
            Value::Str(s) => s
                .parse::<i64>()
                .ok()
                .map(Number::from)
                .or_else(|| s.parse::<f64>().ok().map(Number::Real)),
            Value::List(_) => None,
        }
    }
    fn to_integer(&self, v: &Value) -> Option<BigInt> {
        match self.to_number(v)? {
            Number::Integer(i) => Some(i),
            Number::Real(_) => None,
        }
    }
    fn is_iterable(&self, v: &Value) -> bool {
        matches!(v, Value::List(_) | Value::Str(_))
    }
    fn equals(&self, a: &Value, b: &Value) -> bool {
        a == b
    }
}

#[test]
fn median_and_mean_known_values() {
    let nums = |xs: &[i64]| Value::List(xs.iter().map(|&i| Value::Num(int(i))).collect());

    assert_eq!(
        stats::median(&nums(&[1, 2, 3, 4]), &HostCoercion).unwrap(),
        Value::Num(Number::Real(2.5))
    );
    assert_eq!(
        stats::median(&Value::List(Vec::new()), &HostCoercion).unwrap(),
        Value::List(Vec::new())
    );

    // column-wise broadcast, not a grand mean
    let nested = Value::List(vec![nums(&[1, 2]), nums(&[3, 4])]);
    let m = stats::arithmetic_mean(&nested, &HostCoercion).unwrap();
    assert_eq!(
        m,
        Value::List(vec![
            Value::Num(Number::Real(2.0)),
            Value::Num(Number::Real(3.0))
        ])
    );
}
