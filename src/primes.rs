// Primality, prime enumeration, and factorization.
//
// Everything here is deterministic trial division; there is no probabilistic
// primality testing in this core.

use std::sync::{OnceLock, RwLock};

use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, Zero};

use crate::value::NumericError;

// RUST CONCEPT: Explicit shared memo cache instead of an implicit global
// The cache is an append-only, strictly increasing, contiguous run of primes
// indexed by position (0 -> 2, 1 -> 3, ...). The correctness contract is
// idempotent convergence, not mutual exclusion: any two callers extending to
// entry i independently must compute the identical prime, so redundant
// concurrent recomputation is harmless and entries once written never change.
// The write lock below only prevents duplicate work; it is not needed for
// correctness.
pub struct PrimeCache {
    primes: RwLock<Vec<BigInt>>,
}

impl PrimeCache {
    pub fn new() -> PrimeCache {
        PrimeCache {
            primes: RwLock::new(vec![BigInt::from(2)]),
        }
    }

    /// The process-wide cache shared by `nth_prime` and friends.
    pub fn global() -> &'static PrimeCache {
        static CACHE: OnceLock<PrimeCache> = OnceLock::new();
        CACHE.get_or_init(PrimeCache::new)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<BigInt> {
        self.read().get(index).cloned()
    }

    /// Grow the cache until it holds at least `count` primes. Each new entry
    /// is the `next_prime` of the previous one, so the run stays contiguous.
    pub fn extend_to(&self, count: usize) {
        if self.len() >= count {
            return;
        }
        let mut primes = self.write();
        // another extender may have raced us here; the loop re-checks
        while primes.len() < count {
            let next = match primes.last() {
                Some(last) => next_prime(last),
                None => BigInt::from(2),
            };
            primes.push(next);
        }
    }

    /// The prime at `index`, extending the cache on demand.
    pub fn nth(&self, index: usize) -> BigInt {
        loop {
            if let Some(p) = self.get(index) {
                return p;
            }
            self.extend_to(index + 1);
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<BigInt>> {
        // a poisoned lock cannot leave the vec inconsistent (append-only),
        // so recover the guard instead of propagating the panic
        self.primes.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<BigInt>> {
        self.primes.write().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for PrimeCache {
    fn default() -> Self {
        PrimeCache::new()
    }
}

// RUST CONCEPT: Wheel-style trial division
// 2, 3, 5, 7 are checked explicitly; after that every prime is of the form
// 6k±1, so candidates step by 6 from 5 testing p and p+2 up to sqrt(n).
pub fn is_prime(n: &BigInt) -> bool {
    let two = BigInt::from(2);
    if *n < two {
        return false;
    }
    for small in [2u32, 3, 5, 7] {
        let s = BigInt::from(small);
        if *n == s {
            return true;
        }
        if (n % &s).is_zero() {
            return false;
        }
    }
    let mut p = BigInt::from(5);
    while &p * &p <= *n {
        let twin: BigInt = &p + 2;
        if (n % &p).is_zero() || (n % &twin).is_zero() {
            return false;
        }
        p += 6;
    }
    true
}

/// Smallest prime strictly greater than `n`.
pub fn next_prime(n: &BigInt) -> BigInt {
    let two = BigInt::from(2);
    if *n < two {
        return two;
    }
    let mut candidate: BigInt = n + 1;
    if candidate == two {
        return two;
    }
    if (&candidate % 2u32).is_zero() {
        candidate += 1;
    }
    while !is_prime(&candidate) {
        candidate += 2;
    }
    candidate
}

/// Largest prime strictly less than `n`; undefined below 3.
pub fn prev_prime(n: &BigInt) -> Result<BigInt, NumericError> {
    if *n <= BigInt::from(2) {
        return Err(NumericError::UndefinedDomain(format!(
            "no prime below {}",
            n
        )));
    }
    let mut candidate: BigInt = n - 1;
    if candidate == BigInt::from(2) {
        return Ok(candidate);
    }
    if (&candidate % 2u32).is_zero() {
        candidate -= 1;
    }
    while !is_prime(&candidate) {
        candidate -= 2;
    }
    Ok(candidate)
}

/// The prime numerically closest to `n`; at equal distance the larger wins.
pub fn nearest_prime(n: &BigInt) -> BigInt {
    if is_prime(n) {
        return n.clone();
    }
    let above = next_prime(n);
    match prev_prime(n) {
        Ok(below) => {
            if n - &below < &above - n {
                below
            } else {
                above
            }
        }
        Err(_) => above,
    }
}

/// The prime at position `n` (0 -> 2), memoized in the shared cache.
pub fn nth_prime(n: usize) -> BigInt {
    PrimeCache::global().nth(n)
}

/// Position of the largest prime <= `n`, or `None` when `n < 2`.
/// The host interpreter renders `None` as -1.
pub fn prime_index(n: &BigInt) -> Option<usize> {
    if *n < BigInt::from(2) {
        return None;
    }
    let mut index = 0;
    loop {
        if nth_prime(index) > *n {
            return Some(index - 1);
        }
        index += 1;
    }
}

/// Prime factors of |n| with multiplicity, ascending. Empty for |n| <= 1.
pub fn prime_factors(n: &BigInt) -> Vec<BigInt> {
    let mut remaining = n.abs();
    let mut factors = Vec::new();
    let mut index = 0;
    while remaining > BigInt::one() {
        let p = nth_prime(index);
        if &p * &p > remaining {
            // no divisor up to sqrt, so what is left is prime
            factors.push(remaining);
            break;
        }
        if (&remaining % &p).is_zero() {
            remaining /= &p;
            factors.push(p);
        } else {
            index += 1;
        }
    }
    factors
}

// RUST CONCEPT: Prime-exponent vector form
// 360 = 2^3 * 3^2 * 5 becomes [3, 2, 1]; the position is the prime's index
// in the canonical ordering and trailing zero multiplicities are dropped.
pub fn prime_exponents(n: &BigInt) -> Vec<u32> {
    let factors = prime_factors(n);
    let mut exponents = Vec::new();
    match factors.last() {
        None => {}
        Some(largest) => {
            let mut index = 0;
            loop {
                let p = nth_prime(index);
                exponents.push(factors.iter().filter(|f| **f == p).count() as u32);
                if p == *largest {
                    break;
                }
                index += 1;
            }
        }
    }
    exponents
}

/// Exact inverse of `prime_exponents` under the canonical prime ordering.
pub fn number_from_prime_exponents(exponents: &[u32]) -> BigInt {
    let mut product = BigInt::one();
    for (index, e) in exponents.iter().enumerate() {
        product *= Pow::pow(nth_prime(index), *e);
    }
    product
}

/// All divisors of |n|, ascending, by paired trial division up to sqrt(|n|).
/// `divisors(0)` is the empty vector: the sqrt-bounded scan finds nothing.
pub fn divisors(n: &BigInt) -> Vec<BigInt> {
    let m = n.abs();
    let mut found = Vec::new();
    let mut d = BigInt::one();
    while &d * &d <= m {
        if (&m % &d).is_zero() {
            let paired = &m / &d;
            if paired != d {
                found.push(paired);
            }
            found.push(d.clone());
        }
        d += 1;
    }
    found.sort();
    found
}

/// Count of k in [1, n] with gcd(n, k) = 1, by direct counting.
pub fn euler_totient(n: &BigInt) -> BigInt {
    let mut count = BigInt::zero();
    let mut k = BigInt::one();
    while k <= *n {
        if big_gcd(n.clone(), k.clone()).is_one() {
            count += 1;
        }
        k += 1;
    }
    count
}

fn big_gcd(mut a: BigInt, mut b: BigInt) -> BigInt {
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a.abs()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(i: i64) -> BigInt {
        BigInt::from(i)
    }

    #[test]
    fn test_is_prime_small_and_composite() {
        assert!(is_prime(&big(2)));
        assert!(is_prime(&big(3)));
        assert!(is_prime(&big(97)));
        assert!(!is_prime(&big(91))); // 7 * 13
        assert!(!is_prime(&big(1)));
        assert!(!is_prime(&big(0)));
        assert!(!is_prime(&big(-7)));
    }

    #[test]
    fn test_next_prev_nearest() {
        assert_eq!(next_prime(&big(7)), big(11));
        assert_eq!(next_prime(&big(0)), big(2));
        assert_eq!(prev_prime(&big(10)).unwrap(), big(7));
        assert_eq!(prev_prime(&big(3)).unwrap(), big(2));
        assert!(prev_prime(&big(2)).is_err());
        assert_eq!(nearest_prime(&big(8)), big(7));
        // equidistant between 7 and 11: tie goes to the larger
        assert_eq!(nearest_prime(&big(9)), big(11));
        assert_eq!(nearest_prime(&big(1)), big(2));
        assert_eq!(nearest_prime(&big(13)), big(13));
    }

    #[test]
    fn test_nth_prime_through_cache() {
        assert_eq!(nth_prime(0), big(2));
        assert_eq!(nth_prime(4), big(11));
        // descending request order exercises the already-cached path
        assert_eq!(nth_prime(9), big(29));
        assert_eq!(nth_prime(5), big(13));
    }

    #[test]
    fn test_cache_extension_is_idempotent() {
        let cache = PrimeCache::new();
        cache.extend_to(6);
        cache.extend_to(3); // no-op
        assert!(cache.len() >= 6);
        assert_eq!(cache.get(5), Some(big(13)));
        assert_eq!(cache.get(100), None);
    }

    #[test]
    fn test_prime_index() {
        assert_eq!(prime_index(&big(1)), None);
        assert_eq!(prime_index(&big(2)), Some(0));
        assert_eq!(prime_index(&big(12)), Some(4)); // largest prime <= 12 is 11
        assert_eq!(prime_index(&big(13)), Some(5));
    }

    #[test]
    fn test_prime_factors() {
        assert_eq!(prime_factors(&big(360)), vec![big(2), big(2), big(2), big(3), big(3), big(5)]);
        assert_eq!(prime_factors(&big(97)), vec![big(97)]);
        assert!(prime_factors(&big(1)).is_empty());
        assert_eq!(prime_factors(&big(-12)), vec![big(2), big(2), big(3)]);
    }

    #[test]
    fn test_prime_exponents_round_trip() {
        assert_eq!(prime_exponents(&big(360)), vec![3, 2, 1]);
        assert_eq!(prime_exponents(&big(10)), vec![1, 0, 1]);
        assert!(prime_exponents(&big(1)).is_empty());
        assert_eq!(number_from_prime_exponents(&[3, 2, 1]), big(360));
        assert_eq!(number_from_prime_exponents(&[]), big(1));
    }

    #[test]
    fn test_divisors() {
        assert_eq!(divisors(&big(12)), vec![big(1), big(2), big(3), big(4), big(6), big(12)]);
        assert_eq!(divisors(&big(16)), vec![big(1), big(2), big(4), big(8), big(16)]);
        assert_eq!(divisors(&big(-6)), vec![big(1), big(2), big(3), big(6)]);
        assert!(divisors(&big(0)).is_empty());
    }

    #[test]
    fn test_euler_totient() {
        assert_eq!(euler_totient(&big(9)), big(6));
        assert_eq!(euler_totient(&big(10)), big(4));
        assert_eq!(euler_totient(&big(1)), big(1));
    }
}
