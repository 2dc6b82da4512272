// Lazy decimal-digit stream for generalized continued fractions.
//
//   a(0) + b(1) / (a(1) + b(2) / (a(2) + ...))
//
// The stream is pull-based: no digit is computed until the consumer asks,
// and stopping is simply ceasing to pull. Creating a new generator restarts
// the expansion from the first term; a running stream cannot be rewound.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};

// RUST CONCEPT: Gosper-style digit emission from two convergents
// State is (k, p0/q0, p1/q1): the term index and two successive convergents.
// When both convergents agree on their integer part the next decimal digit
// is certain - emit it and scale the remainders by 10. When they disagree,
// fold in the next term a(k+1), b(k+1) to tighten the bracket and retry.
// Each fold makes progress for non-degenerate term sequences, so the stream
// never terminates and `next` never returns `None`.
pub struct ContinuedFraction {
    a: Box<dyn FnMut(u64) -> BigInt>,
    b: Box<dyn FnMut(u64) -> BigInt>,
    k: u64,
    p0: BigInt,
    q0: BigInt,
    p1: BigInt,
    q1: BigInt,
}

impl ContinuedFraction {
    /// Start a digit stream from the partial-denominator sequence `a(k)`
    /// and partial-numerator sequence `b(k)`, `k >= 0` (`b(0)` is unused).
    pub fn new<A, B>(a: A, b: B) -> ContinuedFraction
    where
        A: FnMut(u64) -> BigInt + 'static,
        B: FnMut(u64) -> BigInt + 'static,
    {
        let mut a: Box<dyn FnMut(u64) -> BigInt> = Box::new(a);
        let mut b: Box<dyn FnMut(u64) -> BigInt> = Box::new(b);
        let a0 = a(0);
        let a1 = a(1);
        let b1 = b(1);
        let p1 = &a1 * &a0 + &b1;
        ContinuedFraction {
            a,
            b,
            k: 1,
            p0: a0,
            q0: BigInt::one(),
            p1,
            q1: a1,
        }
    }
}

fn div_mod_floor(p: &BigInt, q: &BigInt) -> (BigInt, BigInt) {
    let mut d = p / q;
    let mut r = p % q;
    if !r.is_zero() && (r.is_negative() != q.is_negative()) {
        d -= 1;
        r += q;
    }
    (d, r)
}

impl Iterator for ContinuedFraction {
    type Item = BigInt;

    fn next(&mut self) -> Option<BigInt> {
        loop {
            if !self.q0.is_zero() && !self.q1.is_zero() {
                let (x0, r0) = div_mod_floor(&self.p0, &self.q0);
                let (x1, r1) = div_mod_floor(&self.p1, &self.q1);
                if x0 == x1 {
                    // digit is certain; shift to the next decimal place
                    // without consuming a term
                    self.p0 = r0 * 10;
                    self.p1 = r1 * 10;
                    return Some(x0);
                }
            }
            self.k += 1;
            let ak = (self.a)(self.k);
            let bk = (self.b)(self.k);
            let p2 = &ak * &self.p1 + &bk * &self.p0;
            let q2 = &ak * &self.q1 + &bk * &self.q0;
            self.p0 = std::mem::replace(&mut self.p1, p2);
            self.q0 = std::mem::replace(&mut self.q1, q2);
        }
    }
}
