//! # Sigil Core
//!
//! Numeric semantics library for the Sigil programming language.
//!
//! Sigil is a stack-based, code-page-driven interpreter; every arithmetic,
//! number-theoretic, positional-numeral, and statistical word its dispatcher
//! executes bottoms out in this crate. The interpreter itself (dispatcher,
//! tokenizer, I/O, value coercion) lives in the host crates - this core only
//! sees already-popped operands and returns a value or a [`NumericError`].
//!
//! ## Components
//!
//! - **Arithmetic core** ([`arith`]): generalized floored modulo, exact
//!   integer power, integer division, gcd/lcm - consistent across mixed
//!   integer/real and positive/negative operands
//! - **Number theory** ([`primes`]): deterministic trial-division primality,
//!   memoized prime enumeration, factorization, divisors, totient
//! - **Numeral codec** ([`numeral`]): fixed, negative, and custom-alphabet
//!   base conversion over the canonical 255-symbol [`codepage`]
//! - **Continued fractions** ([`contfrac`]): lazy unbounded decimal digit
//!   streams from two term callbacks
//! - **Statistics** ([`stats`]): recursive max/min/mean/median over nested
//!   heterogeneous sequences
//! - **Special sequences** ([`sequences`]): factorial and its gamma
//!   extension, Fibonacci/Lucas, Roman numerals, combinatorics
//!
//! ## Example
//!
//! ```
//! use sigil_core::{Number, arith, numeral};
//! use num_bigint::BigInt;
//!
//! // floored modulo: the result carries the divisor's sign
//! let m = arith::modulo(&Number::from(-13), &Number::from(5)).unwrap();
//! assert_eq!(m, Number::from(2));
//!
//! // base conversion through the canonical code page
//! assert_eq!(numeral::to_base(&BigInt::from(255), 16).unwrap(), "FF");
//! ```

// Public modules
pub mod arith;
pub mod codepage;
pub mod contfrac;
pub mod numeral;
pub mod primes;
pub mod sequences;
pub mod stats;
pub mod value;

// Re-exports for convenience
pub use contfrac::ContinuedFraction;
pub use primes::PrimeCache;
pub use value::{Coercion, Number, NumericError, Value};
