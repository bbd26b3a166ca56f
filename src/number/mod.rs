//! Arbitrary-precision number theory
//!
//! This module provides the primitives the grid and the sequences are built on:
//! - [`primes`]: trial-division primality, the base-3 Euler probable-prime test,
//!   power-of-two detection
//! - [`roots`]: integer k-th roots by Newton iteration and modular exponentiation
//! - [`divisors`]: divisor enumeration and row anchors
//! - [`errors`]: [`NumberError`] for rejected inputs
//!
//! # Negative Inputs
//!
//! Every function computes on `|n|`. Predicates return a plain `bool` for `|n|`;
//! [`polarity`] reproduces the signed convention where a negative input yields the
//! arithmetic negation of the verdict for `|n|` (`-1` or `0`).
//!
//! Roots keep the sign of their input: `integer_sqrt(-16) == -4`.

pub mod divisors;
pub mod errors;
pub mod primes;
pub mod roots;

pub use divisors::{divisors, nearest_multiple, proper_divisors};
pub use errors::NumberError;
pub use primes::{is_likely_prime, is_power_of_two, is_prime};
pub use roots::{integer_root, integer_sqrt, mod_pow};

use num_bigint::BigInt;
use num_traits::Signed;

/// Evaluate a predicate with the signed polarity convention.
///
/// Returns `1` or `0` for non-negative `n`, and `-1` or `0` for negative `n`
/// (the verdict for `|n|`, negated).
pub fn polarity<F>(n: &BigInt, test: F) -> i8
where
    F: Fn(&BigInt) -> bool,
{
    let verdict = i8::from(test(&n.abs()));
    if n.is_negative() {
        -verdict
    } else {
        verdict
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polarity_flips_for_negative_inputs() {
        assert_eq!(polarity(&BigInt::from(7), is_prime), 1);
        assert_eq!(polarity(&BigInt::from(-7), is_prime), -1);
        assert_eq!(polarity(&BigInt::from(-8), is_prime), 0);
        assert_eq!(polarity(&BigInt::from(-8), is_power_of_two), -1);
        assert_eq!(polarity(&BigInt::from(0), is_power_of_two), 0);
    }
}
