//! Primality and power-of-two predicates

use super::roots::{integer_sqrt, pow_mod};
use num_bigint::{BigInt, BigUint};
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

/// Primes resolved without trial division
const SMALL_PRIMES: [u32; 4] = [2, 3, 5, 7];

/// First trial-division candidate above [`SMALL_PRIMES`]
const FIRST_CANDIDATE: u32 = 11;

/// Deterministic primality of `|n|` by trial division up to `⌊√|n|⌋`.
///
/// Cost grows with `√n`; the grid uses [`is_likely_prime`] instead.
pub fn is_prime(n: &BigInt) -> bool {
    let n = n.magnitude();

    if let Some(small) = n.to_u32() {
        if small <= 10 {
            return SMALL_PRIMES.contains(&small);
        }
    }

    if SMALL_PRIMES.iter().any(|p| (n % *p).is_zero()) {
        return false;
    }

    let boundary = integer_sqrt(&BigInt::from(n.clone()));
    let boundary = boundary.magnitude();
    let mut candidate = BigUint::from(FIRST_CANDIDATE);
    while &candidate <= boundary {
        if (n % &candidate).is_zero() {
            return false;
        }
        candidate += 2u32;
    }

    true
}

/// One round of the Euler probable-prime test to base 3 on `|n|`.
///
/// Euler–Jacobi pseudoprimes to base 3 (121, 703, 1729, …) are reported as
/// likely prime.
pub fn is_likely_prime(n: &BigInt) -> bool {
    let n = n.magnitude();

    if let Some(small) = n.to_u32() {
        match small {
            0 | 1 | 4 => return false,
            2 | 3 | 5 => return true,
            _ => {}
        }
    }

    if n.is_even() {
        return false;
    }

    let n_minus_one = n - 1u32;
    let exponent = &n_minus_one >> 1u32;
    let x = pow_mod(&BigUint::from(3u32), &exponent, n);

    x == n_minus_one || x.is_one()
}

/// `|n| ≠ 0 ∧ |n| & (|n| - 1) = 0`
pub fn is_power_of_two(n: &BigInt) -> bool {
    let n = n.magnitude();
    if n.is_zero() {
        return false;
    }
    (n & &(n - 1u32)).is_zero()
}
