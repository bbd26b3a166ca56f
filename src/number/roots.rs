//! Integer roots and modular exponentiation

use super::errors::NumberError;
use num_bigint::{BigInt, BigUint, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, Zero};

/// Safety bound on Newton iterations. Seeded from a power of two just above the
/// root, convergence takes a few rounds plus about `0.7·k` for the k-th root.
pub const ROOT_ITERATION_LIMIT: usize = 100;

/// Integer square root, `⌊√|n|⌋` carrying the sign of `n`.
pub fn integer_sqrt(n: &BigInt) -> BigInt {
    signed_root(n, 2)
}

/// Integer k-th root, `⌊|n|^(1/k)⌋` carrying the sign of `n`.
///
/// Newton iteration from `x₀ = 2^⌈bits(|n|) / k⌉`, which is never below the root:
///
/// ```text
/// x ← ((k - 1)·x + |n| / x^(k-1)) / k
/// ```
///
/// The iterate decreases monotonically towards the floor root; iteration stops
/// once it no longer decreases or after [`ROOT_ITERATION_LIMIT`] rounds, in which
/// case the best iterate so far is returned.
pub fn integer_root(n: &BigInt, k: u32) -> Result<BigInt, NumberError> {
    if k == 0 {
        return Err(NumberError::ZeroRootDegree);
    }
    Ok(signed_root(n, k))
}

fn signed_root(n: &BigInt, k: u32) -> BigInt {
    let root = newton_root(n.magnitude(), k);
    BigInt::from_biguint(n.sign(), root)
}

fn newton_root(n: &BigUint, k: u32) -> BigUint {
    if n.is_zero() || n.is_one() || k == 1 {
        return n.clone();
    }

    let degree = BigUint::from(k);
    let lower = BigUint::from(k - 1);

    let mut x = initial_estimate(n, k);
    for _ in 0..ROOT_ITERATION_LIMIT {
        let next = (&lower * &x + n / x.pow(k - 1)) / &degree;
        if next >= x {
            break;
        }
        x = next;
    }

    x
}

/// `2^⌈bits / k⌉`: since `n < 2^bits`, this bounds `n^(1/k)` from above.
fn initial_estimate(n: &BigUint, k: u32) -> BigUint {
    let k = u64::from(k);
    let shift = (n.bits() + k - 1) / k;
    BigUint::one() << shift
}

/// Modular exponentiation by square-and-multiply.
///
/// The result is always in `[0, modulus)`; negative bases are normalized first.
/// A modulus of one short-circuits to zero.
pub fn mod_pow(base: &BigInt, exponent: &BigInt, modulus: &BigInt) -> Result<BigInt, NumberError> {
    if exponent.is_negative() {
        return Err(NumberError::NegativeExponent {
            exponent: exponent.to_string(),
        });
    }
    if !modulus.is_positive() {
        return Err(NumberError::NonPositiveModulus {
            modulus: modulus.to_string(),
        });
    }

    let base = base.mod_floor(modulus);
    let result = pow_mod(base.magnitude(), exponent.magnitude(), modulus.magnitude());
    Ok(BigInt::from_biguint(Sign::Plus, result))
}

/// Square-and-multiply over a modulus known to be positive.
pub(crate) fn pow_mod(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> BigUint {
    if modulus.is_one() {
        return BigUint::zero();
    }

    let mut current = base % modulus;
    let mut result = BigUint::one();
    let mut exponent = exponent.clone();

    while !exponent.is_zero() {
        if exponent.is_odd() {
            result = (result * &current) % modulus;
        }
        exponent >>= 1u32;
        current = (&current * &current) % modulus;
    }

    result
}
