//! Divisor enumeration

use super::errors::NumberError;
use super::roots::integer_sqrt;
use num_bigint::{BigInt, BigUint};
use num_traits::{One, Zero};

/// All positive divisors of `|n|`, ascending and duplicate-free.
///
/// Trial division up to `⌊√|n|⌋`: each divisor `d` found contributes its
/// cofactor `|n| / d` as well unless the two are equal. `|n| ≤ 1` yields `[1]`.
pub fn divisors(n: &BigInt) -> Vec<BigInt> {
    let magnitude = n.magnitude();
    let mut result = proper_divisors(n);
    if magnitude > &BigUint::one() {
        result.push(BigInt::from(magnitude.clone()));
    }
    result
}

/// Positive divisors of `|n|` excluding `|n|` itself, always including 1.
///
/// Values up to 3 yield exactly `[1]`.
pub fn proper_divisors(n: &BigInt) -> Vec<BigInt> {
    let magnitude = n.magnitude();
    let mut low = vec![BigUint::one()];
    let mut high = Vec::new();

    if magnitude <= &BigUint::from(3u32) {
        return low.into_iter().map(BigInt::from).collect();
    }

    let boundary = integer_sqrt(&BigInt::from(magnitude.clone()));
    let boundary = boundary.magnitude();
    let mut d = BigUint::from(2u32);
    while &d <= boundary {
        if (magnitude % &d).is_zero() {
            let cofactor = magnitude / &d;
            if cofactor != d {
                high.push(cofactor);
            }
            low.push(d.clone());
        }
        d += 1u32;
    }

    // Cofactors were found in descending order
    low.extend(high.into_iter().rev());
    low.into_iter().map(BigInt::from).collect()
}

/// Nearest multiple of `d` towards zero from `n`: `n - n % d` with a truncated
/// remainder.
pub fn nearest_multiple(n: &BigInt, d: &BigInt) -> Result<BigInt, NumberError> {
    if d.is_zero() {
        return Err(NumberError::ZeroDivisor);
    }
    Ok(n - n % d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn bigs(values: &[i64]) -> Vec<BigInt> {
        values.iter().map(|v| BigInt::from(*v)).collect()
    }

    #[test]
    fn test_divisors_of_twelve() {
        assert_eq!(divisors(&big(12)), bigs(&[1, 2, 3, 4, 6, 12]));
    }

    #[test]
    fn test_divisors_of_square() {
        assert_eq!(divisors(&big(36)), bigs(&[1, 2, 3, 4, 6, 9, 12, 18, 36]));
    }

    #[test]
    fn test_divisors_small_values() {
        assert_eq!(divisors(&big(0)), bigs(&[1]));
        assert_eq!(divisors(&big(1)), bigs(&[1]));
        assert_eq!(divisors(&big(2)), bigs(&[1, 2]));
        assert_eq!(divisors(&big(3)), bigs(&[1, 3]));
    }

    #[test]
    fn test_divisors_negative_uses_magnitude() {
        assert_eq!(divisors(&big(-10)), bigs(&[1, 2, 5, 10]));
    }

    #[test]
    fn test_proper_divisors() {
        assert_eq!(proper_divisors(&big(3)), bigs(&[1]));
        assert_eq!(proper_divisors(&big(4)), bigs(&[1, 2]));
        assert_eq!(proper_divisors(&big(28)), bigs(&[1, 2, 4, 7, 14]));
        assert_eq!(proper_divisors(&big(13)), bigs(&[1]));
    }

    #[test]
    fn test_nearest_multiple() {
        assert_eq!(nearest_multiple(&big(12), &big(5)).unwrap(), big(10));
        assert_eq!(nearest_multiple(&big(-12), &big(5)).unwrap(), big(-10));
        assert_eq!(nearest_multiple(&big(12), &big(0)), Err(NumberError::ZeroDivisor));
    }
}
