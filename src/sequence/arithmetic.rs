//! Product-driven OEIS sequences

use super::{Generator, Progress, SequenceError, Step};
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// OEIS A037992: smallest number with 2^n divisors.
///
/// Multiplies the running product by the smallest integer that does not yet
/// divide it: 1, 2, 6, 24, 120, 840, 7560, …
#[derive(Debug, Clone)]
pub struct A037992 {
    factor: BigInt,
    product: BigInt,
    progress: Progress,
}

impl A037992 {
    pub fn new() -> Self {
        A037992 {
            factor: BigInt::one(),
            product: BigInt::one(),
            progress: Progress::default(),
        }
    }

    pub fn advance(&mut self) -> BigInt {
        self.product *= &self.factor;
        while (&self.product % &self.factor).is_zero() {
            self.factor += 1u32;
        }
        self.progress.advance();
        self.product.clone()
    }
}

impl Default for A037992 {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for A037992 {
    fn reset(&mut self) {
        *self = A037992::new();
    }

    fn next(&mut self, _key: &BigInt) -> Result<Step, SequenceError> {
        Ok(Step::Emit(self.advance()))
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }
}

/// OEIS A193651: `ceil(p / 2)` where `p` is the product of the first n odd numbers.
///
/// 1, 2, 8, 53, 473, …
#[derive(Debug, Clone)]
pub struct A193651 {
    odd: BigInt,
    product: BigInt,
    progress: Progress,
}

impl A193651 {
    pub fn new() -> Self {
        A193651 {
            odd: BigInt::one(),
            product: BigInt::one(),
            progress: Progress::default(),
        }
    }

    pub fn advance(&mut self) -> BigInt {
        self.product *= &self.odd;
        self.odd += 2u32;
        self.progress.advance();
        &self.product - (&self.product / 2u32)
    }
}

impl Default for A193651 {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator for A193651 {
    fn reset(&mut self) {
        *self = A193651::new();
    }

    fn next(&mut self, _key: &BigInt) -> Result<Step, SequenceError> {
        Ok(Step::Emit(self.advance()))
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }
}
