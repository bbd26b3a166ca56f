//! Collatz-style sequences
//!
//! Both variants read the current key instead of keeping their own value: an
//! odd key `k` becomes `3k + 1` (or `3k - 1` when negative), an even key is
//! either halved or replaced by its integer square root. Reaching `±1`
//! finishes the sequence.

use super::{Generator, Progress, SequenceError, Step};
use crate::number::integer_sqrt;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use tracing::debug;

/// What happens to an even key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvenRule {
    /// `k / 2`
    Halve,
    /// `isqrt(k)`
    Root,
}

#[derive(Debug, Clone)]
pub struct Collatz {
    rule: EvenRule,
    progress: Progress,
}

impl Collatz {
    pub fn new(rule: EvenRule) -> Self {
        Collatz {
            rule,
            progress: Progress::default(),
        }
    }

    pub fn rule(&self) -> EvenRule {
        self.rule
    }

    fn successor(&self, key: &BigInt) -> BigInt {
        if key.is_even() {
            match self.rule {
                EvenRule::Halve => key / 2,
                EvenRule::Root => integer_sqrt(key),
            }
        } else if key.is_negative() {
            key * 3 - 1
        } else {
            key * 3 + 1
        }
    }
}

impl Generator for Collatz {
    fn reset(&mut self) {
        self.progress.reset();
    }

    fn next(&mut self, key: &BigInt) -> Result<Step, SequenceError> {
        if self.progress.is_finished() {
            return Ok(Step::Finished);
        }
        // 0 is a fixed point of both rules
        if key.is_zero() {
            debug!("collatz reached 0, requesting restart");
            return Ok(Step::Restart);
        }

        let value = self.successor(key);
        self.progress.advance();
        if value.abs().is_one() {
            debug!(steps = self.progress.iteration(), "collatz reached 1");
            self.progress.finish();
        }
        Ok(Step::Emit(value))
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn emitted(step: Step) -> BigInt {
        match step {
            Step::Emit(value) => value,
            other => panic!("expected a value, got {:?}", other),
        }
    }

    #[test]
    fn test_collatz_from_six() {
        let mut collatz = Collatz::new(EvenRule::Halve);
        let mut key = big(6);
        let mut seen = Vec::new();
        while !collatz.is_finished() {
            key = emitted(collatz.next(&key).unwrap());
            seen.push(key.clone());
        }
        assert_eq!(seen, vec![big(3), big(10), big(5), big(16), big(8), big(4), big(2), big(1)]);
        assert_eq!(collatz.iteration(), 8);
        assert_eq!(collatz.next(&key).unwrap(), Step::Finished);
        assert_eq!(collatz.iteration(), 8);
    }

    #[test]
    fn test_negative_odd_uses_minus_one() {
        let mut collatz = Collatz::new(EvenRule::Halve);
        assert_eq!(collatz.next(&big(-3)).unwrap(), Step::Emit(big(-10)));
        assert_eq!(collatz.next(&big(-10)).unwrap(), Step::Emit(big(-5)));
    }

    #[test]
    fn test_negative_one_finishes() {
        let mut collatz = Collatz::new(EvenRule::Halve);
        assert_eq!(collatz.next(&big(-2)).unwrap(), Step::Emit(big(-1)));
        assert!(collatz.is_finished());
    }

    #[test]
    fn test_zero_requests_restart() {
        let mut collatz = Collatz::new(EvenRule::Root);
        assert_eq!(collatz.next(&big(0)).unwrap(), Step::Restart);
        assert_eq!(collatz.iteration(), 0);
    }

    #[test]
    fn test_root_rule() {
        let mut collatz = Collatz::new(EvenRule::Root);
        assert_eq!(collatz.next(&big(16)).unwrap(), Step::Emit(big(4)));
        assert_eq!(collatz.next(&big(4)).unwrap(), Step::Emit(big(2)));
        assert_eq!(collatz.next(&big(2)).unwrap(), Step::Emit(big(1)));
        assert!(collatz.is_finished());

        let mut odd = Collatz::new(EvenRule::Root);
        assert_eq!(odd.next(&big(5)).unwrap(), Step::Emit(big(16)));
    }

    #[test]
    fn test_reset_rearms() {
        let mut collatz = Collatz::new(EvenRule::Halve);
        collatz.next(&big(2)).unwrap();
        assert!(collatz.is_finished());
        collatz.reset();
        assert!(!collatz.is_finished());
        assert_eq!(collatz.next(&big(4)).unwrap(), Step::Emit(big(2)));
    }
}
