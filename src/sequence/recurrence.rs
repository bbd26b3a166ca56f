//! Second-order linear recurrences seeded with 0, 1
//!
//! | Variant   | Rule                    | OEIS    |
//! |-----------|-------------------------|---------|
//! | Pell      | `a(n) = 2a(n-1) + a(n-2)` | A000129 |
//! | Fibonacci | `a(n) = a(n-1) + a(n-2)`  | A000045 |

use super::{Generator, Progress, SequenceError, Step};
use num_bigint::BigInt;
use num_traits::Zero;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    Pell,
    Fibonacci,
}

/// Two-term recurrence that ignores the key
#[derive(Debug, Clone)]
pub struct Recurrence {
    rule: Rule,
    previous: BigInt,
    current: BigInt,
    progress: Progress,
}

impl Recurrence {
    pub fn pell() -> Self {
        Self::with_rule(Rule::Pell)
    }

    pub fn fibonacci() -> Self {
        Self::with_rule(Rule::Fibonacci)
    }

    fn with_rule(rule: Rule) -> Self {
        Recurrence {
            rule,
            previous: BigInt::zero(),
            current: BigInt::zero(),
            progress: Progress::default(),
        }
    }

    /// Produce the next term directly.
    pub fn advance(&mut self) -> BigInt {
        let value = match self.progress.iteration() {
            i @ (0 | 1) => BigInt::from(i),
            _ => match self.rule {
                Rule::Pell => &self.current * 2u32 + &self.previous,
                Rule::Fibonacci => &self.current + &self.previous,
            },
        };
        self.previous = std::mem::replace(&mut self.current, value.clone());
        self.progress.advance();
        value
    }
}

impl Generator for Recurrence {
    fn reset(&mut self) {
        self.previous = BigInt::zero();
        self.current = BigInt::zero();
        self.progress.reset();
    }

    fn next(&mut self, _key: &BigInt) -> Result<Step, SequenceError> {
        Ok(Step::Emit(self.advance()))
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first(mut recurrence: Recurrence, count: usize) -> Vec<BigInt> {
        (0..count).map(|_| recurrence.advance()).collect()
    }

    fn bigs(values: &[i64]) -> Vec<BigInt> {
        values.iter().copied().map(BigInt::from).collect()
    }

    #[test]
    fn test_pell_numbers() {
        assert_eq!(
            first(Recurrence::pell(), 8),
            bigs(&[0, 1, 2, 5, 12, 29, 70, 169])
        );
    }

    #[test]
    fn test_fibonacci_numbers() {
        assert_eq!(
            first(Recurrence::fibonacci(), 10),
            bigs(&[0, 1, 1, 2, 3, 5, 8, 13, 21, 34])
        );
    }

    #[test]
    fn test_fibonacci_grows_past_u64() {
        let mut fib = Recurrence::fibonacci();
        let mut last = BigInt::zero();
        for _ in 0..=100 {
            last = fib.advance();
        }
        assert_eq!(last.to_string(), "354224848179261915075");
    }

    #[test]
    fn test_reset_mid_stream() {
        let mut pell = Recurrence::pell();
        let key = BigInt::zero();
        for _ in 0..5 {
            pell.next(&key).unwrap();
        }
        pell.reset();
        assert_eq!(first(pell, 3), bigs(&[0, 1, 2]));
    }

    #[test]
    fn test_never_finishes() {
        let mut fib = Recurrence::fibonacci();
        for _ in 0..200 {
            fib.advance();
        }
        assert!(!fib.is_finished());
        assert_eq!(fib.iteration(), 200);
    }
}
