//! Level scanning
//!
//! The scanner walks the level upwards one divisor at a time and stops on the
//! next level that divides the key. Once the level reaches `|key|` the scan is
//! exhausted; starting again rewinds to level 1.

use num_bigint::BigInt;
use num_traits::{One, Signed, Zero};
use tracing::debug;

/// Outcome of [`LevelScanner::start`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanStart {
    /// Ticks will advance the level
    Started,
    /// The previous scan was exhausted; the level should go back to 1
    Rewound,
}

/// Outcome of one [`LevelScanner::tick`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStep {
    /// Not scanning
    Idle,
    /// Moved to a level that does not divide the key
    Advanced(BigInt),
    /// Stopped on a level that divides the key
    Found(BigInt),
    /// Reached `|key|`; the next start rewinds
    Exhausted(BigInt),
}

#[derive(Debug, Clone)]
pub struct LevelScanner {
    level: BigInt,
    scanning: bool,
    finished: bool,
}

impl LevelScanner {
    pub fn new() -> Self {
        LevelScanner {
            level: BigInt::one(),
            scanning: false,
            finished: false,
        }
    }

    /// Begin scanning from `level`.
    ///
    /// Level 1, or a level already at or past `|key|`, restarts from 1.
    pub fn start(&mut self, level: &BigInt, key: &BigInt) -> ScanStart {
        if self.finished {
            self.reset();
            return ScanStart::Rewound;
        }

        let n = key.abs();
        self.level = if level.is_one() || level >= &n {
            BigInt::one()
        } else {
            level.clone()
        };
        self.scanning = true;
        debug!(level = %self.level, key = %key, "level scan started");
        ScanStart::Started
    }

    pub fn tick(&mut self, key: &BigInt) -> ScanStep {
        if !self.scanning {
            return ScanStep::Idle;
        }

        let n = key.abs();
        self.level += 1u32;

        if self.level >= n {
            self.finished = true;
            self.scanning = false;
            return ScanStep::Exhausted(self.level.clone());
        }

        if (&n % &self.level).is_zero() {
            self.scanning = false;
            return ScanStep::Found(self.level.clone());
        }

        ScanStep::Advanced(self.level.clone())
    }

    /// Stop an active scan. Returns whether one was running.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.scanning, false)
    }

    pub fn reset(&mut self) {
        self.scanning = false;
        self.finished = false;
        self.level = BigInt::one();
    }

    /// Level the scan is currently on
    pub fn level(&self) -> &BigInt {
        &self.level
    }

    pub fn is_scanning(&self) -> bool {
        self.scanning
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

impl Default for LevelScanner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn test_scan_stops_on_next_divisor() {
        let mut scanner = LevelScanner::new();
        assert_eq!(scanner.start(&big(1), &big(15)), ScanStart::Started);
        assert_eq!(scanner.tick(&big(15)), ScanStep::Advanced(big(2)));
        assert_eq!(scanner.tick(&big(15)), ScanStep::Found(big(3)));
        assert!(!scanner.is_scanning());
        assert_eq!(scanner.tick(&big(15)), ScanStep::Idle);

        scanner.start(&big(3), &big(15));
        assert_eq!(scanner.tick(&big(15)), ScanStep::Advanced(big(4)));
        assert_eq!(scanner.tick(&big(15)), ScanStep::Found(big(5)));
    }

    #[test]
    fn test_scan_exhausts_on_prime_and_rewinds() {
        let mut scanner = LevelScanner::new();
        scanner.start(&big(1), &big(-5));
        assert_eq!(scanner.tick(&big(-5)), ScanStep::Advanced(big(2)));
        assert_eq!(scanner.tick(&big(-5)), ScanStep::Advanced(big(3)));
        assert_eq!(scanner.tick(&big(-5)), ScanStep::Advanced(big(4)));
        assert_eq!(scanner.tick(&big(-5)), ScanStep::Exhausted(big(5)));
        assert!(scanner.is_finished());

        assert_eq!(scanner.start(&big(5), &big(-5)), ScanStart::Rewound);
        assert!(!scanner.is_finished());
        assert!(!scanner.is_scanning());
    }

    #[test]
    fn test_level_past_key_restarts_from_one() {
        let mut scanner = LevelScanner::new();
        scanner.start(&big(40), &big(12));
        assert_eq!(scanner.tick(&big(12)), ScanStep::Found(big(2)));
    }

    #[test]
    fn test_stop_reports_activity() {
        let mut scanner = LevelScanner::default();
        assert!(!scanner.stop());
        scanner.start(&big(1), &big(100));
        assert!(scanner.stop());
        assert_eq!(scanner.tick(&big(100)), ScanStep::Idle);
    }
}
