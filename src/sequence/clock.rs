//! Wall-clock seconds

use super::{Generator, Progress, SequenceError, Step};
use num_bigint::BigInt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of the current time in whole seconds
pub type Clock = fn() -> u64;

/// Seconds since the Unix epoch, or 0 if the system clock is before it.
pub fn unix_seconds() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_secs())
        .unwrap_or(0)
}

/// Emits the current time on every step. Stateless and never finishes.
#[derive(Debug, Clone)]
pub struct WallClockSeconds {
    clock: Clock,
    progress: Progress,
}

impl WallClockSeconds {
    pub fn with_clock(clock: Clock) -> Self {
        WallClockSeconds {
            clock,
            progress: Progress::default(),
        }
    }
}

impl Default for WallClockSeconds {
    fn default() -> Self {
        Self::with_clock(unix_seconds)
    }
}

impl Generator for WallClockSeconds {
    fn reset(&mut self) {}

    fn next(&mut self, _key: &BigInt) -> Result<Step, SequenceError> {
        Ok(Step::Emit(BigInt::from((self.clock)())))
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }
}
