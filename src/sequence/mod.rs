//! Integer sequences that drive the key
//!
//! Every variant is a small state machine sharing one contract ([`Generator`]):
//! `reset()` re-arms it, `next(key)` produces a [`Step`], and once a variant
//! reports finished it stays put until the next reset.
//!
//! - [`collatz`]: Collatz and the Collatz variant that takes square roots of evens
//! - [`recurrence`]: Pell and Fibonacci numbers
//! - [`arithmetic`]: OEIS A037992 and A193651
//! - [`clock`]: wall-clock seconds
//! - [`list`]: caller-supplied comma-separated lists
//! - [`external`]: lists resolved by an external collaborator, with explicit fetch state
//! - [`catalog`]: built-in collaborator answering for a handful of OEIS identifiers
//! - [`sequencer`]: the driver-side selection, play state and frame rate
//!
//! [`Sequence`] is the closed union over all nine variants.

pub mod arithmetic;
pub mod catalog;
pub mod clock;
pub mod collatz;
pub mod external;
pub mod list;
pub mod recurrence;
pub mod sequencer;

pub use arithmetic::{A037992, A193651};
pub use catalog::{BuiltinCatalog, SequenceSource};
pub use clock::WallClockSeconds;
pub use collatz::{Collatz, EvenRule};
pub use external::{ExternalList, FetchError, FetchState, FetchTicket, OeisId, Resolved};
pub use list::{parse_integer_list, CustomList};
pub use recurrence::Recurrence;
pub use sequencer::Sequencer;

use num_bigint::BigInt;
use std::fmt;
use thiserror::Error;

/// Outcome of advancing a sequence by one step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    /// The next key
    Emit(BigInt),
    /// No further values until reset
    Finished,
    /// Waiting on an external fetch; nothing advanced
    Loading,
    /// The driver must reset all sequencer state
    Restart,
}

/// Input rejected while advancing a sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// An entry of a custom list is not an integer; the whole list is rejected
    #[error("entry {index} ('{entry}') is not an integer")]
    MalformedEntry { index: usize, entry: String },

    #[error("'{identifier}' is not an OEIS identifier (expected a letter and six digits, e.g. A000045)")]
    InvalidIdentifier { identifier: String },

    /// The collaborator could not provide the sequence
    #[error("sequence {id} is unavailable: {reason}")]
    Unavailable { id: String, reason: String },
}

/// Iteration counter and terminal flag shared by every variant
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Progress {
    iteration: u64,
    finished: bool,
}

impl Progress {
    pub fn iteration(&self) -> u64 {
        self.iteration
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub(crate) fn advance(&mut self) {
        self.iteration += 1;
    }

    pub(crate) fn finish(&mut self) {
        self.finished = true;
    }

    pub(crate) fn reset(&mut self) {
        *self = Progress::default();
    }
}

/// State-machine contract shared by all sequence variants.
pub trait Generator {
    /// Back to the initial state: iteration 0, not finished.
    fn reset(&mut self);

    /// Advance by one step. `key` is the key currently on display; only the
    /// Collatz variants read it.
    fn next(&mut self, key: &BigInt) -> Result<Step, SequenceError>;

    fn progress(&self) -> &Progress;

    fn is_finished(&self) -> bool {
        self.progress().is_finished()
    }

    fn iteration(&self) -> u64 {
        self.progress().iteration()
    }
}

/// Tags for the nine sequence variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SequenceKind {
    Collatz,
    CollatzRoot,
    Pell,
    Fibonacci,
    #[value(name = "a193651")]
    OeisArithmeticB,
    #[value(name = "a037992")]
    OeisArithmeticA,
    #[value(name = "time")]
    WallClockSeconds,
    #[value(name = "oeis")]
    ExternalList,
    #[value(name = "custom")]
    CustomList,
}

impl SequenceKind {
    /// Selection order
    pub const ALL: [SequenceKind; 9] = [
        SequenceKind::Collatz,
        SequenceKind::CollatzRoot,
        SequenceKind::Pell,
        SequenceKind::Fibonacci,
        SequenceKind::OeisArithmeticB,
        SequenceKind::OeisArithmeticA,
        SequenceKind::WallClockSeconds,
        SequenceKind::ExternalList,
        SequenceKind::CustomList,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SequenceKind::Collatz => "collatz",
            SequenceKind::CollatzRoot => "collatz-sqrt",
            SequenceKind::Pell => "pell numbers",
            SequenceKind::Fibonacci => "fibonacci",
            SequenceKind::OeisArithmeticB => "A193651",
            SequenceKind::OeisArithmeticA => "A037992",
            SequenceKind::WallClockSeconds => "time (seconds)",
            SequenceKind::ExternalList => "oeis.org a-number",
            SequenceKind::CustomList => "custom",
        }
    }

    /// Next kind in selection order, wrapping around
    pub fn next(self) -> Self {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + 1) % Self::ALL.len()]
    }

    /// Previous kind in selection order, wrapping around
    pub fn prev(self) -> Self {
        let index = Self::ALL.iter().position(|k| *k == self).unwrap_or(0);
        Self::ALL[(index + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One live sequence instance
#[derive(Debug, Clone)]
pub enum Sequence {
    Collatz(Collatz),
    CollatzRoot(Collatz),
    Pell(Recurrence),
    Fibonacci(Recurrence),
    OeisArithmeticA(A037992),
    OeisArithmeticB(A193651),
    WallClockSeconds(WallClockSeconds),
    CustomList(CustomList),
    ExternalList(ExternalList),
}

impl Sequence {
    /// A fresh instance of `kind`. List variants start with empty input.
    pub fn new(kind: SequenceKind) -> Self {
        match kind {
            SequenceKind::Collatz => Sequence::Collatz(Collatz::new(EvenRule::Halve)),
            SequenceKind::CollatzRoot => Sequence::CollatzRoot(Collatz::new(EvenRule::Root)),
            SequenceKind::Pell => Sequence::Pell(Recurrence::pell()),
            SequenceKind::Fibonacci => Sequence::Fibonacci(Recurrence::fibonacci()),
            SequenceKind::OeisArithmeticA => Sequence::OeisArithmeticA(A037992::new()),
            SequenceKind::OeisArithmeticB => Sequence::OeisArithmeticB(A193651::new()),
            SequenceKind::WallClockSeconds => {
                Sequence::WallClockSeconds(WallClockSeconds::default())
            }
            SequenceKind::CustomList => Sequence::CustomList(CustomList::new("")),
            SequenceKind::ExternalList => Sequence::ExternalList(ExternalList::new("")),
        }
    }

    pub fn kind(&self) -> SequenceKind {
        match self {
            Sequence::Collatz(_) => SequenceKind::Collatz,
            Sequence::CollatzRoot(_) => SequenceKind::CollatzRoot,
            Sequence::Pell(_) => SequenceKind::Pell,
            Sequence::Fibonacci(_) => SequenceKind::Fibonacci,
            Sequence::OeisArithmeticA(_) => SequenceKind::OeisArithmeticA,
            Sequence::OeisArithmeticB(_) => SequenceKind::OeisArithmeticB,
            Sequence::WallClockSeconds(_) => SequenceKind::WallClockSeconds,
            Sequence::CustomList(_) => SequenceKind::CustomList,
            Sequence::ExternalList(_) => SequenceKind::ExternalList,
        }
    }

    /// OEIS page for the sequence, where one exists
    pub fn link(&self) -> Option<String> {
        let id = match self {
            Sequence::Pell(_) => "A000129",
            Sequence::Fibonacci(_) => "A000045",
            Sequence::OeisArithmeticA(_) => "A037992",
            Sequence::OeisArithmeticB(_) => "A193651",
            Sequence::ExternalList(list) => return list.link(),
            _ => return None,
        };
        Some(format!("https://oeis.org/{}", id))
    }

    fn generator(&self) -> &dyn Generator {
        match self {
            Sequence::Collatz(s) | Sequence::CollatzRoot(s) => s,
            Sequence::Pell(s) | Sequence::Fibonacci(s) => s,
            Sequence::OeisArithmeticA(s) => s,
            Sequence::OeisArithmeticB(s) => s,
            Sequence::WallClockSeconds(s) => s,
            Sequence::CustomList(s) => s,
            Sequence::ExternalList(s) => s,
        }
    }

    fn generator_mut(&mut self) -> &mut dyn Generator {
        match self {
            Sequence::Collatz(s) | Sequence::CollatzRoot(s) => s,
            Sequence::Pell(s) | Sequence::Fibonacci(s) => s,
            Sequence::OeisArithmeticA(s) => s,
            Sequence::OeisArithmeticB(s) => s,
            Sequence::WallClockSeconds(s) => s,
            Sequence::CustomList(s) => s,
            Sequence::ExternalList(s) => s,
        }
    }
}

impl Generator for Sequence {
    fn reset(&mut self) {
        self.generator_mut().reset();
    }

    fn next(&mut self, key: &BigInt) -> Result<Step, SequenceError> {
        self.generator_mut().next(key)
    }

    fn progress(&self) -> &Progress {
        self.generator().progress()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trips_through_instance() {
        for kind in SequenceKind::ALL {
            assert_eq!(Sequence::new(kind).kind(), kind);
        }
    }

    #[test]
    fn test_kind_cycles() {
        assert_eq!(SequenceKind::Collatz.next(), SequenceKind::CollatzRoot);
        assert_eq!(SequenceKind::CustomList.next(), SequenceKind::Collatz);
        assert_eq!(SequenceKind::Collatz.prev(), SequenceKind::CustomList);
    }

    #[test]
    fn test_links() {
        assert_eq!(
            Sequence::new(SequenceKind::Pell).link().as_deref(),
            Some("https://oeis.org/A000129")
        );
        assert_eq!(Sequence::new(SequenceKind::Collatz).link(), None);
    }

    #[test]
    fn test_reset_through_union() {
        let mut sequence = Sequence::new(SequenceKind::Fibonacci);
        let key = BigInt::from(0);
        for _ in 0..4 {
            sequence.next(&key).unwrap();
        }
        assert_eq!(sequence.iteration(), 4);
        sequence.reset();
        assert_eq!(sequence.iteration(), 0);
        assert!(!sequence.is_finished());
    }
}
