//! # Introduction
//!
//! keygrid draws the divisor grid of an arbitrary-precision integer, the
//! *key*, and lets integer sequences drive the key from one frame to the
//! next.  Row `d` of the grid holds the multiples of `d` around the key, so
//! the rows whose anchor lands exactly on the key are its divisors.
//!
//! ## Pipeline
//!
//! ```text
//! Sequence → key → BlockGenerator → classify → TUI
//! ```
//!
//! 1. [`number`]: primality, integer roots, modular powers and divisors on
//!    `BigInt`.
//! 2. [`grid`]: the lazy [`grid::BlockGenerator`] enumerating grid cells row
//!    by row, the highlight rules and the level scanner.
//! 3. [`sequence`]: nine sequence state machines behind one
//!    [`sequence::Sequence`] union, the [`sequence::Sequencer`] that drives
//!    them, and the built-in OEIS catalog.
//! 4. [`config`] and [`logging`]: command line and tracing setup.
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//!
//! ## Sequences
//!
//! Collatz, Collatz with square roots, Pell numbers, Fibonacci numbers,
//! A193651, A037992, wall-clock seconds, an OEIS A-number and a custom list.

pub mod config;
pub mod grid;
pub mod logging;
pub mod number;
pub mod sequence;
pub mod ui;
