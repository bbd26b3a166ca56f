//! Highlight rules for grid blocks
//!
//! Rules are applied in order and later rules win:
//! 1. every block starts [`Highlight::Plain`]
//! 2. a non-midpoint block holding the key becomes [`Highlight::Key`]
//! 3. on the `d = 1` row a likely prime becomes [`Highlight::Prime`], otherwise a
//!    power of two becomes [`Highlight::PowerOfTwo`]; both get a header label
//! 4. a non-midpoint block on a divisor row whose step is `0` or `±leg`
//!    becomes [`Highlight::Divisor`]

use super::Block;
use crate::number::{is_likely_prime, is_power_of_two};
use num_bigint::BigInt;
use num_traits::One;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Highlight {
    Plain,
    Key,
    Prime,
    PowerOfTwo,
    Divisor,
}

/// Rendering decision for one block
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub highlight: Highlight,
    /// Value to print in the header row above the grid, if any
    pub label: Option<BigInt>,
    pub is_midpoint: bool,
}

pub fn classify(block: &Block, key: &BigInt, leg: u64) -> Cell {
    let mut highlight = Highlight::Plain;
    let mut label = None;

    if !block.is_midpoint && &block.n == key {
        highlight = Highlight::Key;
    }

    if block.d.is_one() {
        if is_likely_prime(&block.n) {
            highlight = Highlight::Prime;
            label = Some(block.n.clone());
        } else if is_power_of_two(&block.n) {
            highlight = Highlight::PowerOfTwo;
            label = Some(block.n.clone());
        }
    }

    let on_leg = block.step == 0 || block.step.unsigned_abs() == leg;
    if on_leg && block.is_divisor_of_key && !block.is_midpoint {
        highlight = Highlight::Divisor;
    }

    Cell {
        highlight,
        label,
        is_midpoint: block.is_midpoint,
    }
}
