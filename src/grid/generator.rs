//! Row-by-row block enumeration
//!
//! [`BlockGenerator`] is an explicit cursor: every call to `next()` yields one
//! [`Block`] and the walk state lives in the struct, so enumeration can stop at
//! any point without recomputing the rows already produced.
//!
//! Per row `d`, starting at the level:
//! 1. `remainder = key % d`, anchor `key - remainder`
//! 2. walk left from the anchor while `x > 0`, with two midpoints per step when `d > 1`
//! 3. walk right from `anchor + d` while `x < width`, with one midpoint per step when `d > 1`
//! 4. move down one block height and continue with `d + 1`

use super::{to_pixels, Block, GridError, Viewport};
use num_bigint::BigInt;
use num_traits::{One, Zero};

/// Where the cursor is within the current row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Left,
    LeftMidpointBefore,
    LeftMidpointAfter,
    Right,
    RightMidpoint,
    Done,
}

/// Lazy, finite enumeration of the grid for one (key, level, viewport).
#[derive(Debug, Clone)]
pub struct BlockGenerator {
    key: BigInt,
    viewport: Viewport,
    /// Divisor of the current row
    divisor: BigInt,
    /// First divisor past the last row
    end: BigInt,
    row_y: f64,
    stride: f64,
    anchor: BigInt,
    anchor_x: f64,
    cursor: Block,
    phase: Phase,
}

impl BlockGenerator {
    /// Start enumerating `rows` divisor rows from `level`.
    ///
    /// `level` must be at least 1; `rows ≤ 0` produces an empty sequence.
    pub fn new(
        key: &BigInt,
        level: &BigInt,
        rows: &BigInt,
        viewport: &Viewport,
    ) -> Result<Self, GridError> {
        if level < &BigInt::one() {
            return Err(GridError::InvalidLevel {
                level: level.to_string(),
            });
        }
        viewport.validate()?;

        let mut generator = BlockGenerator {
            key: key.clone(),
            viewport: *viewport,
            divisor: level.clone(),
            end: level + rows,
            row_y: viewport.origin_y,
            stride: 0.0,
            anchor: BigInt::zero(),
            anchor_x: 0.0,
            cursor: Block {
                n: BigInt::zero(),
                d: level.clone(),
                x: 0.0,
                y: viewport.origin_y,
                is_divisor_of_key: false,
                step: 0,
                is_midpoint: false,
            },
            phase: Phase::Done,
        };
        generator.start_row();
        Ok(generator)
    }

    /// Divisor of the row currently being walked.
    pub fn current_divisor(&self) -> &BigInt {
        &self.divisor
    }

    fn start_row(&mut self) {
        if self.divisor >= self.end {
            self.phase = Phase::Done;
            return;
        }

        let remainder = &self.key % &self.divisor;
        let offset = to_pixels(&remainder, self.viewport.block_width);

        self.stride = to_pixels(&self.divisor, self.viewport.block_width);
        self.anchor = &self.key - &remainder;
        self.anchor_x = self.viewport.origin_x - offset;
        self.cursor = Block {
            n: self.anchor.clone(),
            d: self.divisor.clone(),
            x: self.anchor_x,
            y: self.row_y,
            is_divisor_of_key: remainder.is_zero(),
            step: 0,
            is_midpoint: false,
        };
        self.phase = Phase::Left;
    }

    fn start_right_walk(&mut self) {
        self.cursor.n = &self.anchor + &self.divisor;
        self.cursor.x = self.anchor_x + self.stride;
        self.cursor.step = 1;
        self.phase = Phase::Right;
    }

    fn next_row(&mut self) {
        self.divisor += 1u32;
        self.row_y += self.viewport.block_height;
        self.start_row();
    }

    fn step_left(&mut self) {
        self.cursor.n -= &self.divisor;
        self.cursor.x -= self.stride;
        self.cursor.step -= 1;
        self.phase = Phase::Left;
    }

    fn step_right(&mut self) {
        self.cursor.n += &self.divisor;
        self.cursor.x += self.stride;
        self.cursor.step += 1;
        self.phase = Phase::Right;
    }

    fn has_midpoints(&self) -> bool {
        self.divisor > BigInt::one()
    }
}

impl Iterator for BlockGenerator {
    type Item = Block;

    fn next(&mut self) -> Option<Block> {
        loop {
            match self.phase {
                Phase::Done => return None,
                Phase::Left => {
                    if self.cursor.x > 0.0 {
                        let block = self.cursor.clone();
                        if self.has_midpoints() {
                            self.phase = Phase::LeftMidpointBefore;
                        } else {
                            self.step_left();
                        }
                        return Some(block);
                    }
                    self.start_right_walk();
                }
                Phase::LeftMidpointBefore => {
                    self.phase = Phase::LeftMidpointAfter;
                    return Some(self.cursor.midpoint_at(self.cursor.x - self.stride / 2.0));
                }
                Phase::LeftMidpointAfter => {
                    let block = self.cursor.midpoint_at(self.cursor.x + self.stride / 2.0);
                    self.step_left();
                    return Some(block);
                }
                Phase::Right => {
                    if self.cursor.x < self.viewport.width {
                        let block = self.cursor.clone();
                        if self.has_midpoints() {
                            self.phase = Phase::RightMidpoint;
                        } else {
                            self.step_right();
                        }
                        return Some(block);
                    }
                    self.next_row();
                }
                Phase::RightMidpoint => {
                    let block = self.cursor.midpoint_at(self.cursor.x + self.stride / 2.0);
                    self.step_right();
                    return Some(block);
                }
            }
        }
    }
}

/// Materialize every block for one (key, level, rows, viewport).
pub fn generate_blocks(
    key: &BigInt,
    level: &BigInt,
    rows: &BigInt,
    viewport: &Viewport,
) -> Result<Vec<Block>, GridError> {
    Ok(BlockGenerator::new(key, level, rows, viewport)?.collect())
}
