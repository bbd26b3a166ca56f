//! Divisor grid
//!
//! The grid lays out one row per divisor `d`, starting at the current level.
//! Each row is anchored at the nearest multiple of `d` to the key and walks
//! outwards in steps of `d` until it leaves the viewport:
//!
//! ```text
//! d = 1   … ■ ■ ■ ■ [key] ■ ■ ■ ■ …
//! d = 2   …  ■ · ■ · [■] · ■ · ■  …
//! d = 3   … ■ ·  ·  ■ ·  ·  ■ ·  …
//! ```
//!
//! - [`generator`]: [`BlockGenerator`], the explicit cursor producing [`Block`]s
//! - [`classify`]: highlight rules for a block (key, prime, power of two, divisor leg)
//! - [`scanner`]: steps the level until it lands on a divisor of the key

pub mod classify;
pub mod generator;
pub mod scanner;

pub use classify::{classify, Cell, Highlight};
pub use generator::{generate_blocks, BlockGenerator};
pub use scanner::{LevelScanner, ScanStart, ScanStep};

use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};
use thiserror::Error;

/// A computed grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    /// Value represented by the cell
    pub n: BigInt,
    /// Divisor of the row, always at least 1
    pub d: BigInt,
    pub x: f64,
    pub y: f64,
    /// Whether the row's divisor divides the key. Set once per row.
    pub is_divisor_of_key: bool,
    /// Column offset from the row's anchor (0), negative to the left
    pub step: i64,
    /// Cosmetic half-step tick between two columns
    pub is_midpoint: bool,
}

impl Block {
    fn midpoint_at(&self, x: f64) -> Self {
        Block {
            x,
            is_midpoint: true,
            ..self.clone()
        }
    }
}

/// Pixel extents bounding the enumeration.
///
/// `origin_x`/`origin_y` is where the key sits on the first row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
    pub block_width: f64,
    pub block_height: f64,
    pub origin_x: f64,
    pub origin_y: f64,
}

impl Viewport {
    /// Viewport with the key centered horizontally and the first row at `top`.
    pub fn centered(width: f64, height: f64, block_width: f64, block_height: f64, top: f64) -> Self {
        Viewport {
            width,
            height,
            block_width,
            block_height,
            origin_x: width * 0.5,
            origin_y: top,
        }
    }

    /// Number of divisor rows that fit below the origin.
    pub fn max_divisor_rows(&self) -> BigInt {
        if self.block_height <= 0.0 || !self.block_height.is_finite() {
            return BigInt::zero();
        }
        let rows = ((self.height - self.origin_y) / self.block_height).floor();
        if rows.is_finite() && rows > 0.0 {
            BigInt::from(rows as u64)
        } else {
            BigInt::zero()
        }
    }

    fn validate(&self) -> Result<(), GridError> {
        let valid = |size: f64| size.is_finite() && size > 0.0;
        if valid(self.block_width) && valid(self.block_height) {
            Ok(())
        } else {
            Err(GridError::InvalidBlockSize {
                width: self.block_width,
                height: self.block_height,
            })
        }
    }
}

/// Errors rejected before any row is enumerated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// The first divisor row must be at least 1
    #[error("level must be at least 1, got {level}")]
    InvalidLevel { level: String },

    #[error("block size must be positive, got {width}x{height}")]
    InvalidBlockSize { width: f64, height: f64 },
}

/// The key, level and leg currently on display.
///
/// Levels below 1 clamp to 1 and legs below 0 clamp to 0, so a `GridState` can
/// always be handed to the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    key: BigInt,
    level: BigInt,
    leg: u64,
}

impl GridState {
    pub fn new(key: BigInt, level: BigInt, leg: u64) -> Self {
        let mut state = GridState {
            key,
            level: BigInt::one(),
            leg,
        };
        state.set_level(level);
        state
    }

    pub fn key(&self) -> &BigInt {
        &self.key
    }

    pub fn level(&self) -> &BigInt {
        &self.level
    }

    pub fn leg(&self) -> u64 {
        self.leg
    }

    pub fn set_key(&mut self, key: BigInt) {
        self.key = key;
    }

    pub fn set_level(&mut self, level: BigInt) {
        self.level = if level < BigInt::one() {
            BigInt::one()
        } else {
            level
        };
    }

    /// Set the leg; negative values clamp to 0.
    pub fn set_leg(&mut self, leg: i64) {
        self.leg = leg.max(0) as u64;
    }

    pub fn nudge_key(&mut self, delta: i64) {
        self.key += delta;
    }

    pub fn nudge_level(&mut self, delta: i64) {
        let level = &self.level + delta;
        self.set_level(level);
    }

    pub fn nudge_leg(&mut self, delta: i64) {
        let leg = (self.leg as i64).saturating_add(delta);
        self.set_leg(leg);
    }

    /// Back to key 0, level 1, leg 0.
    pub fn reset(&mut self) {
        *self = GridState::default();
    }

    /// Enumerate the blocks for this state.
    pub fn blocks(&self, viewport: &Viewport) -> Result<BlockGenerator, GridError> {
        BlockGenerator::new(&self.key, &self.level, &viewport.max_divisor_rows(), viewport)
    }
}

impl Default for GridState {
    fn default() -> Self {
        GridState::new(BigInt::zero(), BigInt::one(), 0)
    }
}

/// Converts a (possibly huge) integer to a pixel multiplier.
///
/// Values beyond `f64` range saturate to ±∞, which places them off-screen.
pub(crate) fn to_pixels(n: &BigInt, size: f64) -> f64 {
    let value = n.to_f64().unwrap_or(if n.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    });
    value * size
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_clamps_to_one() {
        let mut state = GridState::new(BigInt::from(12), BigInt::from(-4), 0);
        assert_eq!(state.level(), &BigInt::one());

        state.nudge_level(3);
        assert_eq!(state.level(), &BigInt::from(4));

        state.nudge_level(-10);
        assert_eq!(state.level(), &BigInt::one());
    }

    #[test]
    fn test_leg_clamps_to_zero() {
        let mut state = GridState::default();
        state.set_leg(-3);
        assert_eq!(state.leg(), 0);
        state.nudge_leg(2);
        state.nudge_leg(-1);
        assert_eq!(state.leg(), 1);
    }

    #[test]
    fn test_reset_returns_to_origin() {
        let mut state = GridState::new(BigInt::from(99), BigInt::from(7), 3);
        state.reset();
        assert_eq!(state, GridState::default());
        assert!(state.key().is_zero());
    }

    #[test]
    fn test_max_divisor_rows() {
        let viewport = Viewport::centered(100.0, 42.0, 2.0, 1.0, 2.0);
        assert_eq!(viewport.max_divisor_rows(), BigInt::from(40));

        let cramped = Viewport::centered(100.0, 1.0, 2.0, 1.0, 2.0);
        assert!(cramped.max_divisor_rows().is_zero());
    }
}
