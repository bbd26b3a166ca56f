//! Command-line configuration
//!
//! [`Cli`] is the raw clap surface; [`Config::from_cli`] validates it into the
//! values the grid, the sequencer and the UI start from.

use crate::grid::GridState;
use crate::sequence::sequencer::{DEFAULT_FRAME_RATE, MAX_FRAME_RATE, MIN_FRAME_RATE};
use crate::sequence::{parse_integer_list, OeisId, SequenceError, SequenceKind, Sequencer};
use clap::{Parser, ValueEnum};
use num_bigint::BigInt;
use num_traits::One;
use std::path::PathBuf;
use thiserror::Error;

/// Terminal columns per grid unit
pub const DEFAULT_BLOCK_WIDTH: u16 = 3;
pub const MAX_BLOCK_WIDTH: u16 = 16;

/// Keys with more bits than this are only tested with the probable-prime test
/// and their divisors are not listed.
pub const EXACT_TEST_LIMIT_BITS: u64 = 32;

/// Environment variable holding the log filter
pub const LOG_ENV: &str = "KEYGRID_LOG";

/// How grid blocks are drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum BlockStyle {
    /// Row divisor of each block, or 0 for the block holding zero
    #[default]
    Digits,
    Circles,
    Squares,
}

#[derive(Debug, Parser)]
#[command(name = "keygrid")]
#[command(author, version, about = "Divisor grid for arbitrary-precision integers")]
pub struct Cli {
    /// Starting key
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub key: String,

    /// First divisor row
    #[arg(long, default_value = "1", allow_hyphen_values = true)]
    pub level: String,

    /// Column offset highlighted on divisor rows
    #[arg(long, default_value_t = 0)]
    pub leg: u64,

    /// Sequence driving the key
    #[arg(long, value_enum, default_value_t = SequenceKind::Collatz)]
    pub sequence: SequenceKind,

    /// Comma-separated integers for the custom sequence
    #[arg(long, allow_hyphen_values = true)]
    pub list: Option<String>,

    /// OEIS identifier for the external sequence (e.g. A000045)
    #[arg(long)]
    pub oeis: Option<String>,

    /// Steps per second while playing
    #[arg(long, default_value_t = DEFAULT_FRAME_RATE)]
    pub fps: u32,

    /// Terminal columns per grid unit
    #[arg(long, default_value_t = DEFAULT_BLOCK_WIDTH)]
    pub block_width: u16,

    #[arg(long, value_enum, default_value_t = BlockStyle::Digits)]
    pub style: BlockStyle,

    /// Write logs to this file
    #[arg(long)]
    pub log: Option<PathBuf>,

    /// Print this many keys of the sequence and exit instead of starting the UI
    #[arg(long)]
    pub take: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("--{flag} expects an integer, got '{value}'")]
    InvalidInteger { flag: &'static str, value: String },

    #[error("--level must be at least 1, got {level}")]
    LevelOutOfRange { level: BigInt },

    #[error("--fps must be between {} and {}, got {fps}", MIN_FRAME_RATE, MAX_FRAME_RATE)]
    FrameRateOutOfRange { fps: u32 },

    #[error("--block-width must be between 1 and {}, got {width}", MAX_BLOCK_WIDTH)]
    BlockWidthOutOfRange { width: u16 },

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

/// Validated start-up configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub key: BigInt,
    pub level: BigInt,
    pub leg: u64,
    pub sequence: SequenceKind,
    pub custom_list: String,
    pub oeis_id: String,
    pub frame_rate: u32,
    pub block_width: u16,
    pub style: BlockStyle,
    pub log_file: Option<PathBuf>,
    pub take: Option<usize>,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self, ConfigError> {
        let key = parse_flag("key", &cli.key)?;
        let level = parse_flag("level", &cli.level)?;
        if level < BigInt::one() {
            return Err(ConfigError::LevelOutOfRange { level });
        }
        if !(MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&cli.fps) {
            return Err(ConfigError::FrameRateOutOfRange { fps: cli.fps });
        }
        if !(1..=MAX_BLOCK_WIDTH).contains(&cli.block_width) {
            return Err(ConfigError::BlockWidthOutOfRange {
                width: cli.block_width,
            });
        }

        let custom_list = cli.list.unwrap_or_default();
        if !custom_list.is_empty() {
            parse_integer_list(&custom_list)?;
        }
        let oeis_id = match cli.oeis {
            Some(id) => OeisId::parse(&id)?.to_string(),
            None => String::new(),
        };

        Ok(Config {
            key,
            level,
            leg: cli.leg,
            sequence: cli.sequence,
            custom_list,
            oeis_id,
            frame_rate: cli.fps,
            block_width: cli.block_width,
            style: cli.style,
            log_file: cli.log,
            take: cli.take,
        })
    }

    pub fn grid_state(&self) -> GridState {
        GridState::new(self.key.clone(), self.level.clone(), self.leg)
    }

    /// A stopped sequencer with the configured kind, inputs and frame rate.
    pub fn sequencer(&self) -> Sequencer {
        let mut sequencer = Sequencer::new(self.sequence);
        sequencer.set_frame_rate(i64::from(self.frame_rate));
        sequencer.set_custom_list(self.custom_list.clone());
        sequencer.set_oeis_id(self.oeis_id.clone());
        sequencer
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            key: BigInt::from(0),
            level: BigInt::one(),
            leg: 0,
            sequence: SequenceKind::Collatz,
            custom_list: String::new(),
            oeis_id: String::new(),
            frame_rate: DEFAULT_FRAME_RATE,
            block_width: DEFAULT_BLOCK_WIDTH,
            style: BlockStyle::Digits,
            log_file: None,
            take: None,
        }
    }
}

fn parse_flag(flag: &'static str, value: &str) -> Result<BigInt, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidInteger {
            flag,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        let cli = Cli::try_parse_from(std::iter::once("keygrid").chain(args.iter().copied()))
            .expect("arguments should parse");
        Config::from_cli(cli)
    }

    #[test]
    fn test_defaults() {
        let config = parse(&[]).unwrap();
        assert_eq!(config.key, BigInt::from(0));
        assert_eq!(config.level, BigInt::one());
        assert_eq!(config.sequence, SequenceKind::Collatz);
        assert_eq!(config.frame_rate, 10);
        assert_eq!(config.style, BlockStyle::Digits);
        assert!(config.take.is_none());
    }

    #[test]
    fn test_negative_and_huge_keys() {
        let config = parse(&["--key", "-12"]).unwrap();
        assert_eq!(config.key, BigInt::from(-12));

        let huge = "1".repeat(60);
        let config = parse(&["--key", &huge]).unwrap();
        assert_eq!(config.key.to_string(), huge);
    }

    #[test]
    fn test_sequence_names() {
        let config = parse(&["--sequence", "collatz-root"]).unwrap();
        assert_eq!(config.sequence, SequenceKind::CollatzRoot);
        let config = parse(&["--sequence", "a037992"]).unwrap();
        assert_eq!(config.sequence, SequenceKind::OeisArithmeticA);
        let config = parse(&["--sequence", "oeis", "--oeis", "a000045"]).unwrap();
        assert_eq!(config.sequence, SequenceKind::ExternalList);
        assert_eq!(config.oeis_id, "A000045");
    }

    #[test]
    fn test_builds_configured_sequencer() {
        let config = parse(&["--sequence", "custom", "--list", "4, 8", "--fps", "30"]).unwrap();
        let mut sequencer = config.sequencer();
        assert_eq!(sequencer.kind(), SequenceKind::CustomList);
        assert_eq!(sequencer.frame_rate(), 30);
        assert_eq!(
            sequencer.step(&config.key).unwrap(),
            crate::sequence::Step::Emit(BigInt::from(4))
        );
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            parse(&["--key", "twelve"]),
            Err(ConfigError::InvalidInteger { flag: "key", .. })
        ));
        assert!(matches!(
            parse(&["--level", "0"]),
            Err(ConfigError::LevelOutOfRange { .. })
        ));
        assert!(matches!(
            parse(&["--fps", "61"]),
            Err(ConfigError::FrameRateOutOfRange { fps: 61 })
        ));
        assert!(matches!(
            parse(&["--block-width", "0"]),
            Err(ConfigError::BlockWidthOutOfRange { width: 0 })
        ));
        assert!(matches!(
            parse(&["--list", "1, x"]),
            Err(ConfigError::Sequence(SequenceError::MalformedEntry { .. }))
        ));
        assert!(matches!(
            parse(&["--oeis", "fib"]),
            Err(ConfigError::Sequence(SequenceError::InvalidIdentifier { .. }))
        ));
    }
}
