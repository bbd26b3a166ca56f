//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`grid`]: the divisor grid, laid out on a character canvas
//! - [`info`]: key facts (primality, divisors) and sequence state
//! - [`status`]: status bar with keybindings and the current mode
//! - [`input`]: prompt overlay for typed input
//!
//! Each pane exports a primary `render_*` function that draws from borrowed
//! state and keeps none of its own.

pub mod grid;
pub mod info;
pub mod input;
pub mod status;

pub use grid::{layout_grid, render_grid_pane, Canvas, Glyph};
pub use info::{render_info_pane, KeyFacts, Primality};
pub use input::render_input_prompt;
pub use status::{render_status_bar, Mode};
