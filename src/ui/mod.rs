//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, play and scan timing, prompts
//! - **[`panes`]**: stateless render functions for each visible pane (grid, info,
//!   status bar, input prompt)
//! - **[`fetcher`]**: background worker answering OEIS fetch tickets
//! - **[`theme`]**: centralized color palette used by all panes
//!
//! The entry point for consumers is [`App`]: construct it from a [`Config`] and a
//! [`Fetcher`] and call [`App::run`] to start the event loop.
//!
//! [`Config`]: crate::config::Config
//! [`App::run`]: app::App::run

pub mod app;
pub mod fetcher;
pub mod panes;
pub mod theme;

pub use app::App;
pub use fetcher::Fetcher;
