// keygrid: divisor grid visualizer driven by integer sequences

use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::info;

use keygrid::config::{Cli, Config};
use keygrid::logging::{self, LogTarget};
use keygrid::sequence::BuiltinCatalog;
use keygrid::ui::{App, Fetcher};

fn main() -> Result<()> {
    let config = Config::from_cli(Cli::parse())?;

    let target = LogTarget::select(config.log_file.clone(), config.take.is_some());
    logging::init(&target).context("failed to set up logging")?;

    match config.take {
        Some(count) => run_headless(&config, count),
        None => run_tui(&config),
    }
}

/// Print `count` keys of the configured sequence, one per line.
fn run_headless(config: &Config, count: usize) -> Result<()> {
    info!(sequence = config.sequence.label(), count, "running headless");
    let mut sequencer = config.sequencer();
    let keys = sequencer.take(&config.key, count, &BuiltinCatalog::new())?;

    let mut out = io::stdout().lock();
    for key in keys {
        writeln!(out, "{}", key)?;
    }
    Ok(())
}

fn run_tui(config: &Config) -> Result<()> {
    let mut app = App::new(config, Fetcher::spawn(BuiltinCatalog::new()));

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")
}
