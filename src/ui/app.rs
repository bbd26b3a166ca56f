//! Main TUI application state and logic

use super::fetcher::Fetcher;
use super::panes::{self, KeyFacts, Mode};
use crate::config::{BlockStyle, Config};
use crate::grid::{GridState, LevelScanner, ScanStart, ScanStep};
use crate::sequence::{parse_integer_list, Generator, OeisId, SequenceKind, Sequencer, Step};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use num_bigint::BigInt;
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Interval between scan ticks
const SCAN_INTERVAL: Duration = Duration::from_millis(60);

/// Which value a prompt is collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Key,
    CustomList,
    OeisId,
}

impl InputKind {
    fn title(self) -> &'static str {
        match self {
            InputKind::Key => "Key",
            InputKind::CustomList => "Custom sequence",
            InputKind::OeisId => "OEIS sequence",
        }
    }

    fn hint(self) -> &'static str {
        match self {
            InputKind::Key => "any integer",
            InputKind::CustomList => "comma-separated integers",
            InputKind::OeisId => "A-number such as A000045",
        }
    }
}

#[derive(Debug, Clone)]
pub struct InputState {
    pub kind: InputKind,
    pub buffer: String,
}

/// The main application state
pub struct App {
    pub grid: GridState,
    pub sequencer: Sequencer,
    pub scanner: LevelScanner,

    pub style: BlockStyle,
    pub block_width: u16,

    /// Open prompt, if any
    pub input: Option<InputState>,

    /// Facts about the key on display
    pub facts: KeyFacts,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
    pub status_is_error: bool,

    /// Last time the sequence stepped in play mode
    pub last_play_time: Instant,

    /// Last time the scanner ticked
    pub last_scan_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,

    fetcher: Fetcher,
}

impl App {
    pub fn new(config: &Config, fetcher: Fetcher) -> Self {
        let grid = config.grid_state();
        let facts = KeyFacts::of(grid.key());
        let long_ago = Instant::now()
            .checked_sub(Duration::from_secs(1))
            .unwrap_or_else(Instant::now);
        App {
            grid,
            sequencer: config.sequencer(),
            scanner: LevelScanner::new(),
            style: config.style,
            block_width: config.block_width,
            input: None,
            facts,
            should_quit: false,
            status_message: String::from("Ready!"),
            status_is_error: false,
            last_play_time: long_ago,
            last_scan_time: long_ago,
            last_space_press: long_ago,
            fetcher,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.collect_fetches();

            if self.sequencer.is_playing()
                && self.last_play_time.elapsed() >= self.sequencer.frame_interval()
            {
                self.last_play_time = Instant::now();
                self.step_sequence();
            }

            if self.scanner.is_scanning() && self.last_scan_time.elapsed() >= SCAN_INTERVAL {
                self.last_scan_time = Instant::now();
                self.tick_scan();
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(10))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    fn mode(&self) -> Mode {
        if self.input.is_some() {
            Mode::Input
        } else if self.sequencer.is_loading() {
            Mode::Loading
        } else if self.scanner.is_scanning() {
            Mode::Scanning
        } else if self.sequencer.is_playing() {
            Mode::Playing
        } else {
            Mode::Paused
        }
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Grid (left) | Info (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(72), Constraint::Percentage(28)])
            .split(main_chunks[0]);

        panes::render_grid_pane(frame, columns[0], &self.grid, self.style, self.block_width);
        panes::render_info_pane(frame, columns[1], &self.grid, &self.facts, &self.sequencer);
        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.status_is_error,
            self.mode(),
        );

        if let Some(input) = &self.input {
            panes::render_input_prompt(
                frame,
                main_chunks[0],
                input.kind.title(),
                input.kind.hint(),
                &input.buffer,
            );
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = false;
    }

    fn set_error(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.status_is_error = true;
    }

    /// Replace the key and refresh what depends on it
    pub fn set_key(&mut self, key: BigInt) {
        self.grid.set_key(key);
        if &self.facts.key != self.grid.key() {
            self.facts = KeyFacts::of(self.grid.key());
        }
    }

    fn nudge_key(&mut self, delta: i64) {
        let key = self.grid.key() + delta;
        self.set_key(key);
    }

    /// Advance the selected sequence and apply what it produced
    pub fn step_sequence(&mut self) {
        match self.sequencer.step(self.grid.key()) {
            Ok(Step::Emit(value)) => {
                self.set_key(value);
                if self.sequencer.sequence().is_finished() {
                    self.set_status("Sequence finished");
                } else if self.sequencer.is_playing() {
                    self.set_status("Playing...");
                } else {
                    self.set_status("Stepped");
                }
            }
            Ok(Step::Finished) => self.set_status("Sequence finished; press r to reset"),
            Ok(Step::Loading) => {
                if let Some(ticket) = self.sequencer.take_fetch_request() {
                    debug!(id = %ticket.id(), "dispatching fetch");
                    if let Err((ticket, answer)) = self.fetcher.submit(ticket) {
                        self.sequencer.resolve_fetch(&ticket, answer);
                    }
                }
                self.set_status("Loading OEIS sequence...");
            }
            // the sequencer has already reset itself; the view stays put
            Ok(Step::Restart) => {
                self.scanner.stop();
                self.set_status("Sequence restarted");
            }
            Err(e) => self.set_error(e.to_string()),
        }
    }

    /// Apply answers from the fetch worker
    fn collect_fetches(&mut self) {
        while let Some((ticket, answer)) = self.fetcher.try_recv() {
            let failed = answer.as_ref().err().map(|e| e.to_string());
            if !self.sequencer.resolve_fetch(&ticket, answer) {
                continue;
            }
            match failed {
                Some(reason) => self.set_error(format!("{}: {}", ticket.id(), reason)),
                None => self.set_status(format!("Loaded {}", ticket.id())),
            }
        }
    }

    fn tick_scan(&mut self) {
        match self.scanner.tick(self.grid.key()) {
            ScanStep::Idle => {}
            ScanStep::Advanced(level) => self.grid.set_level(level),
            ScanStep::Found(level) => {
                self.set_status(format!("{} divides the key", level));
                self.grid.set_level(level);
            }
            ScanStep::Exhausted(level) => {
                self.set_status("No divisor levels left; press f to rewind");
                self.grid.set_level(level);
            }
        }
    }

    fn start_scan(&mut self) {
        if self.scanner.stop() {
            self.set_status("Scan stopped");
            return;
        }
        match self.scanner.start(self.grid.level(), self.grid.key()) {
            ScanStart::Rewound => {
                self.grid.set_level(BigInt::from(1));
                self.set_status("Scan rewound to level 1");
            }
            ScanStart::Started => {
                self.grid.set_level(self.scanner.level().clone());
                self.last_scan_time = Instant::now();
                self.set_status("Scanning for the next divisor level...");
            }
        }
    }

    /// Full reset: key, level, leg, scanner and sequence
    pub fn restart(&mut self) {
        info!("resetting grid and sequence");
        self.sequencer.reset();
        self.scanner.reset();
        self.grid.reset();
        self.facts = KeyFacts::of(self.grid.key());
    }

    fn open_prompt(&mut self, kind: InputKind) {
        self.sequencer.stop();
        self.scanner.stop();
        let buffer = match kind {
            InputKind::Key => self.grid.key().to_string(),
            InputKind::CustomList => self.sequencer.custom_list().to_string(),
            InputKind::OeisId => self.sequencer.oeis_id().to_string(),
        };
        self.input = Some(InputState { kind, buffer });
    }

    /// Apply a confirmed prompt. Invalid input keeps the prompt open.
    fn submit_prompt(&mut self, input: InputState) {
        match input.kind {
            InputKind::Key => match input.buffer.trim().parse::<BigInt>() {
                Ok(key) => {
                    self.set_key(key);
                    self.set_status("Key set");
                }
                Err(_) => {
                    self.set_error(format!("'{}' is not an integer", input.buffer.trim()));
                    self.input = Some(input);
                }
            },
            InputKind::CustomList => match parse_integer_list(&input.buffer) {
                Ok(values) => {
                    self.sequencer.set_custom_list(input.buffer.trim());
                    self.sequencer.select(SequenceKind::CustomList);
                    self.set_status(format!("Custom sequence of {} values", values.len()));
                }
                Err(e) => {
                    self.set_error(e.to_string());
                    self.input = Some(input);
                }
            },
            InputKind::OeisId => match OeisId::parse(&input.buffer) {
                Ok(id) => {
                    self.sequencer.set_oeis_id(id.as_str());
                    self.sequencer.select(SequenceKind::ExternalList);
                    self.set_status(format!("{} selected; press n or space to load", id));
                }
                Err(e) => {
                    self.set_error(e.to_string());
                    self.input = Some(input);
                }
            },
        }
    }

    fn handle_input_key(&mut self, key: KeyEvent) {
        let Some(mut input) = self.input.take() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.set_status("Cancelled"),
            KeyCode::Enter => self.submit_prompt(input),
            KeyCode::Backspace => {
                input.buffer.pop();
                self.input = Some(input);
            }
            KeyCode::Char(c) => {
                input.buffer.push(c);
                self.input = Some(input);
            }
            _ => self.input = Some(input),
        }
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if self.input.is_some() {
            self.handle_input_key(key);
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char(' ') => {
                // Debounced: held keys repeat faster than 200ms
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.sequencer.toggle_play();
                    if self.sequencer.is_playing() {
                        self.scanner.stop();
                        self.last_play_time = Instant::now()
                            .checked_sub(self.sequencer.frame_interval())
                            .unwrap_or_else(Instant::now);
                        self.set_status("Playing...");
                    } else {
                        self.set_status("Paused");
                    }
                }
            }
            KeyCode::Char('n') | KeyCode::Right => {
                self.sequencer.stop();
                self.step_sequence();
            }
            KeyCode::Char('a') => self.nudge_key(-1),
            KeyCode::Char('d') => self.nudge_key(1),
            KeyCode::Char('w') => self.grid.nudge_level(-1),
            KeyCode::Char('s') => self.grid.nudge_level(1),
            KeyCode::Char('[') => self.grid.nudge_leg(-1),
            KeyCode::Char(']') => self.grid.nudge_leg(1),
            KeyCode::Tab => {
                self.sequencer.cycle();
                self.set_status(format!("Sequence: {}", self.sequencer.kind()));
            }
            KeyCode::BackTab => {
                self.sequencer.select(self.sequencer.kind().prev());
                self.set_status(format!("Sequence: {}", self.sequencer.kind()));
            }
            KeyCode::Char('f') => self.start_scan(),
            KeyCode::Char('k') => self.open_prompt(InputKind::Key),
            KeyCode::Char('c') => self.open_prompt(InputKind::CustomList),
            KeyCode::Char('o') => self.open_prompt(InputKind::OeisId),
            KeyCode::Char('r') => {
                self.restart();
                self.set_status("Reset");
            }
            KeyCode::Up if self.sequencer.is_playing() => {
                self.sequencer.faster();
                self.set_status(format!("{} fps", self.sequencer.frame_rate()));
            }
            KeyCode::Down if self.sequencer.is_playing() => {
                self.sequencer.slower();
                self.set_status(format!("{} fps", self.sequencer.frame_rate()));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::BuiltinCatalog;
    use crossterm::event::KeyModifiers;

    fn app(config: Config) -> App {
        App::new(&config, Fetcher::spawn(BuiltinCatalog::new()))
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn test_key_and_level_nudges() {
        let mut app = app(Config::default());
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('a'));
        assert_eq!(app.grid.key(), &BigInt::from(1));
        assert_eq!(app.facts.key, BigInt::from(1));

        press(&mut app, KeyCode::Char('w'));
        assert_eq!(app.grid.level(), &BigInt::from(1));
        press(&mut app, KeyCode::Char('s'));
        assert_eq!(app.grid.level(), &BigInt::from(2));

        press(&mut app, KeyCode::Char('['));
        assert_eq!(app.grid.leg(), 0);
        press(&mut app, KeyCode::Char(']'));
        assert_eq!(app.grid.leg(), 1);
    }

    #[test]
    fn test_stepping_collatz() {
        let config = Config {
            key: BigInt::from(6),
            ..Config::default()
        };
        let mut app = app(config);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.grid.key(), &BigInt::from(3));
        press(&mut app, KeyCode::Right);
        assert_eq!(app.grid.key(), &BigInt::from(10));
    }

    #[test]
    fn test_key_prompt() {
        let mut app = app(Config::default());
        press(&mut app, KeyCode::Char('k'));
        assert_eq!(app.mode(), Mode::Input);
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "-42");
        press(&mut app, KeyCode::Enter);
        assert!(app.input.is_none());
        assert_eq!(app.grid.key(), &BigInt::from(-42));
    }

    #[test]
    fn test_invalid_prompt_stays_open() {
        let mut app = app(Config::default());
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "1, 2, oops");
        press(&mut app, KeyCode::Enter);
        assert!(app.input.is_some());
        assert!(app.status_is_error);

        press(&mut app, KeyCode::Esc);
        assert!(app.input.is_none());
        assert_eq!(app.sequencer.kind(), SequenceKind::Collatz);
    }

    #[test]
    fn test_custom_list_prompt_selects_sequence() {
        let mut app = app(Config::default());
        press(&mut app, KeyCode::Char('c'));
        type_text(&mut app, "5, 7");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.sequencer.kind(), SequenceKind::CustomList);

        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.grid.key(), &BigInt::from(5));
    }

    #[test]
    fn test_scan_moves_level() {
        let config = Config {
            key: BigInt::from(15),
            ..Config::default()
        };
        let mut app = app(config);
        press(&mut app, KeyCode::Char('f'));
        assert_eq!(app.mode(), Mode::Scanning);
        app.tick_scan();
        app.tick_scan();
        assert_eq!(app.grid.level(), &BigInt::from(3));
        assert!(!app.scanner.is_scanning());
    }

    #[test]
    fn test_reset() {
        let config = Config {
            key: BigInt::from(99),
            level: BigInt::from(4),
            ..Config::default()
        };
        let mut app = app(config);
        press(&mut app, KeyCode::Char('r'));
        assert_eq!(app.grid, GridState::default());
    }

    #[test]
    fn test_sequence_restart_keeps_view() {
        let config = Config {
            key: BigInt::from(99),
            level: BigInt::from(4),
            leg: 2,
            sequence: SequenceKind::CustomList,
            ..Config::default()
        };
        let mut app = app(config);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.grid.key(), &BigInt::from(99));
        assert_eq!(app.grid.level(), &BigInt::from(4));
        assert_eq!(app.grid.leg(), 2);
        assert_eq!(app.sequencer.sequence().iteration(), 0);
        assert_eq!(app.status_message, "Sequence restarted");

        let config = Config {
            level: BigInt::from(7),
            ..Config::default()
        };
        let mut app = self::app(config);
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.grid.key(), &BigInt::from(0));
        assert_eq!(app.grid.level(), &BigInt::from(7));
    }

    #[test]
    fn test_quit() {
        let mut app = app(Config::default());
        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
    }
}
