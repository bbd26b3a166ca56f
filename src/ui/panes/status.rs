//! Status bar rendering with keybindings and mode indicators

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// What the event loop is doing, shown as a badge
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Paused,
    Playing,
    Loading,
    Scanning,
    Input,
}

impl Mode {
    fn badge(self) -> (&'static str, Color) {
        match self {
            Mode::Paused => (" PAUSED ", DEFAULT_THEME.primary),
            Mode::Playing => (" ▶ PLAYING ", DEFAULT_THEME.secondary),
            Mode::Loading => (" ⟳ LOADING ", DEFAULT_THEME.secondary),
            Mode::Scanning => (" SCANNING ", DEFAULT_THEME.success),
            Mode::Input => (" ⌨ INPUT ", DEFAULT_THEME.secondary),
        }
    }
}

const KEY_HINTS: [(&str, &str); 8] = [
    (" ⎵ ", " play "),
    (" n/→ ", " step "),
    (" a/d ", " key "),
    (" w/s ", " level "),
    (" [/] ", " leg "),
    (" ⇥ ", " sequence "),
    (" f ", " scan "),
    (" k/c/o ", " input "),
];

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, message: &str, is_error: bool, mode: Mode) {
    let layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let (badge, badge_color) = mode.badge();
    let left_spans = vec![
        Span::styled(
            badge,
            Style::default()
                .bg(if is_error { DEFAULT_THEME.error } else { badge_color })
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {} ", message),
            Style::default().bg(DEFAULT_THEME.panel_bg).fg(if is_error {
                DEFAULT_THEME.error
            } else {
                DEFAULT_THEME.fg
            }),
        ),
    ];

    let left_paragraph = Paragraph::new(Line::from(left_spans))
        .style(Style::default().bg(DEFAULT_THEME.panel_bg))
        .alignment(Alignment::Left);
    frame.render_widget(left_paragraph, layout[0]);

    let key_style = Style::default().bg(DEFAULT_THEME.comment).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.panel_bg)
        .fg(DEFAULT_THEME.fg);
    let sep_style = Style::default()
        .bg(DEFAULT_THEME.panel_bg)
        .fg(DEFAULT_THEME.comment);

    let mut right_spans = Vec::new();
    for (key, desc) in KEY_HINTS {
        right_spans.push(Span::styled(key, key_style));
        right_spans.push(Span::styled(desc, desc_style));
        right_spans.push(Span::styled("│", sep_style));
    }
    if mode == Mode::Playing {
        right_spans.push(Span::styled(" ↑/↓ ", key_style));
        right_spans.push(Span::styled(" fps ", desc_style));
        right_spans.push(Span::styled("│", sep_style));
    }
    right_spans.push(Span::styled(" q ", key_style));
    right_spans.push(Span::styled(" quit ", desc_style));

    let right_paragraph = Paragraph::new(Line::from(right_spans))
        .style(Style::default().bg(DEFAULT_THEME.panel_bg))
        .alignment(Alignment::Right);
    frame.render_widget(right_paragraph, layout[1]);
}
