//! Text prompt overlay for the key, the custom list and the OEIS identifier

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Padding, Paragraph, Wrap},
    Frame,
};

/// Area of `width` x `height` centered in `area`, clipped to it
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

/// Render the prompt with the current `buffer` and a trailing cursor.
pub fn render_input_prompt(frame: &mut Frame, area: Rect, title: &str, hint: &str, buffer: &str) {
    let popup = centered_rect(area.width.saturating_mul(3) / 4, 6, area);

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(
            Style::default()
                .fg(DEFAULT_THEME.border_focused)
                .add_modifier(Modifier::BOLD),
        )
        .padding(Padding::new(1, 1, 0, 0));

    let lines = vec![
        Line::from(vec![
            Span::styled(buffer.to_string(), Style::default().fg(DEFAULT_THEME.fg)),
            Span::styled(
                "█",
                Style::default()
                    .fg(DEFAULT_THEME.secondary)
                    .add_modifier(Modifier::SLOW_BLINK),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            format!("{}  ·  ↵ confirm  ·  esc cancel", hint),
            Style::default().fg(DEFAULT_THEME.comment),
        )),
    ];

    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: false }),
        popup,
    );
}
