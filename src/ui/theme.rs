use crate::grid::Highlight;
use ratatui::style::{Color, Modifier, Style};

pub struct Theme {
    pub fg: Color,
    pub primary: Color,   // Blue
    pub secondary: Color, // Orange
    pub comment: Color,   // Grey
    pub success: Color,   // Green
    pub error: Color,     // Red
    pub border_focused: Color,
    pub border_normal: Color,
    pub panel_bg: Color,
    pub key: Color,          // Yellow for the key itself
    pub prime: Color,        // Green for primes on the unit row
    pub power_of_two: Color, // Cyan for powers of two
    pub divisor: Color,      // Pink for divisor legs
    pub midpoint: Color,
}

pub const DEFAULT_THEME: Theme = Theme {
    fg: Color::Rgb(205, 214, 244),
    primary: Color::Rgb(137, 180, 250),   // Blue
    secondary: Color::Rgb(250, 179, 135), // Orange
    comment: Color::Rgb(108, 112, 134),
    success: Color::Rgb(166, 227, 161),
    error: Color::Rgb(243, 139, 168),
    border_focused: Color::Rgb(249, 226, 175), // Yellow border for focus
    border_normal: Color::Rgb(108, 112, 134),  // Grey border for normal
    panel_bg: Color::Rgb(50, 50, 70),          // Slightly lighter BG for bars
    key: Color::Rgb(249, 226, 175),
    prime: Color::Rgb(166, 227, 161),
    power_of_two: Color::Rgb(148, 226, 213),
    divisor: Color::Rgb(245, 194, 231),
    midpoint: Color::Rgb(69, 71, 90),
};

impl Theme {
    /// Style for a grid cell with the given highlight
    pub fn highlight(&self, highlight: Highlight) -> Style {
        match highlight {
            Highlight::Plain => Style::default().fg(self.comment),
            Highlight::Key => Style::default().fg(self.key).add_modifier(Modifier::BOLD),
            Highlight::Prime => Style::default().fg(self.prime),
            Highlight::PowerOfTwo => Style::default().fg(self.power_of_two),
            Highlight::Divisor => Style::default()
                .fg(self.divisor)
                .add_modifier(Modifier::BOLD),
        }
    }
}
