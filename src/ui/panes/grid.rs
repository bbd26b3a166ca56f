//! Divisor grid pane
//!
//! Blocks are laid out on a character [`Canvas`] first and then turned into
//! styled lines. Row 0 of the canvas is the header, where primes and powers of
//! two from the `d = 1` row are labelled; divisor rows start on row 1.
//!
//! At level 1 with a non-zero leg, two diagonals run down through the `±leg`
//! column of every row.

use crate::config::BlockStyle;
use crate::grid::{classify, Block, GridError, GridState, Highlight, Viewport};
use crate::ui::theme::DEFAULT_THEME;
use num_traits::{One, ToPrimitive, Zero};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{self, Borders, Paragraph},
    Frame,
};

/// What occupies one terminal cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Empty,
    Midpoint,
    /// Diagonal through the leg columns
    Leg(char),
    Block(char, Highlight),
    Label(char, Highlight),
}

impl Glyph {
    fn ch(self) -> char {
        match self {
            Glyph::Empty => ' ',
            Glyph::Midpoint => '·',
            Glyph::Leg(c) | Glyph::Block(c, _) | Glyph::Label(c, _) => c,
        }
    }

    fn style(self) -> Style {
        match self {
            Glyph::Empty => Style::default(),
            Glyph::Midpoint => Style::default().fg(DEFAULT_THEME.midpoint),
            Glyph::Leg(_) => Style::default()
                .fg(DEFAULT_THEME.divisor)
                .add_modifier(Modifier::DIM),
            Glyph::Block(_, highlight) => DEFAULT_THEME.highlight(highlight),
            Glyph::Label(_, highlight) => DEFAULT_THEME
                .highlight(highlight)
                .add_modifier(Modifier::DIM),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Canvas {
    width: usize,
    height: usize,
    glyphs: Vec<Glyph>,
}

impl Canvas {
    pub fn new(width: usize, height: usize) -> Self {
        Canvas {
            width,
            height,
            glyphs: vec![Glyph::Empty; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, col: usize, row: usize) -> Option<Glyph> {
        if col < self.width && row < self.height {
            Some(self.glyphs[row * self.width + col])
        } else {
            None
        }
    }

    /// Characters of one row, without styling
    pub fn row_text(&self, row: usize) -> String {
        (0..self.width)
            .filter_map(|col| self.get(col, row))
            .map(Glyph::ch)
            .collect()
    }

    fn put(&mut self, col: i64, row: i64, glyph: Glyph) {
        if col < 0 || row < 0 {
            return;
        }
        let (col, row) = (col as usize, row as usize);
        if col < self.width && row < self.height {
            self.glyphs[row * self.width + col] = glyph;
        }
    }

    fn put_label(&mut self, col: i64, row: i64, text: &str, highlight: Highlight) {
        for (offset, c) in text.chars().enumerate() {
            self.put(col + offset as i64, row, Glyph::Label(c, highlight));
        }
    }

    fn lines(&self) -> Vec<Line<'static>> {
        (0..self.height)
            .map(|row| {
                let mut spans: Vec<Span<'static>> = Vec::new();
                let mut run = String::new();
                let mut run_style = Style::default();
                for col in 0..self.width {
                    let glyph = self.glyphs[row * self.width + col];
                    let style = glyph.style();
                    if style != run_style && !run.is_empty() {
                        spans.push(Span::styled(std::mem::take(&mut run), run_style));
                    }
                    run_style = style;
                    run.push(glyph.ch());
                }
                if !run.is_empty() {
                    spans.push(Span::styled(run, run_style));
                }
                Line::from(spans)
            })
            .collect()
    }
}

/// Pixel coordinate to a terminal column or row; `None` when off any screen.
fn cell_index(position: f64) -> Option<i64> {
    position.is_finite().then(|| position.floor() as i64)
}

fn block_text(block: &Block, highlight: Highlight, style: BlockStyle, digits: usize) -> String {
    match style {
        BlockStyle::Digits if block.n.is_zero() => "0".to_string(),
        BlockStyle::Digits => {
            let divisor = block.d.to_string();
            let skip = divisor.len().saturating_sub(digits);
            divisor[skip..].to_string()
        }
        BlockStyle::Circles if highlight == Highlight::Plain => "○".to_string(),
        BlockStyle::Circles => "●".to_string(),
        BlockStyle::Squares if highlight == Highlight::Plain => "□".to_string(),
        BlockStyle::Squares => "■".to_string(),
    }
}

/// Diagonals from the `±leg` columns of the first row down to the last row.
///
/// Row `d` is crossed at `origin_x ± d·leg·block_width`, which is where the
/// leg blocks of a divisor row sit.
fn draw_divisor_legs(canvas: &mut Canvas, viewport: &Viewport, leg: u64) {
    let rows = viewport.max_divisor_rows().to_u64().unwrap_or(0);
    for d in 1..=rows {
        let offset = (d as f64) * (leg as f64) * viewport.block_width;
        let y = viewport.origin_y + (d - 1) as f64 * viewport.block_height;
        let Some(row) = cell_index(y) else {
            continue;
        };
        if let Some(col) = cell_index(viewport.origin_x - offset) {
            canvas.put(col, row, Glyph::Leg('╱'));
        }
        if let Some(col) = cell_index(viewport.origin_x + offset) {
            canvas.put(col, row, Glyph::Leg('╲'));
        }
    }
}

/// Lay the grid for `state` out on a `width` x `height` canvas.
pub fn layout_grid(
    state: &GridState,
    width: u16,
    height: u16,
    style: BlockStyle,
    block_width: u16,
) -> Result<Canvas, GridError> {
    let mut canvas = Canvas::new(width as usize, height as usize);
    let viewport = Viewport::centered(width as f64, height as f64, block_width as f64, 1.0, 1.0);
    let blocks: Vec<Block> = state.blocks(&viewport)?.collect();
    let digits = block_width.saturating_sub(1).max(1) as usize;

    // midpoints go underneath the blocks
    for block in blocks.iter().filter(|b| b.is_midpoint) {
        if let (Some(col), Some(row)) = (cell_index(block.x), cell_index(block.y)) {
            canvas.put(col, row, Glyph::Midpoint);
        }
    }

    if state.level().is_one() && state.leg() > 0 {
        draw_divisor_legs(&mut canvas, &viewport, state.leg());
    }

    for block in blocks.iter().filter(|b| !b.is_midpoint) {
        let (Some(col), Some(row)) = (cell_index(block.x), cell_index(block.y)) else {
            continue;
        };
        let cell = classify(block, state.key(), state.leg());
        let text = block_text(block, cell.highlight, style, digits);
        for (offset, c) in text.chars().enumerate() {
            canvas.put(col + offset as i64, row, Glyph::Block(c, cell.highlight));
        }

        if let Some(label) = &cell.label {
            let kind = if cell.highlight == Highlight::Prime {
                Highlight::Prime
            } else {
                Highlight::PowerOfTwo
            };
            canvas.put_label(col, 0, &label.to_string(), kind);
        }
    }

    Ok(canvas)
}

/// Render the grid pane
pub fn render_grid_pane(
    frame: &mut Frame,
    area: Rect,
    state: &GridState,
    style: BlockStyle,
    block_width: u16,
) {
    let block = widgets::Block::default()
        .title(format!(" d = {} ", state.level()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_focused));
    let inner = block.inner(area);

    let paragraph = match layout_grid(state, inner.width, inner.height, style, block_width) {
        Ok(canvas) => Paragraph::new(canvas.lines()),
        Err(e) => Paragraph::new(e.to_string()).style(Style::default().fg(DEFAULT_THEME.error)),
    };
    frame.render_widget(paragraph.block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    fn state(key: i64, level: i64, leg: u64) -> GridState {
        GridState::new(BigInt::from(key), BigInt::from(level), leg)
    }

    #[test]
    fn test_unit_row_digits() {
        let canvas = layout_grid(&state(12, 1, 0), 30, 2, BlockStyle::Digits, 3).unwrap();
        assert_eq!(canvas.row_text(1).trim_end(), "   1  1  1  1  1  1  1  1  1");
    }

    #[test]
    fn test_digits_show_row_divisor_and_zero() {
        let canvas = layout_grid(&state(0, 1, 0), 30, 3, BlockStyle::Digits, 3).unwrap();
        assert!(matches!(canvas.get(15, 1), Some(Glyph::Block('0', _))));
        assert!(matches!(canvas.get(15, 2), Some(Glyph::Block('0', _))));
        assert!(matches!(canvas.get(21, 2), Some(Glyph::Block('2', _))));
        assert!(matches!(canvas.get(9, 2), Some(Glyph::Block('2', _))));
    }

    fn leg_cells(canvas: &Canvas) -> Vec<(usize, usize, char)> {
        let mut cells = Vec::new();
        for row in 0..canvas.height() {
            for col in 0..canvas.width() {
                if let Some(Glyph::Leg(c)) = canvas.get(col, row) {
                    cells.push((col, row, c));
                }
            }
        }
        cells
    }

    #[test]
    fn test_divisor_legs_cross_leg_columns() {
        // 13 is prime: row 2 has midpoints, not blocks, at its leg columns
        let canvas = layout_grid(&state(13, 1, 1), 30, 3, BlockStyle::Digits, 3).unwrap();
        let legs = leg_cells(&canvas);
        assert!(legs.contains(&(9, 2, '╱')));
        assert!(legs.contains(&(21, 2, '╲')));

        // on a divisor row the leg blocks sit on the diagonal
        let canvas = layout_grid(&state(12, 1, 1), 30, 3, BlockStyle::Digits, 3).unwrap();
        assert!(matches!(canvas.get(9, 2), Some(Glyph::Block(_, Highlight::Divisor))));
        assert!(matches!(canvas.get(21, 2), Some(Glyph::Block(_, Highlight::Divisor))));
    }

    #[test]
    fn test_no_legs_off_level_one_or_without_leg() {
        let canvas = layout_grid(&state(13, 1, 0), 30, 4, BlockStyle::Digits, 3).unwrap();
        assert!(leg_cells(&canvas).is_empty());
        let canvas = layout_grid(&state(13, 2, 1), 30, 4, BlockStyle::Digits, 3).unwrap();
        assert!(leg_cells(&canvas).is_empty());
    }

    #[test]
    fn test_header_labels_primes_and_powers() {
        let canvas = layout_grid(&state(12, 1, 0), 30, 2, BlockStyle::Digits, 3).unwrap();
        let expected = format!("   8{}11{}13{}16", " ".repeat(8), " ".repeat(4), " ".repeat(7));
        assert_eq!(canvas.row_text(0).trim_end(), expected);
        assert_eq!(canvas.get(12, 0), Some(Glyph::Label('1', Highlight::Prime)));
        assert_eq!(canvas.get(3, 0), Some(Glyph::Label('8', Highlight::PowerOfTwo)));
    }

    #[test]
    fn test_key_column_is_divisor_leg() {
        let canvas = layout_grid(&state(12, 1, 0), 30, 3, BlockStyle::Squares, 3).unwrap();
        assert_eq!(canvas.get(15, 1), Some(Glyph::Block('■', Highlight::Divisor)));
        // 2 divides 12: the anchor on the second row is on the leg too
        assert_eq!(canvas.get(15, 2), Some(Glyph::Block('■', Highlight::Divisor)));
        assert_eq!(canvas.get(18, 2), Some(Glyph::Midpoint));
    }

    #[test]
    fn test_rows_fill_height() {
        let canvas = layout_grid(&state(12, 1, 0), 30, 6, BlockStyle::Circles, 3).unwrap();
        assert_eq!(canvas.height(), 6);
        assert!(canvas.row_text(5).contains('○') || canvas.row_text(5).contains('●'));
    }

    #[test]
    fn test_tiny_area_is_empty_not_error() {
        let canvas = layout_grid(&state(12, 1, 0), 0, 0, BlockStyle::Digits, 3).unwrap();
        assert_eq!(canvas.width(), 0);
        assert_eq!(canvas.row_text(0), "");
    }
}
