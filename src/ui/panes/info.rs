//! Key information pane

use crate::config::EXACT_TEST_LIMIT_BITS;
use crate::grid::GridState;
use crate::number::{divisors, is_likely_prime, is_power_of_two, is_prime};
use crate::sequence::{Sequence, Sequencer};
use crate::ui::theme::DEFAULT_THEME;
use num_bigint::BigInt;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Padding, Paragraph, Wrap},
    Frame,
};

/// Divisors listed before the pane truncates
const MAX_LISTED_DIVISORS: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primality {
    Prime,
    NotPrime,
    /// Passed the base-3 probable-prime test only
    ProbablePrime,
    /// Failed the base-3 test, so certainly composite
    Composite,
}

impl Primality {
    fn describe(self) -> &'static str {
        match self {
            Primality::Prime => "prime",
            Primality::NotPrime => "not prime",
            Primality::ProbablePrime => "probable prime",
            Primality::Composite => "composite",
        }
    }
}

/// Facts about the key, computed once per key change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFacts {
    pub key: BigInt,
    pub bits: u64,
    pub primality: Primality,
    pub power_of_two: bool,
    /// Only listed for keys below the exact-test limit
    pub divisors: Option<Vec<BigInt>>,
}

impl KeyFacts {
    pub fn of(key: &BigInt) -> Self {
        let bits = key.bits();
        let exact = bits <= EXACT_TEST_LIMIT_BITS;
        let primality = match (exact, exact && is_prime(key), is_likely_prime(key)) {
            (true, true, _) => Primality::Prime,
            (true, false, _) => Primality::NotPrime,
            (false, _, true) => Primality::ProbablePrime,
            (false, _, false) => Primality::Composite,
        };
        KeyFacts {
            key: key.clone(),
            bits,
            primality,
            power_of_two: is_power_of_two(key),
            divisors: exact.then(|| divisors(key)),
        }
    }
}

fn field(name: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(
            format!("{:<12}", name),
            Style::default().fg(DEFAULT_THEME.comment),
        ),
        Span::styled(value, Style::default().fg(DEFAULT_THEME.fg)),
    ])
}

fn divisor_text(divisors: &[BigInt]) -> String {
    let mut text = divisors
        .iter()
        .take(MAX_LISTED_DIVISORS)
        .map(BigInt::to_string)
        .collect::<Vec<_>>()
        .join(", ");
    if divisors.len() > MAX_LISTED_DIVISORS {
        text.push_str(&format!(", … ({} total)", divisors.len()));
    }
    text
}

fn sequence_name(sequencer: &Sequencer) -> String {
    match sequencer.sequence() {
        Sequence::ExternalList(list) => match list.name() {
            Some(name) => format!("{} ({})", sequencer.kind(), name),
            None => sequencer.kind().to_string(),
        },
        _ => sequencer.kind().to_string(),
    }
}

pub fn info_lines(state: &GridState, facts: &KeyFacts, sequencer: &Sequencer) -> Vec<Line<'static>> {
    let primality_style = match facts.primality {
        Primality::Prime | Primality::ProbablePrime => Style::default()
            .fg(DEFAULT_THEME.prime)
            .add_modifier(Modifier::BOLD),
        _ => Style::default().fg(DEFAULT_THEME.fg),
    };

    let mut lines = vec![
        Line::from(Span::styled(
            state.key().to_string(),
            Style::default()
                .fg(DEFAULT_THEME.key)
                .add_modifier(Modifier::BOLD),
        )),
        field("bits", facts.bits.to_string()),
        Line::from(vec![
            Span::styled(
                format!("{:<12}", "primality"),
                Style::default().fg(DEFAULT_THEME.comment),
            ),
            Span::styled(facts.primality.describe(), primality_style),
        ]),
        field(
            "power of 2",
            if facts.power_of_two { "yes" } else { "no" }.to_string(),
        ),
        field("level", state.level().to_string()),
        field("leg", state.leg().to_string()),
    ];

    lines.push(match &facts.divisors {
        Some(divisors) => field("divisors", divisor_text(divisors)),
        None => field("divisors", "(key too large)".to_string()),
    });

    lines.push(Line::from(""));
    lines.push(field("sequence", sequence_name(sequencer)));
    if let Some(link) = sequencer.sequence().link() {
        lines.push(field("oeis", link));
    }
    lines.push(field("step", sequencer.iteration_label()));
    lines.push(field("fps", sequencer.frame_rate().to_string()));
    lines
}

/// Render the info pane
pub fn render_info_pane(
    frame: &mut Frame,
    area: Rect,
    state: &GridState,
    facts: &KeyFacts,
    sequencer: &Sequencer,
) {
    let block = Block::default()
        .title(" Key ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DEFAULT_THEME.border_normal))
        .padding(Padding::new(1, 1, 0, 0));

    let paragraph = Paragraph::new(info_lines(state, facts, sequencer))
        .block(block)
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
