//! Caller-supplied integer lists

use super::{Generator, Progress, SequenceError, Step};
use num_bigint::BigInt;
use tracing::{debug, warn};

/// Parse a comma-separated list of integers.
///
/// Entries are trimmed and empty entries skipped, so `"1, 2,,3,"` is three
/// values. The first malformed entry rejects the whole list.
pub fn parse_integer_list(text: &str) -> Result<Vec<BigInt>, SequenceError> {
    text.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .enumerate()
        .map(|(index, entry)| {
            entry
                .parse::<BigInt>()
                .map_err(|_| SequenceError::MalformedEntry {
                    index: index + 1,
                    entry: entry.to_string(),
                })
        })
        .collect()
}

/// Emit `values` in order, finishing after the last one.
pub(crate) fn emit_next(values: &[BigInt], progress: &mut Progress) -> Step {
    if progress.is_finished() {
        return Step::Finished;
    }
    let index = progress.iteration() as usize;
    let Some(value) = values.get(index) else {
        progress.finish();
        return Step::Finished;
    };
    progress.advance();
    if index + 1 >= values.len() {
        progress.finish();
    }
    Step::Emit(value.clone())
}

/// A literal list such as `"4, 8, 15, 16, 23, 42"`, parsed on first use.
#[derive(Debug, Clone)]
pub struct CustomList {
    text: String,
    values: Option<Vec<BigInt>>,
    progress: Progress,
}

impl CustomList {
    pub fn new(text: impl Into<String>) -> Self {
        CustomList {
            text: text.into(),
            values: None,
            progress: Progress::default(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the list text and re-arm.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.reset();
    }

    /// Parsed values, once `next()` has run at least once.
    pub fn values(&self) -> Option<&[BigInt]> {
        self.values.as_deref()
    }
}

impl Generator for CustomList {
    fn reset(&mut self) {
        self.values = None;
        self.progress.reset();
    }

    fn next(&mut self, _key: &BigInt) -> Result<Step, SequenceError> {
        if self.values.is_none() {
            let parsed = parse_integer_list(&self.text).map_err(|e| {
                warn!(error = %e, "custom list rejected");
                e
            })?;
            debug!(count = parsed.len(), "custom list parsed");
            self.values = Some(parsed);
        }

        match self.values.as_deref() {
            Some([]) | None => Ok(Step::Restart),
            Some(values) => Ok(emit_next(values, &mut self.progress)),
        }
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }
}
