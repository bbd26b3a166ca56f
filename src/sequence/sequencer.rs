//! Driver-side sequence state
//!
//! The [`Sequencer`] owns the selected [`Sequence`], the play/pause flag and
//! the frame rate. It also keeps the text inputs of the two list variants so
//! switching away and back does not lose them.

use super::catalog::SequenceSource;
use super::external::{FetchError, FetchTicket, Resolved};
use super::{Generator, Sequence, SequenceError, SequenceKind, Step};
use num_bigint::BigInt;
use std::time::Duration;
use tracing::{debug, info, warn};

pub const MIN_FRAME_RATE: u32 = 1;
pub const MAX_FRAME_RATE: u32 = 60;
pub const DEFAULT_FRAME_RATE: u32 = 10;
/// Frame-rate change per keypress
pub const FRAME_RATE_STEP: i64 = 2;

#[derive(Debug, Clone)]
pub struct Sequencer {
    sequence: Sequence,
    playing: bool,
    frame_rate: u32,
    custom_list: String,
    oeis_id: String,
}

impl Sequencer {
    pub fn new(kind: SequenceKind) -> Self {
        Sequencer {
            sequence: Sequence::new(kind),
            playing: false,
            frame_rate: DEFAULT_FRAME_RATE,
            custom_list: String::new(),
            oeis_id: String::new(),
        }
    }

    pub fn kind(&self) -> SequenceKind {
        self.sequence.kind()
    }

    pub fn sequence(&self) -> &Sequence {
        &self.sequence
    }

    /// Switch to `kind`, stopping playback. A fresh instance is created.
    pub fn select(&mut self, kind: SequenceKind) {
        info!(sequence = kind.label(), "sequence selected");
        self.playing = false;
        self.sequence = self.instantiate(kind);
    }

    /// Select the next kind in order.
    pub fn cycle(&mut self) {
        self.select(self.kind().next());
    }

    fn instantiate(&self, kind: SequenceKind) -> Sequence {
        match Sequence::new(kind) {
            Sequence::CustomList(mut list) => {
                list.set_text(self.custom_list.clone());
                Sequence::CustomList(list)
            }
            Sequence::ExternalList(mut list) => {
                list.set_identifier(self.oeis_id.clone());
                Sequence::ExternalList(list)
            }
            other => other,
        }
    }

    pub fn custom_list(&self) -> &str {
        &self.custom_list
    }

    /// Store the custom list text; re-arms the list if it is selected.
    pub fn set_custom_list(&mut self, text: impl Into<String>) {
        self.custom_list = text.into();
        if let Sequence::CustomList(list) = &mut self.sequence {
            self.playing = false;
            list.set_text(self.custom_list.clone());
        }
    }

    pub fn oeis_id(&self) -> &str {
        &self.oeis_id
    }

    /// Store the OEIS identifier; re-arms the external list if it is selected.
    pub fn set_oeis_id(&mut self, id: impl Into<String>) {
        self.oeis_id = id.into();
        if let Sequence::ExternalList(list) = &mut self.sequence {
            self.playing = false;
            list.set_identifier(self.oeis_id.clone());
        }
    }

    /// Stop and return the current sequence to its initial state.
    pub fn reset(&mut self) {
        self.playing = false;
        self.sequence.reset();
    }

    /// Advance by one step.
    ///
    /// `Finished` stops playback and `Restart` resets. Errors also reset
    /// before being returned, so the next step starts over.
    pub fn step(&mut self, key: &BigInt) -> Result<Step, SequenceError> {
        match self.sequence.next(key) {
            Ok(Step::Emit(value)) => {
                if self.sequence.is_finished() {
                    debug!(iteration = self.sequence.iteration(), "sequence finished");
                    self.playing = false;
                }
                Ok(Step::Emit(value))
            }
            Ok(Step::Finished) => {
                self.playing = false;
                Ok(Step::Finished)
            }
            Ok(Step::Restart) => {
                self.reset();
                Ok(Step::Restart)
            }
            Ok(Step::Loading) => Ok(Step::Loading),
            Err(e) => {
                warn!(sequence = self.kind().label(), error = %e, "sequence step failed");
                self.reset();
                Err(e)
            }
        }
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn play(&mut self) {
        self.playing = true;
    }

    /// Stop playback. Returns whether it was playing.
    pub fn stop(&mut self) -> bool {
        std::mem::replace(&mut self.playing, false)
    }

    pub fn toggle_play(&mut self) {
        self.playing = !self.playing;
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn set_frame_rate(&mut self, rate: i64) {
        self.frame_rate = rate.clamp(MIN_FRAME_RATE as i64, MAX_FRAME_RATE as i64) as u32;
    }

    pub fn faster(&mut self) {
        self.set_frame_rate(self.frame_rate as i64 + FRAME_RATE_STEP);
    }

    pub fn slower(&mut self) {
        self.set_frame_rate(self.frame_rate as i64 - FRAME_RATE_STEP);
    }

    /// Time between steps while playing
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.frame_rate
    }

    pub fn is_loading(&self) -> bool {
        matches!(&self.sequence, Sequence::ExternalList(list) if list.is_loading())
    }

    /// Status text such as `| i4 |`.
    pub fn iteration_label(&self) -> String {
        if self.is_loading() {
            return "| Loading OEIS sequence... |".to_string();
        }
        match self.sequence.iteration() {
            0 => "|".to_string(),
            n => format!("| i{} |", n - 1),
        }
    }

    /// Collect a pending fetch ticket, if the external list has one.
    pub fn take_fetch_request(&mut self) -> Option<FetchTicket> {
        match &mut self.sequence {
            Sequence::ExternalList(list) => list.take_request(),
            _ => None,
        }
    }

    /// Deliver a fetch answer. Returns `false` if it was stale.
    pub fn resolve_fetch(
        &mut self,
        ticket: &FetchTicket,
        answer: Result<Resolved, FetchError>,
    ) -> bool {
        match &mut self.sequence {
            Sequence::ExternalList(list) => list.resolve(ticket, answer),
            _ => {
                debug!(id = %ticket.id(), "fetch answer arrived after switching sequence");
                false
            }
        }
    }

    /// Resolve a pending fetch synchronously against `source`.
    pub fn fulfil(&mut self, source: &dyn SequenceSource) -> bool {
        match self.take_fetch_request() {
            Some(ticket) => {
                let answer = source.fetch(ticket.id());
                self.resolve_fetch(&ticket, answer)
            }
            None => false,
        }
    }

    /// Step up to `count` times from `key`, resolving fetches against
    /// `source`, and collect the emitted keys. Stops early when the sequence
    /// finishes or requests a restart.
    pub fn take(
        &mut self,
        key: &BigInt,
        count: usize,
        source: &dyn SequenceSource,
    ) -> Result<Vec<BigInt>, SequenceError> {
        let mut key = key.clone();
        let mut keys = Vec::with_capacity(count.min(1024));
        while keys.len() < count {
            match self.step(&key)? {
                Step::Emit(value) => {
                    key = value.clone();
                    keys.push(value);
                }
                Step::Loading => {
                    if !self.fulfil(source) {
                        break;
                    }
                }
                Step::Finished | Step::Restart => break,
            }
        }
        Ok(keys)
    }
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(SequenceKind::Collatz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::BuiltinCatalog;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    #[test]
    fn test_frame_rate_clamps() {
        let mut sequencer = Sequencer::default();
        assert_eq!(sequencer.frame_rate(), 10);
        sequencer.set_frame_rate(500);
        assert_eq!(sequencer.frame_rate(), 60);
        sequencer.faster();
        assert_eq!(sequencer.frame_rate(), 60);
        sequencer.set_frame_rate(2);
        sequencer.slower();
        sequencer.slower();
        assert_eq!(sequencer.frame_rate(), 1);
        assert_eq!(sequencer.frame_interval(), Duration::from_secs(1));
    }

    #[test]
    fn test_iteration_label() {
        let mut sequencer = Sequencer::new(SequenceKind::Fibonacci);
        assert_eq!(sequencer.iteration_label(), "|");
        sequencer.step(&big(0)).unwrap();
        assert_eq!(sequencer.iteration_label(), "| i0 |");
        sequencer.step(&big(0)).unwrap();
        assert_eq!(sequencer.iteration_label(), "| i1 |");
    }

    #[test]
    fn test_finishing_stops_playback() {
        let mut sequencer = Sequencer::new(SequenceKind::Collatz);
        sequencer.play();
        assert_eq!(sequencer.step(&big(2)).unwrap(), Step::Emit(big(1)));
        assert!(!sequencer.is_playing());

        sequencer.play();
        assert_eq!(sequencer.step(&big(1)).unwrap(), Step::Finished);
        assert!(!sequencer.is_playing());
    }

    #[test]
    fn test_restart_resets() {
        let mut sequencer = Sequencer::new(SequenceKind::Collatz);
        sequencer.step(&big(4)).unwrap();
        sequencer.play();
        assert_eq!(sequencer.step(&big(0)).unwrap(), Step::Restart);
        assert!(!sequencer.is_playing());
        assert_eq!(sequencer.sequence().iteration(), 0);
    }

    #[test]
    fn test_error_resets_and_surfaces() {
        let mut sequencer = Sequencer::new(SequenceKind::CustomList);
        sequencer.set_custom_list("1, 2, oops");
        sequencer.play();
        assert!(sequencer.step(&big(0)).is_err());
        assert!(!sequencer.is_playing());
    }

    #[test]
    fn test_inputs_survive_switching() {
        let mut sequencer = Sequencer::new(SequenceKind::CustomList);
        sequencer.set_custom_list("3, 4");
        sequencer.cycle();
        assert_eq!(sequencer.kind(), SequenceKind::Collatz);

        sequencer.select(SequenceKind::CustomList);
        assert_eq!(sequencer.step(&big(0)).unwrap(), Step::Emit(big(3)));
    }

    #[test]
    fn test_external_fetch_through_catalog() {
        let mut sequencer = Sequencer::new(SequenceKind::ExternalList);
        sequencer.set_oeis_id("A000129");
        assert_eq!(sequencer.step(&big(0)).unwrap(), Step::Loading);
        assert_eq!(sequencer.iteration_label(), "| Loading OEIS sequence... |");

        assert!(sequencer.fulfil(&BuiltinCatalog::new()));
        assert!(!sequencer.fulfil(&BuiltinCatalog::new()));

        let values: Vec<Step> = (0..4).map(|_| sequencer.step(&big(0)).unwrap()).collect();
        assert_eq!(
            values,
            vec![
                Step::Emit(big(0)),
                Step::Emit(big(1)),
                Step::Emit(big(2)),
                Step::Emit(big(5))
            ]
        );
    }

    #[test]
    fn test_take_follows_collatz() {
        let mut sequencer = Sequencer::new(SequenceKind::Collatz);
        let keys = sequencer.take(&big(6), 100, &BuiltinCatalog::new()).unwrap();
        assert_eq!(keys.len(), 8);
        assert_eq!(keys.last(), Some(&big(1)));
    }

    #[test]
    fn test_take_surfaces_unknown_sequence() {
        let mut sequencer = Sequencer::new(SequenceKind::ExternalList);
        sequencer.set_oeis_id("A999999");
        let err = sequencer.take(&big(0), 3, &BuiltinCatalog::new()).unwrap_err();
        assert!(matches!(err, SequenceError::Unavailable { .. }));
    }

    #[test]
    fn test_answer_after_switch_is_stale() {
        let mut sequencer = Sequencer::new(SequenceKind::ExternalList);
        sequencer.set_oeis_id("A000045");
        sequencer.step(&big(0)).unwrap();
        let ticket = sequencer.take_fetch_request().unwrap();

        sequencer.select(SequenceKind::Pell);
        let answer = BuiltinCatalog::new().fetch(ticket.id());
        assert!(!sequencer.resolve_fetch(&ticket, answer));
    }
}
