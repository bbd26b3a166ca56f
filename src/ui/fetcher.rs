//! Background fetch worker
//!
//! The worker owns a [`SequenceSource`] and answers [`FetchTicket`]s over
//! channels, so the event loop never waits on a fetch. Answers come back
//! tagged with their ticket; the sequencer decides whether they are stale.

use crate::sequence::{FetchError, FetchTicket, Resolved, SequenceSource};
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use tracing::{debug, warn};

pub type Answer = (FetchTicket, Result<Resolved, FetchError>);

pub struct Fetcher {
    requests: Option<Sender<FetchTicket>>,
    answers: Receiver<Answer>,
    handle: Option<thread::JoinHandle<()>>,
}

impl Fetcher {
    pub fn spawn<S>(source: S) -> Self
    where
        S: SequenceSource + Send + 'static,
    {
        let (request_tx, request_rx) = mpsc::channel::<FetchTicket>();
        let (answer_tx, answer_rx) = mpsc::channel();
        let handle = thread::spawn(move || {
            for ticket in request_rx {
                debug!(id = %ticket.id(), token = ticket.token(), "fetch worker resolving");
                let answer = source.fetch(ticket.id());
                if answer_tx.send((ticket, answer)).is_err() {
                    return;
                }
            }
        });
        Fetcher {
            requests: Some(request_tx),
            answers: answer_rx,
            handle: Some(handle),
        }
    }

    /// Queue a ticket. Fails if the worker is gone; the error is returned
    /// with the ticket so the caller can resolve it as failed.
    pub fn submit(&self, ticket: FetchTicket) -> Result<(), Answer> {
        match &self.requests {
            Some(tx) => tx.send(ticket).map_err(|mpsc::SendError(ticket)| {
                warn!("fetch worker is gone");
                (ticket, Err(FetchError::Disconnected))
            }),
            None => Err((ticket, Err(FetchError::Disconnected))),
        }
    }

    /// Next finished answer, if any.
    pub fn try_recv(&self) -> Option<Answer> {
        match self.answers.try_recv() {
            Ok(answer) => Some(answer),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        // closing the request channel ends the worker loop
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::{BuiltinCatalog, Sequencer, SequenceKind, Step};
    use num_bigint::BigInt;
    use std::time::{Duration, Instant};

    fn wait_for_answer(fetcher: &Fetcher) -> Answer {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            if let Some(answer) = fetcher.try_recv() {
                return answer;
            }
            assert!(Instant::now() < deadline, "fetch worker did not answer");
            thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn test_worker_resolves_tickets() {
        let fetcher = Fetcher::spawn(BuiltinCatalog::new());
        let mut sequencer = Sequencer::new(SequenceKind::ExternalList);
        sequencer.set_oeis_id("A000142");

        let key = BigInt::from(0);
        assert_eq!(sequencer.step(&key).unwrap(), Step::Loading);
        let ticket = sequencer.take_fetch_request().unwrap();
        assert!(fetcher.submit(ticket).is_ok());

        let (ticket, answer) = wait_for_answer(&fetcher);
        assert!(sequencer.resolve_fetch(&ticket, answer));
        assert_eq!(sequencer.step(&key).unwrap(), Step::Emit(BigInt::from(1)));
    }
}
