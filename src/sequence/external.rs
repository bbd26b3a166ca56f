//! Sequences resolved by an external collaborator
//!
//! [`ExternalList`] never blocks. Its first `next()` issues a [`FetchTicket`]
//! and reports [`Step::Loading`]; the driver collects the ticket with
//! [`ExternalList::take_request`], resolves it however it likes and hands the
//! answer back through [`ExternalList::resolve`]. Every ticket carries a token,
//! and answers whose token no longer matches the pending one are discarded, so
//! a reset or a new identifier always wins over an in-flight fetch.
//!
//! ```text
//! NotStarted --next()--> Pending --resolve(Ok)--> Ready
//!                           |
//!                           +----resolve(Err)---> Failed
//! ```

use super::list::emit_next;
use super::{Generator, Progress, SequenceError, Step};
use num_bigint::BigInt;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Tokens are unique across every list instance in the process
static NEXT_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Validated OEIS identifier: one letter and six digits, upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OeisId(String);

impl OeisId {
    pub fn parse(text: &str) -> Result<Self, SequenceError> {
        let trimmed = text.trim();
        let mut chars = trimmed.chars();
        let valid = matches!(chars.next(), Some(c) if c.is_ascii_alphabetic())
            && trimmed.len() == 7
            && chars.all(|c| c.is_ascii_digit());
        if valid {
            Ok(OeisId(trimmed.to_ascii_uppercase()))
        } else {
            Err(SequenceError::InvalidIdentifier {
                identifier: trimmed.to_string(),
            })
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The sequence's page on oeis.org
    pub fn url(&self) -> String {
        format!("https://oeis.org/{}", self.0)
    }
}

impl fmt::Display for OeisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A request for the driver to resolve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    token: u64,
    id: OeisId,
}

impl FetchTicket {
    pub fn id(&self) -> &OeisId {
        &self.id
    }

    pub fn token(&self) -> u64 {
        self.token
    }
}

/// A successful answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolved {
    pub name: String,
    pub values: Vec<BigInt>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    #[error("no sequence is known under {id}")]
    UnknownSequence { id: String },

    #[error("{id} has no terms")]
    Empty { id: String },

    /// The fetch worker went away before answering
    #[error("fetch worker disconnected")]
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    NotStarted,
    /// `dispatched` is set once the driver has collected the ticket
    Pending { ticket: FetchTicket, dispatched: bool },
    Ready(Resolved),
    Failed { id: OeisId, error: FetchError },
}

#[derive(Debug, Clone)]
pub struct ExternalList {
    identifier: String,
    state: FetchState,
    progress: Progress,
}

impl ExternalList {
    pub fn new(identifier: impl Into<String>) -> Self {
        ExternalList {
            identifier: identifier.into(),
            state: FetchState::NotStarted,
            progress: Progress::default(),
        }
    }

    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    /// Replace the identifier and re-arm. Any in-flight answer becomes stale.
    pub fn set_identifier(&mut self, identifier: impl Into<String>) {
        self.identifier = identifier.into();
        self.reset();
    }

    pub fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FetchState::Pending { .. })
    }

    /// Name reported by the collaborator, once resolved.
    pub fn name(&self) -> Option<&str> {
        match &self.state {
            FetchState::Ready(resolved) => Some(&resolved.name),
            _ => None,
        }
    }

    pub fn link(&self) -> Option<String> {
        OeisId::parse(&self.identifier).ok().map(|id| id.url())
    }

    /// Hand out the pending ticket. Each ticket is handed out once.
    pub fn take_request(&mut self) -> Option<FetchTicket> {
        match &mut self.state {
            FetchState::Pending { ticket, dispatched } if !*dispatched => {
                *dispatched = true;
                Some(ticket.clone())
            }
            _ => None,
        }
    }

    /// Apply an answer. Returns `false` if the ticket is stale and the answer
    /// was dropped.
    pub fn resolve(&mut self, ticket: &FetchTicket, answer: Result<Resolved, FetchError>) -> bool {
        let current = match &self.state {
            FetchState::Pending { ticket: pending, .. } if pending.token == ticket.token => {
                pending.id.clone()
            }
            _ => {
                debug!(id = %ticket.id, token = ticket.token, "discarding stale fetch answer");
                return false;
            }
        };

        self.state = match answer {
            Ok(resolved) if resolved.values.is_empty() => {
                warn!(id = %current, "fetched sequence has no terms");
                FetchState::Failed {
                    error: FetchError::Empty {
                        id: current.to_string(),
                    },
                    id: current,
                }
            }
            Ok(resolved) => {
                info!(id = %current, name = %resolved.name, terms = resolved.values.len(), "sequence fetched");
                FetchState::Ready(resolved)
            }
            Err(error) => {
                warn!(id = %current, error = %error, "sequence fetch failed");
                FetchState::Failed { id: current, error }
            }
        };
        true
    }

    fn issue_ticket(&mut self) -> Result<(), SequenceError> {
        let id = OeisId::parse(&self.identifier).map_err(|e| {
            warn!(error = %e, "rejected sequence identifier");
            e
        })?;
        let token = NEXT_TOKEN.fetch_add(1, Ordering::Relaxed);
        debug!(id = %id, token, "issuing fetch ticket");
        self.state = FetchState::Pending {
            ticket: FetchTicket { token, id },
            dispatched: false,
        };
        Ok(())
    }
}

impl Generator for ExternalList {
    fn reset(&mut self) {
        self.state = FetchState::NotStarted;
        self.progress.reset();
    }

    fn next(&mut self, _key: &BigInt) -> Result<Step, SequenceError> {
        match &self.state {
            FetchState::NotStarted => {
                self.issue_ticket()?;
                Ok(Step::Loading)
            }
            FetchState::Pending { .. } => Ok(Step::Loading),
            FetchState::Failed { id, error } => Err(SequenceError::Unavailable {
                id: id.to_string(),
                reason: error.to_string(),
            }),
            FetchState::Ready(resolved) => Ok(emit_next(&resolved.values, &mut self.progress)),
        }
    }

    fn progress(&self) -> &Progress {
        &self.progress
    }
}
