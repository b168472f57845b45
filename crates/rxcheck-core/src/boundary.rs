//! Deadline-bounded calls into external collaborators.
//!
//! Tagger and scorer calls are the only blocking points of a validation. With
//! a deadline set, the call runs on a helper thread and the validator waits
//! at most that long; a late call is abandoned and its result discarded when
//! it eventually arrives. All request state stays with the caller, so an
//! abandoned call cannot leave anything half-written.
//!
//! An abandoned call keeps its helper thread until the collaborator returns.
//! A collaborator that hangs forever costs one thread per timed-out call, so
//! a hung model has to be restarted.

use std::{
    fmt,
    sync::mpsc::{self, RecvTimeoutError},
    thread,
    time::Duration,
};

use tracing::warn;

use rxcheck_contracts::error::{RxError, RxResult};

/// Which collaborator a bounded call talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collaborator {
    Tagger,
    Scorer,
}

impl Collaborator {
    /// The "unavailable" error for this collaborator.
    pub fn unavailable(self, reason: impl Into<String>) -> RxError {
        match self {
            Collaborator::Tagger => RxError::TaggerUnavailable { reason: reason.into() },
            Collaborator::Scorer => RxError::ScorerUnavailable { reason: reason.into() },
        }
    }
}

impl fmt::Display for Collaborator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collaborator::Tagger => f.write_str("tagger"),
            Collaborator::Scorer => f.write_str("scorer"),
        }
    }
}

/// Run `call`, giving up after `timeout` when one is set.
///
/// Without a deadline the call runs inline on the current thread.
pub fn call_with_deadline<T, F>(who: Collaborator, timeout: Option<Duration>, call: F) -> RxResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> RxResult<T> + Send + 'static,
{
    let Some(timeout) = timeout else {
        return call();
    };

    let (tx, rx) = mpsc::sync_channel(1);
    thread::Builder::new()
        .name(format!("rxcheck-{who}"))
        .spawn(move || {
            // The receiver is gone when the deadline already passed.
            let _ = tx.send(call());
        })
        .map_err(|e| who.unavailable(format!("could not start call: {e}")))?;

    match rx.recv_timeout(timeout) {
        Ok(result) => result,
        Err(RecvTimeoutError::Timeout) => {
            let timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX);
            warn!(collaborator = %who, timeout_ms, "collaborator call abandoned after deadline");
            Err(RxError::Timeout {
                capability: who.to_string(),
                timeout_ms,
            })
        }
        Err(RecvTimeoutError::Disconnected) => {
            Err(who.unavailable("call terminated without a result"))
        }
    }
}
