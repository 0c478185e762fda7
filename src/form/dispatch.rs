//! Runs shortening requests off the event loop
//!
//! Each accepted submit spawns one tokio task. When the call completes the
//! task sends a [`Settlement`] tagged with the submission's sequence
//! number; the owner of the form feeds it back through
//! [`ShortenerForm::settle`], which drops anything stale.

use super::{InputRejection, ShortenerForm};
use crate::shortener::{ShortenError, Shortener};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Channel depth for completed requests
const SETTLEMENT_BUFFER: usize = 32;

/// Outcome of one request, tagged with its submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settlement {
    pub seq: u64,
    pub outcome: Result<String, ShortenError>,
}

/// Spawns requests for a form and reports their settlements
#[derive(Clone)]
pub struct Dispatcher {
    shortener: Arc<dyn Shortener>,
    tx: mpsc::Sender<Settlement>,
}

impl Dispatcher {
    /// Create a dispatcher and the receiver its settlements arrive on
    pub fn new(shortener: Arc<dyn Shortener>) -> (Self, mpsc::Receiver<Settlement>) {
        let (tx, rx) = mpsc::channel(SETTLEMENT_BUFFER);
        (Self { shortener, tx }, rx)
    }

    /// Submit the form's current input
    ///
    /// Returns the sequence number of the request now in flight. Must be
    /// called from within a tokio runtime.
    pub fn submit(&self, form: &mut ShortenerForm) -> Result<u64, InputRejection> {
        let ticket = form.begin_submit()?;
        let seq = ticket.seq;

        tracing::info!(
            "Submitting #{} via {}: {}",
            seq,
            self.shortener.name(),
            ticket.long_url
        );

        let shortener = Arc::clone(&self.shortener);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let outcome = shortener.shorten(&ticket.long_url).await;
            // Receiver gone means the UI shut down; nothing left to update
            if tx.send(Settlement { seq, outcome }).await.is_err() {
                tracing::debug!("Settlement #{} dropped: form closed", seq);
            }
        });

        Ok(seq)
    }
}
