//! One-shot shortening without the TUI
//!
//! Drives the same form and dispatcher the TUI uses, for a single URL,
//! and reports the settled state.

use crate::clipboard::ClipboardWriter;
use crate::form::{CopyStatus, Dispatcher, InputRejection, ShortenerForm};
use crate::shortener::{Shortener, TRANSPORT_FAILURE_MESSAGE};
use std::sync::Arc;

/// Result of a one-shot run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Short URL, and the copy result when a copy was requested
    Shortened {
        short_url: String,
        copied: Option<CopyStatus>,
    },
    /// Input rejected before any request was made
    Rejected(InputRejection),
    /// Request failed; the message is the user-facing one
    Failed(String),
}

/// Shorten `long_url` once, optionally copying the result
pub async fn shorten_once(
    shortener: Arc<dyn Shortener>,
    long_url: &str,
    copy: bool,
    clipboard: &mut dyn ClipboardWriter,
) -> Outcome {
    let (dispatcher, mut rx) = Dispatcher::new(shortener);
    let mut form = ShortenerForm::new();
    form.set_input(long_url);

    if let Err(rejection) = dispatcher.submit(&mut form) {
        return Outcome::Rejected(rejection);
    }

    // Single submission, so the first settlement is the latest one
    if let Some(settlement) = rx.recv().await {
        form.settle(settlement.seq, settlement.outcome);
    }

    if let Some(short_url) = form.state().short_url.clone() {
        let copied = copy.then(|| form.copy(clipboard));
        return Outcome::Shortened { short_url, copied };
    }

    let message = form
        .state()
        .error_message
        .clone()
        .unwrap_or_else(|| TRANSPORT_FAILURE_MESSAGE.to_string());
    Outcome::Failed(message)
}

/// Print an outcome: the short URL on stdout, everything else on stderr
///
/// Returns false when the run failed.
pub fn report(outcome: &Outcome) -> bool {
    match outcome {
        Outcome::Shortened { short_url, copied } => {
            println!("{}", short_url);
            match copied {
                Some(CopyStatus::Copied) => eprintln!("Copied!"),
                Some(CopyStatus::Failed) => eprintln!("Copy failed"),
                _ => {}
            }
            true
        }
        Outcome::Rejected(rejection) => {
            eprintln!("{}", rejection.hint());
            false
        }
        Outcome::Failed(message) => {
            eprintln!("{}", message);
            false
        }
    }
}
