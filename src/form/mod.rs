//! The shortener form: submission state and its transitions
//!
//! [`ShortenerForm`] is single-owner state driven by one event loop. It
//! never performs I/O itself; [`Dispatcher`] runs the network call and
//! hands the result back as a [`Settlement`].
//!
//! # Submission cycle
//!
//! ```text
//! Idle ──begin_submit──▶ Submitting ──settle(latest seq)──▶ Succeeded | Failed
//!   ▲                        │                                    │
//!   └────────────────────────┴──────── next begin_submit ─────────┘
//!
//! Succeeded: NotCopied ──copy──▶ Copied | CopyFailed
//! ```
//!
//! Every accepted submit gets a fresh sequence number. Only a settlement
//! carrying the latest number is applied, so a slow older request can
//! never overwrite a newer result.

mod dispatch;

pub use dispatch::{Dispatcher, Settlement};

use crate::clipboard::ClipboardWriter;
use crate::shortener::ShortenError;
use reqwest::Url;

/// Observable state of one form
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionState {
    /// Text in the URL input
    pub long_url: String,
    /// Short URL of the last successful submission
    pub short_url: Option<String>,
    /// User-facing message of the last failed submission
    pub error_message: Option<String>,
    /// A request for the latest submission is in flight
    pub is_loading: bool,
    /// The short URL was written to the clipboard
    pub is_copied: bool,
    /// The last clipboard write was rejected
    pub copy_failed: bool,
}

/// Where the form is in its submission cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

/// Result of the copy action, as shown on the copy button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyStatus {
    NotCopied,
    Copied,
    Failed,
}

impl CopyStatus {
    /// Button label
    pub fn label(&self) -> &'static str {
        match self {
            Self::NotCopied => "Copy",
            Self::Copied => "Copied!",
            Self::Failed => "Copy failed",
        }
    }
}

/// Why the input control refused to submit
///
/// Mirrors what a native `type=url` input checks, nothing more.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputRejection {
    Empty,
    NotAUrl,
}

impl InputRejection {
    /// Hint shown next to the input
    pub fn hint(&self) -> &'static str {
        match self {
            Self::Empty => "Please fill out this field.",
            Self::NotAUrl => "Please enter a URL.",
        }
    }
}

/// An accepted submission, to be run by the dispatcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitTicket {
    pub seq: u64,
    pub long_url: String,
}

/// Whether a settlement changed the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Settle {
    Applied,
    Stale,
}

/// Check input the way a native URL control does
///
/// Surrounding whitespace is stripped, then the value must be an absolute URL.
pub fn validate_url(input: &str) -> Result<String, InputRejection> {
    let value = input.trim();
    if value.is_empty() {
        return Err(InputRejection::Empty);
    }
    Url::parse(value).map_err(|_| InputRejection::NotAUrl)?;
    Ok(value.to_string())
}

/// The single form component's state machine
#[derive(Debug, Default)]
pub struct ShortenerForm {
    state: SubmissionState,
    /// Cursor position in the input, in chars
    cursor: usize,
    /// Sequence number of the latest accepted submission (0 = none yet)
    latest_seq: u64,
}

impl ShortenerForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &SubmissionState {
        &self.state
    }

    pub fn input(&self) -> &str {
        &self.state.long_url
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    #[cfg(test)]
    pub fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    pub fn phase(&self) -> FormPhase {
        if self.state.is_loading {
            FormPhase::Submitting
        } else if self.state.short_url.is_some() {
            FormPhase::Succeeded
        } else if self.state.error_message.is_some() {
            FormPhase::Failed
        } else {
            FormPhase::Idle
        }
    }

    pub fn copy_status(&self) -> CopyStatus {
        if self.state.is_copied {
            CopyStatus::Copied
        } else if self.state.copy_failed {
            CopyStatus::Failed
        } else {
            CopyStatus::NotCopied
        }
    }

    // ─────────────────────────────────────────────────────────────────────
    // Submission
    // ─────────────────────────────────────────────────────────────────────

    /// Start a submission with the current input
    ///
    /// On success the form is busy, prior result, error and copy flags are
    /// cleared, and the returned ticket carries the new sequence number.
    /// A rejected input leaves the state untouched.
    pub fn begin_submit(&mut self) -> Result<SubmitTicket, InputRejection> {
        let long_url = validate_url(&self.state.long_url)?;

        self.latest_seq += 1;
        self.state.is_loading = true;
        self.state.error_message = None;
        self.state.short_url = None;
        self.state.is_copied = false;
        self.state.copy_failed = false;

        Ok(SubmitTicket {
            seq: self.latest_seq,
            long_url,
        })
    }

    /// Apply the outcome of submission `seq`
    ///
    /// Settlements for anything but the latest in-flight submission are
    /// discarded.
    pub fn settle(&mut self, seq: u64, outcome: Result<String, ShortenError>) -> Settle {
        if seq != self.latest_seq || !self.state.is_loading {
            tracing::debug!(
                "Discarding stale response #{} (latest is #{})",
                seq,
                self.latest_seq
            );
            return Settle::Stale;
        }

        self.state.is_loading = false;
        match outcome {
            Ok(short_url) => {
                tracing::info!("Shortened #{} -> {}", seq, short_url);
                self.state.error_message = None;
                self.state.short_url = Some(short_url);
            }
            Err(err) => {
                match &err {
                    ShortenError::Logical => {
                        tracing::warn!("Shortening #{} returned no short URL: {}", seq, err)
                    }
                    ShortenError::Transport { .. } => {
                        tracing::error!("Request #{} error: {}", seq, err)
                    }
                }
                self.state.short_url = None;
                self.state.error_message = Some(err.user_message().to_string());
            }
        }
        Settle::Applied
    }

    // ─────────────────────────────────────────────────────────────────────
    // Copy
    // ─────────────────────────────────────────────────────────────────────

    /// Copy the displayed short URL to `clipboard`
    ///
    /// No-op when there is nothing displayed.
    pub fn copy(&mut self, clipboard: &mut dyn ClipboardWriter) -> CopyStatus {
        let Some(short_url) = self.state.short_url.as_deref() else {
            tracing::debug!("Copy requested with no short URL displayed");
            return self.copy_status();
        };

        match clipboard.write_text(short_url) {
            Ok(()) => {
                self.state.is_copied = true;
                self.state.copy_failed = false;
            }
            Err(e) => {
                tracing::warn!("{}", e);
                self.state.is_copied = false;
                self.state.copy_failed = true;
            }
        }
        self.copy_status()
    }

    // ─────────────────────────────────────────────────────────────────────
    // Input editing
    // ─────────────────────────────────────────────────────────────────────

    fn byte_index(&self, char_idx: usize) -> usize {
        self.state
            .long_url
            .char_indices()
            .nth(char_idx)
            .map(|(i, _)| i)
            .unwrap_or(self.state.long_url.len())
    }

    fn char_len(&self) -> usize {
        self.state.long_url.chars().count()
    }

    /// Replace the whole input, cursor at the end
    pub fn set_input(&mut self, text: impl Into<String>) {
        self.state.long_url = text.into();
        self.cursor = self.char_len();
    }

    pub fn clear_input(&mut self) {
        self.state.long_url.clear();
        self.cursor = 0;
    }

    pub fn insert_char(&mut self, c: char) {
        let idx = self.byte_index(self.cursor);
        self.state.long_url.insert(idx, c);
        self.cursor += 1;
    }

    /// Insert a pasted string at the cursor, dropping line breaks
    pub fn insert_str(&mut self, text: &str) {
        for c in text.chars().filter(|c| *c != '\n' && *c != '\r') {
            self.insert_char(c);
        }
    }

    /// Delete the char before the cursor
    pub fn backspace(&mut self) {
        if self.cursor == 0 {
            return;
        }
        self.cursor -= 1;
        let idx = self.byte_index(self.cursor);
        self.state.long_url.remove(idx);
    }

    /// Delete the char under the cursor
    pub fn delete(&mut self) {
        if self.cursor >= self.char_len() {
            return;
        }
        let idx = self.byte_index(self.cursor);
        self.state.long_url.remove(idx);
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        self.cursor = (self.cursor + 1).min(self.char_len());
    }

    pub fn home(&mut self) {
        self.cursor = 0;
    }

    pub fn end(&mut self) {
        self.cursor = self.char_len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clipboard::fake::{BrokenClipboard, RecordingClipboard};
    use crate::shortener::{LOGICAL_FAILURE_MESSAGE, TRANSPORT_FAILURE_MESSAGE};

    fn form_with(input: &str) -> ShortenerForm {
        let mut form = ShortenerForm::new();
        form.set_input(input);
        form
    }

    fn succeeded(short: &str) -> ShortenerForm {
        let mut form = form_with("https://example.com/long");
        let ticket = form.begin_submit().unwrap();
        form.settle(ticket.seq, Ok(short.to_string()));
        form
    }

    #[test]
    fn test_new_form_is_idle() {
        let form = ShortenerForm::new();

        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.state(), &SubmissionState::default());
        assert_eq!(form.copy_status(), CopyStatus::NotCopied);
    }

    #[test]
    fn test_submit_sets_busy_and_issues_increasing_tickets() {
        let mut form = form_with("  https://example.com/a  ");

        let first = form.begin_submit().unwrap();
        assert_eq!(first.long_url, "https://example.com/a");
        assert_eq!(form.phase(), FormPhase::Submitting);
        assert!(form.state().is_loading);

        let second = form.begin_submit().unwrap();
        assert!(second.seq > first.seq);
        assert_eq!(form.latest_seq(), second.seq);
    }

    #[test]
    fn test_success_stores_short_url_and_clears_error() {
        let mut form = form_with("https://example.com");
        let ticket = form.begin_submit().unwrap();
        form.settle(ticket.seq, Err(ShortenError::Logical));
        assert!(form.state().error_message.is_some());

        let ticket = form.begin_submit().unwrap();
        assert!(form.state().error_message.is_none(), "submit clears error");

        let applied = form.settle(ticket.seq, Ok("https://tinyurl.com/x".to_string()));

        assert_eq!(applied, Settle::Applied);
        assert_eq!(form.state().short_url.as_deref(), Some("https://tinyurl.com/x"));
        assert!(form.state().error_message.is_none());
        assert!(!form.state().is_loading);
        assert_eq!(form.phase(), FormPhase::Succeeded);
    }

    #[test]
    fn test_logical_failure_sets_message_and_no_result() {
        let mut form = form_with("https://example.com");
        let ticket = form.begin_submit().unwrap();

        form.settle(ticket.seq, Err(ShortenError::Logical));

        assert_eq!(
            form.state().error_message.as_deref(),
            Some(LOGICAL_FAILURE_MESSAGE)
        );
        assert!(form.state().short_url.is_none());
        assert!(!form.state().is_loading);
        assert_eq!(form.phase(), FormPhase::Failed);
    }

    #[test]
    fn test_transport_failure_message_differs_from_logical() {
        let mut form = form_with("https://example.com");
        let ticket = form.begin_submit().unwrap();

        form.settle(
            ticket.seq,
            Err(ShortenError::transport(None, "connection refused")),
        );

        let message = form.state().error_message.clone().unwrap();
        assert_eq!(message, TRANSPORT_FAILURE_MESSAGE);
        assert_ne!(message, LOGICAL_FAILURE_MESSAGE);
        assert!(form.state().short_url.is_none());
        assert!(!form.state().is_loading);
    }

    #[test]
    fn test_stale_settlement_is_discarded() {
        let mut form = form_with("https://example.com/one");
        let first = form.begin_submit().unwrap();
        form.set_input("https://example.com/two");
        let second = form.begin_submit().unwrap();

        // Older response arrives while the newer one is still in flight
        assert_eq!(
            form.settle(first.seq, Ok("https://tinyurl.com/one".to_string())),
            Settle::Stale
        );
        assert!(form.state().is_loading);
        assert!(form.state().short_url.is_none());

        form.settle(second.seq, Ok("https://tinyurl.com/two".to_string()));

        // Older response arrives after the newer one settled
        assert_eq!(
            form.settle(first.seq, Err(ShortenError::Logical)),
            Settle::Stale
        );
        assert_eq!(
            form.state().short_url.as_deref(),
            Some("https://tinyurl.com/two")
        );
        assert!(form.state().error_message.is_none());
    }

    #[test]
    fn test_duplicate_settlement_is_discarded() {
        let mut form = form_with("https://example.com");
        let ticket = form.begin_submit().unwrap();
        form.settle(ticket.seq, Ok("https://tinyurl.com/a".to_string()));

        assert_eq!(form.settle(ticket.seq, Err(ShortenError::Logical)), Settle::Stale);
        assert_eq!(form.phase(), FormPhase::Succeeded);
    }

    #[test]
    fn test_rejected_input_leaves_state_untouched() {
        let mut form = succeeded("https://tinyurl.com/keep");
        form.set_input("   ");
        let before = form.state().clone();
        let seq = form.latest_seq();

        assert_eq!(form.begin_submit(), Err(InputRejection::Empty));
        form.set_input("not a url");
        assert_eq!(form.begin_submit(), Err(InputRejection::NotAUrl));

        assert_eq!(form.state().short_url, before.short_url);
        assert_eq!(form.latest_seq(), seq);
        assert!(!form.state().is_loading);
    }

    #[test]
    fn test_copy_writes_exact_short_url() {
        let mut form = succeeded("https://tinyurl.com/abc123");
        let mut clipboard = RecordingClipboard::default();

        let status = form.copy(&mut clipboard);

        assert_eq!(status, CopyStatus::Copied);
        assert!(form.state().is_copied);
        assert_eq!(clipboard.writes, vec!["https://tinyurl.com/abc123"]);
    }

    #[test]
    fn test_copy_failure_is_surfaced() {
        let mut form = succeeded("https://tinyurl.com/abc123");

        let status = form.copy(&mut BrokenClipboard);

        assert_eq!(status, CopyStatus::Failed);
        assert!(!form.state().is_copied);
        assert!(form.state().copy_failed);
        assert_eq!(status.label(), "Copy failed");
    }

    #[test]
    fn test_copy_without_result_does_nothing() {
        let mut form = ShortenerForm::new();
        let mut clipboard = RecordingClipboard::default();

        assert_eq!(form.copy(&mut clipboard), CopyStatus::NotCopied);
        assert!(clipboard.writes.is_empty());
    }

    #[test]
    fn test_new_submission_resets_copied() {
        let mut form = succeeded("https://tinyurl.com/abc123");
        form.copy(&mut RecordingClipboard::default());
        assert!(form.state().is_copied);

        form.begin_submit().unwrap();

        assert!(!form.state().is_copied);
        assert!(!form.state().copy_failed);
    }

    #[test]
    fn test_editing_handles_multibyte_chars() {
        let mut form = ShortenerForm::new();
        for c in "https://é.com".chars() {
            form.insert_char(c);
        }
        assert_eq!(form.cursor(), 13);

        form.move_left();
        form.move_left();
        form.move_left();
        form.move_left();
        form.backspace(); // removes 'é'
        assert_eq!(form.input(), "https://.com");

        form.home();
        form.delete();
        assert_eq!(form.input(), "ttps://.com");

        form.end();
        form.move_right();
        assert_eq!(form.cursor(), 11);
    }

    #[test]
    fn test_paste_drops_line_breaks() {
        let mut form = ShortenerForm::new();
        form.insert_str("https://example.com/\r\npath\n");
        assert_eq!(form.input(), "https://example.com/path");
    }

    #[test]
    fn test_validate_url_accepts_absolute_urls_only() {
        assert!(validate_url("https://example.com").is_ok());
        assert!(validate_url("ftp://files.example.com/a").is_ok());
        assert_eq!(validate_url("example.com"), Err(InputRejection::NotAUrl));
        assert_eq!(validate_url(""), Err(InputRejection::Empty));
    }
}
