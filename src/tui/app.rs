// TUI application state
//
// Owns the form, routes keys to it, and applies settlements that arrive
// from the dispatcher. Rendering lives in `ui.rs`; this module has no
// terminal I/O so it can be driven directly in tests.

use super::theme::{Theme, ThemeKind};
use crate::clipboard::ClipboardWriter;
use crate::config::Config;
use crate::form::{Dispatcher, FormPhase, InputRejection, Settle, Settlement, ShortenerForm};
use crate::logging::LogBuffer;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Widgets that can hold focus, in Tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Input,
    Submit,
    Copy,
}

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed
    Yes,
    /// Event was not handled, should bubble up
    No,
}

/// Main application state for the TUI
pub struct App {
    pub form: ShortenerForm,
    dispatcher: Dispatcher,
    clipboard: Box<dyn ClipboardWriter>,

    /// Widget receiving keys
    pub focus: Focus,

    /// Native-control style hint after a rejected submit
    pub input_hint: Option<&'static str>,

    /// Whether the logs panel is visible (F2)
    pub show_logs: bool,

    /// Log buffer for the logs panel
    pub log_buffer: LogBuffer,

    pub theme: Theme,

    /// Frame counter for the busy spinner
    pub animation_frame: usize,

    /// Whether the app should quit
    pub should_quit: bool,
}

impl App {
    pub fn new(
        config: &Config,
        dispatcher: Dispatcher,
        clipboard: Box<dyn ClipboardWriter>,
        log_buffer: LogBuffer,
    ) -> Self {
        Self {
            form: ShortenerForm::new(),
            dispatcher,
            clipboard,
            focus: Focus::default(),
            input_hint: None,
            show_logs: false,
            log_buffer,
            theme: ThemeKind::from_name(&config.theme).theme(),
            animation_frame: 0,
            should_quit: false,
        }
    }

    /// Advance the spinner
    pub fn tick_animation(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
    }

    /// Spinner character for the current frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }

    /// Whether the copy button is on screen
    pub fn has_result(&self) -> bool {
        self.form.state().short_url.is_some()
    }

    /// Submit button is disabled while busy
    pub fn submit_enabled(&self) -> bool {
        !self.form.state().is_loading
    }

    // ─────────────────────────────────────────────────────────────────────
    // Actions
    // ─────────────────────────────────────────────────────────────────────

    /// Submit the current input unless the button is disabled
    pub fn submit(&mut self) {
        if !self.submit_enabled() {
            return;
        }
        match self.dispatcher.submit(&mut self.form) {
            Ok(_) => {
                self.input_hint = None;
                // Result region is gone until the new request settles
                if self.focus == Focus::Copy {
                    self.focus = Focus::Submit;
                }
            }
            Err(rejection) => self.reject_input(rejection),
        }
    }

    fn reject_input(&mut self, rejection: InputRejection) {
        tracing::debug!("Input rejected: {}", rejection.hint());
        self.input_hint = Some(rejection.hint());
        self.focus = Focus::Input;
    }

    /// Copy the displayed short URL
    pub fn copy(&mut self) {
        self.form.copy(self.clipboard.as_mut());
    }

    /// Feed a completed request back into the form
    pub fn apply_settlement(&mut self, settlement: Settlement) {
        if self.form.settle(settlement.seq, settlement.outcome) == Settle::Applied
            && self.form.phase() == FormPhase::Succeeded
        {
            self.focus = Focus::Copy;
        }
    }

    /// Move focus forward, skipping the copy button when hidden
    pub fn focus_next(&mut self) {
        self.focus = match self.focus {
            Focus::Input => Focus::Submit,
            Focus::Submit if self.has_result() => Focus::Copy,
            Focus::Submit | Focus::Copy => Focus::Input,
        };
    }

    /// Move focus backward, skipping the copy button when hidden
    pub fn focus_prev(&mut self) {
        self.focus = match self.focus {
            Focus::Input if self.has_result() => Focus::Copy,
            Focus::Input => Focus::Submit,
            Focus::Submit => Focus::Input,
            Focus::Copy => Focus::Submit,
        };
    }

    /// Insert pasted text into the input
    pub fn paste(&mut self, text: &str) {
        self.focus = Focus::Input;
        self.input_hint = None;
        self.form.insert_str(text);
    }

    // ─────────────────────────────────────────────────────────────────────
    // Key dispatch
    // ─────────────────────────────────────────────────────────────────────

    /// Handle a key press
    /// Layered dispatch: Global → Focused widget
    pub fn handle_key(&mut self, key: KeyEvent) {
        if self.handle_global_key(key) == Handled::Yes {
            return;
        }
        match self.focus {
            Focus::Input => self.handle_input_key(key),
            Focus::Submit | Focus::Copy => self.handle_button_key(key),
        };
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Handled {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => self.should_quit = true,
            KeyCode::Char('y') if ctrl => self.copy(),
            KeyCode::F(2) => self.show_logs = !self.show_logs,
            KeyCode::Tab => self.focus_next(),
            KeyCode::BackTab => self.focus_prev(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn handle_input_key(&mut self, key: KeyEvent) -> Handled {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Enter => self.submit(),
            KeyCode::Char('u') if ctrl => self.form.clear_input(),
            KeyCode::Char('a') if ctrl => self.form.home(),
            KeyCode::Char('e') if ctrl => self.form.end(),
            KeyCode::Char(_) if ctrl => return Handled::No,
            KeyCode::Char(c) => self.form.insert_char(c),
            KeyCode::Backspace => self.form.backspace(),
            KeyCode::Delete => self.form.delete(),
            KeyCode::Left => self.form.move_left(),
            KeyCode::Right => self.form.move_right(),
            KeyCode::Home => self.form.home(),
            KeyCode::End => self.form.end(),
            _ => return Handled::No,
        }
        self.input_hint = None;
        Handled::Yes
    }

    fn handle_button_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                Focus::Submit => self.submit(),
                Focus::Copy => self.copy(),
                Focus::Input => return Handled::No,
            },
            KeyCode::Up | KeyCode::Left => self.focus_prev(),
            KeyCode::Down | KeyCode::Right => self.focus_next(),
            _ => return Handled::No,
        }
        Handled::Yes
    }
}
