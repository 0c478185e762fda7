// TUI module - Terminal User Interface
//
// This module manages the terminal UI using ratatui. It handles:
// - Terminal initialization and cleanup
// - The event loop (keyboard, paste, timer ticks, request settlements)
// - Rendering the form

pub mod app;
pub mod components;
pub mod layout;
pub mod theme;
pub mod ui;

use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::form::{Dispatcher, Settlement};
use crate::logging::LogBuffer;
use crate::shortener::Shortener;
use anyhow::{Context, Result};
use app::App;
use crossterm::{
    event::{self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;

/// Run the TUI
///
/// Sets up the terminal, runs the event loop, and restores the terminal
/// when done, even if the loop failed.
pub async fn run_tui(
    config: &Config,
    shortener: Arc<dyn Shortener>,
    log_buffer: LogBuffer,
) -> Result<()> {
    let (dispatcher, mut settlement_rx) = Dispatcher::new(shortener);
    let clipboard = Box::new(SystemClipboard);
    let mut app = App::new(config, dispatcher, clipboard, log_buffer);

    // Set up terminal
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableBracketedPaste)
        .context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    tracing::info!("TUI started");

    let result = run_event_loop(&mut terminal, &mut app, &mut settlement_rx).await;

    // Restore terminal
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableBracketedPaste
    )
    .context("Failed to restore terminal")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result
}

/// Main event loop
///
/// Waits on terminal input, the redraw tick, and finished requests with
/// `tokio::select!`, redrawing after whichever fires first.
async fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    settlement_rx: &mut mpsc::Receiver<Settlement>,
) -> Result<()> {
    let mut tick_interval = tokio::time::interval(Duration::from_millis(200));

    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .context("Failed to draw terminal")?;

        tokio::select! {
            // Keyboard and paste input
            _ = async {
                if event::poll(Duration::from_millis(10)).unwrap_or(false) {
                    match event::read() {
                        Ok(Event::Key(key))
                            if matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) =>
                        {
                            app.handle_key(key)
                        }
                        Ok(Event::Paste(text)) => app.paste(&text),
                        _ => {}
                    }
                }
            } => {}

            // Periodic tick for the spinner
            _ = tick_interval.tick() => {
                app.tick_animation();
            }

            // Finished requests
            Some(settlement) = settlement_rx.recv() => {
                app.apply_settlement(settlement);
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
