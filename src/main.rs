// Shorten My URL - TinyURL shortener for the terminal
//
// Takes a long URL and turns it into a short TinyURL link, with a
// one-key copy of the result.
//
// Architecture:
// - Form: submission state machine (validation, busy flag, result/error)
// - Shortener: async client for the TinyURL create endpoint (reqwest)
// - Dispatcher: runs requests on tokio tasks, reports sequence-tagged settlements
// - TUI (ratatui): the form on screen, plus a logs panel
// - Headless: the same flow for a single URL from the command line

mod cli;
mod clipboard;
mod config;
mod form;
mod headless;
mod logging;
mod shortener;
mod tui;

use anyhow::Result;
use cli::Mode;
use clipboard::SystemClipboard;
use config::Config;
use logging::{LogBuffer, LogSink};
use shortener::{Shortener, TinyUrlClient};
use std::process::ExitCode;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // Config commands run and exit here
    let mode = cli::handle_cli()?;
    if matches!(mode, Mode::Done) {
        return Ok(ExitCode::SUCCESS);
    }

    // Ensure config template exists (helps users discover options)
    Config::ensure_config_exists();

    let config = Config::from_env();

    // TUI mode: capture logs to a buffer (keeps the display intact)
    // Headless mode: logs to stderr, stdout carries only the result
    let log_buffer = LogBuffer::new();
    let sink = match mode {
        Mode::Tui => LogSink::Tui,
        _ => LogSink::Stderr,
    };
    // Dropped when main returns, which flushes the log file
    let _file_guard = logging::init(&config.logging, sink, &log_buffer);

    let code = run(mode, &config, log_buffer).await?;
    tracing::info!("Shutting down");
    Ok(code)
}

/// Check the token, build the client, run the chosen mode
async fn run(mode: Mode, config: &Config, log_buffer: LogBuffer) -> Result<ExitCode> {
    // No token, no requests
    let settings = match config.shortener_settings() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("Error: {}", e);
            if let Some(path) = Config::config_path() {
                eprintln!("Config file: {}", path.display());
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    let shortener: Arc<dyn Shortener> = Arc::new(TinyUrlClient::new(settings)?);

    match mode {
        Mode::Tui => tui::run_tui(config, shortener, log_buffer).await?,
        Mode::Once { url, copy } => {
            let outcome = headless::shorten_once(shortener, &url, copy, &mut SystemClipboard).await;
            if !headless::report(&outcome) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Mode::Done => {}
    }

    Ok(ExitCode::SUCCESS)
}
