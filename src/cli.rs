// CLI module - command-line argument parsing and handlers
//
// With no arguments the TUI starts. Otherwise:
// - shorten <URL> [--copy]: shorten once and print the result
// - config --show: Display effective configuration
// - config --path: Show config file path
// - config --reset: Regenerate config file with defaults
// - config --edit: Open config file in $EDITOR

use crate::config::{Config, VERSION};
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;

/// Shorten My URL - TinyURL shortener for the terminal
#[derive(Parser)]
#[command(name = "shorten")]
#[command(version = VERSION)]
#[command(about = "Shorten long URLs with TinyURL", long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// URL to shorten once, without starting the TUI
    pub url: Option<String>,

    /// Copy the short URL to the clipboard
    #[arg(long, requires = "url")]
    pub copy: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },
}

/// What `main` should run after argument parsing
pub enum Mode {
    Tui,
    Once { url: String, copy: bool },
    /// A config command already ran
    Done,
}

/// Parse arguments and run config commands. Returns what is left to do.
pub fn handle_cli() -> Result<Mode> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => {
            if path {
                handle_config_path()?;
            } else if show {
                handle_config_show();
            } else if reset {
                handle_config_reset()?;
            } else if edit {
                handle_config_edit()?;
            } else {
                // No flag provided, show help
                println!("Usage: shorten config [--show|--path|--reset|--edit]");
                println!();
                println!("Options:");
                println!("  --show    Display effective configuration");
                println!("  --path    Show config file path");
                println!("  --reset   Reset config file to defaults");
                println!("  --edit    Open config file in $EDITOR");
            }
            Ok(Mode::Done)
        }
        None => Ok(match cli.url {
            Some(url) => Mode::Once {
                url,
                copy: cli.copy,
            },
            None => Mode::Tui,
        }),
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().context("Could not determine config path")
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() {
    let config = Config::from_env();

    println!("# Effective configuration (env > file > defaults)");
    println!();
    println!("api_url = {:?}", config.api_url);
    println!("domain = {:?}", config.domain);
    match &config.api_token {
        Some(token) => println!("api_token = <set, sha256:{}>", token.fingerprint()),
        None => println!("api_token = <not set>"),
    }
    println!("theme = {:?}", config.theme);
    println!();
    println!("[logging]");
    println!("level = {:?}", config.logging.level);
    println!("file_enabled = {}", config.logging.file_enabled);
    println!(
        "file_dir = {:?}",
        config.logging.file_dir.display().to_string()
    );
    println!(
        "file_rotation = {:?}",
        config.logging.file_rotation.as_str()
    );
    println!("file_prefix = {:?}", config.logging.file_prefix);

    // Show source info
    println!();
    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("# Source: {}", path.display());
        } else {
            println!("# Source: defaults (no config file)");
        }
    }
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    // Confirm if file exists
    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush().context("Failed to flush stderr")?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read answer")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    std::fs::write(&path, Config::default().to_toml())
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor)
        .arg(&path)
        .status()
        .with_context(|| {
            format!(
                "Failed to launch editor '{}'. Set $EDITOR to your preferred editor",
                editor
            )
        })?;

    if !status.success() {
        anyhow::bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_url_argument_parses() {
        let cli = Cli::try_parse_from(["shorten", "https://example.com", "--copy"]).unwrap();
        assert_eq!(cli.url.as_deref(), Some("https://example.com"));
        assert!(cli.copy);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_config_subcommand_parses() {
        let cli = Cli::try_parse_from(["shorten", "config", "--path"]).unwrap();
        assert!(cli.url.is_none());
        assert!(matches!(
            cli.command,
            Some(Commands::Config { path: true, .. })
        ));
    }

    #[test]
    fn test_copy_requires_url() {
        assert!(Cli::try_parse_from(["shorten", "--copy"]).is_err());
    }
}
