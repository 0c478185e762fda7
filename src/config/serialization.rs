//! Config serialization to TOML
//!
//! Single source of truth for config file format.

use super::{Config, TOKEN_ENV};

/// A TOML basic string, quoted and escaped
fn quoted(value: &str) -> String {
    toml::Value::String(value.to_string()).to_string()
}

impl Config {
    /// Render the token line: commented out unless a token came from config
    fn token_to_toml(&self) -> String {
        match &self.api_token {
            Some(token) => format!("api_token = {}", quoted(token.expose())),
            None => format!("# api_token = \"...\"  # or set {}", TOKEN_ENV),
        }
    }

    /// Serialize the whole config as a commented TOML document
    pub fn to_toml(&self) -> String {
        format!(
            r#"# shorten-my-url configuration

# Shortening API base URL and the domain short links are created on
api_url = {api_url}
domain = {domain}

# TinyURL API token ({token_env} takes precedence)
{token}

# Theme: indigo, terminal
theme = {theme}

# Logging configuration (RUST_LOG env var overrides)
[logging]
level = {log_level}
# JSON log file (in addition to the TUI buffer or stderr)
file_enabled = {log_file_enabled}
file_dir = {log_file_dir}
file_rotation = "{log_file_rotation}"  # hourly, daily, never
file_prefix = {log_file_prefix}
"#,
            api_url = quoted(&self.api_url),
            domain = quoted(&self.domain),
            token_env = TOKEN_ENV,
            token = self.token_to_toml(),
            theme = quoted(&self.theme),
            log_level = quoted(&self.logging.level),
            log_file_enabled = self.logging.file_enabled,
            log_file_dir = quoted(&self.logging.file_dir.display().to_string()),
            log_file_rotation = self.logging.file_rotation.as_str(),
            log_file_prefix = quoted(&self.logging.file_prefix),
        )
    }
}
