//! Configuration for the shortener
//!
//! Configuration is loaded in order of precedence:
//! 1. Environment variables (highest priority)
//! 2. Config file (~/.config/shorten-my-url/config.toml)
//! 3. Built-in defaults (lowest priority)
//!
//! The API token is the one setting the app cannot run without. It is
//! loaded once here and handed to the shortener through
//! [`Config::shortener_settings`], which fails loudly when it is absent.

use serde::Deserialize;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::{Path, PathBuf};

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod observability;
mod serialization;


pub use observability::{FileLogging, LogRotation, LoggingConfig};

use crate::shortener::TinyUrlSettings;

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

/// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name under ~/.config
pub const APP_DIR: &str = "shorten-my-url";

/// Environment variable holding the TinyURL API token
pub const TOKEN_ENV: &str = "TINYURL_API_TOKEN";

/// Older name for the token variable, still honoured
pub const LEGACY_TOKEN_ENV: &str = "REACT_APP_TINYURL_API_KEY";

/// TinyURL API base
pub const DEFAULT_API_URL: &str = "https://api.tinyurl.com";

/// Domain the short links are minted on
pub const DEFAULT_DOMAIN: &str = "tinyurl.com";

// ─────────────────────────────────────────────────────────────────────────────
// API Token
// ─────────────────────────────────────────────────────────────────────────────

/// Static API credential for the shortening endpoint
///
/// `Debug` and `Display` never print the secret; use [`ApiToken::fingerprint`]
/// when a log line needs to say which token is in use.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken(String);

impl ApiToken {
    /// Wrap a raw token, rejecting blank values
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The raw secret, for building requests only
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// First 8 hex chars of the token's SHA-256
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.0.as_bytes());
        let digest = hasher.finalize();
        digest[..4].iter().map(|b| format!("{:02x}", b)).collect()
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiToken(sha256:{})", self.fingerprint())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────────────

/// Errors raised while loading configuration
#[derive(Debug)]
pub enum ConfigError {
    /// No token in the environment or the config file
    MissingApiToken { env_var: &'static str },
    /// Config file exists but could not be read
    Unreadable { path: PathBuf, source: std::io::Error },
    /// Config file is not valid TOML for this app
    Invalid { path: PathBuf, message: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingApiToken { env_var } => write!(
                f,
                "No TinyURL API token configured. Set {} or add api_token to the config file",
                env_var
            ),
            Self::Unreadable { path, source } => {
                write!(f, "Cannot read config file {}: {}", path.display(), source)
            }
            Self::Invalid { path, message } => {
                write!(f, "Invalid config file {}: {}", path.display(), message)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Unreadable { source, .. } => Some(source),
            _ => None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the shortening API
    pub api_url: String,

    /// Domain requested for the short link
    pub domain: String,

    /// Token for the shortening API (None until configured)
    pub api_token: Option<ApiToken>,

    /// Theme name: "indigo" or "terminal"
    pub theme: String,

    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            domain: DEFAULT_DOMAIN.to_string(),
            api_token: None,
            theme: "indigo".to_string(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub domain: Option<String>,
    pub api_token: Option<String>,
    pub theme: Option<String>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Get the config file path: ~/.config/shorten-my-url/config.toml
    /// Uses Unix-style ~/.config on all platforms for consistency
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join(APP_DIR).join("config.toml"))
    }

    /// Create config file with defaults if it doesn't exist
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return; // config is optional
            }
        }

        let _ = std::fs::write(&path, Self::default().to_toml());
    }

    /// Read and parse a config file
    ///
    /// A missing file is not an error and yields an empty [`FileConfig`].
    pub(crate) fn read_file_config(path: &Path) -> Result<FileConfig, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(contents) => toml::from_str(&contents).map_err(|e| ConfigError::Invalid {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(FileConfig::default()),
            Err(e) => Err(ConfigError::Unreadable {
                path: path.to_path_buf(),
                source: e,
            }),
        }
    }

    /// Load file config if it exists
    ///
    /// A broken config file ends the process with a clear message rather
    /// than silently falling back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match Self::read_file_config(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Failed to load configuration file            ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  {}\n", e);
                eprintln!("  Tip: Check for:\n");
                eprintln!("    - Missing quotes around string values");
                eprintln!("    - Typos in key or section names");
                eprintln!("    - Invalid boolean values (use true/false)\n");
                eprintln!("  To reset, run `shorten config --reset`.\n");
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars -> file -> defaults
    pub fn from_env() -> Self {
        Self::from_sources(Self::load_file_config(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    ///
    /// `env` is any `key -> value` lookup, so callers can resolve against
    /// something other than the process environment.
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        // API URL: env > file > default
        let api_url = env("TINYURL_API_URL")
            .or(file.api_url)
            .unwrap_or(defaults.api_url);

        // Domain: env > file > default
        let domain = env("TINYURL_DOMAIN")
            .or(file.domain)
            .unwrap_or(defaults.domain);

        // Token: env > legacy env > file
        let api_token = env(TOKEN_ENV)
            .and_then(ApiToken::new)
            .or_else(|| env(LEGACY_TOKEN_ENV).and_then(ApiToken::new))
            .or_else(|| file.api_token.and_then(ApiToken::new));

        // Theme: env > file > default
        let theme = env("SHORTEN_THEME")
            .or(file.theme)
            .unwrap_or(defaults.theme);

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            domain,
            api_token,
            theme,
            logging,
        }
    }

    /// Settings for the shortening client
    ///
    /// This is the only way to obtain a client configuration, so a missing
    /// token is reported before any request can be issued.
    pub fn shortener_settings(&self) -> Result<TinyUrlSettings, ConfigError> {
        let token = self
            .api_token
            .clone()
            .ok_or(ConfigError::MissingApiToken { env_var: TOKEN_ENV })?;

        Ok(TinyUrlSettings {
            api_url: self.api_url.clone(),
            domain: self.domain.clone(),
            token,
        })
    }
}
