//! Application configuration for ticketdoc.
//!
//! User config lives at `~/.ticketdoc/ticketdoc.toml`.
//! CLI flags override config file values, which override defaults.
//! Tracker credentials are never stored in the file; the config only names
//! the environment variables that hold them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TicketDocError};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "ticketdoc.toml";

/// Default config directory name under the user's home.
const CONFIG_DIR_NAME: &str = ".ticketdoc";

// ---------------------------------------------------------------------------
// Config structs (matching ticketdoc.toml schema)
// ---------------------------------------------------------------------------

/// Top-level application config, deserialized from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Markdown conversion settings.
    #[serde(default)]
    pub converter: ConverterConfig,

    /// Issue tracker connection settings.
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Event deduplication settings.
    #[serde(default)]
    pub dedup: DedupConfig,
}

/// `[converter]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConverterConfig {
    /// Strip backslash escapes (`\*`, `` \` ``, `\#`, ...) before parsing.
    #[serde(default)]
    pub unescape: bool,
}

/// `[tracker]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerConfig {
    /// Base URL of the tracker site.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Name of the env var holding the account email.
    #[serde(default = "default_email_env")]
    pub email_env: String,

    /// Name of the env var holding the API token.
    #[serde(default = "default_token_env")]
    pub token_env: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            email_env: default_email_env(),
            token_env: default_token_env(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_base_url() -> String {
    "https://example.atlassian.net".into()
}
fn default_email_env() -> String {
    "TICKETDOC_EMAIL".into()
}
fn default_token_env() -> String {
    "TICKETDOC_API_TOKEN".into()
}
fn default_timeout_secs() -> u64 {
    30
}

/// `[dedup]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupConfig {
    /// How many event identifiers to remember before evicting the oldest.
    #[serde(default = "default_dedup_capacity")]
    pub capacity: usize,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            capacity: default_dedup_capacity(),
        }
    }
}

fn default_dedup_capacity() -> usize {
    1000
}

// ---------------------------------------------------------------------------
// Credentials (runtime, resolved from env vars named in the config)
// ---------------------------------------------------------------------------

/// Basic-auth credentials for the tracker API.
#[derive(Clone)]
pub struct TrackerCredentials {
    pub email: String,
    pub token: String,
}

impl std::fmt::Debug for TrackerCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackerCredentials")
            .field("email", &self.email)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Resolve tracker credentials from the env vars named in `config.tracker`.
pub fn tracker_credentials(config: &AppConfig) -> Result<TrackerCredentials> {
    let email = read_env(&config.tracker.email_env)?;
    let token = read_env(&config.tracker.token_env)?;
    Ok(TrackerCredentials { email, token })
}

fn read_env(var_name: &str) -> Result<String> {
    match std::env::var(var_name) {
        Ok(val) if !val.trim().is_empty() => Ok(val),
        _ => Err(TicketDocError::config(format!(
            "tracker credential not found. Set the {var_name} environment variable."
        ))),
    }
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Get the path to the config directory (`~/.ticketdoc/`).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| TicketDocError::config("could not determine home directory"))?;
    Ok(home.join(CONFIG_DIR_NAME))
}

/// Get the path to the config file (`~/.ticketdoc/ticketdoc.toml`).
pub fn config_file_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the application config from disk. Returns defaults if the file does not exist.
pub fn load_config() -> Result<AppConfig> {
    let path = config_file_path()?;

    if !path.exists() {
        tracing::debug!(?path, "config file not found, using defaults");
        return Ok(AppConfig::default());
    }

    load_config_from(&path)
}

/// Load the application config from a specific file path.
pub fn load_config_from(path: &Path) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| TicketDocError::io(path, e))?;

    toml::from_str(&content)
        .map_err(|e| TicketDocError::config(format!("failed to parse {}: {e}", path.display())))
}

/// Create the config directory and write a default config file.
/// Returns the path to the created file.
pub fn init_config() -> Result<PathBuf> {
    let dir = config_dir()?;
    std::fs::create_dir_all(&dir).map_err(|e| TicketDocError::io(&dir, e))?;

    let path = dir.join(CONFIG_FILE_NAME);
    let config = AppConfig::default();
    let content =
        toml::to_string_pretty(&config).map_err(|e| TicketDocError::config(e.to_string()))?;

    std::fs::write(&path, content).map_err(|e| TicketDocError::io(&path, e))?;
    tracing::info!(?path, "created default config file");

    Ok(path)
}
