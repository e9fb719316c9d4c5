//! Configuration for the list browser
//!
//! Configuration is loaded in order of precedence:
//! 1. Command-line flags (applied by the binary, highest priority)
//! 2. Environment variables
//! 3. Config file (~/.config/carelist/config.toml)
//! 4. Built-in defaults (lowest priority)

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

// ─────────────────────────────────────────────────────────────────────────────
// Submodules
// ─────────────────────────────────────────────────────────────────────────────

mod collection;
mod observability;
mod serialization;


// ─────────────────────────────────────────────────────────────────────────────
// Re-exports
// ─────────────────────────────────────────────────────────────────────────────

pub use collection::{CollectionConfig, FileCollection, DEFAULT_COLUMNS, DEFAULT_ROUTE};
pub use observability::{FileLogging, LogRotation, LoggingConfig};

// ─────────────────────────────────────────────────────────────────────────────
// Constants
// ─────────────────────────────────────────────────────────────────────────────

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const DEFAULT_API_URL: &str = "http://localhost:9000";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

const DEFAULT_THEME: &str = "dark";

// ─────────────────────────────────────────────────────────────────────────────
// Application Configuration
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Backend base URL, routes are appended to it
    pub api_url: String,

    /// Bearer token (env only, never written to the config file)
    pub token: Option<String>,

    /// Per-request timeout
    pub timeout_secs: u64,

    /// Theme name: "dark", "light", "terminal"
    pub theme: String,

    /// Interactive TUI (false = JSON lines on stdout)
    pub enable_tui: bool,

    /// Serve the built-in patient registry instead of calling the backend
    pub demo_mode: bool,

    pub collection: CollectionConfig,

    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            theme: DEFAULT_THEME.to_string(),
            enable_tui: true,
            demo_mode: false,
            collection: CollectionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// File Configuration (deserialization layer)
// ─────────────────────────────────────────────────────────────────────────────

/// Config file structure
#[derive(Debug, Deserialize, Default)]
pub(crate) struct FileConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub theme: Option<String>,

    /// Optional [collection] section
    pub collection: Option<FileCollection>,

    /// Optional [logging] section
    pub logging: Option<FileLogging>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Configuration Loading
// ─────────────────────────────────────────────────────────────────────────────

impl Config {
    /// Config file path: ~/.config/carelist/config.toml
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|p| p.join(".config").join("carelist").join("config.toml"))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Write the default template if no config file exists yet
    pub fn ensure_config_exists() {
        let Some(path) = Self::config_path() else {
            return;
        };

        if path.exists() {
            return;
        }

        // Config is optional, so failures here are not reported
        let _ = Self::write_default(&path);
    }

    /// Overwrite `path` with the default template
    pub fn write_default(path: &std::path::Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, Self::default().to_toml())
    }

    /// Load file config if it exists
    ///
    /// Exits the process if the file exists but cannot be read or parsed.
    /// A broken config must not silently fall back to defaults.
    fn load_file_config() -> FileConfig {
        let Some(path) = Self::config_path() else {
            return FileConfig::default();
        };

        match std::fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                    eprintln!("║  CONFIG ERROR - Failed to parse configuration file          ║");
                    eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                    eprintln!("  File: {}\n", path.display());
                    eprintln!("  Error: {}\n", e);
                    eprintln!("  Tip: Check for:\n");
                    eprintln!("    - Missing quotes around string values");
                    eprintln!("    - Negative or fractional numbers for per_page / initial_page");
                    eprintln!("    - Filters outside the [collection.filters] table\n");
                    eprintln!("  To reset, run `carelist config --reset`.\n");
                    std::process::exit(1);
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => FileConfig::default(),
            Err(e) => {
                eprintln!("\n╔══════════════════════════════════════════════════════════════╗");
                eprintln!("║  CONFIG ERROR - Cannot read configuration file              ║");
                eprintln!("╚══════════════════════════════════════════════════════════════╝\n");
                eprintln!("  File: {}\n", path.display());
                eprintln!("  Error: {}\n", e);
                std::process::exit(1);
            }
        }
    }

    /// Load configuration: env vars > file > defaults
    pub fn from_env() -> Self {
        let file = Self::load_file_config();
        Self::from_sources(file, |key| std::env::var(key).ok())
    }

    /// Merge a parsed file with an environment lookup
    pub(crate) fn from_sources(file: FileConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let api_url = env("CARELIST_API_URL")
            .or(file.api_url)
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        let token = env("CARELIST_TOKEN").filter(|t| !t.trim().is_empty());

        let timeout_secs = file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS);

        let theme = file.theme.unwrap_or_else(|| DEFAULT_THEME.to_string());

        // Runtime toggles: env only
        let enable_tui = env("CARELIST_NO_TUI").map_or(true, |v| !is_truthy(&v));
        let demo_mode = env("CARELIST_DEMO").is_some_and(|v| is_truthy(&v));

        let mut collection = CollectionConfig::from_file(file.collection);
        if let Some(per_page) = env("CARELIST_PER_PAGE").and_then(|v| v.trim().parse().ok()) {
            collection.per_page = per_page;
        }

        let logging = LoggingConfig::from_file(file.logging);

        Self {
            api_url,
            token,
            timeout_secs,
            theme,
            enable_tui,
            demo_mode,
            collection,
            logging,
        }
    }
}

fn is_truthy(v: &str) -> bool {
    v == "1" || v.eq_ignore_ascii_case("true")
}
