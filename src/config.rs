use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;

const CONFIG_DIR: &str = ".docdex";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Root of the generated documentation tree, relative to the project
    /// directory unless absolute
    #[serde(default = "default_docs_dir")]
    pub docs_dir: PathBuf,

    /// Path fragments to skip while discovering shards
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Number of parallel parser threads (None = auto-detect)
    #[serde(default)]
    pub parallel_threads: Option<usize>,

    /// Abort collecting shard errors past this many failures
    #[serde(default = "default_max_shard_errors")]
    pub max_shard_errors: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            docs_dir: default_docs_dir(),
            ignore_patterns: Vec::new(),
            parallel_threads: None,
            max_shard_errors: default_max_shard_errors(),
        }
    }
}

fn default_docs_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_max_shard_errors() -> usize {
    25
}

/// Matching strategy for index lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Whole-stem equality
    Exact,
    /// Typed-prefix matching, the classic search-box behavior
    Prefix,
    /// Stem contains the query
    Substring,
    /// Edit-distance matching for typos
    Fuzzy,
}

impl SearchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Exact => "exact",
            SearchMode::Prefix => "prefix",
            SearchMode::Substring => "substring",
            SearchMode::Fuzzy => "fuzzy",
        }
    }
}

impl Default for SearchMode {
    fn default() -> Self {
        Self::Prefix
    }
}

impl FromStr for SearchMode {
    type Err = anyhow::Error;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.to_lowercase().as_str() {
            "exact" => Ok(SearchMode::Exact),
            "prefix" => Ok(SearchMode::Prefix),
            "substring" => Ok(SearchMode::Substring),
            "fuzzy" => Ok(SearchMode::Fuzzy),
            other => anyhow::bail!(
                "unknown search mode `{}` (expected exact, prefix, substring, or fuzzy)",
                other
            ),
        }
    }
}

impl std::fmt::Display for SearchMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Default matching strategy
    #[serde(default)]
    pub mode: SearchMode,

    /// Default number of results to return
    #[serde(default = "default_search_limit")]
    pub default_limit: usize,

    /// Maximum edit distance accepted in fuzzy mode
    #[serde(default = "default_max_fuzzy_distance")]
    pub max_fuzzy_distance: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            default_limit: default_search_limit(),
            max_fuzzy_distance: default_max_fuzzy_distance(),
        }
    }
}

fn default_search_limit() -> usize {
    10
}

fn default_max_fuzzy_distance() -> usize {
    2
}

/// Web server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind to
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Enable rolling file logs
    #[serde(default)]
    pub enabled: bool,

    /// Mirror logs to stderr
    #[serde(default = "default_stderr")]
    pub stderr: bool,

    /// File log level: trace, debug, info, warn, error
    #[serde(default = "default_level")]
    pub level: String,

    /// Log directory, relative to the project directory unless absolute
    #[serde(default = "default_log_dir")]
    pub directory: PathBuf,

    /// Log file name prefix
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Rotation strategy: minutely, hourly, daily, never
    #[serde(default = "default_rotation")]
    pub rotation: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            stderr: default_stderr(),
            level: default_level(),
            directory: default_log_dir(),
            file_prefix: default_file_prefix(),
            rotation: default_rotation(),
        }
    }
}

fn default_stderr() -> bool {
    true
}

fn default_level() -> String {
    "info".to_string()
}

fn default_log_dir() -> PathBuf {
    PathBuf::from(".docdex/logs")
}

fn default_file_prefix() -> String {
    "docdex".to_string()
}

fn default_rotation() -> String {
    "daily".to_string()
}

impl Config {
    /// Load configuration from the .docdex directory.
    pub fn load(root: &Path) -> Result<Self> {
        let config_path = root.join(CONFIG_DIR).join(CONFIG_FILE);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)
                .with_context(|| format!("Failed to read config from {:?}", config_path))?;

            toml::from_str(&content)
                .with_context(|| format!("Failed to parse config from {:?}", config_path))
        } else {
            Ok(Config::default())
        }
    }

    /// Save configuration to the .docdex directory.
    pub fn save(&self, root: &Path) -> Result<()> {
        let config_dir = root.join(CONFIG_DIR);
        let config_path = config_dir.join(CONFIG_FILE);

        std::fs::create_dir_all(&config_dir)
            .with_context(|| format!("Failed to create config directory {:?}", config_dir))?;

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, content)
            .with_context(|| format!("Failed to write config to {:?}", config_path))?;

        Ok(())
    }

    /// Path to the .docdex directory.
    pub fn docdex_dir(root: &Path) -> PathBuf {
        root.join(CONFIG_DIR)
    }

    /// Resolve the documentation tree root against a project directory.
    pub fn docs_root(&self, root: &Path) -> PathBuf {
        if self.scanner.docs_dir.is_absolute() {
            self.scanner.docs_dir.clone()
        } else {
            root.join(&self.scanner.docs_dir)
        }
    }

    /// Check if docdex is initialized in the given directory.
    pub fn is_initialized(root: &Path) -> bool {
        Self::docdex_dir(root).exists()
    }
}
