use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::corpus::Corpus;

/// Configuration for biblia.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (BIBLIA_* prefix)
/// 3. Config file (~/.config/biblia/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Path to the SQLite database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: BIBLIA_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/biblia/biblia.db
    pub database_path: PathBuf,

    /// Directory holding the bundled corpus files (`bible.json`, ...).
    ///
    /// Can be set via:
    /// - CLI: --corpus-dir /path
    /// - ENV: BIBLIA_CORPUS_DIR
    /// - Default: ~/.local/share/biblia/corpus
    pub corpus_dir: PathBuf,

    /// Bible version that loaders write and readers query.
    pub version: String,

    /// Base URL of the remote text API.
    pub remote_base_url: String,

    /// Translation code sent to the remote text API.
    pub remote_translation: String,

    /// Fixed delay between remote chapter requests, in milliseconds.
    pub request_delay_ms: u64,

    /// Rows per multi-row insert statement.
    pub batch_size: usize,

    /// Log level (`error`, `warn`, `info`, `debug`, `trace`).
    pub log_level: String,

    /// Colour log output.
    pub log_coloured: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_db_path(),
            corpus_dir: default_corpus_dir(),
            version: biblia_core::model::DEFAULT_VERSION.to_string(),
            remote_base_url: crate::remote::DEFAULT_BASE_URL.to_string(),
            remote_translation: crate::remote::DEFAULT_TRANSLATION.to_string(),
            request_delay_ms: 500,
            batch_size: crate::batch::DEFAULT_BATCH_SIZE,
            log_level: "info".to_string(),
            log_coloured: true,
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/biblia/config.toml
    /// Reads environment variables with BIBLIA_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_from(&config_file_path())
    }

    /// Load configuration from a specific file (if it exists) plus the
    /// environment.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("biblia");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Path of a corpus file inside [`Config::corpus_dir`].
    #[must_use]
    pub fn corpus_path(&self, corpus: Corpus) -> PathBuf {
        self.corpus_dir.join(corpus.file_name())
    }
}

/// Get the default data directory.
///
/// Returns: ~/.local/share/biblia (or platform equivalent)
fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("biblia")
}

fn default_db_path() -> PathBuf {
    data_dir().join("biblia.db")
}

fn default_corpus_dir() -> PathBuf {
    data_dir().join("corpus")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/biblia/config.toml
/// - macOS: ~/Library/Application Support/biblia/config.toml
/// - Windows: %APPDATA%\biblia\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("biblia")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Biblia Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (BIBLIA_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Path to the SQLite database
#
# Can also be set via:
# - CLI: biblia --db /custom/path.db status
# - Environment: BIBLIA_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/biblia.db"

# Directory with the bundled corpus files:
# bible.json, apocrypha.json, quran.json, hymns.json, materials.json
#corpus_dir = "/path/to/corpus"

# Bible version loaded from the corpus and used for reading
version = "acf"

# Remote text API used when a chapter is missing locally
remote_base_url = "https://bible-api.com"
remote_translation = "almeida"

# Delay between remote chapter requests (milliseconds)
request_delay_ms = 500

# Rows per multi-row insert while loading corpora
batch_size = 100

# Logging
log_level = "info"
log_coloured = true
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.database_path.as_os_str().is_empty());
        assert_eq!(config.version, "acf");
        assert_eq!(config.request_delay_ms, 500);
        assert_eq!(config.batch_size, 100);
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let temp_dir = TempDir::new().unwrap();
        let result = Config::load_from(&temp_dir.path().join("absent.toml"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "version = \"kjv\"\nbatch_size = 250\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.version, "kjv");
        assert_eq!(config.batch_size, 250);
        assert_eq!(config.remote_translation, "almeida");
    }

    #[test]
    fn test_example_config_parses() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, example_config()).unwrap();
        assert_eq!(Config::load_from(&path).unwrap().version, "acf");
    }

    #[test]
    fn test_corpus_path() {
        let config = Config {
            corpus_dir: PathBuf::from("/data/corpus"),
            ..Config::default()
        };
        assert_eq!(
            config.corpus_path(Corpus::Quran),
            PathBuf::from("/data/corpus/quran.json")
        );
    }
}
