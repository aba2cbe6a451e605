//! Configuration management for UDX.
//!
//! Loads configuration from ${UDX_HOME}/config.toml with sensible defaults.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for UDX configuration and data directories.
    //!
    //! UDX_HOME resolution order:
    //! 1. UDX_HOME environment variable (if set)
    //! 2. ~/.config/udx (default)

    use std::path::PathBuf;

    /// Returns the UDX home directory.
    ///
    /// Checks UDX_HOME env var first, falls back to ~/.config/udx
    pub fn udx_home() -> PathBuf {
        if let Ok(home) = std::env::var("UDX_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("udx"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        udx_home().join("config.toml")
    }

    /// Returns the path to the persisted session file.
    pub fn session_path() -> PathBuf {
        udx_home().join("session.json")
    }

    /// Returns the directory log files are written to.
    pub fn logs_dir() -> PathBuf {
        udx_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the user-management service
    pub base_url: String,
    /// Request timeout in seconds (0 disables the timeout)
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: Self::DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Template written by `Config::init`.
const CONFIG_TEMPLATE: &str = r#"# UDX configuration

# Base URL of the user-management service.
base_url = "https://139.59.75.96"

# Request timeout in seconds (0 disables the timeout).
# request_timeout_secs = 10
"#;

impl Config {
    /// Production address of the user-management service.
    pub const DEFAULT_BASE_URL: &'static str = "https://139.59.75.96";
    /// Default per-request timeout in seconds.
    pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

    /// Loads the configuration from the default path.
    ///
    /// # Errors
    /// Returns an error if the operation fails.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist; missing keys merge with
    /// defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if the
    /// configured base URL is not a valid URL.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Writes a default config file. Creates parent directories as needed.
    ///
    /// # Errors
    /// Returns an error if the file already exists or cannot be written.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        Ok(())
    }

    /// Request timeout as a `Duration`; `None` when disabled.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }

    fn validate(&self) -> Result<()> {
        url::Url::parse(&self.base_url)
            .with_context(|| format!("Invalid base_url '{}'", self.base_url))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    /// Config loading: missing file returns defaults.
    #[test]
    fn test_load_missing_file_returns_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("nonexistent.toml");

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "https://139.59.75.96");
        assert_eq!(config.request_timeout_secs, 10);
    }

    /// Config loading: partial config merges with defaults.
    #[test]
    fn test_load_partial_config_merges_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "base_url = \"https://users.example.com\"\n").unwrap();

        let config = Config::load_from(&config_path).unwrap();
        assert_eq!(config.base_url, "https://users.example.com");
        assert_eq!(config.request_timeout_secs, 10);
    }

    /// Config loading: a base_url that doesn't parse as a URL is rejected.
    #[test]
    fn test_load_invalid_base_url_errors() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "base_url = \"not a url\"\n").unwrap();

        assert!(Config::load_from(&config_path).is_err());
    }

    /// Config init: creates file with defaults, creates parent dirs.
    #[test]
    fn test_init_creates_config_with_defaults() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("subdir").join("config.toml");

        Config::init(&config_path).unwrap();

        assert!(config_path.exists());
        let contents = fs::read_to_string(&config_path).unwrap();
        assert!(contents.contains("base_url ="));
        assert!(contents.contains("# request_timeout_secs ="));
    }

    /// Config init: fails if file exists (no silent overwrite).
    #[test]
    fn test_init_fails_if_exists() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("config.toml");

        fs::write(&config_path, "").unwrap();

        let result = Config::init(&config_path);
        assert!(result.is_err());
    }

    /// Timeout: zero disables the request timeout.
    #[test]
    fn test_request_timeout_zero_disables() {
        let config = Config {
            request_timeout_secs: 0,
            ..Default::default()
        };
        assert_eq!(config.request_timeout(), None);
    }

    /// Timeout: non-zero maps to a Duration.
    #[test]
    fn test_request_timeout_maps_to_duration() {
        let config = Config::default();
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(10)));
    }

    /// The init template parses back into the defaults.
    #[test]
    fn test_template_matches_defaults() {
        let parsed: Config = toml::from_str(CONFIG_TEMPLATE).unwrap();
        assert_eq!(parsed.base_url, Config::DEFAULT_BASE_URL);
        assert_eq!(
            parsed.request_timeout_secs,
            Config::DEFAULT_REQUEST_TIMEOUT_SECS
        );
    }
}
