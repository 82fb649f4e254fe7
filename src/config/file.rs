//! Configuration file management for genrx-voice.
//!
//! This module handles loading and saving application configuration from TOML files.
//! Configuration is stored in the user's config directory. Every key is optional;
//! missing keys fall back to the service defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::transcription::config::{DEFAULT_BASE_URL, DEFAULT_LANGUAGE};
use crate::transcription::{ClientConfig, Credential, OperatingPoint, PollPolicy, TranscriptionOptions};

/// Speechmatics batch API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeechmaticsConfig {
    /// Base URL of the batch API, including the `/v2` path
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Recognition language code (e.g. "en", "hi")
    #[serde(default = "default_language")]
    pub language: String,
    /// Quality tier: "standard" or "enhanced"
    #[serde(default)]
    pub operating_point: OperatingPoint,
    /// Delay between job status checks in milliseconds (must be greater than 0)
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// Give up after this many status checks (0 disables the limit)
    #[serde(default = "default_max_poll_attempts")]
    pub max_poll_attempts: u32,
    /// Give up after this many seconds of polling (0 disables the limit)
    #[serde(default = "default_max_poll_seconds")]
    pub max_poll_seconds: u64,
    /// Timeout for each HTTP request in seconds (0 disables the timeout)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_language() -> String {
    DEFAULT_LANGUAGE.to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_max_poll_attempts() -> u32 {
    600
}

fn default_max_poll_seconds() -> u64 {
    900
}

fn default_request_timeout_secs() -> u64 {
    60
}

impl Default for SpeechmaticsConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            language: default_language(),
            operating_point: OperatingPoint::default(),
            poll_interval_ms: default_poll_interval_ms(),
            max_poll_attempts: default_max_poll_attempts(),
            max_poll_seconds: default_max_poll_seconds(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl SpeechmaticsConfig {
    /// Builds the job client configuration for `credential`.
    ///
    /// # Errors
    /// - If `poll_interval_ms` is 0
    /// - If the poll interval is longer than `max_poll_seconds`
    pub fn client_config(&self, credential: Credential) -> anyhow::Result<ClientConfig> {
        if self.poll_interval_ms == 0 {
            return Err(anyhow::anyhow!(
                "Invalid configuration: speechmatics.poll_interval_ms must be greater than 0"
            ));
        }

        let mut config = ClientConfig::new(credential);
        config.base_url = self.base_url.clone();
        config.options = TranscriptionOptions {
            language: self.language.clone(),
            operating_point: self.operating_point,
        };
        config.poll = PollPolicy {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: (self.max_poll_attempts > 0).then_some(self.max_poll_attempts),
            max_duration: (self.max_poll_seconds > 0)
                .then(|| Duration::from_secs(self.max_poll_seconds)),
        };
        config.request_timeout = (self.request_timeout_secs > 0)
            .then(|| Duration::from_secs(self.request_timeout_secs));

        config
            .poll
            .validate()
            .map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
        Ok(config)
    }
}

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenrxConfig {
    #[serde(default)]
    pub speechmatics: SpeechmaticsConfig,
}

impl GenrxConfig {
    /// Loads configuration from the user's config directory.
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// - If the config directory cannot be determined
    /// - If the config file exists but cannot be read
    /// - If the TOML is malformed
    pub fn load() -> anyhow::Result<Self> {
        let config_path = get_config_path()?;
        if !config_path.exists() {
            tracing::debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(&config_path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", config_path.display()))?;
        Self::from_toml(&config_content)
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    /// - If the TOML is malformed
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: GenrxConfig =
            toml::from_str(content).map_err(|e| anyhow::anyhow!("Invalid configuration: {e}"))?;
        Ok(config)
    }

    /// Saves configuration to the user's config directory.
    ///
    /// # Errors
    /// - If the config directory cannot be determined or created
    /// - If the file cannot be written
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = get_config_path()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let config_content = toml::to_string_pretty(self)?;
        fs::write(&config_path, config_content)?;
        tracing::info!("Configuration saved to {}", config_path.display());
        Ok(())
    }
}

/// Retrieves the path to the config file.
///
/// # Errors
/// - If the home directory cannot be determined
pub fn get_config_path() -> anyhow::Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?;
    Ok(home
        .join(".config")
        .join("genrx-voice")
        .join("genrx-voice.toml"))
}
