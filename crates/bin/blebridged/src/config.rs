//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `blebridge.toml` in the working directory. Every field has a
//! default so the file is optional. Environment variables take precedence
//! over file values.

use std::str::FromStr;
use std::time::Duration;

use serde::Deserialize;

use blebridge_adapter_btleplug::BtleplugConfig;
use blebridge_adapter_virtual::{PairedDeviceConfig, VirtualConfig};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Backend selection.
    pub backend: BackendConfig,
    /// Settings for the btleplug backend.
    pub btleplug: BtleplugConfig,
    /// Settings for the simulated backend.
    #[serde(rename = "virtual")]
    pub simulated: VirtualConfig,
    /// The host's bonded devices.
    pub paired: Vec<PairedDeviceConfig>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Which backend answers device queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    #[default]
    Virtual,
    Btleplug,
}

impl FromStr for BackendKind {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "virtual" => Ok(Self::Virtual),
            "btleplug" => Ok(Self::Btleplug),
            other => Err(ConfigError::Validation(format!(
                "unknown backend `{other}`, expected `virtual` or `btleplug`"
            ))),
        }
    }
}

/// Backend configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    pub kind: BackendKind,
    /// How long to wait for in-flight replies after input closes.
    pub drain_timeout_ms: u64,
}

impl BackendConfig {
    #[must_use]
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_millis(self.drain_timeout_ms)
    }
}

impl Config {
    /// Load configuration from `blebridge.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, an
    /// override is invalid, or validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("blebridge.toml")?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(val) = lookup("BLEBRIDGE_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("RUST_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = lookup("BLEBRIDGE_BACKEND") {
            self.backend.kind = val.parse()?;
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.backend.drain_timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "drain_timeout_ms must be non-zero".to_string(),
            ));
        }
        self.simulated
            .validate()
            .map_err(|err| ConfigError::Validation(format!("virtual device: {err}")))?;
        for (index, entry) in self.paired.iter().enumerate() {
            entry.validate().map_err(|err| {
                ConfigError::Validation(format!("paired device {index}: {err}"))
            })?;
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "blebridged=info,blebridge=info".to_string(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            kind: BackendKind::Virtual,
            drain_timeout_ms: 5000,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
