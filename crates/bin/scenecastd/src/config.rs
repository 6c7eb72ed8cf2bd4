//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `scenecast.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use scenecast_adapter_bridge_http::BridgeConfig;
use scenecast_app::gate::RateLimit;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Admission budget for the device channel.
    pub rate: RateConfig,
    /// Bridge connection settings.
    pub bridge: BridgeSection,
    /// Scene file location.
    pub scenes: ScenesConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Admission budget configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RateConfig {
    /// Commands admitted per window.
    pub reservoir: u32,
    /// Window length in milliseconds; must be a multiple of 250.
    pub window_ms: u64,
}

/// Which device channel to wire in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BridgeMode {
    /// Simulated channel; commands are recorded, no hardware involved.
    Virtual,
    /// Real REST bridge over HTTP.
    Http,
}

/// Bridge section: mode selector plus the HTTP bridge settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BridgeSection {
    pub mode: BridgeMode,
    #[serde(flatten)]
    pub http: BridgeConfig,
}

impl Default for BridgeSection {
    fn default() -> Self {
        Self {
            mode: BridgeMode::Virtual,
            http: BridgeConfig::default(),
        }
    }
}

/// Scene file location.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ScenesConfig {
    /// Path to the JSON scene file.
    pub file: String,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `scenecast.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("scenecast.toml")?;
        config.apply_env_overrides();
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

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SCENECAST_HOST") {
            self.server.host = val;
        }
        if let Ok(val) = std::env::var("SCENECAST_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("SCENECAST_SCENES_FILE") {
            self.scenes.file = val;
        }
        if let Ok(val) = std::env::var("SCENECAST_BRIDGE_HOST") {
            self.bridge.http.host = val;
        }
        if let Ok(val) = std::env::var("SCENECAST_BRIDGE_USERNAME") {
            self.bridge.http.username = val;
        }
        if let Ok(val) = std::env::var("SCENECAST_BRIDGE_MODE") {
            match val.as_str() {
                "virtual" => self.bridge.mode = BridgeMode::Virtual,
                "http" => self.bridge.mode = BridgeMode::Http,
                _ => {}
            }
        }
        if let Ok(val) = std::env::var("SCENECAST_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        self.rate_limit()
            .validate()
            .map_err(|err| ConfigError::Validation(err.to_string()))?;
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// The admission budget as a [`RateLimit`].
    #[must_use]
    pub fn rate_limit(&self) -> RateLimit {
        RateLimit {
            reservoir: self.rate.reservoir,
            window: Duration::from_millis(self.rate.window_ms),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for RateConfig {
    fn default() -> Self {
        Self {
            reservoir: 10,
            window_ms: 1000,
        }
    }
}

impl Default for ScenesConfig {
    fn default() -> Self {
        Self {
            file: "scenes.json".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "scenecastd=info,scenecast=info,tower_http=debug".to_string(),
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
