//! Bridge connection configuration.

use std::time::Duration;

use serde::Deserialize;

/// Configuration for the HTTP bridge channel.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Bridge hostname or IP address, optionally with a port.
    pub host: String,
    /// API username (the key issued by the bridge on pairing).
    pub username: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            username: "scenecast".to_string(),
            timeout_ms: 10_000,
        }
    }
}

impl BridgeConfig {
    /// The per-request timeout as a [`Duration`].
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
