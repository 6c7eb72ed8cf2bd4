//! # scenecast-adapter-bridge-http
//!
//! [`LightChannel`] implementation for Hue-style REST bridges: one
//! `PUT /api/{username}/lights/{id}/state` per command, JSON settings passed
//! through untouched.
//!
//! The bridge enforces its own throughput ceiling upstream of us; the rate
//! gate in `scenecast-app` is what keeps this adapter under it, so this crate
//! stays a thin transport.
//!
//! ## Dependency rule
//!
//! Depends on `scenecast-app` (port traits) and `scenecast-domain` only.

mod config;
mod error;

pub use config::BridgeConfig;
pub use error::BridgeError;

use scenecast_app::ports::LightChannel;
use scenecast_domain::error::ChannelError;
use scenecast_domain::id::LampId;

/// Device-control channel talking to a REST bridge over HTTP.
pub struct HttpBridgeChannel {
    client: reqwest::Client,
    config: BridgeConfig,
}

impl HttpBridgeChannel {
    /// Create a channel for the configured bridge.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::Client`] if the HTTP client cannot be built
    /// with the configured timeout.
    pub fn new(config: BridgeConfig) -> Result<Self, BridgeError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(BridgeError::Client)?;
        Ok(Self { client, config })
    }

    fn state_url(&self, lamp_id: &LampId) -> String {
        format!(
            "http://{host}/api/{username}/lights/{lamp_id}/state",
            host = self.config.host,
            username = self.config.username,
        )
    }
}

impl LightChannel for HttpBridgeChannel {
    async fn set_light_state(
        &self,
        lamp_id: &LampId,
        settings: &serde_json::Value,
    ) -> Result<(), ChannelError> {
        let url = self.state_url(lamp_id);
        tracing::debug!(%lamp_id, %url, "dispatching state change");

        let response = self
            .client
            .put(&url)
            .json(settings)
            .send()
            .await
            .map_err(|err| ChannelError::new(format!("bridge request failed: {err}")))?;

        response
            .error_for_status()
            .map_err(|err| ChannelError::new(format!("bridge rejected command: {err}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_build_hue_style_state_url() {
        let channel = HttpBridgeChannel::new(BridgeConfig {
            host: "192.168.1.10".to_string(),
            username: "scenecast-user".to_string(),
            ..BridgeConfig::default()
        })
        .unwrap();

        assert_eq!(
            channel.state_url(&LampId::new("7")),
            "http://192.168.1.10/api/scenecast-user/lights/7/state"
        );
    }

    #[test]
    fn should_include_port_when_host_carries_one() {
        let channel = HttpBridgeChannel::new(BridgeConfig {
            host: "bridge.local:8080".to_string(),
            ..BridgeConfig::default()
        })
        .unwrap();

        assert!(
            channel
                .state_url(&LampId::new("1"))
                .starts_with("http://bridge.local:8080/api/")
        );
    }

    #[tokio::test]
    async fn should_surface_connection_failure_as_channel_error() {
        // Reserved TEST-NET address: nothing listens there.
        let channel = HttpBridgeChannel::new(BridgeConfig {
            host: "192.0.2.1:9".to_string(),
            timeout_ms: 250,
            ..BridgeConfig::default()
        })
        .unwrap();

        let result = channel
            .set_light_state(&LampId::new("1"), &serde_json::json!({"on": true}))
            .await;
        assert!(result.is_err());
    }
}
