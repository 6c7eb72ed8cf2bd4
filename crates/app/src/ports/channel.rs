//! Device-control channel port — the scarce downstream resource.
//!
//! The channel is the resource the rate gate protects: no component may call
//! it without first being admitted. Implementations live in adapter crates
//! (HTTP bridge, virtual).

use std::future::Future;

use scenecast_domain::error::ChannelError;
use scenecast_domain::id::LampId;

/// Sends one state-change command to a single lamp.
pub trait LightChannel: Send + Sync {
    /// Apply `settings` to the lamp identified by `lamp_id`.
    ///
    /// Expected to fail on transient network or device errors; the core
    /// treats any failure uniformly regardless of cause.
    fn set_light_state(
        &self,
        lamp_id: &LampId,
        settings: &serde_json::Value,
    ) -> impl Future<Output = Result<(), ChannelError>> + Send;
}

impl<T: LightChannel> LightChannel for std::sync::Arc<T> {
    fn set_light_state(
        &self,
        lamp_id: &LampId,
        settings: &serde_json::Value,
    ) -> impl Future<Output = Result<(), ChannelError>> + Send {
        (**self).set_light_state(lamp_id, settings)
    }
}
