//! # scenecast-adapter-virtual
//!
//! Virtual/demo light channel that accepts every command without talking to
//! real hardware. Records what it was asked to do, and can be told to fail a
//! lamp's next attempts to exercise the retry path.
//!
//! ## Dependency rule
//!
//! Depends on `scenecast-app` (port traits) and `scenecast-domain` only.

mod channel;

pub use channel::VirtualLightChannel;
