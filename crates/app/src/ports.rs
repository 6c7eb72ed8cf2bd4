//! Port definitions — traits that adapters implement.
//!
//! Ports are the boundaries between the application core and the outside
//! world. They are defined here (in `app`) so that both the scheduling core
//! and the adapter layer can depend on them without creating circular
//! dependencies.

pub mod channel;
pub mod log_sink;

pub use channel::LightChannel;
pub use log_sink::LogSink;
