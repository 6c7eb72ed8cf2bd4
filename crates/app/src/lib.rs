//! # scenecast-app
//!
//! Application layer — the rate-limited command scheduler and its
//! **port definitions** (traits).
//!
//! ## Responsibilities
//! - Define **port traits** that adapters must implement (driven/outbound
//!   ports):
//!   - `LightChannel` — the downstream device-control channel
//!   - `LogSink` — the external single-argument logger
//! - Provide the scheduling core:
//!   - `RateGate` — token-reservoir admission bounded to R commands per
//!     window W
//!   - `Scheduler` — owns the single live `Generation` and performs the
//!     cutover when a new scene application arrives
//!   - `SceneApplier` — expands a scene into per-lamp command jobs and routes
//!     them through the scheduler
//! - Provide in-process infrastructure (`TracingLogSink`) that doesn't need IO
//!
//! ## Dependency rule
//! Depends on `scenecast-domain` only (plus `tokio::sync`/`tokio::time` for
//! channels and timers). Never imports adapter crates. Adapters depend on
//! *this* crate, not the reverse.

pub mod applier;
pub mod gate;
pub mod log_sink;
pub mod ports;
pub mod scheduler;
