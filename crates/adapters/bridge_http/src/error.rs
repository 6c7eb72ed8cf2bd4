//! Bridge adapter error types.

/// Errors specific to the HTTP bridge adapter.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    /// The underlying HTTP client could not be constructed.
    #[error("bridge HTTP client error")]
    Client(#[source] reqwest::Error),
}
