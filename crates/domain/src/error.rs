//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`SceneCastError`] via `#[from]`. Device-channel failures stay a separate
//! type on purpose: they are absorbed by the retry policy and reported to the
//! log sink, never propagated through `apply`.

/// Top-level error type crossing port boundaries.
#[derive(Debug, thiserror::Error)]
pub enum SceneCastError {
    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A named scene or zone does not exist.
    #[error("not found")]
    NotFound(#[from] NotFoundError),
}

/// Domain invariant violations.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A scene or zone was given an empty name.
    #[error("name must not be empty")]
    EmptyName,

    /// A setting-group names no target zones.
    #[error("setting-group must target at least one zone")]
    NoTargetZones,

    /// The admission reservoir must hold at least one token.
    #[error("rate limit reservoir must be at least 1")]
    ZeroReservoir,

    /// The refill window must be a non-zero multiple of the refill alignment.
    #[error("rate limit window must be a non-zero multiple of 250ms")]
    MisalignedWindow,
}

/// A lookup by name or id came up empty.
#[derive(Debug, thiserror::Error)]
#[error("{entity} not found: {name}")]
pub struct NotFoundError {
    /// Kind of thing looked up (e.g. `"Scene"`, `"Zone"`).
    pub entity: &'static str,
    /// The name or id that missed.
    pub name: String,
}

/// A device-control channel call failed.
///
/// The core treats every channel failure uniformly regardless of cause, so
/// the cause is carried as text for the log sink only.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct ChannelError {
    message: String,
}

impl ChannelError {
    /// Wrap a failure description.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The failure description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_convert_validation_error_into_scenecast_error() {
        let err: SceneCastError = ValidationError::EmptyName.into();
        assert!(matches!(
            err,
            SceneCastError::Validation(ValidationError::EmptyName)
        ));
    }

    #[test]
    fn should_format_not_found_with_entity_and_name() {
        let err = NotFoundError {
            entity: "Zone",
            name: "attic".to_string(),
        };
        assert_eq!(err.to_string(), "Zone not found: attic");
    }

    #[test]
    fn should_expose_channel_error_message() {
        let err = ChannelError::new("bridge unreachable");
        assert_eq!(err.message(), "bridge unreachable");
        assert_eq!(err.to_string(), "bridge unreachable");
    }
}
