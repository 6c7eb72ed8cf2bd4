//! Scene — a named, ordered collection of setting-groups to apply to zones.

use serde::{Deserialize, Serialize};

use crate::error::{SceneCastError, ValidationError};

/// One opaque settings payload and the zone names it applies to.
///
/// The payload is whatever the downstream channel understands (brightness,
/// color, transition time, …); the core never inspects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingGroup {
    pub settings: serde_json::Value,
    #[serde(rename = "applyTo")]
    pub apply_to: Vec<String>,
}

impl SettingGroup {
    /// Create a group targeting the given zone names.
    #[must_use]
    pub fn new(settings: serde_json::Value, apply_to: Vec<String>) -> Self {
        Self { settings, apply_to }
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] when the group names no target
    /// zones.
    pub fn validate(&self) -> Result<(), SceneCastError> {
        if self.apply_to.is_empty() {
            return Err(ValidationError::NoTargetZones.into());
        }
        Ok(())
    }
}

/// A named collection of setting-groups.
///
/// Created by the external loader and read-only to the core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    pub name: String,
    pub groups: Vec<SettingGroup>,
}

impl Scene {
    /// Create a builder for constructing a [`Scene`].
    #[must_use]
    pub fn builder() -> SceneBuilder {
        SceneBuilder::default()
    }

    /// Check domain invariants.
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] when `name` is empty or any
    /// group targets no zones. A scene without groups is valid — applying it
    /// queues nothing.
    pub fn validate(&self) -> Result<(), SceneCastError> {
        if self.name.is_empty() {
            return Err(ValidationError::EmptyName.into());
        }
        for group in &self.groups {
            group.validate()?;
        }
        Ok(())
    }
}

/// Step-by-step builder for [`Scene`].
#[derive(Debug, Default)]
pub struct SceneBuilder {
    name: Option<String>,
    groups: Vec<SettingGroup>,
}

impl SceneBuilder {
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn group(mut self, settings: serde_json::Value, apply_to: &[&str]) -> Self {
        self.groups.push(SettingGroup::new(
            settings,
            apply_to.iter().map(ToString::to_string).collect(),
        ));
        self
    }

    /// Consume the builder, validate, and return a [`Scene`].
    ///
    /// # Errors
    ///
    /// Returns [`SceneCastError::Validation`] if invariants fail.
    pub fn build(self) -> Result<Scene, SceneCastError> {
        let scene = Scene {
            name: self.name.unwrap_or_default(),
            groups: self.groups,
        };
        scene.validate()?;
        Ok(scene)
    }
}
